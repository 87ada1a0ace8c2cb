use indexmap::IndexMap;
use minijinja::value::Value;
use regex::Regex;

use crate::error::Result;

/// Reverses a route name and its parameters into a path.
///
/// Backs the `url(...)` template function. Implementations are shared by
/// every template of a set, so they must be thread safe.
pub trait UrlReverser: Send + Sync {
    /// Returns the path for `name`, or a message describing why it cannot be built.
    fn reverse(&self, name: &str, params: &[Value]) -> Result<String, String>;
}

/// Reverser used when no router is configured: every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRouter;

impl UrlReverser for NoRouter {
    fn reverse(&self, name: &str, _params: &[Value]) -> Result<String, String> {
        Err(format!("no router configured to reverse route '{name}'"))
    }
}

/// Static route table with `:param` placeholders filled positionally.
///
/// ```
/// use viewset::renderer::{RouteTable, UrlReverser};
/// use minijinja::Value;
///
/// let table = RouteTable::new([("user", "/users/:id")]).unwrap();
/// assert_eq!(table.reverse("user", &[Value::from(7)]).unwrap(), "/users/7");
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: IndexMap<String, String>,
    placeholder: Regex,
}

impl RouteTable {
    pub fn new<I, K, V>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Self {
            routes: routes.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            placeholder: Regex::new(r":[A-Za-z_][A-Za-z0-9_]*")?,
        })
    }
}

impl UrlReverser for RouteTable {
    fn reverse(&self, name: &str, params: &[Value]) -> Result<String, String> {
        let pattern = self.routes.get(name).ok_or_else(|| format!("no such route '{name}'"))?;
        let expected = self.placeholder.find_iter(pattern).count();
        if expected != params.len() {
            return Err(format!(
                "route '{name}' takes {expected} parameter(s), {} given",
                params.len()
            ));
        }
        let mut next = params.iter();
        let path = self.placeholder.replace_all(pattern, |_: &regex::Captures<'_>| {
            next.next().map(ToString::to_string).unwrap_or_default()
        });
        Ok(path.into_owned())
    }
}
