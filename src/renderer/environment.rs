use super::functions::*;
use super::router::{NoRouter, UrlReverser};
use minijinja::value::{Rest, Value};
use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use std::sync::Arc;

/// The helper functions available to every template body.
///
/// Built once and handed to every parse; each compiled unit gets its own
/// copy, so configuring one environment never affects another.
#[derive(Clone)]
pub struct FunctionEnv {
    /// Environment with functions and filters, but no templates
    env: Environment<'static>,
}

impl FunctionEnv {
    /// Creates the function table with `router` backing `url(...)`.
    pub fn new(router: Arc<dyn UrlReverser>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(auto_escape_for);

        env.add_function("eq", eq);
        env.add_function("ne", ne);
        env.add_function("in", contains);
        env.add_function("nl2br", nl2br);
        env.add_function("raw", raw);
        env.add_function("date", date);
        env.add_function("url", move |name: String, params: Rest<Value>| {
            router
                .reverse(&name, &params)
                .map_err(|msg| Error::new(ErrorKind::InvalidOperation, msg))
        });

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("plural", to_plural);
        env.add_filter("singular", to_singular);

        Self { env }
    }

    /// A fresh environment carrying the function table and no templates.
    pub(crate) fn instantiate(&self) -> Environment<'static> {
        self.env.clone()
    }
}

/// HTML escaping for `html`, `htm` and `xml` entries; everything else is verbatim.
fn auto_escape_for(name: &str) -> AutoEscape {
    match name.rsplit_once('.').map(|(_, format)| format) {
        Some("html" | "htm" | "xml") => AutoEscape::Html,
        _ => AutoEscape::None,
    }
}

impl Default for FunctionEnv {
    fn default() -> Self {
        Self::new(Arc::new(NoRouter))
    }
}

impl std::fmt::Debug for FunctionEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionEnv").finish_non_exhaustive()
    }
}
