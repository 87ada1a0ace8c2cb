//! The published lookup structure: `application → layout → format → name → unit`.

use indexmap::IndexMap;
use log::{debug, info};
use std::path::PathBuf;

use super::collision::{index_sources, SourceIndex};
use super::composer::{compose_standalone, compose_with_layout, CompiledUnit, LoadedSource};
use super::normalize::normalize;
use super::scanner::{collect_content, collect_layouts, ScanOptions};
use crate::constants::{LAYOUTS_DIR, NO_LAYOUT};
use crate::error::{Error, Result, Tier};
use crate::renderer::FunctionEnv;

/// A named owner of one or more template roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub roots: Vec<PathBuf>,
}

impl Application {
    pub fn new<S, I, P>(name: S, roots: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { name: name.into(), roots: roots.into_iter().map(Into::into).collect() }
    }
}

/// Units of one layout keyed by `format → normalized name`.
pub type FormatTemplates = IndexMap<String, IndexMap<String, CompiledUnit>>;

/// Units of one application keyed by layout name; `""` holds standalone units.
pub type AppTemplates = IndexMap<String, FormatTemplates>;

/// An immutable, fully built set of templates.
///
/// Lookups never fail: a missing key is `None`, and the caller decides
/// whether that is a fallback or a visible error.
#[derive(Debug, Default)]
pub struct TemplateSet {
    apps: IndexMap<String, AppTemplates>,
}

impl TemplateSet {
    /// Scans, checks and compiles every application.
    ///
    /// Any duplicate, unreadable file or malformed source aborts the whole
    /// build; nothing partially built is returned.
    pub fn from_apps(
        apps: &[Application],
        functions: &FunctionEnv,
        options: &ScanOptions,
    ) -> Result<Self> {
        let mut set = IndexMap::new();
        for app in apps {
            let templates = build_app(app, functions, options)?;
            info!(
                "Built {} template(s) for application '{}'",
                templates.values().flat_map(|f| f.values()).map(IndexMap::len).sum::<usize>(),
                app.name
            );
            set.insert(app.name.clone(), templates);
        }
        Ok(Self { apps: set })
    }

    /// Looks up a unit. `name` and `layout_name` are normalized first.
    pub fn get(
        &self,
        app_name: &str,
        layout_name: &str,
        name: &str,
        format: &str,
    ) -> Option<&CompiledUnit> {
        self.apps
            .get(app_name)?
            .get(&normalize(layout_name))?
            .get(format)?
            .get(&normalize(name))
    }

    /// Human-readable identity of a key, for diagnostics only.
    pub fn ident(&self, app_name: &str, layout_name: &str, name: &str, format: &str) -> String {
        ident(app_name, layout_name, name, format)
    }

    /// Every registered identity, sorted.
    pub fn idents(&self) -> Vec<String> {
        let mut idents: Vec<String> = self
            .apps
            .iter()
            .flat_map(|(app, layouts)| {
                layouts.iter().flat_map(move |(layout, formats)| {
                    formats.iter().flat_map(move |(format, units)| {
                        units.keys().map(move |name| format_ident(app, layout, name, format))
                    })
                })
            })
            .collect();
        idents.sort();
        idents
    }

    /// Names of the applications in declaration order.
    pub fn apps(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    pub fn contains_app(&self, app_name: &str) -> bool {
        self.apps.contains_key(app_name)
    }

    /// Number of compiled units across all applications and layouts.
    pub fn len(&self) -> usize {
        self.apps
            .values()
            .flat_map(|layouts| layouts.values())
            .flat_map(|formats| formats.values())
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Formats `app:layout name.format` with normalized layout and name.
pub fn ident(app_name: &str, layout_name: &str, name: &str, format: &str) -> String {
    format_ident(app_name, &normalize(layout_name), &normalize(name), format)
}

/// Formats keys that are already normalized.
fn format_ident(app_name: &str, layout_key: &str, key: &str, format: &str) -> String {
    format!("{app_name}:{layout_key} {key}.{format}")
}

fn build_app(app: &Application, functions: &FunctionEnv, options: &ScanOptions) -> Result<AppTemplates> {
    let mut layout_sources = Vec::new();
    let mut content_sources = Vec::new();
    for root in &app.roots {
        debug!("Scanning '{}' for application '{}'", root.display(), app.name);
        let layout_dir = root.join(LAYOUTS_DIR);
        layout_sources.extend(collect_layouts(&layout_dir, options)?);
        content_sources.extend(collect_content(root, &layout_dir, options)?);
    }
    let layouts = index_sources(Tier::Layout, layout_sources)?;
    let contents = load_all(&index_sources(Tier::Content, content_sources)?)?;

    let mut templates = AppTemplates::new();

    let standalone = templates.entry(NO_LAYOUT.to_string()).or_default();
    for (format, by_name) in &contents {
        let units = standalone.entry(format.clone()).or_default();
        for (key, content) in by_name {
            units.insert(key.clone(), compose_standalone(functions, content)?);
        }
    }

    for (format, by_name) in &layouts {
        for (layout_key, layout_source) in by_name {
            if layout_key == NO_LAYOUT {
                return Err(Error::EmptyLayoutName { path: layout_source.path.clone() });
            }
            let layout = LoadedSource::read(layout_key, layout_source)?;
            let units = templates
                .entry(layout_key.clone())
                .or_default()
                .entry(format.clone())
                .or_default();
            let Some(matching) = contents.get(format) else {
                continue;
            };
            for (key, content) in matching {
                units.insert(key.clone(), compose_with_layout(functions, &layout, content)?);
            }
        }
    }

    Ok(templates)
}

type LoadedIndex = IndexMap<String, IndexMap<String, LoadedSource>>;

fn load_all(index: &SourceIndex) -> Result<LoadedIndex> {
    let mut loaded = LoadedIndex::new();
    for (format, by_name) in index {
        let by_key = loaded.entry(format.clone()).or_default();
        for (key, source) in by_name {
            by_key.insert(key.clone(), LoadedSource::read(key, source)?);
        }
    }
    Ok(loaded)
}
