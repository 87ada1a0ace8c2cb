//! Turns discovered sources into compiled, renderable units.
//!
//! A layout wraps content through template inheritance: the composed entry
//! is the content source evaluated as a child of the layout, so every
//! `{% block %}` the content defines replaces the layout's block of the
//! same name. Each unit owns a private environment holding only its own
//! layout and content, which keeps one content file's blocks from ever
//! reaching another unit that shares the layout.

use log::debug;
use minijinja::Environment;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::scanner::SourceFile;
use crate::constants::LAYOUT_TEMPLATE_PREFIX;
use crate::error::{Error, Result};
use crate::renderer::FunctionEnv;

/// A source whose text has been read, keyed by its normalized name.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub key: String,
    pub format: String,
    pub text: String,
    pub path: PathBuf,
}

impl LoadedSource {
    /// Reads `source` from disk.
    pub fn read(key: &str, source: &SourceFile) -> Result<Self> {
        let text = fs::read_to_string(&source.path).map_err(|e| Error::UnreadableFile {
            path: source.path.clone(),
            source: e,
        })?;
        Ok(Self {
            key: key.to_string(),
            format: source.format.clone(),
            text,
            path: source.path.clone(),
        })
    }

    fn template_name(&self) -> String {
        template_name(&self.key, &self.format)
    }
}

fn template_name(key: &str, format: &str) -> String {
    if format.is_empty() {
        key.to_string()
    } else {
        format!("{key}.{format}")
    }
}

fn parse_error(path: &Path) -> impl FnOnce(minijinja::Error) -> Error + '_ {
    move |source| Error::Parse { path: path.to_path_buf(), source }
}

/// A parsed template, optionally wrapped in a layout, ready to render.
pub struct CompiledUnit {
    env: Environment<'static>,
    entry: String,
    sources: Vec<PathBuf>,
}

impl CompiledUnit {
    /// Renders the unit with `ctx`.
    pub fn render<S: Serialize>(&self, ctx: S) -> Result<String> {
        let template = self.env.get_template(&self.entry)?;
        Ok(template.render(ctx)?)
    }

    /// Files this unit was built from, layout first.
    pub fn source_paths(&self) -> &[PathBuf] {
        &self.sources
    }
}

impl fmt::Debug for CompiledUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledUnit")
            .field("entry", &self.entry)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Compiles `content` on its own.
pub fn compose_standalone(functions: &FunctionEnv, content: &LoadedSource) -> Result<CompiledUnit> {
    let mut env = functions.instantiate();
    let entry = content.template_name();
    env.add_template_owned(entry.clone(), content.text.clone())
        .map_err(parse_error(&content.path))?;
    debug!("Compiled '{}' as {entry}", content.path.display());
    Ok(CompiledUnit { env, entry, sources: vec![content.path.clone()] })
}

/// Compiles `content` wrapped in `layout`.
///
/// Both sources are parsed afresh into a new environment on every call.
pub fn compose_with_layout(
    functions: &FunctionEnv,
    layout: &LoadedSource,
    content: &LoadedSource,
) -> Result<CompiledUnit> {
    let mut env = functions.instantiate();
    let layout_name = format!("{LAYOUT_TEMPLATE_PREFIX}{}", layout.template_name());
    env.add_template_owned(layout_name.clone(), layout.text.clone())
        .map_err(parse_error(&layout.path))?;

    let entry = content.template_name();
    // JSON string escapes are valid template string literals.
    let quoted = serde_json::Value::String(layout_name.clone()).to_string();
    // Kept on the first line so error positions still match the file.
    let child = format!("{{% extends {quoted} %}}{}", content.text);
    env.add_template_owned(entry.clone(), child).map_err(parse_error(&content.path))?;
    debug!(
        "Compiled '{}' inside layout '{}' as {entry}",
        content.path.display(),
        layout.path.display()
    );
    Ok(CompiledUnit {
        env,
        entry,
        sources: vec![layout.path.clone(), content.path.clone()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(key: &str, format: &str, text: &str) -> LoadedSource {
        LoadedSource {
            key: key.to_string(),
            format: format.to_string(),
            text: text.to_string(),
            path: PathBuf::from(format!("/views/{key}.{format}")),
        }
    }

    #[test]
    fn test_standalone_renders_content() {
        let unit =
            compose_standalone(&FunctionEnv::default(), &loaded("index", "txt", "Hi {{ name }}"))
                .unwrap();
        assert_eq!(unit.render(json!({ "name": "Ann" })).unwrap(), "Hi Ann");
        assert_eq!(unit.source_paths(), &[PathBuf::from("/views/index.txt")]);
    }

    #[test]
    fn test_layout_wraps_blocks() {
        let layout = loaded("app", "html", "<main>{% block content %}{% endblock %}</main>");
        let content = loaded("index", "html", "{% block content %}Hello{% endblock %}");
        let unit = compose_with_layout(&FunctionEnv::default(), &layout, &content).unwrap();
        assert_eq!(unit.render(json!({})).unwrap(), "<main>Hello</main>");
        assert_eq!(unit.source_paths().len(), 2);
    }

    #[test]
    fn test_layout_name_with_quotes_and_marks() {
        let layout = loaded("say\"e\u{301}\\", "html", "[{% block content %}{% endblock %}]");
        let content = loaded("index", "html", "{% block content %}ok{% endblock %}");
        let unit = compose_with_layout(&FunctionEnv::default(), &layout, &content).unwrap();
        assert_eq!(unit.render(json!({})).unwrap(), "[ok]");
    }

    #[test]
    fn test_layout_parse_error_names_layout() {
        let layout = loaded("app", "html", "{% block content %}");
        let content = loaded("index", "html", "x");
        let err = compose_with_layout(&FunctionEnv::default(), &layout, &content).unwrap_err();
        match err {
            Error::Parse { path, .. } => assert_eq!(path, PathBuf::from("/views/app.html")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_content_parse_error_names_content() {
        let layout = loaded("app", "html", "{% block content %}{% endblock %}");
        let content = loaded("index", "html", "{{ unclosed");
        let err = compose_with_layout(&FunctionEnv::default(), &layout, &content).unwrap_err();
        match err {
            Error::Parse { path, .. } => assert_eq!(path, PathBuf::from("/views/index.html")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_format_less_source() {
        let unit =
            compose_standalone(&FunctionEnv::default(), &loaded("readme", "", "plain")).unwrap();
        assert_eq!(unit.render(json!({})).unwrap(), "plain");
    }
}
