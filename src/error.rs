use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which group of sources a duplicate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Layout,
    Content,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Layout => "layout",
            Tier::Content => "content",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Two sources of one application resolve to the same `(format, name)`.
    #[error(
        "duplicate name of {tier} file:\n  1. {}\n  2. {}",
        first.display(),
        second.display()
    )]
    DuplicateTemplate { tier: Tier, first: PathBuf, second: PathBuf },

    /// A layout file whose name leaves no lookup key, e.g. `layouts/_.html`.
    #[error("Layout '{}' has an empty name after normalization.", path.display())]
    EmptyLayoutName { path: PathBuf },

    #[error("Cannot read '{}'. Original error: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template '{}'. Original error: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to walk template directory. Original error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to render. Original error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParse(#[from] globset::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("No configuration file found in '{config_dir}'. Tried: {config_files}.")]
    ConfigNotFound { config_dir: String, config_files: String },

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    #[error("Invalid route pattern. Original error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Unknown application '{0}'.")]
    UnknownApplication(String),

    #[error("Template not found: {ident}.")]
    TemplateNotFound { ident: String },
}

/// Convenience type alias for Results with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_both_paths() {
        let err = Error::DuplicateTemplate {
            tier: Tier::Content,
            first: PathBuf::from("/a/index.html"),
            second: PathBuf::from("/b/index.html"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("duplicate name of content file"));
        assert!(msg.contains("1. /a/index.html"));
        assert!(msg.contains("2. /b/index.html"));
    }

    #[test]
    fn tier_display() {
        assert_eq!(Tier::Layout.to_string(), "layout");
        assert_eq!(Tier::Content.to_string(), "content");
    }
}
