//! Basic types for configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::template::Application;

/// One application and the template roots it contributes.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl AppConfig {
    /// Resolves relative roots against `base_dir`.
    pub fn to_application(&self, base_dir: &Path) -> Application {
        Application::new(
            self.name.clone(),
            self.paths.iter().map(|p| if p.is_absolute() { p.clone() } else { base_dir.join(p) }),
        )
    }
}
