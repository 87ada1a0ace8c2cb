//! Configuration loading and management

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::config::types::AppConfig;
use crate::constants::CONFIG_FILENAMES;
use crate::error::{Error, Result};
use crate::renderer::{FunctionEnv, RouteTable};
use crate::template::{Application, ScanOptions, TemplateSet};

/// Project configuration: applications, their roots and build options
#[derive(Debug, Deserialize)]
pub struct ConfigV1 {
    #[serde(default)]
    pub apps: Vec<AppConfig>,
    /// Layout used when a caller does not name one
    #[serde(default)]
    pub default_layout: String,
    /// Glob patterns, relative to each root, that the scanner skips
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Route name to path pattern, used by `url(...)`
    #[serde(default)]
    pub routes: IndexMap<String, String>,
}

impl ConfigV1 {
    pub fn validate(&self) -> Result<(), Error> {
        if self.apps.is_empty() {
            return Err(Error::ConfigValidation("at least one app must be declared".into()));
        }
        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.name.is_empty() {
                return Err(Error::ConfigValidation("app name must not be empty".into()));
            }
            if !seen.insert(app.name.as_str()) {
                return Err(Error::ConfigValidation(format!(
                    "app '{}' is declared more than once",
                    app.name
                )));
            }
            if app.paths.is_empty() {
                return Err(Error::ConfigValidation(format!(
                    "app '{}' must have at least one path",
                    app.name
                )));
            }
        }
        Ok(())
    }

    pub fn applications(&self, base_dir: &Path) -> Vec<Application> {
        self.apps.iter().map(|app| app.to_application(base_dir)).collect()
    }

    pub fn function_env(&self) -> Result<FunctionEnv> {
        let table = RouteTable::new(self.routes.clone())?;
        Ok(FunctionEnv::new(Arc::new(table)))
    }

    pub fn scan_options(&self) -> Result<ScanOptions> {
        ScanOptions::new(self.ignore.as_slice())
    }

    /// Builds the template set for every configured application.
    pub fn build_template_set(&self, base_dir: &Path) -> Result<TemplateSet> {
        TemplateSet::from_apps(
            &self.applications(base_dir),
            &self.function_env()?,
            &self.scan_options()?,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Config {
    #[serde(rename = "v1")]
    V1(ConfigV1),
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = config_dir.join(config_file_name);

            if config_file_path.exists() {
                debug!("Loading configuration from '{}'", config_file_path.display());
                let content = std::fs::read_to_string(config_file_path)?;
                let config: Config = match *config_file_name {
                    "viewset.json" => serde_json::from_str(&content)?,
                    _ => serde_yaml::from_str(&content)?,
                };

                return Ok(config);
            }
        }

        Err(Error::ConfigNotFound {
            config_dir: config_dir.display().to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }
}
