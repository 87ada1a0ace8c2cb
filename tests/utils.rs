use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use viewset::{Application, FunctionEnv, ScanOptions, TemplateSet};

/// A temporary application root populated from `(relative path, content)` pairs.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let fixture = Self { dir: TempDir::new().unwrap() };
        for (rel, content) in files {
            fixture.write(rel, content);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn app(&self, name: &str) -> Application {
        Application::new(name, [self.root()])
    }
}

/// Builds a set for the given applications with default functions and options.
pub fn build(apps: &[Application]) -> viewset::error::Result<TemplateSet> {
    TemplateSet::from_apps(apps, &FunctionEnv::default(), &ScanOptions::default())
}
