//! Atomic replacement of the active template set.
//!
//! Readers take a snapshot and keep it for as long as they need; a rebuild
//! installs a new set without touching the one readers already hold.

use arc_swap::ArcSwap;
use log::{info, warn};
use std::sync::Arc;

use crate::error::Result;
use crate::renderer::FunctionEnv;
use crate::template::{Application, ScanOptions, TemplateSet};

pub struct SharedTemplateSet {
    snap: ArcSwap<TemplateSet>,
}

impl SharedTemplateSet {
    pub fn new(set: TemplateSet) -> Self {
        Self { snap: ArcSwap::from_pointee(set) }
    }

    /// The set active right now. It stays valid after later swaps.
    #[inline]
    pub fn snapshot(&self) -> Arc<TemplateSet> {
        self.snap.load_full()
    }

    /// Installs `set` and returns the one it replaced.
    pub fn replace(&self, set: TemplateSet) -> Arc<TemplateSet> {
        self.snap.swap(Arc::new(set))
    }

    /// Builds a fresh set and swaps it in.
    ///
    /// On error the active set is left in place and the error is returned.
    pub fn rebuild(
        &self,
        apps: &[Application],
        functions: &FunctionEnv,
        options: &ScanOptions,
    ) -> Result<Arc<TemplateSet>> {
        match TemplateSet::from_apps(apps, functions, options) {
            Ok(set) => {
                info!("Reloaded {} template(s)", set.len());
                Ok(self.replace(set))
            }
            Err(err) => {
                warn!("Reload failed, keeping the active template set: {err}");
                Err(err)
            }
        }
    }
}

impl Default for SharedTemplateSet {
    fn default() -> Self {
        Self::new(TemplateSet::default())
    }
}
