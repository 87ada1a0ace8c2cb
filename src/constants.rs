//! Constants used throughout viewset

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["viewset.json", "viewset.yaml", "viewset.yml"];

/// Directory under each application root that holds layout sources
pub const LAYOUTS_DIR: &str = "layouts";

/// Entries whose file name starts with this marker are never scanned
pub const HIDDEN_PREFIX: char = '.';

/// Layout name meaning "no layout"
pub const NO_LAYOUT: &str = "";

/// Name under which a layout is registered inside a composed unit's environment
pub const LAYOUT_TEMPLATE_PREFIX: &str = "layouts/";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
