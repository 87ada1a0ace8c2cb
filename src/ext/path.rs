use std::path::Path;

use crate::constants::HIDDEN_PREFIX;

/// Extension trait for Path with the naming rules used by the scanner.
pub trait PathExt {
    /// Splits a relative path into `(name, format)`.
    ///
    /// The format is the last extension without its dot. The name is
    /// everything before it, with directory components joined by `/`
    /// regardless of the host separator.
    ///
    /// # Examples
    /// ```
    /// use viewset::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let (name, format) = Path::new("admin/users/index.html").split_ext();
    /// assert_eq!(name, "admin/users/index");
    /// assert_eq!(format, "html");
    /// ```
    fn split_ext(&self) -> (String, String);

    /// Whether the final component starts with the hidden-file marker.
    fn is_hidden(&self) -> bool;
}

impl PathExt for Path {
    fn split_ext(&self) -> (String, String) {
        let format = self
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = self
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        (name, format)
    }

    fn is_hidden(&self) -> bool {
        self.file_name()
            .map(|n| n.to_string_lossy().starts_with(HIDDEN_PREFIX))
            .unwrap_or(false)
    }
}
