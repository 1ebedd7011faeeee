//! Fixed internal layout of a package archive.

use std::fmt;

/// Directory every package entry lives under.
pub const PAYLOAD_DIR: &str = "Payload/";

/// Executable payload. Only its presence is checked.
pub const MAIN_WASM: &str = "Payload/main.wasm";

/// Package icon.
pub const ICON_PNG: &str = "Payload/Icon.png";

/// Package descriptor.
pub const SOURCE_JSON: &str = "Payload/source.json";

/// Optional settings descriptor.
pub const SETTINGS_JSON: &str = "Payload/settings.json";

/// Optional filters descriptor.
pub const FILTERS_JSON: &str = "Payload/filters.json";

/// Strip the payload directory from an entry name for display.
pub fn display_name(entry_name: &str) -> &str {
    entry_name.strip_prefix(PAYLOAD_DIR).unwrap_or(entry_name)
}

/// The descriptor documents a package may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Source,
    Filters,
    Settings,
}

impl SchemaKind {
    /// Full entry path inside the archive.
    pub fn entry_path(&self) -> &'static str {
        match self {
            SchemaKind::Source => SOURCE_JSON,
            SchemaKind::Filters => FILTERS_JSON,
            SchemaKind::Settings => SETTINGS_JSON,
        }
    }

    /// Bare file name, as printed in diagnostics.
    pub fn file_name(&self) -> &'static str {
        display_name(self.entry_path())
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Source => write!(f, "source"),
            SchemaKind::Filters => write!(f, "filters"),
            SchemaKind::Settings => write!(f, "settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_payload_dir() {
        assert_eq!(display_name(MAIN_WASM), "main.wasm");
        assert_eq!(display_name("Payload/res/strings.json"), "res/strings.json");
        assert_eq!(display_name("README.md"), "README.md");
    }

    #[test]
    fn test_schema_kind_paths() {
        assert_eq!(SchemaKind::Source.file_name(), "source.json");
        assert_eq!(SchemaKind::Settings.entry_path(), SETTINGS_JSON);
        assert_eq!(SchemaKind::Filters.entry_path(), FILTERS_JSON);
    }

    #[test]
    fn test_schema_kind_display() {
        assert_eq!(SchemaKind::Settings.to_string(), "settings");
        assert_eq!(format!("{}", SchemaKind::Source), "source");
    }
}
