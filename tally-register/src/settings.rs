//! Persisted register view settings.
//!
//! Sort column, direction, and the paste-date preference live in
//! `~/.config/tally/settings.toml` under `[register]`. Updates are
//! surgical (`toml::Value` round-trip) so unrelated keys written by
//! other parts of the application are preserved.

use std::io;
use std::path::{Path, PathBuf};

use crate::sort::SortColumn;

/// User-tunable register view preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub sort_column: SortColumn,
    pub ascending: bool,
    /// Pasted copies keep the source date instead of today's.
    pub paste_keeps_date: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            sort_column: SortColumn::Date,
            ascending: true,
            paste_keeps_date: false,
        }
    }
}

/// Canonical path to the settings file: `~/.config/tally/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("tally").join("settings.toml")
}

/// Load the view settings, falling back to defaults for anything
/// missing or malformed.
pub fn load_view_settings() -> ViewSettings {
    load_from(&settings_path())
}

/// Load view settings from an explicit file.
pub fn load_from(path: &Path) -> ViewSettings {
    let mut settings = ViewSettings::default();
    let Ok(contents) = std::fs::read_to_string(path) else {
        return settings;
    };
    let Ok(doc) = contents.parse::<toml::Value>() else {
        return settings;
    };
    let Some(register) = doc.get("register") else {
        return settings;
    };

    if let Some(column) = register.get("sort_column").and_then(|v| v.as_str()) {
        settings.sort_column = SortColumn::from_str_loose(column);
    }
    if let Some(asc) = register.get("ascending").and_then(|v| v.as_bool()) {
        settings.ascending = asc;
    }
    if let Some(keep) = register.get("paste_keeps_date").and_then(|v| v.as_bool()) {
        settings.paste_keeps_date = keep;
    }
    settings
}

/// Save the view settings to the canonical file.
pub fn save_view_settings(settings: &ViewSettings) -> io::Result<()> {
    save_to(&settings_path(), settings)
}

/// Save view settings to an explicit file, preserving keys owned by
/// other subsystems.
pub fn save_to(path: &Path, settings: &ViewSettings) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(path) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let register = table
        .entry("register")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let register_table = register
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[register] is not a table"))?;

    register_table.insert(
        "sort_column".to_string(),
        toml::Value::String(settings.sort_column.as_str().to_string()),
    );
    register_table.insert(
        "ascending".to_string(),
        toml::Value::Boolean(settings.ascending),
    );
    register_table.insert(
        "paste_keeps_date".to_string(),
        toml::Value::Boolean(settings.paste_keeps_date),
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&doc).map_err(io::Error::other)?)
}
