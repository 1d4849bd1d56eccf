//! Operational settings
//!
//! Bounded numeric parameters (EAP timeout, roam and scan tuning, DFS,
//! DMS) read from a line-oriented `KEY VALUE` file. Out-of-range values
//! are dropped and the field keeps its default.

pub mod loader;
pub mod parser;
pub mod table;

pub use loader::{
    AppliedSetting, LAIRD_SETTINGS_PATH, LoadReport, SettingsLoader, SettingsProfile,
};
pub use parser::{LineOutcome, apply_line, parse_unsigned};
pub use table::{BoundSetting, OperationalSettings, SETTINGS, SettingField, table_for};
