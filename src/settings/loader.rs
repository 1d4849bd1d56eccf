//! Settings loader.
//!
//! Loading is best-effort: every bound field is reset to its default, then
//! each line of the source is applied independently. A missing source, an
//! unreadable line, or an out-of-range value never fails the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::parser::{LineOutcome, apply_line};
use super::table::{BoundSetting, OperationalSettings, table_for};
use crate::error::{ConfigError, SettingIssue};
use crate::observability::metrics;

/// Default settings source for the Laird brand.
pub const LAIRD_SETTINGS_PATH: &str = "/data/Laird/Globals";

/// Brand-specific parameters for the settings loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsProfile {
    /// Brand name, used in reports.
    pub brand: String,
    /// Where the settings source lives.
    pub source_path: PathBuf,
    /// Prefix for log lines emitted while loading.
    pub log_prefix: String,
    /// Whether the `DMS` key is recognized.
    pub include_dms: bool,
}

impl SettingsProfile {
    /// Creates a profile for `brand` reading from `source_path`.
    ///
    /// The log prefix defaults to the brand name.
    #[must_use]
    pub fn new(brand: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        let brand = brand.into();
        Self {
            log_prefix: brand.clone(),
            brand,
            source_path: source_path.into(),
            include_dms: false,
        }
    }

    /// The stock Laird profile.
    #[must_use]
    pub fn laird() -> Self {
        Self::new("Laird", LAIRD_SETTINGS_PATH)
    }

    /// Overrides the source path.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Enables or disables the `DMS` key.
    #[must_use]
    pub const fn with_dms(mut self, include_dms: bool) -> Self {
        self.include_dms = include_dms;
        self
    }

    /// Overrides the log prefix.
    #[must_use]
    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    /// The setting table this profile recognizes.
    #[must_use]
    pub fn table(&self) -> &'static [BoundSetting] {
        table_for(self.include_dms)
    }
}

impl Default for SettingsProfile {
    fn default() -> Self {
        Self::laird()
    }
}

/// A line that was applied during a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedSetting {
    /// 1-based line number.
    pub line: usize,
    /// Matched key.
    pub key: &'static str,
    /// Value written.
    pub value: u32,
}

/// Everything a load observed, for diagnostics and strict checks.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The resulting settings.
    pub settings: OperationalSettings,
    /// Whether the source could be opened.
    pub source_found: bool,
    /// Lines whose values were written, in file order.
    pub applied: Vec<AppliedSetting>,
    /// Lines whose values were out of range, in file order.
    pub rejected: Vec<SettingIssue>,
    /// Number of lines matching no key.
    pub unrecognized: usize,
}

impl LoadReport {
    fn defaults() -> Self {
        Self {
            settings: OperationalSettings::defaults(),
            source_found: false,
            applied: Vec::new(),
            rejected: Vec::new(),
            unrecognized: 0,
        }
    }
}

/// Loads [`OperationalSettings`] according to a [`SettingsProfile`].
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    profile: SettingsProfile,
}

impl SettingsLoader {
    /// Creates a loader for `profile`.
    #[must_use]
    pub const fn new(profile: SettingsProfile) -> Self {
        Self { profile }
    }

    /// The profile this loader reads with.
    #[must_use]
    pub const fn profile(&self) -> &SettingsProfile {
        &self.profile
    }

    /// Loads settings from the profile's source path. Never fails.
    #[must_use]
    pub fn load(&self) -> OperationalSettings {
        self.load_with_report().settings
    }

    /// Loads settings from the profile's source path and reports per-line
    /// results.
    #[must_use]
    pub fn load_with_report(&self) -> LoadReport {
        self.load_path(&self.profile.source_path)
    }

    /// Loads settings from an explicit path.
    #[must_use]
    pub fn load_path(&self, path: &Path) -> LoadReport {
        match File::open(path) {
            Ok(file) => self.load_from_reader(BufReader::new(file)),
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    tracing::debug!(
                        path = %path.display(),
                        "{}: no settings file, using defaults",
                        self.profile.log_prefix
                    );
                } else {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "{}: cannot open settings file, using defaults",
                        self.profile.log_prefix
                    );
                }
                LoadReport::defaults()
            }
        }
    }

    /// Loads settings from any buffered reader.
    ///
    /// A final line without a terminator is still applied. A read error
    /// stops the load; lines applied before it are kept.
    pub fn load_from_reader<R: BufRead>(&self, mut reader: R) -> LoadReport {
        let table = self.profile.table();
        let mut report = LoadReport::defaults();
        report.source_found = true;

        let prefix = self.profile.log_prefix.as_str();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        line = line_no + 1,
                        "{prefix}: settings read failed"
                    );
                    break;
                }
            }
            line_no += 1;

            let line = buf.strip_suffix(b"\n").unwrap_or(buf.as_slice());
            // Match with the terminator attached; it counts as the byte that
            // must follow the key's whitespace gap.
            match apply_line(table, &buf, &mut report.settings) {
                LineOutcome::Applied { key, value } => {
                    tracing::debug!("{prefix}: setting {key} to {value}");
                    metrics::record_settings_line("applied");
                    report.applied.push(AppliedSetting {
                        line: line_no,
                        key,
                        value,
                    });
                }
                LineOutcome::Rejected { key, value } => {
                    tracing::debug!(
                        "{prefix}: invalid config line \"{}\"",
                        line.escape_ascii()
                    );
                    metrics::record_settings_line("rejected");
                    let expected = table
                        .iter()
                        .find(|s| s.key == key)
                        .map(BoundSetting::expected)
                        .unwrap_or_default();
                    report.rejected.push(SettingIssue {
                        line: line_no,
                        key,
                        value,
                        expected,
                    });
                }
                LineOutcome::Unrecognized => {
                    metrics::record_settings_line("unrecognized");
                    report.unrecognized += 1;
                }
            }
        }

        report
    }

    /// Loads settings and fails if the source is missing or any recognized
    /// line was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when the source cannot be opened
    /// and [`ConfigError::InvalidLines`] when one or more values were out of
    /// range.
    pub fn check(&self) -> Result<LoadReport, ConfigError> {
        let path = &self.profile.source_path;
        let report = self.load_path(path);
        if !report.source_found {
            return Err(ConfigError::MissingFile { path: path.clone() });
        }
        if !report.rejected.is_empty() {
            return Err(ConfigError::InvalidLines {
                path: path.clone(),
                count: report.rejected.len(),
                issues: report.rejected,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn loader() -> SettingsLoader {
        SettingsLoader::new(SettingsProfile::laird())
    }

    #[test]
    fn laird_profile_defaults() {
        let profile = SettingsProfile::laird();
        assert_eq!(profile.brand, "Laird");
        assert_eq!(profile.log_prefix, "Laird");
        assert_eq!(profile.source_path, PathBuf::from(LAIRD_SETTINGS_PATH));
        assert!(!profile.include_dms);
        assert_eq!(SettingsProfile::default(), profile);
    }

    #[test]
    fn applies_lines_in_order() {
        let input = "EAPTIMEOUT 5\nroamdelta 3\nSCANDWELLTIME 100\n";
        let report = loader().load_from_reader(Cursor::new(input));
        assert!(report.source_found);
        assert_eq!(report.settings.eap_timeout, 5);
        assert_eq!(report.settings.roam_delta, 3);
        assert_eq!(report.settings.scan_dwell_time, 100);
        assert_eq!(report.applied.len(), 3);
        assert_eq!(report.applied[1].line, 2);
    }

    #[test]
    fn trailing_line_without_newline_is_applied() {
        let report = loader().load_from_reader(Cursor::new("FOO 1\nDFSDISABLE 1"));
        assert_eq!(report.settings.dfs_disable, 1);
        assert_eq!(report.unrecognized, 1);
    }

    #[test]
    fn later_line_overrides_earlier() {
        let report = loader().load_from_reader(Cursor::new("EAPTIMEOUT 5\nEAPTIMEOUT 20\n"));
        assert_eq!(report.settings.eap_timeout, 20);
    }

    #[test]
    fn rejected_line_keeps_default_and_is_reported() {
        let report = loader().load_from_reader(Cursor::new("EAPTIMEOUT 2\n"));
        assert_eq!(report.settings.eap_timeout, 10);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].key, "EAPTIMEOUT");
        assert_eq!(report.rejected[0].value, 2);
        assert_eq!(report.rejected[0].expected, "3..=60");
    }

    #[test]
    fn rejected_line_keeps_earlier_applied_value() {
        let report = loader().load_from_reader(Cursor::new("EAPTIMEOUT 30\nEAPTIMEOUT 99\n"));
        assert_eq!(report.settings.eap_timeout, 30);
    }

    #[test]
    fn crlf_lines_are_tolerated() {
        let report = loader().load_from_reader(Cursor::new("EAPTIMEOUT 7\r\nROAMDELTA 2\r\n"));
        assert_eq!(report.settings.eap_timeout, 7);
        assert_eq!(report.settings.roam_delta, 2);
    }

    #[test]
    fn key_with_empty_value_resets_to_zero() {
        let report = loader().load_from_reader(Cursor::new("ROAMDELTA 5\nROAMDELTA \n"));
        assert_eq!(report.settings.roam_delta, 0);
        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.unrecognized, 0);
    }

    #[test]
    fn key_with_empty_value_is_rejected_when_zero_not_allowed() {
        let report = loader().load_from_reader(Cursor::new("EAPTIMEOUT 20\nEAPTIMEOUT \n"));
        assert_eq!(report.settings.eap_timeout, 20);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
        assert_eq!(report.rejected[0].value, 0);
    }

    #[test]
    fn key_with_crlf_gap_matches() {
        let report = loader().load_from_reader(Cursor::new("ROAMDELTA 4\nROAMDELTA\r\n"));
        assert_eq!(report.settings.roam_delta, 0);
    }

    #[test]
    fn unterminated_key_with_gap_is_unrecognized() {
        let report = loader().load_from_reader(Cursor::new("ROAMDELTA 4\nROAMDELTA "));
        assert_eq!(report.settings.roam_delta, 4);
        assert_eq!(report.unrecognized, 1);
    }

    #[test]
    fn non_utf8_lines_do_not_stop_the_load() {
        let mut input = b"\xff\xfe junk\n".to_vec();
        input.extend_from_slice(b"EAPTIMEOUT 15\n");
        let report = loader().load_from_reader(Cursor::new(input));
        assert_eq!(report.settings.eap_timeout, 15);
    }

    #[test]
    fn dms_requires_profile_flag() {
        let plain = loader().load_from_reader(Cursor::new("DMS 4\n"));
        assert_eq!(plain.settings.dms, 0);
        assert_eq!(plain.unrecognized, 1);

        let with_dms = SettingsLoader::new(SettingsProfile::laird().with_dms(true))
            .load_from_reader(Cursor::new("DMS 4\n"));
        assert_eq!(with_dms.settings.dms, 4);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let report = loader().load_path(Path::new("/nonexistent/gtc-peer/Globals"));
        assert!(!report.source_found);
        assert_eq!(report.settings, OperationalSettings::defaults());
    }

    #[test]
    fn check_reports_missing_file() {
        let loader = SettingsLoader::new(
            SettingsProfile::laird().with_source_path("/nonexistent/gtc-peer/Globals"),
        );
        assert!(matches!(
            loader.check(),
            Err(ConfigError::MissingFile { .. })
        ));
    }
}
