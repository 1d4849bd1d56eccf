//! Settings command handlers
//!
//! Implements `settings show` and `settings check`.

use std::path::PathBuf;

use serde_json::json;

use crate::cli::args::{OutputFormat, SettingsArgs};
use crate::error::{ConfigError, GtcPeerError};
use crate::settings::{LAIRD_SETTINGS_PATH, LoadReport, SettingsLoader, SettingsProfile};

fn loader_for(args: &SettingsArgs) -> SettingsLoader {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(LAIRD_SETTINGS_PATH));
    SettingsLoader::new(SettingsProfile::new(args.brand.clone(), path).with_dms(args.dms))
}

/// Load the settings file and print the effective values.
///
/// A missing file or rejected lines are reported but never fail.
///
/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub fn show(args: &SettingsArgs) -> Result<(), GtcPeerError> {
    let loader = loader_for(args);
    let report = loader.load_with_report();
    print_report(&loader, &report, args.format)
}

/// Load the settings file strictly.
///
/// # Errors
///
/// Returns a config error if the file is missing or any recognized line
/// carries an out-of-range value.
pub fn check(args: &SettingsArgs) -> Result<(), GtcPeerError> {
    let loader = loader_for(args);
    tracing::info!(file = %loader.profile().source_path.display(), "checking settings");

    match loader.check() {
        Ok(report) => print_report(&loader, &report, args.format),
        Err(err) => {
            if let ConfigError::InvalidLines { issues, .. } = &err {
                for issue in issues {
                    eprintln!("  {issue}");
                }
            }
            Err(err.into())
        }
    }
}

fn print_report(
    loader: &SettingsLoader,
    report: &LoadReport,
    format: OutputFormat,
) -> Result<(), GtcPeerError> {
    let profile = loader.profile();
    match format {
        OutputFormat::Human => {
            println!(
                "{} settings from {}{}",
                profile.brand,
                profile.source_path.display(),
                if report.source_found {
                    ""
                } else {
                    " (not found, defaults)"
                }
            );
            for setting in profile.table() {
                println!(
                    "  {:<22}{}",
                    setting.key,
                    report.settings.get(setting.field)
                );
            }
            for issue in &report.rejected {
                println!("  ignored {issue}");
            }
        }
        OutputFormat::Json => {
            let rejected: Vec<_> = report
                .rejected
                .iter()
                .map(|issue| {
                    json!({
                        "line": issue.line,
                        "key": issue.key,
                        "value": issue.value,
                        "expected": issue.expected,
                    })
                })
                .collect();
            let out = json!({
                "brand": profile.brand,
                "source": profile.source_path.display().to_string(),
                "source_found": report.source_found,
                "settings": report.settings,
                "applied": report.applied,
                "rejected": rejected,
                "unrecognized": report.unrecognized,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
