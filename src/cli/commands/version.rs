//! Version information display
//!
//! Prints version and build metadata in human or JSON format.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::gtc::{EAP_TYPE_GTC, METHOD_NAME};

/// Print version and build information.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version} (EAP-{METHOD_NAME}, type {EAP_TYPE_GTC})");
        }
        OutputFormat::Json => {
            let out = json!({
                "name": name,
                "version": version,
                "method": METHOD_NAME,
                "eap_type": EAP_TYPE_GTC,
            });
            println!("{out}");
        }
    }
}
