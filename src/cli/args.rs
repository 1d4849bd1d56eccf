//! CLI argument definitions
//!
//! All Clap derive structs for `gtc-peer` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::gtc::{GtcCapabilities, OuterMethod};
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// EAP-GTC peer method and operational settings toolkit.
#[derive(Parser, Debug)]
#[command(name = "gtc-peer", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "GTC_PEER_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "GTC_PEER_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Print Prometheus metrics to stderr before exiting.
    #[arg(long, global = true)]
    pub metrics: bool,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or check the operational settings file.
    Settings(SettingsCommand),

    /// Run GTC rounds against request payloads.
    Respond(RespondArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Settings Command
// ============================================================================

/// Settings commands.
#[derive(Args, Debug)]
pub struct SettingsCommand {
    /// Settings subcommand.
    #[command(subcommand)]
    pub subcommand: SettingsSubcommand,
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum SettingsSubcommand {
    /// Load the settings file and print the effective values.
    Show(SettingsArgs),

    /// Fail if the settings file is missing or has out-of-range values.
    Check(SettingsArgs),
}

/// Arguments shared by `settings show` and `settings check`.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Settings file (defaults to the brand's standard location).
    #[arg(short, long, env = "GTC_PEER_SETTINGS")]
    pub file: Option<PathBuf>,

    /// Brand name used for log prefixes.
    #[arg(long, default_value = "Laird")]
    pub brand: String,

    /// Recognize the DMS setting.
    #[arg(long)]
    pub dms: bool,

    /// Output format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Respond Command
// ============================================================================

/// Arguments for `respond`.
///
/// Each payload is one request; all rounds share one session, so retry
/// state carries across them.
#[derive(Args, Debug)]
pub struct RespondArgs {
    /// Request payloads, one per round.
    #[arg(required = true)]
    pub payloads: Vec<String>,

    /// Payloads are base64 rather than text.
    #[arg(long)]
    pub base64: bool,

    /// EAP identifier of the first request; later rounds increment it.
    #[arg(long, default_value_t = 1)]
    pub id: u8,

    /// Method GTC runs inside.
    #[arg(long, default_value = "none")]
    pub outer: OuterArg,

    /// Recognize `E=<code>` error reports.
    #[arg(long)]
    pub vendor_errors: bool,

    /// Send the new password when re-challenged.
    #[arg(long)]
    pub new_password_retry: bool,

    /// Standing password.
    #[arg(long, env = "GTC_PEER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// One-time password.
    #[arg(long, env = "GTC_PEER_OTP", hide_env_values = true)]
    pub otp: Option<String>,

    /// Replacement password.
    #[arg(long, env = "GTC_PEER_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: Option<String>,

    /// Identity for tunnel-framed responses.
    #[arg(long, env = "GTC_PEER_IDENTITY")]
    pub identity: Option<String>,

    /// Output format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

impl RespondArgs {
    /// Capabilities selected by flags.
    #[must_use]
    pub const fn capabilities(&self) -> GtcCapabilities {
        GtcCapabilities {
            vendor_error_codes: self.vendor_errors,
            new_password_retry: self.new_password_retry,
        }
    }
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    pub shell: Shell,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Value Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Outer method choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OuterArg {
    /// GTC is the top-level method.
    #[default]
    None,
    /// Inside PEAP.
    Peap,
    /// Inside EAP-TTLS.
    Ttls,
    /// Inside EAP-FAST (tunnel prefix framing).
    Fast,
}

impl From<OuterArg> for OuterMethod {
    fn from(arg: OuterArg) -> Self {
        match arg {
            OuterArg::None => Self::None,
            OuterArg::Peap => Self::Peap,
            OuterArg::Ttls => Self::Ttls,
            OuterArg::Fast => Self::Fast,
        }
    }
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_respond_with_flags() {
        let cli = Cli::try_parse_from([
            "gtc-peer",
            "respond",
            "--outer",
            "fast",
            "--vendor-errors",
            "--password",
            "pw",
            "--identity",
            "alice",
            "CHALLENGE=x",
            "E=648",
        ])
        .unwrap();
        let Commands::Respond(args) = cli.command else {
            panic!("expected respond");
        };
        assert_eq!(args.payloads, vec!["CHALLENGE=x", "E=648"]);
        assert_eq!(args.outer, OuterArg::Fast);
        assert!(args.capabilities().vendor_error_codes);
        assert!(!args.capabilities().new_password_retry);
        assert_eq!(args.id, 1);
    }

    #[test]
    fn respond_requires_payload() {
        assert!(Cli::try_parse_from(["gtc-peer", "respond"]).is_err());
    }

    #[test]
    fn parses_settings_show() {
        let cli = Cli::try_parse_from([
            "gtc-peer", "settings", "show", "--file", "/tmp/Globals", "--dms", "--format", "json",
        ])
        .unwrap();
        let Commands::Settings(cmd) = cli.command else {
            panic!("expected settings");
        };
        let SettingsSubcommand::Show(args) = cmd.subcommand else {
            panic!("expected show");
        };
        assert_eq!(args.file, Some(PathBuf::from("/tmp/Globals")));
        assert!(args.dms);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.brand, "Laird");
    }

    #[test]
    fn outer_arg_maps_to_method() {
        assert_eq!(OuterMethod::from(OuterArg::Fast), OuterMethod::Fast);
        assert_eq!(OuterMethod::from(OuterArg::None), OuterMethod::None);
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["gtc-peer", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.metrics);
        assert_eq!(cli.log_format, LogFormat::Human);
    }

    #[test]
    fn parses_json_log_format() {
        let cli = Cli::try_parse_from(["gtc-peer", "version", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
