//! `respond` command handler
//!
//! Drives one [`GtcSession`] through a sequence of request payloads and
//! prints what the method would send back for each round.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::cli::args::{OutputFormat, RespondArgs};
use crate::error::GtcPeerError;
use crate::gtc::{
    GtcRequest, GtcSession, MemoryCredentials, MethodOutcome, PeerCommand, Reply, classify,
};

/// Run every payload through a single session.
///
/// # Errors
///
/// Returns a usage error if a payload is not valid base64 (with
/// `--base64`), or a method error if a round cannot produce any reply.
pub fn run(args: &RespondArgs) -> Result<(), GtcPeerError> {
    let payloads = decode_payloads(args)?;
    let mut store = credentials_from(args);
    let mut session = GtcSession::for_outer(args.outer.into(), args.capabilities());
    tracing::info!(
        rounds = payloads.len(),
        tunnel_prefix = session.tunnel_prefix(),
        "running GTC rounds"
    );

    let mut rounds = Vec::with_capacity(payloads.len());
    let mut identifier = args.id;
    for (round, payload) in payloads.iter().enumerate() {
        let request = GtcRequest::new(identifier, payload);
        let kind = classify(&request, &session);
        let label = kind.label();
        let mut outcome = MethodOutcome::default();
        let reply = session.process_classified(&mut store, &request, kind, &mut outcome)?;

        match args.format {
            OutputFormat::Human => print_round(round + 1, identifier, label, &reply, &outcome),
            OutputFormat::Json => {
                rounds.push(round_json(round + 1, identifier, label, &reply, &outcome));
            }
        }
        identifier = identifier.wrapping_add(1);
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&Value::Array(rounds))?);
    }
    Ok(())
}

fn decode_payloads(args: &RespondArgs) -> Result<Vec<Vec<u8>>, GtcPeerError> {
    if !args.base64 {
        return Ok(args.payloads.iter().map(|p| p.as_bytes().to_vec()).collect());
    }
    args.payloads
        .iter()
        .enumerate()
        .map(|(i, p)| {
            STANDARD
                .decode(p)
                .map_err(|e| GtcPeerError::Usage(format!("payload {}: invalid base64: {e}", i + 1)))
        })
        .collect()
}

fn credentials_from(args: &RespondArgs) -> MemoryCredentials {
    let mut store = MemoryCredentials::new();
    if let Some(password) = &args.password {
        store.set_password(password.as_bytes());
    }
    if let Some(otp) = &args.otp {
        store.set_otp(otp.as_bytes());
    }
    if let Some(new_password) = &args.new_password {
        store.set_new_password(new_password.as_bytes());
    }
    if let Some(identity) = &args.identity {
        store = store.with_identity(identity.as_bytes());
    }
    store
}

fn print_round(round: usize, identifier: u8, kind: &str, reply: &Reply, outcome: &MethodOutcome) {
    match reply {
        Reply::Response(response) => {
            println!(
                "round {round} (id {identifier}, {kind}): response \"{}\"",
                response.payload().escape_ascii()
            );
            println!(
                "  state={:?} decision={:?} promote_new_password={}",
                outcome.method_state, outcome.decision, outcome.promote_new_password
            );
        }
        Reply::Prompt(PeerCommand::RequestOtp { prompt }) => {
            println!(
                "round {round} (id {identifier}, {kind}): prompt for password \"{}\"",
                prompt.escape_ascii()
            );
        }
        Reply::Prompt(PeerCommand::RequestNewPassword) => {
            println!("round {round} (id {identifier}, {kind}): prompt for new password");
        }
    }
}

fn round_json(
    round: usize,
    identifier: u8,
    kind: &str,
    reply: &Reply,
    outcome: &MethodOutcome,
) -> Value {
    let (reply_kind, payload, command, prompt) = match reply {
        Reply::Response(response) => (
            "response",
            Some(STANDARD.encode(response.payload())),
            None,
            None,
        ),
        Reply::Prompt(command) => {
            let prompt = match command {
                PeerCommand::RequestOtp { prompt } => Some(STANDARD.encode(prompt)),
                PeerCommand::RequestNewPassword => None,
            };
            ("prompt", None, Some(command.label()), prompt)
        }
    };
    json!({
        "round": round,
        "identifier": identifier,
        "kind": kind,
        "reply": reply_kind,
        "payload_base64": payload,
        "command": command,
        "prompt_base64": prompt,
        "outcome": outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use clap::Parser;

    fn parse(argv: &[&str]) -> RespondArgs {
        let mut full = vec!["gtc-peer", "respond"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Respond(args) => args,
            _ => panic!("expected respond"),
        }
    }

    #[test]
    fn text_payloads_pass_through() {
        let args = parse(&["Password:", "again"]);
        let payloads = decode_payloads(&args).unwrap();
        assert_eq!(payloads, vec![b"Password:".to_vec(), b"again".to_vec()]);
    }

    #[test]
    fn base64_payloads_are_decoded() {
        let args = parse(&["--base64", "Q0hBTExFTkdFPXg="]);
        assert_eq!(decode_payloads(&args).unwrap(), vec![b"CHALLENGE=x".to_vec()]);
    }

    #[test]
    fn bad_base64_is_usage_error() {
        let args = parse(&["--base64", "not base64!"]);
        let err = decode_payloads(&args).unwrap_err();
        assert!(matches!(err, GtcPeerError::Usage(_)));
        assert!(err.to_string().contains("payload 1"));
    }

    #[test]
    fn json_round_for_response() {
        let reply = Reply::Response(crate::gtc::GtcResponse::plain(7, b"pw"));
        let value = round_json(1, 7, "plain", &reply, &MethodOutcome::default());
        assert_eq!(value["reply"], "response");
        assert_eq!(value["payload_base64"], "cHc=");
        assert!(value["command"].is_null());
        assert_eq!(value["outcome"]["decision"], "fail");
    }

    #[test]
    fn json_round_for_prompt() {
        let reply = Reply::Prompt(PeerCommand::RequestNewPassword);
        let value = round_json(2, 8, "error_report", &reply, &MethodOutcome::default());
        assert_eq!(value["reply"], "prompt");
        assert_eq!(value["command"], "request_new_password");
        assert!(value["payload_base64"].is_null());
    }

    #[test]
    fn missing_identity_in_tunnel_fails() {
        let args = parse(&["--outer", "fast", "--password", "pw", "CHALLENGE=x"]);
        let err = run(&args).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::METHOD_ERROR);
    }
}
