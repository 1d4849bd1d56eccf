//! Signals returned to the surrounding EAP engine.

use serde::Serialize;

use super::response::GtcResponse;

/// Whether the method expects more rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodState {
    /// More rounds required.
    #[default]
    Continue,
    /// More rounds possible, e.g. inside a tunnel.
    MayContinue,
    /// Method finished.
    Done,
}

/// The method's view of whether authentication may succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Authentication failed.
    #[default]
    Fail,
    /// Success if the server agrees.
    CondSucc,
    /// Success regardless of the server.
    UncondSucc,
}

/// Per-call result flags, owned by the engine and updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodOutcome {
    /// Drop the request without answering.
    pub ignore: bool,
    /// Whether more rounds are expected.
    pub method_state: MethodState,
    /// Current decision.
    pub decision: Decision,
    /// Whether EAP notifications are acceptable now.
    pub allow_notifications: bool,
    /// Promote the replacement password to standing password once the
    /// authentication succeeds.
    pub promote_new_password: bool,
}

impl Default for MethodOutcome {
    fn default() -> Self {
        Self {
            ignore: false,
            method_state: MethodState::Continue,
            decision: Decision::Fail,
            allow_notifications: true,
            promote_new_password: false,
        }
    }
}

/// A request for interactive input, to be routed to the user by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCommand {
    /// Ask for a password or one-time password, showing `prompt`.
    RequestOtp {
        /// Server-supplied prompt text.
        prompt: Vec<u8>,
    },
    /// Ask for a replacement password.
    RequestNewPassword,
}

impl PeerCommand {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RequestOtp { .. } => "request_otp",
            Self::RequestNewPassword => "request_new_password",
        }
    }
}

/// What one processing call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send this response.
    Response(GtcResponse),
    /// Send nothing; prompt the user and wait for the next request.
    Prompt(PeerCommand),
}

impl Reply {
    /// The response, if one was built.
    #[must_use]
    pub const fn response(&self) -> Option<&GtcResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Prompt(_) => None,
        }
    }

    /// The prompt, if one was issued.
    #[must_use]
    pub const fn command(&self) -> Option<&PeerCommand> {
        match self {
            Self::Response(_) => None,
            Self::Prompt(command) => Some(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_defaults() {
        let outcome = MethodOutcome::default();
        assert!(!outcome.ignore);
        assert_eq!(outcome.method_state, MethodState::Continue);
        assert_eq!(outcome.decision, Decision::Fail);
        assert!(outcome.allow_notifications);
        assert!(!outcome.promote_new_password);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let outcome = MethodOutcome {
            method_state: MethodState::MayContinue,
            decision: Decision::CondSucc,
            ..MethodOutcome::default()
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["method_state"], "may_continue");
        assert_eq!(json["decision"], "cond_succ");
        assert_eq!(json["ignore"], false);
    }

    #[test]
    fn reply_accessors() {
        let reply = Reply::Prompt(PeerCommand::RequestNewPassword);
        assert!(reply.response().is_none());
        assert_eq!(reply.command().map(PeerCommand::label), Some("request_new_password"));

        let reply = Reply::Response(GtcResponse::empty(1));
        assert!(reply.response().is_some_and(GtcResponse::is_empty));
        assert!(reply.command().is_none());
    }
}
