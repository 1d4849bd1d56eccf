//! One GTC processing round: classify, pick a credential, build a reply.

use super::credentials::CredentialStore;
use super::outcome::{Decision, MethodOutcome, MethodState, PeerCommand, Reply};
use super::request::{GtcRequest, RequestKind, classify};
use super::response::GtcResponse;
use super::session::GtcSession;
use crate::error::MethodError;
use crate::observability::metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialSource {
    Otp,
    Password,
    NewPassword,
}

impl GtcSession {
    /// Processes one GTC request.
    ///
    /// On `Ok(Reply::Response(_))` built from a credential, `outcome` is set
    /// to `ignore = false`, `decision = CondSucc`, and `MayContinue` inside a
    /// tunnel or `Done` otherwise. An empty acknowledgement for a framing
    /// violation leaves `outcome` untouched. On `Ok(Reply::Prompt(_))`
    /// only `outcome.ignore` is set.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError::MissingIdentity`] when tunnel framing is active
    /// and the store has no identity. No response is built and `outcome` is
    /// not modified.
    pub fn process<S>(
        &mut self,
        store: &mut S,
        request: &GtcRequest<'_>,
        outcome: &mut MethodOutcome,
    ) -> Result<Reply, MethodError>
    where
        S: CredentialStore + ?Sized,
    {
        let kind = classify(request, self);
        self.process_classified(store, request, kind, outcome)
    }

    /// Like [`process`](Self::process), for a request the caller already
    /// ran through [`classify`] with this session.
    ///
    /// # Errors
    ///
    /// Same as [`process`](Self::process).
    pub fn process_classified<'a, S>(
        &mut self,
        store: &mut S,
        request: &GtcRequest<'a>,
        kind: RequestKind<'a>,
        outcome: &mut MethodOutcome,
    ) -> Result<Reply, MethodError>
    where
        S: CredentialStore + ?Sized,
    {
        let payload = request.payload();
        tracing::trace!(payload = %payload.escape_ascii(), "EAP-GTC: request message");
        metrics::record_request(kind.label());

        let mut use_new_password = false;
        match kind {
            RequestKind::FramingViolation => {
                tracing::debug!("EAP-GTC: challenge did not start with expected prefix");
                metrics::record_response("empty");
                return Ok(Reply::Response(GtcResponse::empty(request.identifier())));
            }
            RequestKind::ErrorReport { code } => {
                tracing::debug!(%code, "EAP-GTC: error report");
                if code.requests_new_password() {
                    use_new_password = true;
                } else {
                    tracing::info!("EAP-GTC: authentication failed");
                    return Ok(prompt(
                        outcome,
                        PeerCommand::RequestOtp {
                            prompt: payload.to_vec(),
                        },
                    ));
                }
            }
            RequestKind::Plain { .. } | RequestKind::TunnelChallenge { .. } => {
                if self.capabilities().new_password_retry && self.password_tried() > 0 {
                    tracing::debug!("EAP-GTC: credential already sent, trying new password");
                    use_new_password = true;
                }
            }
        }

        let (credential, source) = if use_new_password {
            match store.new_password() {
                Some(new_password) if !self.attempts_exhausted() => {
                    tracing::debug!("EAP-GTC: setting flag to promote new password on success");
                    (new_password, CredentialSource::NewPassword)
                }
                _ => {
                    self.reset_attempts();
                    return Ok(prompt(outcome, PeerCommand::RequestNewPassword));
                }
            }
        } else if let Some(otp) = store.otp() {
            (otp, CredentialSource::Otp)
        } else if let Some(password) = store.password() {
            (password, CredentialSource::Password)
        } else {
            tracing::info!("EAP-GTC: password not configured");
            return Ok(prompt(
                outcome,
                PeerCommand::RequestOtp {
                    prompt: payload.to_vec(),
                },
            ));
        };

        let response = if self.tunnel_prefix() {
            let identity = store.identity().ok_or(MethodError::MissingIdentity)?;
            metrics::record_response("tunnel");
            GtcResponse::tunneled(request.identifier(), identity, credential)
        } else {
            metrics::record_response("plain");
            GtcResponse::plain(request.identifier(), credential)
        };
        tracing::debug!(len = response.payload().len(), "EAP-GTC: response built");

        outcome.ignore = false;
        outcome.method_state = if self.tunnel_prefix() {
            MethodState::MayContinue
        } else {
            MethodState::Done
        };
        outcome.decision = Decision::CondSucc;
        outcome.allow_notifications = false;
        if source == CredentialSource::NewPassword {
            outcome.promote_new_password = true;
        }

        if source == CredentialSource::Otp {
            tracing::debug!("EAP-GTC: forgetting used password");
            store.clear_otp();
        }

        self.record_attempt();
        Ok(Reply::Response(response))
    }
}

fn prompt(outcome: &mut MethodOutcome, command: PeerCommand) -> Reply {
    metrics::record_prompt(command.label());
    outcome.ignore = true;
    Reply::Prompt(command)
}
