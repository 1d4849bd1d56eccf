//! Per-authentication GTC session state.

use serde::Serialize;

/// Number of credentials a session may send before a new-password attempt
/// forces a reset and a fresh prompt.
pub const MAX_PASSWORD_ATTEMPTS: u32 = 2;

/// Optional method behaviors, selected at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GtcCapabilities {
    /// Recognize `E=<code>` error reports inside a tunnel.
    pub vendor_error_codes: bool,
    /// Send the replacement password when re-challenged after a credential
    /// was already sent in this session.
    pub new_password_retry: bool,
}

impl GtcCapabilities {
    /// Plain GTC: no error reports, no automatic password change.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            vendor_error_codes: false,
            new_password_retry: false,
        }
    }

    /// Vendor extensions: error reports and password-change retries.
    #[must_use]
    pub const fn vendor() -> Self {
        Self {
            vendor_error_codes: true,
            new_password_retry: true,
        }
    }
}

/// The EAP method GTC runs inside, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OuterMethod {
    /// GTC is the top-level method.
    #[default]
    None,
    /// Inner method of PEAP.
    Peap,
    /// Inner method of EAP-TTLS.
    Ttls,
    /// Inner method of EAP-FAST.
    Fast,
}

impl OuterMethod {
    /// Whether this tunnel wraps GTC exchanges in `CHALLENGE=`/`RESPONSE=`.
    #[must_use]
    pub const fn uses_tunnel_prefix(self) -> bool {
        matches!(self, Self::Fast)
    }
}

/// State for one GTC method instance.
///
/// Owned by the engine driving the conversation and lent to
/// [`GtcSession::process`] for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtcSession {
    tunnel_prefix: bool,
    password_tried: u32,
    capabilities: GtcCapabilities,
}

impl GtcSession {
    /// Creates a session with explicit tunnel framing.
    #[must_use]
    pub const fn new(tunnel_prefix: bool, capabilities: GtcCapabilities) -> Self {
        Self {
            tunnel_prefix,
            password_tried: 0,
            capabilities,
        }
    }

    /// Creates a session for GTC running inside `outer`.
    #[must_use]
    pub fn for_outer(outer: OuterMethod, capabilities: GtcCapabilities) -> Self {
        let tunnel_prefix = outer.uses_tunnel_prefix();
        if tunnel_prefix {
            tracing::debug!("EAP-GTC: EAP-FAST tunnel - use prefix with challenge/response");
        }
        Self::new(tunnel_prefix, capabilities)
    }

    /// Whether `CHALLENGE=`/`RESPONSE=` framing is active.
    #[must_use]
    pub const fn tunnel_prefix(&self) -> bool {
        self.tunnel_prefix
    }

    /// Enabled capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> GtcCapabilities {
        self.capabilities
    }

    /// Credentials sent so far in this session.
    #[must_use]
    pub const fn password_tried(&self) -> u32 {
        self.password_tried
    }

    /// Prepares the session for a re-authentication on the same association.
    pub const fn restart_for_reauth(&mut self) {
        self.password_tried = 0;
    }

    pub(crate) const fn attempts_exhausted(&self) -> bool {
        self.password_tried >= MAX_PASSWORD_ATTEMPTS
    }

    pub(crate) const fn reset_attempts(&mut self) {
        self.password_tried = 0;
    }

    pub(crate) fn record_attempt(&mut self) {
        self.password_tried = (self.password_tried + 1).min(MAX_PASSWORD_ATTEMPTS);
    }
}

impl Default for GtcSession {
    fn default() -> Self {
        Self::new(false, GtcCapabilities::standard())
    }
}
