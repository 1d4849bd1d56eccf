//! Inbound GTC requests and their classification.

use super::session::GtcSession;

/// Prefix of a tunnel-framed challenge.
pub const CHALLENGE_PREFIX: &[u8] = b"CHALLENGE=";

/// Prefix of an embedded error report.
pub const ERROR_PREFIX: &[u8] = b"E=";

/// A decoded GTC request, borrowed from the framing layer for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GtcRequest<'a> {
    identifier: u8,
    payload: &'a [u8],
}

impl<'a> GtcRequest<'a> {
    /// Wraps a request payload and the EAP identifier it arrived with.
    #[must_use]
    pub const fn new(identifier: u8, payload: &'a [u8]) -> Self {
        Self {
            identifier,
            payload,
        }
    }

    /// EAP identifier to echo in the response.
    #[must_use]
    pub const fn identifier(&self) -> u8 {
        self.identifier
    }

    /// Type-data after the EAP header.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// Error codes a server can embed in an `E=` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// 646
    RestrictedLogonHours,
    /// 647
    AccountDisabled,
    /// 648
    PasswordExpired,
    /// 649
    NoDialinPermission,
    /// 691
    AuthenticationFailure,
    /// 709
    ChangingPassword,
    /// 755
    PacIdentityMismatch,
    /// Anything else, including 0 for an unparsable code.
    Other(u32),
}

impl ErrorCode {
    /// Numeric value of the code.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::RestrictedLogonHours => 646,
            Self::AccountDisabled => 647,
            Self::PasswordExpired => 648,
            Self::NoDialinPermission => 649,
            Self::AuthenticationFailure => 691,
            Self::ChangingPassword => 709,
            Self::PacIdentityMismatch => 755,
            Self::Other(value) => value,
        }
    }

    /// Whether the server is asking for the password to be changed.
    #[must_use]
    pub const fn requests_new_password(self) -> bool {
        matches!(self, Self::PasswordExpired | Self::ChangingPassword)
    }
}

impl From<u32> for ErrorCode {
    fn from(value: u32) -> Self {
        match value {
            646 => Self::RestrictedLogonHours,
            647 => Self::AccountDisabled,
            648 => Self::PasswordExpired,
            649 => Self::NoDialinPermission,
            691 => Self::AuthenticationFailure,
            709 => Self::ChangingPassword,
            755 => Self::PacIdentityMismatch,
            other => Self::Other(other),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RestrictedLogonHours => "restricted logon hours",
            Self::AccountDisabled => "account disabled",
            Self::PasswordExpired => "password expired",
            Self::NoDialinPermission => "no dial-in permission",
            Self::AuthenticationFailure => "authentication failure",
            Self::ChangingPassword => "changing password",
            Self::PacIdentityMismatch => "PAC identity mismatch",
            Self::Other(_) => "unknown error",
        };
        write!(f, "{} ({name})", self.value())
    }
}

/// Reads a decimal number from the start of `digits`.
///
/// Parsing stops at the first non-digit; no leading digit yields 0.
/// Overlong numbers saturate rather than wrap.
#[must_use]
pub fn parse_error_number(digits: &[u8]) -> u32 {
    digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, &b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// How a request should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind<'a> {
    /// No tunnel framing; the whole payload is the challenge.
    Plain {
        /// Challenge text.
        challenge: &'a [u8],
    },
    /// `CHALLENGE=` framed request inside a tunnel.
    TunnelChallenge {
        /// Challenge text after the prefix.
        challenge: &'a [u8],
    },
    /// `E=<code>` error report inside a tunnel.
    ErrorReport {
        /// Reported code.
        code: ErrorCode,
    },
    /// Tunnel framing expected but the prefix is missing.
    FramingViolation,
}

impl RequestKind<'_> {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plain { .. } => "plain",
            Self::TunnelChallenge { .. } => "tunnel_challenge",
            Self::ErrorReport { .. } => "error_report",
            Self::FramingViolation => "framing_violation",
        }
    }
}

/// Classifies `request` for `session`.
///
/// Inside a tunnel, an error report wins over prefix validation when
/// vendor error codes are enabled.
#[must_use]
pub fn classify<'a>(request: &GtcRequest<'a>, session: &GtcSession) -> RequestKind<'a> {
    let payload = request.payload();

    if !session.tunnel_prefix() {
        return RequestKind::Plain { challenge: payload };
    }

    if session.capabilities().vendor_error_codes {
        if let Some(digits) = payload.strip_prefix(ERROR_PREFIX) {
            return RequestKind::ErrorReport {
                code: ErrorCode::from(parse_error_number(digits)),
            };
        }
    }

    payload
        .strip_prefix(CHALLENGE_PREFIX)
        .map_or(RequestKind::FramingViolation, |challenge| {
            RequestKind::TunnelChallenge { challenge }
        })
}
