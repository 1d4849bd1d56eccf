//! EAP-GTC peer method
//!
//! Generic Token Card (RFC 3748, section 5.6) answers a server challenge
//! with a password or one-time password. Inside an EAP-FAST tunnel the
//! exchange is wrapped as `CHALLENGE=<text>` / `RESPONSE=<identity>\0<pw>`,
//! and vendor servers may report errors as `E=<code>` to trigger a
//! password change.
//!
//! The method is pure: it takes the decoded request, the session and a
//! [`CredentialStore`], and returns a [`Reply`]. Framing, tunnels and
//! credential persistence belong to the caller.

pub mod credentials;
pub mod method;
pub mod outcome;
pub mod request;
pub mod response;
pub mod session;

pub use credentials::{CredentialStore, MemoryCredentials};
pub use outcome::{Decision, MethodOutcome, MethodState, PeerCommand, Reply};
pub use request::{
    CHALLENGE_PREFIX, ERROR_PREFIX, ErrorCode, GtcRequest, RequestKind, classify,
    parse_error_number,
};
pub use response::{GtcResponse, RESPONSE_PREFIX, TunnelResponse};
pub use session::{GtcCapabilities, GtcSession, MAX_PASSWORD_ATTEMPTS, OuterMethod};

/// IANA EAP method type for GTC.
pub const EAP_TYPE_GTC: u8 = 6;

/// Method name as registered with the EAP engine.
pub const METHOD_NAME: &str = "GTC";
