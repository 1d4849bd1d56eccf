//! Outbound GTC responses.

/// Prefix of a tunnel-framed response.
pub const RESPONSE_PREFIX: &[u8] = b"RESPONSE=";

/// A response payload ready for the framing layer.
///
/// The framing layer adds the EAP header using [`identifier`](Self::identifier).
#[derive(Clone, PartialEq, Eq)]
pub struct GtcResponse {
    identifier: u8,
    payload: Vec<u8>,
}

impl GtcResponse {
    /// Empty response, sent to acknowledge a request the tunnel can then
    /// fail cleanly.
    #[must_use]
    pub const fn empty(identifier: u8) -> Self {
        Self {
            identifier,
            payload: Vec::new(),
        }
    }

    /// Response carrying the raw credential.
    #[must_use]
    pub fn plain(identifier: u8, credential: &[u8]) -> Self {
        Self {
            identifier,
            payload: credential.to_vec(),
        }
    }

    /// `RESPONSE=<identity>\0<credential>` response.
    #[must_use]
    pub fn tunneled(identifier: u8, identity: &[u8], credential: &[u8]) -> Self {
        Self {
            identifier,
            payload: TunnelResponse {
                identity,
                credential,
            }
            .encode(),
        }
    }

    /// EAP identifier echoed from the request.
    #[must_use]
    pub const fn identifier(&self) -> u8 {
        self.identifier
    }

    /// Response type-data.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether this is an empty acknowledgement.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Takes the payload buffer.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

// Payloads carry credentials; never print them.
impl std::fmt::Debug for GtcResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GtcResponse")
            .field("identifier", &self.identifier)
            .field("len", &self.payload.len())
            .finish_non_exhaustive()
    }
}

/// The parts of a tunnel-framed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelResponse<'a> {
    /// User identity.
    pub identity: &'a [u8],
    /// Password or one-time password.
    pub credential: &'a [u8],
}

impl<'a> TunnelResponse<'a> {
    /// Serializes to `RESPONSE=` + identity + NUL + credential.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            RESPONSE_PREFIX.len() + self.identity.len() + 1 + self.credential.len(),
        );
        out.extend_from_slice(RESPONSE_PREFIX);
        out.extend_from_slice(self.identity);
        out.push(0);
        out.extend_from_slice(self.credential);
        out
    }

    /// Splits a tunnel-framed payload at the first NUL after the prefix.
    ///
    /// Returns `None` when the prefix or the separator is missing.
    #[must_use]
    pub fn parse(payload: &'a [u8]) -> Option<Self> {
        let body = payload.strip_prefix(RESPONSE_PREFIX)?;
        let nul = body.iter().position(|&b| b == 0)?;
        Some(Self {
            identity: &body[..nul],
            credential: &body[nul + 1..],
        })
    }
}
