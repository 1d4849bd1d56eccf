//! Credential store seam.
//!
//! The method never owns credentials; it borrows them from whatever the
//! surrounding engine keeps its network configuration in.

/// Read access to the configured credentials, plus the one mutation the
/// method needs: forgetting a one-time password after it was sent.
///
/// Absence is `None`, never an error.
pub trait CredentialStore {
    /// One-time password, if one is pending.
    fn otp(&self) -> Option<&[u8]>;

    /// Standing password.
    fn password(&self) -> Option<&[u8]>;

    /// Replacement password for a password change.
    fn new_password(&self) -> Option<&[u8]>;

    /// User identity sent inside tunnel-framed responses.
    fn identity(&self) -> Option<&[u8]>;

    /// Forgets the one-time password.
    fn clear_otp(&mut self);
}

/// In-memory credential store.
///
/// `Debug` reports which credentials are present without printing them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MemoryCredentials {
    otp: Option<Vec<u8>>,
    password: Option<Vec<u8>>,
    new_password: Option<Vec<u8>>,
    identity: Option<Vec<u8>>,
}

impl MemoryCredentials {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the standing password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<Vec<u8>>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets a one-time password.
    #[must_use]
    pub fn with_otp(mut self, otp: impl Into<Vec<u8>>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    /// Sets the replacement password.
    #[must_use]
    pub fn with_new_password(mut self, new_password: impl Into<Vec<u8>>) -> Self {
        self.new_password = Some(new_password.into());
        self
    }

    /// Sets the identity.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<Vec<u8>>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Replaces the one-time password, e.g. after the user answered a prompt.
    pub fn set_otp(&mut self, otp: impl Into<Vec<u8>>) {
        self.otp = Some(otp.into());
    }

    /// Replaces the standing password.
    pub fn set_password(&mut self, password: impl Into<Vec<u8>>) {
        self.password = Some(password.into());
    }

    /// Replaces the replacement password.
    pub fn set_new_password(&mut self, new_password: impl Into<Vec<u8>>) {
        self.new_password = Some(new_password.into());
    }

    /// Makes the replacement password the standing one.
    ///
    /// Engines call this once authentication succeeded after the method
    /// asked for the new password to be promoted.
    pub fn promote_new_password(&mut self) {
        if let Some(new_password) = self.new_password.take() {
            self.password = Some(new_password);
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn otp(&self) -> Option<&[u8]> {
        self.otp.as_deref()
    }

    fn password(&self) -> Option<&[u8]> {
        self.password.as_deref()
    }

    fn new_password(&self) -> Option<&[u8]> {
        self.new_password.as_deref()
    }

    fn identity(&self) -> Option<&[u8]> {
        self.identity.as_deref()
    }

    fn clear_otp(&mut self) {
        self.otp = None;
    }
}

impl std::fmt::Debug for MemoryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCredentials")
            .field("otp", &self.otp.is_some())
            .field("password", &self.password.is_some())
            .field("new_password", &self.new_password.is_some())
            .field(
                "identity",
                &self.identity.as_deref().map(|id| id.escape_ascii().to_string()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_nothing() {
        let store = MemoryCredentials::new();
        assert!(store.otp().is_none());
        assert!(store.password().is_none());
        assert!(store.new_password().is_none());
        assert!(store.identity().is_none());
    }

    #[test]
    fn clear_otp_keeps_password() {
        let mut store = MemoryCredentials::new()
            .with_password("secret")
            .with_otp("123456");
        store.clear_otp();
        assert!(store.otp().is_none());
        assert_eq!(store.password(), Some(&b"secret"[..]));
    }

    #[test]
    fn promote_moves_new_password() {
        let mut store = MemoryCredentials::new()
            .with_password("old")
            .with_new_password("new");
        store.promote_new_password();
        assert_eq!(store.password(), Some(&b"new"[..]));
        assert!(store.new_password().is_none());
    }

    #[test]
    fn promote_without_new_password_is_noop() {
        let mut store = MemoryCredentials::new().with_password("old");
        store.promote_new_password();
        assert_eq!(store.password(), Some(&b"old"[..]));
    }

    #[test]
    fn debug_hides_secrets() {
        let store = MemoryCredentials::new()
            .with_password("hunter2")
            .with_identity("alice");
        let debug = format!("{store:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("alice"));
        assert!(debug.contains("password: true"));
    }
}
