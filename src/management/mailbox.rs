/// Lifecycle of the authorization mailbox.
///
/// `Idle` only exists before the first successful callback; once a code has
/// been captured the mailbox alternates between `Captured` and `Cleared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxState {
    Idle,
    Captured,
    Cleared,
}

/// Single-slot store for the most recently captured authorization code.
///
/// The callback handler writes into it and the device's control logic reads
/// it back after each poll. Clearing only resets the `received` flag: the code
/// stays readable until a later callback overwrites it.
///
/// Invariant: whenever `received` is true, the stored code is non-empty.
///
/// The mailbox has no interior synchronization. It is owned by the
/// [`CallbackServer`](crate::server::CallbackServer) and mutated only inside
/// `poll()`; hosts that want to consume codes from another task should use
/// [`spawn_relay`](crate::host::spawn_relay) instead of sharing it.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationResult {
    code: Option<String>,
    received: bool,
}

impl AuthorizationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `code` and marks it as received, replacing any previous code.
    ///
    /// Empty codes are refused and leave the mailbox untouched. Returns
    /// whether the code was stored.
    pub fn deliver(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if code.is_empty() {
            return false;
        }

        self.code = Some(code);
        self.received = true;
        true
    }

    /// Last captured code, or an empty string if none was captured yet.
    pub fn authorization_code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    pub fn is_authorization_received(&self) -> bool {
        self.received
    }

    /// Acknowledges the current code without erasing it.
    pub fn clear_authorization_received(&mut self) {
        self.received = false;
    }

    pub fn state(&self) -> MailboxState {
        match (&self.code, self.received) {
            (None, _) => MailboxState::Idle,
            (Some(_), true) => MailboxState::Captured,
            (Some(_), false) => MailboxState::Cleared,
        }
    }
}
