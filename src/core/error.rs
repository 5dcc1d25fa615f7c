use std::fmt;

/// Errors surfaced by the core engine.
#[derive(Debug, PartialEq, Eq)]
pub enum FanError {
    /// Mailbox is at capacity; the message was dropped for that subscriber.
    MailboxFull,
    /// Mailbox receiver is gone; the subscriber's writer has already exited.
    MailboxClosed,
}

impl std::error::Error for FanError {}

impl fmt::Display for FanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FanError::MailboxFull => write!(f, "subscriber mailbox is full"),
            FanError::MailboxClosed => write!(f, "subscriber mailbox is closed"),
        }
    }
}
