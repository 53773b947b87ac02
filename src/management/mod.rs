mod mailbox;

pub use mailbox::AuthorizationResult;
pub use mailbox::MailboxState;
