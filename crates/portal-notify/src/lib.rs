//! Role-scoped notification mailboxes for the Hemolink portal client.
//!
//! One `NotificationCenter` instance serves one role's mailbox; all four
//! roles get identical read, sort, and pagination semantics from the same
//! component. The original portal shipped four copy-pasted notification
//! dialogs; this is their single generalized replacement.

mod center;
mod error;
mod navigator;

pub use center::{NotificationCenter, TokenProvider, PAGE_SIZE};
pub use error::NotifyError;
pub use navigator::Navigator;
