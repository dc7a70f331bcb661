//! Wire entity models.
//!
//! Passive data records decoded from server JSON. Documents carry a
//! non-owning back-reference to the [`ApiClient`](crate::client::ApiClient)
//! that produced them, attached after decoding, so navigation calls need
//! no extra wiring from the caller.

pub mod directory;
pub mod document;
pub mod user;

pub use directory::{DirectoryEntry, DirectorySet};
pub use document::{Document, RecordSet};
pub use user::{CurrentUser, User};
