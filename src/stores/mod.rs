//! Storage layer for account forms. Provides:
//! - The in-memory account list with coalesced persistence ([`AccountStore`])
//! - Persistence backends behind [`AccountStorage`]
//! - Account id issuing ([`IdGenerator`])
//!
//! All mutations happen on the caller's task; only the write to storage is
//! deferred onto the tokio runtime.

mod accounts;
mod ids;
mod storage;

pub use accounts::AccountStore;
pub use ids::IdGenerator;
pub use storage::{AccountStorage, FileStorage, MemoryStorage, ACCOUNTS_KEY};
