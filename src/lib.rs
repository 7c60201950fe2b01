mod config;
mod csv_utils;
mod debounce;
mod dto;
mod error;
mod runner;
mod stores;

pub use config::{StoreConfig, DEFAULT_DEBOUNCE};
pub use debounce::Debouncer;
pub use dto::{
    format_labels, parse_labels, AccountId, AccountRecord, AccountRow, AccountType, FormLabel,
};
pub use error::Error;
pub use runner::{run, AccountEdit, Command};
pub use stores::{
    AccountStorage, AccountStore, FileStorage, IdGenerator, MemoryStorage, ACCOUNTS_KEY,
};
