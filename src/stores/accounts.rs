use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::StoreConfig;
use crate::debounce::Debouncer;
use crate::dto::{AccountId, AccountRecord};
use crate::stores::{AccountStorage, IdGenerator};
use crate::Error;

type SharedAccounts = Arc<RwLock<Vec<AccountRecord>>>;

/// Ordered list of accounts, mirrored to storage after every change.
///
/// Every change schedules a write through a [`Debouncer`]. The list is only
/// serialized when the write runs, so a burst of edits costs one
/// serialization and one write of the final state.
pub struct AccountStore {
    accounts: SharedAccounts,
    ids: IdGenerator,
    persist: Debouncer<()>,
}

impl AccountStore {
    /// Loads the list from `storage` and prepares the coalesced writer.
    ///
    /// Missing data starts an empty list. Malformed data is logged and also
    /// starts an empty list; it is left in place until the next change
    /// overwrites it.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read, or if called outside a tokio runtime.
    pub fn initialize<S>(storage: S, config: &StoreConfig) -> Result<Self, Error>
    where
        S: AccountStorage + 'static,
    {
        let accounts = match storage.load()? {
            Some(data) => parse_accounts(&data),
            None => Vec::new(),
        };
        tracing::debug!(count = accounts.len(), "loaded accounts");

        let ids = IdGenerator::seeded(accounts.iter().map(|account| &account.id));
        let accounts: SharedAccounts = Arc::new(RwLock::new(accounts));

        let snapshot = Arc::clone(&accounts);
        let persist = Debouncer::new(config.debounce, move |()| {
            persist_accounts(&storage, &snapshot)
        })?;
        tracing::debug!(delay_ms = persist.delay().as_millis() as u64, "write coalescing ready");

        Ok(Self {
            accounts,
            ids,
            persist,
        })
    }

    /// A copy of the current list.
    pub fn accounts(&self) -> Vec<AccountRecord> {
        self.read().clone()
    }

    /// Runs `f` on the current list without copying it.
    pub fn with_accounts<R>(&self, f: impl FnOnce(&[AccountRecord]) -> R) -> R {
        f(&self.read())
    }

    pub fn get(&self, id: AccountId) -> Option<AccountRecord> {
        self.read().iter().find(|account| account.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Appends a blank local account and returns its id.
    pub fn add_account(&mut self) -> AccountId {
        let id = self.ids.next_id();
        self.write().push(AccountRecord::blank(id));
        tracing::debug!(id, "added account");
        self.on_mutation();
        id
    }

    /// Replaces the account with the same id, keeping its position.
    /// Returns false, changing nothing, if no such account exists.
    pub fn update_account(&mut self, record: AccountRecord) -> bool {
        {
            let mut accounts = self.write();
            let Some(index) = accounts.iter().position(|account| account.id == record.id) else {
                return false;
            };
            tracing::debug!(id = record.id, "updated account");
            accounts[index] = record;
        }
        self.on_mutation();
        true
    }

    /// Removes every account with the given id. Returns false if none matched.
    pub fn delete_account(&mut self, id: AccountId) -> bool {
        {
            let mut accounts = self.write();
            let before = accounts.len();
            accounts.retain(|account| account.id != id);
            if accounts.len() == before {
                return false;
            }
        }
        tracing::debug!(id, "deleted account");
        self.on_mutation();
        true
    }

    /// Whether a write is scheduled but has not happened yet.
    pub fn has_pending_write(&self) -> bool {
        self.persist.is_pending()
    }

    /// Waits until the scheduled write, if any, has been carried out.
    pub async fn settle(&mut self) {
        self.persist.settle().await;
    }

    fn on_mutation(&mut self) {
        self.persist.call(());
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AccountRecord>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AccountRecord>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializes the list as it is now and saves it. Failures are logged, not returned.
fn persist_accounts(storage: &dyn AccountStorage, accounts: &RwLock<Vec<AccountRecord>>) {
    let data = {
        let accounts = accounts.read().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_string(&*accounts)
    };
    let data = match data {
        Ok(data) => data,
        Err(err) => {
            tracing::error!(%err, "failed to serialize accounts");
            return;
        }
    };
    match storage.save(&data) {
        Ok(()) => tracing::debug!(bytes = data.len(), "persisted accounts"),
        Err(err) => tracing::error!(%err, "failed to persist accounts"),
    }
}

fn parse_accounts(data: &str) -> Vec<AccountRecord> {
    serde_json::from_str(data).unwrap_or_else(|err| {
        tracing::warn!(%err, "stored accounts are malformed, starting with an empty list");
        Vec::new()
    })
}
