use std::io::Write;

use crate::{
    csv_utils::write_csv,
    dto::{AccountId, AccountRecord, AccountRow, AccountType, FormLabel},
    AccountStorage, AccountStore, Error, StoreConfig,
};

/// A single operation requested from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Add,
    Update { id: AccountId, edit: AccountEdit },
    Delete { id: AccountId },
}

/// Field changes for an existing account. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountEdit {
    pub login: Option<String>,
    /// `Some(None)` clears the password.
    pub password: Option<Option<String>>,
    pub account_type: Option<AccountType>,
    pub labels: Option<Vec<FormLabel>>,
}

impl AccountEdit {
    /// Applies the changes. The type goes last, so switching to LDAP
    /// always leaves the account without a password.
    pub fn apply(self, record: &mut AccountRecord) {
        if let Some(login) = self.login {
            record.login = login;
        }
        if let Some(labels) = self.labels {
            record.labels = labels;
        }
        if let Some(password) = self.password {
            record.password = password;
        }
        if let Some(account_type) = self.account_type {
            record.set_type(account_type);
        }
    }
}

/// Runs one command against the account list held in `storage`.
///
/// Waits for the resulting write to land before returning, so the process can
/// exit right after.
///
/// # Arguments
/// * `storage` - Where the account list is loaded from and saved to
/// * `config` - Store settings (write coalescing delay)
/// * `command` - The operation to perform
/// * `writer` - Where to write command output (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The storage cannot be read
/// * The account to update does not exist
/// * Writing to the output fails
pub async fn run<S, W>(
    storage: S,
    config: &StoreConfig,
    command: Command,
    mut writer: W,
) -> Result<(), Error>
where
    S: AccountStorage + 'static,
    W: Write,
{
    let mut store = AccountStore::initialize(storage, config)?;

    match command {
        Command::List => {
            store.with_accounts(|accounts| {
                write_csv(&mut writer, accounts.iter().map(AccountRow::from))
            })?;
        }
        Command::Add => {
            let id = store.add_account();
            writeln!(writer, "{id}")?;
        }
        Command::Update { id, edit } => {
            let mut record = store.get(id).ok_or(Error::AccountNotFound(id))?;
            edit.apply(&mut record);
            store.update_account(record);
        }
        Command::Delete { id } => {
            if !store.delete_account(id) {
                tracing::info!(id, "no account to delete");
            }
        }
    }

    store.settle().await;
    Ok(())
}
