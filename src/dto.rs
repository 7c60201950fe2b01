use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Account identifier. Stored as a number under the `uuid` key, issued from
/// a millisecond clock (see [`crate::IdGenerator`]).
pub type AccountId = i64;

const LABEL_SEPARATOR: char = ';';
const LABEL_JOINER: &str = "; ";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Local,
    Ldap,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Local => "local",
            AccountType::Ldap => "ldap",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AccountType::Local),
            "ldap" => Ok(AccountType::Ldap),
            _ => Err(Error::InvalidAccountType(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormLabel {
    pub text: String,
}

impl FormLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Parses the `;`-separated text form of a label list.
/// Pieces are trimmed and empty pieces are dropped.
pub fn parse_labels(input: &str) -> Vec<FormLabel> {
    input
        .split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(FormLabel::new)
        .collect()
}

/// Joins labels back into their `;`-separated text form.
pub fn format_labels(labels: &[FormLabel]) -> String {
    labels
        .iter()
        .map(|label| label.text.as_str())
        .collect::<Vec<_>>()
        .join(LABEL_JOINER)
}

/// One managed account, in the shape it is persisted in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    #[serde(rename = "label")]
    pub labels: Vec<FormLabel>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub login: String,
    pub password: Option<String>,
    #[serde(rename = "uuid")]
    pub id: AccountId,
}

impl AccountRecord {
    /// A blank local account: no labels, empty login, no password.
    pub fn blank(id: AccountId) -> Self {
        Self {
            labels: Vec::new(),
            account_type: AccountType::Local,
            login: String::new(),
            password: None,
            id,
        }
    }

    /// Switches the account type. LDAP accounts carry no local password,
    /// so switching to LDAP clears it.
    pub fn set_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
        if account_type == AccountType::Ldap {
            self.password = None;
        }
    }
}

/// Row of the CSV account listing. Passwords are reported only as present or not.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountRow {
    pub uuid: AccountId,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub login: String,
    pub has_password: bool,
    pub labels: String,
}

impl From<&AccountRecord> for AccountRow {
    fn from(record: &AccountRecord) -> Self {
        Self {
            uuid: record.id,
            account_type: record.account_type,
            login: record.login.clone(),
            has_password: record.password.is_some(),
            labels: format_labels(&record.labels),
        }
    }
}
