//! CSV output for account listings.

use serde::Serialize;
use std::io::Write;

/// Writes an iterator of records to a CSV writer, header first.
/// Each record must implement Serialize.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{AccountRecord, AccountRow, AccountType, FormLabel};

    #[test]
    fn test_write_account_rows() -> csv::Result<()> {
        let records = vec![
            AccountRecord {
                labels: vec![FormLabel::new("work"), FormLabel::new("vpn")],
                account_type: AccountType::Local,
                login: "alice".to_string(),
                password: Some("s3cret".to_string()),
                id: 1,
            },
            AccountRecord {
                labels: vec![],
                account_type: AccountType::Ldap,
                login: "bob".to_string(),
                password: None,
                id: 2,
            },
        ];

        let mut output = Vec::new();
        write_csv(&mut output, records.iter().map(AccountRow::from))?;

        let expected = "uuid,type,login,has_password,labels
1,local,alice,true,work; vpn
2,ldap,bob,false,
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
        Ok(())
    }

    #[test]
    fn test_write_no_rows() -> csv::Result<()> {
        let mut output = Vec::new();
        write_csv(&mut output, std::iter::empty::<AccountRow>())?;
        assert!(output.is_empty());
        Ok(())
    }
}
