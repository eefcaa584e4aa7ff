//! CSV Export functionality
//!
//! Writes report tables and the chart of accounts in a spreadsheet-friendly
//! form. Quoting is left to the `csv` writer.

use std::io::Write;

use crate::error::BookResult;
use crate::reports::ReportTable;
use crate::services::AccountService;
use crate::storage::Storage;

/// Write any report table: a header row of column names, then the rows
pub fn write_table_csv<W: Write>(table: &ReportTable, writer: W) -> BookResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Export the chart of accounts to CSV
pub fn export_accounts_csv<W: Write>(storage: &Storage, writer: W) -> BookResult<()> {
    let accounts = AccountService::new(storage).list_accounts(None)?;

    let mut table = ReportTable::new(["id", "name", "level", "parent_id"]);
    for account in accounts {
        table.push_row(vec![
            account.id.to_string(),
            account.name,
            account.level.to_string(),
            account.parent_id.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }

    write_table_csv(&table, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookPaths;
    use tempfile::TempDir;

    #[test]
    fn test_table_csv_quotes_fields() {
        let mut table = ReportTable::new(["account_name", "description"]);
        table.push_row(vec!["Cash".into(), "Rent, March".into()]);
        table.push_row(vec!["Bank".into(), "Said \"hi\"".into()]);

        let mut output = Vec::new();
        write_table_csv(&table, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "account_name,description");
        assert_eq!(lines[1], "Cash,\"Rent, March\"");
        assert_eq!(lines[2], "Bank,\"Said \"\"hi\"\"\"");
    }

    #[test]
    fn test_accounts_csv() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let service = AccountService::new(&storage);
        let assets = service.add_account("Assets", 1, None).unwrap();
        service.add_account("Current Assets", 2, Some(assets.id)).unwrap();

        let mut output = Vec::new();
        export_accounts_csv(&storage, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("id,name,level,parent_id\n"));
        assert!(text.contains("1,Assets,1,\n"));
        assert!(text.contains("2,Current Assets,2,1\n"));
    }
}
