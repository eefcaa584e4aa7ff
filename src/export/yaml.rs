//! YAML Export functionality
//!
//! The full book in a human-readable form.

use std::io::Write;

use crate::error::{BookError, BookResult};
use crate::export::json::BookExport;
use crate::storage::Storage;

fn export_error(e: impl std::fmt::Display) -> BookError {
    BookError::Export(e.to_string())
}

/// Export the full book to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> BookResult<()> {
    let export = BookExport::from_storage(storage)?;

    writeln!(writer, "# ledgerbook export").map_err(export_error)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_error)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(writer, &export).map_err(export_error)?;

    Ok(())
}

/// Parse a YAML export and check it like [`super::json::parse_json_export`]
pub fn parse_yaml_export(yaml_str: &str) -> BookResult<BookExport> {
    let export: BookExport = serde_yaml::from_str(yaml_str).map_err(export_error)?;

    export.validate().map_err(BookError::Export)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookPaths;
    use crate::services::AccountService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export_parses_back() {
        let (_temp_dir, storage) = create_test_storage();
        let accounts = AccountService::new(&storage);
        let assets = accounts.add_account("Assets", 1, None).unwrap();
        accounts.add_account("Fixed Assets", 2, Some(assets.id)).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# ledgerbook export"));
        assert!(text.contains("Fixed Assets"));

        let imported = parse_yaml_export(&text).unwrap();
        assert_eq!(imported.accounts.len(), 2);
        assert_eq!(imported.accounts[1].parent_id, Some(assets.id));
        assert!(imported.vouchers.is_empty());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse_yaml_export("accounts: [1, 2"),
            Err(BookError::Export(_))
        ));
    }
}
