//! Export module for ledgerbook
//!
//! - CSV: report tables and the chart of accounts (spreadsheet-compatible)
//! - JSON: machine-readable full book export
//! - YAML: human-readable full book export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_accounts_csv, write_table_csv};
pub use json::{
    export_full_json, parse_json_export, BookExport, ExportMetadata, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, parse_yaml_export};
