//! Spreadsheet import/export.
//!
//! One sheet per [`Domain`] plus a `Categories` sheet. Reading is done with
//! calamine and writing with rust_xlsxwriter; both work on in-memory buffers.

pub mod reader;
pub mod writer;

use serde::Serialize;

use crate::store::{
    MappingStore,
    domain::{Domain, MappingFlag},
};

pub use reader::{ImportedWorkbook, read_workbook};
pub use writer::{TEMPLATE_FILE_NAME, write_configuration, write_template};

pub const CATEGORIES_SHEET: &str = "Categories";
pub const CATEGORY_COLUMN: &str = "Category";
pub const VALUES_COLUMN: &str = "Values";
pub const ID_COLUMN: &str = "id";
pub const NOTES_COLUMN: &str = "notes";

/// Whether `name` is already a fixed header on some domain sheet. A category
/// with such a name would repeat that header in the export.
pub fn is_reserved_column(name: &str) -> bool {
    name == ID_COLUMN
        || name == NOTES_COLUMN
        || Domain::ALL.iter().any(|d| d.primary_column() == name)
        || MappingFlag::ALL.iter().any(|f| f.column() == name)
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainImport {
    pub domain: Domain,
    pub available: usize,
    pub orphaned_mappings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub domains: Vec<DomainImport>,
    pub categories: usize,
}

impl ImportedWorkbook {
    /// Replaces every available list and the category catalog. Only called
    /// once the whole file has parsed, so a bad upload never lands halfway.
    pub fn apply_to(self, store: &mut MappingStore) -> ImportSummary {
        let mut domains = Vec::with_capacity(self.domains.len());
        for (domain, items) in self.domains {
            let available = store.import_available(domain, items);
            domains.push(DomainImport {
                domain,
                available,
                orphaned_mappings: store.orphaned_mappings(domain).len(),
            });
        }
        store.replace_categories(self.categories);

        ImportSummary {
            domains,
            categories: store.categories().len(),
        }
    }
}
