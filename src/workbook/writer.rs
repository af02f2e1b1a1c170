use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};

use super::{CATEGORIES_SHEET, CATEGORY_COLUMN, ID_COLUMN, NOTES_COLUMN, VALUES_COLUMN};
use crate::error::WorkbookResult;
use crate::store::{
    MappingStore,
    domain::{Domain, MappingFlag},
};

pub const TEMPLATE_FILE_NAME: &str = "appointment_import_template.xlsx";
pub const CONFIG_FILE_SUFFIX: &str = "_mapping_config.xlsx";

/// A rendered configuration workbook ready to hand to the client.
#[derive(Debug, Clone)]
pub struct ConfigurationExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub total_mappings: usize,
}

/// `Acme Clinic` -> `Acme_Clinic_mapping_config.xlsx`
pub fn export_file_name(practice_name: &str) -> String {
    let stem: String = practice_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}{CONFIG_FILE_SUFFIX}")
}

fn header_format() -> Format {
    Format::new().set_bold().set_border(FormatBorder::Thin)
}

/// Empty import workbook: headers only, in the layout [`read_workbook`]
/// expects.
///
/// [`read_workbook`]: super::read_workbook
pub fn write_template() -> WorkbookResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = header_format();

    for domain in Domain::ALL {
        let sheet = workbook.add_worksheet().set_name(domain.sheet_name())?;
        write_header(sheet, &[ID_COLUMN, domain.primary_column()], &header)?;
    }
    let sheet = workbook.add_worksheet().set_name(CATEGORIES_SHEET)?;
    write_header(sheet, &[CATEGORY_COLUMN, VALUES_COLUMN], &header)?;

    Ok(workbook.save_to_buffer()?)
}

/// Renders every mapping, one row each, with a column per category.
///
/// Fails before building anything when the practice name is blank.
pub fn write_configuration(store: &MappingStore) -> WorkbookResult<ConfigurationExport> {
    let file_name = export_file_name(store.require_practice_name()?);

    let mut workbook = Workbook::new();
    let header = header_format();
    let categories = store.categories();

    for domain in Domain::ALL {
        let sheet = workbook.add_worksheet().set_name(domain.sheet_name())?;

        let mut columns: Vec<&str> = vec![ID_COLUMN, domain.primary_column()];
        columns.extend(categories.iter().map(|c| c.name.as_str()));
        if domain.supports_flags() {
            columns.extend(MappingFlag::ALL.map(MappingFlag::column));
        }
        columns.push(NOTES_COLUMN);
        write_header(sheet, &columns, &header)?;

        let state = store.domain(domain);
        for (idx, mapping) in state.mappings.iter().enumerate() {
            let id = state
                .item(&mapping.item)
                .and_then(|i| i.id.as_deref())
                .unwrap_or_default();

            let mut row: Vec<&str> = vec![id, mapping.item.as_str()];
            row.extend(
                categories
                    .iter()
                    .map(|c| mapping.category(&c.name).unwrap_or_default()),
            );
            if domain.supports_flags() {
                let flags = mapping.flags.unwrap_or_default();
                row.extend(MappingFlag::ALL.map(|f| yes_no(flags.get(f))));
            }
            row.push(mapping.notes.as_str());
            write_row(sheet, idx as u32 + 1, &row)?;
        }
    }

    let sheet = workbook.add_worksheet().set_name(CATEGORIES_SHEET)?;
    write_header(sheet, &[CATEGORY_COLUMN, VALUES_COLUMN], &header)?;
    for (idx, category) in categories.iter().enumerate() {
        let values = category.values_csv();
        write_row(sheet, idx as u32 + 1, &[category.name.as_str(), values.as_str()])?;
    }

    let bytes = workbook.save_to_buffer()?;
    let total_mappings = store.total_mappings();
    tracing::info!(file = %file_name, total_mappings, "configuration exported");

    Ok(ConfigurationExport {
        file_name,
        bytes,
        total_mappings,
    })
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], format: &Format) -> WorkbookResult<()> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, format)?;
    }
    Ok(())
}

/// Blank values are left as empty cells.
fn write_row(sheet: &mut Worksheet, row: u32, values: &[&str]) -> WorkbookResult<()> {
    for (col, value) in values.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        sheet.write_string(row, col as u16, *value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, WorkbookError};
    use crate::store::mapping::Item;
    use crate::workbook::read_workbook;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sheet_rows(bytes: &[u8], sheet: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|d| match d {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => format!("{other:?}"),
                    })
                    .collect()
            })
            .collect()
    }

    fn populated_store() -> MappingStore {
        let mut store = MappingStore::new();
        store.import_available(
            Domain::AppointmentType,
            vec![Item::with_id("Checkup", "T1"), Item::new("Follow-up")],
        );
        store.import_available(Domain::Doctor, vec![Item::with_id("Dr. Smith", "D9")]);
        store.add_category("Priority", "High,Medium,Low").unwrap();
        store.add_category("Visit", "In person,Virtual").unwrap();

        let d = Domain::AppointmentType;
        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        store.set_flag(d, "Checkup", MappingFlag::BookingRule, true).unwrap();
        store.set_notes(d, "Follow-up", "after surgery").unwrap();
        store
            .set_category_value(Domain::Doctor, "Dr. Smith", "Visit", "Virtual")
            .unwrap();
        store
    }

    #[test]
    fn test_export_file_name_sanitizes() {
        assert_eq!(export_file_name("Acme Clinic"), "Acme_Clinic_mapping_config.xlsx");
        assert_eq!(
            export_file_name(" St. Mary's / East "),
            "St__Mary_s___East_mapping_config.xlsx"
        );
    }

    #[test]
    fn test_configuration_requires_practice_name() {
        let store = populated_store();
        let err = write_configuration(&store).unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::Store(StoreError::PracticeNameRequired)
        ));
    }

    #[test]
    fn test_configuration_layout() {
        let mut store = populated_store();
        store.set_practice_name("Acme Clinic");

        let export = write_configuration(&store).unwrap();
        assert_eq!(export.file_name, "Acme_Clinic_mapping_config.xlsx");
        assert_eq!(export.total_mappings, 3);

        let types = sheet_rows(&export.bytes, "Appointment Type");
        assert_eq!(
            types[0],
            ["id", "type", "Priority", "Visit", "Cancel/No-Show Rules", "Booking Rule", "notes"]
        );
        assert_eq!(types[1], ["T1", "Checkup", "High", "", "No", "Yes", ""]);
        assert_eq!(types[2], ["", "Follow-up", "", "", "No", "No", "after surgery"]);

        let doctors = sheet_rows(&export.bytes, "Doctor");
        assert_eq!(doctors[0], ["id", "doctor", "Priority", "Visit", "notes"]);
        assert_eq!(doctors[1][..4], ["D9", "Dr. Smith", "", "Virtual"]);

        let categories = sheet_rows(&export.bytes, "Categories");
        assert_eq!(categories[1], ["Priority", "High, Medium, Low"]);
        assert_eq!(categories[2], ["Visit", "In person, Virtual"]);
    }

    #[test]
    fn test_configuration_reimports_as_available_items() {
        let mut store = populated_store();
        store.set_practice_name("Acme Clinic");
        let export = write_configuration(&store).unwrap();

        let imported = read_workbook(&export.bytes).unwrap();
        assert_eq!(
            imported.items(Domain::AppointmentType),
            [Item::with_id("Checkup", "T1"), Item::new("Follow-up")]
        );
        assert_eq!(imported.categories, store.categories());
    }

    #[test]
    fn test_orphaned_mapping_exports_without_id() {
        let mut store = populated_store();
        store.import_available(Domain::AppointmentType, vec![Item::new("Follow-up")]);
        store.set_practice_name("Acme Clinic");

        let export = write_configuration(&store).unwrap();
        assert_eq!(export.total_mappings, 3);

        let types = sheet_rows(&export.bytes, "Appointment Type");
        assert!(types.contains(&vec![
            "".to_string(),
            "Checkup".into(),
            "High".into(),
            "".into(),
            "No".into(),
            "Yes".into(),
            "".into(),
        ]));
    }

    #[test]
    fn test_template_has_headers_only() {
        let bytes = write_template().unwrap();
        let types = sheet_rows(&bytes, "Appointment Type");
        assert_eq!(types, [["id", "type"]]);
        let categories = sheet_rows(&bytes, "Categories");
        assert_eq!(categories, [["Category", "Values"]]);
    }
}
