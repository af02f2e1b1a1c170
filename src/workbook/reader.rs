use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xlsx};

use super::{CATEGORIES_SHEET, CATEGORY_COLUMN, ID_COLUMN, VALUES_COLUMN};
use crate::error::{WorkbookError, WorkbookResult};
use crate::store::{category::Category, domain::Domain, mapping::Item};

/// Parsed contents of an import workbook, not yet applied to a store.
#[derive(Debug, Clone, Default)]
pub struct ImportedWorkbook {
    pub domains: Vec<(Domain, Vec<Item>)>,
    pub categories: Vec<Category>,
}

#[cfg(test)]
impl ImportedWorkbook {
    pub fn items(&self, domain: Domain) -> &[Item] {
        self.domains
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, items)| items.as_slice())
            .unwrap_or_default()
    }
}

/// Parses an xlsx buffer. Every domain sheet and the Categories sheet must be
/// present; rows without a value in the primary column are dropped.
pub fn read_workbook(bytes: &[u8]) -> WorkbookResult<ImportedWorkbook> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| WorkbookError::Unreadable(e.to_string()))?;

    let mut imported = ImportedWorkbook::default();
    for domain in Domain::ALL {
        let range = sheet_range(&mut workbook, domain.sheet_name())?;
        let items = read_items(&range, domain.primary_column());
        tracing::debug!(%domain, rows = items.len(), "read domain sheet");
        imported.domains.push((domain, items));
    }

    let range = sheet_range(&mut workbook, CATEGORIES_SHEET)?;
    imported.categories = read_categories(&range);

    Ok(imported)
}

fn sheet_range<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    name: &str,
) -> WorkbookResult<Range<Data>> {
    if !workbook.sheet_names().iter().any(|s| s == name) {
        return Err(WorkbookError::MissingSheet(name.to_string()));
    }
    workbook
        .worksheet_range(name)
        .map_err(|e| WorkbookError::Unreadable(format!("sheet '{name}': {e}")))
}

fn read_items(range: &Range<Data>, primary: &str) -> Vec<Item> {
    let headers = header_indices(range);
    let Some(&name_col) = headers.get(primary) else {
        tracing::warn!(column = primary, "sheet has no primary column, no items read");
        return Vec::new();
    };
    let id_col = headers.get(ID_COLUMN).copied();

    range
        .rows()
        .skip(1)
        .filter_map(|row| {
            let name = cell(row, name_col);
            if name.is_empty() {
                return None;
            }
            let id = id_col.map(|c| cell(row, c)).filter(|id| !id.is_empty());
            Some(Item { name, id })
        })
        .collect()
}

fn read_categories(range: &Range<Data>) -> Vec<Category> {
    let headers = header_indices(range);
    let (Some(&name_col), Some(&values_col)) =
        (headers.get(CATEGORY_COLUMN), headers.get(VALUES_COLUMN))
    else {
        return Vec::new();
    };

    range
        .rows()
        .skip(1)
        .map(|row| Category::from_csv(&cell(row, name_col), &cell(row, values_col)))
        .filter(|c| !c.name.is_empty() && !c.values.is_empty())
        .collect()
}

/// Column index by header text, taken from the first row. The first of any
/// repeated header wins.
fn header_indices(range: &Range<Data>) -> HashMap<String, usize> {
    let mut headers = HashMap::new();
    if let Some(row) = range.rows().next() {
        for (idx, data) in row.iter().enumerate() {
            let text = data_to_string(data);
            if !text.is_empty() {
                headers.entry(text).or_insert(idx);
            }
        }
    }
    headers
}

fn cell(row: &[Data], idx: usize) -> String {
    row.get(idx).map(data_to_string).unwrap_or_default()
}

fn data_to_string(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => number_to_string(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        // date-formatted cells keep their serial value
        Data::DateTime(dt) => number_to_string(dt.as_f64()),
        Data::DateTimeIso(dt) => dt.to_string(),
        Data::DurationIso(d) => d.to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Whole numbers come back as floats; ids should not grow a ".0".
fn number_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
