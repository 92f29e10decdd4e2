use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{BoletimError, Result};

/// The textual contents of one sheet, rows in workbook order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Reads every sheet of the workbook into plain text cells, in the order
/// the sheets appear in the file.
///
/// Cell values keep their textual form: strings verbatim, numbers through
/// float display, booleans as `true`/`false`, empty cells as `""`. The
/// aggregation layer never re-interprets them until mean time.
pub fn read_sheets(path: &Path) -> Result<Vec<SheetData>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .ok_or_else(|| BoletimError::InvalidWorkbook(format!("missing sheet '{name}'")))?
            .map_err(BoletimError::from)?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        tracing::debug!(sheet = %name, "sheet read");
        sheets.push(SheetData { name, rows });
    }

    Ok(sheets)
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
