use crate::calc;
use crate::error::{BoletimError, Result};
use crate::io::excel_read::SheetData;
use crate::model::{GradeAggregate, Roster};

/// Row carrying the grading-unit label in its first cell.
const UNIT_ROW: usize = 0;
/// Row carrying the class label in its first cell.
const CLASS_ROW: usize = 1;
/// Row carrying the discipline label in its first cell.
const DISCIPLINE_ROW: usize = 2;
/// Column-header row, no semantic content.
const HEADER_ROW: usize = 3;

/// Column holding the student name in a data row.
const STUDENT_COLUMN: usize = 0;
/// Column holding the unit score in a data row.
const SCORE_COLUMN: usize = 5;

/// Folds one sheet into the shared aggregate and roster.
///
/// The sheet layout is positional: rows 0–2 set the unit, class, and
/// discipline context, row 3 is a header, and every later row is a data row
/// of one student's score for that context. Rows are walked strictly in
/// order since the context rows must precede the data they govern. A sheet
/// with fewer than four rows contributes nothing and is not an error; a row
/// missing a cell its role requires is.
pub fn ingest_sheet(
    sheet: &SheetData,
    aggregate: &mut GradeAggregate,
    roster: &mut Roster,
) -> Result<()> {
    let mut unit = String::new();
    let mut class = String::new();
    let mut discipline = String::new();

    for (index, row) in sheet.rows.iter().enumerate() {
        match index {
            UNIT_ROW => {
                unit = required_cell(sheet, index, STUDENT_COLUMN, row)?.to_string();
                if calc::unit_slot(&unit).is_none() {
                    return Err(BoletimError::InvalidUnitLabel { label: unit });
                }
            }
            CLASS_ROW => {
                class = required_cell(sheet, index, STUDENT_COLUMN, row)?.to_string();
            }
            DISCIPLINE_ROW => {
                discipline = required_cell(sheet, index, STUDENT_COLUMN, row)?.to_string();
            }
            HEADER_ROW => {}
            _ => {
                let student = required_cell(sheet, index, STUDENT_COLUMN, row)?.to_string();
                let score = required_cell(sheet, index, SCORE_COLUMN, row)?.to_string();

                tracing::debug!(
                    sheet = %sheet.name,
                    %class,
                    %student,
                    %discipline,
                    %unit,
                    %score,
                    "recording score"
                );

                roster.observe(&student);
                aggregate.record(&class, &student, &discipline, &unit, score);
            }
        }
    }

    Ok(())
}

fn required_cell<'a>(
    sheet: &SheetData,
    row_index: usize,
    column: usize,
    row: &'a [String],
) -> Result<&'a str> {
    row.get(column)
        .map(String::as_str)
        .ok_or_else(|| BoletimError::ShortRow {
            sheet: sheet.name.clone(),
            row: row_index,
            column,
        })
}
