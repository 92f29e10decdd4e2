use crate::calc::{self, UNIT_COUNT};
use crate::error::{BoletimError, Result};
use crate::model::StudentScores;

/// Cell text used for a unit without a recorded score and for a final mean
/// that cannot be computed.
pub const PLACEHOLDER: &str = "-";

/// One rendered table row: a discipline with its four per-unit scores and
/// final mean, placeholders where data is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineRow {
    pub discipline: String,
    pub units: [String; UNIT_COUNT],
    pub final_mean: String,
}

impl DisciplineRow {
    /// Flattens the row into the six table cells, discipline first.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(UNIT_COUNT + 2);
        cells.push(self.discipline.clone());
        cells.extend(self.units.iter().cloned());
        cells.push(self.final_mean.clone());
        cells
    }
}

/// Builds one table row per discipline recorded for the student in this
/// class, disciplines in alphabetical order.
///
/// Each score lands in the column of its unit's ordinal slot. The final mean
/// is filled only when exactly four unit entries exist for the discipline,
/// formatted to two decimal places; otherwise the placeholder stays. A
/// student unknown to the class yields no rows.
pub fn format_rows(student: &str, class_scores: &StudentScores) -> Result<Vec<DisciplineRow>> {
    let Some(disciplines) = class_scores.get(student) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::with_capacity(disciplines.len());
    for (discipline, units) in disciplines {
        let mut row = DisciplineRow {
            discipline: discipline.clone(),
            units: std::array::from_fn(|_| PLACEHOLDER.to_string()),
            final_mean: PLACEHOLDER.to_string(),
        };

        for (unit, score) in units {
            let slot = calc::unit_slot(unit).ok_or_else(|| BoletimError::InvalidUnitLabel {
                label: unit.clone(),
            })?;
            row.units[slot - 1] = score.clone();
        }

        if units.len() == UNIT_COUNT {
            row.final_mean = format!("{:.2}", calc::final_mean(units));
        }

        rows.push(row);
    }

    Ok(rows)
}
