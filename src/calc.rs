use crate::model::UnitScores;

/// Number of grading units in an academic term. Final means always divide by
/// this constant, never by the number of scores actually present.
pub const UNIT_COUNT: usize = 4;

/// Maps a free-text unit label ("1ª Unidade", "3º Bimestre", ...) to its
/// ordinal slot 1–4. The label must start, after trimming, with the slot
/// digit; anything else is rejected so that an ambiguous label can never
/// land in two slots.
pub fn unit_slot(label: &str) -> Option<usize> {
    match label.trim().chars().next()? {
        '1' => Some(1),
        '2' => Some(2),
        '3' => Some(3),
        '4' => Some(4),
        _ => None,
    }
}

/// Arithmetic mean of a discipline's unit scores, over the fixed four units.
///
/// Only called once exactly [`UNIT_COUNT`] unit entries exist; validating the
/// count is the caller's job. A score that does not parse as a number counts
/// as zero. That is a deliberate permissive policy carried over from the
/// legacy sheets, so it is logged as a warning rather than surfaced as an
/// error.
pub fn final_mean(units: &UnitScores) -> f64 {
    let sum: f64 = units
        .iter()
        .map(|(unit, score)| parse_score(unit, score))
        .sum();
    sum / UNIT_COUNT as f64
}

fn parse_score(unit: &str, raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(unit, score = raw, "score is not numeric, counting as zero");
            0.0
        }
    }
}
