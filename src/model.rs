use std::collections::{BTreeMap, HashSet};

/// Scores for one (student, discipline) pair, keyed by the unit label exactly
/// as it appears in the source sheet. Values keep the original cell text, so
/// empty or non-numeric scores survive untouched.
pub type UnitScores = BTreeMap<String, String>;

/// All disciplines recorded for one student within a class.
pub type DisciplineScores = BTreeMap<String, UnitScores>;

/// All students recorded for one class.
pub type StudentScores = BTreeMap<String, DisciplineScores>;

/// The fully populated class → student → discipline → unit → score structure
/// built from every input sheet.
///
/// All four levels are keyed by exact string equality, no trimming or case
/// folding. BTreeMap keeps iteration deterministic, which in turn fixes the
/// discipline order of the rendered reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeAggregate {
    classes: BTreeMap<String, StudentScores>,
}

impl GradeAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one score, creating every missing level on the way down. A
    /// repeated (class, student, discipline, unit) coordinate is overwritten
    /// silently: the coordinate should never legitimately repeat, and if
    /// malformed input repeats it the last processed row wins.
    pub fn record(
        &mut self,
        class: &str,
        student: &str,
        discipline: &str,
        unit: &str,
        score: String,
    ) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .entry(student.to_string())
            .or_default()
            .entry(discipline.to_string())
            .or_default()
            .insert(unit.to_string(), score);
    }

    /// Iterates classes in key order.
    pub fn classes(&self) -> impl Iterator<Item = (&String, &StudentScores)> {
        self.classes.iter()
    }

    pub fn class(&self, class: &str) -> Option<&StudentScores> {
        self.classes.get(class)
    }

    pub fn score(&self, class: &str, student: &str, discipline: &str, unit: &str) -> Option<&str> {
        self.classes
            .get(class)?
            .get(student)?
            .get(discipline)?
            .get(unit)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Student names in first-encountered order, without duplicates.
///
/// The roster only grows on the true first sight of a name, regardless of
/// which class or sheet triggered it, so a student transferring between
/// classes is still processed exactly once per class they appear in.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, student: &str) {
        if self.seen.insert(student.to_string()) {
            self.order.push(student.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
