use std::collections::BTreeMap;

use boletim::BoletimError;
use boletim::calc::{final_mean, unit_slot};
use boletim::format::{PLACEHOLDER, format_rows};
use boletim::model::{StudentScores, UnitScores};

fn units(pairs: &[(&str, &str)]) -> UnitScores {
    pairs
        .iter()
        .map(|(unit, score)| (unit.to_string(), score.to_string()))
        .collect()
}

fn class_with(student: &str, disciplines: &[(&str, UnitScores)]) -> StudentScores {
    let mut scores = StudentScores::new();
    let entry: &mut BTreeMap<String, UnitScores> = scores.entry(student.to_string()).or_default();
    for (discipline, unit_scores) in disciplines {
        entry.insert(discipline.to_string(), unit_scores.clone());
    }
    scores
}

#[test]
fn full_four_units_produce_scores_and_mean() {
    let class = class_with(
        "Ana",
        &[(
            "Matemática",
            units(&[
                ("1ª Unidade", "5.0"),
                ("2ª Unidade", "6.0"),
                ("3ª Unidade", "7.0"),
                ("4ª Unidade", "8.0"),
            ]),
        )],
    );

    let rows = format_rows("Ana", &class).expect("rows formatted");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].cells(),
        vec!["Matemática", "5.0", "6.0", "7.0", "8.0", "6.50"]
    );
}

#[test]
fn partial_units_leave_placeholders_and_no_mean() {
    let class = class_with(
        "Ana",
        &[(
            "História",
            units(&[("1ª Unidade", "9.0"), ("3ª Unidade", "7.5")]),
        )],
    );

    let rows = format_rows("Ana", &class).expect("rows formatted");
    assert_eq!(
        rows[0].cells(),
        vec!["História", "9.0", PLACEHOLDER, "7.5", PLACEHOLDER, PLACEHOLDER]
    );
}

#[test]
fn unparseable_score_counts_as_zero_in_the_mean() {
    let class = class_with(
        "Ana",
        &[(
            "Matemática",
            units(&[
                ("1ª Unidade", "N/A"),
                ("2ª Unidade", "6.0"),
                ("3ª Unidade", "7.0"),
                ("4ª Unidade", "8.0"),
            ]),
        )],
    );

    let rows = format_rows("Ana", &class).expect("rows formatted");
    assert_eq!(rows[0].final_mean, "5.25");
}

#[test]
fn disciplines_are_listed_alphabetically() {
    let class = class_with(
        "Ana",
        &[
            ("Português", units(&[("1ª Unidade", "6.0")])),
            ("História", units(&[("1ª Unidade", "7.0")])),
            ("Matemática", units(&[("1ª Unidade", "8.0")])),
        ],
    );

    let rows = format_rows("Ana", &class).expect("rows formatted");
    let order: Vec<&str> = rows.iter().map(|row| row.discipline.as_str()).collect();
    assert_eq!(order, vec!["História", "Matemática", "Português"]);
}

#[test]
fn unknown_student_has_no_rows() {
    let class = class_with("Ana", &[("Matemática", units(&[("1ª Unidade", "8.0")]))]);

    let rows = format_rows("Bruno", &class).expect("rows formatted");
    assert!(rows.is_empty());
}

#[test]
fn multi_digit_label_maps_to_a_single_slot() {
    // "41" used to double-match units 4 and 1 under substring matching; the
    // strict leading-digit rule pins it to slot 4 only.
    let class = class_with("Ana", &[("Matemática", units(&[("41", "9.0")]))]);

    let rows = format_rows("Ana", &class).expect("rows formatted");
    assert_eq!(
        rows[0].cells(),
        vec!["Matemática", PLACEHOLDER, PLACEHOLDER, PLACEHOLDER, "9.0", PLACEHOLDER]
    );
}

#[test]
fn label_without_a_leading_slot_digit_is_an_error() {
    let class = class_with("Ana", &[("Matemática", units(&[("Recuperação", "9.0")]))]);

    let error = format_rows("Ana", &class).expect_err("label must be rejected");
    assert!(matches!(error, BoletimError::InvalidUnitLabel { .. }));
}

#[test]
fn unit_slot_follows_the_leading_digit() {
    assert_eq!(unit_slot("1ª Unidade"), Some(1));
    assert_eq!(unit_slot("  2ª Unidade"), Some(2));
    assert_eq!(unit_slot("3º Bimestre"), Some(3));
    assert_eq!(unit_slot("4"), Some(4));
    assert_eq!(unit_slot("41"), Some(4));
    assert_eq!(unit_slot("5ª Unidade"), None);
    assert_eq!(unit_slot("Recuperação"), None);
    assert_eq!(unit_slot(""), None);
}

#[test]
fn final_mean_always_divides_by_four() {
    let mean = final_mean(&units(&[
        ("1ª Unidade", "5.0"),
        ("2ª Unidade", "6.0"),
        ("3ª Unidade", "7.0"),
        ("4ª Unidade", "8.0"),
    ]));
    assert!((mean - 6.5).abs() < f64::EPSILON);

    // The caller only invokes this with four entries, but the divisor is the
    // unit count, never the entry count.
    let partial = final_mean(&units(&[("1ª Unidade", "8.0")]));
    assert!((partial - 2.0).abs() < f64::EPSILON);
}
