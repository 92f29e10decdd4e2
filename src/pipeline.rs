use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::format;
use crate::ingest;
use crate::io::excel_read;
use crate::model::{GradeAggregate, Roster};
use crate::render::{self, ReportPage};

/// Inputs for one report-generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub school_name: String,
    pub logo: Option<PathBuf>,
}

/// Outcome of a run. `failed` counts reports whose PDF could not be
/// written; the corresponding students were skipped, not the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub failed: usize,
}

/// Runs the whole pipeline: read every sheet, fold them into one aggregate,
/// then emit one PDF per (student, class) pair actually present in the data.
///
/// Reading or ingesting failures abort the run, since the aggregate cannot
/// be trusted on partial input. A failure to write one report only skips
/// that report; the run continues and the summary carries the count.
pub fn generate_reports(options: &GenerateOptions) -> Result<RunSummary> {
    let sheets = excel_read::read_sheets(&options.input)?;

    let mut aggregate = GradeAggregate::new();
    let mut roster = Roster::new();
    for sheet in &sheets {
        ingest::ingest_sheet(sheet, &mut aggregate, &mut roster)?;
    }

    tracing::info!(
        sheets = sheets.len(),
        students = roster.len(),
        "aggregation complete"
    );

    fs::create_dir_all(&options.output_dir)?;

    let mut summary = RunSummary::default();
    let mut emitted: HashSet<PathBuf> = HashSet::new();
    for student in roster.iter() {
        for (class, students) in aggregate.classes() {
            if !students.contains_key(student) {
                continue;
            }

            let rows = format::format_rows(student, students)?;
            let path = options.output_dir.join(report_file_name(student, class));
            if !emitted.insert(path.clone()) {
                tracing::warn!(
                    student,
                    %class,
                    path = %path.display(),
                    "sanitized output path repeats within this run, previous report is overwritten"
                );
            }
            let page = ReportPage {
                school_name: options.school_name.clone(),
                class: class.clone(),
                student: student.to_string(),
                logo: options.logo.clone(),
            };

            match render::render_to_file(&path, &page, &rows) {
                Ok(()) => {
                    summary.written += 1;
                    tracing::info!(student, %class, path = %path.display(), "report written");
                }
                Err(error) => {
                    summary.failed += 1;
                    tracing::error!(student, %class, %error, "report could not be written");
                }
            }
        }
    }

    if summary.failed > 0 {
        tracing::warn!(
            written = summary.written,
            failed = summary.failed,
            "run finished with failures"
        );
    }

    Ok(summary)
}

/// Output files are keyed by (student, class). Characters that would change
/// the path shape are flattened to underscores; distinct pairs that collide
/// after flattening are warned about by the caller and the later report
/// overwrites the earlier one.
fn report_file_name(student: &str, class: &str) -> String {
    let sanitize = |raw: &str| -> String {
        raw.chars()
            .map(|ch| {
                if ch == '/' || ch == '\\' || ch.is_control() {
                    '_'
                } else {
                    ch
                }
            })
            .collect()
    };
    format!("{}-{}.pdf", sanitize(student), sanitize(class))
}

#[cfg(test)]
mod tests {
    use super::report_file_name;

    #[test]
    fn file_name_keeps_plain_names() {
        assert_eq!(report_file_name("Ana", "3A"), "Ana-3A.pdf");
    }

    #[test]
    fn file_name_flattens_path_separators() {
        assert_eq!(report_file_name("A/na", "3\\A"), "A_na-3_A.pdf");
    }
}
