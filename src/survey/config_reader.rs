//! Parser for the line-oriented configuration file.
//!
//! The layout is fixed by line number:
//!
//! ```text
//!  1  Excel file name: responses.xlsx
//!  2  Sheet name: Form responses 1
//!  3  (blank)
//!  4  Words to leave out: nil, na, none, -
//!  5  Summary length: 5
//!  6  (blank)
//!  7  Report name: analysis.md
//!  8-18  free-form instructions, ignored
//! 19+ <question number>: <type>
//! ```

use log::debug;

use snafu::prelude::*;
use survey_analysis::QuestionKind;

use std::fs;

use crate::survey::{ConfigLineSnafu, OpeningConfigSnafu, SurveyResult};

// The question declarations start after the block of instruction lines.
const FIRST_QUESTION_LINE: usize = 19;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyConfig {
    pub workbook: String,
    pub worksheet: String,
    pub report: String,
    /// Lowercased exclusion words for the summarizer.
    pub excluded: Vec<String>,
    pub summary_length: usize,
    /// Declaration order is analysis order.
    pub questions: Vec<(u32, QuestionKind)>,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    parse_config(contents.as_str())
}

/// The value of a `<label>: <value>` line, by 1-based line number.
fn field<'a>(lines: &[&'a str], lineno: usize, what: &str) -> SurveyResult<&'a str> {
    let line = lines.get(lineno - 1).copied().unwrap_or("");
    match line.split_once(": ") {
        Some((_, value)) if !value.trim().is_empty() => Ok(value.trim()),
        _ => ConfigLineSnafu {
            lineno,
            message: format!("Please enter {}", what),
        }
        .fail(),
    }
}

pub fn parse_config(contents: &str) -> SurveyResult<SurveyConfig> {
    let lines: Vec<&str> = contents.lines().collect();

    let workbook = field(&lines, 1, "the name of a file")?;
    ensure!(
        workbook.ends_with(".xlsx"),
        ConfigLineSnafu {
            lineno: 1usize,
            message: "Incorrect file type. Your filename should end in '.xlsx'",
        }
    );
    let worksheet = field(&lines, 2, "the name of a sheet")?;
    let excluded: Vec<String> = field(&lines, 4, "a list of words to exclude from the summary")?
        .split(", ")
        .map(|w| w.trim().to_lowercase())
        .collect();
    let summary_length = field(&lines, 5, "the number of lines you want in your summary")?
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .context(ConfigLineSnafu {
            lineno: 5usize,
            message: "Please enter the number of lines you want in your summary",
        })?;
    let report = field(&lines, 7, "the name of a file")?;
    ensure!(
        report.ends_with(".md"),
        ConfigLineSnafu {
            lineno: 7usize,
            message: "Incorrect file type. Your filename should end in '.md'",
        }
    );

    let mut questions: Vec<(u32, QuestionKind)> = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(FIRST_QUESTION_LINE - 1) {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (number, tag) = line.split_once(": ").context(ConfigLineSnafu {
            lineno,
            message: "Please enter a question as '<question number>: <question type>'",
        })?;
        let number = number
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .context(ConfigLineSnafu {
                lineno,
                message: "Please enter a positive question number",
            })?;
        ensure!(
            !questions.iter().any(|(n, _)| *n == number),
            ConfigLineSnafu {
                lineno,
                message: format!("Question {} is declared twice", number),
            }
        );
        let kind = QuestionKind::parse(tag.trim().to_lowercase().as_str()).context(
            ConfigLineSnafu {
                lineno,
                message:
                    "Please enter either 'demographic', 'numeric', 'categorical' or 'free-response'",
            },
        )?;
        questions.push((number, kind));
    }
    ensure!(
        !questions.is_empty(),
        ConfigLineSnafu {
            lineno: FIRST_QUESTION_LINE,
            message: "Please enter at least one question",
        }
    );
    debug!("parse_config: {} questions declared", questions.len());

    Ok(SurveyConfig {
        workbook: workbook.to_string(),
        worksheet: worksheet.to_string(),
        report: report.to_string(),
        excluded,
        summary_length,
        questions,
    })
}
