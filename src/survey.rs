use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_analysis::*;

use std::fs;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::read_config;
use crate::survey::io_excel::read_worksheet;
use crate::survey::report::{
    console_block, question_summary, ReportDocument, RunSummary, SurveyIdentity,
};

pub mod config_reader;
pub mod io_excel;
pub mod report;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error on line {lineno}: {message}"))]
    ConfigLine { lineno: usize, message: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display(""))]
    EmptyWorksheet {},
    #[snafu(display("Unsupported cell content at row {row}, column {col}: {content}"))]
    UnsupportedCell { row: u32, col: u32, content: String },
    #[snafu(display("No column {column} in the worksheet for question {number}"))]
    MissingColumn { column: usize, number: u32 },
    #[snafu(display("{source}"))]
    Analysis { source: AnalysisError },
    #[snafu(display("Error writing report {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing summary {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Runs a whole analysis: configuration, workbook, one block per question on
/// the console, the Markdown report, and optionally the JSON summary with its
/// reference check.
///
/// Questions are processed in configuration order. A question that fails to
/// build (a non-integer response to a numeric question, for instance) fails
/// the run; the remaining questions are not processed.
pub fn run_survey(args: &Args) -> SurveyResult<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| "config.txt".to_string());
    let mut config = read_config(&config_path)?;
    if let Some(input) = &args.input {
        config.workbook = input.clone();
    }
    if let Some(name) = &args.excel_worksheet_name {
        config.worksheet = name.clone();
    }
    info!("config: {:?}", config);

    let columns = read_worksheet(&config.workbook, &config.worksheet)?;
    debug!("workbook {}: {} columns", config.workbook, columns.len());

    let excluded: Vec<&str> = config.excluded.iter().map(|s| s.as_str()).collect();
    let settings = SummarySettings::new(config.summary_length).with_excluded(&excluded);

    println!("Analysis of {} (from {})", config.worksheet, config.workbook);
    let mut document = ReportDocument::new(&config.worksheet, &config.workbook);
    let mut summaries = Vec::new();
    for (idx, (number, kind)) in config.questions.iter().enumerate() {
        // The i-th declared question reads the i-th worksheet column.
        let column = columns.get(idx).context(MissingColumnSnafu {
            column: idx + 1,
            number: *number,
        })?;
        let question = Question::build(*kind, *number, &column.statement, &column.responses)
            .context(AnalysisSnafu)?;
        println!("{}", console_block(&question, &settings).context(AnalysisSnafu)?);
        document
            .add_question(&question, &settings)
            .context(AnalysisSnafu)?;
        summaries.push(question_summary(&question, &settings).context(AnalysisSnafu)?);
    }

    fs::write(&config.report, document.render()).context(WritingReportSnafu {
        path: config.report.clone(),
    })?;
    info!("Report written to {}", config.report);

    let summary = RunSummary {
        survey: SurveyIdentity {
            workbook: config.workbook.clone(),
            worksheet: config.worksheet.clone(),
        },
        questions: summaries,
    };
    // Going through Value first so that both sides of the reference
    // comparison use the same key ordering.
    let summary_js = serde_json::to_value(&summary).context(ParsingJsonSnafu {})?;
    let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    match args.out.as_deref() {
        Some("stdout") => println!("{}", pretty_js),
        Some(path) => fs::write(path, &pretty_js).context(WritingSummarySnafu {
            path: path.to_string(),
        })?,
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let contents = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
            path: reference_path.clone(),
        })?;
        let reference: JSValue =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        let pretty_ref = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_ref != pretty_js {
            warn!("Found differences with the reference string");
            print_diff(pretty_ref.as_str(), pretty_js.as_str(), "\n");
            whatever!("Difference detected between computed summary and reference summary");
        }
    }

    Ok(())
}
