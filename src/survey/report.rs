//! Rendering of the analysis: one block per question on the console, the
//! same content as a Markdown document, and the machine-readable JSON
//! summary of a whole run.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use survey_analysis::*;

use std::collections::BTreeMap;

fn format_mode(mode: &[ResponseValue]) -> String {
    let values: Vec<String> = mode.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(", "))
}

fn choice_lines(
    frequency: &BTreeMap<ResponseValue, u64>,
    percent: &BTreeMap<ResponseValue, f64>,
) -> Vec<String> {
    frequency
        .iter()
        .map(|(choice, count)| format!("- {} - {} ({:.1}%)", choice, count, percent[choice]))
        .collect()
}

/// The per-question block printed to the console.
pub fn console_block(
    question: &Question,
    settings: &SummarySettings,
) -> Result<String, AnalysisError> {
    let header = question.header();
    let mut lines = vec![
        "\n------------------\n".to_string(),
        format!(
            "Q{}: {} - {}",
            header.number,
            header.statement,
            question.kind().label()
        ),
    ];
    match question.kind() {
        QuestionKind::Demographic => {}
        QuestionKind::FreeResponse => {
            lines.push("Summary of responses:".to_string());
            for sentence in question.summarize(settings)? {
                lines.push(format!("- {}", sentence));
            }
        }
        kind => {
            lines.push(format!(
                "Most popular choice: {}",
                format_mode(&question.mode()?)
            ));
            lines.push("\nChoices:".to_string());
            lines.extend(choice_lines(
                &question.frequency()?,
                &question.frequency_percent()?,
            ));
            lines.push(format!(
                "File name of pie chart: {}",
                question.pie_chart_file_name()
            ));
            if kind == QuestionKind::Numeric {
                // {:?} keeps the trailing .0 on integral means.
                lines.push(format!("\nAverage: {:?}", question.mean()?));
                lines.push(format!("Median: {}", question.median()?));
            }
        }
    }
    Ok(lines.join("\n"))
}

/// The Markdown report, mirroring the console blocks with headings, bold
/// labels and bullet lists.
pub struct ReportDocument {
    lines: Vec<String>,
}

impl ReportDocument {
    pub fn new(worksheet: &str, workbook: &str) -> ReportDocument {
        ReportDocument {
            lines: vec![
                format!("# Analysis of {} (from {})", worksheet, workbook),
                String::new(),
            ],
        }
    }

    pub fn add_question(
        &mut self,
        question: &Question,
        settings: &SummarySettings,
    ) -> Result<(), AnalysisError> {
        let header = question.header();
        self.lines.push(format!(
            "## Q{}: {} - {}",
            header.number,
            header.statement,
            question.kind().label()
        ));
        self.lines.push(String::new());
        match question.kind() {
            QuestionKind::Demographic => {}
            QuestionKind::FreeResponse => {
                self.lines.push("**Summary of responses:**".to_string());
                self.lines.push(String::new());
                for sentence in question.summarize(settings)? {
                    self.lines.push(format!("- {}", sentence));
                }
                self.lines.push(String::new());
            }
            kind => {
                self.lines.push(format!(
                    "**Most popular choice:** {}",
                    format_mode(&question.mode()?)
                ));
                self.lines.push(String::new());
                self.lines.push("**Choices:**".to_string());
                self.lines.push(String::new());
                self.lines.extend(choice_lines(
                    &question.frequency()?,
                    &question.frequency_percent()?,
                ));
                self.lines.push(String::new());
                self.lines.push(format!(
                    "![Pie chart for question {}]({})",
                    header.number,
                    question.pie_chart_file_name()
                ));
                self.lines.push(String::new());
                if kind == QuestionKind::Numeric {
                    self.lines.push(format!("**Mean:** {:?}", question.mean()?));
                    self.lines.push(String::new());
                    self.lines
                        .push(format!("**Median:** {}", question.median()?));
                    self.lines.push(String::new());
                }
            }
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

// ******** JSON summary *********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyIdentity {
    pub workbook: String,
    pub worksheet: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceCount {
    pub choice: String,
    pub count: u64,
    pub percent: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub question: u32,
    pub statement: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ChoiceCount>>,
    #[serde(rename = "pieChart", skip_serializing_if = "Option::is_none")]
    pub pie_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<JSValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub survey: SurveyIdentity,
    pub questions: Vec<QuestionSummary>,
}

/// The JSON entry for one question: number, statement, kind tag, and the
/// results that the kind supports.
pub fn question_summary(
    question: &Question,
    settings: &SummarySettings,
) -> Result<QuestionSummary, AnalysisError> {
    let header = question.header();
    let mut summary = QuestionSummary {
        question: header.number,
        statement: header.statement.clone(),
        kind: question.kind().tag().to_string(),
        mode: None,
        choices: None,
        pie_chart: None,
        mean: None,
        median: None,
        summary: None,
    };
    match question.kind() {
        QuestionKind::Demographic => {}
        QuestionKind::FreeResponse => {
            summary.summary = Some(question.summarize(settings)?);
        }
        kind => {
            summary.mode = Some(question.mode()?.iter().map(|v| v.to_string()).collect());
            let percent = question.frequency_percent()?;
            summary.choices = Some(
                question
                    .frequency()?
                    .iter()
                    .map(|(choice, count)| ChoiceCount {
                        choice: choice.to_string(),
                        count: *count,
                        percent: percent[choice],
                    })
                    .collect(),
            );
            summary.pie_chart = Some(question.pie_chart_file_name());
            if kind == QuestionKind::Numeric {
                summary.mean = Some(question.mean()?);
                summary.median = Some(match question.median()? {
                    Median::Exact(v) => json!(v),
                    Median::Interpolated(v) => json!(v),
                });
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn numeric_console_block() {
        let responses = raw(&["4", "4", "5", "1", "2", "2", "5", "5", "3"]);
        let q = Question::numeric(2, "I would come again", &responses).unwrap();
        let block = console_block(&q, &SummarySettings::new(5)).unwrap();
        let expected = "\n------------------\n\n\
            Q2: I would come again - Numeric\n\
            Most popular choice: [5]\n\n\
            Choices:\n\
            - 1 - 1 (11.1%)\n\
            - 2 - 2 (22.2%)\n\
            - 3 - 1 (11.1%)\n\
            - 4 - 2 (22.2%)\n\
            - 5 - 3 (33.3%)\n\
            File name of pie chart: Q2_pie.png\n\n\
            Average: 3.4444444444444446\n\
            Median: 4";
        assert_eq!(block, expected);
    }

    #[test]
    fn demographic_console_block_is_the_heading_only() {
        let q = Question::demographic(1, "Your Name").unwrap();
        let block = console_block(&q, &SummarySettings::new(5)).unwrap();
        assert_eq!(block, "\n------------------\n\nQ1: Your Name - Demographic");
    }

    #[test]
    fn free_response_console_block_lists_the_summary() {
        let q = Question::free_response(4, "Any comments?", &raw(&["Great", "Great"])).unwrap();
        let block = console_block(&q, &SummarySettings::new(5)).unwrap();
        assert_eq!(
            block,
            "\n------------------\n\n\
             Q4: Any comments? - Free response\n\
             Summary of responses:\n\
             - Great.\n\
             - Great."
        );
    }

    #[test]
    fn markdown_report_structure() {
        let q = Question::categorical(3, "Would you use it again?", &raw(&["Yes", "No", "Yes"]))
            .unwrap();
        let mut doc = ReportDocument::new("Form responses 1", "responses.xlsx");
        doc.add_question(&q, &SummarySettings::new(5)).unwrap();
        let text = doc.render();
        assert!(text.starts_with("# Analysis of Form responses 1 (from responses.xlsx)\n"));
        assert!(text.contains("## Q3: Would you use it again? - Categorical\n"));
        assert!(text.contains("**Most popular choice:** [Yes]\n"));
        assert!(text.contains("- Yes - 2 (66.7%)\n"));
        assert!(text.contains("![Pie chart for question 3](Q3_pie.png)\n"));
    }

    #[test]
    fn json_summary_keeps_only_the_supported_results() {
        let q = Question::numeric(2, "Rate it", &raw(&["1", "2", "2", "5"])).unwrap();
        let summary = question_summary(&q, &SummarySettings::new(5)).unwrap();
        let js = serde_json::to_value(&summary).unwrap();
        assert_eq!(js["question"], json!(2));
        assert_eq!(js["kind"], json!("numeric"));
        assert_eq!(js["mode"], json!(["2"]));
        assert_eq!(js["pieChart"], json!("Q2_pie.png"));
        assert_eq!(js["mean"], json!(2.5));
        assert_eq!(js["median"], json!(2.0));
        assert_eq!(js["choices"][0]["choice"], json!("1"));
        assert_eq!(js["choices"][0]["count"], json!(1));
        assert!(js.get("summary").is_none());
    }

    #[test]
    fn json_summary_of_a_demographic_question_is_minimal() {
        let q = Question::demographic(1, "Your Name").unwrap();
        let summary = question_summary(&q, &SummarySettings::new(5)).unwrap();
        let js = serde_json::to_value(&summary).unwrap();
        assert_eq!(js["statement"], json!("Your Name"));
        assert!(js.get("mode").is_none());
        assert!(js.get("choices").is_none());
        assert!(js.get("pieChart").is_none());
    }
}
