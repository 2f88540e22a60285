// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

/// The four kinds of questions that a survey run can contain.
///
/// The kind of a question is decided by the configuration (the caller),
/// never inferred from the response data.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionKind {
    /// Identifies the respondent. Carries a statement and nothing else.
    Demographic,
    /// All responses are integers (a rating scale, a count, ...).
    Numeric,
    /// Responses are drawn from a fixed set of textual choices.
    Categorical,
    /// Free-form text, analyzed through extractive summarization.
    FreeResponse,
}

impl QuestionKind {
    /// The tag used in configuration files and in the JSON summary.
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::Demographic => "demographic",
            QuestionKind::Numeric => "numeric",
            QuestionKind::Categorical => "categorical",
            QuestionKind::FreeResponse => "free-response",
        }
    }

    /// Parses a configuration tag. The caller must reject unknown tags
    /// before any question is built.
    pub fn parse(tag: &str) -> Option<QuestionKind> {
        match tag {
            "demographic" => Some(QuestionKind::Demographic),
            "numeric" => Some(QuestionKind::Numeric),
            "categorical" => Some(QuestionKind::Categorical),
            "free-response" => Some(QuestionKind::FreeResponse),
            _ => None,
        }
    }

    /// Human-readable name, as printed in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Demographic => "Demographic",
            QuestionKind::Numeric => "Numeric",
            QuestionKind::Categorical => "Categorical",
            QuestionKind::FreeResponse => "Free response",
        }
    }
}

/// The natural language used for sentence tokenization, stemming and stop
/// words. A single language applies to a whole run.
///
/// English is the only language wired in at the moment; this enum is the
/// extension point for more.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum Language {
    #[default]
    English,
}

impl Language {
    pub fn parse(name: &str) -> Option<Language> {
        match name {
            "english" => Some(Language::English),
            _ => None,
        }
    }
}

/// Settings for free-response summarization, shared by every question of a
/// run.
#[derive(Debug, Clone, Default)]
pub struct SummarySettings {
    /// Number of sentences to select. Must be at least 1; the configuration
    /// layer validates this before the summarizer is invoked.
    pub length: usize,
    /// Responses whose punctuation-stripped, trimmed, lowercased text is in
    /// this set are dropped before summarization. All entries are lowercase.
    pub excluded: HashSet<String>,
    pub language: Language,
}

impl SummarySettings {
    pub fn new(length: usize) -> SummarySettings {
        SummarySettings {
            length,
            excluded: HashSet::new(),
            language: Language::English,
        }
    }

    /// Adds exclusion entries, normalizing them to lowercase.
    pub fn with_excluded(mut self, words: &[&str]) -> SummarySettings {
        self.excluded
            .extend(words.iter().map(|w| w.trim().to_lowercase()));
        self
    }
}

// ******** Output data structures *********

/// The median of the integer responses to a numeric question.
///
/// The middle element of an odd-length list is reported exactly, without
/// coercion to a float. An even-length list averages the two central
/// elements.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Median {
    Exact(i64),
    Interpolated(f64),
}

impl Display for Median {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Median::Exact(v) => write!(f, "{}", v),
            // {:?} keeps the trailing .0 on integral averages.
            Median::Interpolated(v) => write!(f, "{:?}", v),
        }
    }
}

/// Errors raised while building a question or when requesting a statistic
/// that the question kind does not support.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalysisError {
    /// A numeric question received a response that does not parse as an
    /// integer. The offending value is carried verbatim.
    NotAnInteger { question: u32, value: String },
    /// A response-carrying question was built from an empty response list.
    NoResponses { question: u32 },
    /// The question statement was empty.
    EmptyStatement { question: u32 },
    /// Question numbers start at 1.
    InvalidNumber,
    /// The requested statistic is not defined for this kind of question.
    /// Reaching this is a dispatch bug in the caller, and it fails loudly.
    Unsupported {
        question: u32,
        operation: &'static str,
        kind: QuestionKind,
    },
}

impl Error for AnalysisError {}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::NotAnInteger { question, value } => write!(
                f,
                "question {}: numeric questions expect integer responses, found {:?}",
                question, value
            ),
            AnalysisError::NoResponses { question } => write!(
                f,
                "question {}: expected at least one response, found none",
                question
            ),
            AnalysisError::EmptyStatement { question } => {
                write!(f, "question {}: the question statement is empty", question)
            }
            AnalysisError::InvalidNumber => {
                write!(f, "question numbers start at 1, found 0")
            }
            AnalysisError::Unsupported {
                question,
                operation,
                kind,
            } => write!(
                f,
                "question {}: {} is not supported for {} questions",
                question,
                operation,
                kind.tag()
            ),
        }
    }
}
