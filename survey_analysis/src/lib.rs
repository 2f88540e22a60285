mod config;
pub mod manual;
mod summarize;

use log::debug;

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::summarize::summarize;

// **** Question model ****

/// Identity shared by every question variant: a positive number, unique
/// within a run and assigned by the caller, and a non-empty statement.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionHeader {
    pub number: u32,
    pub statement: String,
}

impl QuestionHeader {
    fn checked(number: u32, statement: &str) -> Result<QuestionHeader, AnalysisError> {
        if number == 0 {
            return Err(AnalysisError::InvalidNumber);
        }
        let statement = statement.trim();
        if statement.is_empty() {
            return Err(AnalysisError::EmptyStatement { question: number });
        }
        Ok(QuestionHeader {
            number,
            statement: statement.to_string(),
        })
    }
}

/// Integer responses of a numeric question, sorted ascending.
/// Guaranteed non-empty at construction, so `mean` and `median` are total.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NumericResponses {
    values: Vec<i64>,
}

impl NumericResponses {
    /// Parses raw response values. The first value that does not parse as
    /// an integer aborts the construction and is named in the error.
    pub fn parse(question: u32, raw: &[String]) -> Result<NumericResponses, AnalysisError> {
        if raw.is_empty() {
            return Err(AnalysisError::NoResponses { question });
        }
        let mut values = Vec::with_capacity(raw.len());
        for r in raw.iter() {
            let v = r
                .trim()
                .parse::<i64>()
                .map_err(|_| AnalysisError::NotAnInteger {
                    question,
                    value: r.clone(),
                })?;
            values.push(v);
        }
        values.sort_unstable();
        Ok(NumericResponses { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Arithmetic mean, without rounding.
    pub fn mean(&self) -> f64 {
        let sum: i64 = self.values.iter().sum();
        sum as f64 / self.values.len() as f64
    }

    /// The middle element for an odd number of responses (exact), the
    /// average of the two central elements for an even number.
    pub fn median(&self) -> Median {
        let n = self.values.len();
        if n % 2 == 0 {
            let lo = self.values[n / 2 - 1];
            let hi = self.values[n / 2];
            Median::Interpolated((lo + hi) as f64 / 2.0)
        } else {
            Median::Exact(self.values[n / 2])
        }
    }

    fn response_values(&self) -> Vec<ResponseValue> {
        self.values.iter().map(|v| ResponseValue::Integer(*v)).collect()
    }
}

/// Text responses of a categorical question, trimmed and sorted
/// lexicographically. Guaranteed non-empty at construction.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TextResponses {
    values: Vec<String>,
}

impl TextResponses {
    pub fn parse(question: u32, raw: &[String]) -> Result<TextResponses, AnalysisError> {
        if raw.is_empty() {
            return Err(AnalysisError::NoResponses { question });
        }
        let mut values: Vec<String> = raw.iter().map(|r| r.trim().to_string()).collect();
        values.sort();
        Ok(TextResponses { values })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn response_values(&self) -> Vec<ResponseValue> {
        self.values
            .iter()
            .map(|v| ResponseValue::Text(v.clone()))
            .collect()
    }
}

/// Responses of a free-response question.
///
/// Two orders are kept on purpose: the lexicographically sorted values for
/// presentation, and the as-given input order for summarization. The
/// summarizer needs natural sentence adjacency, so it must never see the
/// sorted order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FreeResponses {
    original: Vec<String>,
    sorted: Vec<String>,
}

impl FreeResponses {
    pub fn parse(question: u32, raw: &[String]) -> Result<FreeResponses, AnalysisError> {
        if raw.is_empty() {
            return Err(AnalysisError::NoResponses { question });
        }
        let original = raw.to_vec();
        let mut sorted = original.clone();
        sorted.sort();
        Ok(FreeResponses { original, sorted })
    }

    /// The responses in the order they were given. This is the order fed to
    /// the summarizer.
    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// The responses in sorted order, for presentation.
    pub fn sorted(&self) -> &[String] {
        &self.sorted
    }
}

/// A survey question together with its validated responses.
///
/// Each variant carries only the payload its capability set requires:
/// statistics are defined for `Numeric` and `Categorical`, mean/median for
/// `Numeric` only, summarization for `FreeResponse` only. The dispatch
/// methods on this enum return [`AnalysisError::Unsupported`] for any other
/// combination.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Question {
    Demographic(QuestionHeader),
    Numeric(QuestionHeader, NumericResponses),
    Categorical(QuestionHeader, TextResponses),
    FreeResponse(QuestionHeader, FreeResponses),
}

/// A response value, as it appears in frequency tables and modes.
///
/// A single question only ever holds one of the two shapes; the enum lets
/// callers render numeric and categorical results through one code path.
/// Integers order numerically, text orders lexicographically.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum ResponseValue {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseValue::Integer(v) => write!(f, "{}", v),
            ResponseValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Question {
    /// Builds a question of the given kind from raw response values.
    /// Demographic questions ignore the responses.
    pub fn build(
        kind: QuestionKind,
        number: u32,
        statement: &str,
        responses: &[String],
    ) -> Result<Question, AnalysisError> {
        debug!(
            "build: question {} kind {:?} with {} raw responses",
            number,
            kind,
            responses.len()
        );
        match kind {
            QuestionKind::Demographic => Question::demographic(number, statement),
            QuestionKind::Numeric => Question::numeric(number, statement, responses),
            QuestionKind::Categorical => Question::categorical(number, statement, responses),
            QuestionKind::FreeResponse => Question::free_response(number, statement, responses),
        }
    }

    pub fn demographic(number: u32, statement: &str) -> Result<Question, AnalysisError> {
        Ok(Question::Demographic(QuestionHeader::checked(
            number, statement,
        )?))
    }

    pub fn numeric(
        number: u32,
        statement: &str,
        responses: &[String],
    ) -> Result<Question, AnalysisError> {
        let header = QuestionHeader::checked(number, statement)?;
        let payload = NumericResponses::parse(number, responses)?;
        Ok(Question::Numeric(header, payload))
    }

    pub fn categorical(
        number: u32,
        statement: &str,
        responses: &[String],
    ) -> Result<Question, AnalysisError> {
        let header = QuestionHeader::checked(number, statement)?;
        let payload = TextResponses::parse(number, responses)?;
        Ok(Question::Categorical(header, payload))
    }

    pub fn free_response(
        number: u32,
        statement: &str,
        responses: &[String],
    ) -> Result<Question, AnalysisError> {
        let header = QuestionHeader::checked(number, statement)?;
        let payload = FreeResponses::parse(number, responses)?;
        Ok(Question::FreeResponse(header, payload))
    }

    pub fn header(&self) -> &QuestionHeader {
        match self {
            Question::Demographic(h) => h,
            Question::Numeric(h, _) => h,
            Question::Categorical(h, _) => h,
            Question::FreeResponse(h, _) => h,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Demographic(_) => QuestionKind::Demographic,
            Question::Numeric(_, _) => QuestionKind::Numeric,
            Question::Categorical(_, _) => QuestionKind::Categorical,
            Question::FreeResponse(_, _) => QuestionKind::FreeResponse,
        }
    }

    /// The name of the pie chart file derived for this question. Downstream
    /// text output embeds this name literally, so it is part of the public
    /// contract.
    pub fn pie_chart_file_name(&self) -> String {
        pie_chart_file_name(self.header().number)
    }

    fn discrete_values(&self, operation: &'static str) -> Result<Vec<ResponseValue>, AnalysisError> {
        match self {
            Question::Numeric(_, resp) => Ok(resp.response_values()),
            Question::Categorical(_, resp) => Ok(resp.response_values()),
            _ => Err(self.unsupported(operation)),
        }
    }

    /// Occurrence count per distinct response value, in ascending value
    /// order. Defined for numeric and categorical questions.
    pub fn frequency(&self) -> Result<BTreeMap<ResponseValue, u64>, AnalysisError> {
        Ok(frequency(&self.discrete_values("frequency()")?))
    }

    /// Percentage of responses per distinct value, parallel to
    /// [`Question::frequency`]. No rounding is applied here; rounding is a
    /// presentation concern.
    pub fn frequency_percent(&self) -> Result<BTreeMap<ResponseValue, f64>, AnalysisError> {
        Ok(frequency_percent(
            &self.discrete_values("frequency_percent()")?,
        ))
    }

    /// All values with the maximum occurrence count, in ascending order.
    /// Ties are never broken.
    pub fn mode(&self) -> Result<Vec<ResponseValue>, AnalysisError> {
        Ok(mode(&self.discrete_values("mode()")?))
    }

    /// Arithmetic mean. Defined for numeric questions only.
    pub fn mean(&self) -> Result<f64, AnalysisError> {
        match self {
            Question::Numeric(_, resp) => Ok(resp.mean()),
            _ => Err(self.unsupported("mean()")),
        }
    }

    /// Median. Defined for numeric questions only.
    pub fn median(&self) -> Result<Median, AnalysisError> {
        match self {
            Question::Numeric(_, resp) => Ok(resp.median()),
            _ => Err(self.unsupported("median()")),
        }
    }

    /// Extractive summary of the responses, in their as-given order.
    /// Defined for free-response questions only.
    pub fn summarize(&self, settings: &SummarySettings) -> Result<Vec<String>, AnalysisError> {
        match self {
            Question::FreeResponse(_, resp) => Ok(summarize(resp.original(), settings)),
            _ => Err(self.unsupported("summarize()")),
        }
    }

    fn unsupported(&self, operation: &'static str) -> AnalysisError {
        AnalysisError::Unsupported {
            question: self.header().number,
            operation,
            kind: self.kind(),
        }
    }
}

// **** Statistics engine ****

/// Occurrence count per distinct value. The sum of the counts equals the
/// number of responses; iteration is in ascending value order.
pub fn frequency<T: Ord + Clone>(responses: &[T]) -> BTreeMap<T, u64> {
    let mut table: BTreeMap<T, u64> = BTreeMap::new();
    for value in responses.iter() {
        *table.entry(value.clone()).or_insert(0) += 1;
    }
    table
}

/// Percentage of responses per distinct value (`count / len * 100`),
/// floating-point, without rounding.
///
/// An empty input returns an empty map rather than dividing by zero.
pub fn frequency_percent<T: Ord + Clone>(responses: &[T]) -> BTreeMap<T, f64> {
    let total = responses.len() as f64;
    frequency(responses)
        .into_iter()
        .map(|(value, count)| (value, count as f64 / total * 100.0))
        .collect()
}

/// All values whose count equals the maximum count, in ascending order.
/// Ties are never broken: every tied value is returned. An empty input
/// yields an empty vector.
///
/// ```
/// use survey_analysis::mode;
/// assert_eq!(mode(&[1, 2, 1, 2, 2, 4, 2, 3]), vec![2]);
/// assert_eq!(mode(&[1, 2, 1, 1, 2, 4, 2, 3]), vec![1, 2]);
/// ```
pub fn mode<T: Ord + Clone>(responses: &[T]) -> Vec<T> {
    let table = frequency(responses);
    let highest = match table.values().max() {
        Some(m) => *m,
        None => return Vec::new(),
    };
    table
        .into_iter()
        .filter_map(|(value, count)| if count == highest { Some(value) } else { None })
        .collect()
}

/// Derives the pie chart file name for a question number.
///
/// The name is a pure function of the question number, so concurrent
/// writers using distinct question numbers never collide.
pub fn pie_chart_file_name(number: u32) -> String {
    format!("Q{}_pie.png", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn frequency_counts_sum_to_len() {
        let r = [1, 2, 1, 2, 2, 4, 2, 3];
        let table = frequency(&r);
        assert_eq!(table.values().sum::<u64>(), r.len() as u64);
        assert_eq!(table[&1], 2);
        assert_eq!(table[&2], 4);
        assert_eq!(table[&3], 1);
        assert_eq!(table[&4], 1);
    }

    #[test]
    fn frequency_percent_sums_to_100() {
        let r = raw(&["Hello", "Hi", "Random", "Incorrect", "Hello"]);
        let table = frequency_percent(&r);
        let total: f64 = table.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(table[&"Hello".to_string()], 40.0);
        assert_eq!(table[&"Hi".to_string()], 20.0);
    }

    #[test]
    fn frequency_percent_of_nothing_is_empty() {
        let r: Vec<i64> = vec![];
        assert!(frequency_percent(&r).is_empty());
    }

    #[test]
    fn mode_single_winner() {
        assert_eq!(mode(&[1, 2, 1, 2, 2, 4, 2, 3]), vec![2]);
    }

    #[test]
    fn mode_keeps_all_tied_values() {
        assert_eq!(mode(&[1, 2, 1, 1, 2, 4, 2, 3]), vec![1, 2]);
    }

    #[test]
    fn mode_of_single_response() {
        assert_eq!(mode(&[7]), vec![7]);
    }

    #[test]
    fn mode_of_all_equal_responses() {
        assert_eq!(mode(&[3, 3, 3]), vec![3]);
    }

    #[test]
    fn mode_elements_have_maximum_count() {
        let r = [5, 1, 5, 2, 1, 5, 1];
        let table = frequency(&r);
        let highest = *table.values().max().unwrap();
        let m = mode(&r);
        assert!(!m.is_empty());
        for v in &m {
            assert_eq!(table[v], highest);
        }
        for (v, c) in table.iter() {
            if !m.contains(v) {
                assert!(*c < highest);
            }
        }
    }

    #[test]
    fn mean_of_known_list() {
        let resp = NumericResponses::parse(2, &raw(&["1", "2", "1", "2", "2", "4", "2", "3"]))
            .unwrap();
        assert_eq!(resp.mean(), 2.125);
    }

    #[test]
    fn median_even_length_averages_the_middle() {
        let resp = NumericResponses::parse(2, &raw(&["1", "2", "1", "2", "2", "4", "2", "3"]))
            .unwrap();
        assert_eq!(resp.median(), Median::Interpolated(2.0));
        assert_eq!(resp.median().to_string(), "2.0");
    }

    #[test]
    fn median_odd_length_is_exact() {
        let resp =
            NumericResponses::parse(3, &raw(&["1", "2", "1", "1", "2", "4", "2"])).unwrap();
        // The middle element of the sorted list, not a float.
        assert_eq!(resp.median(), Median::Exact(2));
        assert_eq!(resp.median().to_string(), "2");
    }

    #[test]
    fn numeric_responses_are_sorted_ascending() {
        let resp = NumericResponses::parse(2, &raw(&["1", "2", "1", "2", "2", "4", "2", "3"]))
            .unwrap();
        assert_eq!(resp.values(), &[1, 1, 2, 2, 2, 2, 3, 4]);
    }

    #[test]
    fn numeric_rejects_non_integer_responses() {
        let err = Question::numeric(1, "Random question", &raw(&["1", "Hello", "3"]))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NotAnInteger {
                question: 1,
                value: "Hello".to_string()
            }
        );
    }

    #[test]
    fn numeric_rejects_empty_responses() {
        let err = Question::numeric(4, "Empty", &[]).unwrap_err();
        assert_eq!(err, AnalysisError::NoResponses { question: 4 });
    }

    #[test]
    fn categorical_example_from_survey() {
        let responses = raw(&[
            "Maybe", "Maybe", "Maybe", "Yes", "Yes", "Maybe", "Maybe", "Yes", "Maybe", "Maybe",
        ]);
        let q = Question::categorical(3, "Would you use it again?", &responses).unwrap();
        let freq = q.frequency().unwrap();
        assert_eq!(freq[&ResponseValue::Text("Maybe".to_string())], 7);
        assert_eq!(freq[&ResponseValue::Text("Yes".to_string())], 3);
        assert_eq!(
            q.mode().unwrap(),
            vec![ResponseValue::Text("Maybe".to_string())]
        );
        let percent = q.frequency_percent().unwrap();
        assert_eq!(percent[&ResponseValue::Text("Yes".to_string())], 30.0);
    }

    #[test]
    fn demographic_has_no_statistics() {
        let q = Question::demographic(5, "Your name").unwrap();
        assert!(matches!(
            q.frequency(),
            Err(AnalysisError::Unsupported {
                question: 5,
                operation: "frequency()",
                ..
            })
        ));
        assert!(q.mean().is_err());
        assert!(q.summarize(&SummarySettings::new(5)).is_err());
    }

    #[test]
    fn categorical_has_no_mean() {
        let q = Question::categorical(6, "Pick one", &raw(&["a", "b"])).unwrap();
        assert!(matches!(
            q.mean(),
            Err(AnalysisError::Unsupported {
                operation: "mean()",
                ..
            })
        ));
        assert!(q.median().is_err());
        assert!(q.summarize(&SummarySettings::new(5)).is_err());
    }

    #[test]
    fn free_response_keeps_both_orders() {
        let responses = raw(&["zebra", "apple", "mango"]);
        match Question::free_response(8, "Anything to add?", &responses).unwrap() {
            Question::FreeResponse(_, resp) => {
                assert_eq!(resp.original(), &["zebra", "apple", "mango"]);
                assert_eq!(resp.sorted(), &["apple", "mango", "zebra"]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn header_validation() {
        assert_eq!(
            Question::demographic(0, "x").unwrap_err(),
            AnalysisError::InvalidNumber
        );
        assert_eq!(
            Question::demographic(2, "  ").unwrap_err(),
            AnalysisError::EmptyStatement { question: 2 }
        );
    }

    #[test]
    fn pie_chart_name_depends_only_on_the_number() {
        assert_eq!(pie_chart_file_name(7), "Q7_pie.png");
        let q = Question::numeric(7, "Rate it", &raw(&["1", "5"])).unwrap();
        assert_eq!(q.pie_chart_file_name(), "Q7_pie.png");
    }
}
