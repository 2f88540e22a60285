//! Extractive summarization of free-text responses.
//!
//! This is the classical Luhn heuristic: a word is significant when its stem
//! occurs often enough across the document, and a sentence is scored by its
//! densest cluster of significant words. Nothing is generated; the summary is
//! a subset of the input sentences, emitted in their original order.

use log::debug;
use rust_stemmers::{Algorithm, Stemmer};

use std::collections::{HashMap, HashSet};

use crate::config::{Language, SummarySettings};

// A cluster tolerates up to 3 non-significant words between two significant
// ones; the 4th breaks it.
const MAX_GAP_SIZE: usize = 4;
// A stem must occur at least this many times (among non-stop words) to be
// significant.
const MIN_OCCURRENCES: u64 = 2;

impl Language {
    pub(crate) fn stemmer(&self) -> Stemmer {
        match self {
            Language::English => Stemmer::create(Algorithm::English),
        }
    }

    pub(crate) fn stop_words(&self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH_STOP_WORDS,
        }
    }
}

struct Sentence {
    /// Cleaned text, original casing, no punctuation.
    text: String,
    /// Lowercased word stems, one per word of the sentence.
    stems: Vec<String>,
    /// Stems of the words that count towards the significance model. Stop
    /// words are filtered on the lowercased word, before stemming.
    content_stems: Vec<String>,
}

/// Summarizes free-text responses into at most `settings.length` sentences.
///
/// Responses are consumed in the order given. Each response has its ASCII
/// punctuation stripped, then is dropped when its trimmed lowercased text is
/// in the exclusion set or empty; the survivors become the sentences of the
/// document, one per response. Selected sentences come back in document
/// order, each with a trailing period.
///
/// Fewer surviving sentences than `settings.length` yields all of them; no
/// survivors yields an empty vector.
///
/// ```
/// use survey_analysis::{summarize, SummarySettings};
/// let responses: Vec<String> = ["Loved it", "Nil", "Loved it!"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let settings = SummarySettings::new(2).with_excluded(&["nil"]);
/// assert_eq!(summarize(&responses, &settings), vec!["Loved it.", "Loved it."]);
/// ```
pub fn summarize(responses: &[String], settings: &SummarySettings) -> Vec<String> {
    let stemmer = settings.language.stemmer();
    let stop_words: HashSet<&str> = settings.language.stop_words().iter().copied().collect();

    let mut sentences: Vec<Sentence> = Vec::new();
    for response in responses.iter() {
        let text: String = response
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        let text = text.trim().to_string();
        let key = text.to_lowercase();
        if key.is_empty() || settings.excluded.contains(&key) {
            continue;
        }
        let mut stems = Vec::new();
        let mut content_stems = Vec::new();
        for word in key.split_whitespace() {
            let stem = stemmer.stem(word).to_string();
            if !stop_words.contains(word) {
                content_stems.push(stem.clone());
            }
            stems.push(stem);
        }
        sentences.push(Sentence {
            text,
            stems,
            content_stems,
        });
    }
    debug!(
        "summarize: {} responses, {} sentences after exclusion",
        responses.len(),
        sentences.len()
    );

    let mut occurrences: HashMap<&str, u64> = HashMap::new();
    for sentence in sentences.iter() {
        for stem in sentence.content_stems.iter() {
            *occurrences.entry(stem.as_str()).or_insert(0) += 1;
        }
    }
    let significant: HashSet<&str> = occurrences
        .iter()
        .filter_map(|(stem, count)| {
            if *count >= MIN_OCCURRENCES {
                Some(*stem)
            } else {
                None
            }
        })
        .collect();

    let scores: Vec<f64> = sentences
        .iter()
        .map(|s| rate_sentence(&s.stems, &significant))
        .collect();

    // Rank by score, ties broken by document position, then restore
    // document order on the selection.
    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    ranked.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));
    let mut selected: Vec<usize> = ranked.into_iter().take(settings.length).collect();
    selected.sort_unstable();

    selected
        .into_iter()
        .map(|i| format!("{}.", sentences[i].text))
        .collect()
}

/// The score of the densest cluster of significant words in the sentence:
/// `significant_count^2 / cluster_length`. A sentence without significant
/// words scores 0.
fn rate_sentence(stems: &[String], significant: &HashSet<&str>) -> f64 {
    let mut best = 0.0_f64;
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut count: usize = 0;
    for (pos, stem) in stems.iter().enumerate() {
        if !significant.contains(stem.as_str()) {
            continue;
        }
        match start {
            Some(_) if pos - end - 1 < MAX_GAP_SIZE => {
                end = pos;
                count += 1;
            }
            Some(s) => {
                best = best.max(cluster_score(count, s, end));
                start = Some(pos);
                end = pos;
                count = 1;
            }
            None => {
                start = Some(pos);
                end = pos;
                count = 1;
            }
        }
    }
    if let Some(s) = start {
        best = best.max(cluster_score(count, s, end));
    }
    best
}

fn cluster_score(count: usize, start: usize, end: usize) -> f64 {
    (count * count) as f64 / (end - start + 1) as f64
}

/// Stop words excluded from the significance model. The list leans broad: it
/// also covers weak qualifiers ("better", "maybe", "quite") that would
/// otherwise dominate short survey answers.
static ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "also", "although",
    "always", "am", "among", "an", "and", "any", "anyone", "anything", "are", "around", "as",
    "at", "be", "because", "been", "before", "being", "below", "best", "better", "between",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "enough", "etc", "even", "ever", "every", "few", "for", "from",
    "further", "get", "got", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "least", "less", "like", "many", "may", "maybe", "me", "might",
    "more", "most", "much", "must", "my", "myself", "neither", "never", "no", "nor", "not",
    "now", "of", "off", "often", "on", "once", "only", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "perhaps", "quite", "rather", "really",
    "same", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "upon", "us", "use", "used", "using",
    "very", "was", "we", "well", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn summarizes_a_survey_column() {
        let raw = responses(&[
            "I like apples",
            "I like pears",
            "Everything",
            "I love microbit",
            "Nil",
            "None",
            "Python rocks!",
            "Nil",
            "Nothing",
            "I like oranges too",
            "Python is the best",
            "-",
            "Microbit is the best",
            "I love python",
            "Javascript is better",
            "Nil",
            "Maybe we should use C++",
            "Nothing",
            "Apple is the best",
            "Apples",
            "Everything",
            "Python",
            "Apples are better than pears",
            "Nothing",
            "-",
            "Mircrobit and Python",
            "Apples and oranges",
        ]);
        let settings = SummarySettings::new(3)
            .with_excluded(&["everything", "nil", "none", "nothing", "-"]);
        assert_eq!(
            summarize(&raw, &settings),
            vec![
                "I love microbit.".to_string(),
                "I love python.".to_string(),
                "Apples and oranges.".to_string(),
            ]
        );
    }

    #[test]
    fn excluded_responses_never_reach_the_summary() {
        let raw = responses(&["Nil", "nil.", "  NONE  ", "-"]);
        let settings = SummarySettings::new(5).with_excluded(&["nil", "none", "-"]);
        assert!(summarize(&raw, &settings).is_empty());
    }

    #[test]
    fn no_responses_yields_an_empty_summary() {
        assert!(summarize(&[], &SummarySettings::new(3)).is_empty());
    }

    #[test]
    fn short_input_comes_back_whole_in_original_order() {
        let raw = responses(&["Red fish", "Blue fish", "Red boat"]);
        let settings = SummarySettings::new(10);
        assert_eq!(
            summarize(&raw, &settings),
            vec![
                "Red fish.".to_string(),
                "Blue fish.".to_string(),
                "Red boat.".to_string(),
            ]
        );
    }

    #[test]
    fn ties_keep_the_earliest_sentences() {
        // All three sentences score identically; the first two make the cut.
        let raw = responses(&["alpha beta", "beta alpha", "alpha beta"]);
        let settings = SummarySettings::new(2);
        assert_eq!(
            summarize(&raw, &settings),
            vec!["alpha beta.".to_string(), "beta alpha.".to_string()]
        );
    }

    #[test]
    fn punctuation_is_stripped_before_matching() {
        let raw = responses(&["Great!!!", "Great, again.", "So-so"]);
        let settings = SummarySettings::new(3);
        assert_eq!(
            summarize(&raw, &settings),
            vec![
                "Great.".to_string(),
                "Great again.".to_string(),
                "Soso.".to_string(),
            ]
        );
    }

    #[test]
    fn language_parsing() {
        assert_eq!(Language::parse("english"), Some(Language::English));
        assert_eq!(Language::parse("klingon"), None);
    }
}
