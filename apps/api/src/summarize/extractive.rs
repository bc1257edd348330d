// Extractive summaries with TextRank: sentences are graph nodes, shared
// content words weight the edges, and PageRank orders the sentences.
//
// Selected sentences come back in rank order, most central first.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const DAMPING: f64 = 0.85;
const CONVERGENCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

/// Largest input the dense similarity graph is built for. The graph and each
/// PageRank pass are quadratic in the sentence count; longer texts fail here
/// and the local tier truncates instead.
pub const MAX_RANKED_SENTENCES: usize = 500;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "for", "from", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my",
    "no", "nor", "not", "now", "of", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours",
];

#[derive(Debug, Error, PartialEq)]
pub enum ExtractiveError {
    #[error("text contains no sentences")]
    NoSentences,

    #[error("text has {count} sentences, more than the {limit} that can be ranked")]
    TooManySentences { count: usize, limit: usize },
}

/// Returns the `max_sentences` highest-ranked sentences joined by spaces.
pub fn summarize(text: &str, max_sentences: usize) -> Result<String, ExtractiveError> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Err(ExtractiveError::NoSentences);
    }
    if sentences.len() > MAX_RANKED_SENTENCES {
        return Err(ExtractiveError::TooManySentences {
            count: sentences.len(),
            limit: MAX_RANKED_SENTENCES,
        });
    }

    let words: Vec<HashSet<String>> = sentences.iter().map(|s| content_words(s)).collect();
    let scores = rank_sentences(&words);

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(order
        .into_iter()
        .take(max_sentences)
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Splits on terminal punctuation followed by whitespace, and on line breaks.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' || c == '\r' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            // Runs like "..." or "2.5" stay inside the current sentence.
            match chars.peek() {
                Some(&next) if !next.is_whitespace() => {}
                _ => push_sentence(&mut sentences, &mut current),
            }
        }
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("static word pattern"))
}

fn content_words(sentence: &str) -> HashSet<String> {
    let lowered = sentence.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Edge weight: shared words normalized by the log sizes of both sentences.
fn edge_weight(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm.abs() < f64::EPSILON {
        // Both sentences are a single (identical) word.
        return shared as f64;
    }
    shared as f64 / norm
}

/// PageRank over the sentence similarity graph. Returns one score per sentence.
fn rank_sentences(words: &[HashSet<String>]) -> Vec<f64> {
    let n = words.len();
    if n == 1 {
        return vec![1.0];
    }

    let mut weights = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let w = edge_weight(&words[i], &words[j]);
            weights[i][j] = w;
            weights[j][i] = w;
        }
    }
    let out_sums: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();

    let base = (1.0 - DAMPING) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![base; n];
        for (j, row) in weights.iter().enumerate() {
            if out_sums[j] <= f64::EPSILON {
                continue;
            }
            let share = DAMPING * scores[j] / out_sums[j];
            for (i, w) in row.iter().enumerate() {
                next[i] += w * share;
            }
        }

        let delta = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        scores = next;
        if delta < CONVERGENCE {
            break;
        }
    }

    scores
}
