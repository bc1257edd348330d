// TF-IDF vectorization and cosine similarity over a small in-memory corpus.
//
// Weighting follows the usual vectorizer defaults: lowercase tokens of two or
// more word characters, raw term counts, smoothed idf
// `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Sparse document vector keyed by vocabulary index.
pub type SparseVector = HashMap<usize, f64>;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("no documents to vectorize")]
    EmptyCorpus,

    #[error("empty vocabulary; documents contain only stop tokens")]
    EmptyVocabulary,
}

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fits a vocabulary over `docs` and returns one normalized vector per document,
/// in input order.
pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> Result<Vec<SparseVector>, VectorizeError> {
    if docs.is_empty() {
        return Err(VectorizeError::EmptyCorpus);
    }

    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

    let mut vocab: HashMap<&str, usize> = HashMap::new();
    let mut doc_freq: Vec<usize> = Vec::new();
    for tokens in &tokenized {
        let mut seen_in_doc: Vec<usize> = Vec::new();
        for token in tokens {
            let next = vocab.len();
            let idx = *vocab.entry(token.as_str()).or_insert(next);
            if idx == doc_freq.len() {
                doc_freq.push(0);
            }
            if !seen_in_doc.contains(&idx) {
                seen_in_doc.push(idx);
                doc_freq[idx] += 1;
            }
        }
    }

    if vocab.is_empty() {
        return Err(VectorizeError::EmptyVocabulary);
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = doc_freq
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    Ok(tokenized
        .iter()
        .map(|tokens| {
            let mut vector = SparseVector::new();
            for token in tokens {
                let idx = vocab[token.as_str()];
                *vector.entry(idx).or_insert(0.0) += 1.0;
            }
            for (idx, weight) in vector.iter_mut() {
                *weight *= idf[*idx];
            }
            l2_normalize(&mut vector);
            vector
        })
        .collect())
}

fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity of two sparse vectors. A zero vector scores 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(idx, w)| large.get(idx).map(|v| w * v))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_chars_and_lowercases() {
        assert_eq!(
            tokenize("A quick, Fine-Tuning of ML & x"),
            vec!["quick", "fine", "tuning", "of", "ml"]
        );
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectors = fit_transform(&["deep learning", "deep audio processing", "react"]).unwrap();
        for v in &vectors {
            let norm: f64 = v.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "norm was {norm}");
        }
    }

    #[test]
    fn test_smoothed_idf_weights_rare_terms_higher() {
        // "deep" appears in both docs, "audio" in one: audio must outweigh deep in doc 2.
        let vectors = fit_transform(&["deep learning", "deep audio"]).unwrap();
        let doc = &vectors[1];
        let weights: Vec<f64> = doc.values().copied().collect();
        let max = weights.iter().cloned().fold(f64::MIN, f64::max);
        let min = weights.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max > min);
    }

    #[test]
    fn test_identical_documents_have_similarity_one() {
        let vectors = fit_transform(&["neural networks", "neural networks", "react"]).unwrap();
        assert!((cosine_similarity(&vectors[0], &vectors[1]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&vectors[0], &vectors[2]), 0.0);
    }

    #[test]
    fn test_zero_vector_similarity_is_zero() {
        let vectors = fit_transform(&["neural networks", "x"]).unwrap();
        assert!(vectors[1].is_empty());
        assert_eq!(cosine_similarity(&vectors[0], &vectors[1]), 0.0);
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        assert_eq!(
            fit_transform(&["a b", "c"]),
            Err(VectorizeError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_empty_corpus_is_error() {
        let docs: [&str; 0] = [];
        assert_eq!(fit_transform(&docs), Err(VectorizeError::EmptyCorpus));
    }
}
