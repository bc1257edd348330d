/// Naive summary: the first `max_sentences` period-delimited fragments.
///
/// Fragments are trimmed and empty ones dropped, then rejoined with ". ".
/// The closing period is added only when the text had at least
/// `max_sentences` fragments.
pub fn truncate(text: &str, max_sentences: usize) -> String {
    let fragments: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut summary = fragments
        .iter()
        .take(max_sentences)
        .copied()
        .collect::<Vec<_>>()
        .join(". ");
    if fragments.len() >= max_sentences {
        summary.push('.');
    }
    summary
}
