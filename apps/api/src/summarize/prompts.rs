// Prompt and sampling settings for remote summaries.

pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "Summarize the following text in {max_sentences} sentences:\n\n{text}";

/// Low temperature keeps summaries close to the source text.
pub const SUMMARY_TEMPERATURE: f32 = 0.2;
pub const SUMMARY_MAX_TOKENS: u32 = 250;

pub fn summary_prompt(text: &str, max_sentences: usize) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{max_sentences}", &max_sentences.to_string())
        .replace("{text}", text)
}
