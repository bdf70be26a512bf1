use crate::processing::types::{LengthTier, SummaryPrompt};

/// Upper bound on document characters embedded in a prompt.
pub const PROMPT_TEXT_CHAR_LIMIT: usize = 30_000;

const SHORT_TEMPLATE: &str = "Please provide a brief summary of the following text in 2-3 sentences. \
Capture only the central point and the most important conclusion.";

const MEDIUM_TEMPLATE: &str = "Please provide a structured summary of the following text in approximately 150-200 words. \
Organize it into short bullet-point sections: the main topic, the key points, and any conclusions or next steps.";

const LONG_TEMPLATE: &str = "Please provide a detailed summary of the following text in approximately 300 words. \
Structure it into multiple sections with short headings: an overview, the main themes with their supporting details, \
notable facts or figures, and the conclusions.";

/// Instruction template for `tier`.
pub fn template_for(tier: LengthTier) -> &'static str {
    match tier {
        LengthTier::Short => SHORT_TEMPLATE,
        LengthTier::Medium => MEDIUM_TEMPLATE,
        LengthTier::Long => LONG_TEMPLATE,
    }
}

/// Build the generative prompt, cutting `text` to [`PROMPT_TEXT_CHAR_LIMIT`] characters first.
pub fn build_prompt(text: &str, tier: LengthTier) -> SummaryPrompt {
    let (embedded, truncated) = truncate_chars(text, PROMPT_TEXT_CHAR_LIMIT);
    let template = template_for(tier);

    let mut prompt = String::with_capacity(template.len() + embedded.len() + 16);
    prompt.push_str(template);
    prompt.push_str("\n\n");
    prompt.push_str(embedded);
    prompt.push_str("\n\nSummary:");

    SummaryPrompt {
        prompt,
        embedded_chars: embedded.chars().count(),
        truncated,
        tier,
    }
}

/// Keep the first `max_chars` characters of `text`, never splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => (&text[..byte_offset], true),
        None => (text, false),
    }
}
