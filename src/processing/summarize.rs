//! Prompt construction, generative summarization, and the extractive fallback.

mod fallback;
mod prompt;
mod strategy;

pub use fallback::{MIN_SENTENCE_WORDS, build_extractive_summary};
pub use prompt::{PROMPT_TEXT_CHAR_LIMIT, build_prompt, template_for};
pub use strategy::{GenerativeSummarizer, summarize_with_fallback};
