use crate::processing::types::LengthTier;

/// Sentences shorter than this many words are treated as fragments and skipped.
pub const MIN_SENTENCE_WORDS: usize = 8;

/// Build a deterministic extractive summary for `tier`.
///
/// Sentences of at least [`MIN_SENTENCE_WORDS`] words are ranked by word count (longest first,
/// document order on ties), the top [`LengthTier::fallback_sentence_budget`] are kept, and the
/// result is rendered as a bulleted list in ranked order. When nothing qualifies the text is
/// returned whole, so non-empty input never yields an empty summary.
pub fn build_extractive_summary(text: &str, tier: LengthTier) -> String {
    let mut candidates: Vec<(usize, String)> = split_sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let words = count_words(&sentence);
            (words >= MIN_SENTENCE_WORDS).then_some((words, sentence))
        })
        .collect();

    if candidates.is_empty() {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            text.to_string()
        } else {
            trimmed.to_string()
        };
    }

    // Stable sort keeps document order among equally long sentences.
    candidates.sort_by(|left, right| right.0.cmp(&left.0));
    candidates.truncate(tier.fallback_sentence_budget());

    candidates
        .into_iter()
        .map(|(_, sentence)| format!("- {sentence}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split on runs of `.`, `!` or `?` that end the text or precede whitespace.
///
/// Terminal punctuation stays with its sentence and internal whitespace is collapsed. A trailing
/// remainder without punctuation is kept as a final sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if !is_terminator(ch) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            current.push(next);
            chars.next();
        }
        let at_boundary = chars.peek().is_none_or(|next| next.is_whitespace());
        if at_boundary {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().any(char::is_alphanumeric) {
        sentences.push(normalized);
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
