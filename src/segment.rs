//! Text segmentation: splits long-form input into slide-sized chunks.
//!
//! The segmenter works paragraph-first: paragraphs already under the word
//! limit pass through verbatim, oversized paragraphs are re-packed sentence by
//! sentence. Word counting is naive whitespace splitting; a single sentence
//! longer than the limit is emitted whole rather than truncated. The function
//! is total over arbitrary input and never panics.

use regex::Regex;

/// Tuning knobs for [`segment`].
///
/// Limits and delimiters are configuration, not constants: different call
/// sites use different word budgets (25-50) and slightly different paragraph
/// boundary patterns.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Soft upper bound on words per emitted chunk
    pub max_words_per_chunk: usize,
    /// Minimum buffered words before an overflow may flush (0 = flush eagerly)
    pub min_words_per_chunk: usize,
    /// Paragraph boundary pattern applied before sentence packing
    pub paragraph_break: Regex,
    /// Characters treated as sentence terminators (runs collapse)
    pub sentence_delimiters: Vec<char>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_words_per_chunk: 50,
            min_words_per_chunk: 0,
            paragraph_break: Regex::new(r"\n\s*\n|\n").unwrap(),
            sentence_delimiters: vec!['.', '!', '?'],
        }
    }
}

impl SegmentOptions {
    /// Options with a custom word budget and default delimiters
    pub fn with_max_words(max_words_per_chunk: usize) -> Self {
        Self {
            max_words_per_chunk,
            ..Self::default()
        }
    }

    /// Tuning used by the carousel generator (30 words per slide)
    pub fn carousel() -> Self {
        Self::with_max_words(30)
    }

    /// Legacy slide-splitter tuning: 35 words per slide, but never flush a
    /// buffer holding fewer than 15 words.
    pub fn slides() -> Self {
        Self {
            max_words_per_chunk: 35,
            min_words_per_chunk: 15,
            ..Self::default()
        }
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Split `text` into an ordered sequence of chunk contents.
///
/// Every emitted chunk is non-empty after trimming. Whitespace-only input
/// yields an empty Vec; callers must guard against rendering an empty
/// sequence. Sentence fragments are re-joined with `". "`, so terminator
/// characters from the input are not preserved verbatim.
pub fn segment(text: &str, opts: &SegmentOptions) -> Vec<String> {
    let mut chunks = Vec::new();

    for paragraph in opts.paragraph_break.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if word_count(paragraph) <= opts.max_words_per_chunk {
            // Trailing terminator runs are dropped so that pass-through
            // paragraphs and sentence-packed chunks read the same way.
            let paragraph = paragraph
                .trim_end_matches(|c: char| opts.sentence_delimiters.contains(&c))
                .trim_end();
            if !paragraph.is_empty() {
                chunks.push(paragraph.to_string());
            }
            continue;
        }

        let sentences = paragraph
            .split(|c: char| opts.sentence_delimiters.contains(&c))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut buffer = String::new();
        let mut buffered_words = 0usize;

        for sentence in sentences {
            let words = word_count(sentence);
            let would_overflow = buffered_words + words > opts.max_words_per_chunk;

            if would_overflow && !buffer.is_empty() && buffered_words >= opts.min_words_per_chunk {
                chunks.push(std::mem::take(&mut buffer));
                buffered_words = 0;
            }

            if !buffer.is_empty() {
                buffer.push_str(". ");
            }
            buffer.push_str(sentence);
            buffered_words += words;
        }

        if !buffer.trim().is_empty() {
            chunks.push(buffer);
        }
    }

    chunks
}
