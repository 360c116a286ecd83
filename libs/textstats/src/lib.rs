//! Word frequency statistics for Chinese web pages: visible text extraction,
//! segmentation restricted to Han tokens, counting and top-N selection.
mod extract;
mod frequency;
mod tokenizer;

pub use extract::{collapse_whitespace, extract_text};
pub use frequency::{
    clamp_min_freq, select_top, slider_bounds, FrequencyTable, TopWords, WordCount, TOP_N,
};
pub use tokenizer::{is_han_token, tokenize, JiebaSegmenter, Segmenter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub table: FrequencyTable,
    pub top_words: TopWords,
    /// Threshold actually applied, after clamping into `bounds`.
    pub min_freq: usize,
    pub bounds: (usize, usize),
}

/// Runs extraction, segmentation, counting and selection over one HTML document.
pub fn analyze(html: &str, min_freq: Option<usize>, segmenter: &dyn Segmenter) -> Analysis {
    let text = extract_text(html);
    let table = FrequencyTable::from_tokens(tokenize(&text, segmenter));
    let min_freq = clamp_min_freq(&table, min_freq.unwrap_or(1));
    let top_words = select_top(&table, min_freq, TOP_N);
    Analysis {
        bounds: slider_bounds(&table),
        table,
        top_words,
        min_freq,
    }
}
