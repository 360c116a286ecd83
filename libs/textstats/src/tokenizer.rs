use jieba_rs::Jieba;
use regex::Regex;

lazy_static::lazy_static! {
    static ref HAN_RGX: Regex = Regex::new(r"^[\x{4E00}-\x{9FFF}]+$").unwrap();
    static ref JIEBA: Jieba = Jieba::new();
}

/// Splits text into word-like tokens, in order of appearance.
pub trait Segmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Dictionary based Chinese segmentation with HMM discovery of unknown words.
///
/// The dictionary is loaded on first use and shared by every instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct JiebaSegmenter;

impl JiebaSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Forces the dictionary load so the first request doesn't pay for it.
    pub fn warm_up(&self) {
        lazy_static::initialize(&JIEBA);
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        JIEBA.cut(text, true)
    }
}

/// True when the token is one or more CJK Unified Ideographs and nothing else.
pub fn is_han_token(token: &str) -> bool {
    HAN_RGX.is_match(token)
}

pub fn tokenize<'a>(text: &'a str, segmenter: &dyn Segmenter) -> Vec<&'a str> {
    segmenter
        .segment(text)
        .into_iter()
        .filter(|token| is_han_token(token))
        .collect()
}
