use std::collections::HashMap;

/// Number of words kept after thresholding.
pub const TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Token counts in the order each token was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().fold(Self::default(), |mut table, token| {
            table.add(token);
            table
        })
    }

    pub fn add(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.positions.insert(token.to_owned(), self.entries.len());
                self.entries.push(WordCount {
                    word: token.to_owned(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.positions.get(token).map(|&idx| self.entries[idx].count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn max_count(&self) -> Option<usize> {
        self.entries.iter().map(|e| e.count).max()
    }
}

/// The highest counts remaining after thresholding, at most `TOP_N` long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopWords(Vec<WordCount>);

impl TopWords {
    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&WordCount> {
        self.0.first()
    }

    pub fn max_count(&self) -> Option<usize> {
        self.0.iter().map(|e| e.count).max()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.word.as_str()).collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.0.iter().map(|e| e.count).collect()
    }
}

impl From<Vec<WordCount>> for TopWords {
    fn from(mut words: Vec<WordCount>) -> Self {
        words.sort_by(|a, b| b.count.cmp(&a.count));
        words.truncate(TOP_N);
        Self(words)
    }
}

/// Drops entries below `min_freq` and keeps the `n` highest counts.
///
/// The sort is stable, so equal counts stay in first-seen order.
pub fn select_top(table: &FrequencyTable, min_freq: usize, n: usize) -> TopWords {
    let kept = table
        .iter()
        .filter(|e| e.count >= min_freq)
        .cloned()
        .collect::<Vec<WordCount>>();
    let mut top = TopWords::from(kept);
    top.0.truncate(n);
    top
}

/// Inclusive range offered for `min_freq`. An empty table still gets `(1, 1)`.
pub fn slider_bounds(table: &FrequencyTable) -> (usize, usize) {
    (1, table.max_count().unwrap_or(1).max(1))
}

pub fn clamp_min_freq(table: &FrequencyTable, requested: usize) -> usize {
    let (low, high) = slider_bounds(table);
    requested.clamp(low, high)
}
