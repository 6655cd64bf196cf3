//! Recognises make, model and year in free-form marketplace listing titles using a
//! generated make-model index.

use crate::domain::model::{MakeModelIndex, TitleMatch};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_THRESHOLD: f64 = 0.4;

const EARLIEST_YEAR: i32 = 1900;

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(?:\d{4}|'?\d{2})\b").expect("year pattern compiles"))
}

/// Levenshtein distance counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `[0, 1]`; two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Lowercases and drops everything outside `[a-z0-9]`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Picks the model a run of title words refers to.
///
/// A word that normalizes to exactly one model wins outright. Otherwise the word is joined
/// with the next one ("model 3" -> "model3") and the closest model is taken if it scores at
/// least `threshold`.
pub fn best_model_match<S: AsRef<str>>(
    models: &[String],
    words: &[S],
    threshold: f64,
) -> Option<String> {
    let normalized: Vec<String> = models.iter().map(|m| normalize(m)).collect();

    for (i, word) in words.iter().enumerate() {
        let word = word.as_ref();
        if word.is_empty() {
            continue;
        }
        let w1 = normalize(word);

        let mut exact = normalized
            .iter()
            .enumerate()
            .filter(|(_, nm)| **nm == w1)
            .map(|(idx, _)| idx);
        if let (Some(idx), None) = (exact.next(), exact.next()) {
            return Some(models[idx].clone());
        }

        let Some(next) = words.get(i + 1).map(|w| w.as_ref()) else {
            continue;
        };
        if next.is_empty() {
            continue;
        }
        let phrase = format!("{}{}", w1, normalize(next));

        let mut best: Option<(usize, f64)> = None;
        for (idx, nm) in normalized.iter().enumerate() {
            let score = similarity(&phrase, nm);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }
        if let Some((idx, score)) = best {
            if score >= threshold {
                return Some(models[idx].clone());
            }
        }
    }

    None
}

pub struct TitleResolver<'a> {
    index: &'a MakeModelIndex,
    threshold: f64,
    current_year: i32,
}

impl<'a> TitleResolver<'a> {
    pub fn new(index: &'a MakeModelIndex, current_year: i32) -> Self {
        Self {
            index,
            threshold: DEFAULT_THRESHOLD,
            current_year,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn resolve(&self, title: &str) -> TitleMatch {
        let mut result = TitleMatch {
            title: title.to_string(),
            ..Default::default()
        };

        let lowered = title.trim().to_lowercase();
        let mut words: Vec<String> = lowered.split(' ').map(str::to_string).collect();
        let mut models: Option<&Vec<String>> = None;

        for i in 0..words.len() {
            if let Some(year) = self.parse_year(&words[i]) {
                result.year = Some(year);
                words[i].clear();
                continue;
            }

            if models.is_none() {
                if let Some((make, list)) = self.find_make(&words[i]) {
                    tracing::debug!("Title word '{}' resolved to make '{}'", words[i], make);
                    result.make = Some(make.clone());
                    models = Some(list);
                    words[i].clear();
                }
            }
        }

        if let (Some(_), Some(models)) = (result.year, models) {
            result.model = best_model_match(models, &words, self.threshold);
        }

        result
    }

    fn parse_year(&self, word: &str) -> Option<i32> {
        let found = year_pattern().find(word)?;
        // two-digit forms match the pattern but fall outside the accepted range
        let year: i32 = found.as_str().parse().ok()?;
        (EARLIEST_YEAR..=self.current_year + 1)
            .contains(&year)
            .then_some(year)
    }

    fn find_make(&self, word: &str) -> Option<(&'a String, &'a Vec<String>)> {
        let first = word.chars().next()?;

        if let Some(found) = self
            .index
            .iter()
            .find(|(make, _)| make.to_lowercase() == word)
        {
            return Some(found);
        }

        self.index.iter().find(|(make, _)| {
            let make = make.to_lowercase();
            make.starts_with(first) && similarity(&make, word) > self.threshold
        })
    }
}

/// Resolves one title against the index with the default threshold.
pub fn resolve_title(index: &MakeModelIndex, title: &str, current_year: i32) -> TitleMatch {
    TitleResolver::new(index, current_year).resolve(title)
}
