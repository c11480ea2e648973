//! Trigger phrase detection
//!
//! A fixed list of phrases that usually mark an unverified claim: absolutes,
//! superlatives, "best practice" language and appeals to consensus. Matching is
//! case-insensitive, on word boundaries, in English and French. This is pattern
//! matching only; nothing here tries to understand the sentence.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Characters of context kept on each side of a match
pub const EXCERPT_RADIUS: usize = 30;

/// Kind of risky phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// "always", "never", "jamais"
    Absolute,
    /// "the best", "the fastest", "le plus rapide"
    Superlative,
    /// "best practice", "industry standard", "bonne pratique"
    BestPractice,
    /// "everyone knows", "tout le monde sait"
    Consensus,
}

impl TriggerCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Absolute => "absolute",
            TriggerCategory::Superlative => "superlative",
            TriggerCategory::BestPractice => "best_practice",
            TriggerCategory::Consensus => "consensus",
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(always|never|guaranteed|impossible|definitely|certainly|without exception|in all cases|toujours|jamais|garantie?s?|forcément|sans exception|à coup sûr|dans tous les cas)\b|\b100\s?%",
    )
    .unwrap()
});

static SUPERLATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(the (best|worst|fastest|slowest|safest|most (secure|efficient|reliable|performant))|the only (way|solution|option)|(le|la|les) (meilleure?s?|pire|plus (rapide|sûre?|sécurisée?|efficace|fiable)s?)|(le seul|la seule) (moyen|façon|solution|option))\b",
    )
    .unwrap()
});

static BEST_PRACTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(best practices?|industry standard|recommended approach|the right way|you should always|bonnes? pratiques?|meilleures? pratiques?|standard de l['’]industrie|la bonne façon|il faut toujours)\b",
    )
    .unwrap()
});

static CONSENSUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(everyone knows|everybody knows|everyone uses|nobody uses|it is well known|it's well known|widely accepted|experts agree|commonly accepted|tout le monde (sait|utilise)|personne n['’]utilise|il est bien connu|c['’]est bien connu|les experts s['’]accordent)\b",
    )
    .unwrap()
});

/// One trigger found in a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerMatch {
    /// Kind of phrasing
    pub category: TriggerCategory,
    /// Matched text, as written
    pub matched: String,
    /// Byte offset of the match in the scanned text
    pub offset: usize,
    /// Up to 30 characters either side of the match, trimmed
    pub excerpt: String,
}

/// Stateless trigger phrase scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerDetector;

impl TriggerDetector {
    /// Create a detector
    pub fn new() -> Self {
        Self
    }

    /// Every trigger in `text`, ordered by offset
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_gatekeeper::{TriggerCategory, TriggerDetector};
    ///
    /// let matches = TriggerDetector::new().scan("You should never store passwords in plain text");
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].category, TriggerCategory::Absolute);
    /// assert_eq!(matches[0].offset, 11);
    /// ```
    pub fn scan(&self, text: &str) -> Vec<TriggerMatch> {
        let patterns: [(TriggerCategory, &Regex); 4] = [
            (TriggerCategory::Absolute, &*ABSOLUTE_RE),
            (TriggerCategory::Superlative, &*SUPERLATIVE_RE),
            (TriggerCategory::BestPractice, &*BEST_PRACTICE_RE),
            (TriggerCategory::Consensus, &*CONSENSUS_RE),
        ];

        let mut matches: Vec<TriggerMatch> = patterns
            .iter()
            .flat_map(|(category, re)| {
                re.find_iter(text).map(move |m| TriggerMatch {
                    category: *category,
                    matched: m.as_str().to_string(),
                    offset: m.start(),
                    excerpt: excerpt(text, m.start(), m.end()),
                })
            })
            .collect();
        matches.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.category.cmp(&b.category)));
        matches
    }

    /// Check if the text contains any trigger at all
    pub fn contains_unverified_claim(&self, text: &str) -> bool {
        [&ABSOLUTE_RE, &SUPERLATIVE_RE, &BEST_PRACTICE_RE, &CONSENSUS_RE]
            .iter()
            .any(|re| re.is_match(text))
    }
}

fn excerpt(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(EXCERPT_RADIUS)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(EXCERPT_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].trim().to_string()
}
