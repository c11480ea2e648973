//! Domain profiles - one measured competence record per topic domain

use crate::history::BoundedHistory;
use crate::rating::{clamp_rating, clamp_rd, decay_rd, Outcome, MAX_RD, MIN_RATING};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome records kept per domain
pub const HISTORY_CAPACITY: usize = 50;

/// Longest excerpt stored with an outcome record (in characters)
pub const EXCERPT_MAX_CHARS: usize = 120;

/// Number of recent records the trend looks at
pub const TREND_WINDOW: usize = 5;

/// Net delta beyond which the trend is no longer stable
pub const TREND_THRESHOLD: f64 = 5.0;

/// One entry in a profile's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// When the outcome was recorded
    pub date: DateTime<Utc>,
    /// What happened to the claim
    pub result: Outcome,
    /// Rating change it caused
    pub delta: f64,
    /// Why the claim was blocked, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
    /// Short excerpt of the claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Everything needed to apply one outcome to a profile
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRecord {
    /// Rating change
    pub delta: f64,
    /// Rating after the change
    pub new_rating: f64,
    /// Deviation after the change
    pub new_rd: f64,
    /// Label explaining a block
    pub blocked_reason: Option<String>,
    /// Excerpt of the claim
    pub excerpt: Option<String>,
}

/// Measured competence in one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    /// Rating in [0, 1000]
    pub rating: f64,
    /// Rating deviation in [10, 200]
    pub rd: f64,
    /// Most recent outcomes, oldest first
    #[serde(default)]
    pub history: BoundedHistory<OutcomeRecord, HISTORY_CAPACITY>,
    /// Consecutive blocked outcomes
    #[serde(default)]
    pub blocked_streak: u32,
    /// Consecutive non-blocked outcomes
    #[serde(default)]
    pub consecutive_correct: u32,
    /// Set once the first claim in this domain has been judged
    #[serde(default)]
    pub first_claim_made: bool,
    /// Sessions in which this domain was active
    #[serde(default)]
    pub session_count: u32,
    /// Last time an outcome was recorded
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
    /// Rating the user declared for themselves
    #[serde(default)]
    pub provisional_rating: Option<f64>,
    /// Last time idle decay was applied
    #[serde(default)]
    pub last_decayed: Option<DateTime<Utc>>,
}

impl Default for DomainProfile {
    /// Zero-trust default: rating 0 at maximum uncertainty
    fn default() -> Self {
        Self {
            rating: MIN_RATING,
            rd: MAX_RD,
            history: BoundedHistory::new(),
            blocked_streak: 0,
            consecutive_correct: 0,
            first_claim_made: false,
            session_count: 0,
            last_active: None,
            provisional_rating: None,
            last_decayed: None,
        }
    }
}

impl DomainProfile {
    /// Apply an outcome that has already been run through the rating update
    pub fn apply_result(&mut self, outcome: Outcome, record: ResultRecord, now: DateTime<Utc>) {
        self.rating = clamp_rating(record.new_rating);
        self.rd = clamp_rd(record.new_rd);

        if outcome == Outcome::Blocked {
            self.blocked_streak += 1;
            self.consecutive_correct = 0;
        } else {
            self.consecutive_correct += 1;
            self.blocked_streak = 0;
        }
        self.first_claim_made = true;

        self.history.push(OutcomeRecord {
            date: now,
            result: outcome,
            delta: record.delta,
            blocked_reason: record.blocked_reason,
            excerpt: record.excerpt.map(|e| truncate_excerpt(&e)),
        });
        self.last_active = Some(now);
    }

    /// Record a self-declared rating
    ///
    /// The rating moves, but uncertainty goes back to its maximum: the user has
    /// told us what they know, they have not shown it yet.
    pub fn set_provisional(&mut self, rating: f64) {
        let rating = clamp_rating(rating);
        self.rating = rating;
        self.rd = MAX_RD;
        self.provisional_rating = Some(rating);
    }

    /// Grow the deviation for the idle time not yet decayed
    ///
    /// Idle time runs from the later of `last_active` and `last_decayed`, so
    /// repeated sweeps never count the same day twice. Returns true if the
    /// deviation changed.
    pub fn decay_idle(&mut self, now: DateTime<Utc>) -> bool {
        let Some(last_active) = self.last_active else {
            return false;
        };
        let since = self.last_decayed.map_or(last_active, |d| d.max(last_active));
        let days = (now - since).num_seconds() as f64 / 86_400.0;
        let decayed = clamp_rd(decay_rd(self.rd, days));
        if decayed == self.rd {
            return false;
        }
        self.rd = decayed;
        self.last_decayed = Some(now);
        true
    }

    /// Check if any outcome has ever been recorded
    pub fn is_active(&self) -> bool {
        self.last_active.is_some()
    }

    /// Direction of the last few outcomes
    pub fn trend(&self) -> Trend {
        let net: f64 = self.history.latest(TREND_WINDOW).map(|r| r.delta).sum();
        if net > TREND_THRESHOLD {
            Trend::Up
        } else if net < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Check if the user is on a losing streak
    pub fn is_tilted(&self, threshold: u32) -> bool {
        self.blocked_streak >= threshold
    }
}

fn truncate_excerpt(excerpt: &str) -> String {
    match excerpt.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}…", &excerpt[..cut]),
        None => excerpt.to_string(),
    }
}

/// Direction of recent rating changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Net gain above the threshold
    Up,
    /// Net loss beyond the threshold
    Down,
    /// Neither
    Stable,
}

impl Trend {
    /// Get the trend name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

/// Summary row for one domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSummary {
    /// Domain name
    pub domain: String,
    /// Current rating
    pub rating: f64,
    /// Current deviation
    pub rd: f64,
    /// Recent direction
    pub trend: Trend,
    /// Outcomes on record
    pub claims: usize,
    /// Sessions counted
    pub session_count: u32,
    /// Last activity
    pub last_active: Option<DateTime<Utc>>,
}

/// All profiles, keyed by domain name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileBook {
    domains: BTreeMap<String, DomainProfile>,
}

impl ProfileBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a profile, creating the zero-trust default if it does not exist
    ///
    /// The flag is true when the profile was created by this call.
    pub fn get_or_create(&mut self, domain: &str) -> (&mut DomainProfile, bool) {
        let created = !self.domains.contains_key(domain);
        let profile = self.domains.entry(domain.to_string()).or_default();
        (profile, created)
    }

    /// Get a profile without creating it
    pub fn get(&self, domain: &str) -> Option<&DomainProfile> {
        self.domains.get(domain)
    }

    /// Mutable access to a profile without creating it
    pub fn get_mut(&mut self, domain: &str) -> Option<&mut DomainProfile> {
        self.domains.get_mut(domain)
    }

    /// Iterate over all profiles in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainProfile)> {
        self.domains.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Mutable iteration over all profiles
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut DomainProfile)> {
        self.domains.iter_mut().map(|(name, p)| (name.as_str(), p))
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if the book is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Bump the session count of every active domain, returning how many moved
    pub fn increment_sessions(&mut self) -> usize {
        let mut bumped = 0;
        for profile in self.domains.values_mut().filter(|p| p.is_active()) {
            profile.session_count += 1;
            bumped += 1;
        }
        bumped
    }

    /// Summaries sorted most recently active first, never-active last
    pub fn summary(&self) -> Vec<DomainSummary> {
        let mut rows: Vec<DomainSummary> = self
            .domains
            .iter()
            .map(|(name, p)| DomainSummary {
                domain: name.clone(),
                rating: p.rating,
                rd: p.rd,
                trend: p.trend(),
                claims: p.history.len(),
                session_count: p.session_count,
                last_active: p.last_active,
            })
            .collect();
        rows.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        rows
    }
}
