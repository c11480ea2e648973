//! Pedagogy - the words the assistant uses
//!
//! Pure functions from an event and a profile snapshot to text. Nothing here
//! touches a store or the rating math. Messages stay curious: they ask how the
//! user knows something and never tell them they are mistaken.

use gadfly_domain::{ChallengeStyle, Outcome, ScaffoldLevel};

/// What the pedagogy layer sees of a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSnapshot<'a> {
    /// Domain name
    pub domain: &'a str,
    /// Current rating
    pub rating: f64,
    /// Current deviation
    pub rd: f64,
    /// Scaffolding for this rating
    pub scaffold_level: ScaffoldLevel,
    /// Challenge posture for this rating
    pub challenge_style: ChallengeStyle,
    /// No claim has been judged in the domain yet
    pub first_blood: bool,
    /// Rating sits where overconfidence is likeliest
    pub in_dead_zone: bool,
    /// Losing streak detected
    pub tilt_detected: bool,
    /// Ask rather than correct
    pub should_soft_challenge: bool,
}

/// Something that happened to a claim
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// A claim is about to be challenged
    Challenge,
    /// A challenged claim got its outcome
    Outcome {
        /// What happened
        outcome: Outcome,
        /// Rating change
        delta: f64,
        /// Label for a blocked claim at the pre-update rating
        blocked_label: &'a str,
    },
}

const TONE_GUIDANCE: &str = "Tone: curious and collaborative. Ask how they know; \
offer sources rather than verdicts; credit what holds up before probing what does not.";

/// Text for an event
pub fn render(event: Event<'_>, snapshot: &ProfileSnapshot<'_>) -> String {
    match event {
        Event::Challenge => instructions(snapshot),
        Event::Outcome {
            outcome,
            delta,
            blocked_label,
        } => feedback(outcome, delta, blocked_label, snapshot),
    }
}

/// Instruction bundle for challenging a claim in this domain
pub fn instructions(snapshot: &ProfileSnapshot<'_>) -> String {
    let mut text = String::new();

    text.push_str(&format!(
        "Domain: {} (rating {:.0}, uncertainty ±{:.0})\n",
        snapshot.domain, snapshot.rating, snapshot.rd
    ));
    text.push_str(&format!(
        "Style: {}. {}\n",
        snapshot.challenge_style.as_str(),
        style_guidance(snapshot.challenge_style)
    ));

    text.push_str(&format!("Scaffolding ({}):\n", snapshot.scaffold_level.as_str()));
    for prompt in snapshot.scaffold_level.prompts() {
        text.push_str(&format!("- {}\n", prompt));
    }

    if snapshot.first_blood {
        text.push_str(
            "First claim in this domain: ask for its source whatever the rating says.\n",
        );
    }
    if snapshot.in_dead_zone {
        text.push_str(
            "Middle of the scale: confidence often runs ahead of knowledge here, \
so ask for the source even when the claim sounds right.\n",
        );
    }
    if snapshot.tilt_detected {
        text.push_str(
            "Several claims in a row needed more support: lower the pressure, \
acknowledge the effort, and work through one claim together.\n",
        );
    }
    if snapshot.should_soft_challenge {
        text.push_str("Challenge softly: ask questions instead of stating corrections.\n");
    }

    text.push_str(TONE_GUIDANCE);
    text
}

fn style_guidance(style: ChallengeStyle) -> &'static str {
    match style {
        ChallengeStyle::Guide => "Teach first, then ask them to restate the idea in their own words",
        ChallengeStyle::Standard => "Ask for the evidence behind each claim",
        ChallengeStyle::Peer => "Discuss as equals: compare sources and trade counter-examples",
        ChallengeStyle::Learner => {
            "They likely know more here: ask them to teach you, then probe the edges"
        }
    }
}

/// Message shown after an outcome is recorded
pub fn feedback(
    outcome: Outcome,
    delta: f64,
    blocked_label: &str,
    snapshot: &ProfileSnapshot<'_>,
) -> String {
    let mut text = match outcome {
        Outcome::Validated => format!(
            "That holds up. {} rating now {:.0} ({:+.1}).",
            snapshot.domain, snapshot.rating, delta
        ),
        Outcome::Partial => format!(
            "Part of that checks out. Which piece would you like to firm up? {} rating now {:.0} ({:+.1}).",
            snapshot.domain, snapshot.rating, delta
        ),
        Outcome::Blocked => format!(
            "{}. What led you there, and what would change your mind? {} rating now {:.0} ({:+.1}).",
            blocked_label, snapshot.domain, snapshot.rating, delta
        ),
    };

    if snapshot.tilt_detected {
        text.push(' ');
        text.push_str(&tilt_message(snapshot.domain));
    }
    text
}

/// Note shown when a losing streak is detected
pub fn tilt_message(domain: &str) -> String {
    format!(
        "A few {} claims in a row have needed more support. Want to slow down and dig into one of them together?",
        domain
    )
}

/// Note shown before the first claim of a domain is judged
pub fn first_blood_message(domain: &str) -> String {
    format!(
        "First claim in {}: every first claim gets a question, so let's look at where it comes from.",
        domain
    )
}
