//! Text generation: open-ended guidance, reasoning and follow-ups.

use crate::domain::analysis::TimeOfDay;
use crate::domain::foundation::Confidence;

use super::{DecisionSignals, RandomSource};

const GUIDANCE_TEMPLATES: &[&str] = &[
    "Focus on {focus} with a {approach} approach, and let {factor} guide you toward {action}.",
    "Today favours {action}: start with {focus} and keep {factor} in view.",
    "Take a {approach} approach to {focus}; {factor} matters most, so lean toward {action}.",
    "Your best next move is {action}, centred on {focus}, with {factor} as the deciding factor.",
];

const FOCUS_AREAS: &[&str] = &[
    "your long-term goals",
    "the most pressing task in front of you",
    "your relationships",
    "your health and energy",
    "learning something new",
];

const APPROACHES: &[&str] = &[
    "step-by-step",
    "bold",
    "collaborative",
    "reflective",
    "experimental",
];

const KEY_FACTORS: &[&str] = &[
    "your core values",
    "timing",
    "the resources you already have",
    "your intuition",
    "the people affected",
];

const ACTION_TYPES: &[&str] = &[
    "a small first step",
    "gathering input from someone you trust",
    "committing to a clear plan",
    "simplifying what is on your plate",
    "taking a calculated risk",
];

const GENERIC_REASONING: &str =
    "This recommendation balances the timing of your question, its tone and your past preferences.";

/// Follow-up always offered last.
pub const REVISIT_SUGGESTION: &str = "Revisit this decision in 24-48 hours to see if it still feels right.";
pub const GATHER_INFORMATION_SUGGESTION: &str =
    "Gather more information about the options before committing.";
pub const SET_TIMEFRAME_SUGGESTION: &str = "Set a clear timeframe for making this decision.";
pub const REFLECTION_SUGGESTION: &str =
    "Take a moment to reflect on what is worrying you about this choice.";

/// Uniformly picks a template and fills each slot with a uniformly picked phrase.
pub fn open_ended_guidance(rng: &dyn RandomSource) -> String {
    let template = pick(GUIDANCE_TEMPLATES, rng);
    template
        .replace("{focus}", pick(FOCUS_AREAS, rng))
        .replace("{approach}", pick(APPROACHES, rng))
        .replace("{factor}", pick(KEY_FACTORS, rng))
        .replace("{action}", pick(ACTION_TYPES, rng))
}

/// Assembles reasoning from the conditions that hold; deterministic.
pub fn generate_reasoning(signals: &DecisionSignals, confidence: Confidence) -> String {
    let mut sentences: Vec<&str> = Vec::new();

    match signals.temporal.time_of_day {
        TimeOfDay::Morning => sentences
            .push("Morning hours tend to bring clearer thinking, which supports a decisive choice."),
        TimeOfDay::Night => sentences.push(
            "Late-night decisions can be clouded by fatigue, so weigh this again after some rest.",
        ),
        TimeOfDay::Afternoon | TimeOfDay::Evening => {}
    }

    let polarity = signals.sentiment.polarity;
    if polarity > 0.2 {
        sentences.push("The positive framing of your question suggests you already see an opportunity here.");
    } else if polarity < -0.2 {
        sentences.push("Your question carries some concern, so the recommendation favours a measured path.");
    }

    if confidence.value() >= 0.7 {
        sentences.push("Several factors align strongly behind this recommendation.");
    } else if confidence.value() < 0.4 {
        sentences.push("The factors are closely balanced, so either path is reasonable.");
    }

    if signals.pattern.recommendation_strength > 0.5 {
        sentences.push("You have asked similar questions before, and that history shaped this result.");
    }

    if sentences.is_empty() {
        return GENERIC_REASONING.to_string();
    }
    sentences.join(" ")
}

pub fn generate_follow_ups(confidence: Confidence, polarity: f64) -> Vec<String> {
    let mut suggestions = Vec::new();

    if confidence.value() < 0.6 {
        suggestions.push(GATHER_INFORMATION_SUGGESTION.to_string());
        suggestions.push(SET_TIMEFRAME_SUGGESTION.to_string());
    }
    if polarity < 0.0 {
        suggestions.push(REFLECTION_SUGGESTION.to_string());
    }
    suggestions.push(REVISIT_SUGGESTION.to_string());

    suggestions
}

fn pick<'a>(items: &[&'a str], rng: &dyn RandomSource) -> &'a str {
    items[rng.pick_index(items.len())]
}
