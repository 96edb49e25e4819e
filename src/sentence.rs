//! Tiny random sentence source for generated summaries.
//!
//! Sentences follow the shape `The <adjective> <noun> <verb> <adverb>.` and are
//! drawn from built-in word lists.

use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "ancient", "brave", "crimson", "daring", "eerie", "fearless", "gloomy", "hidden",
    "icy", "jagged", "keen", "lonely", "mighty", "nimble", "ominous", "proud", "quiet",
    "restless", "silent", "tireless", "uncanny", "vast", "wicked", "young", "zealous",
];

const NOUNS: &[&str] = &[
    "android", "bandit", "captain", "detective", "empress", "falcon", "guardian",
    "hero", "inventor", "jester", "knight", "librarian", "mutant", "ninja", "oracle",
    "pilot", "queen", "robot", "sorcerer", "titan", "vigilante", "warden", "wizard",
];

const VERBS: &[&str] = &[
    "argues", "battles", "charges", "dances", "escapes", "fights", "glows", "hides",
    "investigates", "jumps", "lingers", "marches", "negotiates", "plots", "races",
    "schemes", "travels", "vanishes", "wanders", "whispers", "yells",
];

const ADVERBS: &[&str] = &[
    "abruptly", "boldly", "calmly", "deliberately", "eagerly", "fiercely", "gracefully",
    "hastily", "loudly", "mysteriously", "nervously", "openly", "patiently", "quickly",
    "recklessly", "silently", "tirelessly", "urgently", "violently", "wisely",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Returns one capitalized sentence ending with a period.
pub fn random_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "The {} {} {} {}.",
        pick(rng, ADJECTIVES),
        pick(rng, NOUNS),
        pick(rng, VERBS),
        pick(rng, ADVERBS)
    )
}

/// Joins `count` random sentences with single spaces.
pub fn random_paragraph<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| random_sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}
