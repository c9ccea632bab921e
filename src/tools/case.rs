//! Case conversion.
//!
//! The identifier styles (camel, pascal, snake, kebab) go through
//! `convert_case`; the prose styles keep punctuation and spacing intact,
//! so they are mapped by hand.

use convert_case::{Case, Casing};

/// Supported conversion modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    /// Swap the case of every letter. Applying it twice is the identity.
    Toggle,
}

/// Apply one conversion mode.
pub fn convert(input: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => input.to_uppercase(),
        CaseMode::Lower => input.to_lowercase(),
        CaseMode::Title => title_case(input),
        CaseMode::Sentence => sentence_case(input),
        CaseMode::Camel => input.to_case(Case::Camel),
        CaseMode::Pascal => input.to_case(Case::Pascal),
        CaseMode::Snake => input.to_case(Case::Snake),
        CaseMode::Kebab => input.to_case(Case::Kebab),
        CaseMode::Toggle => input
            .chars()
            .map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().next().unwrap_or(c)
                } else if c.is_lowercase() {
                    c.to_uppercase().next().unwrap_or(c)
                } else {
                    c
                }
            })
            .collect(),
    }
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

fn sentence_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_sentence_start = true;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if at_sentence_start {
                out.extend(c.to_uppercase());
                at_sentence_start = false;
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            if matches!(c, '.' | '!' | '?') {
                at_sentence_start = true;
            }
            out.push(c);
        }
    }

    out
}
