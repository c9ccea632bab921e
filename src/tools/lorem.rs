//! Lorem ipsum filler text.

use rand::seq::SliceRandom;
use rand::thread_rng;
use rand::Rng;

const WORD_BANK: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// `n` random filler words, space separated.
pub fn words(n: usize) -> String {
    let mut rng = thread_rng();
    (0..n)
        .map(|_| *WORD_BANK.choose(&mut rng).unwrap_or(&"lorem"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `n` sentences of 8 to 14 words each.
pub fn sentences(n: usize) -> String {
    let mut rng = thread_rng();
    (0..n)
        .map(|_| {
            let length = rng.gen_range(8..=14);
            let mut sentence = words(length);
            if let Some(first) = sentence.get(0..1).map(str::to_uppercase) {
                sentence.replace_range(0..1, &first);
            }
            sentence.push('.');
            sentence
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `n` paragraphs of 3 to 5 sentences each, separated by blank lines.
pub fn paragraphs(n: usize) -> String {
    let mut rng = thread_rng();
    (0..n)
        .map(|_| sentences(rng.gen_range(3..=5)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
