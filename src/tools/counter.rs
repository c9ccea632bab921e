//! Word and character counting.

/// Counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    pub words: usize,
    pub characters: usize,
    pub characters_no_whitespace: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

/// Count words, characters, sentences and paragraphs.
///
/// Words split on whitespace; sentences on `.`/`!`/`?` runs; paragraphs on
/// blank lines. An empty input yields all zeros.
pub fn count(text: &str) -> TextCounts {
    TextCounts {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        characters_no_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
        sentences: text
            .split(['.', '!', '?'])
            .filter(|part| part.trim().chars().any(|c| c.is_alphanumeric()))
            .count(),
        paragraphs: text
            .split("\n\n")
            .filter(|part| !part.trim().is_empty())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zeros() {
        assert_eq!(count(""), TextCounts::default());
    }

    #[test]
    fn hello_world() {
        let counts = count("Hello world.");
        assert_eq!(counts.words, 2);
        assert_eq!(counts.sentences, 1);
        assert_eq!(counts.characters, 12);
        assert_eq!(counts.characters_no_whitespace, 11);
        assert_eq!(counts.paragraphs, 1);
    }

    #[test]
    fn multiple_sentences_and_paragraphs() {
        let text = "One. Two! Three?\n\nFour.";
        let counts = count(text);
        assert_eq!(counts.sentences, 4);
        assert_eq!(counts.paragraphs, 2);
        assert_eq!(counts.words, 4);
    }

    #[test]
    fn whitespace_only_counts_nothing() {
        let counts = count("   \n\n   ");
        assert_eq!(counts.words, 0);
        assert_eq!(counts.sentences, 0);
        assert_eq!(counts.paragraphs, 0);
    }
}
