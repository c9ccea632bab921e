//! Password generation.
//!
//! Draws from the operating system's CSPRNG. Each selected character class
//! is guaranteed at least one character so a generated password always
//! satisfies the classes the user asked for.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Error;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.<>?";

/// Length and character-class pool for one password.
#[derive(Debug, Clone, Copy)]
pub struct PasswordSpec {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordSpec {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: false,
        }
    }
}

impl PasswordSpec {
    fn classes(&self) -> Vec<&'static [u8]> {
        let mut classes = Vec::new();
        if self.lowercase {
            classes.push(LOWERCASE);
        }
        if self.uppercase {
            classes.push(UPPERCASE);
        }
        if self.digits {
            classes.push(DIGITS);
        }
        if self.symbols {
            classes.push(SYMBOLS);
        }
        classes
    }
}

/// Generate a password matching the spec.
pub fn generate(spec: &PasswordSpec) -> Result<String, Error> {
    let classes = spec.classes();
    if classes.is_empty() {
        return Err(Error::tool("select at least one character class"));
    }
    if spec.length < classes.len() {
        return Err(Error::tool(format!(
            "length {} cannot cover {} character classes",
            spec.length,
            classes.len()
        )));
    }

    let pool: Vec<u8> = classes.concat();
    let mut chars = Vec::with_capacity(spec.length);

    // One guaranteed character per selected class, the rest from the pool.
    for class in &classes {
        chars.push(class[OsRng.gen_range(0..class.len())]);
    }
    while chars.len() < spec.length {
        chars.push(pool[OsRng.gen_range(0..pool.len())]);
    }

    chars.shuffle(&mut OsRng);

    Ok(chars.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_length_and_classes() {
        let spec = PasswordSpec {
            length: 24,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        };

        let password = generate(&spec).unwrap();

        assert_eq!(password.len(), 24);
        assert!(password.bytes().any(|b| LOWERCASE.contains(&b)));
        assert!(password.bytes().any(|b| UPPERCASE.contains(&b)));
        assert!(password.bytes().any(|b| DIGITS.contains(&b)));
        assert!(password.bytes().any(|b| SYMBOLS.contains(&b)));
    }

    #[test]
    fn single_class_stays_in_class() {
        let spec = PasswordSpec {
            length: 12,
            lowercase: false,
            uppercase: false,
            digits: true,
            symbols: false,
        };

        let password = generate(&spec).unwrap();
        assert!(password.bytes().all(|b| DIGITS.contains(&b)));
    }

    #[test]
    fn rejects_empty_pool_and_short_length() {
        let no_classes = PasswordSpec {
            length: 10,
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
        };
        assert!(generate(&no_classes).is_err());

        let too_short = PasswordSpec {
            length: 2,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: false,
        };
        assert!(generate(&too_short).is_err());
    }
}
