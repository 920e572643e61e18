//! # Love Compatibility Score
//!
//! An entertainment score for two names. Deterministic and not in any way
//! meaningful:
//!
//! 1. concatenate both names, lower-case, keep only letters a–z
//! 2. sum the character codes
//! 3. add `len(name1) * len(name2)` (trimmed character counts)
//! 4. take the total mod 101 and raise anything below 40 to 40
//!
//! The constants (101, 40) are product choices and must not change, or the
//! same two names would score differently than they used to.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::forms;

const MODULUS: u64 = 101;
const FLOOR: u64 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveScoreInput {
    pub name1: String,
    pub name2: String,
}

impl LoveScoreInput {
    pub fn new(name1: impl Into<String>, name2: impl Into<String>) -> Self {
        LoveScoreInput {
            name1: name1.into(),
            name2: name2.into(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        forms::require_text("name1", &self.name1)?;
        forms::require_text("name2", &self.name2)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveScoreResult {
    /// Score in 40..=100
    pub score: u8,
    pub message: String,
}

/// Raw score for two names. Always in 40..=100.
pub fn love_score(name1: &str, name2: &str) -> u8 {
    let name1 = name1.trim();
    let name2 = name2.trim();

    let combined = format!("{}{}", name1, name2).to_lowercase();
    // reduce each term mod 101 so arbitrarily long names cannot overflow
    let code_sum = combined
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .fold(0u64, |acc, c| (acc + u64::from(c as u32)) % MODULUS);
    let len1 = name1.chars().count() as u64 % MODULUS;
    let len2 = name2.chars().count() as u64 % MODULUS;

    let score = (code_sum + len1 * len2) % MODULUS;
    score.max(FLOOR) as u8
}

fn message_for(score: u8) -> &'static str {
    match score {
        90..=100 => "A match made in heaven!",
        75..=89 => "Great chemistry.",
        60..=74 => "Definitely worth a shot.",
        _ => "Friendship is a fine place to start.",
    }
}

pub fn calculate(input: &LoveScoreInput) -> CalcResult<LoveScoreResult> {
    input.validate()?;
    let score = love_score(&input.name1, &input.name2);
    Ok(LoveScoreResult {
        score,
        message: message_for(score).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_deterministic() {
        let a = love_score("Alex", "Taylor");
        let b = love_score("Alex", "Taylor");
        assert_eq!(a, b);
        assert!((40..=100).contains(&a));
    }

    #[test]
    fn test_known_scores() {
        // "alextaylor" sums to 1093, + 4*6 = 1117, mod 101 = 6, floored to 40
        assert_eq!(love_score("Alex", "Taylor"), 40);
        // "zoemax" sums to 660, + 3*3 = 669, mod 101 = 63
        assert_eq!(love_score("Zoe", "Max"), 63);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(love_score("ZOE", "max"), love_score("Zoe", "Max"));
        assert_eq!(love_score("  Zoe ", "Max"), love_score("Zoe", "Max"));
    }

    #[test]
    fn test_range_over_many_pairs() {
        let names = ["Al", "Bea", "Chandra", "Dmitri", "Eve", "Fatima", "Gus", "Hiro", "Ines", "J. R."];
        for a in names {
            for b in names {
                let s = love_score(a, b);
                assert!((40..=100).contains(&s), "{} + {} = {}", a, b, s);
            }
        }
    }

    #[test]
    fn test_long_names_do_not_overflow() {
        // (140_000 * 97 + 70_000 * 70_000) mod 101 = 94
        let name = "a".repeat(70_000);
        assert_eq!(love_score(&name, &name), 94);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = calculate(&LoveScoreInput::new("Alex", "  ")).unwrap_err();
        assert_eq!(err, CalcError::missing_field("name2"));
    }

    #[test]
    fn test_message() {
        let result = calculate(&LoveScoreInput::new("Zoe", "Max")).unwrap();
        assert_eq!(result.score, 63);
        assert_eq!(result.message, "Definitely worth a shot.");
    }
}
