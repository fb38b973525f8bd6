//! Dice notation and rolling.
//!
//! Parses `NdS[+-M]` expressions such as `1d20`, `2d6+1` or `3d4-2` and rolls
//! them. The same notation is used by the `damage` fields of seeded monsters
//! and weapons.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Most dice rolled at once.
pub const MAX_DICE: u32 = 100;

/// Most sides on one die.
pub const MAX_SIDES: u32 = 100;

/// Largest modifier magnitude.
pub const MAX_MODIFIER: i32 = 100;

/// `NdS` with an optional signed modifier.
#[allow(clippy::unwrap_used)]
static DICE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[dD](\d+)([+-]\d+)?$").unwrap());

/// Errors from parsing or rolling dice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Empty or Non-String Dice Command")]
    Empty,

    #[error("Invalid Dice Command: {0}")]
    Invalid(String),

    #[error("Number of dice must be > 0")]
    NoDice,

    #[error("I will not roll more than {} dice!", MAX_DICE)]
    TooManyDice,

    #[error("Number of sides must be > 1")]
    TooFewSides,

    #[error("I will not roll more than {} sides!", MAX_SIDES)]
    TooManySides,

    #[error("I will not add a modifier of more than +/-{}!", MAX_MODIFIER)]
    ModifierOutOfRange,
}

/// A dice expression within the rolling limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dice {
    num: u32,
    sides: u32,
    modifier: i32,
}

impl Dice {
    /// Creates a dice expression, enforcing the rolling limits.
    pub fn new(num: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if num < 1 {
            return Err(DiceError::NoDice);
        }
        if num > MAX_DICE {
            return Err(DiceError::TooManyDice);
        }
        if sides < 2 {
            return Err(DiceError::TooFewSides);
        }
        if sides > MAX_SIDES {
            return Err(DiceError::TooManySides);
        }
        if !(-MAX_MODIFIER..=MAX_MODIFIER).contains(&modifier) {
            return Err(DiceError::ModifierOutOfRange);
        }

        Ok(Self {
            num,
            sides,
            modifier,
        })
    }

    /// Parses `NdS[+-M]` notation.
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        if text.is_empty() {
            return Err(DiceError::Empty);
        }

        let invalid = || DiceError::Invalid(text.to_string());
        let caps = DICE_REGEX.captures(text).ok_or_else(invalid)?;

        // Digits that overflow the field type are as unusable as bad syntax.
        let num = caps[1].parse().map_err(|_| invalid())?;
        let sides = caps[2].parse().map_err(|_| invalid())?;
        let modifier = match caps.get(3) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };

        Self::new(num, sides, modifier)
    }

    /// Number of dice.
    #[must_use]
    pub fn num(&self) -> u32 {
        self.num
    }

    /// Sides per die.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Modifier added to the sum.
    #[must_use]
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Rolls every die and applies the modifier.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> DiceRoll {
        let rolls: Vec<u32> = (0..self.num)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect();
        // Bounded by MAX_DICE * MAX_SIDES, well inside i32.
        let pure = rolls.iter().map(|&r| r as i32).sum::<i32>();

        DiceRoll {
            dice: *self,
            total: pure + self.modifier,
            pure,
            rolls,
        }
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.num, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// Outcome of one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRoll {
    /// What was rolled.
    pub dice: Dice,
    /// Sum of the dice plus the modifier.
    pub total: i32,
    /// Sum of the dice alone.
    pub pure: i32,
    /// Individual die results in roll order.
    pub rolls: Vec<u32>,
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rolls: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(
            f,
            "{}: {} (Pure: {} [{}])",
            self.dice,
            self.total,
            self.pure,
            rolls.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Test parsing with and without a modifier.
    #[test]
    fn test_parse_notation() {
        let plain = Dice::parse("2d6").unwrap();
        assert_eq!((plain.num(), plain.sides(), plain.modifier()), (2, 6, 0));

        let plus = Dice::parse("1d20+5").unwrap();
        assert_eq!(plus.modifier(), 5);

        let minus: Dice = "3d4-2".parse().unwrap();
        assert_eq!((minus.num(), minus.sides(), minus.modifier()), (3, 4, -2));
    }

    /// Test that malformed notation is rejected with the offending text.
    #[test]
    fn test_parse_invalid() {
        assert_eq!(Dice::parse(""), Err(DiceError::Empty));
        for bad in ["d6", "2d", "2x6", "2d6+", " 2d6", "2d6 +1", "99999999999d6"] {
            assert_eq!(
                Dice::parse(bad),
                Err(DiceError::Invalid(bad.to_string())),
                "accepted {:?}",
                bad
            );
        }
        assert_eq!(
            DiceError::Invalid("foo".to_string()).to_string(),
            "Invalid Dice Command: foo"
        );
    }

    /// Test the rolling limits.
    #[test]
    fn test_limits() {
        assert_eq!(Dice::parse("0d6"), Err(DiceError::NoDice));
        assert_eq!(Dice::parse("101d6"), Err(DiceError::TooManyDice));
        assert_eq!(Dice::parse("1d1"), Err(DiceError::TooFewSides));
        assert_eq!(Dice::parse("1d101"), Err(DiceError::TooManySides));
        assert_eq!(Dice::parse("1d6+101"), Err(DiceError::ModifierOutOfRange));
        assert_eq!(Dice::parse("1d6-101"), Err(DiceError::ModifierOutOfRange));
        assert!(Dice::parse("100d100-100").is_ok());

        assert_eq!(
            DiceError::TooManyDice.to_string(),
            "I will not roll more than 100 dice!"
        );
    }

    /// Test that every die lands in range and the totals add up.
    #[test]
    fn test_roll_totals() {
        let dice = Dice::parse("10d6-3").unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let roll = dice.roll(&mut rng);
            assert_eq!(roll.rolls.len(), 10);
            assert!(roll.rolls.iter().all(|r| (1..=6).contains(r)));
            assert_eq!(roll.pure, roll.rolls.iter().map(|&r| r as i32).sum::<i32>());
            assert_eq!(roll.total, roll.pure - 3);
        }
    }

    /// Test the display forms of dice and rolls.
    #[test]
    fn test_display() {
        assert_eq!(Dice::parse("2d6").unwrap().to_string(), "2d6");
        assert_eq!(Dice::parse("2d6+1").unwrap().to_string(), "2d6+1");
        assert_eq!(Dice::parse("2d6-1").unwrap().to_string(), "2d6-1");

        let roll = DiceRoll {
            dice: Dice::parse("2d6+1").unwrap(),
            total: 8,
            pure: 7,
            rolls: vec![3, 4],
        };
        assert_eq!(roll.to_string(), "2d6+1: 8 (Pure: 7 [3, 4])");
    }
}
