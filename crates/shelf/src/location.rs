use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shelftrack_core::{DomainError, DomainResult};

/// Shelf column identifier: a single ASCII uppercase letter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(char);

impl Column {
    pub fn new(letter: char) -> DomainResult<Self> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter))
        } else {
            Err(DomainError::validation(format!(
                "column must be a single uppercase letter, got {letter:?}"
            )))
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Column {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::new(letter),
            _ => Err(DomainError::validation(format!(
                "column must be a single uppercase letter, got {s:?}"
            ))),
        }
    }
}

/// One shelf slot: column, position along the aisle, vertical level.
///
/// Position and level are 1-based and canonically `u32`; callers that read
/// text (forms, CSV) must parse before reaching the domain, so `"1"` and
/// `"01"` identify the same slot. Equality is structural on all three
/// fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub column: Column,
    pub position: u32,
    pub level: u32,
}

impl Location {
    pub fn new(column: Column, position: u32, level: u32) -> DomainResult<Self> {
        if position == 0 {
            return Err(DomainError::validation("position must be at least 1"));
        }
        if level == 0 {
            return Err(DomainError::validation("level must be at least 1"));
        }
        Ok(Self {
            column,
            position,
            level,
        })
    }
}

impl fmt::Display for Location {
    /// The label used by the shelf viewer and the history export.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}列{}番目レベル{}", self.column, self.position, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_accepts_uppercase_letters() {
        assert_eq!(Column::new('A').unwrap().as_char(), 'A');
        assert_eq!(Column::new('Z').unwrap().as_char(), 'Z');
    }

    #[test]
    fn column_rejects_everything_else() {
        for letter in ['a', '1', 'あ', ' '] {
            let err = Column::new(letter).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                other => panic!("expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn column_parses_from_trimmed_string() {
        assert_eq!("B".parse::<Column>().unwrap().as_char(), 'B');
        assert_eq!(" C ".parse::<Column>().unwrap().as_char(), 'C');
        assert!("AB".parse::<Column>().is_err());
        assert!("".parse::<Column>().is_err());
    }

    #[test]
    fn location_rejects_zero_position_or_level() {
        let column = Column::new('A').unwrap();
        assert!(Location::new(column, 0, 1).is_err());
        assert!(Location::new(column, 1, 0).is_err());
    }

    #[test]
    fn location_equality_is_structural() {
        let column = Column::new('A').unwrap();
        let a = Location::new(column, 1, 1).unwrap();
        let b = Location::new(column, 1, 1).unwrap();
        let c = Location::new(column, 1, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn location_displays_as_shelf_label() {
        let column = Column::new('A').unwrap();
        let location = Location::new(column, 3, 2).unwrap();
        assert_eq!(location.to_string(), "A列3番目レベル2");
    }
}
