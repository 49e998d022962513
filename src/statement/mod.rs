//! # Precedence Statements
//!
//! A statement names one item (the *destination*) and, optionally, the item
//! that has to come before it (the *predecessor*):
//!
//! ```text
//! x => z      // z has to come before x
//! h =>        // h has to appear somewhere, no ordering requirement
//! ```
//!
//! Whitespace around both names is insignificant and names are compared
//! case-sensitively. The separator defaults to `=>` and can be changed through
//! [`StatementSyntax`].
//!
//! ```rust
//! use itinerary::statement::{Constraint, StatementSyntax};
//!
//! let c: Constraint = "x => z".parse().unwrap();
//! assert_eq!(c.destination.as_str(), "x");
//! assert_eq!(c.predecessor.as_ref().map(|p| p.as_str()), Some("z"));
//!
//! let arrows = StatementSyntax::new("<-").unwrap();
//! let c = arrows.parse("h <-").unwrap();
//! assert!(c.predecessor.is_none());
//! ```

use std::{borrow::Borrow, fmt::Display, str::FromStr};

pub mod error;
pub use error::StatementError;

pub const DEFAULT_SEPARATOR: &str = "=>";

/// An opaque, case-sensitive item name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Item(String);

impl Item {
    /// Trims surrounding whitespace, which is never part of a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Item(name.as_ref().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::new(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::new(value)
    }
}

impl From<Item> for String {
    fn from(value: Item) -> Self {
        value.0
    }
}

impl PartialEq<str> for Item {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub destination: Item,
    pub predecessor: Option<Item>,
}

impl Constraint {
    pub fn new(destination: impl Into<Item>, predecessor: Option<impl Into<Item>>) -> Self {
        Constraint {
            destination: destination.into(),
            predecessor: predecessor.map(Into::into).filter(|p| !p.as_str().is_empty()),
        }
    }

    /// A constraint that only declares `destination`.
    pub fn standalone(destination: impl Into<Item>) -> Self {
        Constraint {
            destination: destination.into(),
            predecessor: None,
        }
    }

    pub fn after(destination: impl Into<Item>, predecessor: impl Into<Item>) -> Self {
        Constraint::new(destination, Some(predecessor))
    }

    /// The predecessor, unless it is missing or has an empty name.
    pub fn anchor(&self) -> Option<&Item> {
        self.predecessor
            .as_ref()
            .filter(|p| !p.as_str().is_empty())
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.destination, DEFAULT_SEPARATOR)?;
        if let Some(p) = &self.predecessor {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

impl FromStr for Constraint {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatementSyntax::default().parse(s)
    }
}

/// How statements are written. Only the separator token is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSyntax {
    separator: String,
}

impl Default for StatementSyntax {
    fn default() -> Self {
        StatementSyntax {
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

impl StatementSyntax {
    pub fn new(separator: impl Into<String>) -> Result<Self, StatementError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(StatementError::EmptySeparator);
        }
        Ok(StatementSyntax { separator })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parses a single statement.
    ///
    /// Everything before the first separator is the destination, everything
    /// between the first and the second separator is the predecessor. Anything
    /// after a second separator is ignored.
    pub fn parse(&self, line: &str) -> Result<Constraint, StatementError> {
        if !line.contains(self.separator.as_str()) || line.trim().starts_with(&self.separator) {
            return Err(StatementError::Malformed {
                line: line.to_owned(),
                separator: self.separator.clone(),
            });
        }

        let mut parts = line.split(self.separator.as_str());
        let destination = parts.next().unwrap_or_default();
        let predecessor = parts.next();

        let constraint = Constraint::new(destination, predecessor);
        if constraint.destination.as_str().is_empty() {
            return Err(StatementError::Malformed {
                line: line.to_owned(),
                separator: self.separator.clone(),
            });
        }
        Ok(constraint)
    }

    /// Parses every line, stopping at the first malformed one.
    pub fn parse_all<I>(&self, lines: I) -> Result<Vec<Constraint>, StatementError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.parse(line.as_ref()))
            .collect()
    }
}
