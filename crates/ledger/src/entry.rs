//! The module contains the entry records and the composite row key shared
//! with the presentation layer.
//!
//! Income and expense entries carry the same base fields; an expense
//! additionally tracks its share of total income.
use core::fmt;
use std::str::FromStr;

use crate::{LedgerError, Money};

/// Classification of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Canonical wire tag, used as the row-key prefix.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Category::Income => "inc",
            Category::Expense => "exp",
        }
    }

    /// The other category.
    #[must_use]
    pub const fn other(self) -> Category {
        match self {
            Category::Income => Category::Expense,
            Category::Expense => Category::Income,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl TryFrom<&str> for Category {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "inc" => Ok(Category::Income),
            "exp" => Ok(Category::Expense),
            other => Err(LedgerError::InvalidKey(format!(
                "unknown category tag: {other}"
            ))),
        }
    }
}

/// A single income or expense record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: u32,
    pub description: String,
    pub amount: Money,
}

/// An expense record with its share of total income.
///
/// `percentage` is `None` until the next recompute pass, or whenever total
/// income is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub entry: Entry,
    pub percentage: Option<u32>,
}

/// Composite row key `<tag>-<id>`, e.g. `inc-1` or `exp-3`.
///
/// Correlates a rendered row with its entry. The textual form must
/// round-trip exactly: delete-lookup parses it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub category: Category,
    pub id: u32,
}

impl EntryKey {
    #[must_use]
    pub const fn new(category: Category, id: u32) -> Self {
        Self { category, id }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.tag(), self.id)
    }
}

impl FromStr for EntryKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidKey(s.to_string());

        let (tag, id) = s.split_once('-').ok_or_else(invalid)?;
        let category = Category::try_from(tag).map_err(|_| invalid())?;

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let id: u32 = id.parse().map_err(|_| invalid())?;
        if id == 0 {
            return Err(invalid());
        }

        Ok(Self { category, id })
    }
}
