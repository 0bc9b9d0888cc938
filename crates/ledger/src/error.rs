//! The module contains the errors the ledger can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when user input does not parse into [`Money`].
//! - [`InvalidKey`] thrown when a row key does not parse into [`EntryKey`].
//!
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`InvalidKey`]: LedgerError::InvalidKey
//!  [`Money`]: super::Money
//!  [`EntryKey`]: super::EntryKey
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid entry key: {0}")]
    InvalidKey(String),
}
