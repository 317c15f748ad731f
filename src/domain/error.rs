//! Errors raised by lending operations.
//!
//! Every variant is recoverable: the caller reports the message and carries on.
//! Display strings double as the console report lines.

use thiserror::Error;

use super::duration::InvalidDurationFormat;
use super::item::ItemId;

/// Lending operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    #[error("Failed to borrow '{title}': {source}")]
    InvalidDurationFormat {
        title: String,
        #[source]
        source: InvalidDurationFormat,
    },

    #[error("Invalid borrow duration: {0}")]
    InvalidDurationValue(i64),

    #[error("Item is already borrowed.")]
    AlreadyBorrowed,

    #[error("{title} was not borrowed.")]
    NotBorrowed { title: String },

    #[error("Please borrow '{title}' before playing.")]
    MustBorrowFirst { title: String },

    #[error("'{title}' does not support {action}")]
    UnsupportedAction { title: String, action: &'static str },

    #[error("No item with ID {0}")]
    UnknownItem(ItemId),
}

/// Result alias for lending operations
pub type LendingResult<T> = Result<T, LendingError>;
