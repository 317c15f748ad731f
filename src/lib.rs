//! libranet - library circulation with overdue fines
//!
//! Catalog items (books, audio books, e-magazines), borrow them for a
//! duration, and charge a per-day fine when they come back late.
//!
//! # Lifecycle
//!
//! - An item is either available or on loan
//! - Borrowing records the start time and an agreed number of days
//! - Returning computes overdue days and adds any fine to the ledger
//! - Fines for the same item accumulate across late returns
//!
//! # Modules
//!
//! - `domain`: Items, durations, the fine ledger, id allocation
//! - `library`: The catalog that owns items and fines
//! - `clock`: Injectable time source (system or simulated)
//! - `config`: Fine rate and config file discovery
//! - `cli`: Command-line demo driver
//!
//! # Usage
//!
//! ```bash
//! # Run the sample scenario, returning items 10 days after borrowing
//! libranet demo --days 10
//!
//! # Check how a duration is understood
//! libranet parse "2 weeks"
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use clock::{Clock, ClockOutOfRange, ManualClock, SystemClock};
pub use config::LibraryConfig;
pub use domain::{
    parse_duration, BorrowReceipt, FineLedger, InvalidDurationFormat, Item, ItemId, ItemKind,
    ItemSequence, LendingError, Loan, ReturnReceipt,
};
pub use library::{Catalog, CatalogSnapshot};
