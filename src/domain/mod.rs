//! Domain types for library circulation.
//!
//! - Duration: parsing human-entered borrow lengths
//! - Item: catalog entries and the borrow/return state machine
//! - Ledger: accumulated overdue fines
//! - Sequence: id allocation for new items

pub mod duration;
pub mod error;
pub mod item;
pub mod ledger;
pub mod sequence;

// Re-export commonly used types
pub use duration::{parse_duration, InvalidDurationFormat};
pub use error::{LendingError, LendingResult};
pub use item::{BorrowReceipt, Item, ItemId, ItemKind, Loan, ReturnReceipt, DATE_FORMAT};
pub use ledger::FineLedger;
pub use sequence::ItemSequence;
