//! Catalog items and their borrow/return state machine.
//!
//! An item is either available or on loan. The loan record is the single
//! source of truth: `is_available()` is simply "no loan".

use std::fmt;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::duration::parse_duration;
use super::error::{LendingError, LendingResult};
use super::ledger::FineLedger;

/// Date format used in every report line
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Unique item identifier, assigned by [`super::ItemSequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ItemKind {
    /// Printed book
    Book { page_count: u32 },

    /// Audio book (can be played while borrowed)
    AudioBook,

    /// Electronic magazine issue
    EMagazine { issue_no: u32 },
}

impl ItemKind {
    /// Label used as the ID prefix in detail lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Book { .. } => "Book",
            Self::AudioBook => "AudioBook",
            Self::EMagazine { .. } => "EMagazine",
        }
    }
}

/// An active borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// When the borrow began (local time)
    pub started_at: NaiveDateTime,

    /// Agreed borrow length in days (always > 0)
    pub duration_days: u32,

    /// Start date plus the duration
    pub due_on: NaiveDate,
}

impl Loan {
    /// Start a loan, or `None` if the due date falls outside the calendar
    pub fn new(started_at: NaiveDateTime, duration_days: u32) -> Option<Self> {
        let due_on = started_at
            .date()
            .checked_add_days(Days::new(u64::from(duration_days)))?;

        Some(Self {
            started_at,
            duration_days,
            due_on,
        })
    }

    /// Whole days since the borrow began, never negative
    pub fn elapsed_days(&self, now: NaiveDateTime) -> i64 {
        (now - self.started_at).num_days().max(0)
    }

    /// Days held beyond the agreed duration
    pub fn overdue_days(&self, now: NaiveDateTime) -> u32 {
        let overdue = self.elapsed_days(now) - i64::from(self.duration_days);
        u32::try_from(overdue.max(0)).unwrap_or(u32::MAX)
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_on
    }
}

/// A catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    title: String,
    author: String,
    #[serde(flatten)]
    kind: ItemKind,
    loan: Option<Loan>,
}

impl Item {
    pub(crate) fn new(id: ItemId, title: String, author: String, kind: ItemKind) -> Self {
        Self {
            id,
            title,
            author,
            kind,
            loan: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// The active loan, if borrowed
    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    /// True when not currently borrowed
    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    /// Borrow for a number of days.
    ///
    /// Fails without touching state if the item is already on loan, the
    /// duration is not positive, or the due date cannot be represented.
    pub fn borrow(
        &mut self,
        duration_days: i64,
        now: NaiveDateTime,
    ) -> LendingResult<BorrowReceipt> {
        if self.loan.is_some() {
            return Err(LendingError::AlreadyBorrowed);
        }

        let loan = u32::try_from(duration_days)
            .ok()
            .filter(|days| *days > 0)
            .and_then(|days| Loan::new(now, days))
            .ok_or(LendingError::InvalidDurationValue(duration_days))?;
        self.loan = Some(loan);

        Ok(BorrowReceipt {
            item_id: self.id,
            title: self.title.clone(),
            duration_days: loan.duration_days,
            borrowed_on: now.date(),
            due_on: loan.due_on,
        })
    }

    /// Borrow using a human-entered duration such as `"2 weeks"`
    pub fn borrow_for(
        &mut self,
        duration: &str,
        now: NaiveDateTime,
    ) -> LendingResult<BorrowReceipt> {
        let days = parse_duration(duration).map_err(|source| {
            LendingError::InvalidDurationFormat {
                title: self.title.clone(),
                source,
            }
        })?;
        self.borrow(days, now)
    }

    /// Whole days on loan so far; 0 while available
    pub fn elapsed_days(&self, now: NaiveDateTime) -> i64 {
        self.loan.map_or(0, |loan| loan.elapsed_days(now))
    }

    /// Days past due; 0 while available
    pub fn overdue_days(&self, now: NaiveDateTime) -> u32 {
        self.loan.map_or(0, |loan| loan.overdue_days(now))
    }

    /// Due date of the active loan
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.loan.map(|loan| loan.due_date())
    }

    /// Fine that returning now would incur
    pub fn pending_fine(&self, fine_rate_per_day: u64, now: NaiveDateTime) -> u64 {
        u64::from(self.overdue_days(now)).saturating_mul(fine_rate_per_day)
    }

    /// Return the item, charging any overdue fine to `ledger`.
    ///
    /// Fines add to whatever the ledger already holds for this item.
    pub fn return_to(
        &mut self,
        ledger: &mut FineLedger,
        fine_rate_per_day: u64,
        now: NaiveDateTime,
    ) -> LendingResult<ReturnReceipt> {
        let Some(loan) = self.loan else {
            return Err(LendingError::NotBorrowed {
                title: self.title.clone(),
            });
        };

        let overdue_days = loan.overdue_days(now);
        let fine = self.pending_fine(fine_rate_per_day, now);
        if overdue_days > 0 {
            ledger.charge(self.id, fine);
        }

        self.loan = None;

        Ok(ReturnReceipt {
            item_id: self.id,
            title: self.title.clone(),
            overdue_days,
            fine,
        })
    }

    /// Play an audio book. Only audio books on loan can be played.
    pub fn play(&self) -> LendingResult<String> {
        match self.kind {
            ItemKind::AudioBook if self.is_available() => Err(LendingError::MustBorrowFirst {
                title: self.title.clone(),
            }),
            ItemKind::AudioBook => Ok(format!("Playing audiobook: {}", self.title)),
            _ => Err(self.unsupported("play")),
        }
    }

    /// Archive a magazine issue. Informational only; loan state is irrelevant.
    pub fn archive_issue(&self) -> LendingResult<String> {
        match self.kind {
            ItemKind::EMagazine { issue_no } => {
                Ok(format!("Archiving issue #{} of {}", issue_no, self.title))
            }
            _ => Err(self.unsupported("archiving")),
        }
    }

    /// One-line description including availability and due date
    pub fn details(&self) -> String {
        let extra = match self.kind {
            ItemKind::Book { page_count } => format!(", Pages: {}", page_count),
            ItemKind::AudioBook => String::new(),
            ItemKind::EMagazine { issue_no } => format!(", Issue No: {}", issue_no),
        };
        let due = self
            .due_date()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "{}ID: {}, Title: {}, Author: {}{}, Available: {}, Due: {}",
            self.kind.label(),
            self.id,
            self.title,
            self.author,
            extra,
            self.is_available(),
            due
        )
    }

    fn unsupported(&self, action: &'static str) -> LendingError {
        LendingError::UnsupportedAction {
            title: self.title.clone(),
            action,
        }
    }
}

/// Record of a successful borrow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub item_id: ItemId,
    pub title: String,
    pub duration_days: u32,
    pub borrowed_on: NaiveDate,
    pub due_on: NaiveDate,
}

impl fmt::Display for BorrowReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} borrowed for {} days on {}. Due on {}.",
            self.title,
            self.duration_days,
            self.borrowed_on.format(DATE_FORMAT),
            self.due_on.format(DATE_FORMAT)
        )
    }
}

/// Record of a successful return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub item_id: ItemId,
    pub title: String,
    pub overdue_days: u32,
    /// Fine charged by this return (0 when on time)
    pub fine: u64,
}

impl ReturnReceipt {
    pub fn is_late(&self) -> bool {
        self.overdue_days > 0
    }
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_late() {
            write!(f, "{} returned late. Fine: Rs.{}", self.title, self.fine)
        } else {
            write!(f, "{} returned on time. No fine.", self.title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn book() -> Item {
        Item::new(
            ItemId::new(1),
            "The Intelligent Investor".to_string(),
            "Benjamin Graham".to_string(),
            ItemKind::Book { page_count: 180 },
        )
    }

    fn audio_book() -> Item {
        Item::new(
            ItemId::new(2),
            "Momentum Masters".to_string(),
            "Mark Minervini".to_string(),
            ItemKind::AudioBook,
        )
    }

    fn magazine() -> Item {
        Item::new(
            ItemId::new(3),
            "AI Weekly".to_string(),
            "Tech Press".to_string(),
            ItemKind::EMagazine { issue_no: 4 },
        )
    }

    #[test]
    fn test_borrow_sets_loan() {
        let mut item = book();
        let receipt = item.borrow(7, t0()).unwrap();

        assert!(!item.is_available());
        assert_eq!(item.loan().unwrap().duration_days, 7);
        assert_eq!(item.loan().unwrap().started_at, t0());
        assert_eq!(receipt.due_on, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(
            receipt.to_string(),
            "The Intelligent Investor borrowed for 7 days on 01/01/2024. Due on 08/01/2024."
        );
    }

    #[test]
    fn test_borrow_rejects_non_positive() {
        let mut item = book();
        assert_eq!(
            item.borrow(0, t0()).unwrap_err(),
            LendingError::InvalidDurationValue(0)
        );
        assert_eq!(
            item.borrow(-4, t0()).unwrap_err().to_string(),
            "Invalid borrow duration: -4"
        );
        assert!(item.is_available());
    }

    #[test]
    fn test_borrow_rejects_unrepresentable_due_date() {
        let mut item = book();
        assert_eq!(
            item.borrow(1_000_000_000, t0()).unwrap_err(),
            LendingError::InvalidDurationValue(1_000_000_000)
        );
        assert_eq!(
            item.borrow(i64::from(u32::MAX), t0()).unwrap_err(),
            LendingError::InvalidDurationValue(i64::from(u32::MAX))
        );
        assert!(item.is_available());

        // Long but representable durations keep an exact due date
        let receipt = item.borrow(36_500, t0()).unwrap();
        assert_eq!(
            receipt.due_on,
            t0().date().checked_add_days(Days::new(36_500)).unwrap()
        );
        assert_eq!(item.due_date(), Some(receipt.due_on));
    }

    #[test]
    fn test_borrow_twice_keeps_first_loan() {
        let mut item = book();
        item.borrow(7, t0()).unwrap();
        let first = *item.loan().unwrap();

        let err = item.borrow(21, t0() + Duration::days(2)).unwrap_err();
        assert_eq!(err, LendingError::AlreadyBorrowed);
        assert_eq!(err.to_string(), "Item is already borrowed.");
        assert_eq!(*item.loan().unwrap(), first);
    }

    #[test]
    fn test_borrow_for_parses_duration() {
        let mut item = book();
        let receipt = item.borrow_for("2 weeks", t0()).unwrap();
        assert_eq!(receipt.duration_days, 14);
    }

    #[test]
    fn test_borrow_for_bad_duration() {
        let mut item = book();
        let err = item.borrow_for("banana", t0()).unwrap_err();

        assert!(matches!(err, LendingError::InvalidDurationFormat { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to borrow 'The Intelligent Investor': Invalid duration format: 'banana'"
        );
        assert!(item.is_available());
    }

    #[test]
    fn test_overdue_days() {
        let mut item = book();
        assert_eq!(item.overdue_days(t0() + Duration::days(100)), 0);

        item.borrow(7, t0()).unwrap();
        assert_eq!(item.overdue_days(t0() + Duration::days(7)), 0);
        assert_eq!(item.overdue_days(t0() + Duration::days(10)), 3);
        // Partial days are truncated
        assert_eq!(
            item.overdue_days(t0() + Duration::days(8) + Duration::hours(23)),
            1
        );
    }

    #[test]
    fn test_elapsed_days_clamped_for_backwards_time() {
        let mut item = book();
        item.borrow(3, t0()).unwrap();
        assert_eq!(item.elapsed_days(t0() - Duration::days(2)), 0);
    }

    #[test]
    fn test_return_on_time() {
        let mut item = book();
        let mut ledger = FineLedger::new();
        item.borrow(7, t0()).unwrap();

        let receipt = item
            .return_to(&mut ledger, 10, t0() + Duration::days(5))
            .unwrap();

        assert!(!receipt.is_late());
        assert_eq!(receipt.fine, 0);
        assert_eq!(
            receipt.to_string(),
            "The Intelligent Investor returned on time. No fine."
        );
        assert!(ledger.is_empty());
        assert!(item.is_available());
        assert!(item.loan().is_none());
        assert!(item.due_date().is_none());
    }

    #[test]
    fn test_return_late_charges_ledger() {
        let mut item = book();
        let mut ledger = FineLedger::new();
        item.borrow(7, t0()).unwrap();

        let receipt = item
            .return_to(&mut ledger, 10, t0() + Duration::days(10))
            .unwrap();

        assert_eq!(receipt.overdue_days, 3);
        assert_eq!(receipt.fine, 30);
        assert_eq!(
            receipt.to_string(),
            "The Intelligent Investor returned late. Fine: Rs.30"
        );
        assert_eq!(ledger.fine_for(item.id()), Some(30));
    }

    #[test]
    fn test_return_when_available() {
        let mut item = book();
        let mut ledger = FineLedger::new();
        let err = item.return_to(&mut ledger, 10, t0()).unwrap_err();
        assert_eq!(err.to_string(), "The Intelligent Investor was not borrowed.");
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_play_requires_loan() {
        let mut item = audio_book();
        assert_eq!(
            item.play().unwrap_err().to_string(),
            "Please borrow 'Momentum Masters' before playing."
        );

        item.borrow(3, t0()).unwrap();
        assert_eq!(item.play().unwrap(), "Playing audiobook: Momentum Masters");
    }

    #[test]
    fn test_play_unsupported_for_book() {
        let mut item = book();
        item.borrow(3, t0()).unwrap();
        assert!(matches!(
            item.play(),
            Err(LendingError::UnsupportedAction { action: "play", .. })
        ));
    }

    #[test]
    fn test_archive_issue_ignores_loan_state() {
        let mut item = magazine();
        assert_eq!(item.archive_issue().unwrap(), "Archiving issue #4 of AI Weekly");

        item.borrow(1, t0()).unwrap();
        assert_eq!(item.archive_issue().unwrap(), "Archiving issue #4 of AI Weekly");
        assert!(audio_book().archive_issue().is_err());
    }

    #[test]
    fn test_details() {
        let mut item = book();
        assert_eq!(
            item.details(),
            "BookID: 1, Title: The Intelligent Investor, Author: Benjamin Graham, Pages: 180, Available: true, Due: N/A"
        );

        item.borrow(7, t0()).unwrap();
        assert!(item.details().ends_with("Available: false, Due: 08/01/2024"));

        assert_eq!(
            magazine().details(),
            "EMagazineID: 3, Title: AI Weekly, Author: Tech Press, Issue No: 4, Available: true, Due: N/A"
        );
        assert_eq!(
            audio_book().details(),
            "AudioBookID: 2, Title: Momentum Masters, Author: Mark Minervini, Available: true, Due: N/A"
        );
    }
}
