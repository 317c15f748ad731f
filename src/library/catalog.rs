//! Catalog: the ordered item collection and its fine ledger.
//!
//! All lending goes through the catalog so that every return is charged
//! against the same ledger at the configured fine rate.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::LibraryConfig;
use crate::domain::{
    BorrowReceipt, FineLedger, Item, ItemId, LendingError, LendingResult, ReturnReceipt,
};

/// Items plus the fines charged against them
#[derive(Debug)]
pub struct Catalog<C: Clock = SystemClock> {
    items: Vec<Item>,
    fines: FineLedger,
    config: LibraryConfig,
    clock: C,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog on the system clock with default settings
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> Catalog<C> {
    /// Create an empty catalog driven by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(LibraryConfig::default(), clock)
    }

    /// Create an empty catalog with explicit settings
    pub fn with_config(config: LibraryConfig, clock: C) -> Self {
        Self {
            items: Vec::new(),
            fines: FineLedger::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock access, for simulated time
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn fines(&self) -> &FineLedger {
        &self.fines
    }

    /// Append an item. No duplicate detection.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id();
        debug!(item_id = %id, title = item.title(), "Item added");
        self.items.push(item);
        id
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// All items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow an item for a number of days
    pub fn borrow(&mut self, id: ItemId, duration_days: i64) -> LendingResult<BorrowReceipt> {
        let now = self.clock.now();
        let result = self.item_mut(id)?.borrow(duration_days, now);
        log_borrow(id, &result);
        result
    }

    /// Borrow an item using a human-entered duration such as `"1 week"`
    pub fn borrow_for(&mut self, id: ItemId, duration: &str) -> LendingResult<BorrowReceipt> {
        let now = self.clock.now();
        let result = self.item_mut(id)?.borrow_for(duration, now);
        log_borrow(id, &result);
        result
    }

    /// Return an item, charging any overdue fine to the ledger
    pub fn return_item(&mut self, id: ItemId) -> LendingResult<ReturnReceipt> {
        let now = self.clock.now();
        let rate = self.config.fine_rate_per_day;

        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        let result = item.return_to(&mut self.fines, rate, now);

        match &result {
            Ok(receipt) if receipt.is_late() => {
                info!(
                    item_id = %id,
                    overdue_days = receipt.overdue_days,
                    fine = receipt.fine,
                    "Item returned late"
                );
            }
            Ok(_) => info!(item_id = %id, "Item returned on time"),
            Err(e) => warn!(item_id = %id, "Return rejected: {}", e),
        }

        result
    }

    /// Play an audio book
    pub fn play(&self, id: ItemId) -> LendingResult<String> {
        self.lookup(id)?.play()
    }

    /// Archive a magazine issue
    pub fn archive_issue(&self, id: ItemId) -> LendingResult<String> {
        self.lookup(id)?.archive_issue()
    }

    /// Detail line for every item, in catalog order
    pub fn list_all_items(&self) -> Vec<String> {
        debug!(count = self.items.len(), "Listing items");
        self.items.iter().map(Item::details).collect()
    }

    /// Fine report lines (unordered)
    pub fn show_fines(&self) -> Vec<String> {
        self.fines.report_lines()
    }

    /// Items currently past their due date
    pub fn overdue_items(&self) -> Vec<&Item> {
        let now = self.clock.now();
        self.items
            .iter()
            .filter(|item| item.overdue_days(now) > 0)
            .collect()
    }

    /// What each overdue item would be fined if returned now.
    ///
    /// Read-only: the ledger is charged only by `return_item`.
    pub fn outstanding_fines(&self) -> Vec<(ItemId, u64)> {
        let now = self.clock.now();
        let rate = self.config.fine_rate_per_day;
        self.items
            .iter()
            .filter(|item| item.overdue_days(now) > 0)
            .map(|item| (item.id(), item.pending_fine(rate, now)))
            .collect()
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> CatalogSnapshot<'_> {
        CatalogSnapshot {
            fine_rate_per_day: self.config.fine_rate_per_day,
            items: &self.items,
            fines: &self.fines,
        }
    }

    fn lookup(&self, id: ItemId) -> LendingResult<&Item> {
        self.get(id).ok_or(LendingError::UnknownItem(id))
    }

    fn index_of(&self, id: ItemId) -> LendingResult<usize> {
        self.items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(LendingError::UnknownItem(id))
    }

    fn item_mut(&mut self, id: ItemId) -> LendingResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(LendingError::UnknownItem(id))
    }
}

/// Point-in-time view of a catalog, for reporting
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub fine_rate_per_day: u64,
    pub items: &'a [Item],
    pub fines: &'a FineLedger,
}

fn log_borrow(id: ItemId, result: &LendingResult<BorrowReceipt>) {
    match result {
        Ok(receipt) => info!(
            item_id = %id,
            days = receipt.duration_days,
            due = %receipt.due_on,
            "Item borrowed"
        ),
        Err(e) => warn!(item_id = %id, "Borrow rejected: {}", e),
    }
}
