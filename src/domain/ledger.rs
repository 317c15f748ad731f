//! Fine ledger: accumulated overdue fines per item.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::ItemId;

/// Mapping from item to total fine owed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineLedger {
    entries: HashMap<ItemId, u64>,
}

impl FineLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the item's entry and return the new total
    pub fn charge(&mut self, item_id: ItemId, amount: u64) -> u64 {
        let total = self.entries.entry(item_id).or_insert(0);
        *total = total.saturating_add(amount);
        *total
    }

    /// Total fine recorded for an item
    pub fn fine_for(&self, item_id: ItemId) -> Option<u64> {
        self.entries.get(&item_id).copied()
    }

    /// Sum over all entries
    pub fn total(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, amount| acc.saturating_add(*amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in map order (unspecified)
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u64)> + '_ {
        self.entries.iter().map(|(id, amount)| (*id, *amount))
    }

    /// Report lines, one per entry, or a single "No fines recorded." line
    pub fn report_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No fines recorded.".to_string()];
        }

        self.iter()
            .map(|(id, amount)| format!("Item ID {} - Fine: Rs.{}", id, amount))
            .collect()
    }
}
