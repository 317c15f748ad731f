//! Id and issue-number allocation for new items.
//!
//! Whoever builds a catalog owns the sequence; there is no global counter.

use super::item::{Item, ItemId, ItemKind};

/// Hands out item ids (from 1) and magazine issue numbers (from 1)
#[derive(Debug, Clone)]
pub struct ItemSequence {
    next_id: u32,
    next_issue: u32,
}

impl Default for ItemSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSequence {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_issue: 1,
        }
    }

    /// Create a book
    pub fn book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        page_count: u32,
    ) -> Item {
        self.create(title, author, ItemKind::Book { page_count })
    }

    /// Create an audio book
    pub fn audio_book(&mut self, title: impl Into<String>, author: impl Into<String>) -> Item {
        self.create(title, author, ItemKind::AudioBook)
    }

    /// Create an e-magazine with the next issue number
    pub fn e_magazine(&mut self, title: impl Into<String>, author: impl Into<String>) -> Item {
        let issue_no = self.next_issue;
        self.next_issue += 1;
        self.create(title, author, ItemKind::EMagazine { issue_no })
    }

    /// Id the next item will receive
    pub fn peek_id(&self) -> ItemId {
        ItemId::new(self.next_id)
    }

    fn create(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        kind: ItemKind,
    ) -> Item {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        Item::new(id, title.into(), author.into(), kind)
    }
}
