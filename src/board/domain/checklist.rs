//! Ordered checklist carried by a task.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    text: String,
    checked: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }

    /// Returns the item text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the item is checked off.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.checked
    }
}

/// Ordered sequence of checklist items.
///
/// Item order is user-meaningful but carries no cross-task invariant; the
/// whole list is replaced on edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(Vec<ChecklistItem>);

impl Checklist {
    /// Creates an empty checklist.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a checklist from existing items, preserving order.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = ChecklistItem>) -> Self {
        Self(items.into_iter().collect())
    }

    /// Returns the items in order.
    #[must_use]
    pub fn items(&self) -> &[ChecklistItem] {
        &self.0
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the checklist has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an item at the end.
    pub fn push(&mut self, item: ChecklistItem) {
        self.0.push(item);
    }

    /// Flips the checked flag of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistIndexOutOfBounds`] when `index`
    /// is past the end of the list.
    pub fn toggle(&mut self, index: usize) -> Result<(), BoardDomainError> {
        let len = self.0.len();
        let item = self
            .0
            .get_mut(index)
            .ok_or(BoardDomainError::ChecklistIndexOutOfBounds { index, len })?;
        item.checked = !item.checked;
        Ok(())
    }
}
