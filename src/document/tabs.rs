//! The tab list
//!
//! Tabs are kept in creation order. There is always at least one tab while
//! the editor runs: closing the last one is reported to the caller instead
//! of emptying the list.

use std::path::Path;

use super::{OpenError, Tab};

/// What happened on a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed
    Closed,
    /// It was the only tab; the list is unchanged and the editor should exit
    LastTab,
}

/// Ordered collection of open tabs with one active tab
#[derive(Debug)]
pub struct TabList {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabList {
    /// Create a list holding a single tab
    pub fn new(first: Tab) -> Self {
        Self {
            tabs: vec![first],
            active: 0,
        }
    }

    /// Number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false for a running editor
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Index of the active tab
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active tab
    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    /// The active tab, mutably
    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Tab at `index`
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// All tabs in order
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    /// Append a tab and make it active, returning its index
    pub fn push(&mut self, tab: Tab) -> usize {
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        tracing::debug!(index = self.active, count = self.tabs.len(), "tab created");
        self.active
    }

    /// Create a tab, empty or loaded from `path`, and make it active
    pub fn create(&mut self, path: Option<&Path>) -> Result<usize, OpenError> {
        let tab = match path {
            Some(path) => Tab::open(path)?,
            None => Tab::new(),
        };
        Ok(self.push(tab))
    }

    /// Remove the tab at `index`
    ///
    /// Later tabs move down by one; the active index follows its tab, or is
    /// clamped to the new end if the active tab was the one removed. Returns
    /// `None` if there is no tab at `index`.
    pub fn close(&mut self, index: usize) -> Option<CloseOutcome> {
        if index >= self.tabs.len() {
            return None;
        }
        Some(self.remove(index))
    }

    /// Close the active tab
    pub fn close_active(&mut self) -> CloseOutcome {
        self.remove(self.active)
    }

    fn remove(&mut self, index: usize) -> CloseOutcome {
        if self.tabs.len() == 1 {
            return CloseOutcome::LastTab;
        }

        self.tabs.remove(index);
        self.tabs.shrink_to_fit();

        if index < self.active {
            self.active -= 1;
        }
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }

        tracing::debug!(index, active = self.active, count = self.tabs.len(), "tab closed");
        CloseOutcome::Closed
    }

    /// Activate the next tab, if there is one
    pub fn next(&mut self) {
        if self.active + 1 < self.tabs.len() {
            self.active += 1;
            tracing::debug!(index = self.active, "tab switched");
        }
    }

    /// Activate the previous tab, if there is one
    pub fn prev(&mut self) {
        if self.active > 0 {
            self.active -= 1;
            tracing::debug!(index = self.active, "tab switched");
        }
    }
}
