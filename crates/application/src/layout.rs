//! Layout and UI state shared with the component tree.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Where the client is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientLayout {
    /// Overlay embedded in another page.
    Modal,
    /// Full page in a browser.
    Web,
    /// Desktop shell.
    #[default]
    Desktop,
}

/// Sidebar visibility and expanded tree items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    /// Whether the sidebar is shown.
    pub open: bool,
    /// Uids of expanded tree items.
    pub expanded: BTreeSet<String>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            open: true,
            expanded: BTreeSet::new(),
        }
    }
}

impl SidebarState {
    /// Toggles an item, returning whether it is now expanded.
    pub fn toggle(&mut self, uid: &str) -> bool {
        if self.expanded.remove(uid) {
            false
        } else {
            self.expanded.insert(uid.to_string());
            true
        }
    }
}

/// Pointers to the entities currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEntities {
    /// Active workspace uid.
    pub workspace: Option<String>,
    /// Active document name.
    pub document: Option<String>,
    /// Active request uid.
    pub request: Option<String>,
    /// Active example key.
    pub example: Option<String>,
}

/// Open/closed state of the modal.
#[derive(Debug, Default)]
pub struct ModalState {
    open: AtomicBool,
}

impl ModalState {
    /// Shows the modal.
    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    /// Hides the modal.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Whether the modal is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
