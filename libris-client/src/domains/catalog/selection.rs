use std::collections::HashMap;

use libris_model::MediaId;

/// Checked state for every id of the latest full listing.
///
/// The set only ever covers one listing. [`SelectionSet::reset`] replaces
/// the id set wholesale, so nothing carries over between fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    flags: HashMap<MediaId, bool>,
}

impl SelectionSet {
    /// All-false selection over `ids`.
    pub fn reset(&mut self, ids: impl IntoIterator<Item = MediaId>) {
        self.flags = ids.into_iter().map(|id| (id, false)).collect();
    }

    /// Empty set; nothing is selectable until the next reset.
    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.flags.contains_key(&id)
    }

    pub fn is_selected(&self, id: MediaId) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// Flip `id`, returning the new flag, or `None` if it is not covered.
    pub fn toggle(&mut self, id: MediaId) -> Option<bool> {
        let flag = self.flags.get_mut(&id)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Number of ids covered
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag).count()
    }
}
