use serde::{Deserialize, Serialize};

/// One tracked working copy and everything the dashboard knows about it.
///
/// `out_of_date` and `has_local_changes` are derived: they are only written
/// by a completed check action, or reset by a completed sync. The `pending_*`
/// flags mark work queued for the next dispatch pass.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RepoEntity {
    pub name: String,
    pub path: String,
    pub push_on_sync: bool,
    pub out_of_date: bool,
    pub has_local_changes: bool,
    pub pending_check: bool,
    pub pending_sync: bool,
}

impl RepoEntity {
    pub fn new(name: impl Into<String>, path: impl Into<String>, push_on_sync: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            push_on_sync,
            out_of_date: false,
            has_local_changes: false,
            pending_check: false,
            pending_sync: false,
        }
    }

    /// An idle entity passes through a dispatch pass untouched.
    pub fn idle(&self) -> bool {
        !self.pending_check && !self.pending_sync
    }
}

/// Display order is ascending by name; grid positions are re-derived from
/// this order every cycle, never cached across mutation.
pub fn sort_entities(entities: &mut [RepoEntity]) {
    entities.sort_by(|a, b| a.name.cmp(&b.name));
}
