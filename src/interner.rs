//! String interning for task names.
//!
//! Task names are interned to compact integer ids so that dependency and
//! dependent edges can be stored as indices into the task arena instead of
//! owned copies of the name strings.

use rustc_hash::FxHashMap;

/// Compact task id. Doubles as the task's index in the workflow arena.
pub type TaskId = u32;

/// Maps task names to arena ids and back.
#[derive(Debug, Clone, Default)]
pub struct NameInterner {
    ids: FxHashMap<String, TaskId>,
    names: Vec<String>,
}

impl NameInterner {
    /// Create an interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name, returning its id.
    /// Re-interning an existing name returns the id assigned on first sight.
    pub fn intern(&mut self, name: &str) -> TaskId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as TaskId;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up the id for a name without interning it.
    #[inline]
    pub fn get(&self, name: &str) -> Option<TaskId> {
        self.ids.get(name).copied()
    }

    /// Resolve an id back to its name.
    #[inline]
    pub fn resolve(&self, id: TaskId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
