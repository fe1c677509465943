//! Snapshot-based undo history.

/// Encoded image of the whole pad, captured after a completed stroke.
///
/// Stored as a `data:` URL so it can be handed straight back to the image
/// decoder or to callers that persist signatures as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered stack of snapshots, most recent last.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot on top of the stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// Removes and returns the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    /// The snapshot the surface should currently show.
    pub fn top(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Discards every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }
}
