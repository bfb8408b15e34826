//! Snapshot undo history over full mask bitmaps.

use maskink_raster::MaskBitmap;

/// Maximum number of snapshots kept alive. Each entry is a full
/// `width * height * 4` byte copy, so depth is bounded; the oldest entry is
/// evicted once the cap is reached.
pub const MAX_HISTORY_DEPTH: usize = 64;

/// Ordered snapshots plus a cursor into them.
///
/// Entry 0 is the state reached by undoing everything; entries past the
/// cursor are redo states and are discarded on the next push. One snapshot is
/// committed per completed gesture, never per segment.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<MaskBitmap>,
    cursor: usize,
}

impl HistoryStack {
    /// Start a fresh history whose single entry is the given baseline
    /// (a blank mask on load).
    pub fn new(baseline: MaskBitmap) -> Self {
        Self {
            entries: vec![baseline],
            cursor: 0,
        }
    }

    /// Commit a snapshot: truncate the redo tail, append a copy, advance the
    /// cursor. Evicts the oldest entry past `MAX_HISTORY_DEPTH`.
    pub fn push(&mut self, snapshot: &MaskBitmap) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot.clone());
        self.cursor += 1;

        if self.entries.len() > MAX_HISTORY_DEPTH {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry and return the state to restore.
    /// `None` at the bottom of the stack: a no-op, not an error.
    pub fn undo(&mut self) -> Option<&MaskBitmap> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry and return the state to restore.
    /// `None` at the top of the stack: a no-op, not an error.
    pub fn redo(&mut self) -> Option<&MaskBitmap> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// The snapshot at the cursor: the last committed state.
    pub fn current(&self) -> &MaskBitmap {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
