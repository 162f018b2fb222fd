use crate::Position;

/// Cursor state saved before a rune is consumed.
///
/// `offset` is measured from the token start rather than from the buffer
/// origin, so snapshots stay valid when the buffer slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) offset: usize,
    pub(crate) position: Position,
}

/// Undo stack with one entry per consumed rune since the last token reset.
#[derive(Debug, Default)]
pub(crate) struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    #[inline]
    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Pops up to `n` snapshots and returns the oldest one popped, which is
    /// where the cursor has to go back to.
    pub(crate) fn rewind(&mut self, n: usize) -> Option<Snapshot> {
        let keep = self.snapshots.len().saturating_sub(n);
        let target = self.snapshots.get(keep).copied();
        self.snapshots.truncate(keep);
        target
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }
}
