//! Shell-style history recall.
//!
//! The cursor indexes the history most-recent-first. `None` means the user
//! is not navigating (the `-1` position). The cursor never holds the history
//! itself; callers pass the current history on every step so it always
//! reflects the live log.

use folio_types::terminal::HistoryDirection;

/// Position within the most-recent-first command history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    index: Option<usize>,
}

/// What the input buffer should become after a navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall<'a> {
    /// Replace the buffer with this historical input.
    Entry(&'a str),
    /// Clear the buffer (stepped past the newest entry).
    Clear,
    /// Leave the buffer alone (boundary reached).
    Unchanged,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position; `None` when not navigating.
    pub fn position(&self) -> Option<usize> {
        self.index
    }

    pub fn is_navigating(&self) -> bool {
        self.index.is_some()
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Move one step in `direction` over `history` (most-recent-first).
    pub fn step<'a>(&mut self, direction: HistoryDirection, history: &[&'a str]) -> Recall<'a> {
        match direction {
            HistoryDirection::Older => {
                let next = self.index.map_or(0, |i| i + 1);
                match history.get(next).copied() {
                    Some(entry) => {
                        self.index = Some(next);
                        Recall::Entry(entry)
                    }
                    None => Recall::Unchanged,
                }
            }
            HistoryDirection::Newer => match self.index {
                None => Recall::Unchanged,
                Some(0) => {
                    self.index = None;
                    Recall::Clear
                }
                Some(i) => {
                    let next = i - 1;
                    self.index = Some(next);
                    history.get(next).copied().map_or(Recall::Clear, Recall::Entry)
                }
            },
        }
    }
}
