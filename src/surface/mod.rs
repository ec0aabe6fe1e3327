//! The part of the UI an `InteractionClient` is allowed to touch.

mod terminal;

use std::sync::{Mutex, MutexGuard};

use crate::client::models::{DisplayState, TranscriptEntry};

pub use terminal::TerminalSurface;

/// Output area, transcript list and submit control of one ask page.
///
/// Methods are synchronous and take `&self`; implementations own their interior
/// mutability. `set_input_enabled(true)` may run from a drop guard, so it must not
/// panic.
pub trait DisplaySurface: Send + Sync {
    fn show_loading(&self, text: &str);
    fn show_result(&self, text: &str);
    fn show_error(&self, text: &str);
    fn set_input_enabled(&self, enabled: bool);

    /// Only called in transcript mode.
    fn append_transcript(&self, _entry: &TranscriptEntry) {}
}

#[derive(Debug)]
struct Inner {
    state: DisplayState,
    input_enabled: bool,
    transcript: Vec<TranscriptEntry>,
    history: Vec<DisplayState>,
}

/// Headless surface that remembers everything shown on it.
#[derive(Debug)]
pub struct MemorySurface {
    inner: Mutex<Inner>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: DisplayState::Idle,
                input_enabled: true,
                transcript: Vec::new(),
                history: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: DisplayState) {
        let mut inner = self.lock();
        inner.history.push(state.clone());
        inner.state = state;
    }

    pub fn state(&self) -> DisplayState {
        self.lock().state.clone()
    }

    pub fn input_enabled(&self) -> bool {
        self.lock().input_enabled
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.lock().transcript.clone()
    }

    /// Every state shown so far, oldest first. `Idle` is never recorded.
    pub fn history(&self) -> Vec<DisplayState> {
        self.lock().history.clone()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MemorySurface {
    fn show_loading(&self, _text: &str) {
        self.set_state(DisplayState::Loading);
    }

    fn show_result(&self, text: &str) {
        self.set_state(DisplayState::Shown(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        self.set_state(DisplayState::Error(text.to_string()));
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.lock().input_enabled = enabled;
    }

    fn append_transcript(&self, entry: &TranscriptEntry) {
        self.lock().transcript.push(entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_states_in_order() {
        let surface = MemorySurface::new();
        assert_eq!(surface.state(), DisplayState::Idle);
        assert!(surface.input_enabled());

        surface.set_input_enabled(false);
        surface.show_loading("...");
        surface.show_error("[ERROR]");
        surface.show_result("hello");
        surface.append_transcript(&TranscriptEntry::user("hi"));

        assert!(!surface.input_enabled());
        assert_eq!(surface.state(), DisplayState::Shown("hello".to_string()));
        assert_eq!(
            surface.history(),
            vec![
                DisplayState::Loading,
                DisplayState::Error("[ERROR]".to_string()),
                DisplayState::Shown("hello".to_string()),
            ]
        );
        assert_eq!(surface.transcript(), vec![TranscriptEntry::user("hi")]);
    }
}
