use std::io::Write;
use std::sync::Mutex;

use log::warn;

use super::DisplaySurface;
use crate::client::models::{Role, TranscriptEntry};

/// Renders an ask page onto a line-oriented writer (stdout in the binary).
///
/// In transcript mode replies are drawn as bubbles, so `show_result` stays quiet
/// and the assistant entry carries the text.
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
    transcript: bool,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, transcript: bool) -> Self {
        Self {
            out: Mutex::new(out),
            transcript,
        }
    }

    /// The prompt shown while the submit control is enabled.
    pub fn prompt(&self) {
        self.write("> ");
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn show_loading(&self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn show_result(&self, text: &str) {
        if !self.transcript {
            self.write(&format!("{}\n", text));
        }
    }

    fn show_error(&self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn set_input_enabled(&self, enabled: bool) {
        if enabled {
            self.prompt();
        }
    }

    fn append_transcript(&self, entry: &TranscriptEntry) {
        // the user's line is already on screen
        if entry.role == Role::Assistant {
            self.write(&format!("bot: {}\n", entry.text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn plain_mode_prints_result() {
        let surface = TerminalSurface::new(Vec::new(), false);
        surface.set_input_enabled(false);
        surface.show_loading("Pensant...");
        surface.show_result("4");
        surface.set_input_enabled(true);
        assert_eq!(rendered(surface), "Pensant...\n4\n> ");
    }

    #[test]
    fn transcript_mode_prints_bubbles() {
        let surface = TerminalSurface::new(Vec::new(), true);
        surface.append_transcript(&TranscriptEntry::user("hi"));
        surface.show_loading("...");
        surface.append_transcript(&TranscriptEntry::assistant("hello"));
        surface.show_result("hello");
        assert_eq!(rendered(surface), "...\nbot: hello\n");
    }
}
