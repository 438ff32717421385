//! Front-end state: the chat session plus what only the terminal needs
//! (cursor, picker prompt, pending alert, scroll position).

use pdf_qa_client::{ChatSession, Document, Outcome, Submission};
use std::path::Path;

/// Progress reported by the task running a submit cycle.
#[derive(Debug)]
pub enum CycleEvent {
    /// Upload succeeded; the ask call is outstanding.
    Uploaded,
    Finished(Outcome),
}

/// Which input the keyboard is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Chat,
    /// Path prompt opened by the document picker.
    PickDocument { path: String },
}

pub struct App {
    pub session: ChatSession,
    pub mode: Mode,
    /// Cursor in the question buffer, in chars.
    pub cursor: usize,
    /// Blocking notification; keys only dismiss it while set.
    pub alert: Option<String>,
    /// Transcript scroll offset; `u16::MAX` pins to the bottom.
    pub scroll: u16,
    /// Largest useful scroll offset as of the last draw.
    pub max_scroll: u16,
    pub loading_frame: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl App {
    pub fn new() -> Self {
        Self {
            session: ChatSession::new(),
            mode: Mode::Chat,
            cursor: 0,
            alert: None,
            scroll: u16::MAX,
            max_scroll: 0,
            loading_frame: 0,
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// The send control is disabled while a cycle runs.
    pub fn send_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ── Question buffer editing ─────────────────────────────────────────

    fn edit(&mut self, f: impl FnOnce(&mut String, &mut usize)) {
        if self.is_busy() {
            return;
        }
        let mut text = self.session.question().to_string();
        f(&mut text, &mut self.cursor);
        self.session.edit_question(text);
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit(|text, cursor| {
            let at = byte_index(text, *cursor);
            text.insert(at, c);
            *cursor += 1;
        });
    }

    pub fn backspace(&mut self) {
        self.edit(|text, cursor| {
            if *cursor > 0 {
                let at = byte_index(text, *cursor - 1);
                text.remove(at);
                *cursor -= 1;
            }
        });
    }

    pub fn delete(&mut self) {
        self.edit(|text, cursor| {
            if *cursor < text.chars().count() {
                let at = byte_index(text, *cursor);
                text.remove(at);
            }
        });
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.session.question().chars().count();
        self.cursor = (self.cursor + 1).min(len);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.session.question().chars().count();
    }

    // ── Document picker ─────────────────────────────────────────────────

    pub fn open_picker(&mut self) {
        if !self.is_busy() {
            self.mode = Mode::PickDocument {
                path: String::new(),
            };
        }
    }

    pub fn cancel_picker(&mut self) {
        self.mode = Mode::Chat;
    }

    /// Load the file at `path` and select it. A read failure is shown as an
    /// alert and keeps the previous selection.
    pub fn pick_document(&mut self, path: &Path) {
        self.mode = Mode::Chat;
        match Document::open(path) {
            Ok(doc) => self.session.select_document(doc),
            Err(e) => {
                tracing::warn!(error = %e, "document pick failed");
                self.show_alert(format!("Could not open document: {}", e));
            }
        }
    }

    /// Pick whatever path is typed into the picker prompt.
    pub fn confirm_picker(&mut self) {
        if let Mode::PickDocument { path } = &self.mode {
            let path = path.trim().to_string();
            if path.is_empty() {
                self.mode = Mode::Chat;
            } else {
                self.pick_document(Path::new(&path));
            }
        }
    }

    // ── Submit cycle ────────────────────────────────────────────────────

    /// Start a cycle. `None` when nothing should be sent: either busy (send
    /// is disabled) or validation failed, in which case an alert is shown.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.is_busy() {
            return None;
        }
        match self.session.begin_submit() {
            Ok(submission) => {
                self.loading_frame = 0;
                self.scroll_to_bottom();
                Some(submission)
            }
            Err(e) => {
                self.show_alert(e.to_string());
                None
            }
        }
    }

    /// Feed progress from the cycle task back into the session.
    pub fn apply(&mut self, event: CycleEvent) {
        match event {
            CycleEvent::Uploaded => self.session.enter_asking(),
            CycleEvent::Finished(outcome) => match self.session.finish_submit(outcome) {
                Ok(_) => {
                    self.cursor = 0;
                    self.scroll_to_bottom();
                }
                Err(e) => self.show_alert(e.to_string()),
            },
        }
    }

    pub fn tick(&mut self) {
        if self.is_busy() {
            self.loading_frame = (self.loading_frame + 1) % 4;
        }
    }

    // ── Scrolling ───────────────────────────────────────────────────────

    pub fn scroll_up(&mut self, lines: u16) {
        let current = self.scroll.min(self.max_scroll);
        self.scroll = current.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let next = self.scroll.saturating_add(lines);
        self.scroll = if next >= self.max_scroll { u16::MAX } else { next };
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }
}
