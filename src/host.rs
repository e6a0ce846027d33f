// SPDX-License-Identifier: GPL-3.0-only

//! Reference host that executes interpreter actions.
//!
//! A UI toolkit integrates the keyboard by implementing [`TextTarget`] for
//! its focused text field and forwarding each key press to
//! [`KeyboardSession::on_key`]. After a layout switch it redraws from
//! [`KeyboardSession::current_layout`].
//!
//! [`TextBuffer`] is an in-memory target used by the replay binary and by
//! tests.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use touchboard::config::Config;
//! use touchboard::host::{KeyboardSession, TextBuffer};
//! use touchboard::layout::{KeyCode, LayoutRegistry};
//!
//! let registry = Arc::new(LayoutRegistry::builtin()?);
//! let mut session = KeyboardSession::new(registry, &Config::default(), TextBuffer::new());
//! session.start_input(false);
//! session.on_key(KeyCode::SHIFT);
//! session.on_key(KeyCode(104));
//! session.on_key(KeyCode(105));
//! assert_eq!(session.target().text(), "Hi");
//! ```

use crate::config::Config;
use crate::interpreter::{Action, ControlKey, KeyInterpreter};
use crate::layout::{KeyCode, KeyboardLayout, LayoutRegistry};
use std::sync::Arc;

/// Key event state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed down.
    Pressed,
    /// Key was released.
    Released,
}

/// A control key event dispatched to the text target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key being dispatched.
    pub key: ControlKey,
    /// Whether the key was pressed or released.
    pub state: KeyState,
}

impl KeyEvent {
    /// Creates a new key press event.
    #[must_use]
    pub fn press(key: ControlKey) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    /// Creates a new key release event.
    #[must_use]
    pub fn release(key: ControlKey) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

/// The text field receiving keyboard output.
pub trait TextTarget {
    /// Inserts `text` at the cursor.
    fn commit_text(&mut self, text: &str);

    /// Removes `count` characters before the cursor.
    fn delete_backward(&mut self, count: usize);

    /// Delivers a control key event.
    fn send_key_event(&mut self, event: KeyEvent);
}

/// In-memory text target with the cursor always at the end.
///
/// Enter inserts a newline when pressed. All key events are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    key_events: Vec<KeyEvent>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns every key event received, in order.
    pub fn key_events(&self) -> &[KeyEvent] {
        &self.key_events
    }

    /// Consumes the buffer, returning its contents.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextTarget for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self, count: usize) {
        for _ in 0..count {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn send_key_event(&mut self, event: KeyEvent) {
        if event == KeyEvent::press(ControlKey::Enter) {
            self.text.push('\n');
        }
        self.key_events.push(event);
    }
}

/// One input session: interpreter state bound to a text target.
#[derive(Debug)]
pub struct KeyboardSession<T: TextTarget> {
    registry: Arc<LayoutRegistry>,
    interpreter: KeyInterpreter,
    target: T,
    show_key_preview: bool,
}

impl<T: TextTarget> KeyboardSession<T> {
    /// Creates a session starting in the configured language.
    pub fn new(registry: Arc<LayoutRegistry>, config: &Config, target: T) -> Self {
        tracing::debug!("Keyboard session created");
        Self {
            registry,
            interpreter: KeyInterpreter::from_config(config),
            target,
            show_key_preview: config.show_key_preview,
        }
    }

    /// Begins (or restarts) input into the target.
    pub fn start_input(&mut self, restarting: bool) -> Action {
        let action = self.interpreter.start_input_session(restarting);
        self.execute(&action);
        action
    }

    /// Handles one key press and executes the resulting action.
    pub fn on_key(&mut self, code: KeyCode) -> Action {
        let action = self.interpreter.interpret(code);
        self.execute(&action);
        action
    }

    /// Returns the layout that should currently be displayed.
    pub fn current_layout(&self) -> &KeyboardLayout {
        self.registry
            .resolve(self.interpreter.language(), self.interpreter.mode())
    }

    /// Returns true if the shift indicator should be lit.
    pub fn is_shifted(&self) -> bool {
        self.interpreter.is_shifted()
    }

    /// Whether the host should show an enlarged preview on key press.
    pub fn show_key_preview(&self) -> bool {
        self.show_key_preview
    }

    pub fn interpreter(&self) -> &KeyInterpreter {
        &self.interpreter
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Ends the session, handing back the target.
    pub fn into_target(self) -> T {
        self.target
    }

    fn execute(&mut self, action: &Action) {
        match action {
            Action::CommitText(text) => self.target.commit_text(text),
            Action::DeleteBackward(count) => self.target.delete_backward(*count),
            Action::SendControlKey(key) => {
                self.target.send_key_event(KeyEvent::press(*key));
                self.target.send_key_event(KeyEvent::release(*key));
            }
            Action::SwitchLayout(language, mode) => {
                let layout = self.registry.resolve(*language, *mode);
                tracing::debug!(
                    "Keyboard loaded: language={}, mode={} ({}, {} keys)",
                    language,
                    mode,
                    layout.name,
                    layout.key_count()
                );
            }
            Action::NoOp => {}
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Language, Mode};

    fn session(config: &Config) -> KeyboardSession<TextBuffer> {
        let registry = Arc::new(LayoutRegistry::builtin().expect("Built-in layouts should load"));
        let mut session = KeyboardSession::new(registry, config, TextBuffer::new());
        session.start_input(false);
        session
    }

    /// Test 1: Text buffer delete stops at the start
    #[test]
    fn test_text_buffer_delete() {
        let mut buffer = TextBuffer::new();
        buffer.commit_text("hé😁");
        buffer.delete_backward(1);
        assert_eq!(buffer.text(), "hé");
        buffer.delete_backward(5);
        assert_eq!(buffer.text(), "");
    }

    /// Test 2: Enter is sent as a press/release pair
    #[test]
    fn test_enter_press_release() {
        let mut session = session(&Config::default());
        session.on_key(KeyCode::from('o'));
        session.on_key(KeyCode::from('k'));
        session.on_key(KeyCode::ENTER);

        assert_eq!(session.target().text(), "ok\n");
        assert_eq!(
            session.target().key_events(),
            &[
                KeyEvent::press(ControlKey::Enter),
                KeyEvent::release(ControlKey::Enter)
            ]
        );
    }

    /// Test 3: Current layout follows mode and language switches
    #[test]
    fn test_current_layout_follows_switches() {
        let mut session = session(&Config::default());
        assert_eq!(session.current_layout().language, Some(Language::En));

        session.on_key(KeyCode::LANGUAGE_SWITCH);
        assert_eq!(session.current_layout().language, Some(Language::Ru));
        assert_eq!(session.current_layout().mode, Mode::Letters);

        session.on_key(KeyCode::EMOJI);
        assert_eq!(session.current_layout().mode, Mode::Emoji);

        session.on_key(KeyCode::BACK_TO_LETTERS);
        assert_eq!(session.current_layout().language, Some(Language::Ru));
    }

    /// Test 4: Session honors the configured language and preview flag
    #[test]
    fn test_session_uses_config() {
        let config = Config {
            default_language: Language::Ru,
            show_key_preview: false,
        };
        let session = session(&config);

        assert_eq!(session.interpreter().language(), Language::Ru);
        assert!(!session.show_key_preview());
        assert!(session.current_layout().find_key(KeyCode::from('ж')).is_some());
    }

    /// Test 5: Fresh input resets to letters, restart keeps the mode
    #[test]
    fn test_start_input_resets() {
        let mut session = session(&Config::default());
        session.on_key(KeyCode::SYMBOLS);
        session.on_key(KeyCode::SHIFT);

        assert_eq!(session.start_input(true), Action::NoOp);
        assert_eq!(session.current_layout().mode, Mode::Symbols);
        assert!(!session.is_shifted());

        assert_eq!(
            session.start_input(false),
            Action::SwitchLayout(Language::En, Mode::Letters)
        );
        assert_eq!(session.current_layout().mode, Mode::Letters);
    }
}
