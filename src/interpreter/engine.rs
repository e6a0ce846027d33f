// SPDX-License-Identifier: GPL-3.0-only

//! The key interpreter state machine.

use crate::app_settings::DELETE_COUNT;
use crate::config::Config;
use crate::input::{decode_codepoint, parse_keycode, ControlCode, ResolvedKeycode};
use crate::interpreter::action::{Action, ControlKey};
use crate::layout::{KeyCode, Language, Mode};
use crate::state::InterpreterState;

/// Turns key codes into actions and owns the session state.
///
/// One interpreter exists per input session. The host feeds it one key code
/// at a time and executes the returned [`Action`]; state can only change
/// through [`KeyInterpreter::interpret`] and
/// [`KeyInterpreter::start_input_session`].
#[derive(Debug, Clone, Default)]
pub struct KeyInterpreter {
    state: InterpreterState,
}

impl KeyInterpreter {
    /// Creates an interpreter in letters mode for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            state: InterpreterState::new(language),
        }
    }

    /// Creates an interpreter using the persisted default language.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_language)
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> InterpreterState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_shifted(&self) -> bool {
        self.state.is_shifted()
    }

    /// Prepares for a new input session.
    ///
    /// Shift is always cleared. Unless the session is merely restarting,
    /// the mode goes back to letters and the host is asked to show the
    /// letters layout.
    pub fn start_input_session(&mut self, restarting: bool) -> Action {
        tracing::info!(
            "Start input session: language={}, restarting={}",
            self.state.language,
            restarting
        );

        if restarting {
            self.state.shift.clear();
            return Action::NoOp;
        }

        self.state.reset_for_session();
        Action::SwitchLayout(self.state.language, Mode::Letters)
    }

    /// Interprets one key code, updating the state.
    ///
    /// Never fails: codes without a meaning produce [`Action::NoOp`].
    pub fn interpret(&mut self, code: KeyCode) -> Action {
        tracing::debug!("Key pressed: {}", code);

        let action = match parse_keycode(code) {
            ResolvedKeycode::Control(ControlCode::Delete) => Action::DeleteBackward(DELETE_COUNT),
            ResolvedKeycode::Control(ControlCode::Shift) => {
                let active = self.state.shift.toggle();
                tracing::debug!("Shift {}", if active { "on" } else { "off" });
                Action::NoOp
            }
            ResolvedKeycode::Enter => Action::SendControlKey(ControlKey::Enter),
            ResolvedKeycode::Space => Action::CommitText(" ".to_string()),
            ResolvedKeycode::Period => Action::CommitText(".".to_string()),
            ResolvedKeycode::Control(ControlCode::LanguageSwitch) => {
                self.state.language = self.state.language.next();
                self.switch_layout(self.state.mode)
            }
            ResolvedKeycode::Control(ControlCode::EmojiMode) => self.switch_layout(Mode::Emoji),
            ResolvedKeycode::Control(ControlCode::SymbolsMode) => self.switch_layout(Mode::Symbols),
            ResolvedKeycode::Control(ControlCode::BackToLetters) => self.switch_layout(Mode::Letters),
            ResolvedKeycode::Emoji(c) => {
                decode_codepoint(u32::from(c)).map_or(Action::NoOp, Action::CommitText)
            }
            ResolvedKeycode::Character(c) => Action::CommitText(self.state.shift.apply(c)),
            ResolvedKeycode::Unrecognized(value) if value < 0 => {
                tracing::debug!("Ignoring unknown control code {}", value);
                Action::NoOp
            }
            ResolvedKeycode::Unrecognized(value) => {
                tracing::warn!("Key code {} is not a Unicode scalar value", value);
                Action::NoOp
            }
        };

        tracing::debug!("{} -> {}", code, action);
        action
    }

    fn switch_layout(&mut self, mode: Mode) -> Action {
        self.state.mode = mode;
        self.state.shift.clear();
        Action::SwitchLayout(self.state.language, mode)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted(language: Language) -> KeyInterpreter {
        let mut interpreter = KeyInterpreter::new(language);
        interpreter.interpret(KeyCode::SHIFT);
        assert!(interpreter.is_shifted());
        interpreter
    }

    /// Test 1: Printable codes without shift commit as-is
    #[test]
    fn test_printable_without_shift() {
        let mut interpreter = KeyInterpreter::default();

        for value in 0..=crate::app_settings::MAX_PRINTABLE_CODE {
            let Some(c) = char::from_u32(value as u32) else {
                continue;
            };
            let action = interpreter.interpret(KeyCode(value));
            if value == KeyCode::ENTER.value() {
                assert_eq!(action, Action::SendControlKey(ControlKey::Enter));
            } else {
                assert_eq!(action, Action::CommitText(c.to_string()), "code {}", value);
            }
            assert!(!interpreter.is_shifted());
        }
    }

    /// Test 2: Lowercase letters are upper-cased once under shift
    #[test]
    fn test_printable_with_shift() {
        for value in 0..=crate::app_settings::MAX_PRINTABLE_CODE {
            let Some(c) = char::from_u32(value as u32).filter(|c| c.is_lowercase()) else {
                continue;
            };
            let mut interpreter = shifted(Language::En);
            let mut upper = c.to_uppercase();
            let expected = match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            };

            assert_eq!(
                interpreter.interpret(KeyCode(value)),
                Action::CommitText(expected.to_string())
            );
            assert!(!interpreter.is_shifted(), "Shift should clear after {:?}", c);
        }
    }

    /// Test 3: Digits and punctuation consume shift without changing case
    #[test]
    fn test_non_letters_clear_shift() {
        for c in ['1', '!', ',', 'Q'] {
            let mut interpreter = shifted(Language::En);

            assert_eq!(interpreter.interpret(KeyCode::from(c)), Action::CommitText(c.to_string()));
            assert!(!interpreter.is_shifted(), "Shift should clear after {:?}", c);
            assert_eq!(interpreter.interpret(KeyCode::from('a')), Action::CommitText("a".into()));
        }
    }

    /// Test 3b: Space, period, delete and enter leave shift on
    #[test]
    fn test_literal_keys_keep_shift() {
        let mut interpreter = shifted(Language::En);

        assert_eq!(interpreter.interpret(KeyCode::SPACE), Action::CommitText(" ".into()));
        assert_eq!(interpreter.interpret(KeyCode::PERIOD), Action::CommitText(".".into()));
        assert_eq!(interpreter.interpret(KeyCode::DELETE), Action::DeleteBackward(1));
        assert_eq!(
            interpreter.interpret(KeyCode::ENTER),
            Action::SendControlKey(ControlKey::Enter)
        );
        assert!(interpreter.is_shifted());

        assert_eq!(interpreter.interpret(KeyCode::from('a')), Action::CommitText("A".into()));
        assert!(!interpreter.is_shifted());
    }

    /// Test 4: Shift toggle twice restores the flag
    #[test]
    fn test_shift_toggle_twice() {
        for initially_shifted in [false, true] {
            let mut interpreter = KeyInterpreter::default();
            if initially_shifted {
                interpreter.interpret(KeyCode::SHIFT);
            }

            assert_eq!(interpreter.interpret(KeyCode::SHIFT), Action::NoOp);
            assert_eq!(interpreter.interpret(KeyCode::SHIFT), Action::NoOp);
            assert_eq!(interpreter.is_shifted(), initially_shifted);
        }
    }

    /// Test 5: Mode and language switches always clear shift
    #[test]
    fn test_switches_clear_shift() {
        let cases = [
            (KeyCode::EMOJI, Language::En, Mode::Emoji),
            (KeyCode::SYMBOLS, Language::En, Mode::Symbols),
            (KeyCode::BACK_TO_LETTERS, Language::En, Mode::Letters),
            (KeyCode::LANGUAGE_SWITCH, Language::Ru, Mode::Letters),
        ];

        for (code, language, mode) in cases {
            let mut interpreter = shifted(Language::En);
            assert_eq!(interpreter.interpret(code), Action::SwitchLayout(language, mode));
            assert!(!interpreter.is_shifted(), "{} should clear shift", code);
            assert_eq!(interpreter.mode(), mode);
            assert_eq!(interpreter.language(), language);
        }
    }

    /// Test 6: Language switch keeps the mode and is an involution
    #[test]
    fn test_language_switch_keeps_mode() {
        let mut interpreter = KeyInterpreter::new(Language::En);
        interpreter.interpret(KeyCode::SYMBOLS);

        assert_eq!(
            interpreter.interpret(KeyCode::LANGUAGE_SWITCH),
            Action::SwitchLayout(Language::Ru, Mode::Symbols)
        );
        assert_eq!(
            interpreter.interpret(KeyCode::LANGUAGE_SWITCH),
            Action::SwitchLayout(Language::En, Mode::Symbols)
        );
        assert_eq!(interpreter.mode(), Mode::Symbols);
    }

    /// Test 7: Mode switches keep the language
    #[test]
    fn test_mode_switch_keeps_language() {
        let mut interpreter = KeyInterpreter::new(Language::Ru);

        assert_eq!(
            interpreter.interpret(KeyCode::EMOJI),
            Action::SwitchLayout(Language::Ru, Mode::Emoji)
        );
        assert_eq!(
            interpreter.interpret(KeyCode::BACK_TO_LETTERS),
            Action::SwitchLayout(Language::Ru, Mode::Letters)
        );
        assert_eq!(interpreter.language(), Language::Ru);
    }

    /// Test 8: Emoji codes commit their decoded text
    #[test]
    fn test_emoji_commit() {
        let mut interpreter = KeyInterpreter::default();
        let action = interpreter.interpret(KeyCode(1 + 0x1F600));

        assert_eq!(action, Action::CommitText("😁".to_string()));
        let units: Vec<u16> = action.committed_text().unwrap().encode_utf16().collect();
        assert_eq!(units, vec![0xD83D, 0xDE01]);
    }

    /// Test 9: Codes above the printable range skip shift handling
    #[test]
    fn test_high_codes_ignore_shift() {
        let mut interpreter = shifted(Language::Ru);

        assert_eq!(interpreter.interpret(KeyCode::from('ж')), Action::CommitText("ж".into()));
        assert!(interpreter.is_shifted());
    }

    /// Test 10: Meaningless codes are ignored without touching state
    #[test]
    fn test_unrecognized_codes_are_noop() {
        let mut interpreter = shifted(Language::En);
        let before = interpreter.state();

        for value in [-7, -100, i32::MIN, 0xD800, 0xDFFF, 0x110000, i32::MAX] {
            assert_eq!(interpreter.interpret(KeyCode(value)), Action::NoOp, "code {}", value);
        }
        assert_eq!(interpreter.state(), before);
    }

    /// Test 11: Fresh session resets mode and shift, keeps language
    #[test]
    fn test_start_fresh_session() {
        let mut interpreter = KeyInterpreter::new(Language::En);
        interpreter.interpret(KeyCode::LANGUAGE_SWITCH);
        interpreter.interpret(KeyCode::EMOJI);
        interpreter.interpret(KeyCode::SHIFT);

        assert_eq!(
            interpreter.start_input_session(false),
            Action::SwitchLayout(Language::Ru, Mode::Letters)
        );
        assert_eq!(interpreter.state(), InterpreterState::new(Language::Ru));
    }

    /// Test 12: Restarting session keeps the mode but clears shift
    #[test]
    fn test_restart_session() {
        let mut interpreter = KeyInterpreter::new(Language::En);
        interpreter.interpret(KeyCode::SYMBOLS);
        interpreter.interpret(KeyCode::SHIFT);

        assert_eq!(interpreter.start_input_session(true), Action::NoOp);
        assert_eq!(interpreter.mode(), Mode::Symbols);
        assert!(!interpreter.is_shifted());
    }

    /// Test 13: Interpreter picks up the configured language
    #[test]
    fn test_from_config() {
        let config = Config {
            default_language: Language::Ru,
            ..Config::default()
        };
        let interpreter = KeyInterpreter::from_config(&config);

        assert_eq!(interpreter.language(), Language::Ru);
        assert_eq!(interpreter.mode(), Mode::Letters);
        assert!(!interpreter.is_shifted());
    }
}
