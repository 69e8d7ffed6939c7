//! An editing session: one editor, one display, one history tape.
//!
//! The session is the only thing front ends talk to. Each input event turns
//! into exactly one editor call followed by a display refresh.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::calculator::{CalcError, ExpressionEditor, format_grouped, format_result};
use crate::config::Config;
use crate::display::Display;
use crate::input::{InputEvent, Key, Keymap};

/// A past calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// The expression as it was evaluated.
    pub expression: String,
    /// The numeric value.
    pub value: f64,
    /// The value formatted the way the display shows it.
    pub display_result: String,
}

pub struct Session {
    editor: ExpressionEditor,
    display: Display,
    keymap: Keymap,
    history: VecDeque<HistoryEntry>,
    history_capacity: usize,
    error_text: String,
    descriptive_errors: bool,
    group_digits: bool,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let editor = ExpressionEditor::with_policy(config.editor.operator_after_result);
        let display = Display::new(editor.current_display_value(), config.display.error_hold());

        Self {
            editor,
            display,
            keymap: Keymap::new(config.keys.delete),
            history: VecDeque::new(),
            history_capacity: config.history.capacity,
            error_text: config.display.error_text.clone(),
            descriptive_errors: config.display.descriptive_errors,
            group_digits: config.display.group_digits,
        }
    }

    pub fn editor(&self) -> &ExpressionEditor {
        &self.editor
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// What the display currently shows.
    pub fn display_text(&self) -> &str {
        self.display.text()
    }

    /// Past calculations, newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Map a key and handle it. Unrecognised keys are ignored.
    pub fn handle_key(&mut self, key: Key, now: Instant) -> Result<(), CalcError> {
        match self.keymap.map(key) {
            Some(event) => self.handle(event, now),
            None => {
                debug!(?key, "Ignoring unmapped key");
                Ok(())
            }
        }
    }

    /// Apply one input event to the editor and refresh the display.
    ///
    /// A failed evaluation is returned after the display switched to the
    /// error text; the revert is applied by [`Session::tick`].
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<(), CalcError> {
        debug!(?event, expression = self.editor.expression(), "Input");

        match event {
            InputEvent::Digit(d) => self.editor.append_digit(d),
            InputEvent::DecimalPoint => self.editor.append_decimal_point(),
            InputEvent::Operator(op) => self.editor.append_operator(op),
            InputEvent::Backspace => self.editor.backspace(),
            InputEvent::ClearEntry => self.editor.clear_entry(),
            InputEvent::AllClear => self.editor.all_clear(),
            InputEvent::Evaluate => return self.evaluate(now),
        }

        self.display.show(self.state_text());
        Ok(())
    }

    /// Apply a due error revert. Returns `true` if the display changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.display.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.display.next_deadline()
    }

    fn evaluate(&mut self, now: Instant) -> Result<(), CalcError> {
        let expression = self.editor.expression().to_string();

        match self.editor.evaluate() {
            Ok(value) => {
                info!(%expression, value, "Evaluated");
                self.record(expression, value);
                self.display.show(self.state_text());
                Ok(())
            }
            Err(err) => {
                warn!(%expression, error = %err, "Evaluation failed");
                let message = if self.descriptive_errors {
                    format!("{}: {}", self.error_text, err.short_label())
                } else {
                    self.error_text.clone()
                };
                self.display.show_error(message, self.state_text(), now);
                Err(err)
            }
        }
    }

    fn record(&mut self, expression: String, value: f64) {
        if self.history_capacity == 0 {
            return;
        }
        self.history.push_front(HistoryEntry {
            expression,
            value,
            display_result: self.format_value(value),
        });
        self.history.truncate(self.history_capacity);
    }

    /// The display text derived from editor state.
    fn state_text(&self) -> String {
        match self.editor.last_result() {
            Some(value) if self.editor.expression().is_empty() => self.format_value(value),
            _ => self.editor.current_display_value(),
        }
    }

    fn format_value(&self, value: f64) -> String {
        if self.group_digits {
            format_grouped(value)
        } else {
            format_result(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{MathCause, MathError, NonFinite, Operator};
    use std::time::Duration;

    fn feed(session: &mut Session, keys: &str, now: Instant) {
        for c in keys.chars() {
            let _ = session.handle_key(Key::Char(c), now);
        }
    }

    #[test]
    fn test_display_follows_editor() {
        let now = Instant::now();
        let mut session = Session::new(&Config::default());
        assert_eq!(session.display_text(), "0");

        feed(&mut session, "12+3", now);
        assert_eq!(session.display_text(), "12+3");

        session.handle(InputEvent::Evaluate, now).unwrap();
        assert_eq!(session.display_text(), "15");
    }

    #[test]
    fn test_error_then_revert() {
        let now = Instant::now();
        let mut session = Session::new(&Config::default());
        feed(&mut session, "6/0", now);

        let err = session.handle_key(Key::Enter, now).unwrap_err();
        assert_eq!(
            err,
            CalcError::Math(MathError::new(
                NonFinite::PositiveInfinity,
                MathCause::DivisionByZero
            ))
        );
        assert_eq!(session.display_text(), "Error");
        assert_eq!(session.editor().expression(), "6/0");

        assert!(session.tick(now + Duration::from_millis(1500)));
        assert_eq!(session.display_text(), "6/0");
    }

    #[test]
    fn test_input_during_error_wins() {
        let now = Instant::now();
        let mut session = Session::new(&Config::default());
        feed(&mut session, "6/0=", now);
        assert_eq!(session.display_text(), "Error");

        session.handle_key(Key::Backspace, now + Duration::from_millis(200)).unwrap();
        assert_eq!(session.display_text(), "6/");

        assert!(!session.tick(now + Duration::from_secs(5)));
        assert_eq!(session.display_text(), "6/");
    }

    #[test]
    fn test_descriptive_error() {
        let mut config = Config::default();
        config.display.descriptive_errors = true;
        let mut session = Session::new(&config);

        let err = session.handle(InputEvent::Evaluate, Instant::now()).unwrap_err();
        assert_eq!(err, CalcError::EmptyExpression);
        assert_eq!(session.display_text(), "Error: empty");
    }

    #[test]
    fn test_descriptive_error_distinguishes_overflow() {
        let mut config = Config::default();
        config.display.descriptive_errors = true;
        let mut session = Session::new(&config);
        let now = Instant::now();

        let huge = "9".repeat(200);
        feed(&mut session, &format!("{huge}*{huge}="), now);
        assert_eq!(session.display_text(), "Error: overflow");

        session.handle_key(Key::Escape, now).unwrap();
        feed(&mut session, "6/0=", now);
        assert_eq!(session.display_text(), "Error: division by zero");
    }

    #[test]
    fn test_history_is_bounded() {
        let now = Instant::now();
        let mut config = Config::default();
        config.history.capacity = 2;
        let mut session = Session::new(&config);

        feed(&mut session, "1+1=2+2=3+3=", now);
        let expressions: Vec<&str> = session.history().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["3+3", "2+2"]);
        assert_eq!(session.history().next().map(|e| e.value), Some(6.0));
    }

    #[test]
    fn test_history_disabled() {
        let mut config = Config::default();
        config.history.capacity = 0;
        let mut session = Session::new(&config);
        feed(&mut session, "1+1=", Instant::now());
        assert_eq!(session.history().count(), 0);
    }

    #[test]
    fn test_grouped_result() {
        let mut config = Config::default();
        config.display.group_digits = true;
        let mut session = Session::new(&config);

        feed(&mut session, "1000*1000=", Instant::now());
        assert_eq!(session.display_text(), "1,000,000");
        assert_eq!(session.history().next().unwrap().display_result, "1,000,000");

        session
            .handle(InputEvent::Operator(Operator::Add), Instant::now())
            .unwrap();
        assert_eq!(session.display_text(), "1000000+");
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut session = Session::new(&Config::default());
        feed(&mut session, "4x", Instant::now());
        assert_eq!(session.display_text(), "4");
    }
}
