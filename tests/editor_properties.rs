use std::time::{Duration, Instant};

use calcpad::calculator::{CalcError, ExpressionEditor, Operator, OperatorAfterResult, is_operator_char};
use calcpad::input::Key;
use calcpad::ui::run_script;
use calcpad::{Config, Session};

fn type_keys(editor: &mut ExpressionEditor, keys: &str) {
    for c in keys.chars() {
        match c {
            '.' => editor.append_decimal_point(),
            '0'..='9' => editor.append_digit(c),
            _ => {
                if let Some(op) = Operator::from_char(c) {
                    editor.append_operator(op);
                }
            }
        }
    }
}

#[test]
fn digits_fold_left() {
    for input in ["0", "7", "42", "0007", "9876543210"] {
        let mut editor = ExpressionEditor::new();
        type_keys(&mut editor, input);
        assert_eq!(editor.expression(), input);
    }
}

#[test]
fn second_decimal_point_is_ignored() {
    let mut editor = ExpressionEditor::new();
    type_keys(&mut editor, "3+1.2");
    let before = editor.expression().to_string();
    editor.append_decimal_point();
    assert_eq!(editor.expression(), before);
}

#[test]
fn operators_never_stack() {
    let ops = ['+', '-', '*', '/'];
    for a in ops {
        for b in ops {
            for c in ops {
                let mut editor = ExpressionEditor::new();
                let keys: String = [a, '1', b, c, '2', a, b].iter().collect();
                type_keys(&mut editor, &keys);

                let chars: Vec<char> = editor.expression().chars().collect();
                assert!(
                    !chars
                        .windows(2)
                        .any(|w| is_operator_char(w[0]) && is_operator_char(w[1])),
                    "stacked operators in {:?}",
                    editor.expression()
                );
                assert!(!chars.first().is_some_and(|&c| c != '-' && is_operator_char(c)));
            }
        }
    }
}

#[test]
fn evaluate_empty_fails() {
    let mut editor = ExpressionEditor::new();
    assert_eq!(editor.evaluate(), Err(CalcError::EmptyExpression));
}

#[test]
fn division_by_zero_keeps_state() {
    let mut editor = ExpressionEditor::new();
    type_keys(&mut editor, "6/0");
    assert!(matches!(editor.evaluate(), Err(CalcError::Math(_))));
    assert_eq!(editor.expression(), "6/0");
    assert_eq!(editor.last_result(), None);
}

#[test]
fn precedence_is_respected() {
    let mut editor = ExpressionEditor::new();
    type_keys(&mut editor, "2+3*4");
    assert_eq!(editor.evaluate(), Ok(14.0));
    assert_eq!(editor.expression(), "");
    assert_eq!(editor.last_result(), Some(14.0));
}

#[test]
fn dangling_operator_is_stripped() {
    let mut editor = ExpressionEditor::new();
    type_keys(&mut editor, "5+");
    assert_eq!(editor.evaluate(), Ok(5.0));
}

#[test]
fn digit_after_result_starts_fresh() {
    let mut editor = ExpressionEditor::new();
    type_keys(&mut editor, "9+1");
    assert_eq!(editor.evaluate(), Ok(10.0));
    editor.append_digit('3');
    assert_eq!(editor.expression(), "3");
    assert_eq!(editor.last_result(), None);
}

#[test]
fn backspace_and_all_clear() {
    let mut editor = ExpressionEditor::new();
    editor.backspace();
    assert_eq!(editor.expression(), "");

    type_keys(&mut editor, "8*8");
    editor.evaluate().unwrap();
    type_keys(&mut editor, "*2");
    editor.all_clear();
    assert_eq!(editor.expression(), "");
    assert_eq!(editor.last_result(), None);
    assert_eq!(editor.current_display_value(), "0");
}

#[test]
fn operator_after_result_policies() {
    let mut config = Config::default();
    let mut session = Session::new(&config);
    assert_eq!(run_script(&mut session, "9+1=*2=").display, "20");

    config.editor.operator_after_result = OperatorAfterResult::Discard;
    let mut session = Session::new(&config);
    assert_eq!(run_script(&mut session, "9+1=*").display, "10");
    assert_eq!(run_script(&mut session, "-2=").display, "-2");
}

#[test]
fn error_display_reverts_unless_overridden() {
    let mut config = Config::default();
    config.display.error_hold_ms = 100;
    let mut session = Session::new(&config);
    let start = Instant::now();

    assert_eq!(run_script(&mut session, "0/0=").display, "Error");
    assert!(!session.tick(start));
    assert!(session.tick(start + Duration::from_secs(1)));
    assert_eq!(session.display_text(), "0/0");

    assert_eq!(run_script(&mut session, "=").display, "Error");
    session.handle_key(Key::Escape, start).unwrap();
    assert!(!session.tick(start + Duration::from_secs(1)));
    assert_eq!(session.display_text(), "0");
}
