//! calcpad: a keyboard-driven arithmetic expression editor.
//!
//! The [`calculator`] module holds the editor state machine and evaluator.
//! [`session::Session`] wires an editor to a [`display::Display`] and is what
//! front ends drive, one [`input::InputEvent`] at a time.

pub mod calculator;
pub mod config;
pub mod display;
pub mod input;
pub mod logging;
pub mod session;
pub mod ui;

pub use calculator::{CalcError, ExpressionEditor, Operator, OperatorAfterResult};
pub use config::Config;
pub use session::Session;
