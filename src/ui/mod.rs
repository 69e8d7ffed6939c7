pub mod script;
pub mod terminal;

pub use script::run_script;
pub use terminal::{run as run_terminal, translate_key};
