use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use calcpad::calculator::OperatorAfterResult;
use calcpad::logging::{self, LogTarget};
use calcpad::{Config, Session, ui};

#[derive(Parser)]
#[command(name = "calcpad")]
#[command(about = "Keyboard-driven arithmetic expression editor", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/calcpad/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a key script instead of the interactive UI, e.g. "2+3*4="
    #[arg(short, long)]
    keys: Option<String>,

    /// Print the history after a key script
    #[arg(long, requires = "keys")]
    show_history: bool,

    /// Operators typed after a result ignore it instead of continuing from it
    #[arg(long)]
    discard_after_result: bool,

    /// How long errors stay on the display, in milliseconds
    #[arg(long)]
    error_hold_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Command-line flags win over the config file.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if cli.discard_after_result {
        config.editor.operator_after_result = OperatorAfterResult::Discard;
    }
    if let Some(ms) = cli.error_hold_ms {
        config.display.error_hold_ms = ms;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = LogTarget::select(cli.keys.is_none(), cli.log_file.as_deref());
    logging::init(&target, cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&cli, &mut config);

    let mut session = Session::new(&config);

    match cli.keys {
        Some(script) => {
            let outcome = ui::run_script(&mut session, &script);
            info!(failures = outcome.failures, "Script finished");
            println!("{}", outcome.display);
            if cli.show_history {
                for entry in session.history() {
                    println!("{} = {}", entry.expression, entry.display_result);
                }
            }
        }
        None => ui::run_terminal(&mut session)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overridden(args: &[&str], mut config: Config) -> Config {
        let cli = Cli::try_parse_from(args).unwrap();
        apply_overrides(&cli, &mut config);
        config
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut base = Config::default();
        base.display.error_hold_ms = 900;
        base.editor.operator_after_result = OperatorAfterResult::Discard;

        let config = overridden(&["calcpad"], base);
        assert_eq!(config.display.error_hold_ms, 900);
        assert_eq!(config.editor.operator_after_result, OperatorAfterResult::Discard);
    }

    #[test]
    fn test_flags_override_config() {
        let config = overridden(
            &["calcpad", "--discard-after-result", "--error-hold-ms", "2500"],
            Config::default(),
        );
        assert_eq!(config.editor.operator_after_result, OperatorAfterResult::Discard);
        assert_eq!(config.display.error_hold_ms, 2500);
    }

    #[test]
    fn test_show_history_requires_keys() {
        assert!(Cli::try_parse_from(["calcpad", "--show-history"]).is_err());
        assert!(Cli::try_parse_from(["calcpad", "--keys", "1+1=", "--show-history"]).is_ok());
    }
}
