// src/main.rs

use std::io::{IsTerminal, Write};
use std::time::Duration;

use upkeep::report::Reporter;
use upkeep::types::OutputStyle;
use upkeep::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        let _ = writeln!(std::io::stderr(), "upkeep error: {err:?}");
        std::process::exit(upkeep::errors::EXIT_CONFIG);
    }

    let style = if args.plain || !std::io::stderr().is_terminal() {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    };

    // The only place the process exits with a non-zero status.
    if let Err(err) = run(args).await {
        Reporter::new(style, Duration::ZERO).failure(&err);
        std::process::exit(err.exit_code());
    }
}
