//! pathguard entry point.
//!
//! ```bash
//! cargo run -p pathguard-cli -- check src/main.ts
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pathguard_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directives = if cli.verbose {
        "pathguard_kernel=debug,pathguard_cli=debug"
    } else {
        "pathguard_kernel=info,pathguard_cli=info"
    };
    // RUST_LOG wins when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("pathguard: {e:#}");
            ExitCode::from(2)
        }
    }
}
