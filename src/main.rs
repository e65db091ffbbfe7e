use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use intbst::cli::Cli;
use intbst::error::SessionError;
use intbst::session::{Flow, Session};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        cli.build_tree(),
        cli.display_config(),
    );

    let outcome = drive(&cli, &mut session);

    // The tree is torn down however the session ended.
    let freed = session.teardown();
    tracing::info!(freed, "tree torn down");

    match outcome {
        Ok(Flow::Abort) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(SessionError::InputClosed) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the data file and, unless loading ran out of room, runs the menu.
fn drive<R: BufRead, W: Write>(
    cli: &Cli,
    session: &mut Session<R, W>,
) -> Result<Flow, SessionError> {
    let reader = session.open_data_file(cli.file.as_deref())?;
    match session.load(reader)? {
        Flow::Continue => session.run(),
        flow => Ok(flow),
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG, when set, takes precedence over the -d count.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout belongs to the menu.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}
