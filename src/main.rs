use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trtlshell::{Shell, ShellConfig};

/// trtlshell - a tiny multi-user shell over an in-memory filesystem.
///
/// Reads one message per line from stdin and prints the replies. A line of
/// the form `@name rest` is sent as user `name`; any other line comes from
/// `--user`.
#[derive(Parser, Debug)]
#[command(name = "trtlshell", version, about)]
struct Args {
    /// User that sends lines without an `@name` prefix
    #[arg(short, long, default_value = "guest")]
    user: String,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Split an optional `@name` prefix off a line.
fn split_sender<'a>(line: &'a str, default_user: &'a str) -> (&'a str, &'a str) {
    match line.trim_start().strip_prefix('@') {
        Some(rest) => {
            let (name, body) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                (default_user, line)
            } else {
                (name, body)
            }
        }
        None => (default_user, line),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    info!(trigger = %config.login_trigger, "starting shell");
    let shell = Shell::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "failed to read input");
                break;
            }
        };

        let (user, body) = split_sender(&line, &args.user);
        if body.trim() == "help" {
            writeln!(stdout, "{}", shell.help())?;
            continue;
        }

        let reply = shell.handle(user, body);
        if reply.should_reply {
            writeln!(stdout, "{}", reply.output)?;
        }
    }

    Ok(())
}
