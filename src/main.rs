use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keycalc::input::Keypad;
use keycalc::{Config, InputEvent, Outcome, Session};

#[derive(Parser)]
#[command(name = "keycalc", version, about = "A keypad arithmetic calculator")]
struct Cli {
    /// Config file (defaults to $KEYCALC_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Decimal places kept after evaluation, overriding the config
    #[arg(long, global = true)]
    precision: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Type an expression and evaluate it
    Eval {
        expression: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a key sequence such as "12+3{Enter}"
    Keys {
        sequence: String,
        /// Print the display after every key
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show the keypad layout
    Keypad,
    /// Read key sequences from stdin, one per line
    Repl,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keycalc=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(precision) = cli.precision {
        config.precision = precision;
        config.validate().context("Invalid --precision")?;
    }

    let mut session = Session::new(&config);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval { expression, json } => eval(&mut session, &expression, json),
        Command::Keys { sequence, verbose } => keys(&mut session, &sequence, verbose),
        Command::Keypad => {
            println!("{}", Keypad::standard().render());
            Ok(ExitCode::SUCCESS)
        }
        Command::Repl => repl(&mut session),
    }
}

fn exit_code(session: &Session) -> ExitCode {
    if session.engine().is_showing_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn eval(session: &mut Session, expression: &str, json: bool) -> Result<ExitCode> {
    for c in expression.chars() {
        if session.handle(InputEvent::Token(c)) == Outcome::Refused {
            warn!(ch = ?c, "skipping character");
        }
    }

    let typed = session.engine().buffer().to_string();
    let outcome = session.handle(InputEvent::Evaluate);

    if json {
        let value = match &outcome {
            Outcome::Evaluated(result) => result.value(),
            _ => None,
        };
        let report = serde_json::json!({
            "expression": typed,
            "display": session.display(),
            "value": value,
            "ok": !session.engine().is_showing_error(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode result")?
        );
    } else {
        println!("{}", session.display());
    }

    Ok(exit_code(session))
}

fn keys(session: &mut Session, sequence: &str, verbose: bool) -> Result<ExitCode> {
    let displays = session
        .replay(sequence)
        .with_context(|| format!("Invalid key sequence {sequence:?}"))?;

    if verbose {
        for display in &displays {
            println!("{display}");
        }
    } else {
        println!("{}", session.display());
    }

    Ok(exit_code(session))
}

fn repl(session: &mut Session) -> Result<ExitCode> {
    info!("Reading key sequences from stdin");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{}", session.display())?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }

        if let Err(e) = session.replay(line) {
            eprintln!("error: {e}");
            continue;
        }
        writeln!(stdout, "{}", session.display())?;
        stdout.flush()?;
    }

    Ok(ExitCode::SUCCESS)
}
