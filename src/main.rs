//! Interactive console for the critical-path scheduling engine.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use critpath::console::{execute, parse_command, Outcome, BANNER};
use critpath::{Workflow, WorkflowConfig};

/// Interactive critical-path scheduling console.
#[derive(Parser, Debug)]
#[command(name = "critpath", version, about)]
struct Cli {
    /// Increase diagnostic verbosity (-v changes, -vv checks, -vvv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut workflow = Workflow::with_config(WorkflowConfig {
        verbosity: cli.verbose,
    });

    println!("{BANNER}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "Enter command: ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };

        match parse_command(&line?) {
            Ok(command) => match execute(&mut workflow, command) {
                Outcome::Reply(reply) => println!("{reply}"),
                Outcome::Quit => break,
            },
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}
