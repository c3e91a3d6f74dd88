//! Line-command front-end for driving a workflow interactively.
//!
//! Parsing is separate from execution so malformed input never reaches
//! the engine; the binary is a thin read-dispatch-print loop around
//! [`parse_command`] and [`execute`].

use crate::workflow::Workflow;

/// Start-up banner listing the available commands.
pub const BANNER: &str = "\
Workflow Scheduling Console
Commands:
  addTask <task_name> <duration>
  addDependency <task_name> <dependency_name>
  calculate
  earliestCompletionTime
  latestCompletionTime
  exit";

const USAGE_ADD_TASK: &str = "Usage: addTask <task_name> <duration>";
const USAGE_ADD_DEPENDENCY: &str = "Usage: addDependency <task_name> <dependency_name>";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTask { name: String, duration: f64 },
    AddDependency { task: String, dependency: String },
    Calculate,
    EarliestCompletionTime,
    LatestCompletionTime,
    Exit,
}

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print this reply and keep reading.
    Reply(String),
    /// Leave the loop.
    Quit,
}

/// Parse one input line.
///
/// `Err` carries the message to print for malformed or unknown input;
/// such lines are never forwarded to the engine. Durations must parse as
/// finite, non-negative numbers. Trailing arguments on zero-argument
/// commands are ignored.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(action) = parts.next() else {
        return Err("Unknown command".to_string());
    };
    let args: Vec<&str> = parts.collect();

    match action {
        "addTask" => match args.as_slice() {
            [name, duration] => {
                let duration: f64 = duration
                    .parse()
                    .map_err(|_| USAGE_ADD_TASK.to_string())?;
                if !duration.is_finite() || duration < 0.0 {
                    return Err(USAGE_ADD_TASK.to_string());
                }
                Ok(Command::AddTask {
                    name: name.to_string(),
                    duration,
                })
            }
            _ => Err(USAGE_ADD_TASK.to_string()),
        },
        "addDependency" => match args.as_slice() {
            [task, dependency] => Ok(Command::AddDependency {
                task: task.to_string(),
                dependency: dependency.to_string(),
            }),
            _ => Err(USAGE_ADD_DEPENDENCY.to_string()),
        },
        "calculate" => Ok(Command::Calculate),
        "earliestCompletionTime" => Ok(Command::EarliestCompletionTime),
        "latestCompletionTime" => Ok(Command::LatestCompletionTime),
        "exit" => Ok(Command::Exit),
        _ => Err("Unknown command".to_string()),
    }
}

/// Apply a command to the workflow and render the reply.
///
/// Engine errors become one-line replies; the console never terminates
/// the process on them.
pub fn execute(workflow: &mut Workflow, command: Command) -> Outcome {
    match command {
        Command::AddTask { name, duration } => {
            workflow.add_task(&name, duration);
            Outcome::Reply(format!(
                "Added task {name} with duration {}",
                fmt_time(duration)
            ))
        }
        Command::AddDependency { task, dependency } => {
            workflow.add_dependency(&task, &dependency);
            Outcome::Reply(format!("Added dependency from {dependency} to {task}"))
        }
        Command::Calculate => match workflow.calculate_times() {
            Ok(()) => Outcome::Reply("Calculated times for all tasks.".to_string()),
            Err(err) => Outcome::Reply(format!("Error: {err}")),
        },
        Command::EarliestCompletionTime => match workflow.earliest_completion_time() {
            Ok(time) => Outcome::Reply(format!("Earliest completion time: {}", fmt_time(time))),
            Err(err) => Outcome::Reply(format!("Error: {err}")),
        },
        Command::LatestCompletionTime => match workflow.latest_completion_time() {
            Ok(time) => Outcome::Reply(format!("Latest completion time: {}", fmt_time(time))),
            Err(err) => Outcome::Reply(format!("Error: {err}")),
        },
        Command::Exit => Outcome::Quit,
    }
}

/// Render a time without a trailing `.0` when it is whole.
fn fmt_time(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
