//! Forward pass: earliest start and finish times.

use crate::interner::TaskId;
use crate::models::{Task, TaskTiming};

/// Compute EST/EFT for every task by scanning in topological order.
///
/// The timing table is rebuilt from scratch on every invocation: earliest
/// times start at zero and latest times stay unbounded until the backward
/// pass runs, so repeated calculations over an unchanged graph give
/// identical results. Scanning in topological order guarantees a task's
/// finish time is final before any of its dependents read it.
pub fn forward_pass(tasks: &[Task], order: &[TaskId]) -> Vec<TaskTiming> {
    let mut timings = vec![TaskTiming::default(); tasks.len()];

    for &id in order {
        let idx = id as usize;

        let finish = timings[idx].earliest_start + tasks[idx].duration;
        timings[idx].earliest_finish = finish;

        for &dependent in &tasks[idx].dependents {
            let timing = &mut timings[dependent as usize];
            if finish > timing.earliest_start {
                timing.earliest_start = finish;
            }
        }
    }

    timings
}
