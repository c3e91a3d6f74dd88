//! Backward pass: latest start and finish times, makespan, slack.

use crate::interner::TaskId;
use crate::models::{Task, TaskTiming};

/// Earliest completion time of the whole project: the maximum earliest
/// finish over all tasks.
///
/// Returns `None` for an empty timing table; the max of an empty set has
/// no value, and the caller decides how to surface that.
pub fn max_earliest_finish(timings: &[TaskTiming]) -> Option<f64> {
    timings
        .iter()
        .map(|timing| timing.earliest_finish)
        .fold(None, |best, finish| {
            Some(best.map_or(finish, |b: f64| b.max(finish)))
        })
}

/// Compute LST/LFT and slack for every task by scanning in reverse
/// topological order.
///
/// Every sink is first pinned to the overall earliest completion time:
/// the project is not done until its last terminal task is, so all sinks
/// share the same latest finish. The reverse scan then guarantees every
/// dependent's latest start is final before it constrains a predecessor's
/// latest finish.
pub fn backward_pass(tasks: &[Task], order: &[TaskId], timings: &mut [TaskTiming]) {
    let Some(makespan) = max_earliest_finish(timings) else {
        return;
    };

    for (task, timing) in tasks.iter().zip(timings.iter_mut()) {
        if task.is_sink() {
            timing.latest_finish = makespan;
        }
    }

    for &id in order.iter().rev() {
        let idx = id as usize;

        let start = timings[idx].latest_finish - tasks[idx].duration;
        timings[idx].latest_start = start;
        timings[idx].slack = start - timings[idx].earliest_start;

        for &dependency in &tasks[idx].dependencies {
            let timing = &mut timings[dependency as usize];
            if start < timing.latest_finish {
                timing.latest_finish = start;
            }
        }
    }
}
