//! Task registry and the public scheduling surface.

use thiserror::Error;

use crate::backward_pass::{backward_pass, max_earliest_finish};
use crate::config::WorkflowConfig;
use crate::forward_pass::forward_pass;
use crate::interner::NameInterner;
use crate::models::{Task, TaskTiming};
use crate::sorting::{topological_sort, SortError};
use crate::{log_changes, log_checks, log_debug};

/// Errors surfaced by the workflow's public operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Cycle detected in task dependency graph")]
    CycleDetected,
    #[error("Workflow has no tasks")]
    EmptyWorkflow,
}

impl From<SortError> for WorkflowError {
    fn from(err: SortError) -> Self {
        match err {
            SortError::CycleDetected => WorkflowError::CycleDetected,
        }
    }
}

/// A registry of tasks and their precedence edges.
///
/// The workflow owns every task in an arena; edges are arena ids, so the
/// graph has a single owner and no shared mutable task objects. Tasks and
/// edges only accumulate; there is no removal.
#[derive(Debug, Default)]
pub struct Workflow {
    names: NameInterner,
    tasks: Vec<Task>,
    timings: Vec<TaskTiming>,
    config: WorkflowConfig,
}

impl Workflow {
    /// Create an empty workflow with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workflow with the given configuration.
    pub fn with_config(config: WorkflowConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register a task if the name is unseen.
    ///
    /// Registering an existing name is a no-op that preserves the task and
    /// its edges: callers get register-if-absent semantics, not an error.
    pub fn add_task(&mut self, name: &str, duration: f64) {
        if self.names.get(name).is_some() {
            log_checks!(
                self.config.verbosity,
                "task {name:?} already registered, ignoring"
            );
            return;
        }

        let id = self.names.intern(name);
        debug_assert_eq!(id as usize, self.tasks.len());
        self.tasks.push(Task::new(name.to_string(), duration));
        self.timings.push(TaskTiming::default());
        log_changes!(
            self.config.verbosity,
            "added task {name:?} with duration {duration}"
        );
    }

    /// Record that `task` may not start until `dependency` finishes.
    ///
    /// Both names must already be registered; otherwise the call leaves
    /// the graph untouched. Repeated calls with the same pair store
    /// parallel edges, which only re-tighten the same max/min during
    /// propagation.
    pub fn add_dependency(&mut self, task: &str, dependency: &str) {
        let (Some(task_id), Some(dep_id)) = (self.names.get(task), self.names.get(dependency))
        else {
            log_checks!(
                self.config.verbosity,
                "dependency {dependency:?} -> {task:?} ignored: unregistered name"
            );
            return;
        };

        self.tasks[task_id as usize].dependencies.push(dep_id);
        self.tasks[dep_id as usize].dependents.push(task_id);
        log_changes!(
            self.config.verbosity,
            "added dependency {dependency:?} -> {task:?}"
        );
    }

    /// Recompute all four timing fields for every task.
    ///
    /// Each invocation rebuilds the timing table from scratch, so the
    /// result depends only on the current graph and repeated calls are
    /// idempotent. Fails fast with [`WorkflowError::CycleDetected`] before
    /// any propagation runs; an empty workflow is a vacuous success.
    pub fn calculate_times(&mut self) -> Result<(), WorkflowError> {
        if self.tasks.is_empty() {
            return Ok(());
        }

        let order = topological_sort(&self.tasks)?;
        let mut timings = forward_pass(&self.tasks, &order);
        backward_pass(&self.tasks, &order, &mut timings);

        for (task, timing) in self.tasks.iter().zip(&timings) {
            log_debug!(
                self.config.verbosity,
                "{}: EST={} EFT={} LST={} LFT={}",
                task.name,
                timing.earliest_start,
                timing.earliest_finish,
                timing.latest_start,
                timing.latest_finish
            );
        }

        self.timings = timings;
        log_changes!(
            self.config.verbosity,
            "recalculated times for {} tasks",
            self.tasks.len()
        );
        Ok(())
    }

    /// Earliest time the whole project can finish: the maximum earliest
    /// finish over all tasks.
    pub fn earliest_completion_time(&self) -> Result<f64, WorkflowError> {
        max_earliest_finish(&self.timings).ok_or(WorkflowError::EmptyWorkflow)
    }

    /// Latest completion time: the maximum latest finish over all tasks.
    /// Equals the earliest completion time once [`Self::calculate_times`]
    /// has run, since every sink is pinned to the makespan.
    pub fn latest_completion_time(&self) -> Result<f64, WorkflowError> {
        self.timings
            .iter()
            .map(|timing| timing.latest_finish)
            .fold(None, |best, finish| {
                Some(best.map_or(finish, |b: f64| b.max(finish)))
            })
            .ok_or(WorkflowError::EmptyWorkflow)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by name.
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.names.get(name).map(|id| &self.tasks[id as usize])
    }

    /// Look up a task's timing by name.
    ///
    /// Values reflect the last [`Self::calculate_times`] run; before the
    /// first run the earliest fields are zero and the latest unbounded.
    pub fn timing(&self, name: &str) -> Option<&TaskTiming> {
        self.names.get(name).map(|id| &self.timings[id as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The two-branch graph used throughout: a 2d root, a 3d and a 4d
    /// branch, and a 1d join task.
    fn diamond() -> Workflow {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 2.0);
        workflow.add_task("b", 3.0);
        workflow.add_task("c", 4.0);
        workflow.add_task("d", 1.0);
        workflow.add_dependency("b", "a");
        workflow.add_dependency("c", "a");
        workflow.add_dependency("d", "b");
        workflow.add_dependency("d", "c");
        workflow
    }

    #[test]
    fn test_two_task_chain() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 5.0);
        workflow.add_task("b", 3.0);
        workflow.add_dependency("b", "a");
        workflow.calculate_times().unwrap();

        let a = workflow.timing("a").unwrap();
        let b = workflow.timing("b").unwrap();
        assert_eq!(a.earliest_start, 0.0);
        assert_eq!(a.earliest_finish, 5.0);
        assert_eq!(b.earliest_start, 5.0);
        assert_eq!(b.earliest_finish, 8.0);
        assert_eq!(workflow.earliest_completion_time(), Ok(8.0));
        assert_eq!(workflow.latest_completion_time(), Ok(8.0));
    }

    #[test]
    fn test_diamond_times_and_slack() {
        let mut workflow = diamond();
        workflow.calculate_times().unwrap();

        assert_eq!(workflow.timing("a").unwrap().earliest_finish, 2.0);
        assert_eq!(workflow.timing("b").unwrap().earliest_finish, 5.0);
        assert_eq!(workflow.timing("c").unwrap().earliest_finish, 6.0);
        assert_eq!(workflow.timing("d").unwrap().earliest_start, 6.0);
        assert_eq!(workflow.timing("d").unwrap().earliest_finish, 7.0);
        assert_eq!(workflow.earliest_completion_time(), Ok(7.0));

        // The shorter branch has a day of slack; the longer one is critical.
        assert_eq!(workflow.timing("b").unwrap().slack, 1.0);
        assert_eq!(workflow.timing("c").unwrap().slack, 0.0);
        assert!(workflow.timing("c").unwrap().is_critical());
    }

    #[test]
    fn test_duplicate_add_task_preserves_existing() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 5.0);
        workflow.add_task("b", 3.0);
        workflow.add_dependency("b", "a");

        // Re-registering must not replace the task or drop its edges.
        workflow.add_task("a", 99.0);
        workflow.add_task("b", 99.0);

        assert_eq!(workflow.len(), 2);
        assert_eq!(workflow.task("a").unwrap().duration, 5.0);
        assert_eq!(workflow.task("b").unwrap().dependencies.len(), 1);

        workflow.calculate_times().unwrap();
        assert_eq!(workflow.earliest_completion_time(), Ok(8.0));
    }

    #[test]
    fn test_unknown_dependency_leaves_graph_unchanged() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 5.0);
        workflow.add_dependency("a", "ghost");
        workflow.add_dependency("ghost", "a");

        assert!(workflow.task("a").unwrap().dependencies.is_empty());
        assert!(workflow.task("a").unwrap().dependents.is_empty());
        workflow.calculate_times().unwrap();
        assert_eq!(workflow.earliest_completion_time(), Ok(5.0));
    }

    #[test]
    fn test_parallel_edges_do_not_change_times() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 5.0);
        workflow.add_task("b", 3.0);
        workflow.add_dependency("b", "a");
        workflow.add_dependency("b", "a");
        workflow.calculate_times().unwrap();

        assert_eq!(workflow.task("b").unwrap().dependencies.len(), 2);
        assert_eq!(workflow.earliest_completion_time(), Ok(8.0));
        assert_eq!(workflow.timing("a").unwrap().latest_finish, 5.0);
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let mut workflow = diamond();
        workflow.calculate_times().unwrap();
        let first: Vec<TaskTiming> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| *workflow.timing(n).unwrap())
            .collect();

        workflow.calculate_times().unwrap();
        let second: Vec<TaskTiming> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| *workflow.timing(n).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_recalculation_after_growth() {
        let mut workflow = diamond();
        workflow.calculate_times().unwrap();
        assert_eq!(workflow.earliest_completion_time(), Ok(7.0));

        // Extend the project past the old makespan and recalculate.
        workflow.add_task("e", 10.0);
        workflow.add_dependency("e", "d");
        workflow.calculate_times().unwrap();

        assert_eq!(workflow.earliest_completion_time(), Ok(17.0));
        assert_eq!(workflow.timing("d").unwrap().latest_finish, 7.0);
        assert_eq!(workflow.timing("b").unwrap().slack, 1.0);
    }

    #[test]
    fn test_cycle_detected() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 1.0);
        workflow.add_task("b", 2.0);
        workflow.add_dependency("a", "b");
        workflow.add_dependency("b", "a");

        assert_eq!(
            workflow.calculate_times(),
            Err(WorkflowError::CycleDetected)
        );
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 1.0);
        workflow.add_dependency("a", "a");

        assert_eq!(
            workflow.calculate_times(),
            Err(WorkflowError::CycleDetected)
        );
    }

    #[test]
    fn test_empty_workflow() {
        let mut workflow = Workflow::new();
        assert!(workflow.is_empty());
        workflow.calculate_times().unwrap();
        assert_eq!(
            workflow.earliest_completion_time(),
            Err(WorkflowError::EmptyWorkflow)
        );
        assert_eq!(
            workflow.latest_completion_time(),
            Err(WorkflowError::EmptyWorkflow)
        );
    }

    #[test]
    fn test_disconnected_components() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 2.0);
        workflow.add_task("b", 3.0);
        workflow.add_task("x", 9.0);
        workflow.add_dependency("b", "a");
        workflow.calculate_times().unwrap();

        // The isolated task dominates the makespan; the short chain
        // inherits its slack.
        assert_eq!(workflow.earliest_completion_time(), Ok(9.0));
        assert_eq!(workflow.timing("b").unwrap().latest_finish, 9.0);
        assert_eq!(workflow.timing("b").unwrap().slack, 4.0);
        assert!(workflow.timing("x").unwrap().is_critical());
    }

    #[test]
    fn test_timing_invariants_hold_across_graph() {
        let mut workflow = diamond();
        workflow.add_task("e", 2.5);
        workflow.add_dependency("e", "b");
        workflow.calculate_times().unwrap();

        for name in ["a", "b", "c", "d", "e"] {
            let task = workflow.task(name).unwrap();
            let timing = workflow.timing(name).unwrap();
            assert_eq!(timing.earliest_finish, timing.earliest_start + task.duration);
            assert_eq!(timing.latest_start, timing.latest_finish - task.duration);
            if task.is_source() {
                assert_eq!(timing.earliest_start, 0.0);
            }
            if task.is_sink() {
                assert_eq!(
                    timing.latest_finish,
                    workflow.earliest_completion_time().unwrap()
                );
            }
        }
    }

    #[test]
    fn test_queries_before_first_calculation() {
        let mut workflow = Workflow::new();
        workflow.add_task("a", 5.0);

        // Constructor state: earliest fields are zero, latest unbounded.
        assert_eq!(workflow.earliest_completion_time(), Ok(0.0));
        assert_eq!(workflow.latest_completion_time(), Ok(f64::INFINITY));
    }
}
