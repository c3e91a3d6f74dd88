//! Topological ordering of the task arena.
//!
//! Uses Kahn's in-degree algorithm: every node's remaining dependency
//! count is tracked explicitly, so a cycle shows up as a shortfall in the
//! output length instead of unbounded recursion. The traversal covers
//! every registered task, including disconnected components.

use std::collections::VecDeque;

use crate::interner::TaskId;
use crate::models::Task;

/// Error raised when the dependency relation is not a DAG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    CycleDetected,
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleDetected => write!(f, "Cycle detected in task dependency graph"),
        }
    }
}

impl std::error::Error for SortError {}

/// Produce an order in which every task appears after all of its
/// dependencies.
///
/// Ties are broken by arena id (registration order), which makes the
/// result deterministic; callers may rely only on topological validity.
pub fn topological_sort(tasks: &[Task]) -> Result<Vec<TaskId>, SortError> {
    // Parallel edges count once per registration; each dependent visit
    // below removes exactly one.
    let mut in_degree: Vec<usize> = tasks.iter().map(|t| t.dependencies.len()).collect();

    let mut queue: VecDeque<TaskId> = (0..tasks.len() as TaskId)
        .filter(|&id| in_degree[id as usize] == 0)
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(tasks.len());

    while let Some(id) = queue.pop_front() {
        order.push(id);

        for &dependent in &tasks[id as usize].dependents {
            let degree = &mut in_degree[dependent as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() != tasks.len() {
        return Err(SortError::CycleDetected);
    }

    Ok(order)
}
