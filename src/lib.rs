//! Critical-path-method scheduling engine.
//!
//! Tasks with durations and precedence edges form a directed acyclic
//! graph; a topological sort followed by forward and backward propagation
//! passes yields each task's earliest/latest start and finish times and
//! the overall project completion window. Slack falls out of the four
//! fields; tasks with zero slack lie on the critical path.

pub mod backward_pass;
mod config;
pub mod console;
pub mod forward_pass;
mod interner;
pub mod logging;
mod models;
pub mod sorting;
mod workflow;

pub use backward_pass::{backward_pass, max_earliest_finish};
pub use config::WorkflowConfig;
pub use forward_pass::forward_pass;
pub use interner::TaskId;
pub use models::{Task, TaskTiming, SLACK_EPSILON};
pub use sorting::{topological_sort, SortError};
pub use workflow::{Workflow, WorkflowError};
