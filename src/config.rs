//! Configuration for the workflow engine.

/// Tunables carried by a workflow instance.
#[derive(Clone, Debug, Default)]
pub struct WorkflowConfig {
    /// Diagnostic verbosity: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}
