//! Execution strategy selection.

/// How a parsing, ranking, removal, or matching operation fans out its work.
///
/// Both strategies implement the same contract and produce identical result
/// sets; `Parallel` distributes independent work across rayon workers and
/// joins before returning, so callers never observe partial state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// Run the operation on the calling thread.
    #[default]
    Sequential,
    /// Fan independent work out across the rayon thread pool.
    Parallel,
}
