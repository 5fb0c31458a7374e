//! Changed-dependency queries.
//!
//! The list of changed packages comes from an external collaborator (the
//! project's constraint diff script). The automator treats it as a pure query
//! and only formats its answers.

mod command;
mod error;

pub use command::CommandDependencyDiff;
pub use error::DependencyError;

use crate::templates::ChangeSummary;
use std::future::Future;
use std::path::Path;
use tracing::{debug, info_span, Instrument};

/// Which changed packages a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// Every changed package, direct and transitive.
    All,
    /// Only packages the project declares explicitly.
    Direct,
}

/// Arguments of a single changed-dependency query.
#[derive(Debug, Clone, Copy)]
pub struct DependencyQuery<'a> {
    pub scope: ChangeScope,
    /// Git ref the constraints are compared against.
    pub base_ref: &'a str,
    pub python_version: &'a str,
    /// Repository checkout holding the constraint files.
    pub src_dir: &'a Path,
}

/// Source of changed dependency names.
pub trait DependencyDiff {
    /// Returns the changed package names, in the collaborator's order.
    fn changed_dependencies(
        &self,
        query: &DependencyQuery<'_>,
    ) -> impl Future<Output = Result<Vec<String>, DependencyError>> + Send;
}

/// Inputs for deriving a [`ChangeSummary`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    /// Base ref for the direct-dependency query behind the title.
    pub title_base: &'a str,
    /// Base ref for the full query behind the description.
    pub description_base: &'a str,
    pub python_version: &'a str,
    pub src_dir: &'a Path,
}

/// Queries direct and all changed dependencies and formats them into a
/// commit title and a PR description.
///
/// The collaborator is invoked exactly twice; callers should reuse the result
/// rather than summarizing again.
///
/// # Errors
///
/// Returns [`DependencyError`] if either query fails.
pub async fn summarize_changes<D: DependencyDiff>(
    diff: &D,
    request: &SummaryRequest<'_>,
) -> Result<ChangeSummary, DependencyError> {
    let span = info_span!(
        "summarize_changes",
        title_base = %request.title_base,
        description_base = %request.description_base
    );

    async {
        let direct = diff
            .changed_dependencies(&DependencyQuery {
                scope: ChangeScope::Direct,
                base_ref: request.title_base,
                python_version: request.python_version,
                src_dir: request.src_dir,
            })
            .await?;

        let all = diff
            .changed_dependencies(&DependencyQuery {
                scope: ChangeScope::All,
                base_ref: request.description_base,
                python_version: request.python_version,
                src_dir: request.src_dir,
            })
            .await?;

        debug!(direct = direct.len(), all = all.len(), "Collected changed dependencies");
        Ok(ChangeSummary::from_changes(&direct, &all))
    }
    .instrument(span)
    .await
}
