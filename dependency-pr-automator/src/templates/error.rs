//! Comment template errors.

/// Failure to compile or fill in the cross-fork comment.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The comment references a missing value or a helper failed.
    #[error("Failed to render comment: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The comment template does not compile.
    #[error("Invalid comment template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),
}
