//! Template renderer.

use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Registered name of the cross-fork comment template.
const COMMENT_TEMPLATE: &str = "comment";

/// Built-in cross-fork comment.
const DEFAULT_COMMENT_TEMPLATE: &str = "{{description}}

This workflow cannot automatically update your PR or create PR to your repository. \
But you could open such PR by clicking the link: {{compare_url}}.

You could also get the updated files from {{constraints_url}}. \
Or ask the maintainers to provide you content of the constraints artifact\
{{#if run_url}} from the run {{run_url}}{{/if}}.";

/// Registry for markdown comments: no HTML escaping, and strict mode so a
/// misspelled variable fails instead of rendering empty.
fn comment_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Values available to the cross-fork comment template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentContext {
    /// "Updated packages: ..." line.
    pub description: String,
    /// Link that opens a PR from the bot branch into the contributor's branch.
    pub compare_url: String,
    /// Link to the constraint files on the bot branch.
    pub constraints_url: String,
    /// Link to the workflow run, or empty.
    pub run_url: String,
    /// Contributor branch.
    pub branch: String,
    /// Bot branch holding the update commit.
    pub update_branch: String,
    /// Contributor repository (`owner/name`).
    pub target_repository: String,
    /// Account owning the bot fork.
    pub bot_login: String,
}

/// Template renderer for the cross-fork comment.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer using the built-in comment template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile.
    pub fn new() -> Result<Self, super::TemplateError> {
        Self::with_comment_template(None)
    }

    /// Creates a renderer, replacing the built-in comment when `template` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile.
    pub fn with_comment_template(template: Option<&str>) -> Result<Self, super::TemplateError> {
        let mut handlebars = comment_registry();
        handlebars.register_template_string(
            COMMENT_TEMPLATE,
            template.unwrap_or(DEFAULT_COMMENT_TEMPLATE),
        )?;
        Ok(Self { handlebars })
    }

    /// Renders the cross-fork comment.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails, e.g. on an unknown variable.
    pub fn render_comment(&self, context: &CommentContext) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render(COMMENT_TEMPLATE, context)?)
    }
}
