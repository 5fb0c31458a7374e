//! GitHub client construction.

use super::PrError;
use octocrab::Octocrab;
use std::time::Duration;

/// Builds a GitHub client for `api_url`.
///
/// The client is anonymous when `token` is `None`. Connect, read and write
/// operations are each bounded by `timeout`.
///
/// # Errors
///
/// Returns [`PrError`] if the URL is invalid or the client cannot be built.
pub fn build_client(
    api_url: &str,
    token: Option<&str>,
    timeout: Duration,
) -> Result<Octocrab, PrError> {
    install_crypto_provider();

    let builder = Octocrab::builder()
        .base_uri(api_url)?
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .set_write_timeout(Some(timeout));

    let builder = match token {
        Some(token) => builder.personal_token(token.to_string()),
        None => builder,
    };

    Ok(builder.build()?)
}

/// Installs aws-lc-rs as the process-wide rustls provider.
///
/// Later calls are no-ops once a provider is installed.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
