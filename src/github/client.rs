use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Create an authenticated GitHub client using a personal access token.
///
/// `api_url` points the client at a GitHub Enterprise instance; `None` keeps
/// the public api.github.com endpoint.
pub fn create_client(token: &str, api_url: Option<&str>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());

    if let Some(url) = api_url {
        builder = builder
            .base_uri(url)
            .with_context(|| format!("Invalid GitHub API URL: {}", url))?;
    }

    builder.build().context("Failed to create GitHub client")
}
