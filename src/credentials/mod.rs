use std::fmt;

/// Environment variable holding the GitHub personal access token
pub const ENV_TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, PartialEq, Eq)]
pub enum CredentialError {
    TokenNotFound,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::TokenNotFound => write!(f, "Need the {} env variable.", ENV_TOKEN_VAR),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Trim a raw token value; blank counts as missing
fn normalize_token(raw: Option<String>) -> Option<String> {
    let trimmed = raw?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Check for a GitHub token in the GITHUB_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    normalize_token(std::env::var(ENV_TOKEN_VAR).ok())
}

/// Token from the environment, or the error the entry point exits on
pub fn require_token() -> Result<String, CredentialError> {
    get_token_from_env().ok_or(CredentialError::TokenNotFound)
}
