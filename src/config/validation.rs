use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.repository.owner.trim().is_empty() {
        errors.push("repository.owner: must not be empty".to_string());
    }
    if config.repository.name.trim().is_empty() {
        errors.push("repository.name: must not be empty".to_string());
    }
    if config.repository.owner.contains('/') || config.repository.name.contains('/') {
        errors.push(format!(
            "repository: owner and name are separate fields, got '{}'",
            config.repository
        ));
    }

    if let Some(ref snapshot) = config.snapshot {
        if snapshot.as_os_str().is_empty() {
            errors.push("snapshot: must not be empty".to_string());
        }
    }

    if let Some(ref url) = config.api_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!("api_url: '{}' is not an http(s) URL", url));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
