//! Configuration validation

use super::Config;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        validate_endpoint(&self.endpoint)?;
        validate_package_name(&self.package_name)?;
        if self.user_agent.trim().is_empty() {
            return Err("User agent cannot be empty".to_string());
        }
        Ok(())
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint)
        .map_err(|e| format!("Endpoint has invalid URL format: {}", e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "Endpoint must use http:// or https:// scheme, got: {}",
                scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err("Endpoint URL must have a valid host".to_string());
    }
    if url.query().is_some() {
        return Err("Endpoint URL must not carry a query string".to_string());
    }
    Ok(())
}

fn validate_package_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Package name cannot be empty".to_string());
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(format!("Package name must be a bare file name, got: {}", name));
    }
    Ok(())
}
