//! DirectAdmin connection settings
//!
//! Field names match the JSON configuration used by existing libdns
//! deployments, so a config block can be shared between tools.

use serde::{Deserialize, Serialize};

use crate::errors::DnsError;

/// DirectAdmin credentials
///
/// The login key needs two permissions:
/// - `CMD_API_SHOW_DOMAINS` for zone detection
/// - `CMD_API_DNS_CONTROL` for record management
///
/// Both are required for every operation, since subdomain requests are
/// resolved against the list of domains the account owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectAdminCredentials {
    /// Base URL of the DirectAdmin instance, with port if necessary
    /// (e.g. "https://da.example.com:2222")
    #[serde(rename = "host", default)]
    pub server_url: String,

    /// DirectAdmin user the login key was created under
    #[serde(default)]
    pub user: String,

    /// Login key used for basic authentication
    #[serde(default)]
    pub login_key: String,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure_requests: bool,
}

impl DirectAdminCredentials {
    /// Check that every required field is set
    pub fn validate(&self) -> Result<(), DnsError> {
        let missing: Vec<&str> = [
            ("host", self.server_url.trim()),
            ("user", self.user.trim()),
            ("login_key", self.login_key.trim()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(DnsError::InvalidCredentials(format!(
                "missing {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Get a masked representation of credentials for display
    pub fn masked(&self) -> serde_json::Value {
        serde_json::json!({
            "host": self.server_url.clone(),
            "user": self.user.clone(),
            "login_key": mask_string(&self.login_key),
            "insecure_requests": self.insecure_requests,
        })
    }
}

/// Mask a string, showing only first 4 and last 4 characters
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        "***".to_string()
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("short"), "***");
        assert_eq!(mask_string("12345678"), "***");
        assert_eq!(mask_string("123456789"), "1234...6789");
        assert_eq!(mask_string("ключ-ключ-ключ"), "ключ...ключ");
        assert_eq!(mask_string("äöüäöü"), "***");
    }

    #[test]
    fn test_credentials_masked() {
        let creds = DirectAdminCredentials {
            server_url: "https://da.example.com:2222".to_string(),
            user: "admin".to_string(),
            login_key: "very-long-login-key-here".to_string(),
            insecure_requests: true,
        };

        let masked = creds.masked();
        assert_eq!(masked["host"], "https://da.example.com:2222");
        assert_eq!(masked["user"], "admin");
        assert_eq!(masked["login_key"], "very...here");
        assert_eq!(masked["insecure_requests"], true);
    }

    #[test]
    fn test_credentials_json_field_names() {
        let creds: DirectAdminCredentials = serde_json::from_str(
            r#"{"host":"https://da.example.com","user":"bob","login_key":"key"}"#,
        )
        .unwrap();

        assert_eq!(creds.server_url, "https://da.example.com");
        assert_eq!(creds.user, "bob");
        assert!(!creds.insecure_requests);

        let json = serde_json::to_string(&creds).unwrap();
        assert!(json.contains("\"host\":"));
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let creds = DirectAdminCredentials {
            server_url: "https://da.example.com".to_string(),
            ..Default::default()
        };

        let err = creds.validate().unwrap_err();
        assert!(matches!(err, DnsError::InvalidCredentials(_)));
        assert_eq!(err.to_string(), "Invalid credentials: missing user, login_key");
    }
}
