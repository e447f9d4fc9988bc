//! DirectAdmin connection settings from flags, environment and config file

use anyhow::Context;
use clap::Args;
use dadns::{DirectAdminCredentials, DirectAdminProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How to reach the DirectAdmin panel
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// JSON file with `host`, `user`, `login_key` and `insecure_requests`
    #[arg(long, short = 'c', env = "DADNS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// DirectAdmin URL, with port if necessary (e.g. "https://da.example.com:2222")
    #[arg(long, env = "DIRECTADMIN_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// DirectAdmin user
    #[arg(long, env = "DIRECTADMIN_USER", global = true)]
    pub user: Option<String>,

    /// Login key with CMD_API_SHOW_DOMAINS and CMD_API_DNS_CONTROL access
    #[arg(long, env = "DIRECTADMIN_LOGIN_KEY", global = true, hide_env_values = true)]
    pub login_key: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, env = "DIRECTADMIN_INSECURE_REQUESTS", global = true)]
    pub insecure: bool,
}

impl ConnectionArgs {
    /// Merge the config file (if any) with flags; flags win
    pub fn credentials(&self) -> anyhow::Result<DirectAdminCredentials> {
        let mut credentials = match &self.config {
            Some(path) => load_config(path)?,
            None => DirectAdminCredentials::default(),
        };

        if let Some(server_url) = &self.server_url {
            credentials.server_url = server_url.clone();
        }
        if let Some(user) = &self.user {
            credentials.user = user.clone();
        }
        if let Some(login_key) = &self.login_key {
            credentials.login_key = login_key.clone();
        }
        credentials.insecure_requests |= self.insecure;

        credentials.validate()?;
        debug!("Using DirectAdmin credentials: {}", credentials.masked());
        Ok(credentials)
    }

    pub fn provider(&self) -> anyhow::Result<DirectAdminProvider> {
        let credentials = self.credentials()?;
        DirectAdminProvider::new(credentials).context("Failed to create DirectAdmin provider")
    }
}

fn load_config(path: &Path) -> anyhow::Result<DirectAdminCredentials> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_credentials_from_config_file() {
        let file = config_file(
            r#"{"host":"https://da.example.com:2222","user":"admin","login_key":"secret-key","insecure_requests":true}"#,
        );
        let args = ConnectionArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let credentials = args.credentials().unwrap();
        assert_eq!(credentials.server_url, "https://da.example.com:2222");
        assert_eq!(credentials.user, "admin");
        assert_eq!(credentials.login_key, "secret-key");
        assert!(credentials.insecure_requests);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file(
            r#"{"host":"https://old.example.com","user":"admin","login_key":"old-key"}"#,
        );
        let args = ConnectionArgs {
            config: Some(file.path().to_path_buf()),
            server_url: Some("https://new.example.com:2222".to_string()),
            login_key: Some("new-key".to_string()),
            ..Default::default()
        };

        let credentials = args.credentials().unwrap();
        assert_eq!(credentials.server_url, "https://new.example.com:2222");
        assert_eq!(credentials.user, "admin");
        assert_eq!(credentials.login_key, "new-key");
        assert!(!credentials.insecure_requests);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let args = ConnectionArgs {
            server_url: Some("https://da.example.com".to_string()),
            ..Default::default()
        };

        let err = args.credentials().unwrap_err();
        assert!(err.to_string().contains("missing user, login_key"));
    }

    #[test]
    fn test_invalid_config_file() {
        let file = config_file("not json");
        let args = ConnectionArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let err = args.credentials().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
