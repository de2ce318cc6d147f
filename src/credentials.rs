//! Layered credential resolution.
//!
//! Credentials come from three sources with fixed precedence: explicit
//! arguments beat process environment variables, which beat entries in an
//! env file (`--env-file` path, else `~/.edgedelta.env`, else `./.env`).
//! Resolution is pure configuration handling; no network calls happen here,
//! and missing required values are reported before any request is issued.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the organization identifier.
pub const ENV_ORG_ID: &str = "ED_ORG_ID";
/// Environment variable holding the API token for the main API surface.
pub const ENV_API_TOKEN: &str = "ED_API_TOKEN";
/// Environment variable holding the bearer token for the chat/agent surfaces.
pub const ENV_JWT: &str = "ED_JWT";
/// Environment variable holding the login email.
pub const ENV_EMAIL: &str = "ED_EMAIL";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "ED_PASSWORD";

/// Resolved credentials for the AI Team service.
///
/// Every field is optional at this layer; which fields a given command needs
/// is decided by the caller (e.g. the main API surface requires `api_token`,
/// the chat surfaces require `jwt` or login credentials).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Organization identifier.
    pub org_id: Option<String>,

    /// API token for the main API surface.
    pub api_token: Option<String>,

    /// Bearer token for the chat/agent surfaces.
    pub jwt: Option<String>,

    /// Login email.
    pub email: Option<String>,

    /// Login password.
    pub password: Option<String>,
}

impl Credentials {
    /// Resolves credentials with the standard precedence.
    ///
    /// `overrides` carries explicit arguments (highest precedence).
    /// `env_file` is an explicit env-file path; when None, the default
    /// locations are probed and the first existing file is used. An explicit
    /// path that does not exist is a configuration error.
    pub fn resolve(overrides: Credentials, env_file: Option<&Path>) -> Result<Credentials> {
        let mut creds = match env_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::validation(
                        format!("env file not found: {}", path.display()),
                        Some("env_file".to_string()),
                    ));
                }
                Credentials::from_env_file(path)?
            }
            None => {
                let mut found = Credentials::default();
                for path in default_env_files() {
                    if path.exists() {
                        found = Credentials::from_env_file(&path)?;
                        if found.org_id.is_some() {
                            break;
                        }
                    }
                }
                found
            }
        };

        creds.overlay(Credentials::from_process_env());
        creds.overlay(overrides);
        Ok(creds)
    }

    /// Reads credentials from the process environment.
    pub fn from_process_env() -> Credentials {
        Credentials {
            org_id: env::var(ENV_ORG_ID).ok().filter(|v| !v.is_empty()),
            api_token: env::var(ENV_API_TOKEN).ok().filter(|v| !v.is_empty()),
            jwt: env::var(ENV_JWT).ok().filter(|v| !v.is_empty()),
            email: env::var(ENV_EMAIL).ok().filter(|v| !v.is_empty()),
            password: env::var(ENV_PASSWORD).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Reads credentials from a `KEY=VALUE` env file.
    ///
    /// Blank lines and `#` comments are skipped; surrounding single or
    /// double quotes on values are stripped.
    pub fn from_env_file(path: &Path) -> Result<Credentials> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
        let entries = parse_env_file(&contents);
        Ok(Credentials {
            org_id: lookup(&entries, &[ENV_ORG_ID, "EDGEDELTA_ORG_ID"]),
            api_token: lookup(&entries, &[ENV_API_TOKEN, "ED_ORG_API_TOKEN"]),
            jwt: lookup(&entries, &[ENV_JWT]),
            email: lookup(&entries, &[ENV_EMAIL]),
            password: lookup(&entries, &[ENV_PASSWORD]),
        })
    }

    /// Returns the org id, or a configuration error naming the fix.
    pub fn require_org_id(&self) -> Result<&str> {
        self.org_id.as_deref().ok_or_else(|| {
            Error::validation(
                format!("no org id found; set {ENV_ORG_ID} or pass --org-id"),
                Some("org_id".to_string()),
            )
        })
    }

    /// Returns the API token, or a configuration error naming the fix.
    pub fn require_api_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            Error::validation(
                format!("no API token found; set {ENV_API_TOKEN} or pass --api-token"),
                Some("api_token".to_string()),
            )
        })
    }

    /// Returns true if a bearer token is available without logging in.
    pub fn has_jwt(&self) -> bool {
        self.jwt.is_some()
    }

    /// Returns true if email/password login is possible.
    pub fn can_login(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }

    /// Overlays `other` on top of self; set fields in `other` win.
    fn overlay(&mut self, other: Credentials) {
        if other.org_id.is_some() {
            self.org_id = other.org_id;
        }
        if other.api_token.is_some() {
            self.api_token = other.api_token;
        }
        if other.jwt.is_some() {
            self.jwt = other.jwt;
        }
        if other.email.is_some() {
            self.email = other.email;
        }
        if other.password.is_some() {
            self.password = other.password;
        }
    }
}

/// Default env-file locations, probed in order.
fn default_env_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(home) = env::var("HOME") {
        paths.push(Path::new(&home).join(".edgedelta.env"));
    }
    paths.push(PathBuf::from(".env"));
    paths
}

fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value
            .trim()
            .trim_matches('"')
            .trim_matches('\'')
            .to_string();
        entries.insert(key.trim().to_string(), value);
    }
    entries
}

fn lookup(entries: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| entries.get(*k))
        .find(|v| !v.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_file_syntax() {
        let entries = parse_env_file(
            "# comment\nED_ORG_ID=org-123\nED_JWT=\"quoted.token\"\nED_EMAIL='a@b.c'\n\nbroken line\n",
        );
        assert_eq!(entries.get("ED_ORG_ID").unwrap(), "org-123");
        assert_eq!(entries.get("ED_JWT").unwrap(), "quoted.token");
        assert_eq!(entries.get("ED_EMAIL").unwrap(), "a@b.c");
        assert!(!entries.contains_key("broken line"));
    }

    #[test]
    fn fallback_key_names() {
        let entries = parse_env_file("EDGEDELTA_ORG_ID=org-9\nED_ORG_API_TOKEN=tok\n");
        assert_eq!(
            lookup(&entries, &[ENV_ORG_ID, "EDGEDELTA_ORG_ID"]),
            Some("org-9".to_string())
        );
        assert_eq!(
            lookup(&entries, &[ENV_API_TOKEN, "ED_ORG_API_TOKEN"]),
            Some("tok".to_string())
        );
    }

    #[test]
    fn overlay_precedence() {
        let mut base = Credentials {
            org_id: Some("file-org".to_string()),
            jwt: Some("file-jwt".to_string()),
            ..Credentials::default()
        };
        base.overlay(Credentials {
            org_id: Some("cli-org".to_string()),
            ..Credentials::default()
        });
        assert_eq!(base.org_id.as_deref(), Some("cli-org"));
        assert_eq!(base.jwt.as_deref(), Some("file-jwt"));
    }

    #[test]
    fn require_org_id_reports_configuration_error() {
        let creds = Credentials::default();
        let err = creds.require_org_id().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn explicit_env_file_must_exist() {
        let err = Credentials::resolve(
            Credentials::default(),
            Some(Path::new("/nonexistent/creds.env")),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
