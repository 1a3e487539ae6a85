//! On-disk bearer token storage
//!
//! The token lives in a single file, by default
//! `<user config dir>/sitetrack/token`. Nothing else reads it implicitly:
//! callers load it and pass it to the API client explicitly.

use crate::error::{Error, Result, ResultExt};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory under the user config dir
const APP_DIR: &str = "sitetrack";

/// Token file name
const TOKEN_FILE: &str = "token";

/// File-backed token store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the default per-user location
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            Error::credential_store("Could not determine the user config directory")
                .with_suggestion("Set session.credentials_path in sitetrack.toml")
        })?;
        Ok(Self::at(base.join(APP_DIR).join(TOKEN_FILE)))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Token file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, replacing any previous one
    pub fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::validation("Refusing to store an empty token"));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
        }

        fs::write(&self.path, token).context(format!("Writing {}", self.path.display()))?;

        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Read the stored token; `None` when nothing is stored
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::credential_store(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }

    /// Read the stored token, failing with a login hint when absent
    pub fn require(&self) -> Result<String> {
        self.load()?.ok_or_else(Error::not_logged_in)
    }

    /// Remove the stored token. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).context(format!("Removing {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
