use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthFlowError;

/// Storage abstraction for the persisted refresh credential.
///
/// Exactly one credential is stored; absent means "no session to restore".
pub trait RefreshStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, AuthFlowError>;
    fn save(&self, token: &str) -> Result<(), AuthFlowError>;
    fn clear(&self) -> Result<(), AuthFlowError>;
}

const SESSION_FILE: &str = "session.toml";

/// File-backed refresh credential store using a TOML file.
///
/// # Example
/// ```no_run
/// use authflow::credentials::{FileRefreshStore, RefreshStore};
///
/// let store = FileRefreshStore::new_default();
/// store.save("opaque-refresh-token")?;
/// # Ok::<(), authflow::error::AuthFlowError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileRefreshStore {
    base_dir: PathBuf,
}

impl FileRefreshStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn new_default() -> Self {
        Self {
            base_dir: default_authflow_dir(),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthFlowError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RefreshStore for FileRefreshStore {
    fn load(&self) -> Result<Option<String>, AuthFlowError> {
        let path = self.session_path();
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthFlowError::Storage(err.to_string())),
        };
        let file: SessionFile = toml::from_str(&raw)?;
        Ok(Some(file.refresh_token))
    }

    fn save(&self, token: &str) -> Result<(), AuthFlowError> {
        let path = self.session_path();
        Self::ensure_parent(&path)?;
        let file = SessionFile {
            version: 1,
            refresh_token: token.to_string(),
            saved_at: DateTime::<Utc>::from(std::time::SystemTime::now()),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthFlowError> {
        let path = self.session_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthFlowError::Storage(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    refresh_token: String,
    saved_at: DateTime<Utc>,
}

fn default_authflow_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".authflow"))
        .unwrap_or_else(|| PathBuf::from(".authflow"))
}
