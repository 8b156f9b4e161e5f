use std::collections::BTreeMap;
use std::path::Path;

use folio_engine::{StateFile, TokenStore, TokenStoreError, TOKEN_KEY};
use folio_logging::{folio_error, folio_info, folio_warn};
use serde::{Deserialize, Serialize};

const SESSION_FILENAME: &str = "session.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    entries: BTreeMap<String, String>,
}

/// Keeps the admin token in `session.ron` under the state directory.
pub(crate) struct RonTokenStore {
    file: StateFile,
}

impl RonTokenStore {
    pub(crate) fn new(state_dir: &Path) -> Self {
        Self {
            file: StateFile::new(state_dir, SESSION_FILENAME),
        }
    }

    fn read(&self) -> PersistedSession {
        let content = match self.file.read() {
            Ok(Some(text)) => text,
            Ok(None) => return PersistedSession::default(),
            Err(err) => {
                folio_warn!("Failed to read session from {:?}: {}", self.file.path(), err);
                return PersistedSession::default();
            }
        };
        match ron::from_str(&content) {
            Ok(session) => session,
            Err(err) => {
                folio_warn!("Failed to parse session from {:?}: {}", self.file.path(), err);
                PersistedSession::default()
            }
        }
    }

    fn write(&self, session: &PersistedSession) -> Result<(), TokenStoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(session, pretty)
            .map_err(|err| TokenStoreError::Encode(Box::new(err)))?;
        self.file.replace(content.as_bytes())?;
        Ok(())
    }
}

impl TokenStore for RonTokenStore {
    fn load(&self) -> Option<String> {
        self.read().entries.remove(TOKEN_KEY)
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        let mut session = self.read();
        session
            .entries
            .insert(TOKEN_KEY.to_string(), token.to_string());
        if let Err(err) = self.write(&session) {
            folio_error!("Failed to save session to {:?}: {}", self.file.path(), err);
            return Err(err);
        }
        folio_info!("Saved admin session to {:?}", self.file.path());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TokenStoreError> {
        let mut session = self.read();
        if session.entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        let result = if session.entries.is_empty() {
            self.file.remove().map_err(TokenStoreError::from)
        } else {
            self.write(&session)
        };
        if let Err(err) = &result {
            folio_error!("Failed to clear session in {:?}: {}", self.file.path(), err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn token_survives_a_new_store() {
        let temp = TempDir::new().unwrap();
        let mut store = RonTokenStore::new(temp.path());
        assert_eq!(store.load(), None);

        store.save("t0k").unwrap();
        let reopened = RonTokenStore::new(temp.path());
        assert_eq!(reopened.load().as_deref(), Some("t0k"));

        let text = fs::read_to_string(temp.path().join(SESSION_FILENAME)).unwrap();
        assert!(text.contains("admin_token"));
    }

    #[test]
    fn clear_removes_file() {
        let temp = TempDir::new().unwrap();
        let mut store = RonTokenStore::new(temp.path());
        store.save("t0k").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert!(!temp.path().join(SESSION_FILENAME).exists());
    }

    #[test]
    fn save_reports_unusable_state_dir() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("state");
        fs::write(&blocker, "x").unwrap();

        let mut store = RonTokenStore::new(&blocker);
        let err = store.save("t0k").unwrap_err();
        assert!(matches!(err, TokenStoreError::Persist(_)), "{err:?}");
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SESSION_FILENAME), "not ron at all {").unwrap();
        let store = RonTokenStore::new(temp.path());
        assert_eq!(store.load(), None);
    }
}
