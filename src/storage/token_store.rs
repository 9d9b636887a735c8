// Persistent session token storage
use std::fs;
use std::path::{Path, PathBuf};

use crate::TOKEN_FILE;

/// Durable home for the one session token, a single file under a fixed name.
/// Persisting is opt-in: `save` when the operator asks to be remembered,
/// `clear` when they opt back out, `load` once at startup.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the crate's fixed token file name in the working directory.
    pub fn default_location() -> Self {
        Self::new(TOKEN_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, token: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Read back a previously saved token, if any. A missing file or an empty
    /// one both mean "no stored credential".
    pub fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> TokenStore {
        let mut path = std::env::temp_dir();
        path.push(format!("st_console_{}_{}", name, std::process::id()));
        let store = TokenStore::new(path);
        let _ = store.clear();
        store
    }

    #[test]
    fn round_trips_a_saved_token() {
        let store = temp_store("roundtrip");
        store.save("st-token-abc123").unwrap();

        // Simulate a fresh session: a new store over the same path
        let fresh = TokenStore::new(store.path().to_path_buf());
        assert_eq!(fresh.load().as_deref(), Some("st-token-abc123"));
        store.clear().unwrap();
    }

    #[test]
    fn load_is_none_without_a_saved_token() {
        let store = temp_store("absent");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_forgets_the_token() {
        let store = temp_store("clear");
        store.save("st-token-xyz").unwrap();
        store.clear().unwrap();
        assert_eq!(TokenStore::new(store.path().to_path_buf()).load(), None);
    }

    #[test]
    fn load_trims_trailing_whitespace() {
        let store = temp_store("trim");
        store.save("st-token-abc\n").unwrap();
        assert_eq!(store.load().as_deref(), Some("st-token-abc"));
        store.clear().unwrap();
    }
}
