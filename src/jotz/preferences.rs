use crate::store::{PersistenceAdapter, DARK_MODE_KEY};
use log::warn;

/// Display preferences stored next to the notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    /// Reads preferences, falling back to defaults on anything unexpected.
    pub fn load<A: PersistenceAdapter>(adapter: &A) -> Self {
        let dark_mode = match adapter.read(DARK_MODE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<bool>(&blob) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Ignoring unreadable dark mode preference: {}", e);
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!("Could not read dark mode preference: {}", e);
                false
            }
        };
        Self { dark_mode }
    }

    /// Writes preferences. Failures are logged, never returned.
    pub fn save<A: PersistenceAdapter>(&self, adapter: &A) {
        if let Err(e) = adapter.write(DARK_MODE_KEY, &self.dark_mode.to_string()) {
            warn!("Failed to save dark mode preference: {}", e);
        }
    }
}
