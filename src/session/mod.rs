//! Session-scoped key/value storage.
//!
//! The engine keeps two things for the length of a session: the player's
//! name and the leaderboard. It reaches them through [`SessionStore`],
//! which stores JSON text under string keys. A browser front-end backs it
//! with `sessionStorage`; [`MemorySessionStore`] backs it with a map.

mod memory;

pub use memory::MemorySessionStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Key holding the player's name.
pub const PLAYER_NAME_KEY: &str = "playerName";

/// Key holding the leaderboard object.
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// String-keyed store of JSON values, cleared when the session ends.
pub trait SessionStore {
    /// Raw JSON text under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store raw JSON text under `key`.
    fn set(&mut self, key: &str, value: String);

    /// Remove one key.
    fn remove(&mut self, key: &str);

    /// Remove every key.
    fn clear(&mut self);

    /// Read and decode the value under `key`.
    ///
    /// `Ok(None)` when the key is absent; an error when the stored text does
    /// not decode as `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store `value` under `key`.
    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw);
        Ok(())
    }
}
