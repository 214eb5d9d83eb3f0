//! Persistent key/value settings used to store bindings.
//!
//! The binding registry only needs a flat `string -> i32` store with a caller-supplied
//! fallback for absent keys. Engines usually provide one (player preferences, a save
//! slot); this module defines the contract plus two implementations:
//!
//! - [`MemorySettings`] - in-process map, used by tests and embedders that persist elsewhere
//! - [`FileSettings`] - TOML file on disk, used by the `hudkit` binary
//!
//! Stores are confined to the thread that owns the `InputManager`; nothing here is `Sync`
//! by requirement.

pub mod file;
pub mod memory;

pub use file::FileSettings;
pub use memory::MemorySettings;

use crate::error::Result;

/// Read/write contract for the persisted settings store.
pub trait SettingsStore {
    /// Read an integer, returning `fallback` when the key has never been written.
    fn get_int(&self, key: &str, fallback: i32) -> i32;

    /// Write an integer. Must be visible to the next `get_int` immediately.
    fn set_int(&mut self, key: &str, value: i32);

    /// Whether `key` has ever been written.
    fn has_key(&self, key: &str) -> bool;

    /// Make pending writes durable. Stores that write through can keep the default.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn get_int(&self, key: &str, fallback: i32) -> i32 {
        (**self).get_int(key, fallback)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        (**self).set_int(key, value)
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for Box<T> {
    fn get_int(&self, key: &str, fallback: i32) -> i32 {
        (**self).get_int(key, fallback)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        (**self).set_int(key, value)
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
