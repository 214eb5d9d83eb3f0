//! # hudkit - Rebindable Input and HUD State for Games
//!
//! A small in-game UI/input layer that sits between a host engine's frame loop and its
//! gameplay code.
//!
//! ## Features
//!
//! - **Action bindings**: abstract actions mapped to physical keys, persisted per action
//! - **Live rebinding**: "press a key" capture polled once per frame, never blocking
//! - **Key-aware strings**: `[INTERACT]`-style placeholders rendered with the bound key
//! - **Input gate**: one switch to silence gameplay queries while a menu is up
//! - **HUD state**: fading objective overlay and paginated document viewer
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`input`] - Actions, keys, binding registry, rebinding and the query service
//! - [`settings`] - Persisted key/value store contract and implementations
//! - [`ui`] - Objective overlay and document viewer state machines
//! - [`protocol`] - Messages for mirroring state changes on every participant
//! - [`app`] - Per-frame session tying the pieces together
//! - [`config`] - TOML configuration
//!
//! Nothing here is global: construct an [`InputManager`] (or a [`Session`]) and pass it
//! to the code running inside the frame.

pub mod error;
pub mod settings;

pub mod input;
pub mod ui;

pub mod app;
pub mod config;
pub mod protocol;

pub use error::{HudkitError, Result};

pub use app::{FrameReport, Session};
pub use config::HudConfig;
pub use input::{InputAction, InputManager, KeyCode, KeyStateProbe};
pub use protocol::{Participant, SyncMessage};
pub use settings::{FileSettings, MemorySettings, SettingsStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
