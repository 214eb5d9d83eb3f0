//! Input subsystem: abstract actions, physical keys, the rebindable binding registry and
//! the per-frame query service built on top of it.

pub mod action;
pub mod key;
pub mod raw;
pub mod rebind;
pub mod registry;
pub mod service;
pub mod template;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use action::InputAction;
pub use key::KeyCode;
pub use raw::{KeyStateProbe, KeyboardState, RawKeyEvent, TerminalKeySource};
pub use rebind::{CaptureStatus, RebindCapture, RebindCoordinator};
pub use registry::{ActionKeyRegistry, BindingTable};
pub use service::{InputManager, KeyQuery};
pub use template::{display_name, render};
