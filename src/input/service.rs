//! High-level input service.
//!
//! `InputManager` is the per-frame query surface used by gameplay and UI code. It owns
//! the binding registry and the input-suppression gate; callers construct one and pass
//! it by reference to whatever runs inside the frame.

use crate::input::action::InputAction;
use crate::input::key::KeyCode;
use crate::input::raw::KeyStateProbe;
use crate::input::rebind::RebindCoordinator;
use crate::input::registry::{ActionKeyRegistry, BindingTable};
use crate::input::template::render as render_template;
use crate::settings::SettingsStore;

/// Frame query kinds delegated to the host probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyQuery {
    Held,
    PressedThisFrame,
    ReleasedThisFrame,
}

pub struct InputManager<S> {
    registry: ActionKeyRegistry<S>,
    can_receive_input: bool,
}

impl<S: SettingsStore> InputManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            registry: ActionKeyRegistry::new(store),
            can_receive_input: true,
        }
    }

    pub fn resolve(&mut self, action: InputAction) -> KeyCode {
        self.registry.resolve(action)
    }

    /// Overwrite and persist a binding. Does not consult [`Self::can_be_remapped`].
    pub fn rebind(&mut self, action: InputAction, key: KeyCode) {
        self.registry.rebind(action, key);
    }

    pub fn load_defaults(&mut self, persist: bool) {
        self.registry.load_defaults(persist);
    }

    pub fn load_from_persistence(&mut self) {
        self.registry.load_from_persistence();
    }

    pub fn can_be_remapped(&self, action: InputAction) -> bool {
        action.can_be_remapped()
    }

    /// Substitute `[ACTION]` placeholders using the in-memory bindings.
    ///
    /// Does not trigger a settings load; resolve an action first if the stored bindings
    /// must be reflected.
    pub fn render(&self, template: &str) -> String {
        render_template(template, self.registry.bindings())
    }

    /// Single-shot rebind poll; call once per frame until it returns true.
    pub fn attempt_rebind<P>(&mut self, action: InputAction, probe: &P) -> bool
    where
        P: KeyStateProbe + ?Sized,
    {
        RebindCoordinator::poll(&mut self.registry, probe, action).is_some()
    }

    pub fn is_held<P>(&mut self, action: InputAction, probe: &P) -> bool
    where
        P: KeyStateProbe + ?Sized,
    {
        self.query(action, KeyQuery::Held, probe)
    }

    pub fn is_pressed_this_frame<P>(&mut self, action: InputAction, probe: &P) -> bool
    where
        P: KeyStateProbe + ?Sized,
    {
        self.query(action, KeyQuery::PressedThisFrame, probe)
    }

    pub fn is_released_this_frame<P>(&mut self, action: InputAction, probe: &P) -> bool
    where
        P: KeyStateProbe + ?Sized,
    {
        self.query(action, KeyQuery::ReleasedThisFrame, probe)
    }

    /// Resolve `action` (loading settings on first use), then ask the probe unless input
    /// is currently suppressed.
    pub fn query<P>(&mut self, action: InputAction, kind: KeyQuery, probe: &P) -> bool
    where
        P: KeyStateProbe + ?Sized,
    {
        let key = self.registry.resolve(action);
        if !self.can_receive_input {
            return false;
        }
        match kind {
            KeyQuery::Held => probe.held(key),
            KeyQuery::PressedThisFrame => probe.pressed_this_frame(key),
            KeyQuery::ReleasedThisFrame => probe.released_this_frame(key),
        }
    }

    pub fn can_receive_input(&self) -> bool {
        self.can_receive_input
    }

    /// Gate every action query. Never reset automatically; whoever suppresses restores.
    pub fn set_can_receive_input(&mut self, enabled: bool) {
        if self.can_receive_input != enabled {
            log::debug!("action input {}", if enabled { "enabled" } else { "suppressed" });
        }
        self.can_receive_input = enabled;
    }

    pub fn bindings(&self) -> &BindingTable {
        self.registry.bindings()
    }

    pub fn registry(&self) -> &ActionKeyRegistry<S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ActionKeyRegistry<S> {
        &mut self.registry
    }

    pub fn into_store(self) -> S {
        self.registry.into_store()
    }
}
