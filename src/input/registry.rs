//! Canonical action-to-key bindings and their bridge to the settings store.

use crate::input::action::InputAction;
use crate::input::key::KeyCode;
use crate::settings::SettingsStore;

/// One physical key per abstract action.
///
/// Backed by a fixed array indexed by action, so the table is total by construction:
/// there is no way to observe an unbound action. Several actions may share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingTable {
    keys: [KeyCode; InputAction::COUNT],
}

impl BindingTable {
    /// Table holding every action's hardcoded default.
    pub fn defaults() -> Self {
        let mut keys = [KeyCode::Escape; InputAction::COUNT];
        for action in InputAction::ALL {
            keys[action.index()] = action.default_key();
        }
        Self { keys }
    }

    pub fn get(&self, action: InputAction) -> KeyCode {
        self.keys[action.index()]
    }

    pub fn set(&mut self, action: InputAction, key: KeyCode) {
        self.keys[action.index()] = key;
    }

    /// Bindings in action declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (InputAction, KeyCode)> + '_ {
        InputAction::ALL
            .into_iter()
            .map(move |action| (action, self.get(action)))
    }

    /// Actions currently bound to `key`.
    pub fn actions_for(&self, key: KeyCode) -> Vec<InputAction> {
        self.iter()
            .filter(|(_, bound)| *bound == key)
            .map(|(action, _)| action)
            .collect()
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Owns the [`BindingTable`] and keeps it in step with a [`SettingsStore`].
///
/// The table starts at the defaults and is overlaid from the store lazily, on the first
/// [`resolve`](Self::resolve) (or explicitly through
/// [`load_from_persistence`](Self::load_from_persistence)).
#[derive(Debug)]
pub struct ActionKeyRegistry<S> {
    bindings: BindingTable,
    store: S,
    settings_loaded: bool,
}

impl<S: SettingsStore> ActionKeyRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            bindings: BindingTable::defaults(),
            store,
            settings_loaded: false,
        }
    }

    /// Reset every action to its default, writing all of them to the store when `persist`.
    ///
    /// Does not touch the loaded flag.
    pub fn load_defaults(&mut self, persist: bool) {
        self.bindings = BindingTable::defaults();
        if persist {
            for (action, key) in self.bindings.iter() {
                self.store.set_int(action.name(), key.code());
            }
        }
        log::debug!("bindings reset to defaults (persist: {})", persist);
    }

    /// Re-seed from defaults, then overlay every remappable action from the store.
    ///
    /// Fixed actions are never read back, so a tampered store cannot move them.
    pub fn load_from_persistence(&mut self) {
        self.load_defaults(false);
        for action in InputAction::ALL {
            if !action.can_be_remapped() {
                continue;
            }
            let fallback = self.bindings.get(action);
            let code = self.store.get_int(action.name(), fallback.code());
            match KeyCode::from_code(code) {
                Some(key) => self.bindings.set(action, key),
                None => log::warn!(
                    "ignoring stored key code {} for {}, keeping {}",
                    code,
                    action,
                    fallback
                ),
            }
        }
        self.settings_loaded = true;
        log::debug!("bindings loaded from settings");
    }

    /// Current binding for `action`, loading from the store on first use.
    pub fn resolve(&mut self, action: InputAction) -> KeyCode {
        self.ensure_loaded();
        self.bindings.get(action)
    }

    /// Overwrite one binding and persist it.
    ///
    /// The remapping policy is the caller's concern; this does not consult
    /// [`InputAction::can_be_remapped`].
    pub fn rebind(&mut self, action: InputAction, key: KeyCode) {
        self.bindings.set(action, key);
        self.store.set_int(action.name(), key.code());
        log::debug!("{} bound to {}", action, key);
    }

    pub fn ensure_loaded(&mut self) {
        if !self.settings_loaded {
            self.load_from_persistence();
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.settings_loaded
    }

    /// In-memory table, without triggering a load.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
