//! Interactive "press a key to rebind" flow.
//!
//! Rebinding never blocks: the caller polls once per frame until a key is released.

use crate::input::action::InputAction;
use crate::input::key::KeyCode;
use crate::input::raw::KeyStateProbe;
use crate::input::registry::ActionKeyRegistry;
use crate::settings::SettingsStore;

/// Single-shot rebind poll.
pub struct RebindCoordinator;

impl RebindCoordinator {
    /// Bind `action` to the first key (in [`KeyCode::ALL`] order) released this frame.
    ///
    /// Returns the new key, or `None` with the registry untouched when nothing was
    /// released. The remapping policy is not checked here.
    pub fn poll<S, P>(
        registry: &mut ActionKeyRegistry<S>,
        probe: &P,
        action: InputAction,
    ) -> Option<KeyCode>
    where
        S: SettingsStore,
        P: KeyStateProbe + ?Sized,
    {
        registry.ensure_loaded();
        let key = KeyCode::ALL
            .iter()
            .copied()
            .find(|key| probe.released_this_frame(*key))?;
        registry.rebind(action, key);
        Some(key)
    }
}

/// Outcome of one [`RebindCapture::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// No key released yet; poll again next frame.
    Waiting,
    Bound(KeyCode),
    /// The action is not remappable; nothing was changed.
    Rejected,
    /// The frame limit ran out before a key was released.
    TimedOut,
}

impl CaptureStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, CaptureStatus::Waiting)
    }
}

/// A pending rebind owned by a UI flow.
///
/// Checks the remapping policy up front and optionally gives up after a number of
/// frames. Dropping it abandons the rebind; nothing is persisted until a key is bound.
#[derive(Debug, Clone)]
pub struct RebindCapture {
    action: InputAction,
    frame_limit: Option<u32>,
    frames_polled: u32,
}

impl RebindCapture {
    pub fn new(action: InputAction) -> Self {
        Self {
            action,
            frame_limit: None,
            frames_polled: 0,
        }
    }

    pub fn with_frame_limit(mut self, frames: u32) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn action(&self) -> InputAction {
        self.action
    }

    pub fn frames_polled(&self) -> u32 {
        self.frames_polled
    }

    pub fn poll<S, P>(&mut self, registry: &mut ActionKeyRegistry<S>, probe: &P) -> CaptureStatus
    where
        S: SettingsStore,
        P: KeyStateProbe + ?Sized,
    {
        if !self.action.can_be_remapped() {
            return CaptureStatus::Rejected;
        }
        if let Some(limit) = self.frame_limit {
            if self.frames_polled >= limit {
                return CaptureStatus::TimedOut;
            }
        }
        self.frames_polled += 1;

        match RebindCoordinator::poll(registry, probe, self.action) {
            Some(key) => CaptureStatus::Bound(key),
            None => CaptureStatus::Waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::raw::{KeyboardState, RawKeyEvent};
    use crate::settings::MemorySettings;

    fn registry() -> ActionKeyRegistry<MemorySettings> {
        ActionKeyRegistry::new(MemorySettings::new())
    }

    #[test]
    fn nothing_released_leaves_table_unchanged() {
        let mut registry = registry();
        registry.load_from_persistence();
        let before = *registry.bindings();

        let mut keyboard = KeyboardState::new();
        keyboard.frame([RawKeyEvent::Down(KeyCode::Q)]);

        assert_eq!(
            RebindCoordinator::poll(&mut registry, &keyboard, InputAction::Sprint),
            None
        );
        assert_eq!(*registry.bindings(), before);
        assert!(!registry.store().has_key("SPRINT"));
    }

    #[test]
    fn first_released_key_in_enumeration_order_wins() {
        let mut registry = registry();
        let mut keyboard = KeyboardState::new();
        keyboard.frame([
            RawKeyEvent::Up(KeyCode::LeftShift),
            RawKeyEvent::Up(KeyCode::Z),
            RawKeyEvent::Up(KeyCode::Space),
        ]);

        let bound = RebindCoordinator::poll(&mut registry, &keyboard, InputAction::Sneak);
        assert_eq!(bound, Some(KeyCode::Space));
        assert_eq!(registry.resolve(InputAction::Sneak), KeyCode::Space);
        assert_eq!(
            registry.store().get_int("SNEAK", 0),
            KeyCode::Space.code()
        );
    }

    #[test]
    fn poll_loads_settings_before_binding() {
        let mut store = MemorySettings::new();
        store.set_int("UP", KeyCode::UpArrow.code());
        let mut registry = ActionKeyRegistry::new(store);

        let mut keyboard = KeyboardState::new();
        keyboard.frame([RawKeyEvent::Up(KeyCode::I)]);
        RebindCoordinator::poll(&mut registry, &keyboard, InputAction::Interact);

        assert!(registry.is_loaded());
        assert_eq!(registry.resolve(InputAction::Up), KeyCode::UpArrow);
        assert_eq!(registry.resolve(InputAction::Interact), KeyCode::I);
    }

    #[test]
    fn capture_waits_across_frames_then_binds() {
        let mut registry = registry();
        let mut keyboard = KeyboardState::new();
        let mut capture = RebindCapture::new(InputAction::Flashlight);

        keyboard.frame([RawKeyEvent::Down(KeyCode::G)]);
        assert_eq!(capture.poll(&mut registry, &keyboard), CaptureStatus::Waiting);

        keyboard.frame([RawKeyEvent::Up(KeyCode::G)]);
        assert_eq!(
            capture.poll(&mut registry, &keyboard),
            CaptureStatus::Bound(KeyCode::G)
        );
        assert_eq!(capture.frames_polled(), 2);
    }

    #[test]
    fn capture_rejects_fixed_actions() {
        let mut registry = registry();
        let mut keyboard = KeyboardState::new();
        keyboard.frame([RawKeyEvent::Up(KeyCode::Q)]);

        let mut capture = RebindCapture::new(InputAction::EscapeMenu);
        assert_eq!(capture.poll(&mut registry, &keyboard), CaptureStatus::Rejected);
        assert_eq!(registry.resolve(InputAction::EscapeMenu), KeyCode::Escape);
    }

    #[test]
    fn capture_times_out_after_frame_limit() {
        let mut registry = registry();
        let keyboard = KeyboardState::new();
        let mut capture = RebindCapture::new(InputAction::Up).with_frame_limit(2);

        assert_eq!(capture.poll(&mut registry, &keyboard), CaptureStatus::Waiting);
        assert_eq!(capture.poll(&mut registry, &keyboard), CaptureStatus::Waiting);
        assert_eq!(capture.poll(&mut registry, &keyboard), CaptureStatus::TimedOut);
        assert!(CaptureStatus::TimedOut.is_finished());
    }
}
