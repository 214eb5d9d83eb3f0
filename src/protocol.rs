//! Messages that apply one player's state change to every participant.
//!
//! A change that must be mirrored (an objective discovered by one player, a binding
//! update pushed from a settings screen) is described as a [`SyncMessage`] and delivered
//! to each participant's local state through [`Participant::apply`]. How messages travel
//! between machines is up to the host.

use crate::input::{InputAction, InputManager, KeyCode};
use crate::settings::SettingsStore;
use crate::ui::ObjectiveOverlay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMessage {
    Rebind { action: InputAction, key: KeyCode },
    SetObjective { text: String, order: i32 },
    ResetObjective,
    ShowObjective,
    /// Show the objective with the "your partner discovered this" banner.
    ShowPartnerUpdate,
}

/// Local state that can apply a [`SyncMessage`].
///
/// Participants ignore messages that do not concern them. `now` is the receiver's clock
/// in seconds.
pub trait Participant {
    fn apply(&mut self, message: &SyncMessage, now: f32);
}

impl<S: SettingsStore> Participant for InputManager<S> {
    fn apply(&mut self, message: &SyncMessage, _now: f32) {
        if let SyncMessage::Rebind { action, key } = message {
            self.rebind(*action, *key);
        }
    }
}

impl Participant for ObjectiveOverlay {
    fn apply(&mut self, message: &SyncMessage, now: f32) {
        match message {
            SyncMessage::SetObjective { text, order } => {
                self.set_objective(text.clone(), *order, now);
            }
            SyncMessage::ResetObjective => self.reset(),
            SyncMessage::ShowObjective => self.show(now),
            SyncMessage::ShowPartnerUpdate => self.show_partner_update(now),
            SyncMessage::Rebind { .. } => {}
        }
    }
}

/// Deliver `message` to every participant, in order.
pub fn broadcast(participants: &mut [&mut dyn Participant], message: &SyncMessage, now: f32) {
    log::debug!(
        "broadcasting {:?} to {} participants",
        message,
        participants.len()
    );
    for participant in participants.iter_mut() {
        participant.apply(message, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use crate::ui::OverlayTiming;

    #[test]
    fn rebind_reaches_every_input_manager() {
        let mut host = InputManager::new(MemorySettings::new());
        let mut guest = InputManager::new(MemorySettings::new());

        let message = SyncMessage::Rebind {
            action: InputAction::Flashlight,
            key: KeyCode::G,
        };
        broadcast(&mut [&mut host, &mut guest], &message, 0.0);

        assert_eq!(host.resolve(InputAction::Flashlight), KeyCode::G);
        assert_eq!(guest.resolve(InputAction::Flashlight), KeyCode::G);
        assert_eq!(guest.into_store().get_int("FLASHLIGHT", 0), KeyCode::G.code());
    }

    #[test]
    fn objective_messages_drive_overlays() {
        let mut host = ObjectiveOverlay::new(OverlayTiming::default(), "");
        let mut guest = ObjectiveOverlay::new(OverlayTiming::default(), "");

        let message = SyncMessage::SetObjective {
            text: "Find the generator".to_string(),
            order: 2,
        };
        broadcast(&mut [&mut host, &mut guest], &message, 1.0);
        assert_eq!(host.objective(), "Find the generator");
        assert_eq!(guest.order(), 2);

        guest.apply(&SyncMessage::ResetObjective, 2.0);
        assert!(!guest.has_objective());
        assert!(host.has_objective());
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        let mut input = InputManager::new(MemorySettings::new());
        input.apply(&SyncMessage::ShowObjective, 0.0);
        assert_eq!(*input.bindings(), crate::input::BindingTable::defaults());

        let mut overlay = ObjectiveOverlay::default();
        overlay.apply(
            &SyncMessage::Rebind {
                action: InputAction::Up,
                key: KeyCode::UpArrow,
            },
            0.0,
        );
        assert!(!overlay.is_visible());
    }
}
