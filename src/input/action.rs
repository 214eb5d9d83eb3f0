//! Abstract input actions and their fixed remapping policy.

use crate::error::HudkitError;
use crate::input::key::KeyCode;
use std::fmt;
use std::str::FromStr;

/// Logical input event, decoupled from the physical key that produces it.
///
/// Declaration order matters: it is the iteration order of [`InputAction::ALL`], which
/// drives both persistence and placeholder substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputAction {
    Up,
    Down,
    Right,
    Left,
    Interact,
    Sprint,
    Sneak,
    ViewObjective,
    Flashlight,
    FlashlightAlt,
    EscapeMenu,
}

impl InputAction {
    pub const COUNT: usize = 11;

    pub const ALL: [InputAction; InputAction::COUNT] = [
        InputAction::Up,
        InputAction::Down,
        InputAction::Right,
        InputAction::Left,
        InputAction::Interact,
        InputAction::Sprint,
        InputAction::Sneak,
        InputAction::ViewObjective,
        InputAction::Flashlight,
        InputAction::FlashlightAlt,
        InputAction::EscapeMenu,
    ];

    /// Stable name used as the persisted settings key and inside `[NAME]` placeholders.
    pub const fn name(self) -> &'static str {
        match self {
            InputAction::Up => "UP",
            InputAction::Down => "DOWN",
            InputAction::Right => "RIGHT",
            InputAction::Left => "LEFT",
            InputAction::Interact => "INTERACT",
            InputAction::Sprint => "SPRINT",
            InputAction::Sneak => "SNEAK",
            InputAction::ViewObjective => "VIEW_OBJECTIVE",
            InputAction::Flashlight => "FLASHLIGHT",
            InputAction::FlashlightAlt => "FLASHLIGHT_ALT",
            InputAction::EscapeMenu => "ESCAPE_MENU",
        }
    }

    /// Hardcoded binding restored by `load_defaults`.
    pub const fn default_key(self) -> KeyCode {
        match self {
            InputAction::Up => KeyCode::W,
            InputAction::Down => KeyCode::S,
            InputAction::Right => KeyCode::D,
            InputAction::Left => KeyCode::A,
            InputAction::Interact => KeyCode::E,
            InputAction::Sprint => KeyCode::LeftShift,
            InputAction::Sneak => KeyCode::LeftControl,
            InputAction::ViewObjective => KeyCode::Tab,
            InputAction::Flashlight => KeyCode::F,
            InputAction::FlashlightAlt => KeyCode::Mouse2,
            InputAction::EscapeMenu => KeyCode::Escape,
        }
    }

    /// The escape menu is permanently bound; everything else may be remapped.
    pub const fn can_be_remapped(self) -> bool {
        !matches!(self, InputAction::EscapeMenu)
    }

    /// Literal placeholder text, e.g. `[INTERACT]`.
    pub fn placeholder(self) -> String {
        format!("[{}]", self.name())
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the stable name, accepting lowercase and `-` in place of `_`.
impl FromStr for InputAction {
    type Err = HudkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        InputAction::ALL
            .into_iter()
            .find(|action| action.name() == normalized)
            .ok_or_else(|| HudkitError::unknown_action(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_escape_menu_is_fixed() {
        for action in InputAction::ALL {
            assert_eq!(action.can_be_remapped(), action != InputAction::EscapeMenu);
        }
    }

    #[test]
    fn all_matches_declaration_order() {
        for (position, action) in InputAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), position);
        }
    }

    #[test]
    fn parses_stable_names() {
        assert_eq!(
            "VIEW_OBJECTIVE".parse::<InputAction>().unwrap(),
            InputAction::ViewObjective
        );
        assert_eq!(
            "flashlight-alt".parse::<InputAction>().unwrap(),
            InputAction::FlashlightAlt
        );
        assert!("JUMP".parse::<InputAction>().is_err());
    }

    #[test]
    fn placeholder_wraps_name_in_brackets() {
        assert_eq!(InputAction::Interact.placeholder(), "[INTERACT]");
        assert_eq!(InputAction::EscapeMenu.to_string(), "ESCAPE_MENU");
    }
}
