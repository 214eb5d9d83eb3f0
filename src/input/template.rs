//! `[ACTION]` placeholder substitution for player-facing strings.

use crate::input::action::InputAction;
use crate::input::key::KeyCode;
use crate::input::registry::BindingTable;

/// Player-facing key name: `"Arrow"` dropped from arrow keys, otherwise the `"Right"`
/// and `"Left"` side qualifiers dropped (`LeftShift` -> `Shift`, `RightArrow` -> `Right`).
pub fn display_name(key: KeyCode) -> String {
    let raw = key.name();
    if raw.contains("Arrow") {
        raw.replace("Arrow", "")
    } else {
        raw.replace("Right", "").replace("Left", "")
    }
}

/// Replace every `[NAME]` placeholder with the display name of the key bound to `NAME`.
///
/// Actions are substituted one at a time in declaration order, each pass running over
/// the previous pass's output. Text produced by an earlier action can therefore form a
/// placeholder for a later action, but never the other way round.
pub fn render(template: &str, bindings: &BindingTable) -> String {
    let mut output = template.to_string();
    for (action, key) in bindings.iter() {
        let placeholder = action.placeholder();
        if output.contains(&placeholder) {
            output = output.replace(&placeholder, &display_name(key));
        }
    }
    output
}

/// Placeholders in `template` that name no action, e.g. `[JUMP]`.
///
/// Useful for catching typos in UI strings; `render` leaves such text untouched.
pub fn unknown_placeholders(template: &str) -> Vec<&str> {
    let mut unknown = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(']') else {
            break;
        };
        let name = &after_open[..close];
        let is_candidate = !name.is_empty()
            && name
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch == '_' || ch.is_ascii_digit());
        if is_candidate && !InputAction::ALL.iter().any(|action| action.name() == name) {
            unknown.push(name);
        }
        rest = &after_open[close + 1..];
    }
    unknown
}
