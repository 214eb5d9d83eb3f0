//! Low-level key state: the per-frame probe the binding layer queries, a frame snapshot
//! built from host key events, and a crossterm-backed source for terminal hosts.

use crate::error::Result;
use crate::input::key::KeyCode;
use ratatui::crossterm::event::{
    self, Event, KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode,
    MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::HashSet;
use std::time::Duration;

/// Per-frame physical key probe supplied by the host.
///
/// Each query reflects the current frame's input snapshot only.
pub trait KeyStateProbe {
    fn held(&self, key: KeyCode) -> bool;
    fn pressed_this_frame(&self, key: KeyCode) -> bool;
    fn released_this_frame(&self, key: KeyCode) -> bool;
}

impl<T: KeyStateProbe + ?Sized> KeyStateProbe for &T {
    fn held(&self, key: KeyCode) -> bool {
        (**self).held(key)
    }

    fn pressed_this_frame(&self, key: KeyCode) -> bool {
        (**self).pressed_this_frame(key)
    }

    fn released_this_frame(&self, key: KeyCode) -> bool {
        (**self).released_this_frame(key)
    }
}

/// Raw transition reported by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKeyEvent {
    Down(KeyCode),
    Up(KeyCode),
}

/// Frame snapshot assembled from raw key events.
///
/// Call [`begin_frame`](Self::begin_frame) once per frame before feeding that frame's
/// events; held keys carry over, pressed/released transitions do not.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub fn process_event(&mut self, event: RawKeyEvent) {
        match event {
            RawKeyEvent::Down(key) => {
                if self.held.insert(key) {
                    self.pressed.insert(key);
                }
            }
            RawKeyEvent::Up(key) => {
                // A release is reported even if the matching press was never seen.
                self.held.remove(&key);
                self.released.insert(key);
            }
        }
    }

    /// Convenience for tests and scripted hosts: feed a batch of events for a new frame.
    pub fn frame(&mut self, events: impl IntoIterator<Item = RawKeyEvent>) -> &mut Self {
        self.begin_frame();
        for event in events {
            self.process_event(event);
        }
        self
    }

    /// True when nothing is held and no transition happened this frame.
    pub fn is_idle(&self) -> bool {
        self.held.is_empty() && self.pressed.is_empty() && self.released.is_empty()
    }
}

impl KeyStateProbe for KeyboardState {
    fn held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    fn pressed_this_frame(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    fn released_this_frame(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }
}

/// Terminal host: drains crossterm events into a [`KeyboardState`] once per frame.
///
/// Most terminals only report presses. Unless `reports_releases` is set (keyboard
/// enhancement enabled), every press is followed by a synthetic release on the next frame.
#[derive(Debug)]
pub struct TerminalKeySource {
    state: KeyboardState,
    reports_releases: bool,
    deferred_releases: Vec<KeyCode>,
}

impl TerminalKeySource {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            state: KeyboardState::new(),
            reports_releases,
            deferred_releases: Vec::new(),
        }
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    /// Start a frame, delivering releases deferred from the previous one.
    pub fn begin_frame(&mut self) {
        self.state.begin_frame();
        for key in self.deferred_releases.drain(..) {
            self.state.process_event(RawKeyEvent::Up(key));
        }
    }

    /// Feed one crossterm event. Returns true for Ctrl-C, which is never translated.
    pub fn process_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key_event) => {
                if is_interrupt(key_event) {
                    return true;
                }
                self.process_key(key_event);
            }
            Event::Mouse(mouse_event) => self.process_mouse(mouse_event),
            _ => {}
        }
        false
    }

    /// Begin a frame and drain every event already queued, without blocking.
    ///
    /// Returns true if Ctrl-C was seen.
    pub fn poll_frame(&mut self) -> Result<bool> {
        self.begin_frame();
        let mut interrupted = false;
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            interrupted |= self.process_event(&event);
        }
        Ok(interrupted)
    }

    fn process_key(&mut self, key_event: &KeyEvent) {
        let Some(key) = translate_key(key_event.code) else {
            log::trace!("untranslated terminal key {:?}", key_event.code);
            return;
        };
        match key_event.kind {
            KeyEventKind::Press => {
                self.state.process_event(RawKeyEvent::Down(key));
                if !self.reports_releases {
                    self.deferred_releases.push(key);
                }
            }
            KeyEventKind::Release => self.state.process_event(RawKeyEvent::Up(key)),
            KeyEventKind::Repeat => {}
        }
    }

    fn process_mouse(&mut self, mouse_event: &MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::Down(button) => {
                self.state.process_event(RawKeyEvent::Down(translate_button(button)))
            }
            MouseEventKind::Up(button) => {
                self.state.process_event(RawKeyEvent::Up(translate_button(button)))
            }
            _ => {}
        }
    }
}

impl KeyStateProbe for TerminalKeySource {
    fn held(&self, key: KeyCode) -> bool {
        self.state.held(key)
    }

    fn pressed_this_frame(&self, key: KeyCode) -> bool {
        self.state.pressed_this_frame(key)
    }

    fn released_this_frame(&self, key: KeyCode) -> bool {
        self.state.released_this_frame(key)
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, TermKey::Char('c') | TermKey::Char('C'))
}

/// Map a crossterm key to the host key enumeration.
pub fn translate_key(code: TermKey) -> Option<KeyCode> {
    let key = match code {
        TermKey::Char(ch) => return translate_char(ch),
        TermKey::Backspace => KeyCode::Backspace,
        TermKey::Enter => KeyCode::Return,
        TermKey::Tab | TermKey::BackTab => KeyCode::Tab,
        TermKey::Esc => KeyCode::Escape,
        TermKey::Delete => KeyCode::Delete,
        TermKey::Insert => KeyCode::Insert,
        TermKey::Home => KeyCode::Home,
        TermKey::End => KeyCode::End,
        TermKey::PageUp => KeyCode::PageUp,
        TermKey::PageDown => KeyCode::PageDown,
        TermKey::Up => KeyCode::UpArrow,
        TermKey::Down => KeyCode::DownArrow,
        TermKey::Left => KeyCode::LeftArrow,
        TermKey::Right => KeyCode::RightArrow,
        TermKey::CapsLock => KeyCode::CapsLock,
        TermKey::ScrollLock => KeyCode::ScrollLock,
        TermKey::NumLock => KeyCode::Numlock,
        TermKey::Pause => KeyCode::Pause,
        TermKey::PrintScreen => KeyCode::Print,
        TermKey::Menu => KeyCode::Menu,
        TermKey::F(n @ 1..=15) => KeyCode::from_code(KeyCode::F1.code() + i32::from(n) - 1)?,
        TermKey::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift => KeyCode::LeftShift,
            ModifierKeyCode::RightShift => KeyCode::RightShift,
            ModifierKeyCode::LeftControl => KeyCode::LeftControl,
            ModifierKeyCode::RightControl => KeyCode::RightControl,
            ModifierKeyCode::LeftAlt => KeyCode::LeftAlt,
            ModifierKeyCode::RightAlt => KeyCode::RightAlt,
            ModifierKeyCode::LeftSuper => KeyCode::LeftWindows,
            ModifierKeyCode::RightSuper => KeyCode::RightWindows,
            ModifierKeyCode::IsoLevel3Shift => KeyCode::AltGr,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

fn translate_char(ch: char) -> Option<KeyCode> {
    let key = match ch {
        'a'..='z' | 'A'..='Z' => {
            let offset = ch.to_ascii_lowercase() as i32 - 'a' as i32;
            return KeyCode::from_code(KeyCode::A.code() + offset);
        }
        '0'..='9' => {
            let offset = ch as i32 - '0' as i32;
            return KeyCode::from_code(KeyCode::Alpha0.code() + offset);
        }
        ' ' => KeyCode::Space,
        '\'' => KeyCode::Quote,
        ',' => KeyCode::Comma,
        '-' => KeyCode::Minus,
        '.' => KeyCode::Period,
        '/' => KeyCode::Slash,
        ';' => KeyCode::Semicolon,
        '=' => KeyCode::Equals,
        '[' => KeyCode::LeftBracket,
        '\\' => KeyCode::Backslash,
        ']' => KeyCode::RightBracket,
        '`' => KeyCode::BackQuote,
        '!' => KeyCode::Exclaim,
        '"' => KeyCode::DoubleQuote,
        '#' => KeyCode::Hash,
        '$' => KeyCode::Dollar,
        '%' => KeyCode::Percent,
        '&' => KeyCode::Ampersand,
        '(' => KeyCode::LeftParen,
        ')' => KeyCode::RightParen,
        '*' => KeyCode::Asterisk,
        '+' => KeyCode::Plus,
        ':' => KeyCode::Colon,
        '<' => KeyCode::Less,
        '>' => KeyCode::Greater,
        '?' => KeyCode::Question,
        '@' => KeyCode::At,
        '^' => KeyCode::Caret,
        '_' => KeyCode::Underscore,
        '{' => KeyCode::LeftCurlyBracket,
        '|' => KeyCode::Pipe,
        '}' => KeyCode::RightCurlyBracket,
        '~' => KeyCode::Tilde,
        _ => return None,
    };
    Some(key)
}

fn translate_button(button: MouseButton) -> KeyCode {
    match button {
        MouseButton::Left => KeyCode::Mouse0,
        MouseButton::Right => KeyCode::Mouse1,
        MouseButton::Middle => KeyCode::Mouse2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: TermKey) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: TermKey) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn transitions_last_one_frame() {
        let mut state = KeyboardState::new();
        state.frame([RawKeyEvent::Down(KeyCode::E)]);
        assert!(state.held(KeyCode::E));
        assert!(state.pressed_this_frame(KeyCode::E));

        state.begin_frame();
        assert!(state.held(KeyCode::E));
        assert!(!state.pressed_this_frame(KeyCode::E));

        state.frame([RawKeyEvent::Up(KeyCode::E)]);
        assert!(!state.held(KeyCode::E));
        assert!(state.released_this_frame(KeyCode::E));

        state.begin_frame();
        assert!(state.is_idle());
    }

    #[test]
    fn tap_within_one_frame_reports_both_edges() {
        let mut state = KeyboardState::new();
        state.frame([RawKeyEvent::Down(KeyCode::F), RawKeyEvent::Up(KeyCode::F)]);
        assert!(state.pressed_this_frame(KeyCode::F));
        assert!(state.released_this_frame(KeyCode::F));
        assert!(!state.held(KeyCode::F));
    }

    #[test]
    fn repeated_down_is_not_a_new_press() {
        let mut state = KeyboardState::new();
        state.frame([RawKeyEvent::Down(KeyCode::W)]);
        state.frame([RawKeyEvent::Down(KeyCode::W)]);
        assert!(state.held(KeyCode::W));
        assert!(!state.pressed_this_frame(KeyCode::W));
    }

    #[test]
    fn terminal_press_gets_synthetic_release_next_frame() {
        let mut source = TerminalKeySource::new(false);
        source.begin_frame();
        assert!(!source.process_event(&press(TermKey::Char('E'))));
        assert!(source.pressed_this_frame(KeyCode::E));
        assert!(!source.released_this_frame(KeyCode::E));

        source.begin_frame();
        assert!(source.released_this_frame(KeyCode::E));
        assert!(!source.held(KeyCode::E));
    }

    #[test]
    fn terminal_with_release_reporting_waits_for_release() {
        let mut source = TerminalKeySource::new(true);
        source.begin_frame();
        source.process_event(&press(TermKey::Up));
        source.begin_frame();
        assert!(source.held(KeyCode::UpArrow));
        assert!(!source.released_this_frame(KeyCode::UpArrow));

        source.process_event(&release(TermKey::Up));
        assert!(source.released_this_frame(KeyCode::UpArrow));
    }

    #[test]
    fn ctrl_c_is_an_interrupt_not_a_key() {
        let mut source = TerminalKeySource::new(false);
        source.begin_frame();
        let ctrl_c = Event::Key(KeyEvent::new(TermKey::Char('c'), KeyModifiers::CONTROL));
        assert!(source.process_event(&ctrl_c));
        assert!(!source.pressed_this_frame(KeyCode::C));
    }

    #[test]
    fn mouse_buttons_map_to_mouse_keys() {
        let mut source = TerminalKeySource::new(false);
        source.begin_frame();
        source.process_event(&mouse(MouseEventKind::Down(MouseButton::Middle)));
        assert!(source.pressed_this_frame(KeyCode::Mouse2));
        source.begin_frame();
        source.process_event(&mouse(MouseEventKind::Up(MouseButton::Middle)));
        assert!(source.released_this_frame(KeyCode::Mouse2));
    }

    #[test]
    fn translates_common_keys() {
        assert_eq!(translate_key(TermKey::Char('w')), Some(KeyCode::W));
        assert_eq!(translate_key(TermKey::Char('7')), Some(KeyCode::Alpha7));
        assert_eq!(translate_key(TermKey::F(12)), Some(KeyCode::F12));
        assert_eq!(translate_key(TermKey::F(15)), Some(KeyCode::F15));
        assert_eq!(translate_key(TermKey::F(16)), None);
        assert_eq!(translate_key(TermKey::Char('(')), Some(KeyCode::LeftParen));
        assert_eq!(
            translate_key(TermKey::Modifier(ModifierKeyCode::RightSuper)),
            Some(KeyCode::RightWindows)
        );
        assert_eq!(translate_key(TermKey::Left), Some(KeyCode::LeftArrow));
        assert_eq!(
            translate_key(TermKey::Modifier(ModifierKeyCode::LeftShift)),
            Some(KeyCode::LeftShift)
        );
        assert_eq!(translate_key(TermKey::Char('é')), None);
    }
}
