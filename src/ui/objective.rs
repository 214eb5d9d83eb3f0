//! Fading objective notification.
//!
//! The overlay fades in when a new objective is set or the player asks to see it, holds
//! at full opacity for a moment, then fades out. Time is passed in by the caller (seconds
//! on any monotonic clock); nothing here reads a clock or draws.

use crate::protocol::SyncMessage;

/// Objective shown before any trigger has fired.
pub const DEFAULT_OBJECTIVE: &str = "Find the documentary crew";

/// Banner shown when the objective was discovered by the other player.
pub const PARTNER_UPDATE_TEXT: &str = "Your partner discovered this objective";

/// Fade and hold durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTiming {
    pub fade_time: f32,
    pub hold_time: f32,
}

impl Default for OverlayTiming {
    fn default() -> Self {
        Self {
            fade_time: 10.0,
            hold_time: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    FadingIn { started: f32, from_alpha: f32 },
    Holding { since: f32 },
    FadingOut { since: f32 },
}

/// What the host should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame<'a> {
    pub alpha: f32,
    pub text: &'a str,
    pub partner_banner: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ObjectiveOverlay {
    timing: OverlayTiming,
    text: String,
    order: i32,
    no_objective: bool,
    partner_update: bool,
    phase: Phase,
    alpha: f32,
}

impl ObjectiveOverlay {
    /// An empty `initial_objective` starts in the no-objective state.
    pub fn new(timing: OverlayTiming, initial_objective: impl Into<String>) -> Self {
        let text = initial_objective.into();
        Self {
            timing,
            no_objective: text.is_empty(),
            text,
            order: -1,
            partner_update: false,
            phase: Phase::Hidden,
            alpha: 0.0,
        }
    }

    /// Replace the objective if there is none or `order` ranks above the current one.
    ///
    /// Orders keep a minor objective ("find the lighter") from replacing one the player
    /// has already moved past ("burn the statue"). Returns whether it was accepted; an
    /// accepted objective starts fading in immediately.
    pub fn set_objective(&mut self, text: impl Into<String>, order: i32, now: f32) -> bool {
        if !self.text.is_empty() && order <= self.order {
            log::debug!("objective with order {} ignored (current {})", order, self.order);
            return false;
        }
        self.text = text.into();
        self.order = order;
        self.no_objective = false;
        self.phase = Phase::FadingIn {
            started: now,
            from_alpha: self.alpha,
        };
        log::debug!("objective set: {:?} (order {})", self.text, order);
        true
    }

    /// Clear the objective; nothing is shown until a new one is set.
    pub fn reset(&mut self) {
        self.text.clear();
        self.order = 0;
        self.no_objective = true;
        self.phase = Phase::Hidden;
        self.alpha = 0.0;
    }

    /// Player asked to see the objective.
    pub fn show(&mut self, now: f32) {
        if self.no_objective {
            return;
        }
        match self.phase {
            Phase::Holding { .. } => self.phase = Phase::Holding { since: now },
            Phase::FadingOut { .. } => {
                self.phase = Phase::FadingIn {
                    started: now,
                    from_alpha: self.alpha,
                }
            }
            Phase::Hidden if self.alpha < 1.0 => {
                self.phase = Phase::FadingIn {
                    started: now,
                    from_alpha: self.alpha,
                }
            }
            Phase::Hidden | Phase::FadingIn { .. } => {}
        }
    }

    /// Show the objective together with the partner-discovery banner.
    pub fn show_partner_update(&mut self, now: f32) {
        self.partner_update = true;
        self.show(now);
    }

    /// Advance the fade and return what to draw, or `None` while hidden.
    pub fn tick(&mut self, now: f32) -> Option<OverlayFrame<'_>> {
        if self.no_objective {
            return None;
        }

        match self.phase {
            Phase::Hidden => return None,
            Phase::FadingIn {
                started,
                from_alpha,
            } => {
                let alpha = (from_alpha + progress(now - started, self.timing.fade_time)).min(1.0);
                if alpha >= 1.0 {
                    self.phase = Phase::Holding { since: now };
                }
                self.alpha = alpha;
            }
            Phase::Holding { since } => {
                if now - since >= self.timing.hold_time {
                    self.phase = Phase::FadingOut { since: now };
                }
                self.alpha = 1.0;
            }
            Phase::FadingOut { since } => {
                let alpha = 1.0 - progress(now - since, self.timing.fade_time);
                if alpha <= 0.0 {
                    self.phase = Phase::Hidden;
                    self.partner_update = false;
                }
                self.alpha = alpha.max(0.0);
            }
        }

        Some(OverlayFrame {
            alpha: self.alpha,
            text: &self.text,
            partner_banner: self.partner_update.then_some(PARTNER_UPDATE_TEXT),
        })
    }

    pub fn objective(&self) -> &str {
        &self.text
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn has_objective(&self) -> bool {
        !self.no_objective
    }

    pub fn is_visible(&self) -> bool {
        !self.no_objective && self.phase != Phase::Hidden
    }
}

impl Default for ObjectiveOverlay {
    fn default() -> Self {
        Self::new(OverlayTiming::default(), String::new())
    }
}

fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// World-side objective marker: announces its objective the first time it is reached.
#[derive(Debug, Clone)]
pub struct ObjectiveTrigger {
    text: String,
    order: i32,
    fired: bool,
}

impl ObjectiveTrigger {
    pub fn new(text: impl Into<String>, order: i32) -> Self {
        Self {
            text: text.into(),
            order,
            fired: false,
        }
    }

    /// The message to broadcast on first contact; `None` afterwards.
    pub fn fire(&mut self) -> Option<SyncMessage> {
        if self.fired {
            return None;
        }
        self.fired = true;
        Some(SyncMessage::SetObjective {
            text: self.text.clone(),
            order: self.order,
        })
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn objective(&self) -> &str {
        &self.text
    }

    pub fn order(&self) -> i32 {
        self.order
    }
}
