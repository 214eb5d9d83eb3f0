//! Per-frame orchestration of the input service and the UI state machines.
//!
//! `Session` owns one `InputManager`, the objective overlay, the open document (if any)
//! and a pending rebind (if any). The host calls [`Session::frame`] once per frame with
//! its key probe and reads back a [`FrameReport`] to draw.

use crate::config::HudConfig;
use crate::error::{HudkitError, Result};
use crate::input::{CaptureStatus, InputAction, InputManager, KeyStateProbe, RebindCapture};
use crate::protocol::{Participant, SyncMessage};
use crate::settings::SettingsStore;
use crate::ui::{Click, DocumentViewer, ObjectiveOverlay, Page, ScreenSize, ViewerEvent, ViewerInput};

/// Overlay output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayReport {
    pub alpha: f32,
    pub text: String,
    pub partner_banner: Option<&'static str>,
}

/// Document viewer output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerReport {
    pub name: String,
    pub page: usize,
    pub page_count: usize,
    pub close_prompt: String,
    pub event: ViewerEvent,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub overlay: Option<OverlayReport>,
    /// Present while a document is open, and on the frame it closes.
    pub viewer: Option<ViewerReport>,
    /// Present while a rebind is pending, and on the frame it finishes.
    pub rebind: Option<CaptureStatus>,
    pub menu_requested: bool,
}

pub struct Session<S> {
    input: InputManager<S>,
    overlay: ObjectiveOverlay,
    viewer: Option<DocumentViewer>,
    capture: Option<RebindCapture>,
    /// Gate value to put back once the pending capture finishes or is cancelled.
    input_before_capture: bool,
    capture_frame_limit: Option<u32>,
    close_prompt: String,
    screen: ScreenSize,
}

impl<S: SettingsStore> Session<S> {
    pub fn new(store: S, config: &HudConfig) -> Self {
        Self {
            input: InputManager::new(store),
            overlay: ObjectiveOverlay::new(
                config.overlay_timing(),
                config.overlay.initial_objective.clone(),
            ),
            viewer: None,
            capture: None,
            input_before_capture: true,
            capture_frame_limit: config.rebind.frame_limit,
            close_prompt: config.viewer.close_prompt.clone(),
            screen: ScreenSize::default(),
        }
    }

    pub fn input(&self) -> &InputManager<S> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager<S> {
        &mut self.input
    }

    pub fn overlay(&self) -> &ObjectiveOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut ObjectiveOverlay {
        &mut self.overlay
    }

    pub fn viewer(&self) -> Option<&DocumentViewer> {
        self.viewer.as_ref()
    }

    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Build a document using the configured close prompt.
    pub fn document(&self, name: impl Into<String>, pages: Vec<Page>) -> Result<DocumentViewer> {
        Ok(DocumentViewer::new(name, pages)?.with_close_prompt(self.close_prompt.clone()))
    }

    /// Open `viewer`, replacing any document already open.
    pub fn open_document(&mut self, mut viewer: DocumentViewer) {
        viewer.open();
        self.viewer = Some(viewer);
    }

    /// Take the current document out of the session, open or not.
    pub fn take_document(&mut self) -> Option<DocumentViewer> {
        self.viewer.take()
    }

    /// Start capturing the next released key for `action`.
    ///
    /// Action queries are suppressed until the capture finishes or is cancelled, then the
    /// gate goes back to whatever the caller had set before.
    pub fn begin_rebind(&mut self, action: InputAction) -> Result<()> {
        if !self.input.can_be_remapped(action) {
            return Err(HudkitError::NotRemappable {
                action: action.to_string(),
            });
        }
        let mut capture = RebindCapture::new(action);
        if let Some(limit) = self.capture_frame_limit {
            capture = capture.with_frame_limit(limit);
        }
        if self.capture.replace(capture).is_none() {
            self.input_before_capture = self.input.can_receive_input();
        }
        self.input.set_can_receive_input(false);
        log::debug!("waiting for a key to bind to {}", action);
        Ok(())
    }

    pub fn cancel_rebind(&mut self) {
        if self.capture.take().is_some() {
            self.input.set_can_receive_input(self.input_before_capture);
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Run one frame.
    ///
    /// A pending rebind consumes the frame's input; otherwise an open document gets
    /// INTERACT and clicks, and gameplay gets VIEW_OBJECTIVE and ESCAPE_MENU. The overlay
    /// advances every frame.
    ///
    /// A captured binding is flushed to the store on the frame it lands. Bindings changed
    /// any other way (`input_mut().rebind`, a `SyncMessage`) are durable only once the
    /// caller flushes the store or drops the session.
    pub fn frame<P>(&mut self, probe: &P, click: Option<Click>, now: f32) -> FrameReport
    where
        P: KeyStateProbe + ?Sized,
    {
        let mut report = FrameReport::default();

        if let Some(capture) = self.capture.as_mut() {
            let status = capture.poll(self.input.registry_mut(), probe);
            if status.is_finished() {
                self.capture = None;
                self.input.set_can_receive_input(self.input_before_capture);
                log::debug!("rebind finished: {:?}", status);
            }
            if let CaptureStatus::Bound(_) = status {
                if let Err(err) = self.input.registry_mut().store_mut().flush() {
                    log::warn!("failed to save new binding: {}", err);
                }
            }
            report.rebind = Some(status);
        } else if let Some(viewer) = self.viewer.as_mut().filter(|v| v.is_inspecting()) {
            let interact_pressed = self
                .input
                .is_pressed_this_frame(InputAction::Interact, probe);
            let event = viewer.update(
                ViewerInput {
                    interact_pressed,
                    click,
                },
                self.screen,
            );
            report.viewer = Some(ViewerReport {
                name: viewer.name().to_string(),
                page: viewer.current_page(),
                page_count: viewer.page_count(),
                close_prompt: viewer.close_prompt(&self.input),
                event,
            });
        } else {
            if self
                .input
                .is_pressed_this_frame(InputAction::ViewObjective, probe)
            {
                self.overlay.show(now);
            }
            report.menu_requested = self
                .input
                .is_pressed_this_frame(InputAction::EscapeMenu, probe);
        }

        report.overlay = self.overlay.tick(now).map(|frame| OverlayReport {
            alpha: frame.alpha,
            text: frame.text.to_string(),
            partner_banner: frame.partner_banner,
        });
        report
    }

    pub fn into_store(self) -> S {
        self.input.into_store()
    }
}

impl<S: SettingsStore> Participant for Session<S> {
    fn apply(&mut self, message: &SyncMessage, now: f32) {
        self.input.apply(message, now);
        self.overlay.apply(message, now);
    }
}
