//! Headless UI state: the objective overlay and the document viewer.
//!
//! Both are per-frame state machines driven by the session; drawing them is left to the
//! host, which reads the frame data they return.

pub mod objective;
pub mod screen;
pub mod viewer;

pub use objective::{
    ObjectiveOverlay, ObjectiveTrigger, OverlayFrame, OverlayTiming, DEFAULT_OBJECTIVE,
    PARTNER_UPDATE_TEXT,
};
pub use screen::{Rect, ScreenScale, ScreenSize};
pub use viewer::{Click, DocumentViewer, Page, ViewerEvent, ViewerInput, DEFAULT_CLOSE_PROMPT};
