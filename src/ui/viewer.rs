//! Paginated document/image inspection.
//!
//! While a document is open the player flips pages by clicking either side of the page
//! and closes it with INTERACT or a click along the top of the screen.

use crate::error::{HudkitError, Result};
use crate::input::InputManager;
use crate::settings::SettingsStore;
use crate::ui::screen::{Rect, ScreenScale, ScreenSize};

pub const DEFAULT_CLOSE_PROMPT: &str = "Press [INTERACT] to close";

/// Vertical offset of the page below the close prompt, in reference pixels.
const PAGE_TOP_OFFSET: f32 = 50.0;

/// Page image dimensions in reference pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub width: u32,
    pub height: u32,
}

impl Page {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pointer click in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub x: f32,
    pub y: f32,
}

/// This frame's input as seen by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerInput {
    pub interact_pressed: bool,
    pub click: Option<Click>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Idle,
    PageChanged(usize),
    Closed,
}

#[derive(Debug, Clone)]
pub struct DocumentViewer {
    name: String,
    pages: Vec<Page>,
    current: usize,
    inspecting: bool,
    can_exit: bool,
    collected: bool,
    close_prompt: String,
}

impl DocumentViewer {
    pub fn new(name: impl Into<String>, pages: Vec<Page>) -> Result<Self> {
        let name = name.into();
        if pages.is_empty() {
            return Err(HudkitError::EmptyDocument { name });
        }
        Ok(Self {
            name,
            pages,
            current: 0,
            inspecting: false,
            can_exit: false,
            collected: false,
            close_prompt: DEFAULT_CLOSE_PROMPT.to_string(),
        })
    }

    pub fn with_close_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.close_prompt = prompt.into();
        self
    }

    /// Start inspecting from the first page.
    ///
    /// Closing is ignored until the next update, so the press that opened the document
    /// cannot also close it.
    pub fn open(&mut self) {
        self.inspecting = true;
        self.current = 0;
        self.can_exit = false;
        log::debug!("inspecting {} ({} pages)", self.name, self.pages.len());
    }

    pub fn update(&mut self, input: ViewerInput, screen: ScreenSize) -> ViewerEvent {
        if !self.inspecting {
            return ViewerEvent::Idle;
        }

        let mut event = ViewerEvent::Idle;
        let mut exiting = input.interact_pressed;

        if let Some(click) = input.click {
            if click.y < screen.height as f32 / 5.0 {
                exiting = true;
            } else if click.x > self.page_rect(screen).x {
                if self.has_next() {
                    self.current += 1;
                    event = ViewerEvent::PageChanged(self.current);
                }
            } else if self.has_previous() {
                self.current -= 1;
                event = ViewerEvent::PageChanged(self.current);
            }
        }

        if exiting && self.can_exit {
            self.current = 0;
            self.inspecting = false;
            event = ViewerEvent::Closed;
        }
        self.can_exit = true;
        event
    }

    /// Where the current page sits: centered horizontally, nudged below the prompt.
    pub fn page_rect(&self, screen: ScreenSize) -> Rect {
        let scale = ScreenScale::new(screen);
        let page = self.pages[self.current];
        let width = scale.pixels(page.width as f32);
        let height = scale.pixels(page.height as f32);
        Rect {
            x: (screen.width as f32 - width) / 2.0,
            y: (screen.height as f32 - height + scale.pixels(PAGE_TOP_OFFSET)) / 2.0,
            width,
            height,
        }
    }

    /// Close prompt with the current INTERACT binding substituted.
    pub fn close_prompt<S: SettingsStore>(&self, input: &InputManager<S>) -> String {
        input.render(&self.close_prompt)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    pub fn is_inspecting(&self) -> bool {
        self.inspecting
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn set_collected(&mut self) {
        self.collected = true;
    }
}
