//! Maps touch samples to navigation actions.

use super::{TouchGesture, TouchSample};
use crate::{
    layout::{footer_top, footer_zone},
    mode::Mode,
    render::FontScale,
};

/// Navigation produced by an accepted gesture.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavAction {
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    FontUp,
    FontDown,
    ToggleUi,
}

impl NavAction {
    pub const fn is_toggle(self) -> bool {
        matches!(self, Self::ToggleUi)
    }
}

/// Display state the classifier needs to resolve a sample.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GestureContext {
    pub mode: Mode,
    pub ui_visible: bool,
    pub screen_w: i32,
    pub screen_h: i32,
    pub page_index: usize,
    pub page_count: usize,
    pub font_scale: FontScale,
}

impl GestureContext {
    fn is_first_page(&self) -> bool {
        self.page_index == 0
    }

    fn is_last_page(&self) -> bool {
        self.page_index + 1 >= self.page_count
    }
}

/// Resolves one sample. `None` means the sample changes nothing.
pub fn classify(sample: &TouchSample, ctx: &GestureContext) -> Option<NavAction> {
    if ctx.mode == Mode::None {
        return None;
    }

    match sample.gesture {
        TouchGesture::Flick { dx, dy } => {
            if dx.unsigned_abs() > dy.unsigned_abs() {
                classify_horizontal(dx, ctx)
            } else {
                classify_vertical(dy, ctx)
            }
        }
        TouchGesture::Tap => {
            let footer = ctx.ui_visible && sample.y > footer_top(ctx.screen_h);
            if footer {
                classify_footer(sample.x, ctx)
            } else {
                Some(NavAction::ToggleUi)
            }
        }
        TouchGesture::Contact => None,
    }
}

fn classify_horizontal(dx: i32, ctx: &GestureContext) -> Option<NavAction> {
    if !ctx.mode.is_paged() {
        return None;
    }
    if dx < 0 {
        (!ctx.is_last_page()).then_some(NavAction::NextPage)
    } else {
        (!ctx.is_first_page()).then_some(NavAction::PrevPage)
    }
}

fn classify_vertical(dy: i32, ctx: &GestureContext) -> Option<NavAction> {
    if !ctx.mode.has_font_scale() {
        return None;
    }
    if dy < 0 {
        ctx.font_scale.larger().map(|_| NavAction::FontUp)
    } else {
        ctx.font_scale.smaller().map(|_| NavAction::FontDown)
    }
}

/// The footer band swallows taps even in modes without page buttons.
fn classify_footer(x: i32, ctx: &GestureContext) -> Option<NavAction> {
    if !ctx.mode.is_paged() {
        return None;
    }
    match footer_zone(x, ctx.screen_w) {
        0 => (!ctx.is_first_page()).then_some(NavAction::FirstPage),
        1 => (!ctx.is_first_page()).then_some(NavAction::PrevPage),
        3 => (!ctx.is_last_page()).then_some(NavAction::NextPage),
        4 => (!ctx.is_last_page()).then_some(NavAction::LastPage),
        _ => None,
    }
}

/// [`classify`] behind a quiet period after every accepted action.
///
/// One continuous touch can be reported over several ticks; samples arriving
/// before `settle_until_ms` are dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GestureClassifier {
    page_settle_ms: u64,
    toggle_settle_ms: u64,
    settle_until_ms: u64,
}

impl GestureClassifier {
    pub const fn new(page_settle_ms: u64, toggle_settle_ms: u64) -> Self {
        Self {
            page_settle_ms,
            toggle_settle_ms,
            settle_until_ms: 0,
        }
    }

    pub fn is_settling(&self, now_ms: u64) -> bool {
        now_ms < self.settle_until_ms
    }

    pub fn accept(
        &mut self,
        sample: &TouchSample,
        ctx: &GestureContext,
        now_ms: u64,
    ) -> Option<NavAction> {
        if self.is_settling(now_ms) {
            return None;
        }

        let action = classify(sample, ctx)?;
        let settle = if action.is_toggle() {
            self.toggle_settle_ms
        } else {
            self.page_settle_ms
        };
        self.settle_until_ms = now_ms.saturating_add(settle);
        Some(action)
    }
}
