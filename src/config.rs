//! Window and manager configuration.
//!
//! [`WindowConfig`] starts from the stock defaults and each setter overrides
//! one of them; position and size accept either a bare pixel number or a
//! pre-formatted length string.

use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_X,
    DEFAULT_Y, DEFAULT_Z_INDEX_START_OFFSET,
};
use crate::geometry::{Length, WindowRect};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub resizable: bool,
    pub draggable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x: Length::Px(DEFAULT_X),
            y: Length::Px(DEFAULT_Y),
            width: Length::Px(DEFAULT_WIDTH),
            height: Length::Px(DEFAULT_HEIGHT),
            min_width: Some(DEFAULT_MIN_WIDTH),
            min_height: Some(DEFAULT_MIN_HEIGHT),
            resizable: true,
            draggable: true,
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn x(mut self, x: impl Into<Length>) -> Self {
        self.x = x.into();
        self
    }

    pub fn y(mut self, y: impl Into<Length>) -> Self {
        self.y = y.into();
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// `None` disables the corresponding minimum.
    pub fn min_size(mut self, min_width: Option<f64>, min_height: Option<f64>) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn rect(&self) -> WindowRect {
        WindowRect {
            x: self.x.clone(),
            y: self.y.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}

/// Named transitions played on open and close. `None` skips the effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Animations {
    pub wnd_open: Option<String>,
    pub wnd_close: Option<String>,
}

/// Cosmetic toggles. None of these change the state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behavior {
    pub apply_drag_styles: bool,
    pub use_simple_graphics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub z_index_start_offset: i64,
    pub animations: Animations,
    pub behavior: Behavior,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            z_index_start_offset: DEFAULT_Z_INDEX_START_OFFSET,
            animations: Animations::default(),
            behavior: Behavior::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_window() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.title, "Untitled");
        assert_eq!(cfg.rect(), WindowRect::px(10.0, 10.0, 450.0, 315.0));
        assert_eq!(cfg.min_width, Some(200.0));
        assert_eq!(cfg.min_height, Some(200.0));
        assert!(cfg.resizable && cfg.draggable);
    }

    #[test]
    fn setters_override_single_fields() {
        let cfg = WindowConfig::new().title("Notes").width("50%").x(42);
        assert_eq!(cfg.title, "Notes");
        assert_eq!(cfg.width, Length::Raw("50%".into()));
        assert_eq!(cfg.x, Length::Px(42.0));
        assert_eq!(cfg.height, Length::Px(315.0));
    }

    #[test]
    fn manager_defaults() {
        let cfg = ManagerConfig::default();
        assert_eq!(cfg.z_index_start_offset, 10);
        assert!(cfg.animations.wnd_open.is_none());
        assert!(!cfg.behavior.apply_drag_styles);
    }
}
