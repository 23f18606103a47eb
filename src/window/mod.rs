mod handle;
mod window_manager;

use std::fmt;

pub use handle::WindowMut;
pub use window_manager::{ManagerStats, WindowManager};

use crate::backend::{Control, SurfaceId, TransitionId};
use crate::events::{Listeners, WindowEvent};
use crate::geometry::WindowRect;

/// Manager-assigned window identity. Never reused by the same manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which titlebar controls are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlVisibility {
    pub close: bool,
    pub minimize: bool,
    pub maximize: bool,
}

impl Default for ControlVisibility {
    fn default() -> Self {
        Self {
            close: true,
            minimize: true,
            maximize: true,
        }
    }
}

impl ControlVisibility {
    pub fn is_visible(&self, control: Control) -> bool {
        match control {
            Control::Close => self.close,
            Control::Minimize => self.minimize,
            Control::Maximize => self.maximize,
        }
    }
}

/// State of one live window. Mutated through [`WindowMut`] and the manager.
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    surface: SurfaceId,
    title: String,
    rect: WindowRect,
    saved_rect: Option<WindowRect>,
    visible: bool,
    registered: bool,
    maximized: bool,
    active: bool,
    resizable: bool,
    resize_enabled: bool,
    draggable: bool,
    drag_enabled: bool,
    min_width: Option<f64>,
    min_height: Option<f64>,
    z_order: i64,
    controls: ControlVisibility,
    closing: Option<TransitionId>,
    listeners: Listeners<WindowEvent>,
}

impl Window {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The styled rectangle, as last written to the surface.
    pub fn styled_rect(&self) -> &WindowRect {
        &self.rect
    }

    /// Rectangle saved by the last maximize, cleared again on restore.
    pub fn saved_rect(&self) -> Option<&WindowRect> {
        self.saved_rect.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the surface has been attached to the container (first show).
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Resize capability, fixed at creation. Gates maximize.
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Whether resize handles currently respond.
    pub fn resize_enabled(&self) -> bool {
        self.resize_enabled
    }

    /// Drag capability, fixed at creation.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Whether a press on the titlebar currently starts a drag.
    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn min_size(&self) -> (Option<f64>, Option<f64>) {
        (self.min_width, self.min_height)
    }

    pub fn z_order(&self) -> i64 {
        self.z_order
    }

    pub fn controls(&self) -> ControlVisibility {
        self.controls
    }

    /// A close transition is running; the window dies when it resolves.
    pub fn is_closing(&self) -> bool {
        self.closing.is_some()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} \"{}\"", self.id, self.title)
    }
}
