//! The rendering collaborator.
//!
//! The manager never draws. It talks to a [`SurfaceBackend`] that can create
//! and remove one visual node per window, read and write that node's
//! rectangle, toggle visibility and classes, and play named transitions.
//! Input does not flow through the backend: the host hit-tests pointer
//! events itself (see [`hit_test`]) and calls the manager's input methods.

pub mod headless;
pub mod terminal;

pub use headless::HeadlessBackend;
pub use terminal::TerminalBackend;

use std::fmt;

use crate::config::WindowConfig;
use crate::geometry::{Point, Rect, WindowRect};
use crate::pointer::ResizeEdge;

/// Backend handle for one window's visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Completion token for a transition started with
/// [`SurfaceBackend::play_transition`]. Resolves exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    Minimize,
    Maximize,
    Close,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Minimize, Control::Maximize, Control::Close];

    pub fn glyph(self) -> &'static str {
        match self {
            Control::Minimize => "─",
            Control::Maximize => "▢",
            Control::Close => "✕",
        }
    }
}

/// A part of a window's chrome. Regions form a tree rooted at [`Region::Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Body,
    Titlebar,
    Title,
    ControlBox,
    Control(Control),
    Content,
    ResizeHandle(ResizeEdge),
}

/// Region discriminant, used for predicate sets such as drag cancel regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Body,
    Titlebar,
    Title,
    ControlBox,
    Control,
    Content,
    ResizeHandle,
}

impl Region {
    pub fn kind(self) -> RegionKind {
        match self {
            Region::Body => RegionKind::Body,
            Region::Titlebar => RegionKind::Titlebar,
            Region::Title => RegionKind::Title,
            Region::ControlBox => RegionKind::ControlBox,
            Region::Control(_) => RegionKind::Control,
            Region::Content => RegionKind::Content,
            Region::ResizeHandle(_) => RegionKind::ResizeHandle,
        }
    }

    pub fn parent(self) -> Option<Region> {
        match self {
            Region::Body => None,
            Region::Titlebar | Region::Content | Region::ResizeHandle(_) => Some(Region::Body),
            Region::Title | Region::ControlBox => Some(Region::Titlebar),
            Region::Control(_) => Some(Region::ControlBox),
        }
    }

    /// `self` followed by each ancestor up to [`Region::Body`].
    pub fn ancestors(self) -> impl Iterator<Item = Region> {
        std::iter::successors(Some(self), |region| region.parent())
    }

    /// True when `self` or any ancestor has a kind listed in `set`.
    pub fn matches_ancestor(self, set: &[RegionKind]) -> bool {
        self.ancestors().any(|region| set.contains(&region.kind()))
    }
}

/// What a pointer press or click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTarget {
    pub surface: SurfaceId,
    pub region: Region,
}

impl PointerTarget {
    pub fn new(surface: SurfaceId, region: Region) -> Self {
        Self { surface, region }
    }
}

pub trait SurfaceBackend {
    fn is_valid(&self) -> bool {
        true
    }

    /// Whether a manager already owns this container.
    fn is_bound(&self) -> bool;

    /// Mark the container as owned. Permanent for the container's lifetime.
    fn bind(&mut self);

    fn create_surface(&mut self, config: &WindowConfig) -> SurfaceId;

    /// Insert the surface into the container. Called once, on first show.
    fn attach_surface(&mut self, id: SurfaceId);

    fn destroy_surface(&mut self, id: SurfaceId);

    fn set_rect(&mut self, id: SurfaceId, rect: &WindowRect);

    /// Resolved bounding rectangle of the surface.
    fn rect(&self, id: SurfaceId) -> Rect;

    fn container_rect(&self) -> Rect;

    fn set_visible(&mut self, id: SurfaceId, visible: bool);

    fn set_z_index(&mut self, id: SurfaceId, z: i64);

    fn add_class(&mut self, id: SurfaceId, name: &str);

    fn remove_class(&mut self, id: SurfaceId, name: &str);

    fn has_class(&self, id: SurfaceId, name: &str) -> bool;

    fn set_title(&mut self, id: SurfaceId, title: &str);

    fn set_control_visible(&mut self, id: SurfaceId, control: Control, visible: bool);

    /// Whether presses on the border report resize handles.
    fn set_resize_handles(&mut self, id: SurfaceId, enabled: bool);

    /// Bounding rectangle of one region of the surface.
    fn target_rect(&self, id: SurfaceId, region: Region) -> Rect;

    fn play_transition(&mut self, id: SurfaceId, name: &str) -> TransitionId;

    fn matches_ancestor(&self, target: Region, set: &[RegionKind]) -> bool {
        target.matches_ancestor(set)
    }
}

/// Chrome measurements a backend uses to lay regions out inside a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeMetrics {
    pub titlebar: f64,
    pub button_width: f64,
    pub handle: f64,
}

impl ChromeMetrics {
    pub const PIXELS: ChromeMetrics = ChromeMetrics {
        titlebar: crate::constants::TITLEBAR_HEIGHT,
        button_width: crate::constants::TITLEBAR_HEIGHT,
        handle: 4.0,
    };

    pub const CELLS: ChromeMetrics = ChromeMetrics {
        titlebar: crate::constants::TERMINAL_TITLEBAR_ROWS,
        button_width: 3.0,
        handle: 1.0,
    };
}

/// Rectangle of `region` inside a window occupying `window`.
pub fn region_rect(window: Rect, region: Region, metrics: ChromeMetrics) -> Rect {
    let m = metrics;
    let controls = m.button_width * Control::ALL.len() as f64;
    match region {
        Region::Body => window,
        Region::Titlebar => Rect::new(window.x, window.y, window.width, m.titlebar),
        Region::Title => Rect::new(
            window.x,
            window.y,
            (window.width - controls).max(0.0),
            m.titlebar,
        ),
        Region::ControlBox => Rect::new(
            window.right() - controls - m.handle,
            window.y,
            controls,
            m.titlebar,
        ),
        Region::Control(control) => {
            let idx = Control::ALL.iter().position(|c| *c == control).unwrap_or(0);
            Rect::new(
                window.right() - controls - m.handle + m.button_width * idx as f64,
                window.y,
                m.button_width,
                m.titlebar,
            )
        }
        Region::Content => Rect::new(
            window.x,
            window.y + m.titlebar,
            window.width,
            (window.height - m.titlebar).max(0.0),
        ),
        Region::ResizeHandle(edge) => {
            let h = m.handle;
            let (left, top) = (window.x, window.y);
            let (right, bottom) = (window.right() - h, window.bottom() - h);
            match edge {
                ResizeEdge::TopLeft => Rect::new(left, top, h, h),
                ResizeEdge::TopRight => Rect::new(right, top, h, h),
                ResizeEdge::BottomLeft => Rect::new(left, bottom, h, h),
                ResizeEdge::BottomRight => Rect::new(right, bottom, h, h),
                ResizeEdge::Top => Rect::new(left + h, top, window.width - 2.0 * h, h),
                ResizeEdge::Bottom => Rect::new(left + h, bottom, window.width - 2.0 * h, h),
                ResizeEdge::Left => Rect::new(left, top + h, h, window.height - 2.0 * h),
                ResizeEdge::Right => Rect::new(right, top + h, h, window.height - 2.0 * h),
            }
        }
    }
}

/// Deepest region of a window at `point`, or `None` outside the window.
///
/// Resize handles win over the titlebar along the outer border. Handles are
/// only reported when `resizable` is set.
pub fn hit_test(window: Rect, point: Point, metrics: ChromeMetrics, resizable: bool) -> Option<Region> {
    if !window.contains(point) {
        return None;
    }
    if resizable {
        let corners_first = [
            ResizeEdge::TopLeft,
            ResizeEdge::TopRight,
            ResizeEdge::BottomLeft,
            ResizeEdge::BottomRight,
            ResizeEdge::Top,
            ResizeEdge::Bottom,
            ResizeEdge::Left,
            ResizeEdge::Right,
        ];
        if let Some(edge) = corners_first
            .into_iter()
            .find(|edge| region_rect(window, Region::ResizeHandle(*edge), metrics).contains(point))
        {
            return Some(Region::ResizeHandle(edge));
        }
    }
    if let Some(control) = Control::ALL
        .into_iter()
        .find(|c| region_rect(window, Region::Control(*c), metrics).contains(point))
    {
        return Some(Region::Control(control));
    }
    if region_rect(window, Region::Title, metrics).contains(point) {
        return Some(Region::Title);
    }
    if region_rect(window, Region::Titlebar, metrics).contains(point) {
        return Some(Region::Titlebar);
    }
    if region_rect(window, Region::Content, metrics).contains(point) {
        return Some(Region::Content);
    }
    Some(Region::Body)
}
