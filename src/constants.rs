//! Shared crate-wide constants.

use crate::backend::RegionKind;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_WIDTH: f64 = 450.0;
pub const DEFAULT_HEIGHT: f64 = 315.0;
pub const DEFAULT_MIN_WIDTH: f64 = 200.0;
pub const DEFAULT_MIN_HEIGHT: f64 = 200.0;
pub const DEFAULT_X: f64 = 10.0;
pub const DEFAULT_Y: f64 = 10.0;

/// Added to every computed z-order so windows layer above host content.
pub const DEFAULT_Z_INDEX_START_OFFSET: i64 = 10;

/// Surface class carried by the single active window.
pub const CLASS_ACTIVE: &str = "active";
/// Surface class carried while maximized.
pub const CLASS_MAXIMIZED: &str = "maximized";
/// Surface class applied during a drag when drag styles are enabled.
pub const CLASS_DRAGGING: &str = "dragging";
/// Surface class applied to every window when simple graphics are enabled.
pub const CLASS_SIMPLE: &str = "simple";
/// Applied while a resize session is running, to suppress text selection.
pub const CLASS_RESIZING: &str = "resizing";

/// Regions that never start a drag when pressed. A press on any descendant
/// of one of these is cancelled too.
pub const DEFAULT_CANCEL_REGIONS: &[RegionKind] = &[
    RegionKind::Content,
    RegionKind::ControlBox,
    RegionKind::ResizeHandle,
];

/// Titlebar height in pixels used by backends that lay chrome out themselves.
pub const TITLEBAR_HEIGHT: f64 = 28.0;

/// Titlebar height in terminal rows (border row plus title row).
pub const TERMINAL_TITLEBAR_ROWS: f64 = 2.0;
