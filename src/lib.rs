//! Window management for embedded desktops.
//!
//! A [`WindowManager`] owns the windows living inside one container: it
//! creates them, keeps exactly one of them active and on top, maximizes and
//! restores them, and turns pointer presses into move and resize sessions.
//! Drawing is delegated to a [`SurfaceBackend`]; this crate ships an
//! in-memory one for tests and a ratatui one for terminals.

pub mod backend;
pub mod config;
pub mod constants;
pub mod decorator;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod events;
pub mod geometry;
pub mod pointer;
pub mod tracing_sub;
pub mod window;

pub use backend::{
    Control, HeadlessBackend, PointerTarget, Region, RegionKind, SurfaceBackend, SurfaceId,
    TerminalBackend, TransitionId,
};
pub use config::{Animations, Behavior, ManagerConfig, WindowConfig};
pub use error::{Result, WmError};
pub use events::{ListenerId, Listeners, WindowEvent};
pub use geometry::{Length, Point, Rect, WindowRect};
pub use pointer::{PointerCoordinator, ResizeEdge, SharedCoordinator};
pub use window::{ControlVisibility, ManagerStats, Window, WindowId, WindowManager, WindowMut};
