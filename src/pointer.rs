//! Pointer-driven move and resize sessions.
//!
//! One [`PointerCoordinator`] serializes every drag and resize: it holds at
//! most one [`Session`], and a second `begin_*` while a session is running
//! is refused with [`WmError::SessionActive`]. Managers that share a
//! container tree share a coordinator through [`SharedCoordinator`], which
//! keeps the single-session rule process-wide without a global.
//!
//! The geometry itself lives in the free functions [`drag_position`] and
//! [`apply_resize`] so it can be tested without a manager.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, WmError};
use crate::geometry::{Point, Rect};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::BottomRight,
        ResizeEdge::TopRight,
        ResizeEdge::Right,
        ResizeEdge::Bottom,
        ResizeEdge::BottomLeft,
        ResizeEdge::Left,
        ResizeEdge::TopLeft,
        ResizeEdge::Top,
    ];

    /// Parse a compass abbreviation (`"n"`, `"se"`, ...).
    pub fn from_compass(s: &str) -> Option<Self> {
        Some(match s {
            "n" => ResizeEdge::Top,
            "s" => ResizeEdge::Bottom,
            "e" => ResizeEdge::Right,
            "w" => ResizeEdge::Left,
            "ne" => ResizeEdge::TopRight,
            "nw" => ResizeEdge::TopLeft,
            "se" => ResizeEdge::BottomRight,
            "sw" => ResizeEdge::BottomLeft,
            _ => return None,
        })
    }

    pub fn compass(self) -> &'static str {
        match self {
            ResizeEdge::Top => "n",
            ResizeEdge::Bottom => "s",
            ResizeEdge::Right => "e",
            ResizeEdge::Left => "w",
            ResizeEdge::TopRight => "ne",
            ResizeEdge::TopLeft => "nw",
            ResizeEdge::BottomRight => "se",
            ResizeEdge::BottomLeft => "sw",
        }
    }

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Identifies which manager opened a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManagerToken(u64);

impl ManagerToken {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ManagerToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionKind {
    Move {
        /// Pointer offset from the pressed region's top-left corner.
        offset: Point,
    },
    Resize {
        edge: ResizeEdge,
        start: Point,
        start_rect: Rect,
        min_width: Option<f64>,
        min_height: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub owner: ManagerToken,
    pub window: WindowId,
    pub kind: SessionKind,
}

#[derive(Debug, Default)]
pub struct PointerCoordinator {
    session: Option<Session>,
}

pub type SharedCoordinator = Rc<RefCell<PointerCoordinator>>;

impl PointerCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCoordinator {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn occupy(&mut self, session: Session) -> Result<()> {
        if let Some(current) = &self.session {
            tracing::warn!(
                window_id = %session.window,
                owner = %current.window,
                "rejected pointer session; one is already running"
            );
            return Err(WmError::SessionActive {
                owner: current.window,
            });
        }
        tracing::debug!(window_id = %session.window, kind = ?session.kind, "pointer session started");
        self.session = Some(session);
        Ok(())
    }

    /// Start a move. `offset` is the pointer position relative to the
    /// pressed region's top-left corner.
    pub fn begin_drag(&mut self, owner: ManagerToken, window: WindowId, offset: Point) -> Result<()> {
        self.occupy(Session {
            owner,
            window,
            kind: SessionKind::Move { offset },
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn begin_resize(
        &mut self,
        owner: ManagerToken,
        window: WindowId,
        edge: ResizeEdge,
        start: Point,
        start_rect: Rect,
        min_width: Option<f64>,
        min_height: Option<f64>,
    ) -> Result<()> {
        self.occupy(Session {
            owner,
            window,
            kind: SessionKind::Resize {
                edge,
                start,
                start_rect,
                min_width,
                min_height,
            },
        })
    }

    /// Clear the session and hand it back. `None` when idle.
    pub fn end(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(s) = &session {
            tracing::debug!(window_id = %s.window, "pointer session ended");
        }
        session
    }

    /// Drop the session if it targets `window`, e.g. when that window dies
    /// mid-drag.
    pub fn cancel_for(&mut self, owner: ManagerToken, window: WindowId) -> bool {
        if self
            .session
            .is_some_and(|s| s.owner == owner && s.window == window)
        {
            self.session = None;
            return true;
        }
        false
    }
}

/// New top-left of a window being moved.
pub fn drag_position(pointer: Point, offset: Point) -> Point {
    Point::new(pointer.x - offset.x, pointer.y - offset.y)
}

/// Outcome of one resize step. `None` fields are frozen for this move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeStep {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ResizeStep {
    /// Apply onto `current`, leaving frozen fields untouched.
    pub fn apply_to(&self, current: Rect) -> Rect {
        Rect {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            width: self.width.unwrap_or(current.width),
            height: self.height.unwrap_or(current.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// Geometry for one resize move.
///
/// Edge handles change one dimension, corners two. Handles on the top or
/// left side also move the origin so the opposite edge stays put. A
/// dimension that would drop below its minimum is frozen for this move
/// only; the other dimension still updates.
pub fn apply_resize(
    edge: ResizeEdge,
    start: Point,
    start_rect: Rect,
    pointer: Point,
    min_width: Option<f64>,
    min_height: Option<f64>,
) -> ResizeStep {
    let dx = pointer.x - start.x;
    let dy = pointer.y - start.y;
    let mut step = ResizeStep::default();

    if edge.moves_left() || edge.moves_right() {
        let width = if edge.moves_left() {
            start_rect.width - dx
        } else {
            start_rect.width + dx
        };
        if min_width.is_none_or(|min| width >= min) {
            step.width = Some(width);
            if edge.moves_left() {
                step.x = Some(start_rect.x + dx);
            }
        }
    }

    if edge.moves_top() || edge.moves_bottom() {
        let height = if edge.moves_top() {
            start_rect.height - dy
        } else {
            start_rect.height + dy
        };
        if min_height.is_none_or(|min| height >= min) {
            step.height = Some(height);
            if edge.moves_top() {
                step.y = Some(start_rect.y + dy);
            }
        }
    }

    step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_rect() -> Rect {
        Rect::new(10.0, 10.0, 450.0, 315.0)
    }

    #[test]
    fn drag_subtracts_offset() {
        let pos = drag_position(Point::new(200.0, 160.0), Point::new(20.0, 15.0));
        assert_eq!(pos, Point::new(180.0, 145.0));
    }

    #[test]
    fn east_changes_width_only() {
        let step = apply_resize(
            ResizeEdge::Right,
            Point::new(460.0, 100.0),
            start_rect(),
            Point::new(500.0, 140.0),
            None,
            None,
        );
        assert_eq!(step.width, Some(490.0));
        assert_eq!(step.height, None);
        assert_eq!(step.x, None);
    }

    #[test]
    fn north_west_keeps_far_edges_fixed() {
        let step = apply_resize(
            ResizeEdge::TopLeft,
            Point::new(10.0, 10.0),
            start_rect(),
            Point::new(30.0, 40.0),
            None,
            None,
        );
        let rect = step.apply_to(start_rect());
        assert_eq!(rect, Rect::new(30.0, 40.0, 430.0, 285.0));
        assert_eq!(rect.right(), start_rect().right());
        assert_eq!(rect.bottom(), start_rect().bottom());
    }

    #[test]
    fn west_below_min_width_is_frozen() {
        // 450 - 300 = 150 < 200
        let step = apply_resize(
            ResizeEdge::Left,
            Point::new(10.0, 100.0),
            start_rect(),
            Point::new(310.0, 100.0),
            Some(200.0),
            Some(200.0),
        );
        assert!(step.is_empty());
        assert_eq!(step.apply_to(start_rect()), start_rect());
    }

    #[test]
    fn corner_freezes_one_axis_and_moves_the_other() {
        // width would be 150 (frozen), height grows to 355
        let step = apply_resize(
            ResizeEdge::BottomLeft,
            Point::new(10.0, 325.0),
            start_rect(),
            Point::new(310.0, 365.0),
            Some(200.0),
            Some(200.0),
        );
        assert_eq!(step.width, None);
        assert_eq!(step.x, None);
        assert_eq!(step.height, Some(355.0));
    }

    #[test]
    fn second_session_is_rejected() {
        let mut coord = PointerCoordinator::new();
        let owner = ManagerToken::next();
        coord
            .begin_drag(owner, WindowId(0), Point::default())
            .expect("first session");
        let err = coord
            .begin_resize(
                owner,
                WindowId(1),
                ResizeEdge::Bottom,
                Point::default(),
                start_rect(),
                None,
                None,
            )
            .unwrap_err();
        assert_eq!(err, WmError::SessionActive { owner: WindowId(0) });
        assert_eq!(coord.session().map(|s| s.window), Some(WindowId(0)));
        assert!(coord.end().is_some());
        assert!(coord.end().is_none());
    }

    #[test]
    fn compass_round_trip_covers_all_edges() {
        for edge in ResizeEdge::ALL {
            assert_eq!(ResizeEdge::from_compass(edge.compass()), Some(edge));
        }
        assert_eq!(ResizeEdge::from_compass("x"), None);
    }
}
