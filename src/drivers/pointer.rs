//! Turns raw terminal mouse reports into the press/move/release/click
//! stream the window manager consumes.

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;

pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Press and release on the same cell.
    Click(Point),
    /// Second click on the same cell within [`DOUBLE_CLICK_INTERVAL`].
    DoubleClick(Point),
}

#[derive(Debug, Default)]
pub struct PointerTranslator {
    pressed_at: Option<(u16, u16)>,
    last_click: Option<(Instant, (u16, u16))>,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &MouseEvent, now: Instant) -> Vec<PointerInput> {
        let cell = (event.column, event.row);
        let point = Point::new(f64::from(event.column), f64::from(event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some(cell);
                vec![PointerInput::Down(point)]
            }
            MouseEventKind::Drag(MouseButton::Left) => vec![PointerInput::Move(point)],
            MouseEventKind::Up(MouseButton::Left) => {
                let mut out = vec![PointerInput::Up(point)];
                if self.pressed_at.take() == Some(cell) {
                    out.push(PointerInput::Click(point));
                    let repeat = self.last_click.is_some_and(|(at, last)| {
                        last == cell && now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL
                    });
                    if repeat {
                        out.push(PointerInput::DoubleClick(point));
                        self.last_click = None;
                    } else {
                        self.last_click = Some((now, cell));
                    }
                }
                out
            }
            _ => Vec::new(),
        }
    }
}
