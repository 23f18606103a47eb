//! Terminal window chrome.
//!
//! A decorator paints the frame around one window: border, titlebar, title
//! text and the control buttons. Cells covered by a window higher in the
//! stack are skipped via `is_obscured`.

use ratatui::Frame;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::backend::Control;

/// What the decorator needs to know about a window besides its area.
#[derive(Debug, Clone, Copy)]
pub struct ChromeState<'a> {
    pub title: &'a str,
    pub active: bool,
    pub maximized: bool,
    pub dragging: bool,
    /// A transition is playing; drawn dimmed.
    pub transitioning: bool,
    pub simple: bool,
    pub controls: [bool; 3],
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut Frame,
        rect: Rect,
        bounds: Rect,
        state: ChromeState<'_>,
        is_obscured: &dyn Fn(u16, u16) -> bool,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn header_style(state: &ChromeState<'_>) -> Style {
        let base = if state.active {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let base = if state.active && !state.simple {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };
        if state.transitioning {
            base.add_modifier(Modifier::DIM)
        } else {
            base
        }
    }

    fn border_style(state: &ChromeState<'_>) -> Style {
        let color = if state.dragging {
            Color::Yellow
        } else if state.active {
            Color::Blue
        } else {
            Color::DarkGray
        };
        Style::default().fg(color).bg(Color::Reset)
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        frame: &mut Frame,
        rect: Rect,
        bounds: Rect,
        state: ChromeState<'_>,
        is_obscured: &dyn Fn(u16, u16) -> bool,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let header_style = Self::header_style(&state);
        let border_style = Self::border_style(&state);
        let buffer = frame.buffer_mut();

        let left = rect.x;
        let top = rect.y;
        let right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);
        let header_y = top.saturating_add(1);
        let in_bounds = |x: u16, y: u16| {
            x >= bounds.x
                && x < bounds.x.saturating_add(bounds.width)
                && y >= bounds.y
                && y < bounds.y.saturating_add(bounds.height)
        };
        let mut put = |x: u16, y: u16, symbol: &str, style: Style| {
            if in_bounds(x, y)
                && !is_obscured(x, y)
                && let Some(cell) = buffer.cell_mut((x, y))
            {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        };

        // Header row: background, then title, then the controls on the right.
        if header_y < bottom {
            for x in left.saturating_add(1)..right {
                put(x, header_y, " ", header_style);
            }
            // Hidden buttons keep their slot so the layout matches hit-testing.
            let controls_width = (Control::ALL.len() as u16).saturating_mul(3);
            let inner = right.saturating_sub(left).saturating_sub(1);
            let title_room = inner.saturating_sub(controls_width).saturating_sub(1);
            for (idx, ch) in state.title.chars().take(title_room as usize).enumerate() {
                put(
                    left + 2 + idx as u16,
                    header_y,
                    &ch.to_string(),
                    header_style,
                );
            }
            let mut x = right.saturating_sub(controls_width);
            for (control, shown) in Control::ALL.into_iter().zip(state.controls) {
                if shown {
                    let glyph = if control == Control::Maximize && state.maximized {
                        "❐"
                    } else {
                        control.glyph()
                    };
                    put(x + 1, header_y, glyph, header_style);
                }
                x = x.saturating_add(3);
            }
        }

        // Borders
        for x in left..=right {
            let (t, b) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(x, top, t, border_style);
            put(x, bottom, b, border_style);
        }
        for y in top.saturating_add(1)..bottom {
            put(left, y, "│", border_style);
            put(right, y, "│", border_style);
        }
    }
}
