//! Geometry shared by the manager, the pointer coordinator and the surface
//! backends.
//!
//! Two flavours of rectangle exist. [`WindowRect`] is what a window was told
//! to be: each edge is a [`Length`] that is either a bare pixel count or a
//! pre-formatted length string kept verbatim. [`Rect`] is what a surface
//! actually occupies once a backend has resolved those lengths.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resolved pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// A CSS-style length.
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    /// Bare pixel value.
    Px(f64),
    /// Pre-formatted length string, stored verbatim (`"100%"`, `"12px"`).
    Raw(String),
}

impl Length {
    /// Resolve against `extent`, the size of the containing axis.
    ///
    /// Understands pixels (`"12px"` or a bare number) and percentages.
    /// Anything else yields `None`.
    pub fn resolve(&self, extent: f64) -> Option<f64> {
        match self {
            Length::Px(v) => Some(*v),
            Length::Raw(raw) => {
                let raw = raw.trim();
                if let Some(pct) = raw.strip_suffix('%') {
                    pct.trim().parse::<f64>().ok().map(|p| extent * p / 100.0)
                } else if let Some(px) = raw.strip_suffix("px") {
                    px.trim().parse::<f64>().ok()
                } else {
                    raw.parse::<f64>().ok()
                }
            }
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::Px(value)
    }
}

impl From<i32> for Length {
    fn from(value: i32) -> Self {
        Length::Px(value as f64)
    }
}

impl From<u32> for Length {
    fn from(value: u32) -> Self {
        Length::Px(value as f64)
    }
}

impl From<&str> for Length {
    fn from(value: &str) -> Self {
        Length::Raw(value.to_string())
    }
}

impl From<String> for Length {
    fn from(value: String) -> Self {
        Length::Raw(value)
    }
}

/// The styled rectangle of a window, edge by edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRect {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

impl WindowRect {
    pub fn px(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Length::Px(x),
            y: Length::Px(y),
            width: Length::Px(width),
            height: Length::Px(height),
        }
    }

    /// Covers the whole container.
    pub fn fill() -> Self {
        Self {
            x: Length::Px(0.0),
            y: Length::Px(0.0),
            width: Length::from("100%"),
            height: Length::from("100%"),
        }
    }

    /// Resolve every edge against `container`. Lengths the resolver does not
    /// understand collapse to zero.
    pub fn resolve(&self, container: Rect) -> Rect {
        Rect {
            x: container.x + self.x.resolve(container.width).unwrap_or(0.0),
            y: container.y + self.y.resolve(container.height).unwrap_or(0.0),
            width: self.width.resolve(container.width).unwrap_or(0.0),
            height: self.height.resolve(container.height).unwrap_or(0.0),
        }
    }
}

impl From<Rect> for WindowRect {
    fn from(rect: Rect) -> Self {
        WindowRect::px(rect.x, rect.y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_resolves_px_percent_and_bare() {
        assert_eq!(Length::Px(12.0).resolve(100.0), Some(12.0));
        assert_eq!(Length::from("50%").resolve(300.0), Some(150.0));
        assert_eq!(Length::from("40px").resolve(300.0), Some(40.0));
        assert_eq!(Length::from("7").resolve(300.0), Some(7.0));
        assert_eq!(Length::from("3em").resolve(300.0), None);
    }

    #[test]
    fn raw_length_is_kept_verbatim() {
        let len = Length::from("calc(100% - 4px)");
        assert_eq!(len.to_string(), "calc(100% - 4px)");
        assert_eq!(Length::Px(10.0).to_string(), "10px");
    }

    #[test]
    fn fill_resolves_to_container() {
        let container = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(WindowRect::fill().resolve(container), container);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(14.9, 14.9)));
        assert!(!r.contains(Point::new(15.0, 12.0)));
    }
}
