//! Cell-based backend drawing windows into a ratatui frame.
//!
//! Coordinates are terminal cells. Transitions have no animation here: they
//! are queued and the host resolves them after the next frame, which gives
//! closing windows one dimmed frame before they go away.

use std::collections::{BTreeMap, BTreeSet};

use ratatui::Frame;
use ratatui::prelude::Rect as CellRect;
use ratatui::widgets::Clear;

use super::{
    ChromeMetrics, Control, PointerTarget, Region, SurfaceBackend, SurfaceId, TransitionId,
    hit_test, region_rect,
};
use crate::config::WindowConfig;
use crate::constants::{CLASS_ACTIVE, CLASS_DRAGGING, CLASS_MAXIMIZED, CLASS_SIMPLE};
use crate::decorator::{ChromeState, DefaultDecorator, WindowDecorator};
use crate::geometry::{Point, Rect, WindowRect};

#[derive(Debug, Clone)]
struct Surface {
    rect: WindowRect,
    attached: bool,
    visible: bool,
    z_index: i64,
    title: String,
    classes: BTreeSet<String>,
    hidden_controls: BTreeSet<Control>,
    transition: Option<TransitionId>,
    resizable: bool,
}

#[derive(Debug)]
pub struct TerminalBackend {
    area: Rect,
    bound: bool,
    next_surface: u64,
    next_transition: u64,
    surfaces: BTreeMap<SurfaceId, Surface>,
    pending: Vec<TransitionId>,
    decorator: Box<dyn WindowDecorator>,
}

impl TerminalBackend {
    pub fn new(area: CellRect) -> Self {
        Self {
            area: cell_to_rect(area),
            bound: false,
            next_surface: 0,
            next_transition: 0,
            surfaces: BTreeMap::new(),
            pending: Vec::new(),
            decorator: Box::new(DefaultDecorator),
        }
    }

    /// Follow a terminal resize. Percent-sized windows re-resolve against it.
    pub fn set_area(&mut self, area: CellRect) {
        self.area = cell_to_rect(area);
    }

    /// Transitions started since the last call. Each one has had a frame.
    pub fn take_transitions(&mut self) -> Vec<TransitionId> {
        let taken = std::mem::take(&mut self.pending);
        for surface in self.surfaces.values_mut() {
            if surface.transition.is_some_and(|t| taken.contains(&t)) {
                surface.transition = None;
            }
        }
        taken
    }

    /// Surfaces that are attached and visible, bottom of the stack first.
    fn stacked(&self) -> Vec<(SurfaceId, &Surface)> {
        let mut shown: Vec<_> = self
            .surfaces
            .iter()
            .filter(|(_, s)| s.attached && s.visible)
            .map(|(id, s)| (*id, s))
            .collect();
        shown.sort_by_key(|(id, s)| (s.z_index, *id));
        shown
    }

    /// Topmost visible window region under `point`.
    pub fn hit_test(&self, point: Point) -> Option<PointerTarget> {
        self.stacked().into_iter().rev().find_map(|(id, surface)| {
            let resizable = surface.resizable && !surface.classes.contains(CLASS_MAXIMIZED);
            hit_test(self.rect(id), point, ChromeMetrics::CELLS, resizable)
                .map(|region| PointerTarget::new(id, region))
        })
    }

    pub fn render(&self, frame: &mut Frame) {
        let bounds = frame.area();
        let stacked = self.stacked();
        let rects: Vec<CellRect> = stacked
            .iter()
            .map(|(id, _)| rect_to_cell(self.rect(*id), bounds))
            .collect();
        for (idx, (_, surface)) in stacked.iter().enumerate() {
            let area = rects[idx];
            if area.width == 0 || area.height == 0 {
                continue;
            }
            let above = &rects[idx + 1..];
            frame.render_widget(Clear, area);
            let state = ChromeState {
                title: &surface.title,
                active: surface.classes.contains(CLASS_ACTIVE),
                maximized: surface.classes.contains(CLASS_MAXIMIZED),
                dragging: surface.classes.contains(CLASS_DRAGGING),
                transitioning: surface.transition.is_some(),
                simple: surface.classes.contains(CLASS_SIMPLE),
                controls: Control::ALL.map(|c| !surface.hidden_controls.contains(&c)),
            };
            let is_obscured = |x: u16, y: u16| {
                above.iter().any(|r| {
                    x >= r.x
                        && x < r.x.saturating_add(r.width)
                        && y >= r.y
                        && y < r.y.saturating_add(r.height)
                })
            };
            self.decorator
                .render_window(frame, area, bounds, state, &is_obscured);
        }
    }
}

fn cell_to_rect(area: CellRect) -> Rect {
    Rect::new(
        f64::from(area.x),
        f64::from(area.y),
        f64::from(area.width),
        f64::from(area.height),
    )
}

/// Round to cells and clip to `bounds`. Windows dragged partly off-screen
/// lose the clipped part.
fn rect_to_cell(rect: Rect, bounds: CellRect) -> CellRect {
    let clamp = |v: f64, lo: u16, hi: u16| v.round().clamp(f64::from(lo), f64::from(hi)) as u16;
    let right_edge = bounds.x.saturating_add(bounds.width);
    let bottom_edge = bounds.y.saturating_add(bounds.height);
    let left = clamp(rect.x, bounds.x, right_edge);
    let top = clamp(rect.y, bounds.y, bottom_edge);
    let right = clamp(rect.right(), bounds.x, right_edge);
    let bottom = clamp(rect.bottom(), bounds.y, bottom_edge);
    CellRect::new(
        left,
        top,
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
}

impl SurfaceBackend for TerminalBackend {
    fn is_bound(&self) -> bool {
        self.bound
    }

    fn bind(&mut self) {
        self.bound = true;
    }

    fn create_surface(&mut self, config: &WindowConfig) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            Surface {
                rect: config.rect(),
                attached: false,
                visible: false,
                z_index: 0,
                title: config.title.clone(),
                classes: BTreeSet::new(),
                hidden_controls: BTreeSet::new(),
                transition: None,
                resizable: config.resizable,
            },
        );
        id
    }

    fn attach_surface(&mut self, id: SurfaceId) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.attached = true;
        }
    }

    fn destroy_surface(&mut self, id: SurfaceId) {
        if let Some(surface) = self.surfaces.remove(&id)
            && let Some(transition) = surface.transition
        {
            self.pending.retain(|t| *t != transition);
        }
    }

    fn set_rect(&mut self, id: SurfaceId, rect: &WindowRect) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.rect = rect.clone();
        }
    }

    fn rect(&self, id: SurfaceId) -> Rect {
        self.surfaces
            .get(&id)
            .map(|surface| surface.rect.resolve(self.area))
            .unwrap_or_default()
    }

    fn container_rect(&self) -> Rect {
        self.area
    }

    fn set_visible(&mut self, id: SurfaceId, visible: bool) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.visible = visible;
        }
    }

    fn set_z_index(&mut self, id: SurfaceId, z: i64) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.z_index = z;
        }
    }

    fn add_class(&mut self, id: SurfaceId, name: &str) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.classes.insert(name.to_string());
        }
    }

    fn remove_class(&mut self, id: SurfaceId, name: &str) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.classes.remove(name);
        }
    }

    fn has_class(&self, id: SurfaceId, name: &str) -> bool {
        self.surfaces
            .get(&id)
            .is_some_and(|surface| surface.classes.contains(name))
    }

    fn set_title(&mut self, id: SurfaceId, title: &str) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.title = title.to_string();
        }
    }

    fn set_control_visible(&mut self, id: SurfaceId, control: Control, visible: bool) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            if visible {
                surface.hidden_controls.remove(&control);
            } else {
                surface.hidden_controls.insert(control);
            }
        }
    }

    fn set_resize_handles(&mut self, id: SurfaceId, enabled: bool) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.resizable = enabled;
        }
    }

    fn target_rect(&self, id: SurfaceId, region: Region) -> Rect {
        region_rect(self.rect(id), region, ChromeMetrics::CELLS)
    }

    fn play_transition(&mut self, id: SurfaceId, name: &str) -> TransitionId {
        let transition = TransitionId(self.next_transition);
        self.next_transition += 1;
        tracing::trace!(surface = %id, transition = name, "queue transition");
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.transition = Some(transition);
        }
        self.pending.push(transition);
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerConfig;
    use crate::pointer::ResizeEdge;
    use crate::window::{ControlVisibility, WindowManager};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn manager(width: u16, height: u16) -> WindowManager<TerminalBackend> {
        let backend = TerminalBackend::new(CellRect::new(0, 0, width, height));
        WindowManager::new(backend, ManagerConfig::default()).unwrap()
    }

    fn small(title: &str, x: f64, y: f64) -> WindowConfig {
        WindowConfig::default()
            .title(title)
            .x(x)
            .y(y)
            .width(20.0)
            .height(8.0)
    }

    #[test]
    fn hit_test_picks_topmost_window() {
        let mut wm = manager(80, 24);
        let a = wm.create_window(small("a", 0.0, 0.0));
        let b = wm.create_window(small("b", 5.0, 2.0));
        wm.window_mut(a).unwrap().show();
        wm.window_mut(b).unwrap().show();
        let target = wm.backend().hit_test(Point::new(10.0, 5.0)).unwrap();
        assert_eq!(target.surface, wm.window(b).unwrap().surface());
        assert_eq!(target.region, Region::Content);

        wm.activate(a).unwrap();
        let target = wm.backend().hit_test(Point::new(10.0, 5.0)).unwrap();
        assert_eq!(target.surface, wm.window(a).unwrap().surface());
    }

    #[test]
    fn hidden_windows_are_not_hit() {
        let mut wm = manager(80, 24);
        let a = wm.create_window(small("a", 0.0, 0.0));
        assert!(wm.backend().hit_test(Point::new(3.0, 3.0)).is_none());
        wm.window_mut(a).unwrap().show();
        assert!(wm.backend().hit_test(Point::new(3.0, 3.0)).is_some());
        wm.window_mut(a).unwrap().minimize();
        assert!(wm.backend().hit_test(Point::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn maximized_windows_have_no_resize_handles() {
        let mut wm = manager(40, 12);
        let a = wm.create_window(small("a", 2.0, 2.0));
        wm.window_mut(a).unwrap().show();
        assert_eq!(
            wm.backend().hit_test(Point::new(2.0, 2.0)).unwrap().region,
            Region::ResizeHandle(ResizeEdge::TopLeft)
        );
        wm.window_mut(a).unwrap().toggle_maximize();
        assert_eq!(
            wm.backend().hit_test(Point::new(0.0, 0.0)).unwrap().region,
            Region::Title
        );
    }

    #[test]
    fn disabling_resize_drops_border_handles() {
        let mut wm = manager(40, 12);
        let a = wm.create_window(small("a", 2.0, 2.0));
        wm.window_mut(a).unwrap().show();
        let bottom = Point::new(10.0, 9.0);
        assert_eq!(
            wm.backend().hit_test(bottom).unwrap().region,
            Region::ResizeHandle(ResizeEdge::Bottom)
        );
        wm.window_mut(a).unwrap().set_resizable(None, None, false);
        assert_eq!(wm.backend().hit_test(bottom).unwrap().region, Region::Content);
        wm.window_mut(a).unwrap().set_resizable(None, None, true);
        assert_eq!(
            wm.backend().hit_test(bottom).unwrap().region,
            Region::ResizeHandle(ResizeEdge::Bottom)
        );
    }

    #[test]
    fn close_transition_resolves_after_a_frame() {
        let mut config = ManagerConfig::default();
        config.animations.wnd_close = Some("fade".into());
        let backend = TerminalBackend::new(CellRect::new(0, 0, 40, 12));
        let mut wm = WindowManager::new(backend, config).unwrap();
        let a = wm.create_window(small("a", 0.0, 0.0));
        wm.window_mut(a).unwrap().show();
        wm.window_mut(a).unwrap().close();
        assert!(wm.find_window(a).is_some());

        let pending = wm.backend_mut().take_transitions();
        assert_eq!(pending.len(), 1);
        for transition in pending {
            wm.transition_finished(transition);
        }
        assert!(wm.find_window(a).is_none());
        assert!(wm.backend_mut().take_transitions().is_empty());
    }

    #[test]
    fn renders_windows_in_stacking_order() {
        let mut wm = manager(30, 10);
        let a = wm.create_window(small("alpha", 0.0, 0.0));
        let b = wm.create_window(small("beta", 4.0, 1.0));
        wm.window_mut(a).unwrap().show();
        wm.window_mut(b).unwrap().show();
        wm.window_mut(b).unwrap().set_control_visibility(ControlVisibility {
            close: false,
            ..ControlVisibility::default()
        });

        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        terminal.draw(|frame| wm.backend().render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        // beta's border sits on top of alpha's header row.
        assert_eq!(buffer[(4, 1)].symbol(), "┌");
        assert_eq!(buffer[(6, 2)].symbol(), "b");
        // alpha's top-left corner is still visible.
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
        // beta's close slot is blank.
        assert_eq!(buffer[(21, 2)].symbol(), " ");
    }

    #[test]
    fn rect_to_cell_clips_offscreen_windows() {
        let bounds = CellRect::new(0, 0, 10, 10);
        assert_eq!(
            rect_to_cell(Rect::new(-3.0, 2.0, 6.0, 4.0), bounds),
            CellRect::new(0, 2, 3, 4)
        );
        assert_eq!(
            rect_to_cell(Rect::new(8.0, 8.0, 6.0, 6.0), bounds),
            CellRect::new(8, 8, 2, 2)
        );
    }
}
