//! In-memory surface backend.
//!
//! Keeps every property the manager writes so callers can inspect it, and
//! records transitions until the host resolves them. Useful for tests and
//! for embedders that paint from the manager's state on their own.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    ChromeMetrics, Control, Region, SurfaceBackend, SurfaceId, TransitionId, region_rect,
};
use crate::config::WindowConfig;
use crate::geometry::{Rect, WindowRect};

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub rect: WindowRect,
    pub attached: bool,
    pub visible: bool,
    pub z_index: i64,
    pub title: String,
    pub classes: BTreeSet<String>,
    pub hidden_controls: BTreeSet<Control>,
    pub resize_handles: bool,
    /// Explicit per-region rectangles, overriding the computed chrome layout.
    pub region_overrides: BTreeMap<RegionKey, Rect>,
}

/// `Region` is not `Ord`; this key is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegionKey(u8, u8);

impl From<Region> for RegionKey {
    fn from(region: Region) -> Self {
        use crate::pointer::ResizeEdge;
        match region {
            Region::Body => RegionKey(0, 0),
            Region::Titlebar => RegionKey(1, 0),
            Region::Title => RegionKey(2, 0),
            Region::ControlBox => RegionKey(3, 0),
            Region::Control(c) => RegionKey(4, c as u8),
            Region::Content => RegionKey(5, 0),
            Region::ResizeHandle(edge) => RegionKey(
                6,
                ResizeEdge::ALL.iter().position(|e| *e == edge).unwrap_or(0) as u8,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedTransition {
    pub id: TransitionId,
    pub surface: SurfaceId,
    pub name: String,
}

#[derive(Debug)]
pub struct HeadlessBackend {
    container: Rect,
    valid: bool,
    bound: bool,
    metrics: ChromeMetrics,
    next_surface: u64,
    next_transition: u64,
    surfaces: BTreeMap<SurfaceId, HeadlessSurface>,
    transitions: Vec<PlayedTransition>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 1280.0, 720.0))
    }
}

impl HeadlessBackend {
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            valid: true,
            bound: false,
            metrics: ChromeMetrics::PIXELS,
            next_surface: 0,
            next_transition: 0,
            surfaces: BTreeMap::new(),
            transitions: Vec::new(),
        }
    }

    /// A container reference that does not point at anything.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::default()
        }
    }

    /// A container that some other manager already owns.
    pub fn already_bound() -> Self {
        Self {
            bound: true,
            ..Self::default()
        }
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&HeadlessSurface> {
        self.surfaces.get(&id)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Pin the bounding rectangle reported for one region of a surface.
    pub fn set_region_rect(&mut self, id: SurfaceId, region: Region, rect: Rect) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.region_overrides.insert(region.into(), rect);
        }
    }

    pub fn transitions(&self) -> &[PlayedTransition] {
        &self.transitions
    }
}

impl SurfaceBackend for HeadlessBackend {
    fn is_valid(&self) -> bool {
        self.valid
    }

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
            HeadlessSurface {
                rect: config.rect(),
                attached: false,
                visible: false,
                z_index: 0,
                title: config.title.clone(),
                classes: BTreeSet::new(),
                hidden_controls: BTreeSet::new(),
                resize_handles: config.resizable,
                region_overrides: BTreeMap::new(),
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
        self.surfaces.remove(&id);
    }

    fn set_rect(&mut self, id: SurfaceId, rect: &WindowRect) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.rect = rect.clone();
        }
    }

    fn rect(&self, id: SurfaceId) -> Rect {
        self.surfaces
            .get(&id)
            .map(|surface| surface.rect.resolve(self.container))
            .unwrap_or_default()
    }

    fn container_rect(&self) -> Rect {
        self.container
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
            surface.resize_handles = enabled;
        }
    }

    fn target_rect(&self, id: SurfaceId, region: Region) -> Rect {
        if let Some(rect) = self
            .surfaces
            .get(&id)
            .and_then(|surface| surface.region_overrides.get(&region.into()))
        {
            return *rect;
        }
        region_rect(self.rect(id), region, self.metrics)
    }

    fn play_transition(&mut self, id: SurfaceId, name: &str) -> TransitionId {
        let transition = TransitionId(self.next_transition);
        self.next_transition += 1;
        self.transitions.push(PlayedTransition {
            id: transition,
            surface: id,
            name: name.to_string(),
        });
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_resolve_against_container() {
        let mut backend = HeadlessBackend::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let id = backend.create_surface(&WindowConfig::default().width("50%"));
        assert_eq!(backend.rect(id), Rect::new(10.0, 10.0, 400.0, 315.0));
        backend.set_rect(id, &WindowRect::fill());
        assert_eq!(backend.rect(id), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn region_override_wins_over_layout() {
        let mut backend = HeadlessBackend::default();
        let id = backend.create_surface(&WindowConfig::default());
        let pinned = Rect::new(100.0, 65.0, 200.0, 20.0);
        backend.set_region_rect(id, Region::Title, pinned);
        assert_eq!(backend.target_rect(id, Region::Title), pinned);
        assert_eq!(backend.target_rect(id, Region::Body), backend.rect(id));
    }

    #[test]
    fn classes_and_controls_are_tracked() {
        let mut backend = HeadlessBackend::default();
        let id = backend.create_surface(&WindowConfig::default());
        backend.add_class(id, "active");
        assert!(backend.has_class(id, "active"));
        backend.remove_class(id, "active");
        assert!(!backend.has_class(id, "active"));
        backend.set_control_visible(id, Control::Close, false);
        assert!(backend.surface(id).unwrap().hidden_controls.contains(&Control::Close));
        backend.destroy_surface(id);
        assert_eq!(backend.surface_count(), 0);
        assert!(!backend.has_class(id, "active"));
    }
}
