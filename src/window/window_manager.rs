use std::fmt;

use indoc::writedoc;

use super::{ControlVisibility, Window, WindowId, WindowMut};
use crate::backend::{Control, PointerTarget, Region, SurfaceBackend, SurfaceId, TransitionId};
use crate::config::{ManagerConfig, WindowConfig};
use crate::constants::{
    CLASS_ACTIVE, CLASS_DRAGGING, CLASS_RESIZING, CLASS_SIMPLE, DEFAULT_CANCEL_REGIONS,
};
use crate::error::{Result, WmError};
use crate::events::{ListenerId, Listeners, WindowEvent};
use crate::geometry::{Length, Point, Rect};
use crate::pointer::{
    ManagerToken, PointerCoordinator, ResizeEdge, SessionKind, SharedCoordinator, apply_resize,
    drag_position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTransition {
    Open(WindowId),
    Close(WindowId),
}

/// Registry and stacking authority for the windows of one container.
///
/// Windows live in creation order. Ids come from a monotonic counter and are
/// never handed out twice, even after the window holding one is destroyed.
/// At most one window carries the active marker, and activating a window
/// always puts it strictly above every other live window.
pub struct WindowManager<B: SurfaceBackend> {
    pub(super) backend: B,
    pub(super) config: ManagerConfig,
    pub(super) windows: Vec<Window>,
    next_id: u64,
    token: ManagerToken,
    coordinator: SharedCoordinator,
    listeners: Listeners<(WindowId, WindowEvent)>,
    events: Vec<(WindowId, WindowEvent)>,
    pending: Vec<(TransitionId, PendingTransition)>,
}

impl<B: SurfaceBackend> fmt::Debug for WindowManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows)
            .field("next_id", &self.next_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a manager's bookkeeping, printable as a debug panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerStats {
    pub created: u64,
    pub live: usize,
    pub active: Option<(WindowId, Rect)>,
    pub container: Rect,
    pub apply_drag_styles: bool,
    pub use_simple_graphics: bool,
}

impl fmt::Display for ManagerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = match self.active {
            Some((id, r)) => format!(
                "{} => [{}x{}] ({}, {})",
                id,
                r.width.round(),
                r.height.round(),
                r.x.round(),
                r.y.round()
            ),
            None => "none".to_string(),
        };
        let yes_no = |v: bool| if v { "Yes" } else { "No" };
        writedoc!(
            f,
            "
            :: General Information
             Created Windows: {created}
             Loaded Windows: {live}
             Active Window: {active}
             WM Area: {w}x{h}
            :: Features
             Fast Window Drag: {drag}
             Simple Graphics Mode: {simple}",
            created = self.created,
            live = self.live,
            active = active,
            w = self.container.width.round(),
            h = self.container.height.round(),
            drag = yes_no(self.apply_drag_styles),
            simple = yes_no(self.use_simple_graphics),
        )
    }
}

impl<B: SurfaceBackend> WindowManager<B> {
    /// Bind a manager to the container behind `backend`.
    ///
    /// Fails when the container is not valid or already has a manager.
    pub fn new(backend: B, config: ManagerConfig) -> Result<Self> {
        Self::with_coordinator(backend, config, PointerCoordinator::shared())
    }

    /// Like [`WindowManager::new`], sharing `coordinator` with other managers
    /// so only one pointer session can run across all of them.
    pub fn with_coordinator(
        mut backend: B,
        config: ManagerConfig,
        coordinator: SharedCoordinator,
    ) -> Result<Self> {
        if !backend.is_valid() {
            return Err(WmError::InvalidContainer);
        }
        if backend.is_bound() {
            return Err(WmError::ContainerBound);
        }
        backend.bind();
        tracing::debug!(
            z_offset = config.z_index_start_offset,
            "window manager bound to container"
        );
        Ok(Self {
            backend,
            config,
            windows: Vec::new(),
            next_id: 0,
            token: ManagerToken::next(),
            coordinator,
            listeners: Listeners::new(),
            events: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Cosmetic settings may change at any time; they apply from the next
    /// operation that consults them.
    pub fn config_mut(&mut self) -> &mut ManagerConfig {
        &mut self.config
    }

    pub fn coordinator(&self) -> SharedCoordinator {
        self.coordinator.clone()
    }

    /// Create a window from `config`. The window starts hidden.
    pub fn create_window(&mut self, config: WindowConfig) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let surface = self.backend.create_surface(&config);
        let rect = config.rect();
        let z_order = self.config.z_index_start_offset + id.0 as i64 + 1;
        self.backend.set_rect(surface, &rect);
        self.backend.set_title(surface, &config.title);
        self.backend.set_z_index(surface, z_order);
        self.backend.set_visible(surface, false);
        if self.config.behavior.use_simple_graphics {
            self.backend.add_class(surface, CLASS_SIMPLE);
        }

        tracing::debug!(window_id = %id, %surface, title = %config.title, "created window");
        self.windows.push(Window {
            id,
            surface,
            title: config.title,
            rect,
            saved_rect: None,
            visible: false,
            registered: false,
            maximized: false,
            active: false,
            resizable: config.resizable,
            resize_enabled: config.resizable,
            draggable: config.draggable,
            drag_enabled: config.draggable,
            min_width: config.min_width,
            min_height: config.min_height,
            z_order,
            controls: ControlVisibility::default(),
            closing: None,
            listeners: Listeners::new(),
        });
        self.notify(id, WindowEvent::Created);
        id
    }

    pub fn find_window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window(&self, id: WindowId) -> Result<&Window> {
        self.find_window(id).ok_or(WmError::WindowNotFound(id))
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<WindowMut<'_, B>> {
        let idx = self.index_of(id).ok_or(WmError::WindowNotFound(id))?;
        Ok(WindowMut::new(self, idx))
    }

    /// Live windows in creation order.
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Live windows from bottom to top of the stack.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut order: Vec<_> = self.windows.iter().map(|w| (w.z_order, w.id)).collect();
        order.sort();
        order.into_iter().map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Number of windows ever created, destroyed ones included.
    pub fn created_count(&self) -> u64 {
        self.next_id
    }

    pub fn window_for_surface(&self, surface: SurfaceId) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.surface == surface)
            .map(|w| w.id)
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.windows.iter().find(|w| w.active)
    }

    /// Make `id` the active, topmost window.
    ///
    /// Every other active window is deactivated first. The target's z-order
    /// becomes one above the highest z-order among the other live windows;
    /// its own previous value is not considered. With no other windows the
    /// z-order is left as it is.
    pub fn activate(&mut self, id: WindowId) -> Result<()> {
        let idx = self.index_of(id).ok_or(WmError::WindowNotFound(id))?;
        self.activate_at(idx);
        Ok(())
    }

    pub(super) fn activate_at(&mut self, idx: usize) {
        let id = self.windows[idx].id;
        let others: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| w.id != id)
            .map(|w| w.id)
            .collect();

        let mut highest: Option<i64> = None;
        for other in others {
            let Some(other_idx) = self.index_of(other) else {
                continue;
            };
            if self.windows[other_idx].active {
                self.deactivate_at(other_idx);
            }
            let z = self.windows[other_idx].z_order;
            highest = Some(highest.map_or(z, |h| h.max(z)));
        }

        let Some(idx) = self.index_of(id) else {
            return;
        };
        let window = &mut self.windows[idx];
        if let Some(highest) = highest {
            window.z_order = highest + 1;
        }
        window.active = true;
        let (surface, z) = (window.surface, window.z_order);
        self.backend.set_z_index(surface, z);
        self.backend.add_class(surface, CLASS_ACTIVE);
        tracing::debug!(window_id = %id, z_order = z, "activated window");
        self.notify(id, WindowEvent::Activate);
    }

    fn deactivate_at(&mut self, idx: usize) {
        let window = &mut self.windows[idx];
        window.active = false;
        let (id, surface) = (window.id, window.surface);
        self.backend.remove_class(surface, CLASS_ACTIVE);
        self.notify(id, WindowEvent::Deactivate);
    }

    /// Clear the active marker everywhere. Inactive windows stay silent.
    pub fn deactivate_all(&mut self) {
        let ids: Vec<WindowId> = self.windows.iter().map(|w| w.id).collect();
        for id in ids {
            if let Some(idx) = self.index_of(id)
                && self.windows[idx].active
            {
                self.deactivate_at(idx);
            }
        }
    }

    /// Destroy a window. Unknown or already destroyed ids are a no-op.
    ///
    /// Destroy observers hear about it once, while the window is still
    /// listed; afterwards the surface is removed and the record is dropped
    /// from the collection by identity.
    pub fn destroy(&mut self, id: WindowId) {
        if self.index_of(id).is_none() {
            tracing::trace!(window_id = %id, "destroy on a window that is not attached");
            return;
        }
        self.notify(id, WindowEvent::Destroyed);
        self.coordinator.borrow_mut().cancel_for(self.token, id);
        self.pending.retain(|(_, pending)| {
            !matches!(pending, PendingTransition::Open(w) | PendingTransition::Close(w) if *w == id)
        });
        if let Some(idx) = self.index_of(id) {
            let window = self.windows.remove(idx);
            self.backend.destroy_surface(window.surface);
            tracing::debug!(window_id = %id, "destroyed window");
        }
    }

    /// Tear every window down without any notification.
    pub fn destroy_all(&mut self) {
        tracing::debug!(count = self.windows.len(), "destroying all windows");
        for window in self.windows.drain(..) {
            self.coordinator
                .borrow_mut()
                .cancel_for(self.token, window.id);
            self.backend.destroy_surface(window.surface);
        }
        self.pending.clear();
    }

    /// Register a manager-level observer. It hears every window's
    /// notifications, after that window's own listeners.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&(WindowId, WindowEvent)) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Drain every notification raised since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<(WindowId, WindowEvent)> {
        std::mem::take(&mut self.events)
    }

    /// Resolve a transition started by this manager. Returns `false` for
    /// unknown or already resolved transitions.
    pub fn transition_finished(&mut self, transition: TransitionId) -> bool {
        let Some(pos) = self.pending.iter().position(|(t, _)| *t == transition) else {
            return false;
        };
        let (_, pending) = self.pending.remove(pos);
        match pending {
            PendingTransition::Open(id) => {
                tracing::trace!(window_id = %id, "open transition finished");
            }
            PendingTransition::Close(id) => {
                tracing::trace!(window_id = %id, "close transition finished");
                self.destroy(id);
            }
        }
        true
    }

    pub(super) fn track_transition(&mut self, transition: TransitionId, id: WindowId, closing: bool) {
        let pending = if closing {
            PendingTransition::Close(id)
        } else {
            PendingTransition::Open(id)
        };
        self.pending.push((transition, pending));
    }

    /// Pointer pressed on a window.
    ///
    /// Any press activates the window. A press on a resize handle starts a
    /// resize; a press anywhere else starts a move unless the pressed
    /// region sits inside a cancel region. Returns `Ok(false)` when the
    /// target belongs to no live window.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> Result<bool> {
        let Some(id) = self.window_for_surface(target.surface) else {
            return Ok(false);
        };
        self.window_mut(id)?.activate();

        if let Region::ResizeHandle(edge) = target.region
            && self.window(id)?.resize_enabled
        {
            self.begin_resize(id, edge, pointer)?;
            return Ok(true);
        }

        let window = self.window(id)?;
        if window.drag_enabled
            && !self
                .backend
                .matches_ancestor(target.region, DEFAULT_CANCEL_REGIONS)
        {
            self.begin_drag(id, target.region, pointer)?;
        }
        Ok(true)
    }

    /// Start moving `id`. The pointer offset is taken relative to the
    /// pressed region's bounding rectangle.
    pub fn begin_drag(&mut self, id: WindowId, region: Region, pointer: Point) -> Result<()> {
        let surface = self.window(id)?.surface;
        let origin = self.backend.target_rect(surface, region).origin();
        let offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
        self.coordinator
            .borrow_mut()
            .begin_drag(self.token, id, offset)?;
        if self.config.behavior.apply_drag_styles {
            self.backend.add_class(surface, CLASS_DRAGGING);
        }
        self.notify(id, WindowEvent::DragStart { offset });
        Ok(())
    }

    pub fn begin_resize(&mut self, id: WindowId, edge: ResizeEdge, pointer: Point) -> Result<()> {
        let window = self.window(id)?;
        let (surface, min_width, min_height) = (window.surface, window.min_width, window.min_height);
        let start_rect = self.backend.rect(surface);
        self.coordinator.borrow_mut().begin_resize(
            self.token, id, edge, pointer, start_rect, min_width, min_height,
        )?;
        self.window_mut(id)?.activate();
        self.backend.add_class(surface, CLASS_RESIZING);
        self.notify(id, WindowEvent::ResizeStart { rect: start_rect });
        Ok(())
    }

    /// Feed a pointer move to the running session. Returns `false` when no
    /// session of this manager is running.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let session = self.coordinator.borrow().session().copied();
        let Some(session) = session.filter(|s| s.owner == self.token) else {
            return false;
        };
        let Some(idx) = self.index_of(session.window) else {
            self.coordinator.borrow_mut().end();
            return false;
        };
        let id = session.window;
        let surface = self.windows[idx].surface;

        match session.kind {
            SessionKind::Move { offset } => {
                let position = drag_position(pointer, offset);
                let window = &mut self.windows[idx];
                window.rect.x = Length::Px(position.x);
                window.rect.y = Length::Px(position.y);
                self.backend.set_rect(surface, &window.rect);
                self.notify(id, WindowEvent::Drag { position });
            }
            SessionKind::Resize {
                edge,
                start,
                start_rect,
                min_width,
                min_height,
            } => {
                let step = apply_resize(edge, start, start_rect, pointer, min_width, min_height);
                let window = &mut self.windows[idx];
                if let Some(x) = step.x {
                    window.rect.x = Length::Px(x);
                }
                if let Some(y) = step.y {
                    window.rect.y = Length::Px(y);
                }
                if let Some(width) = step.width {
                    window.rect.width = Length::Px(width);
                }
                if let Some(height) = step.height {
                    window.rect.height = Length::Px(height);
                }
                if !step.is_empty() {
                    self.backend.set_rect(surface, &window.rect);
                }
                let rect = self.backend.rect(surface);
                self.notify(id, WindowEvent::Resize { rect });
            }
        }
        true
    }

    /// End the running session. A no-op without one.
    pub fn pointer_up(&mut self) -> bool {
        let owned = self
            .coordinator
            .borrow()
            .session()
            .is_some_and(|s| s.owner == self.token);
        if !owned {
            return false;
        }
        let Some(session) = self.coordinator.borrow_mut().end() else {
            return false;
        };
        let Some(window) = self.find_window(session.window) else {
            return false;
        };
        let surface = window.surface;
        let rect = self.backend.rect(surface);
        match session.kind {
            SessionKind::Move { .. } => {
                if self.config.behavior.apply_drag_styles {
                    self.backend.remove_class(surface, CLASS_DRAGGING);
                }
                self.notify(session.window, WindowEvent::DragEnd { rect });
            }
            SessionKind::Resize { .. } => {
                self.backend.remove_class(surface, CLASS_RESIZING);
                self.notify(session.window, WindowEvent::ResizeEnd { rect });
            }
        }
        true
    }

    /// Click inside a window. Control buttons act; every other region
    /// swallows the click so it never reaches the container.
    pub fn click(&mut self, target: PointerTarget) -> Result<bool> {
        let Some(id) = self.window_for_surface(target.surface) else {
            return Ok(false);
        };
        let Region::Control(control) = target.region else {
            return Ok(true);
        };
        if !self.window(id)?.controls.is_visible(control) {
            return Ok(true);
        }
        match control {
            Control::Minimize => self.window_mut(id)?.minimize(),
            Control::Maximize => {
                self.window_mut(id)?.toggle_maximize();
            }
            Control::Close => {
                self.notify(id, WindowEvent::Close);
                self.window_mut(id)?.close();
            }
        }
        Ok(true)
    }

    /// Click on the bare container: nothing keeps the focus.
    pub fn click_container(&mut self) {
        self.deactivate_all();
    }

    /// Double click on a window. On the title it toggles maximize.
    pub fn double_click(&mut self, target: PointerTarget) -> Result<bool> {
        let Some(id) = self.window_for_surface(target.surface) else {
            return Ok(false);
        };
        if target.region == Region::Title {
            self.window_mut(id)?.toggle_maximize();
        }
        Ok(true)
    }

    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            created: self.next_id,
            live: self.windows.len(),
            active: self
                .active_window()
                .map(|w| (w.id, self.backend.rect(w.surface))),
            container: self.backend.container_rect(),
            apply_drag_styles: self.config.behavior.apply_drag_styles,
            use_simple_graphics: self.config.behavior.use_simple_graphics,
        }
    }

    pub(super) fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    pub(super) fn session_targets(&self, id: WindowId, resize: bool) -> bool {
        self.coordinator.borrow().session().is_some_and(|s| {
            s.owner == self.token
                && s.window == id
                && matches!(s.kind, SessionKind::Resize { .. }) == resize
        })
    }

    pub(super) fn cancel_session(&mut self, id: WindowId) {
        if self.coordinator.borrow_mut().cancel_for(self.token, id) {
            tracing::debug!(window_id = %id, "pointer session detached");
        }
    }

    /// Deliver `event` to the window's listeners, then the manager's, then
    /// queue it for [`WindowManager::take_events`].
    pub(super) fn notify(&mut self, id: WindowId, event: WindowEvent) {
        tracing::trace!(window_id = %id, event = %event, "notify");
        if let Some(window) = self.windows.iter_mut().find(|w| w.id == id) {
            window.listeners.emit(&event);
        }
        let entry = (id, event);
        self.listeners.emit(&entry);
        self.events.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> WindowManager<HeadlessBackend> {
        WindowManager::new(HeadlessBackend::default(), ManagerConfig::default())
            .expect("fresh container")
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let b = wm.create_window(WindowConfig::default());
        wm.destroy(b);
        let c = wm.create_window(WindowConfig::default());
        assert_eq!((a, b, c), (WindowId(0), WindowId(1), WindowId(2)));
        assert_eq!(wm.created_count(), 3);
        assert_eq!(wm.len(), 2);
    }

    #[test]
    fn windows_keep_creation_order_without_gaps() {
        let mut wm = manager();
        let ids: Vec<_> = (0..4)
            .map(|_| wm.create_window(WindowConfig::default()))
            .collect();
        wm.destroy(ids[1]);
        let live: Vec<_> = wm.windows().map(|w| w.id()).collect();
        assert_eq!(live, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn activate_excludes_own_z_order() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let b = wm.create_window(WindowConfig::default());
        // a=11, b=12
        wm.activate(b).unwrap();
        assert_eq!(wm.window(b).unwrap().z_order(), 12);
        wm.activate(a).unwrap();
        assert_eq!(wm.window(a).unwrap().z_order(), 13);
        assert!(!wm.window(b).unwrap().is_active());
        assert_eq!(wm.active_window().map(|w| w.id()), Some(a));
        assert_eq!(wm.stacking_order(), vec![b, a]);
    }

    #[test]
    fn activate_unknown_window_fails() {
        let mut wm = manager();
        assert_eq!(
            wm.activate(WindowId(9)),
            Err(WmError::WindowNotFound(WindowId(9)))
        );
    }

    #[test]
    fn deactivate_all_only_notifies_active_windows() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let _b = wm.create_window(WindowConfig::default());
        wm.activate(a).unwrap();
        wm.take_events();
        wm.deactivate_all();
        assert_eq!(wm.take_events(), vec![(a, WindowEvent::Deactivate)]);
        assert!(wm.active_window().is_none());
        wm.deactivate_all();
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn destroy_is_idempotent_and_notifies_once() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let seen = Rc::new(RefCell::new(0));
        let s = seen.clone();
        wm.subscribe(move |(_, e)| {
            if *e == WindowEvent::Destroyed {
                *s.borrow_mut() += 1;
            }
        });
        wm.destroy(a);
        wm.destroy(a);
        wm.destroy(WindowId(42));
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(wm.backend().surface_count(), 0);
    }

    #[test]
    fn destroy_all_is_silent() {
        let mut wm = manager();
        wm.create_window(WindowConfig::default());
        wm.create_window(WindowConfig::default());
        wm.take_events();
        wm.destroy_all();
        assert!(wm.is_empty());
        assert!(wm.take_events().is_empty());
        assert_eq!(wm.backend().surface_count(), 0);
        // counter keeps going
        assert_eq!(wm.create_window(WindowConfig::default()), WindowId(2));
    }

    #[test]
    fn binding_twice_is_rejected() {
        let err = WindowManager::new(HeadlessBackend::already_bound(), ManagerConfig::default())
            .unwrap_err();
        assert_eq!(err, WmError::ContainerBound);
        let err =
            WindowManager::new(HeadlessBackend::invalid(), ManagerConfig::default()).unwrap_err();
        assert_eq!(err, WmError::InvalidContainer);
    }

    #[test]
    fn stats_report_active_window() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().show();
        let stats = wm.stats();
        assert_eq!(stats.created, 1);
        assert_eq!(stats.live, 1);
        assert_eq!(stats.active, Some((a, Rect::new(10.0, 10.0, 450.0, 315.0))));
        let text = stats.to_string();
        assert!(text.contains("Active Window: 0 => [450x315] (10, 10)"));
        assert!(text.contains("Fast Window Drag: No"));
    }

    #[test]
    fn simple_graphics_marks_new_surfaces() {
        let mut config = ManagerConfig::default();
        config.behavior.use_simple_graphics = true;
        let mut wm = WindowManager::new(HeadlessBackend::default(), config).unwrap();
        let a = wm.create_window(WindowConfig::default());
        let surface = wm.window(a).unwrap().surface();
        assert!(wm.backend().has_class(surface, CLASS_SIMPLE));
    }
}
