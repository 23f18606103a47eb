//! Per-window operations.
//!
//! A [`WindowMut`] borrows the manager for the duration of one or more
//! calls, so every operation can reach the stacking authority and the
//! surface backend without the window holding a back-reference.

use super::{ControlVisibility, Window, WindowId, WindowManager};
use crate::backend::{Control, SurfaceBackend};
use crate::constants::CLASS_MAXIMIZED;
use crate::events::{ListenerId, WindowEvent};
use crate::geometry::{Rect, WindowRect};

pub struct WindowMut<'a, B: SurfaceBackend> {
    wm: &'a mut WindowManager<B>,
    idx: usize,
}

impl<'a, B: SurfaceBackend> WindowMut<'a, B> {
    pub(super) fn new(wm: &'a mut WindowManager<B>, idx: usize) -> Self {
        Self { wm, idx }
    }

    fn get(&self) -> &Window {
        &self.wm.windows[self.idx]
    }

    fn get_mut(&mut self) -> &mut Window {
        &mut self.wm.windows[self.idx]
    }

    pub fn id(&self) -> WindowId {
        self.get().id
    }

    pub fn window(&self) -> &Window {
        self.get()
    }

    /// Show the window; a no-op when it is already visible.
    ///
    /// The first show attaches the surface to the container, raises
    /// [`WindowEvent::Open`] and starts the open transition if one is
    /// configured. The transition does not delay visibility. Every show
    /// then raises [`WindowEvent::Shown`] and activates the window.
    pub fn show(&mut self) {
        if self.get().visible {
            return;
        }
        let (id, surface) = (self.id(), self.get().surface);
        if !self.get().registered {
            self.wm.backend.attach_surface(surface);
            self.get_mut().registered = true;
            self.wm.notify(id, WindowEvent::Open);
            if let Some(name) = self.wm.config.animations.wnd_open.clone() {
                let transition = self.wm.backend.play_transition(surface, &name);
                self.wm.track_transition(transition, id, false);
            }
        }
        self.wm.backend.set_visible(surface, true);
        self.get_mut().visible = true;
        self.wm.notify(id, WindowEvent::Shown);
        self.activate();
    }

    /// Hide without destroying. Raises nothing and keeps the active marker.
    pub fn hide(&mut self) {
        if !self.get().visible {
            return;
        }
        let surface = self.get().surface;
        self.wm.backend.set_visible(surface, false);
        self.get_mut().visible = false;
    }

    /// The minimize control: hide, then raise [`WindowEvent::Minimize`].
    pub fn minimize(&mut self) {
        self.hide();
        let id = self.id();
        self.wm.notify(id, WindowEvent::Minimize);
    }

    /// Close the window.
    ///
    /// With a close transition configured the window is destroyed once the
    /// host reports the transition finished; otherwise right away. Closing a
    /// window whose close transition is already running does nothing.
    pub fn close(mut self) {
        if self.get().closing.is_some() {
            return;
        }
        let (id, surface) = (self.id(), self.get().surface);
        match self.wm.config.animations.wnd_close.clone() {
            Some(name) => {
                let transition = self.wm.backend.play_transition(surface, &name);
                self.get_mut().closing = Some(transition);
                self.wm.track_transition(transition, id, true);
                tracing::debug!(window_id = %id, transition = %name, "closing after transition");
            }
            None => self.wm.destroy(id),
        }
    }

    /// Maximize or restore. Windows created without resize capability
    /// ignore this and return `false`.
    pub fn toggle_maximize(&mut self) -> bool {
        if !self.get().resizable {
            return false;
        }
        let (id, surface) = (self.id(), self.get().surface);
        if !self.get().maximized {
            let window = self.get_mut();
            window.saved_rect = Some(window.rect.clone());
            window.rect = WindowRect::fill();
            window.maximized = true;
            let rect = window.rect.clone();
            self.wm.backend.set_rect(surface, &rect);
            self.wm.backend.add_class(surface, CLASS_MAXIMIZED);
            self.set_draggable(false);
            tracing::debug!(window_id = %id, "maximized window");
            self.wm.notify(id, WindowEvent::Maximize);
        } else {
            let window = self.get_mut();
            if let Some(saved) = window.saved_rect.take() {
                window.rect = saved;
            }
            window.maximized = false;
            let restore_drag = window.draggable;
            let rect = window.rect.clone();
            self.wm.backend.set_rect(surface, &rect);
            self.wm.backend.remove_class(surface, CLASS_MAXIMIZED);
            self.set_draggable(restore_drag);
            tracing::debug!(window_id = %id, "restored window");
            self.wm.notify(id, WindowEvent::Restore);
        }
        true
    }

    /// Activate through the manager unless already active.
    pub fn activate(&mut self) {
        if self.get().active {
            return;
        }
        self.wm.activate_at(self.idx);
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        let text = text.into();
        let surface = self.get().surface;
        self.wm.backend.set_title(surface, &text);
        self.get_mut().title = text;
    }

    /// Attach or detach drag handling. Detaching also drops a move that is
    /// in progress so no further drag notifications arrive.
    pub fn set_draggable(&mut self, enabled: bool) {
        if self.get().drag_enabled == enabled {
            return;
        }
        let id = self.id();
        if !enabled && self.wm.session_targets(id, false) {
            self.wm.cancel_session(id);
        }
        self.get_mut().drag_enabled = enabled;
    }

    /// Attach or detach the resize handles and set the minimum size used by
    /// the clamp. Detaching drops a resize that is in progress.
    pub fn set_resizable(&mut self, min_width: Option<f64>, min_height: Option<f64>, enabled: bool) {
        let id = self.id();
        if !enabled && self.wm.session_targets(id, true) {
            self.wm.cancel_session(id);
        }
        let surface = self.get().surface;
        self.wm.backend.set_resize_handles(surface, enabled);
        let window = self.get_mut();
        window.resize_enabled = enabled;
        window.min_width = min_width;
        window.min_height = min_height;
    }

    /// Resolved bounding rectangle of the surface.
    pub fn rect(&self) -> Rect {
        self.wm.backend.rect(self.get().surface)
    }

    pub fn set_control_visibility(&mut self, controls: ControlVisibility) {
        let surface = self.get().surface;
        for control in Control::ALL {
            self.wm
                .backend
                .set_control_visible(surface, control, controls.is_visible(control));
        }
        self.get_mut().controls = controls;
    }

    /// Register a listener for this window only. Window listeners run before
    /// the manager's.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&WindowEvent) + 'static,
    {
        self.get_mut().listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.get_mut().listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::HeadlessBackend;
    use crate::config::{ManagerConfig, WindowConfig};
    use crate::events::WindowEvent;
    use crate::geometry::{Length, Rect, WindowRect};
    use crate::window::{ControlVisibility, WindowManager};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> WindowManager<HeadlessBackend> {
        WindowManager::new(
            HeadlessBackend::new(Rect::new(0.0, 0.0, 1024.0, 768.0)),
            ManagerConfig::default(),
        )
        .expect("fresh container")
    }

    #[test]
    fn show_registers_once_and_activates() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.take_events();
        wm.window_mut(a).unwrap().show();
        wm.window_mut(a).unwrap().show();
        let names: Vec<_> = wm.take_events().into_iter().map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["open", "shown", "activate"]);
        let window = wm.window(a).unwrap();
        assert!(window.is_visible() && window.is_registered() && window.is_active());
        let surface = wm.backend().surface(window.surface()).unwrap();
        assert!(surface.attached && surface.visible);
    }

    #[test]
    fn hide_is_silent_and_keeps_active_marker() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().show();
        wm.take_events();
        wm.window_mut(a).unwrap().hide();
        wm.window_mut(a).unwrap().hide();
        assert!(wm.take_events().is_empty());
        assert!(!wm.window(a).unwrap().is_visible());
        assert!(wm.window(a).unwrap().is_active());
    }

    #[test]
    fn reshow_skips_open() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().show();
        wm.window_mut(a).unwrap().minimize();
        wm.take_events();
        wm.window_mut(a).unwrap().show();
        let names: Vec<_> = wm.take_events().into_iter().map(|(_, e)| e.name()).collect();
        // still marked active, so activation is a no-op
        assert_eq!(names, vec!["shown"]);
    }

    #[test]
    fn maximize_then_restore_returns_exact_rect() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default().width("40%").x(33));
        let before = wm.window(a).unwrap().styled_rect().clone();
        let mut w = wm.window_mut(a).unwrap();
        assert!(w.toggle_maximize());
        assert!(w.window().is_maximized());
        assert!(!w.window().drag_enabled());
        assert_eq!(w.rect(), Rect::new(0.0, 0.0, 1024.0, 768.0));
        assert!(w.toggle_maximize());
        assert!(w.window().drag_enabled());
        assert_eq!(w.window().styled_rect(), &before);
        assert_eq!(w.window().styled_rect().width, Length::Raw("40%".into()));
        assert!(w.window().saved_rect().is_none());
    }

    #[test]
    fn restore_reattaches_drag_for_draggable_window() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let mut w = wm.window_mut(a).unwrap();
        w.set_draggable(false);
        w.toggle_maximize();
        w.toggle_maximize();
        assert!(w.window().is_draggable());
        assert!(w.window().drag_enabled());
    }

    #[test]
    fn restore_leaves_fixed_window_undraggable() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default().draggable(false));
        let mut w = wm.window_mut(a).unwrap();
        assert!(w.toggle_maximize());
        assert!(w.toggle_maximize());
        assert!(!w.window().drag_enabled());
    }

    #[test]
    fn non_resizable_window_ignores_maximize() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default().resizable(false));
        wm.take_events();
        assert!(!wm.window_mut(a).unwrap().toggle_maximize());
        assert!(!wm.window(a).unwrap().is_maximized());
        assert_eq!(
            wm.window(a).unwrap().styled_rect(),
            &WindowRect::px(10.0, 10.0, 450.0, 315.0)
        );
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn window_listeners_fire_before_manager_listeners() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        wm.subscribe(move |(_, e)| l.borrow_mut().push(format!("wm:{e}")));
        let l = log.clone();
        wm.window_mut(a)
            .unwrap()
            .subscribe(move |e| l.borrow_mut().push(format!("win:{e}")));
        wm.window_mut(a).unwrap().toggle_maximize();
        assert_eq!(*log.borrow(), vec!["win:maximize", "wm:maximize"]);
    }

    #[test]
    fn close_without_transition_destroys_immediately() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().show();
        wm.window_mut(a).unwrap().close();
        assert!(wm.find_window(a).is_none());
        assert_eq!(wm.backend().surface_count(), 0);
    }

    #[test]
    fn close_with_transition_waits_for_completion() {
        let mut config = ManagerConfig::default();
        config.animations.wnd_close = Some("fade-out".into());
        let mut wm = WindowManager::new(HeadlessBackend::default(), config).unwrap();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().close();
        assert!(wm.window(a).unwrap().is_closing());
        // second close while the transition runs is ignored
        wm.window_mut(a).unwrap().close();
        assert_eq!(wm.backend().transitions().len(), 1);
        let played = wm.backend().transitions()[0].clone();
        assert_eq!(played.name, "fade-out");
        wm.take_events();
        assert!(wm.transition_finished(played.id));
        assert!(wm.find_window(a).is_none());
        assert_eq!(wm.take_events(), vec![(a, WindowEvent::Destroyed)]);
        assert!(!wm.transition_finished(played.id));
    }

    #[test]
    fn open_transition_does_not_block_visibility() {
        let mut config = ManagerConfig::default();
        config.animations.wnd_open = Some("zoom-in".into());
        let mut wm = WindowManager::new(HeadlessBackend::default(), config).unwrap();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().show();
        assert!(wm.window(a).unwrap().is_visible());
        let played = wm.backend().transitions()[0].clone();
        assert_eq!(played.name, "zoom-in");
        assert!(wm.transition_finished(played.id));
    }

    #[test]
    fn control_visibility_reaches_backend() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().set_control_visibility(ControlVisibility {
            close: true,
            minimize: false,
            maximize: false,
        });
        let surface = wm.window(a).unwrap().surface();
        assert_eq!(wm.backend().surface(surface).unwrap().hidden_controls.len(), 2);
        assert!(!wm.window(a).unwrap().controls().minimize);
    }

    #[test]
    fn set_resizable_toggles_surface_handles() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        let surface = wm.window(a).unwrap().surface();
        assert!(wm.backend().surface(surface).unwrap().resize_handles);
        wm.window_mut(a)
            .unwrap()
            .set_resizable(Some(120.0), None, false);
        assert!(!wm.backend().surface(surface).unwrap().resize_handles);
        assert!(!wm.window(a).unwrap().resize_enabled());
        assert_eq!(wm.window(a).unwrap().min_size(), (Some(120.0), None));
    }

    #[test]
    fn set_title_updates_record_and_surface() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::default());
        wm.window_mut(a).unwrap().set_title("Inbox");
        let window = wm.window(a).unwrap();
        assert_eq!(window.title(), "Inbox");
        assert_eq!(wm.backend().surface(window.surface()).unwrap().title, "Inbox");
    }
}
