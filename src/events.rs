//! Lifecycle notifications and the listener registries that carry them.
//!
//! A notification goes to the window's own listeners first and to the
//! manager's listeners second. Listeners only observe; a host that wants to
//! call back into the manager in response drains
//! [`WindowManager::take_events`](crate::window::WindowManager::take_events)
//! after the triggering call has returned.

use std::fmt;

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Created,
    /// First-ever show, right after the surface was attached.
    Open,
    Shown,
    /// Only raised by the minimize control; a programmatic `hide` is silent.
    Minimize,
    Maximize,
    Restore,
    Activate,
    Deactivate,
    /// Raised by the close control before the close protocol runs.
    Close,
    Destroyed,
    /// Pointer offset from the pressed region's top-left corner.
    DragStart { offset: Point },
    Drag { position: Point },
    DragEnd { rect: Rect },
    ResizeStart { rect: Rect },
    Resize { rect: Rect },
    ResizeEnd { rect: Rect },
}

impl WindowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WindowEvent::Created => "create",
            WindowEvent::Open => "open",
            WindowEvent::Shown => "shown",
            WindowEvent::Minimize => "minimize",
            WindowEvent::Maximize => "maximize",
            WindowEvent::Restore => "restore",
            WindowEvent::Activate => "activate",
            WindowEvent::Deactivate => "deactivate",
            WindowEvent::Close => "close",
            WindowEvent::Destroyed => "destroy",
            WindowEvent::DragStart { .. } => "dragstart",
            WindowEvent::Drag { .. } => "drag",
            WindowEvent::DragEnd { .. } => "dragend",
            WindowEvent::ResizeStart { .. } => "resizestart",
            WindowEvent::Resize { .. } => "resize",
            WindowEvent::ResizeEnd { .. } => "resizeend",
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<A> = Box<dyn FnMut(&A)>;

/// Multi-subscriber callback registry. Listeners run in subscription order.
pub struct Listeners<A> {
    next: u64,
    entries: Vec<(ListenerId, Callback<A>)>,
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<A> fmt::Debug for Listeners<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<A> Listeners<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&A) + 'static,
    {
        let id = ListenerId(self.next);
        self.next = self.next.saturating_add(1);
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, args: &A) {
        for (_, callback) in self.entries.iter_mut() {
            callback(args);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
