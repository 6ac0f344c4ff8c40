//! Viewport width tracking against a breakpoint.
//!
//! Everything here is single-threaded: listeners run synchronously on the
//! thread that reports the resize, and shared state lives in `Rc`/`Cell`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Widths strictly below the breakpoint are narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Breakpoint(pub u32);

impl Breakpoint {
    pub fn is_narrow(&self, width: u32) -> bool {
        width < self.0
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Breakpoint(DEFAULT_BREAKPOINT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type ResizeListener = Box<dyn FnMut(u32)>;

/// Where viewport widths come from: the current width on demand plus a
/// subscribe/unsubscribe pair for change notifications.
pub trait ViewportSource {
    fn width(&self) -> u32;
    fn subscribe(&self, listener: ResizeListener) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// In-memory viewport whose width changes only through [`resize`].
///
/// Listeners must not subscribe or unsubscribe from inside a notification.
///
/// [`resize`]: SimulatedViewport::resize
pub struct SimulatedViewport {
    width: Cell<u32>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, ResizeListener)>>,
}

impl SimulatedViewport {
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Set the width and notify every listener, in subscription order.
    pub fn resize(&self, width: u32) {
        self.width.set(width);
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportSource for SimulatedViewport {
    fn width(&self) -> u32 {
        self.width.get()
    }

    fn subscribe(&self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }
}

#[derive(Debug)]
struct ObservedState {
    width: Cell<u32>,
    narrow: Cell<bool>,
    transitions: Cell<u32>,
}

impl ObservedState {
    fn update(&self, breakpoint: Breakpoint, width: u32) {
        let narrow = breakpoint.is_narrow(width);
        self.width.set(width);
        if narrow != self.narrow.get() {
            self.narrow.set(narrow);
            self.transitions.set(self.transitions.get() + 1);
            tracing::trace!(width, narrow, "Viewport crossed breakpoint");
        }
    }
}

/// Tracks whether the viewport is narrower than a breakpoint.
///
/// Mounting reads the current width and subscribes to resizes; dropping the
/// observer unsubscribes, so the listener never outlives its owner.
pub struct ViewportObserver<S: ViewportSource> {
    source: Rc<S>,
    breakpoint: Breakpoint,
    state: Rc<ObservedState>,
    listener: ListenerId,
}

impl<S: ViewportSource> ViewportObserver<S> {
    pub fn mount(source: Rc<S>, breakpoint: Breakpoint) -> Self {
        let width = source.width();
        let state = Rc::new(ObservedState {
            width: Cell::new(width),
            narrow: Cell::new(breakpoint.is_narrow(width)),
            transitions: Cell::new(0),
        });

        let shared = Rc::clone(&state);
        let listener = source.subscribe(Box::new(move |width| shared.update(breakpoint, width)));

        Self {
            source,
            breakpoint,
            state,
            listener,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.state.narrow.get()
    }

    pub fn width(&self) -> u32 {
        self.state.width.get()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Number of narrow/wide flips observed since mount.
    pub fn transitions(&self) -> u32 {
        self.state.transitions.get()
    }

    pub fn source(&self) -> &Rc<S> {
        &self.source
    }
}

impl<S: ViewportSource> Drop for ViewportObserver<S> {
    fn drop(&mut self) {
        self.source.unsubscribe(self.listener);
    }
}
