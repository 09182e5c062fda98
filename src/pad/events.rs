//! Stroke notifications delivered to host listeners.

use crate::input::InputEvent;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Stroke lifecycle notification names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeEventKind {
    /// A stroke is about to start; cancelable.
    BeginStroke,
    BeforeUpdateStroke,
    AfterUpdateStroke,
    EndStroke,
}

impl StrokeEventKind {
    /// Name the notification is known by in host event systems.
    pub fn name(self) -> &'static str {
        match self {
            StrokeEventKind::BeginStroke => "beginStroke",
            StrokeEventKind::BeforeUpdateStroke => "beforeUpdateStroke",
            StrokeEventKind::AfterUpdateStroke => "afterUpdateStroke",
            StrokeEventKind::EndStroke => "endStroke",
        }
    }
}

/// A notification carrying the input event that triggered it.
#[derive(Debug, Clone)]
pub struct StrokeEvent {
    pub kind: StrokeEventKind,
    pub detail: InputEvent,
    cancelable: bool,
    default_prevented: Cell<bool>,
}

impl StrokeEvent {
    pub fn new(kind: StrokeEventKind, detail: InputEvent) -> Self {
        Self {
            kind,
            detail,
            cancelable: kind == StrokeEventKind::BeginStroke,
            default_prevented: Cell::new(false),
        }
    }

    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Cancels the pending action. Has no effect on non-cancelable events.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Handle returned by [`EventTarget::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn(&StrokeEvent)>;

struct Listener {
    id: ListenerId,
    kind: StrokeEventKind,
    callback: Callback,
}

/// Listener registry notifications are dispatched on.
///
/// A pad owns one by default; hosts may hand it a shared one instead so
/// several pads report to the same place.
#[derive(Default)]
pub struct EventTarget {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl EventTarget {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add_event_listener<F>(&self, kind: StrokeEventKind, callback: F) -> ListenerId
    where
        F: Fn(&StrokeEvent) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kind,
            callback: Rc::new(callback),
        });
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Calls every listener registered for `event.kind`, in registration
    /// order. Returns `false` if one of them cancelled the event.
    pub fn dispatch(&self, event: &StrokeEvent) -> bool {
        // Listeners may add or remove listeners while being called.
        let callbacks: Vec<Callback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == event.kind)
            .map(|listener| Rc::clone(&listener.callback))
            .collect();
        for callback in callbacks {
            callback(event);
        }
        !event.default_prevented()
    }
}
