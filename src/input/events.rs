//! Platform-neutral input event types.
//!
//! Hosts translate their native pointer, mouse and touch events into these
//! values before handing them to the pad.

use std::cell::Cell;

/// Identifies a host document (the root a drawing surface lives in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Identifies an element that dispatches input (usually the drawing surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Where the host dispatched an event.
///
/// Events dispatched at a surface or element bubble to the owning
/// document, so document-scoped listeners hear a release over any element
/// of that document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchTarget {
    Surface(SurfaceId),
    /// Any other element, identified by the document it lives in.
    Element { document: DocumentId },
    Document(DocumentId),
}

/// Input event family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFamily {
    Pointer,
    Mouse,
    Touch,
}

/// Lifecycle phase of an input event (`touchstart` maps to `Down`, etc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer position, either the event itself or a coalesced sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub pressure: f64,
    pub time_stamp: i64,
}

/// Pointer Events style input (mouse, pen or touch through one API).
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub sample: PointerSample,
    /// Bit mask of pressed buttons; `1` is the primary button.
    pub buttons: u16,
    pub is_primary: bool,
    pub cancelable: bool,
    /// Samples the platform merged into this event, oldest first.
    pub coalesced: Vec<PointerSample>,
    default_prevented: Cell<bool>,
}

impl PointerEvent {
    /// A primary-pointer event with the primary button held.
    pub fn new(kind: EventKind, client_x: f64, client_y: f64, time_stamp: i64) -> Self {
        Self {
            kind,
            sample: PointerSample {
                client_x,
                client_y,
                pressure: 0.5,
                time_stamp,
            },
            buttons: 1,
            is_primary: true,
            cancelable: false,
            coalesced: Vec::new(),
            default_prevented: Cell::new(false),
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.sample.pressure = pressure;
        self
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn with_coalesced(mut self, samples: Vec<PointerSample>) -> Self {
        self.coalesced = samples;
        self
    }
}

/// Legacy mouse input.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub kind: EventKind,
    pub client_x: f64,
    pub client_y: f64,
    pub buttons: u16,
    pub time_stamp: i64,
    pub cancelable: bool,
    default_prevented: Cell<bool>,
}

impl MouseEvent {
    pub fn new(kind: EventKind, client_x: f64, client_y: f64, time_stamp: i64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
            buttons: 1,
            time_stamp,
            cancelable: false,
            default_prevented: Cell::new(false),
        }
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub client_x: f64,
    pub client_y: f64,
    pub force: f64,
}

/// Legacy touch input.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub kind: EventKind,
    /// Contacts currently on the element the event targets.
    pub target_touches: Vec<Touch>,
    /// Contacts that changed with this event.
    pub changed_touches: Vec<Touch>,
    pub time_stamp: i64,
    pub cancelable: bool,
    default_prevented: Cell<bool>,
}

impl TouchEvent {
    pub fn new(
        kind: EventKind,
        target_touches: Vec<Touch>,
        changed_touches: Vec<Touch>,
        time_stamp: i64,
    ) -> Self {
        Self {
            kind,
            target_touches,
            changed_touches,
            time_stamp,
            cancelable: false,
            default_prevented: Cell::new(false),
        }
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// Any input event the pad understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Mouse(MouseEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    pub fn family(&self) -> InputFamily {
        match self {
            InputEvent::Pointer(_) => InputFamily::Pointer,
            InputEvent::Mouse(_) => InputFamily::Mouse,
            InputEvent::Touch(_) => InputFamily::Touch,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Pointer(e) => e.kind,
            InputEvent::Mouse(e) => e.kind,
            InputEvent::Touch(e) => e.kind,
        }
    }

    pub fn is_cancelable(&self) -> bool {
        match self {
            InputEvent::Pointer(e) => e.cancelable,
            InputEvent::Mouse(e) => e.cancelable,
            InputEvent::Touch(e) => e.cancelable,
        }
    }

    fn prevented_flag(&self) -> &Cell<bool> {
        match self {
            InputEvent::Pointer(e) => &e.default_prevented,
            InputEvent::Mouse(e) => &e.default_prevented,
            InputEvent::Touch(e) => &e.default_prevented,
        }
    }

    /// Suppresses the platform default action; ignored for non-cancelable events.
    pub fn prevent_default(&self) {
        if self.is_cancelable() {
            self.prevented_flag().set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented_flag().get()
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        InputEvent::Mouse(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}
