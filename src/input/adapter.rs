//! Normalises pointer, mouse and touch events into stroke signals.
//!
//! The adapter keeps an explicit subscription list: `Down` events are taken
//! from the bound surface, while move and release events of an active stroke
//! are also taken from the surface's owning document. That lets a stroke end
//! when the pointer is released outside the surface, without ever reacting
//! to events from a different document.

use super::events::{
    DispatchTarget, DocumentId, EventKind, InputEvent, InputFamily, MouseEvent, PointerEvent,
    PointerSample, SurfaceId, Touch, TouchEvent,
};
use crate::draw::Point;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which event families the adapter listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Pointer events only
    #[default]
    Pointer,
    /// Legacy mouse plus touch events
    MouseTouch,
}

/// The element and document the adapter is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub surface: SurfaceId,
    pub document: DocumentId,
    /// Client coordinates of the surface's top-left corner.
    pub origin: (f64, f64),
}

impl Binding {
    pub fn new(surface: SurfaceId, document: DocumentId) -> Self {
        Self {
            surface,
            document,
            origin: (0.0, 0.0),
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }
}

/// Scope a subscription listens at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Surface(SurfaceId),
    Document(DocumentId),
}

/// One active listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub scope: Scope,
    pub family: InputFamily,
    pub kind: EventKind,
}

/// Stroke lifecycle request derived from one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeSignal {
    Begin(Point),
    /// Every sample carried by the event, oldest first.
    Update(Vec<Point>),
    /// End the stroke, optionally flushing the release position.
    End(Option<Point>),
}

impl StrokeSignal {
    /// Drops samples with non-finite coordinates.
    fn finite_only(self) -> Option<Self> {
        match self {
            StrokeSignal::Begin(point) => point.is_finite().then_some(StrokeSignal::Begin(point)),
            StrokeSignal::Update(mut points) => {
                points.retain(Point::is_finite);
                (!points.is_empty()).then_some(StrokeSignal::Update(points))
            }
            StrokeSignal::End(point) => Some(StrokeSignal::End(point.filter(Point::is_finite))),
        }
    }
}

/// Translates platform events into [`StrokeSignal`]s.
#[derive(Debug, Default)]
pub struct InputAdapter {
    mode: InputMode,
    binding: Option<Binding>,
    subscriptions: Vec<Subscription>,
    stroke_family: Option<InputFamily>,
}

impl InputAdapter {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn binding(&self) -> Option<Binding> {
        self.binding
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Attaches to `binding`, replacing any previous attachment.
    pub fn on(&mut self, binding: Binding) {
        self.off();
        let surface = Scope::Surface(binding.surface);
        let base: &[(InputFamily, EventKind)] = match self.mode {
            InputMode::Pointer => &[(InputFamily::Pointer, EventKind::Down)],
            InputMode::MouseTouch => &[
                (InputFamily::Mouse, EventKind::Down),
                (InputFamily::Touch, EventKind::Down),
                (InputFamily::Touch, EventKind::Move),
                (InputFamily::Touch, EventKind::Up),
                (InputFamily::Touch, EventKind::Cancel),
            ],
        };
        self.subscriptions = base
            .iter()
            .map(|&(family, kind)| Subscription {
                scope: surface,
                family,
                kind,
            })
            .collect();
        self.binding = Some(binding);
        debug!(
            "Input attached to surface {:?} in document {:?} ({:?})",
            binding.surface, binding.document, self.mode
        );
    }

    /// Detaches every subscription. Safe to call repeatedly.
    pub fn off(&mut self) {
        if self.binding.take().is_some() {
            debug!("Input detached");
        }
        self.subscriptions.clear();
        self.stroke_family = None;
    }

    /// Switches event families, re-attaching to the current binding.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        if let Some(binding) = self.binding {
            self.on(binding);
        }
    }

    /// Registers the document-level listeners an active stroke needs.
    pub fn stroke_started(&mut self, family: InputFamily) {
        let Some(binding) = self.binding else {
            return;
        };
        self.stroke_finished();
        let document = Scope::Document(binding.document);
        let kinds: &[EventKind] = match family {
            InputFamily::Pointer => &[EventKind::Move, EventKind::Up, EventKind::Cancel],
            InputFamily::Mouse => &[EventKind::Move, EventKind::Up],
            InputFamily::Touch => &[],
        };
        self.subscriptions
            .extend(kinds.iter().map(|&kind| Subscription {
                scope: document,
                family,
                kind,
            }));
        self.stroke_family = Some(family);
    }

    /// Drops the document-level listeners of the finished stroke.
    pub fn stroke_finished(&mut self) {
        self.subscriptions
            .retain(|sub| !matches!(sub.scope, Scope::Document(_)));
        self.stroke_family = None;
    }

    /// Routes one event dispatched at `target`.
    ///
    /// Returns `None` when nothing listens for it or the event does not
    /// concern the primary contact. Suppresses the platform default on
    /// pointer and touch events only when they are cancelable.
    pub fn route(&self, target: DispatchTarget, event: &InputEvent) -> Option<StrokeSignal> {
        let binding = self.binding?;
        if !self.is_subscribed(binding, target, event) {
            return None;
        }
        let active = self.stroke_family == Some(event.family());

        let signal = match event {
            InputEvent::Pointer(e) => self.route_pointer(binding, e, active, event),
            InputEvent::Mouse(e) => route_mouse(binding, e, active),
            InputEvent::Touch(e) => route_touch(binding, e, active, event),
        }?;
        signal.finite_only()
    }

    fn is_subscribed(&self, binding: Binding, target: DispatchTarget, event: &InputEvent) -> bool {
        // Surface events bubble to the surface's own document.
        let scopes: &[Scope] = match target {
            DispatchTarget::Surface(id) if id == binding.surface => &[
                Scope::Surface(binding.surface),
                Scope::Document(binding.document),
            ],
            DispatchTarget::Surface(id) => &[Scope::Surface(id)],
            DispatchTarget::Element { document } | DispatchTarget::Document(document) => {
                &[Scope::Document(document)]
            }
        };
        self.subscriptions.iter().any(|sub| {
            sub.family == event.family() && sub.kind == event.kind() && scopes.contains(&sub.scope)
        })
    }

    fn route_pointer(
        &self,
        binding: Binding,
        e: &PointerEvent,
        active: bool,
        event: &InputEvent,
    ) -> Option<StrokeSignal> {
        if !e.is_primary {
            return None;
        }
        let signal = match e.kind {
            EventKind::Down => {
                if e.buttons != 1 {
                    return None;
                }
                StrokeSignal::Begin(pointer_point(binding, &e.sample))
            }
            EventKind::Move => {
                if !active {
                    return None;
                }
                if e.buttons != 1 {
                    // Button released somewhere we never heard about.
                    StrokeSignal::End(None)
                } else if e.coalesced.is_empty() {
                    StrokeSignal::Update(vec![pointer_point(binding, &e.sample)])
                } else {
                    StrokeSignal::Update(
                        e.coalesced
                            .iter()
                            .map(|sample| pointer_point(binding, sample))
                            .collect(),
                    )
                }
            }
            EventKind::Up => {
                if !active {
                    return None;
                }
                StrokeSignal::End(Some(pointer_point(binding, &e.sample)))
            }
            EventKind::Cancel => {
                if !active {
                    return None;
                }
                StrokeSignal::End(None)
            }
        };
        event.prevent_default();
        Some(signal)
    }
}

fn route_mouse(binding: Binding, e: &MouseEvent, active: bool) -> Option<StrokeSignal> {
    let point = to_point(binding, e.client_x, e.client_y, 0.0, e.time_stamp);
    match e.kind {
        EventKind::Down if e.buttons == 1 => Some(StrokeSignal::Begin(point)),
        EventKind::Move if active && e.buttons != 1 => Some(StrokeSignal::End(None)),
        EventKind::Move if active => Some(StrokeSignal::Update(vec![point])),
        EventKind::Up if active => Some(StrokeSignal::End(Some(point))),
        EventKind::Cancel if active => Some(StrokeSignal::End(None)),
        _ => None,
    }
}

fn route_touch(
    binding: Binding,
    e: &TouchEvent,
    active: bool,
    event: &InputEvent,
) -> Option<StrokeSignal> {
    let touch_point = |touch: &Touch| {
        to_point(binding, touch.client_x, touch.client_y, touch.force, e.time_stamp)
    };
    let signal = match e.kind {
        EventKind::Down => {
            if e.target_touches.len() != 1 {
                return None;
            }
            let touch = e.changed_touches.first().or(e.target_touches.first())?;
            StrokeSignal::Begin(touch_point(touch))
        }
        EventKind::Move => {
            if !active || e.target_touches.len() != 1 {
                return None;
            }
            StrokeSignal::Update(vec![touch_point(&e.target_touches[0])])
        }
        EventKind::Up | EventKind::Cancel => {
            if !active {
                return None;
            }
            let release = match e.kind {
                EventKind::Up => e.changed_touches.first().map(touch_point),
                _ => None,
            };
            StrokeSignal::End(release)
        }
    };
    event.prevent_default();
    Some(signal)
}

fn pointer_point(binding: Binding, sample: &PointerSample) -> Point {
    to_point(
        binding,
        sample.client_x,
        sample.client_y,
        sample.pressure,
        sample.time_stamp,
    )
}

fn to_point(binding: Binding, client_x: f64, client_y: f64, pressure: f64, time: i64) -> Point {
    Point::new(
        client_x - binding.origin.0,
        client_y - binding.origin.1,
        pressure,
        time,
    )
}
