//! Input normalisation.
//!
//! Hosts feed platform pointer, mouse and touch events in as [`InputEvent`]s;
//! the [`InputAdapter`] decides which of them concern the bound surface and
//! turns them into [`StrokeSignal`]s for the stroke manager.

pub mod adapter;
pub mod events;

pub use adapter::{Binding, InputAdapter, InputMode, Scope, StrokeSignal, Subscription};
pub use events::{
    DispatchTarget, DocumentId, EventKind, InputEvent, InputFamily, MouseEvent, PointerEvent,
    PointerSample, SurfaceId, Touch, TouchEvent,
};
