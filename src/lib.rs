//! Signature capture and rendering.
//!
//! Captures pointer, mouse and touch input as smooth variable-width strokes,
//! and exports the drawing as structured point data, PNG (via Cairo) or SVG.
//! The same fitted segments feed both renderers, so a drawing looks the same
//! whichever way it is exported, and re-importing exported data reproduces it.

pub mod config;
pub mod draw;
pub mod input;
pub mod pad;
pub mod stroke;

pub use config::Config;
pub use pad::SignaturePad;
