//! The host-facing signature pad.
//!
//! [`SignaturePad`] ties the pieces together: input events come in through
//! the [`InputAdapter`], samples go to the [`StrokeManager`], fitted segments
//! are drawn straight onto the [`RasterRenderer`], and stroke notifications
//! go out through an [`EventTarget`].

pub mod events;
pub mod export;

pub use events::{EventTarget, ListenerId, StrokeEvent, StrokeEventKind};
pub use export::{
    DataError, ExportError, FromDataOptions, FromDataUrlOptions, ImageDecodeError, ImageFormat,
};

use crate::draw::color::TRANSPARENT;
use crate::draw::{Color, Point, RasterRenderer, StrokeStyle};
use crate::input::{Binding, DispatchTarget, InputAdapter, InputEvent, InputMode, StrokeSignal};
use crate::stroke::{SampleFilter, StrokeManager};
use log::{debug, warn};
use std::rc::Rc;

/// Pad-wide settings. Changes apply from the next stroke on.
#[derive(Debug, Clone, PartialEq)]
pub struct PadOptions {
    pub min_width: f64,
    pub max_width: f64,
    /// Radius of single-point dots; `0` derives it from the widths.
    pub dot_size: f64,
    pub pen_color: String,
    pub background_color: String,
    pub velocity_filter_weight: f64,
    /// `0` accepts samples regardless of spacing.
    pub min_distance: f64,
    /// Milliseconds between accepted samples; `0` accepts every sample.
    pub throttle: u64,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            min_width: 0.5,
            max_width: 2.5,
            dot_size: 0.0,
            pen_color: "black".to_string(),
            background_color: "rgba(0,0,0,0)".to_string(),
            velocity_filter_weight: 0.7,
            min_distance: 5.0,
            throttle: 16,
        }
    }
}

impl PadOptions {
    /// Snapshot frozen into the next point group.
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.pen_color.clone(),
            dot_size: self.dot_size,
            min_width: self.min_width,
            max_width: self.max_width,
            velocity_filter_weight: self.velocity_filter_weight,
        }
    }

    pub fn filter(&self) -> SampleFilter {
        SampleFilter {
            min_distance: self.min_distance,
            throttle: self.throttle,
        }
    }

    fn background(&self) -> Color {
        Color::parse(&self.background_color).unwrap_or_else(|err| {
            warn!("{err}, using a transparent background");
            TRANSPARENT
        })
    }
}

/// Logical surface size and device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            ratio: 1.0,
        }
    }
}

/// Captures signatures from input events and exports them.
#[derive(Debug)]
pub struct SignaturePad {
    pub options: PadOptions,
    strokes: StrokeManager,
    raster: RasterRenderer,
    input: InputAdapter,
    events: Rc<EventTarget>,
}

impl SignaturePad {
    /// Creates a pad that is not listening to any input yet.
    pub fn new(size: SurfaceSize, options: PadOptions) -> Result<Self, ExportError> {
        let raster = RasterRenderer::new(size.width, size.height, size.ratio)?;
        let mut pad = Self {
            options,
            strokes: StrokeManager::new(),
            raster,
            input: InputAdapter::new(InputMode::default()),
            events: EventTarget::new(),
        };
        pad.clear();
        Ok(pad)
    }

    /// Creates a pad listening on `binding`.
    pub fn attached(
        binding: Binding,
        size: SurfaceSize,
        options: PadOptions,
    ) -> Result<Self, ExportError> {
        let mut pad = Self::new(size, options)?;
        pad.on(binding);
        Ok(pad)
    }

    /// Starts listening for input on `binding`.
    pub fn on(&mut self, binding: Binding) {
        self.input.on(binding);
    }

    /// Stops listening for input. Safe to call when already detached.
    pub fn off(&mut self) {
        self.input.off();
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input.set_mode(mode);
    }

    pub fn add_event_listener<F>(&self, kind: StrokeEventKind, callback: F) -> ListenerId
    where
        F: Fn(&StrokeEvent) + 'static,
    {
        self.events.add_event_listener(kind, callback)
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.events.remove_event_listener(id)
    }

    /// Registry notifications are dispatched on.
    pub fn event_target(&self) -> Rc<EventTarget> {
        Rc::clone(&self.events)
    }

    /// Dispatches future notifications on `target` instead.
    pub fn set_event_target(&mut self, target: Rc<EventTarget>) {
        self.events = target;
    }

    /// Feeds one platform event dispatched at `target`.
    ///
    /// Returns `true` if the event concerned the pad.
    pub fn handle_event(&mut self, target: DispatchTarget, event: &InputEvent) -> bool {
        let Some(signal) = self.input.route(target, event) else {
            return false;
        };
        match signal {
            StrokeSignal::Begin(point) => self.stroke_begin(event, point),
            StrokeSignal::Update(points) => {
                for point in points {
                    self.stroke_update(event, point);
                }
            }
            StrokeSignal::End(point) => self.stroke_end(event, point),
        }
        true
    }

    fn stroke_begin(&mut self, event: &InputEvent, point: Point) {
        let begin = StrokeEvent::new(StrokeEventKind::BeginStroke, event.clone());
        if !self.events.dispatch(&begin) {
            debug!("Stroke cancelled by a beginStroke listener");
            return;
        }
        self.input.stroke_started(event.family());

        self.notify(StrokeEventKind::BeforeUpdateStroke, event);
        let (style, filter) = (self.options.style(), self.options.filter());
        self.strokes
            .begin_stroke(point, style, filter, &mut self.raster);
        self.notify(StrokeEventKind::AfterUpdateStroke, event);
    }

    fn stroke_update(&mut self, event: &InputEvent, point: Point) {
        if !self.strokes.is_drawing() {
            return;
        }
        self.notify(StrokeEventKind::BeforeUpdateStroke, event);
        let filter = self.options.filter();
        self.strokes.update_stroke(point, filter, &mut self.raster);
        self.notify(StrokeEventKind::AfterUpdateStroke, event);
    }

    fn stroke_end(&mut self, event: &InputEvent, point: Option<Point>) {
        if !self.strokes.is_drawing() {
            return;
        }
        if let Some(point) = point {
            self.notify(StrokeEventKind::BeforeUpdateStroke, event);
            let filter = self.options.filter().unthrottled();
            self.strokes.update_stroke(point, filter, &mut self.raster);
            self.notify(StrokeEventKind::AfterUpdateStroke, event);
        }
        self.strokes
            .end_stroke(None, self.options.filter(), &mut self.raster);
        self.input.stroke_finished();
        self.notify(StrokeEventKind::EndStroke, event);
    }

    fn notify(&self, kind: StrokeEventKind, event: &InputEvent) {
        self.events.dispatch(&StrokeEvent::new(kind, event.clone()));
    }

    /// Discards the drawing and repaints the background.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.input.stroke_finished();
        self.raster.fill(self.options.background());
    }

    /// True iff no stroke has been drawn or imported.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Repaints the surface from the stored point groups.
    pub fn redraw(&mut self) {
        self.raster.fill(self.options.background());
        self.strokes.render_all(&mut self.raster);
    }

    /// Reallocates the surface at a new size and redraws the drawing.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), ExportError> {
        self.raster = RasterRenderer::new(size.width, size.height, size.ratio)?;
        debug!(
            "Surface resized to {}x{} at ratio {}",
            size.width, size.height, size.ratio
        );
        self.redraw();
        Ok(())
    }

    /// The bitmap strokes are drawn into.
    pub fn surface(&self) -> &RasterRenderer {
        &self.raster
    }

    pub fn size(&self) -> SurfaceSize {
        let (width, height) = self.raster.logical_size();
        SurfaceSize {
            width,
            height,
            ratio: self.raster.ratio(),
        }
    }
}

#[cfg(test)]
mod tests;
