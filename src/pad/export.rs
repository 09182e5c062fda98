//! Structured, raster and vector import/export.

use super::SignaturePad;
use crate::draw::{SvgOptions, SvgRenderer};
use crate::stroke::PointGroup;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cairo::ImageSurface;
use log::{debug, info};
use std::io::Cursor;
use thiserror::Error;
use url::Url;

/// Errors produced while exporting the drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} export is not supported by the raster backend")]
    UnsupportedFormat(&'static str),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("raster surface error: {0}")]
    Surface(#[from] cairo::Error),
}

/// Errors produced while loading an image from a data URL.
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("expected a data URL, got scheme '{0}'")]
    NotDataUrl(String),

    #[error("data URL has no payload")]
    MissingPayload,

    #[error("unsupported image type '{0}'")]
    UnsupportedType(String),

    #[error("data URL payload is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decode PNG: {0}")]
    Png(#[source] cairo::IoError),
}

/// Errors produced while reading structured stroke data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed stroke data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Image encoding requested from [`SignaturePad::to_data_url`].
///
/// Vector options only exist on the SVG variant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg {
        quality: f64,
    },
    Svg(SvgOptions),
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg { .. } => "image/jpeg",
            ImageFormat::Svg(_) => "image/svg+xml",
        }
    }
}

/// How imported groups combine with the existing drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FromDataOptions {
    /// Replace the drawing instead of appending to it.
    pub clear: bool,
}

impl Default for FromDataOptions {
    fn default() -> Self {
        Self { clear: true }
    }
}

/// Placement of an image loaded with [`SignaturePad::from_data_url`].
///
/// Unset sizes fill the surface at `ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FromDataUrlOptions {
    pub ratio: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl SignaturePad {
    /// Copies out every point group, in drawing order.
    pub fn to_data(&self) -> Vec<PointGroup> {
        self.strokes.groups().to_vec()
    }

    /// Loads previously exported groups, drawing them with their own styles.
    pub fn from_data(&mut self, groups: Vec<PointGroup>, options: FromDataOptions) {
        if options.clear {
            self.clear();
        }
        self.input.stroke_finished();
        debug!("Importing {} point groups", groups.len());
        self.strokes.import(groups, &mut self.raster);
    }

    pub fn to_json(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string(self.strokes.groups())?)
    }

    /// Parses JSON stroke data; leaves the drawing untouched on error.
    pub fn from_json(&mut self, json: &str, options: FromDataOptions) -> Result<(), DataError> {
        let groups: Vec<PointGroup> = serde_json::from_str(json)?;
        self.from_data(groups, options);
        Ok(())
    }

    /// Renders the drawing as an SVG document.
    pub fn to_svg(&self, options: SvgOptions) -> String {
        let (width, height) = self.raster.logical_size();
        let mut svg = SvgRenderer::new(width, height, self.raster.ratio());
        if options.include_background_color {
            svg.background(&self.options.background_color);
        }
        self.strokes.render_all(&mut svg);
        svg.finish()
    }

    /// Encodes the drawing as a base64 data URL.
    pub fn to_data_url(&self, format: ImageFormat) -> Result<String, ExportError> {
        let payload = match format {
            ImageFormat::Png => self.raster.encode_png()?,
            ImageFormat::Jpeg { .. } => {
                return Err(ExportError::UnsupportedFormat(format.mime_type()));
            }
            ImageFormat::Svg(options) => self.to_svg(options).into_bytes(),
        };
        Ok(format!(
            "data:{};base64,{}",
            format.mime_type(),
            STANDARD.encode(payload)
        ))
    }

    /// Draws a PNG data URL onto the surface.
    ///
    /// The drawing's point groups are left untouched. On failure nothing is
    /// drawn.
    pub async fn from_data_url(
        &mut self,
        data_url: &str,
        options: FromDataUrlOptions,
    ) -> Result<(), ImageDecodeError> {
        let image = decode_png_data_url(data_url)?;

        let ratio = options.ratio.unwrap_or(self.raster.ratio()).max(1.0);
        let (pixel_width, pixel_height) = self.raster.pixel_size();
        let width = options.width.unwrap_or(pixel_width as f64 / ratio);
        let height = options.height.unwrap_or(pixel_height as f64 / ratio);

        info!(
            "Drawing {}x{} image at ({}, {})",
            image.width(),
            image.height(),
            options.x_offset,
            options.y_offset
        );
        self.raster
            .draw_image(&image, options.x_offset, options.y_offset, width, height);
        Ok(())
    }
}

fn decode_png_data_url(data_url: &str) -> Result<ImageSurface, ImageDecodeError> {
    let url = Url::parse(data_url)?;
    if url.scheme() != "data" {
        return Err(ImageDecodeError::NotDataUrl(url.scheme().to_string()));
    }

    let (header, payload) = url
        .path()
        .split_once(',')
        .ok_or(ImageDecodeError::MissingPayload)?;
    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if mime != "image/png" {
        return Err(ImageDecodeError::UnsupportedType(mime));
    }
    if !params.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
        return Err(ImageDecodeError::NotBase64);
    }

    let bytes = STANDARD.decode(payload.trim())?;
    ImageSurface::create_from_png(&mut Cursor::new(bytes)).map_err(ImageDecodeError::Png)
}
