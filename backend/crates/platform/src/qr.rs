//! QR code rendering

use qrcode::QrCode;
use qrcode::render::svg;
use thiserror::Error;

/// Minimum rendered edge in pixels
const QR_MIN_DIMENSION: u32 = 500;

#[derive(Debug, Error)]
#[error("QR code encoding failed: {0}")]
pub struct QrRenderError(#[from] qrcode::types::QrError);

/// Render `content` as a standalone SVG document
pub fn render_svg(content: &str) -> Result<String, QrRenderError> {
    let code = QrCode::new(content.as_bytes())?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
        .quiet_zone(true)
        .build())
}
