use crate::ir::{Affine, DrawCommand, Drawing};
use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;
use std::path::Path;

/// Largest raster the preview will allocate, in pixels
const MAX_PIXELS: u64 = 64_000_000;

/// Raster canvas for previewing a drawing as PNG. Lines and circles are
/// drawn at their stroke widths; labels are shown only as a dot at their
/// anchor point since text shaping would need system fonts.
pub struct Canvas {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    px_per_mm: f64,
}

impl Canvas {
    pub fn new(drawing: &Drawing, px_per_mm: f64) -> Result<Self> {
        if !(px_per_mm.is_finite() && px_per_mm > 0.0) {
            anyhow::bail!("Preview resolution must be positive (got {})", px_per_mm);
        }
        let width = (drawing.width * px_per_mm).ceil().max(1.0) as u32;
        let height = (drawing.height * px_per_mm).ceil().max(1.0) as u32;
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            anyhow::bail!(
                "Preview of {}x{} pixels is too large; lower the resolution",
                width,
                height
            );
        }

        Ok(Canvas {
            buffer: vec![0u8; (width * height * 3) as usize],
            width,
            height,
            px_per_mm,
        })
    }

    pub fn draw(&mut self, drawing: &Drawing) -> Result<()> {
        let scale = self.px_per_mm;
        let to_px = |(x, y): (f64, f64)| ((x * scale).round() as i32, (y * scale).round() as i32);
        let stroke = |mm: f64| ((mm * scale).round() as u32).max(1);

        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();
        root.fill(&WHITE).context("Failed to fill background")?;

        for command in &drawing.commands {
            match command {
                DrawCommand::DrawLine { start, end, width } => {
                    root.draw(&PathElement::new(
                        vec![to_px(*start), to_px(*end)],
                        BLACK.stroke_width(stroke(*width)),
                    ))
                    .context("Failed to draw line")?;
                }
                DrawCommand::DrawCircle {
                    center,
                    radius,
                    width,
                } => {
                    root.draw(&Circle::new(
                        to_px(*center),
                        (radius * scale).round() as i32,
                        BLACK.stroke_width(stroke(*width)),
                    ))
                    .context("Failed to draw circle")?;
                }
                DrawCommand::DrawText { transform, .. } => {
                    let anchor = Affine::compose(transform).apply((0.0, 0.0));
                    root.draw(&Circle::new(to_px(anchor), 1i32, RED.filled()))
                        .context("Failed to draw label anchor")?;
                }
            }
        }

        root.present().context("Failed to present drawing")?;
        Ok(())
    }

    /// Encode the canvas as PNG bytes
    pub fn render(self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder
                .write_image(
                    &self.buffer,
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                )
                .context("Failed to encode PNG")?;
        }

        Ok(png_bytes)
    }
}

pub fn render_png(drawing: &Drawing, px_per_mm: f64) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(drawing, px_per_mm)?;
    canvas.draw(drawing)?;
    canvas.render()
}

pub fn save_png(drawing: &Drawing, px_per_mm: f64, path: &Path) -> Result<()> {
    let bytes = render_png(drawing, px_per_mm)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write preview to {}", path.display()))
}
