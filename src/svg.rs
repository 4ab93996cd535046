//! SVG serializer for [`Drawing`]s.
//!
//! The document is sized in millimetres with a viewBox of the same
//! numbers, so one user unit is one millimetre. Everything is stroked or
//! filled black.

use crate::ir::{DrawCommand, Drawing, TransformOp};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

/// Escape the XML special characters for text content and attributes.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn transform_attr(ops: &[TransformOp]) -> String {
    ops.iter()
        .map(|op| match op {
            TransformOp::Translate(x, y) => format!("translate({} {})", x, y),
            TransformOp::Rotate(deg) => format!("rotate({})", deg),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_svg(drawing: &Drawing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="utf-8" ?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
        w = drawing.width,
        h = drawing.height,
    );

    for command in &drawing.commands {
        match command {
            DrawCommand::DrawLine { start, end, width } => {
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="{}" />"#,
                    start.0, start.1, end.0, end.1, width
                );
            }
            DrawCommand::DrawCircle {
                center,
                radius,
                width,
            } => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="black" stroke-width="{}" />"#,
                    center.0, center.1, radius, width
                );
            }
            DrawCommand::DrawText {
                content,
                transform,
                style,
            } => {
                let _ = writeln!(
                    out,
                    r#"<text x="0" y="0" transform="{}" fill="black" style="font-size:{};text-anchor:{};font-family:{}">{}</text>"#,
                    transform_attr(transform),
                    style.size,
                    xml_escape(&style.anchor),
                    xml_escape(&style.font),
                    xml_escape(content)
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Serialize and write in one pass; nothing is created if rendering failed
/// earlier.
pub fn save(drawing: &Drawing, path: &Path) -> Result<()> {
    std::fs::write(path, to_svg(drawing))
        .with_context(|| format!("Failed to write SVG to {}", path.display()))
}
