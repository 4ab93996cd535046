use crate::config::StraightDrawConfig;
use crate::error::{ScaleError, ScaleResult};
use crate::ir::{DrawCommand, Drawing, TextStyle, TransformOp};
use crate::table::SpecTable;
use tracing::debug;

/// Lay the scale out along a horizontal line. Marks rise from
/// `scale_origin_y` by their line offsets; y is flipped to top-down on
/// output.
pub fn render_straight(table: &SpecTable, config: &StraightDrawConfig) -> ScaleResult<Drawing> {
    if !table.is_scale_set() {
        return Err(ScaleError::NotSet);
    }

    let flip = |y: f64| config.paper_size_y - y;
    let x_start = config.scale_origin_x;
    let x_end = config.scale_origin_x + config.scale_size_x;
    let mut drawing = Drawing::new(config.paper_size_x, config.paper_size_y);

    for y in [config.scale_origin_y, config.mark_origin_y] {
        drawing.push(DrawCommand::DrawLine {
            start: (x_start, flip(y)),
            end: (x_end, flip(y)),
            width: config.line_width,
        });
    }

    for mark in table.marks() {
        if !mark.position.is_finite() {
            debug!(label = %mark.label, "Skipping mark with undefined position");
            continue;
        }
        let line = &mark.style.line;
        let x = config.scale_origin_x + mark.position * config.scale_size_x;
        let base = (x, flip(config.scale_origin_y + line.base_offset));
        let tip = (x, flip(config.scale_origin_y + line.tip_offset));

        drawing.push(DrawCommand::DrawLine {
            start: base,
            end: tip,
            width: line.width,
        });

        if let Some(text) = &mark.style.text {
            drawing.push(DrawCommand::DrawText {
                content: mark.display_label(config.strip_zeros).to_string(),
                transform: vec![
                    TransformOp::Translate(tip.0, tip.1),
                    TransformOp::Rotate(-text.angle),
                    TransformOp::Translate(text.offset_x, -text.offset_y),
                ],
                style: TextStyle {
                    size: text.size,
                    anchor: text.anchor.clone(),
                    font: text.font.clone(),
                },
            });
        }
    }

    Ok(drawing)
}
