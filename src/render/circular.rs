use crate::config::CircularDrawConfig;
use crate::error::{ScaleError, ScaleResult};
use crate::ir::{DrawCommand, Drawing, TextStyle, TransformOp};
use crate::table::SpecTable;
use crate::transform::round_position;
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::debug;

/// Wrap every position into `[0, 1)` and collapse marks that now coincide,
/// keeping the last one. Positions are re-rounded after the modulo so
/// wrapped values compare equal to their unwrapped twins.
pub fn wrap_positions(table: &mut SpecTable) {
    for mark in table.marks_mut() {
        let wrapped = round_position(mark.position.rem_euclid(1.0));
        mark.position = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }
    table.collapse_duplicate_positions();
}

/// Lay the scale out around a full circle, position 0 at twelve o'clock and
/// increasing clockwise. Mutates `table` through [`wrap_positions`].
pub fn render_circular(table: &mut SpecTable, config: &CircularDrawConfig) -> ScaleResult<Drawing> {
    if !table.is_scale_set() {
        return Err(ScaleError::NotSet);
    }
    wrap_positions(table);

    let center = config.center();
    let half_mark = config.centermark_size / 2.0;
    let mut drawing = Drawing::new(config.paper_size, config.paper_size);

    for radius in [config.limit_radius, config.scale_radius, config.mark_radius] {
        drawing.push(DrawCommand::DrawCircle {
            center: (center, center),
            radius,
            width: config.line_width,
        });
    }
    drawing.push(DrawCommand::DrawLine {
        start: (center - half_mark, center),
        end: (center + half_mark, center),
        width: config.line_width,
    });
    drawing.push(DrawCommand::DrawLine {
        start: (center, center - half_mark),
        end: (center, center + half_mark),
        width: config.line_width,
    });

    // bottom-up polar to top-down cartesian
    let point = |radius: f64, theta: f64| {
        (
            radius * theta.cos() + center,
            config.paper_size - (radius * theta.sin() + center),
        )
    };

    for mark in table.marks() {
        if !mark.position.is_finite() {
            debug!(label = %mark.label, "Skipping mark with undefined position");
            continue;
        }
        let line = &mark.style.line;
        let theta = FRAC_PI_2 - mark.position * TAU;
        let base = point(config.scale_radius + line.base_offset, theta);
        let tip = point(config.scale_radius + line.tip_offset, theta);

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
                    TransformOp::Rotate(-theta.to_degrees() + 90.0),
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
