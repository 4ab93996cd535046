//! Graduation marks and the draw metadata carried by every spec row.

use crate::data::Row;
use crate::error::ScaleError;
use crate::key::position_key;
use serde::Serialize;

pub const COL_LINE_BASE: &str = "l_position_base";
pub const COL_LINE_TIP: &str = "l_position_tip";
pub const COL_LINE_WIDTH: &str = "l_width";
pub const COL_TEXT_SIZE: &str = "t_size";
pub const COL_TEXT_ANGLE: &str = "t_angle";
pub const COL_TEXT_X: &str = "t_position_x";
pub const COL_TEXT_Y: &str = "t_position_y";
pub const COL_TEXT_ANCHOR: &str = "t_anchor";
pub const COL_TEXT_FONT: &str = "t_font";

const TEXT_COLUMNS: [&str; 6] = [
    COL_TEXT_SIZE,
    COL_TEXT_ANGLE,
    COL_TEXT_X,
    COL_TEXT_Y,
    COL_TEXT_ANCHOR,
    COL_TEXT_FONT,
];

/// Offsets are measured perpendicular to the scale line (straight) or
/// radially from the scale circle (circular).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub base_offset: f64,
    pub tip_offset: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDecoration {
    pub size: f64,
    /// Degrees, counter-clockwise
    pub angle: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub anchor: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkStyle {
    pub line: LineStyle,
    /// `None` when any text column is empty: labels are all-or-nothing
    pub text: Option<TextDecoration>,
}

impl MarkStyle {
    pub fn from_row(row: &Row<'_>) -> Result<Self, ScaleError> {
        let line = LineStyle {
            base_offset: row.f64(COL_LINE_BASE)?,
            tip_offset: row.f64(COL_LINE_TIP)?,
            width: row.f64(COL_LINE_WIDTH)?,
        };

        let text = if TEXT_COLUMNS.iter().all(|c| row.get(c).is_some()) {
            Some(TextDecoration {
                size: row.f64(COL_TEXT_SIZE)?,
                angle: row.f64(COL_TEXT_ANGLE)?,
                offset_x: row.f64(COL_TEXT_X)?,
                offset_y: row.f64(COL_TEXT_Y)?,
                anchor: row.require(COL_TEXT_ANCHOR)?.to_string(),
                font: row.require(COL_TEXT_FONT)?.to_string(),
            })
        } else {
            None
        };

        Ok(Self { line, text })
    }
}

/// One graduation of the scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub key: String,
    pub label: String,
    pub raw_value: f64,
    /// Starts equal to `raw_value`; rewritten by the scale transform
    pub position: f64,
    pub style: MarkStyle,
}

impl Mark {
    /// A mark labelled with its own canonical key
    pub fn keyed(raw_value: f64, style: MarkStyle) -> Self {
        let key = position_key(raw_value);
        Self {
            label: key.clone(),
            key,
            raw_value,
            position: raw_value,
            style,
        }
    }

    pub fn labelled(raw_value: f64, label: impl Into<String>, style: MarkStyle) -> Self {
        Self {
            key: position_key(raw_value),
            label: label.into(),
            raw_value,
            position: raw_value,
            style,
        }
    }

    /// Label text as drawn: literal trailing `'0'` characters are removed
    /// when `strip_zeros` is set.
    pub fn display_label(&self, strip_zeros: bool) -> &str {
        if strip_zeros {
            self.label.trim_end_matches('0')
        } else {
            &self.label
        }
    }
}
