// Scale renderers: turn a transformed SpecTable into a vector Drawing.

pub mod circular;
pub mod straight;

pub use circular::render_circular;
pub use straight::render_straight;

use crate::config;
use crate::error::ScaleError;
use crate::ir::Drawing;
use crate::svg;
use crate::table::SpecTable;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Read the straight draw config, render and save the SVG.
/// Nothing is read or written when the scale type is not set.
pub fn draw_straight(table: &SpecTable, output: &Path, draw_config: &Path) -> Result<Drawing> {
    if !table.is_scale_set() {
        return Err(ScaleError::NotSet.into());
    }
    info!("Drawing straight scale");
    let config = config::from_path(draw_config)?;
    let drawing = render_straight(table, &config)?;
    svg::save(&drawing, output)?;
    Ok(drawing)
}

/// Read the circular draw config, render and save the SVG. Wraps the
/// table's positions into `[0, 1)` as a side effect.
pub fn draw_circular(table: &mut SpecTable, output: &Path, draw_config: &Path) -> Result<Drawing> {
    if !table.is_scale_set() {
        return Err(ScaleError::NotSet.into());
    }
    info!("Drawing circular scale");
    let config = config::from_path(draw_config)?;
    let drawing = render_circular(table, &config)?;
    svg::save(&drawing, output)?;
    Ok(drawing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sliderule_render_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_unset_scale_checked_before_config() {
        let mut table = SpecTable::new();
        let missing_config = scratch("no_such_config.csv");
        let output = scratch("unset.svg");

        let err = draw_straight(&table, &output, &missing_config).unwrap_err();
        assert_eq!(err.downcast_ref::<ScaleError>(), Some(&ScaleError::NotSet));

        let err = draw_circular(&mut table, &output, &missing_config).unwrap_err();
        assert_eq!(err.downcast_ref::<ScaleError>(), Some(&ScaleError::NotSet));
        assert!(!output.exists());
    }
}
