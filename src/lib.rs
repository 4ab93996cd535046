// Library exports for sliderule

pub mod bounds;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod ir;
pub mod key;
pub mod logging;
pub mod mark;
pub mod mold;
pub mod parser;
pub mod render;
pub mod svg;
pub mod table;
pub mod transform;

pub use bounds::BoundWarning;
pub use error::{ScaleError, ScaleResult};
pub use ir::Drawing;
pub use mark::Mark;
pub use table::SpecTable;
pub use transform::{ScaleConfig, ScaleType};

use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DumpFormat {
    Csv,
    #[default]
    Json,
}

impl DumpFormat {
    /// `.csv` files get CSV, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DumpFormat::Csv,
            _ => DumpFormat::Json,
        }
    }
}

/// One slide rule scale: the mark table built from a spec directory plus
/// the operations that transform, draw and dump it.
#[derive(Debug, Clone)]
pub struct SlideRuleScale {
    table: SpecTable,
}

impl SlideRuleScale {
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            table: SpecTable::from_dir(dir.as_ref())?,
        })
    }

    pub fn from_table(table: SpecTable) -> Self {
        Self { table }
    }

    /// See [`SpecTable::set_scale_type`]
    pub fn set_scale_type(&mut self, config: ScaleConfig) -> ScaleResult<Vec<BoundWarning>> {
        self.table.set_scale_type(config)
    }

    pub fn draw_straight(
        &self,
        output: impl AsRef<Path>,
        draw_config: impl AsRef<Path>,
    ) -> Result<Drawing> {
        render::draw_straight(&self.table, output.as_ref(), draw_config.as_ref())
    }

    pub fn draw_circular(
        &mut self,
        output: impl AsRef<Path>,
        draw_config: impl AsRef<Path>,
    ) -> Result<Drawing> {
        render::draw_circular(&mut self.table, output.as_ref(), draw_config.as_ref())
    }

    pub fn dump(&self, output: impl AsRef<Path>) -> Result<()> {
        let output = output.as_ref();
        self.table.dump(output, DumpFormat::from_path(output))
    }

    pub fn table(&self) -> &SpecTable {
        &self.table
    }
}
