//! The ordered, deduplicated table of marks that makes up one scale.

use crate::bounds::{self, BoundWarning};
use crate::data::SpecData;
use crate::error::{ScaleError, ScaleResult};
use crate::mark::{self, Mark, MarkStyle};
use crate::mold;
use crate::transform::{self, ScaleConfig};
use crate::DumpFormat;
use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

pub const BASE_FILE: &str = "Core.csv";
pub const ONE_OFFS_FILE: &str = "one-offs.csv";
pub const COL_NAME: &str = "name";
pub const COL_INTERVAL: &str = "interval";
pub const COL_POSITION: &str = "position";

/// Range between two consecutive base rows. The names are kept exactly as
/// written in the base table because they also name the mold file.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSegment {
    pub lower_name: String,
    pub upper_name: String,
    pub lower: f64,
    pub upper: f64,
}

impl BoundSegment {
    pub fn file_name(&self) -> String {
        format!("{}-{}.csv", self.lower_name, self.upper_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    marks: Vec<Mark>,
    index: HashMap<String, usize>,
    bounds: Vec<BoundSegment>,
    scale: Option<ScaleConfig>,
}

impl SpecTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a spec directory: `Core.csv`, one mold file per
    /// bound segment and an optional `one-offs.csv`. Missing mold and
    /// one-off files count as empty.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        info!(dir = %dir.display(), "Importing scale specs");

        let base = SpecData::from_path(&dir.join(BASE_FILE))?;
        let mut table = Self::new();
        table.load_base(&base)?;

        for segment in table.bounds.clone() {
            info!("Working from {} to {}", segment.lower_name, segment.upper_name);
            let path = dir.join(segment.file_name());
            match SpecData::from_optional_path(&path)? {
                Some(molds) => {
                    let added = table.apply_molds(&segment, &molds)?;
                    debug!(file = %path.display(), added, "Expanded molds");
                }
                None => warn!(file = %path.display(), "File not found, empty mold assumed"),
            }
        }

        info!("Editing one-offs and post processing");
        let path = dir.join(ONE_OFFS_FILE);
        match SpecData::from_optional_path(&path)? {
            Some(one_offs) => table.apply_one_offs(&one_offs)?,
            None => warn!(file = %path.display(), "File not found, no one-offs assumed"),
        }

        table.finalize();
        Ok(table)
    }

    /// Ingest the base rows. Each row becomes a mark at its canonical key and
    /// every consecutive pair of rows defines a bound segment.
    pub fn load_base(&mut self, data: &SpecData) -> ScaleResult<()> {
        data.require_column(COL_NAME)?;
        let mut previous: Option<(String, f64)> = None;

        for row in data.iter_rows() {
            let name = row.require(COL_NAME)?.to_string();
            let raw = row.f64(COL_NAME)?;
            self.upsert(Mark::keyed(raw, MarkStyle::from_row(&row)?));

            if let Some((lower_name, lower)) = previous.take() {
                self.bounds.push(BoundSegment {
                    lower_name,
                    upper_name: name.clone(),
                    lower,
                    upper: raw,
                });
            }
            previous = Some((name, raw));
        }
        Ok(())
    }

    /// Expand every mold row of one bound segment, in file order. A mold
    /// never overwrites a mark that is already present, so earlier rows and
    /// base rows take precedence. Returns the number of marks added.
    pub fn apply_molds(&mut self, segment: &BoundSegment, molds: &SpecData) -> ScaleResult<usize> {
        if molds.is_empty() {
            return Ok(0);
        }
        molds.require_column(COL_INTERVAL)?;

        let mut added = 0;
        for row in molds.iter_rows() {
            let interval = row.f64(COL_INTERVAL)?;
            let style = MarkStyle::from_row(&row)?;
            for mark in mold::expand(segment.lower, segment.upper, interval, &style) {
                if self.insert_if_absent(mark) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Insert unconditionally, replacing any mark with the same key.
    /// One-offs may carry a `position` column with the raw value, in which
    /// case `name` is only the label.
    pub fn apply_one_offs(&mut self, data: &SpecData) -> ScaleResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        data.require_column(COL_NAME)?;

        for row in data.iter_rows() {
            let label = row.require(COL_NAME)?;
            let raw = match row.opt_f64(COL_POSITION)? {
                Some(raw) => raw,
                None => row.f64(COL_NAME)?,
            };
            self.upsert(Mark::labelled(raw, label, MarkStyle::from_row(&row)?));
        }
        Ok(())
    }

    /// Returns `false` and drops `mark` when its key is already taken.
    pub fn insert_if_absent(&mut self, mark: Mark) -> bool {
        if self.index.contains_key(&mark.key) {
            return false;
        }
        self.index.insert(mark.key.clone(), self.marks.len());
        self.marks.push(mark);
        true
    }

    pub fn upsert(&mut self, mark: Mark) {
        match self.index.get(&mark.key) {
            Some(&i) => self.marks[i] = mark,
            None => {
                self.index.insert(mark.key.clone(), self.marks.len());
                self.marks.push(mark);
            }
        }
    }

    /// Sort by position (stable) and collapse equal positions, keeping the
    /// last one.
    pub fn finalize(&mut self) {
        self.marks.sort_by(|a, b| a.position.total_cmp(&b.position));
        self.collapse_duplicate_positions();
    }

    /// Drop every mark whose position equals that of a later mark. Survivors
    /// keep their relative order.
    pub fn collapse_duplicate_positions(&mut self) {
        let mut seen = HashSet::new();
        let mut kept: Vec<Mark> = Vec::with_capacity(self.marks.len());
        for mark in self.marks.drain(..).rev() {
            // +0.0 folds -0.0 into 0.0
            if seen.insert((mark.position + 0.0).to_bits()) {
                kept.push(mark);
            }
        }
        kept.reverse();
        self.marks = kept;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .marks
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key.clone(), i))
            .collect();
    }

    /// Apply the scale transform, re-sort and collapse marks whose rounded
    /// positions now coincide, then report marks outside `[0, 1]`.
    /// Only the first call has an effect; later calls return
    /// [`ScaleError::AlreadySet`].
    pub fn set_scale_type(&mut self, config: ScaleConfig) -> ScaleResult<Vec<BoundWarning>> {
        if self.scale.is_some() {
            return Err(ScaleError::AlreadySet);
        }
        transform::apply(&mut self.marks, &config)?;
        self.scale = Some(config);
        self.finalize();

        let warnings = bounds::check(&self.marks);
        bounds::log_warnings(&self.marks, &warnings);
        Ok(warnings)
    }

    pub fn scale(&self) -> Option<&ScaleConfig> {
        self.scale.as_ref()
    }

    pub fn is_scale_set(&self) -> bool {
        self.scale.is_some()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub(crate) fn marks_mut(&mut self) -> &mut [Mark] {
        &mut self.marks
    }

    pub fn get(&self, key: &str) -> Option<&Mark> {
        self.index.get(key).map(|&i| &self.marks[i])
    }

    pub fn bounds(&self) -> &[BoundSegment] {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Write every mark, with its metadata, to `path`.
    pub fn dump(&self, path: &Path, format: DumpFormat) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        match format {
            DumpFormat::Csv => self.write_csv(file),
            DumpFormat::Json => {
                serde_json::to_writer_pretty(file, &self.marks).context("Failed to write JSON dump")
            }
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record([
            "key",
            COL_NAME,
            "raw_value",
            COL_POSITION,
            mark::COL_LINE_BASE,
            mark::COL_LINE_TIP,
            mark::COL_LINE_WIDTH,
            mark::COL_TEXT_SIZE,
            mark::COL_TEXT_ANGLE,
            mark::COL_TEXT_X,
            mark::COL_TEXT_Y,
            mark::COL_TEXT_ANCHOR,
            mark::COL_TEXT_FONT,
        ])?;

        for m in &self.marks {
            let line = &m.style.line;
            let mut record = vec![
                m.key.clone(),
                m.label.clone(),
                m.raw_value.to_string(),
                m.position.to_string(),
                line.base_offset.to_string(),
                line.tip_offset.to_string(),
                line.width.to_string(),
            ];
            match &m.style.text {
                Some(t) => record.extend([
                    t.size.to_string(),
                    t.angle.to_string(),
                    t.offset_x.to_string(),
                    t.offset_y.to_string(),
                    t.anchor.clone(),
                    t.font.clone(),
                ]),
                None => record.extend(std::iter::repeat(String::new()).take(6)),
            }
            out.write_record(&record)?;
        }
        out.flush().context("Failed to flush CSV dump")?;
        Ok(())
    }
}
