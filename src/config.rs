//! Draw configurations, each read from a single-row CSV file.

use crate::error::ScaleError;
use anyhow::{Context, Result};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Layout of a straight scale. Vertical values are measured from the
/// bottom of the paper, in millimetres.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StraightDrawConfig {
    pub paper_size_x: f64,
    pub paper_size_y: f64,
    pub scale_size_x: f64,
    pub scale_origin_x: f64,
    pub scale_origin_y: f64,
    pub mark_origin_y: f64,
    pub line_width: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub strip_zeros: bool,
}

/// Layout of a full circular scale on square paper.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CircularDrawConfig {
    pub paper_size: f64,
    pub limit_radius: f64,
    pub scale_radius: f64,
    pub mark_radius: f64,
    pub centermark_size: f64,
    pub line_width: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub strip_zeros: bool,
}

impl CircularDrawConfig {
    pub fn center(&self) -> f64 {
        self.paper_size / 2.0
    }
}

/// Deserialize the first data row of a CSV source; further rows are ignored.
pub fn from_reader<T: DeserializeOwned, R: Read>(source: &str, reader: R) -> Result<T> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    match csv_reader.deserialize::<T>().next() {
        Some(row) => row.with_context(|| format!("Failed to parse draw config {}", source)),
        None => Err(ScaleError::EmptyTable(source.to_string()).into()),
    }
}

pub fn from_path<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open draw config {}", path.display()))?;
    from_reader(&path.display().to_string(), file)
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "1.0" => Ok(true),
        "false" | "0" | "no" | "0.0" | "" => Ok(false),
        other => Err(de::Error::custom(format!("invalid flag '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_config() {
        let csv = "paper_size_x,paper_size_y,scale_size_x,scale_origin_x,scale_origin_y,mark_origin_y,line_width,strip_zeros\n\
                   300,40,250,25,20,35,0.2,True\n";
        let config: StraightDrawConfig = from_reader("draw_straight.csv", csv.as_bytes()).unwrap();
        assert_eq!(config.paper_size_y, 40.0);
        assert_eq!(config.scale_size_x, 250.0);
        assert!(config.strip_zeros);
    }

    #[test]
    fn test_circular_config_without_flag() {
        let csv = "paper_size,limit_radius,scale_radius,mark_radius,centermark_size,line_width\n\
                   200,95,80,60,10,0.2\n";
        let config: CircularDrawConfig = from_reader("draw.csv", csv.as_bytes()).unwrap();
        assert_eq!(config.center(), 100.0);
        assert!(!config.strip_zeros);
    }

    #[test]
    fn test_numeric_flags() {
        let csv = "paper_size,limit_radius,scale_radius,mark_radius,centermark_size,line_width,strip_zeros\n\
                   200,95,80,60,10,0.2,0\n";
        let config: CircularDrawConfig = from_reader("draw.csv", csv.as_bytes()).unwrap();
        assert!(!config.strip_zeros);
    }

    #[test]
    fn test_missing_field_is_error() {
        let csv = "paper_size,limit_radius\n200,95\n";
        assert!(from_reader::<CircularDrawConfig, _>("draw.csv", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_config() {
        let csv = "paper_size,limit_radius,scale_radius,mark_radius,centermark_size,line_width\n";
        let err = from_reader::<CircularDrawConfig, _>("draw.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScaleError>(),
            Some(&ScaleError::EmptyTable("draw.csv".to_string()))
        );
    }
}
