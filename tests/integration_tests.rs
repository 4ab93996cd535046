use sliderule::{ScaleConfig, ScaleError, ScaleType, SlideRuleScale, SpecTable};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const SPECS: &str = "test/scale/";
const SPARSE: &str = "test/sparse/";
const DRAW_STRAIGHT: &str = "test/draw_straight.csv";
const DRAW_CIRCULAR: &str = "test/draw_circular.csv";

/// Unique scratch path so parallel tests never share output files
fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sliderule-{}-{}", std::process::id(), name));
    let _ = fs::remove_file(&path);
    path
}

/// Helper function to run the sliderule binary
fn run_sliderule(args: &[&str]) -> Result<String, String> {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sliderule", "--"])
        .args(args)
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stderr).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn c_scale() -> SlideRuleScale {
    let mut scale = SlideRuleScale::from_dir(SPECS).expect("Failed to load test specs");
    scale
        .set_scale_type(ScaleConfig::new(ScaleType::Base))
        .expect("Failed to set scale");
    scale
}

#[test]
fn test_spec_directory_is_expanded() {
    let table = SpecTable::from_dir(Path::new(SPECS)).unwrap();
    assert_eq!(table.len(), 62);
    assert_eq!(table.bounds().len(), 3);

    let raws: Vec<f64> = table.marks().iter().map(|m| m.raw_value).collect();
    assert!(raws.windows(2).all(|w| w[0] < w[1]), "marks are not sorted");

    let mut keys: Vec<&str> = table.marks().iter().map(|m| m.key.as_str()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), table.len(), "duplicate keys");
}

#[test]
fn test_earlier_mold_rows_win() {
    let table = SpecTable::from_dir(Path::new(SPECS)).unwrap();

    let tenth = table.get("1.1").unwrap();
    assert_eq!(tenth.style.line.tip_offset, 4.5);
    assert!(tenth.style.text.is_some());

    let twentieth = table.get("1.05").unwrap();
    assert_eq!(twentieth.style.line.tip_offset, 3.0);
    assert!(twentieth.style.text.is_none());

    // interval 1 comes before interval 0.5 in 2-5.csv
    assert_eq!(table.get("3").unwrap().style.line.tip_offset, 6.0);
    assert_eq!(table.get("3.5").unwrap().style.line.tip_offset, 4.5);
    // base rows are never replaced by molds
    assert_eq!(table.get("2").unwrap().style.line.width, 0.35);
}

#[test]
fn test_one_offs_override() {
    let table = SpecTable::from_dir(Path::new(SPECS)).unwrap();

    let half = table.get("1.5").unwrap();
    assert_eq!(half.style.line.tip_offset, 5.5);
    assert_eq!(half.style.text.as_ref().unwrap().size, 3.0);

    let pi = table.get("3.14159").unwrap();
    assert_eq!(pi.label, "π");
    assert_eq!(pi.style.text.as_ref().unwrap().font, "serif");
}

#[test]
fn test_missing_mold_files_are_empty() {
    let table = SpecTable::from_dir(Path::new(SPARSE)).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.bounds()[0].file_name(), "1-10.csv");
}

#[test]
fn test_missing_core_is_fatal() {
    assert!(SpecTable::from_dir(Path::new("test/does-not-exist/")).is_err());
}

#[test]
fn test_c_scale_positions() {
    let scale = c_scale();
    let table = scale.table();
    assert_eq!(table.get("1").unwrap().position, 0.0);
    assert_eq!(table.get("10").unwrap().position, 1.0);
    assert!((table.get("2").unwrap().position - 2f64.log10()).abs() < 1e-10);
}

#[test]
fn test_setting_scale_twice_is_a_no_op() {
    let mut scale = c_scale();
    let before: Vec<f64> = scale.table().marks().iter().map(|m| m.position).collect();
    let err = scale
        .set_scale_type(ScaleConfig::new(ScaleType::Squares))
        .unwrap_err();
    assert_eq!(err, ScaleError::AlreadySet);
    let after: Vec<f64> = scale.table().marks().iter().map(|m| m.position).collect();
    assert_eq!(before, after);
}

#[test]
fn test_bounds_warning_for_off_scale_marks() {
    let mut scale = SlideRuleScale::from_dir(SPECS).unwrap();
    // 10 * 1.2 = 12 lands past the end of the scale
    let warnings = scale
        .set_scale_type(ScaleConfig::new(ScaleType::Base).with_factor(1.2))
        .unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].label, "10");
    assert!((warnings[0].amount - 1.2f64.log10()).abs() < 1e-9);
}

#[test]
fn test_draw_straight_svg() {
    let scale = c_scale();
    let output = scratch("straight.svg");
    let drawing = scale.draw_straight(&output, DRAW_STRAIGHT).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"width="300mm" height="40mm" viewBox="0 0 300 40""#));
    // baseline + mark line + one line per mark
    assert_eq!(count(&svg, "<line "), 2 + 62);
    assert_eq!(count(&svg, "<text "), drawing.texts().count());
    assert!(svg.contains(">π</text>"));
    let _ = fs::remove_file(output);
}

#[test]
fn test_draw_circular_svg() {
    let mut scale = c_scale();
    let output = scratch("circular.svg");
    scale.draw_circular(&output, DRAW_CIRCULAR).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(count(&svg, "<circle "), 3);
    // 1 and 10 meet at the top of the circle; 10 is kept
    assert_eq!(scale.table().len(), 61);
    assert!(scale.table().get("1").is_none());
    assert_eq!(count(&svg, "<line "), 2 + 61);
    let _ = fs::remove_file(output);
}

#[test]
fn test_draw_before_scale_is_set() {
    let mut scale = SlideRuleScale::from_dir(SPECS).unwrap();
    let output = scratch("unset.svg");

    let err = scale.draw_straight(&output, DRAW_STRAIGHT).unwrap_err();
    assert_eq!(err.downcast_ref::<ScaleError>(), Some(&ScaleError::NotSet));
    let err = scale.draw_circular(&output, DRAW_CIRCULAR).unwrap_err();
    assert_eq!(err.downcast_ref::<ScaleError>(), Some(&ScaleError::NotSet));
    assert!(!output.exists(), "no partial output expected");
}

#[test]
fn test_dump_csv_and_json() {
    let scale = c_scale();

    let csv_path = scratch("dump.csv");
    scale.dump(&csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 63);

    let json_path = scratch("dump.json");
    scale.dump(&json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 62);

    let _ = fs::remove_file(csv_path);
    let _ = fs::remove_file(json_path);
}

#[test]
fn test_end_to_end_cli_straight_with_preview() {
    let output = scratch("cli-straight.svg");
    let preview = scratch("cli-straight.png");
    let result = run_sliderule(&[
        "--specs",
        SPECS,
        "--scale",
        "c(factor: 1)",
        "straight",
        "--config",
        DRAW_STRAIGHT,
        "--output",
        output.to_str().unwrap(),
        "--preview",
        preview.to_str().unwrap(),
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(fs::read_to_string(&output).unwrap().contains("<svg"));
    let png = fs::read(&preview).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let _ = fs::remove_file(output);
    let _ = fs::remove_file(preview);
}

#[test]
fn test_end_to_end_cli_unknown_scale() {
    let output = scratch("cli-unknown.svg");
    let result = run_sliderule(&[
        "--specs",
        SPECS,
        "--scale",
        "q",
        "circular",
        "--config",
        DRAW_CIRCULAR,
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.is_err(), "Should have failed with unknown scale type");
    assert!(result.unwrap_err().contains("Unknown scale type"));
    assert!(!output.exists());
}

#[test]
fn test_end_to_end_cli_without_scale() {
    let output = scratch("cli-noscale.svg");
    let result = run_sliderule(&[
        "--specs",
        SPECS,
        "straight",
        "--config",
        DRAW_STRAIGHT,
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("scale type not set"));
}
