//! Expansion of a mold (interval + draw metadata) into evenly spaced marks.

use crate::mark::{Mark, MarkStyle};

/// Lazily yields marks at `lower + interval`, `lower + 2 * interval`, ...
/// while the running value stays below `upper`. The value is accumulated by
/// repeated addition, so drift is possible and left to the canonical key to
/// absorb.
#[derive(Debug, Clone)]
pub struct MoldExpander<'a> {
    next: f64,
    upper: f64,
    interval: f64,
    template: &'a MarkStyle,
}

impl<'a> MoldExpander<'a> {
    /// A non-positive or non-finite interval yields nothing.
    pub fn new(lower: f64, upper: f64, interval: f64, template: &'a MarkStyle) -> Self {
        let interval = if interval.is_finite() && interval > 0.0 {
            interval
        } else {
            f64::NAN
        };
        Self {
            next: lower + interval,
            upper,
            interval,
            template,
        }
    }
}

impl Iterator for MoldExpander<'_> {
    type Item = Mark;

    fn next(&mut self) -> Option<Mark> {
        if self.next.is_nan() || self.next >= self.upper {
            return None;
        }
        let mark = Mark::keyed(self.next, self.template.clone());
        self.next += self.interval;
        Some(mark)
    }
}

/// Expand one mold over a bound segment.
pub fn expand(lower: f64, upper: f64, interval: f64, template: &MarkStyle) -> MoldExpander<'_> {
    MoldExpander::new(lower, upper, interval, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::LineStyle;

    fn template() -> MarkStyle {
        MarkStyle {
            line: LineStyle {
                base_offset: 0.0,
                tip_offset: 3.0,
                width: 0.2,
            },
            text: None,
        }
    }

    #[test]
    fn test_quarter_steps_exclude_upper_bound() {
        let style = template();
        let marks: Vec<Mark> = expand(0.0, 1.0, 0.25, &style).collect();
        let raws: Vec<f64> = marks.iter().map(|m| m.raw_value).collect();
        assert_eq!(raws, vec![0.25, 0.5, 0.75]);
        let keys: Vec<&str> = marks.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["0.25", "0.5", "0.75"]);
    }

    #[test]
    fn test_lower_bound_is_not_emitted() {
        let style = template();
        let first = expand(1.0, 2.0, 0.5, &style).next().unwrap();
        assert_eq!(first.raw_value, 1.5);
    }

    #[test]
    fn test_marks_copy_template() {
        let style = template();
        assert!(expand(1.0, 2.0, 0.1, &style).all(|m| m.style == style));
    }

    #[test]
    fn test_drift_is_absorbed_by_keys() {
        let style = template();
        let keys: Vec<String> = expand(1.0, 2.0, 0.1, &style).map(|m| m.key).collect();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys[2], "1.3");
        assert_eq!(keys[8], "1.9");
    }

    #[test]
    fn test_degenerate_intervals_yield_nothing() {
        let style = template();
        assert_eq!(expand(0.0, 1.0, 0.0, &style).count(), 0);
        assert_eq!(expand(0.0, 1.0, -0.5, &style).count(), 0);
        assert_eq!(expand(0.0, 1.0, 2.0, &style).count(), 0);
    }

    #[test]
    fn test_ascending_order() {
        let style = template();
        let raws: Vec<f64> = expand(0.0, 10.0, 0.3, &style).map(|m| m.raw_value).collect();
        assert!(raws.windows(2).all(|w| w[0] < w[1]));
    }
}
