//! Diagnostics for marks that land outside `[0, 1]` after the transform.

use crate::mark::Mark;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Excess {
    UnderMinimum,
    OverMaximum,
}

/// A bound mark (the lowest or highest position) that falls off the scale.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundWarning {
    pub side: BoundSide,
    pub label: String,
    pub direction: Excess,
    pub amount: f64,
}

impl fmt::Display for BoundWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            BoundSide::Lower => "lower",
            BoundSide::Upper => "upper",
        };
        let direction = match self.direction {
            Excess::UnderMinimum => "under the minimum",
            Excess::OverMaximum => "over the maximum",
        };
        write!(
            f,
            "Unexpected {} bound of value {} located {} by {}",
            side, self.label, direction, self.amount
        )
    }
}

/// Inspect the minimum and maximum positions. NaN positions are skipped,
/// infinite ones count as extremes; ties go to the first mark in table order.
pub fn check(marks: &[Mark]) -> Vec<BoundWarning> {
    let mut lowest: Option<&Mark> = None;
    let mut highest: Option<&Mark> = None;
    for mark in marks.iter().filter(|m| !m.position.is_nan()) {
        if lowest.map_or(true, |l| mark.position < l.position) {
            lowest = Some(mark);
        }
        if highest.map_or(true, |h| mark.position > h.position) {
            highest = Some(mark);
        }
    }

    [(BoundSide::Lower, lowest), (BoundSide::Upper, highest)]
        .into_iter()
        .filter_map(|(side, mark)| {
            let mark = mark?;
            let (direction, amount) = if mark.position < 0.0 {
                (Excess::UnderMinimum, -mark.position)
            } else if mark.position > 1.0 {
                (Excess::OverMaximum, mark.position - 1.0)
            } else {
                return None;
            };
            Some(BoundWarning {
                side,
                label: mark.label.clone(),
                direction,
                amount,
            })
        })
        .collect()
}

pub fn count_non_finite(marks: &[Mark]) -> usize {
    marks.iter().filter(|m| !m.position.is_finite()).count()
}

pub fn log_warnings(marks: &[Mark], warnings: &[BoundWarning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
    let non_finite = count_non_finite(marks);
    if non_finite > 0 {
        warn!(count = non_finite, "Marks with undefined position after transform");
    }
    if warnings.is_empty() {
        info!("Bounds OK");
    }
}
