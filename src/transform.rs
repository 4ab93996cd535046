//! Scale transforms: map represented values onto normalized positions.
//!
//! Every scale type applies its own mapping `f`, multiplies by the
//! positioning factor either before or after `f`, and then takes the
//! logarithm in `log_base`. The result is rounded to ten decimals so that
//! coincident marks compare equal later on.

use crate::error::{ScaleError, ScaleResult};
use crate::mark::Mark;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Decimal digits kept after the log step.
pub const POSITION_DECIMALS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleType {
    /// C, D: identity
    Base,
    /// A, B: square root
    Squares,
    /// K: cube root
    Cubes,
    /// ST, S&T, S,T: degrees to radians
    SmallAngle,
    /// S: sine of degrees
    Sine,
    /// T: tangent of degrees
    Tangent,
    /// P: sqrt(1 - x²)
    Pythagorean,
    /// L, Lg, M: `log_base` raised to x
    Linear,
}

/// Whether the positioning factor is applied before or after the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reposition {
    Before,
    After,
}

impl ScaleType {
    pub fn reposition(self) -> Reposition {
        match self {
            ScaleType::Base | ScaleType::Squares | ScaleType::Cubes | ScaleType::Linear => {
                Reposition::Before
            }
            ScaleType::SmallAngle
            | ScaleType::Sine
            | ScaleType::Tangent
            | ScaleType::Pythagorean => Reposition::After,
        }
    }

    pub fn map(self, x: f64, log_base: f64) -> f64 {
        match self {
            ScaleType::Base => x,
            ScaleType::Squares => x.sqrt(),
            ScaleType::Cubes => x.cbrt(),
            ScaleType::SmallAngle => x.to_radians(),
            ScaleType::Sine => x.to_radians().sin(),
            ScaleType::Tangent => x.to_radians().tan(),
            ScaleType::Pythagorean => (1.0 - x * x).sqrt(),
            ScaleType::Linear => log_base.powf(x),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScaleType::Base => "C or D, base scale",
            ScaleType::Squares => "A or B, squares scale",
            ScaleType::Cubes => "K, cubes scale",
            ScaleType::SmallAngle => "ST or S,T or S&T, small sines and tangents scale",
            ScaleType::Sine => "S, sine scale",
            ScaleType::Tangent => "T, tangent scale",
            ScaleType::Pythagorean => "P, Pythagorean scale",
            ScaleType::Linear => "L or Lg or M, linear or mantissa scale",
        }
    }
}

impl FromStr for ScaleType {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "d" => Ok(ScaleType::Base),
            "a" | "b" => Ok(ScaleType::Squares),
            "k" => Ok(ScaleType::Cubes),
            "st" | "s,t" | "s&t" => Ok(ScaleType::SmallAngle),
            "s" => Ok(ScaleType::Sine),
            "t" => Ok(ScaleType::Tangent),
            "p" => Ok(ScaleType::Pythagorean),
            "l" | "lg" | "m" => Ok(ScaleType::Linear),
            _ => Err(ScaleError::UnknownScaleType(s.to_string())),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleType::Base => "C",
            ScaleType::Squares => "A",
            ScaleType::Cubes => "K",
            ScaleType::SmallAngle => "ST",
            ScaleType::Sine => "S",
            ScaleType::Tangent => "T",
            ScaleType::Pythagorean => "P",
            ScaleType::Linear => "L",
        };
        f.write_str(name)
    }
}

/// Transform parameters, bound once to a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    pub scale_type: ScaleType,
    pub invert: bool,
    /// Usually the lower bound of the base table, e.g. 0.1 for a scale
    /// running from 1 to 10 on a 0.1..1 base
    pub positioning_factor: f64,
    pub log_base: f64,
}

impl ScaleConfig {
    pub fn new(scale_type: ScaleType) -> Self {
        Self {
            scale_type,
            invert: false,
            positioning_factor: 1.0,
            log_base: 10.0,
        }
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.positioning_factor = factor;
        self
    }

    pub fn with_log_base(mut self, log_base: f64) -> Self {
        self.log_base = log_base;
        self
    }

    fn validate(&self) -> ScaleResult<()> {
        if !(self.log_base.is_finite() && self.log_base > 0.0 && self.log_base != 1.0) {
            return Err(ScaleError::InvalidParameter {
                name: "log base".to_string(),
                value: self.log_base,
            });
        }
        if !self.positioning_factor.is_finite() || self.positioning_factor == 0.0 {
            return Err(ScaleError::InvalidParameter {
                name: "positioning factor".to_string(),
                value: self.positioning_factor,
            });
        }
        Ok(())
    }

    /// Final position for one value: reposition, map, log, round, invert.
    pub fn position_of(&self, raw: f64) -> f64 {
        let factor = self.positioning_factor;
        let mapped = match self.scale_type.reposition() {
            Reposition::Before => self.scale_type.map(raw * factor, self.log_base),
            Reposition::After => self.scale_type.map(raw, self.log_base) * factor,
        };
        let position = round_position(mapped.ln() / self.log_base.ln());
        if self.invert {
            1.0 - position
        } else {
            position
        }
    }
}

impl FromStr for ScaleConfig {
    type Err = anyhow::Error;

    /// Accepts the expression grammar of [`crate::parser::parse_scale_config`],
    /// e.g. `c(factor: 0.1, invert: true)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_scale_config(s)
    }
}

pub fn round_position(value: f64) -> f64 {
    let scale = 10f64.powi(POSITION_DECIMALS);
    (value * scale).round() / scale
}

/// Rewrite `position` of every mark from its current value.
pub fn apply(marks: &mut [Mark], config: &ScaleConfig) -> ScaleResult<()> {
    config.validate()?;

    info!("Setting scale");
    info!("Scale: {}", config.scale_type.description());
    for mark in marks.iter_mut() {
        mark.position = config.position_of(mark.position);
    }
    info!("Log base: {}", config.log_base);
    if config.invert {
        info!("Inverted scale");
    }
    Ok(())
}
