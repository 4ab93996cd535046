use crate::parser::lexer::{bool_literal, number_literal, scale_name, ws};
use crate::transform::{ScaleConfig, ScaleType};
use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, opt},
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScaleArg {
    Factor(f64),
    Invert(bool),
    Base(f64),
}

fn parse_scale_arg(input: &str) -> IResult<&str, ScaleArg> {
    alt((
        map(preceded(ws(tag("factor:")), ws(number_literal)), ScaleArg::Factor),
        map(preceded(ws(tag("invert:")), ws(bool_literal)), ScaleArg::Invert),
        map(preceded(ws(tag("base:")), ws(number_literal)), ScaleArg::Base),
    ))(input)
}

fn parse_scale_expr(input: &str) -> IResult<&str, (&str, Vec<ScaleArg>)> {
    let (input, name) = ws(scale_name)(input)?;
    let (input, args) = opt(delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), parse_scale_arg),
        ws(char(')')),
    ))(input)?;
    Ok((input, (name, args.unwrap_or_default())))
}

/// Parse a complete scale expression into a config. Unknown scale types
/// surface as [`crate::error::ScaleError::UnknownScaleType`].
pub fn parse_scale_config(input: &str) -> Result<ScaleConfig> {
    let (_, (name, args)) = all_consuming(parse_scale_expr)(input)
        .map_err(|e| anyhow!("Invalid scale expression '{}': {}", input, e))?;

    let scale_type: ScaleType = name.parse()?;
    let mut config = ScaleConfig::new(scale_type);
    for arg in args {
        config = match arg {
            ScaleArg::Factor(f) => config.with_factor(f),
            ScaleArg::Invert(b) => config.inverted(b),
            ScaleArg::Base(b) => config.with_log_base(b),
        };
    }
    Ok(config)
}
