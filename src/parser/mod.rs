// Scale expression parser used by the command line.
//
//   expr := TYPE [ "(" arg ("," arg)* ")" ]
//   arg  := "factor:" NUM | "invert:" BOOL | "base:" NUM
//
// e.g. `c(factor: 0.01)`, `s,t(invert: true, factor: 100)`

pub mod lexer;
pub mod scale;

pub use scale::parse_scale_config;
