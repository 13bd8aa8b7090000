//! Text formats for line and transformation descriptions.
//!
//! Line files are a tiny PostScript subset:
//!
//! ```text
//! %%%BEGIN
//! 10 10 90 40 Line
//! 90 40 50 90 Line
//! %%%END
//! ```
//!
//! Transformation files list one operation per keyword:
//!
//! ```text
//! t 10 -5          translate by (10, -5)
//! r 50 50 90       rotate 90 degrees about (50, 50)
//! s 0 0 1.5 2      scale by (1.5, 2) about (0, 0)
//! ```
//!
//! Both formats are whitespace separated; tokens that are not keywords or
//! operands are skipped.

use log::debug;

use crate::basics::{iround, Line, Point};
use crate::error::ParseError;
use crate::trans_affine::AffineOp;

const BLOCK_BEGIN: &str = "%%%BEGIN";
const BLOCK_END: &str = "%%%END";
const LINE_KEYWORD: &str = "Line";

/// A token and the 1-based line it was found on.
type Token<'a> = (&'a str, usize);

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.lines()
        .enumerate()
        .flat_map(|(n, l)| l.split_whitespace().map(move |t| (t, n + 1)))
        .collect()
}

/// Tokens between `%%%BEGIN` and `%%%END`, or all tokens when there is no
/// block.
fn block_tokens(text: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let tokens = tokenize(text);
    let Some(begin) = tokens.iter().position(|&(t, _)| t == BLOCK_BEGIN) else {
        return Ok(tokens);
    };
    let len = tokens[begin + 1..]
        .iter()
        .position(|&(t, _)| t == BLOCK_END)
        .ok_or(ParseError::UnterminatedBlock)?;
    Ok(tokens[begin + 1..begin + 1 + len].to_vec())
}

fn parse_int((token, line): Token<'_>) -> Result<i32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        line,
    })
}

fn parse_float((token, line): Token<'_>) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            token: token.to_string(),
            line,
        }),
    }
}

/// Integer operand given as a float, rounded to the nearest integer.
fn parse_coord(token: Token<'_>) -> Result<i32, ParseError> {
    let v = parse_float(token)?;
    if v < i32::MIN as f64 || v > i32::MAX as f64 {
        return Err(ParseError::InvalidNumber {
            token: token.0.to_string(),
            line: token.1,
        });
    }
    Ok(iround(v))
}

// ============================================================================
// Lines
// ============================================================================

/// Parse every `x1 y1 x2 y2 Line` statement in `text`.
pub fn parse_lines(text: &str) -> Result<Vec<Line>, ParseError> {
    let tokens = block_tokens(text)?;
    let mut lines = Vec::new();

    for (i, &(token, line_no)) in tokens.iter().enumerate() {
        if token != LINE_KEYWORD {
            continue;
        }
        let operands = &tokens[i.saturating_sub(4)..i];
        if operands.len() < 4 || operands.iter().any(|&(t, _)| t == LINE_KEYWORD) {
            return Err(ParseError::MissingOperands {
                op: LINE_KEYWORD.to_string(),
                line: line_no,
            });
        }
        lines.push(Line::from_coords(
            parse_int(operands[0])?,
            parse_int(operands[1])?,
            parse_int(operands[2])?,
            parse_int(operands[3])?,
        ));
    }

    debug!("parsed {} line(s)", lines.len());
    Ok(lines)
}

// ============================================================================
// Transformations
// ============================================================================

/// Parse the `t`, `r` and `s` operations in `text`, in order.
pub fn parse_transforms(text: &str) -> Result<Vec<AffineOp>, ParseError> {
    let tokens = tokenize(text);
    let mut ops = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let (keyword, line) = tokens[i];
        let arity = match keyword {
            "t" => 2,
            "r" => 3,
            "s" => 4,
            _ => {
                debug!("skipping token {:?} on line {}", keyword, line);
                i += 1;
                continue;
            }
        };
        let args = tokens
            .get(i + 1..i + 1 + arity)
            .ok_or_else(|| ParseError::MissingOperands {
                op: keyword.to_string(),
                line,
            })?;

        let op = match keyword {
            "t" => AffineOp::Translate {
                dx: parse_coord(args[0])?,
                dy: parse_coord(args[1])?,
            },
            "r" => AffineOp::Rotate {
                pivot: Point::new(parse_coord(args[0])?, parse_coord(args[1])?),
                degrees: parse_float(args[2])?,
            },
            _ => AffineOp::Scale {
                pivot: Point::new(parse_coord(args[0])?, parse_coord(args[1])?),
                sx: parse_float(args[2])?,
                sy: parse_float(args[3])?,
            },
        };
        ops.push(op);
        i += 1 + arity;
    }

    debug!("parsed {} transformation(s)", ops.len());
    Ok(ops)
}

// ============================================================================
// Tests
// ============================================================================
