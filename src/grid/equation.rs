//! Canonical `y = mx + b` text forms
//!
//! `parse` accepts what the question bank writes; `format` is its canonical
//! inverse, used at most once per question for the answer reveal. Malformed
//! text is a content defect and surfaces as a typed error, never a guessed
//! default.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::line::LineEquation;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquationParseError {
    #[error("not a slope-intercept equation: {0:?}")]
    Malformed(String),
    #[error("empty equation at position {0} in list")]
    EmptyItem(usize),
}

// Whitespace is stripped before matching. Group 1 is the slope coefficient
// (may be empty or a bare sign), group 2 the signed intercept.
static EQUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^y=([+-]?(?:\d+(?:\.\d+)?)?)x(?:([+-]\d+(?:\.\d+)?))?$").unwrap()
});

/// Parse one equation of the form `y = mx + b`.
///
/// The slope coefficient may be implicit (`y=x-3` is slope 1, `y=-x+4` is
/// slope -1) and the intercept may be absent (zero). Whitespace and an
/// explicit leading `+` are tolerated.
pub fn parse(text: &str) -> Result<LineEquation, EquationParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = EQUATION_RE
        .captures(&compact)
        .ok_or_else(|| EquationParseError::Malformed(text.to_string()))?;

    let slope = match caps.get(1).map_or("", |m| m.as_str()) {
        "" | "+" => 1.0,
        "-" => -1.0,
        digits => digits
            .parse::<f32>()
            .map_err(|_| EquationParseError::Malformed(text.to_string()))?,
    };
    let intercept = match caps.get(2) {
        None => 0.0,
        Some(m) => m
            .as_str()
            .parse::<f32>()
            .map_err(|_| EquationParseError::Malformed(text.to_string()))?,
    };
    Ok(LineEquation::new(slope, intercept))
}

/// Parse a comma-separated list of equations. Empty items are errors, not
/// silently skipped.
pub fn parse_list(csv: &str) -> Result<Vec<LineEquation>, EquationParseError> {
    csv.split(',')
        .enumerate()
        .map(|(i, item)| {
            let item = item.trim();
            if item.is_empty() {
                return Err(EquationParseError::EmptyItem(i));
            }
            parse(item)
        })
        .collect()
}

/// Canonical text for a line, the inverse of [`parse`].
///
/// A slope of exactly 1 or -1 elides the coefficient (`x` / `-x`); zero
/// slope stays visible as `0x`; a zero intercept is still written `+ 0`,
/// which reads better on a reveal than a bare `y = 2x`.
pub fn format(line: LineEquation) -> String {
    let slope = if line.slope == 1.0 {
        "x".to_string()
    } else if line.slope == -1.0 {
        "-x".to_string()
    } else {
        format!("{}x", fmt_num(line.slope))
    };
    let (sign, magnitude) = if line.intercept < 0.0 {
        ('-', -line.intercept)
    } else {
        ('+', line.intercept)
    };
    format!("y = {slope} {sign} {}", fmt_num(magnitude))
}

/// Render without a trailing `.0` for whole values
fn fmt_num(v: f32) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Order-independent equation-set comparison.
///
/// True iff the slices have equal length and pair off one-to-one with both
/// slope and intercept within `epsilon`. Greedy first-fit matching is enough
/// here: valid question content never contains two near-equal expected
/// equations, so a greedy assignment cannot steal a later element's only
/// match.
pub fn equations_match_unordered(
    actual: &[LineEquation],
    expected: &[LineEquation],
    epsilon: f32,
) -> bool {
    if actual.len() != expected.len() {
        return false;
    }
    let mut used = vec![false; expected.len()];
    'outer: for line in actual {
        for (i, candidate) in expected.iter().enumerate() {
            if used[i] {
                continue;
            }
            if (line.slope - candidate.slope).abs() < epsilon
                && (line.intercept - candidate.intercept).abs() < epsilon
            {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}
