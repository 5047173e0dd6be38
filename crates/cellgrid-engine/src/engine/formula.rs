//! Formula evaluation stub.
//!
//! Only the shape `SUM(<ref>:<ref>)` is recognized and it always yields "0".
//! Everything else is left unevaluated (no cached value).

use regex::Regex;
use std::sync::LazyLock;

use super::cell_ref::CellRef;

static SUM_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*SUM\s*\(\s*([A-Z]+[0-9]+)\s*:\s*([A-Z]+[0-9]+)\s*\)\s*$")
        .expect("valid SUM regex")
});

/// Returns the cached display value for `expression`, if the stub knows it.
pub fn evaluate_stub(expression: &str) -> Option<String> {
    let caps = SUM_RANGE_RE.captures(expression)?;
    CellRef::parse(&caps[1])?;
    CellRef::parse(&caps[2])?;
    Some("0".to_string())
}
