//! Player table schema: canonical column names and header normalization.

use polars::prelude::*;

pub const PLAYER: &str = "player";
pub const SENSITIVITY: &str = "sensitivity";
pub const DPI: &str = "dpi";
pub const CM_PER_360: &str = "cmper360";
pub const MOUSE_MODEL: &str = "mousemodel";
pub const ROLE: &str = "role";
pub const MOUSE_WEIGHT: &str = "mouseweight";

/// Canonical form of a header label: surrounding whitespace removed, lowercase.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Rewrite every column label to its canonical form. Row values are untouched.
///
/// Fails when two labels collapse to the same canonical name (e.g. `"DPI"`
/// and `" dpi"`), since a DataFrame cannot hold duplicate columns.
pub fn normalize_column_names(df: &mut DataFrame) -> PolarsResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| canonical_name(name.as_str()))
        .collect();
    df.set_column_names(names)
}

/// Strip surrounding whitespace from every text cell.
///
/// Delimiters followed by spaces (`A, 4.0, 800`) make the CSV reader infer
/// text columns; trimmed, their cells cast to numbers like unpadded ones.
pub fn trim_text_values(df: DataFrame) -> PolarsResult<DataFrame> {
    let text: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| col(column.name().clone()).str().strip_chars(lit(Null {})))
        .collect();
    if text.is_empty() {
        return Ok(df);
    }
    df.lazy().with_columns(text).collect()
}

/// Get list of column names from a DataFrame.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}
