//! Player lookup: sorted distinct names and the rows behind a selected name.

use crate::data::schema::PLAYER;
use crate::stats::{require_column, AnalysisError};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Distinct non-missing player names in ascending lexical order.
pub fn player_names(players: &DataFrame) -> Result<Vec<String>, AnalysisError> {
    let names = require_column(players, PLAYER)?.cast(&DataType::String)?;
    let unique: BTreeSet<String> = names
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(unique.into_iter().collect())
}

/// Every row whose player name equals `name` exactly, duplicates included.
pub fn player_rows(players: &DataFrame, name: &str) -> Result<DataFrame, AnalysisError> {
    require_column(players, PLAYER)?;
    let rows = players
        .clone()
        .lazy()
        .filter(col(PLAYER).cast(DataType::String).eq(lit(name)))
        .collect()?;
    Ok(rows)
}

/// Render every cell of `df` as display text, row by row. Nulls become empty.
pub fn table_rows(df: &DataFrame) -> Vec<Vec<String>> {
    (0..df.height())
        .map(|i| {
            df.get_columns()
                .iter()
                .map(|column| match column.get(i) {
                    Ok(AnyValue::Null) | Err(_) => String::new(),
                    Ok(value) => value.to_string().trim_matches('"').to_string(),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> DataFrame {
        df!(
            "player" => [Some("zeta"), Some("Alpha"), None, Some("beta"), Some("Alpha")],
            "sensitivity" => [5.0, 4.0, 3.0, 6.0, 7.5],
            "dpi" => [800i64, 1600, 800, 400, 800],
        )
        .unwrap()
    }

    #[test]
    fn names_are_distinct_sorted_and_case_sensitive() {
        let names = player_names(&roster()).unwrap();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn lookup_returns_every_duplicate_row() {
        let rows = player_rows(&roster(), "Alpha").unwrap();
        assert_eq!(rows.height(), 2);
        let sens: Vec<Option<f64>> = rows
            .column("sensitivity")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(sens, vec![Some(4.0), Some(7.5)]);
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(player_rows(&roster(), "alpha").unwrap().height(), 0);
        assert_eq!(player_rows(&roster(), "Alph").unwrap().height(), 0);
    }

    #[test]
    fn missing_player_column_is_reported() {
        let df = df!("sensitivity" => [1.0]).unwrap();
        assert!(matches!(
            player_names(&df),
            Err(AnalysisError::MissingColumn(name)) if name == PLAYER
        ));
    }

    #[test]
    fn table_rows_render_text_without_quotes() {
        let df = df!("player" => [Some("A"), None], "dpi" => [800i64, 400]).unwrap();
        assert_eq!(
            table_rows(&df),
            vec![
                vec!["A".to_string(), "800".to_string()],
                vec![String::new(), "400".to_string()],
            ]
        );
    }
}
