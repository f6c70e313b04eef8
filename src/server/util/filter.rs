use sea_orm::{
    sea_query::{BinOper, Expr, ExprTrait},
    ColumnTrait, Condition,
};

/// Case-insensitive substring match on `column`.
///
/// Uses the `REGEXP` function registered on every connection with a Unicode
/// case-insensitive pattern, so `é` matches `É`. The term is escaped and
/// matched literally. NULL columns never match.
pub fn contains_ci<C: ColumnTrait>(column: C, term: &str) -> Condition {
    Condition::all().add(
        Expr::col(column).binary(BinOper::Custom("REGEXP"), literal_ci_pattern(term)),
    )
}

/// Regex matching `term` literally, ignoring case.
fn literal_ci_pattern(term: &str) -> String {
    format!("(?i){}", regex::escape(term))
}

/// Trims a free-text filter, treating blank input as absent.
pub fn non_blank(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}
