use derive_more::{Display, From};

/// A string-encoded comparison on a record field, e.g. `year>=2010`.
/// Filters are conjunctive downstream; their order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, From, Display)]
pub struct FilterExpression(String);

impl FilterExpression {
    pub fn year_at_least(year: i32) -> FilterExpression {
        FilterExpression(format!("year>={year}"))
    }

    pub fn year_at_most(year: i32) -> FilterExpression {
        FilterExpression(format!("year<={year}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
