use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqliteRow};

use crate::{
    error::{PortfolioError, PortfolioResult},
    models::Holding,
};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> PortfolioResult<i64> {
    row.try_get::<i64, _>(column)
        .map_err(|e| decode_error(column, e))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> PortfolioResult<String> {
    row.try_get::<String, _>(column)
        .map_err(|e| decode_error(column, e))
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> PortfolioResult<Decimal> {
    let text = parse_string_from_row(row, column)?;
    text.parse::<Decimal>()
        .map_err(|e| decode_error(column, format!("'{}' is not a decimal: {}", text, e)))
}

pub fn parse_holding(row: SqliteRow) -> PortfolioResult<Holding> {
    let id = parse_i64_from_row(&row, "id")?;
    let name = parse_string_from_row(&row, "name")?;
    let quantity = parse_decimal_from_row(&row, "quantity")?;
    let purchase_price = parse_decimal_from_row(&row, "purchase_price")?;
    let current_price = parse_decimal_from_row(&row, "current_price")?;

    Ok(Holding::new(
        id,
        name,
        quantity,
        purchase_price,
        current_price,
    ))
}

fn decode_error(column: &str, reason: impl ToString) -> PortfolioError {
    PortfolioError::Decode {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}
