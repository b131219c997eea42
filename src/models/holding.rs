use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{PortfolioError, PortfolioResult};

/// Largest accepted quantity or price, exclusive. Matches a `NUMERIC(19, 8)` column.
pub const MAX_AMOUNT: Decimal = dec!(100000000000);
pub const MAX_AMOUNT_SCALE: u32 = 8;

/// A persisted position. The id is assigned by the store on creation.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Holding {
    id: i64,
    name: String,
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
}

/// A holding that has not been stored yet.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct NewHolding {
    name: String,
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
}

impl NewHolding {
    /// Checks the structural constraints a holding must satisfy before it is stored.
    ///
    /// The name is trimmed in place; amounts must be positive, below [`MAX_AMOUNT`] and carry
    /// at most [`MAX_AMOUNT_SCALE`] decimal places.
    pub fn validate(mut self) -> PortfolioResult<Self> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(PortfolioError::invalid("name", "Name cannot be blank"));
        }
        self.name = trimmed.to_string();

        validate_amount("quantity", &self.quantity)?;
        validate_amount("purchase_price", &self.purchase_price)?;
        validate_amount("current_price", &self.current_price)?;

        Ok(self)
    }

    pub fn into_holding(self, id: i64) -> Holding {
        Holding::new(
            id,
            self.name,
            self.quantity,
            self.purchase_price,
            self.current_price,
        )
    }
}

fn validate_amount(field: &'static str, value: &Decimal) -> PortfolioResult<()> {
    if *value <= Decimal::ZERO {
        return Err(PortfolioError::invalid(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    if *value >= MAX_AMOUNT {
        return Err(PortfolioError::invalid(
            field,
            format!("must be less than {}, got {}", MAX_AMOUNT, value),
        ));
    }
    if value.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(PortfolioError::invalid(
            field,
            format!(
                "must have at most {} decimal places, got {}",
                MAX_AMOUNT_SCALE, value
            ),
        ));
    }
    Ok(())
}
