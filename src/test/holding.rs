#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        error::{ErrorKind, PortfolioError},
        models::{NewHolding, holding::MAX_AMOUNT},
    };

    fn candidate(name: &str, quantity: Decimal, purchase: Decimal, current: Decimal) -> NewHolding {
        NewHolding::new(name.to_string(), quantity, purchase, current)
    }

    fn invalid_field(result: Result<NewHolding, PortfolioError>) -> &'static str {
        match result {
            Err(PortfolioError::InvalidInput { field, .. }) => field,
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn valid_holding_is_trimmed() {
        let holding = candidate("  Apple ", dec!(10), dec!(100), dec!(150))
            .validate()
            .unwrap();

        assert_eq!(holding.name(), "Apple");
        assert_eq!(*holding.quantity(), dec!(10));
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = candidate("   ", dec!(10), dec!(100), dec!(150)).validate();
        assert_eq!(invalid_field(result), "name");

        let err = candidate("", dec!(10), dec!(100), dec!(150))
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Invalid name: Name cannot be blank");
    }

    #[test]
    fn amounts_must_be_positive() {
        let zero_quantity = candidate("Apple", Decimal::ZERO, dec!(100), dec!(150)).validate();
        assert_eq!(invalid_field(zero_quantity), "quantity");

        let zero_purchase = candidate("Apple", dec!(10), Decimal::ZERO, dec!(150)).validate();
        assert_eq!(invalid_field(zero_purchase), "purchase_price");

        let negative_current = candidate("Apple", dec!(10), dec!(100), dec!(-1)).validate();
        assert_eq!(invalid_field(negative_current), "current_price");
    }

    #[test]
    fn amounts_must_fit_the_storage_precision() {
        let too_large = candidate("Apple", MAX_AMOUNT, dec!(100), dec!(150)).validate();
        assert_eq!(invalid_field(too_large), "quantity");

        let too_precise = candidate("Apple", dec!(10), dec!(0.000000001), dec!(150)).validate();
        assert_eq!(invalid_field(too_precise), "purchase_price");

        // Trailing zeros do not count as precision.
        assert!(
            candidate("Apple", dec!(1.1000000000), dec!(99999999999.99999999), dec!(0.00000001))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn into_holding_assigns_the_id() {
        let holding = candidate("Apple", dec!(10), dec!(100), dec!(150)).into_holding(7);

        assert_eq!(*holding.id(), 7);
        assert_eq!(holding.name(), "Apple");
        assert_eq!(*holding.current_price(), dec!(150));
    }
}
