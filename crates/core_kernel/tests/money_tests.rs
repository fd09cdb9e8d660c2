//! Unit tests for the Money module
//!
//! Tests cover creation, checked arithmetic, summation and display.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::NGN);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::KES);
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert_eq!(m.currency(), Currency::KES);
    }

    #[test]
    fn test_round_to_currency_rounds_half_away_from_zero() {
        let m = Money::new(dec!(10.125), Currency::NGN);
        assert_eq!(m.round_to_currency().amount(), dec!(10.13));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_and_sub() {
        let a = Money::new(dec!(150000), Currency::NGN);
        let b = Money::new(dec!(4000), Currency::NGN);

        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(154000));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(146000));
    }

    #[test]
    fn test_checked_sub_reports_mismatch() {
        let a = Money::new(dec!(1), Currency::NGN);
        let b = Money::new(dec!(1), Currency::GHS);

        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("NGN".to_string(), "GHS".to_string()))
        );
    }

    #[test]
    fn test_multiply_by_factor() {
        let m = Money::new(dec!(150000), Currency::NGN);
        assert_eq!(m.checked_multiply(dec!(1.95)).unwrap().amount(), dec!(292500));
    }

    #[test]
    fn test_checked_sub_reports_overflow() {
        let low = Money::new(rust_decimal::Decimal::MIN, Currency::NGN);
        let one = Money::new(dec!(1), Currency::NGN);

        assert!(matches!(low.checked_sub(&one), Err(MoneyError::Overflow(_))));
    }

    #[test]
    fn test_sum_reports_overflow_instead_of_panicking() {
        let amounts = [
            Money::new(dec!(50000000000000000000000000000), Currency::NGN),
            Money::new(dec!(50000000000000000000000000000), Currency::NGN),
        ];
        assert!(matches!(
            Money::sum(Currency::NGN, &amounts),
            Err(MoneyError::Overflow(_))
        ));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total = Money::sum(Currency::NGN, &[]).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let amounts = [
            Money::new(dec!(1), Currency::NGN),
            Money::new(dec!(1), Currency::USD),
        ];
        assert!(Money::sum(Currency::NGN, &amounts).is_err());
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_symbol_and_two_places() {
        let m = Money::new(dec!(2500), Currency::NGN);
        assert_eq!(m.to_string(), "₦ 2500.00");
    }

    #[test]
    fn test_serializes_currency_uppercase() {
        let m = Money::new(dec!(10), Currency::NGN);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["currency"], "NGN");
    }
}
