//! Pre-built Test Fixtures
//!
//! Ready-to-use claim texts, dates and identifiers. Values are fixed so that
//! expected prices can be written down in tests.

use chrono::NaiveDate;
use core_kernel::{ClaimId, Currency, FacilityId, Money, TpaId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Free-text treatment descriptions as facilities write them
pub struct ClaimTextFixtures;

impl ClaimTextFixtures {
    /// Caesarean section: one surgical procedure, 150000
    pub fn caesarean() -> &'static str {
        "CAESAREAN SECTION"
    }

    /// Antibiotic course: medication, 4000, dosage 500MG, duration 5/7 and BD
    pub fn cefuroxime() -> &'static str {
        "TAB CEFUROXIME 500MG BD 5/7"
    }

    /// Uncomplicated malaria: test 3000 + antimalarial 2500 + analgesic 1000
    pub fn malaria() -> &'static str {
        "MP TEST, TAB COARTEM 80/480 BD 3/7, TAB PARACETAMOL 1G TDS 3/7"
    }

    /// Multi-line surgical admission priced at 190500, with a stale total
    /// line that the parser drops
    pub fn surgical_admission() -> &'static str {
        "CAESAREAN SECTION\nFBC x2; IVF NORMAL SALINE 3 bags\nADMISSION 3 days\nTotal 201,000"
    }

    /// Emergency specialist care: 15000 * 1.5 * 1.3
    pub fn emergency_specialist() -> &'static str {
        "SPECIALIST EMERGENCY CARE"
    }

    /// Nothing but separators
    pub fn blank() -> &'static str {
        "  , ; "
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard service date (14 Mar 2024)
    pub fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    /// A week after the service date
    pub fn review_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 21).unwrap()
    }

    /// Well past the 90-day submission window
    pub fn late_review_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    /// A service date in the previous month
    pub fn previous_month() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
    }
}

/// Fixture for money
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn ngn(amount: Decimal) -> Money {
        Money::new(amount, Currency::NGN)
    }

    /// Price of [`ClaimTextFixtures::malaria`]
    pub fn malaria_total() -> Money {
        Money::new(dec!(6500), Currency::NGN)
    }

    /// Price of [`ClaimTextFixtures::surgical_admission`]
    pub fn surgical_admission_total() -> Money {
        Money::new(dec!(190500), Currency::NGN)
    }
}

/// Fixture for identifiers and scheme numbers
pub struct IdFixtures;

impl IdFixtures {
    pub fn facility_id() -> FacilityId {
        FacilityId::new_v7()
    }

    pub fn tpa_id() -> TpaId {
        TpaId::new_v7()
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new_v7()
    }

    pub fn enrollee_number(n: u32) -> String {
        format!("NHIS/01/{n:04}")
    }
}
