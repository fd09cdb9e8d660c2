//! Test Data Builders
//!
//! Builders for claims, batches and API request bodies. Tests set only the
//! fields they care about; everything else takes a fixture default.

use chrono::NaiveDate;
use core_kernel::{Currency, FacilityId, Money, TpaId};
use domain_claims::{BatchPeriod, ClaimBatch, FacilityClaim};
use serde_json::{json, Value};

use crate::fixtures::{ClaimTextFixtures, DateFixtures, IdFixtures};

/// Builder for facility claims parsed from free text
pub struct TestClaimBuilder {
    facility_id: FacilityId,
    enrollee_number: String,
    service_date: NaiveDate,
    diagnosis: Option<String>,
    text: String,
    currency: Currency,
    claimed_amount: Option<Money>,
    submitted: bool,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a builder for a submitted malaria claim
    pub fn new() -> Self {
        Self {
            facility_id: IdFixtures::facility_id(),
            enrollee_number: IdFixtures::enrollee_number(1),
            service_date: DateFixtures::service_date(),
            diagnosis: Some("Malaria".to_string()),
            text: ClaimTextFixtures::malaria().to_string(),
            currency: Currency::NGN,
            claimed_amount: None,
            submitted: true,
        }
    }

    pub fn with_facility(mut self, facility_id: FacilityId) -> Self {
        self.facility_id = facility_id;
        self
    }

    pub fn with_enrollee(mut self, enrollee_number: impl Into<String>) -> Self {
        self.enrollee_number = enrollee_number.into();
        self
    }

    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = date;
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: Option<&str>) -> Self {
        self.diagnosis = diagnosis.map(str::to_string);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Overrides the amount the facility asks for
    pub fn with_claimed_amount(mut self, amount: Money) -> Self {
        self.claimed_amount = Some(amount);
        self
    }

    /// Leaves the claim in draft
    pub fn draft(mut self) -> Self {
        self.submitted = false;
        self
    }

    /// Builds the claim
    pub fn build(self) -> FacilityClaim {
        let mut claim = FacilityClaim::from_text(
            self.facility_id,
            self.enrollee_number,
            self.service_date,
            self.diagnosis.as_deref(),
            &self.text,
            self.currency,
        )
        .expect("test claim text prices within range");
        if let Some(amount) = self.claimed_amount {
            claim
                .set_claimed_amount(amount)
                .expect("claimed amount currency matches the claim");
        }
        if self.submitted {
            claim.submit().expect("test claim has items");
        }
        claim
    }
}

/// Builder for claim batches
pub struct TestBatchBuilder {
    facility_id: FacilityId,
    tpa_id: Option<TpaId>,
    period: BatchPeriod,
    currency: Currency,
    claims: Vec<FacilityClaim>,
    unchecked: Vec<FacilityClaim>,
}

impl Default for TestBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBatchBuilder {
    /// Creates a builder for an open batch covering the fixture service month
    pub fn new() -> Self {
        Self {
            facility_id: IdFixtures::facility_id(),
            tpa_id: Some(IdFixtures::tpa_id()),
            period: BatchPeriod::of(DateFixtures::service_date()),
            currency: Currency::NGN,
            claims: Vec::new(),
            unchecked: Vec::new(),
        }
    }

    pub fn with_period(mut self, period: BatchPeriod) -> Self {
        self.period = period;
        self
    }

    /// Returns the batch facility, for building matching claims
    pub fn facility_id(&self) -> FacilityId {
        self.facility_id
    }

    /// Adds a claim through `ClaimBatch::add_claim`
    pub fn with_claim(mut self, claim: FacilityClaim) -> Self {
        self.claims.push(claim);
        self
    }

    /// Adds `count` submitted claims from the batch facility, one per enrollee
    pub fn with_claims(mut self, count: u32) -> Self {
        for n in 0..count {
            let claim = TestClaimBuilder::new()
                .with_facility(self.facility_id)
                .with_enrollee(IdFixtures::enrollee_number(n + 1))
                .build();
            self.claims.push(claim);
        }
        self
    }

    /// Places a claim in the batch without any admission checks
    pub fn with_unchecked_claim(mut self, claim: FacilityClaim) -> Self {
        self.unchecked.push(claim);
        self
    }

    /// Builds the batch, leaving it open
    pub fn build(self) -> ClaimBatch {
        let mut batch = ClaimBatch::open(self.facility_id, self.period, self.currency);
        if let Some(tpa_id) = self.tpa_id {
            batch.assign_tpa(tpa_id);
        }
        for claim in self.claims {
            batch.add_claim(claim).expect("test claim is eligible for the batch");
        }
        batch.claims.extend(self.unchecked);
        batch
    }
}

/// JSON body for `POST /api/v1/claim-items/parse`
pub fn parse_request_json(text: &str, service_date: NaiveDate) -> Value {
    json!({
        "text": text,
        "service_date": service_date,
        "diagnosis": "Malaria",
    })
}

/// JSON claim as accepted by the validation endpoints
pub fn claim_payload_json(facility_id: FacilityId, enrollee_number: &str, text: &str) -> Value {
    json!({
        "facility_id": facility_id,
        "enrollee_number": enrollee_number,
        "service_date": DateFixtures::service_date(),
        "diagnosis": "Malaria",
        "text": text,
    })
}
