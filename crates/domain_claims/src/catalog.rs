//! Static heuristic tables for claim-item categorization and pricing
//!
//! Everything here is data: keyword rules, base costs, cost adjustments and
//! unit rules. Tuning the parser means editing these tables, not the code
//! that walks them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::item::ItemType;

/// An ordered keyword rule. The first rule with any keyword starting a word
/// of the lower-cased text decides the category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    /// Returns true if any keyword starts a word in `lowered`
    pub fn matches(&self, lowered: &str) -> bool {
        any_keyword(self.keywords, lowered)
    }
}

/// True if `keyword` occurs in `lowered` where no letter precedes it.
///
/// Keywords may still be prefixes ("tab" in "tabs", "mg" in "500mg") but
/// never tails of a longer word ("amp" in "sample", "ward" in "forward").
pub fn has_keyword(lowered: &str, keyword: &str) -> bool {
    lowered.match_indices(keyword).any(|(at, _)| {
        lowered[..at]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphabetic())
    })
}

pub fn any_keyword(keywords: &[&str], lowered: &str) -> bool {
    keywords.iter().any(|k| has_keyword(lowered, k))
}

/// Procedures are checked first, they are the most specific.
pub const PROCEDURE_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "Surgical Procedure",
        keywords: &[
            "caesarean", "cesarean", "laparotomy", "appendectomy", "appendicectomy",
            "herniorrhaphy", "hysterectomy", "myomectomy", "surgery", "surgical",
            "operation", "theatre", "orif",
        ],
    },
    KeywordRule {
        category: "Obstetric Procedure",
        keywords: &[
            "delivery", "svd", "labour", "episiotomy", "d&c", "evacuation",
        ],
    },
    KeywordRule {
        category: "Consultation",
        keywords: &["consultation", "review", "follow up", "follow-up"],
    },
    KeywordRule {
        category: "Minor Procedure",
        keywords: &[
            "dressing", "suture", "suturing", "catheter", "circumcision",
            "incision and drainage", "i&d", "wound care",
        ],
    },
];

pub const INVESTIGATION_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "Imaging",
        keywords: &[
            "scan", "x-ray", "xray", "ultrasound", "mri", "ct-scan", "mammogra", "doppler",
        ],
    },
    KeywordRule {
        category: "Cardiac Test",
        keywords: &["ecg", "ekg", "echo"],
    },
    KeywordRule {
        category: "Laboratory Test",
        keywords: &[
            "pcv", "fbc", "hbsag", "hcv", "hiv", "rvs", "widal", "malaria parasite", "mp test",
            "urinalysis", "urine", "stool", "culture", "m/c/s", "mcs", "blood sugar", "rbs",
            "fbs", "e/u/cr", "electrolytes", "lft", "genotype", "blood group", "crossmatch",
            "cross match", "vdrl", "esr", "laboratory", "test",
        ],
    },
];

/// Drug classes come before the generic dosage-form rule so that a named
/// drug gets its class rather than plain "Medication".
pub const MEDICATION_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "Antibiotic",
        keywords: &[
            "cefuroxime", "ceftriaxone", "amoxicillin", "augmentin", "ciprofloxacin",
            "metronidazole", "flagyl", "gentamicin", "azithromycin", "ampiclox",
            "cloxacillin", "erythromycin",
        ],
    },
    KeywordRule {
        category: "Antimalarial",
        keywords: &[
            "artemether", "coartem", "lumefantrine", "artesunate", "quinine", "fansidar",
            "amodiaquine",
        ],
    },
    KeywordRule {
        category: "Analgesic",
        keywords: &[
            "paracetamol", "pcm", "diclofenac", "ibuprofen", "pentazocine", "tramadol",
            "piroxicam",
        ],
    },
    KeywordRule {
        category: "IV Fluid",
        keywords: &["normal saline", "dextrose", "ringer", "infusion", "ivf"],
    },
    KeywordRule {
        category: "Medication",
        keywords: &[
            "tab", "cap", "inj", "syr", "susp", "mg", "mcg", "cream", "ointment", "drops",
            "vial", "amp",
        ],
    },
];

/// Nested decision for anything no other list claims.
pub const OTHER_SERVICE_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "Bed & Nursing Care",
        keywords: &["bed", "admission", "ward", "nursing", "accommodation", "feeding"],
    },
    KeywordRule {
        category: "Specialist Service",
        keywords: &["specialist", "consult"],
    },
];

pub const DEFAULT_OTHER_SERVICE_CATEGORY: &str = "Medical Service";

/// Cost of a generic medical service, also charged for categories without a row.
pub const MEDICAL_SERVICE_COST: Decimal = dec!(5000);

/// Base unit costs keyed by item type and lower-cased category.
pub const BASE_COSTS: &[(ItemType, &str, Decimal)] = &[
    (ItemType::Procedure, "surgical procedure", dec!(150000)),
    (ItemType::Procedure, "obstetric procedure", dec!(50000)),
    (ItemType::Procedure, "consultation", dec!(5000)),
    (ItemType::Procedure, "minor procedure", dec!(10000)),
    (ItemType::Investigation, "laboratory test", dec!(3000)),
    (ItemType::Investigation, "imaging", dec!(15000)),
    (ItemType::Investigation, "cardiac test", dec!(8000)),
    (ItemType::Medication, "antibiotic", dec!(4000)),
    (ItemType::Medication, "antimalarial", dec!(2500)),
    (ItemType::Medication, "analgesic", dec!(1000)),
    (ItemType::Medication, "iv fluid", dec!(1500)),
    (ItemType::Medication, "medication", dec!(2000)),
    (ItemType::OtherService, "bed & nursing care", dec!(10000)),
    (ItemType::OtherService, "specialist service", dec!(15000)),
    (ItemType::OtherService, "medical service", MEDICAL_SERVICE_COST),
];

/// A multiplicative cost adjustment applied when any keyword is present.
#[derive(Debug, Clone, Copy)]
pub struct CostAdjustment {
    pub factor: Decimal,
    pub keywords: &'static [&'static str],
}

/// Adjustments stack: a text hitting two rows is multiplied by both factors.
pub const COST_ADJUSTMENTS: &[CostAdjustment] = &[
    CostAdjustment { factor: dec!(1.5), keywords: &["emergency", "urgent"] },
    CostAdjustment { factor: dec!(1.3), keywords: &["specialist", "consultant"] },
    CostAdjustment { factor: dec!(2), keywords: &["icu", "intensive"] },
];

/// A unit label chosen when any keyword is present.
#[derive(Debug, Clone, Copy)]
pub struct UnitRule {
    pub unit: &'static str,
    pub keywords: &'static [&'static str],
}

pub const MEDICATION_UNITS: &[UnitRule] = &[
    UnitRule { unit: "tablets", keywords: &["tab", "cap"] },
    UnitRule { unit: "vials", keywords: &["inj", "vial", "amp"] },
    UnitRule { unit: "bags", keywords: &["infusion", "saline", "dextrose", "ringer", "bag", "ivf"] },
    UnitRule { unit: "ml", keywords: &["syr", "susp", "ml"] },
];

pub const DEFAULT_MEDICATION_UNIT: &str = "tablets";

pub const OTHER_SERVICE_UNITS: &[UnitRule] = &[
    UnitRule { unit: "days", keywords: &["bed", "admission", "ward", "day"] },
    UnitRule { unit: "hours", keywords: &["hour", "hrs", "hrly"] },
];

pub const DEFAULT_OTHER_SERVICE_UNIT: &str = "services";

/// Returns the ordered keyword rules for an item type
pub fn rules_for(item_type: ItemType) -> &'static [KeywordRule] {
    match item_type {
        ItemType::Procedure => PROCEDURE_RULES,
        ItemType::Investigation => INVESTIGATION_RULES,
        ItemType::Medication => MEDICATION_RULES,
        ItemType::OtherService => OTHER_SERVICE_RULES,
    }
}

/// Looks up the base cost for a category, falling back to the generic
/// medical-service cost when the category has no row.
pub fn base_cost(item_type: ItemType, category: &str) -> Decimal {
    let key = category.to_lowercase();
    BASE_COSTS
        .iter()
        .find(|(t, c, _)| *t == item_type && *c == key)
        .map_or(MEDICAL_SERVICE_COST, |(_, _, cost)| *cost)
}

/// Returns the first unit whose keywords appear in `lowered`
pub fn first_unit(rules: &[UnitRule], lowered: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|r| any_keyword(r.keywords, lowered))
        .map(|r| r.unit)
}
