//! Keyword categorization of a single claim-item fragment

use serde::{Deserialize, Serialize};

use crate::catalog::{self, DEFAULT_OTHER_SERVICE_CATEGORY};
use crate::item::ItemType;

/// Item type plus the sub-category label shown to reviewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub item_type: ItemType,
    pub item_category: String,
}

/// Order in which the keyword lists are consulted.
const PRIORITY: [ItemType; 3] = [ItemType::Procedure, ItemType::Investigation, ItemType::Medication];

/// Assigns an item type and category to a trimmed fragment.
///
/// Procedure keywords win over investigation keywords, which win over
/// medication keywords. Anything unmatched is an other-service item whose
/// category comes from the bed/nursing and specialist rules, defaulting to
/// "Medical Service". Never fails.
pub fn categorize_item(text: &str) -> Categorization {
    let lowered = text.to_lowercase();

    for item_type in PRIORITY {
        if let Some(rule) = catalog::rules_for(item_type).iter().find(|r| r.matches(&lowered)) {
            return Categorization {
                item_type,
                item_category: rule.category.to_string(),
            };
        }
    }

    let category = catalog::OTHER_SERVICE_RULES
        .iter()
        .find(|r| r.matches(&lowered))
        .map(|r| r.category)
        .unwrap_or(DEFAULT_OTHER_SERVICE_CATEGORY);

    Categorization {
        item_type: ItemType::OtherService,
        item_category: category.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, item_type: ItemType, category: &str) {
        let c = categorize_item(text);
        assert_eq!(c.item_type, item_type, "type for {text}");
        assert_eq!(c.item_category, category, "category for {text}");
    }

    #[test]
    fn test_procedures() {
        check("CAESAREAN SECTION", ItemType::Procedure, "Surgical Procedure");
        check("SVD Delivery", ItemType::Procedure, "Obstetric Procedure");
        check("GP consultation", ItemType::Procedure, "Consultation");
        check("wound dressing", ItemType::Procedure, "Minor Procedure");
    }

    #[test]
    fn test_investigations() {
        check("PCV", ItemType::Investigation, "Laboratory Test");
        check("HBsAg screening", ItemType::Investigation, "Laboratory Test");
        check("Abdominal ultrasound scan", ItemType::Investigation, "Imaging");
        check("ECG", ItemType::Investigation, "Cardiac Test");
    }

    #[test]
    fn test_laboratory_is_not_mistaken_for_labour() {
        check("laboratory charges", ItemType::Investigation, "Laboratory Test");
    }

    #[test]
    fn test_medications() {
        check("TAB CEFUROXIME 500MG", ItemType::Medication, "Antibiotic");
        check("inj artesunate 120mg", ItemType::Medication, "Antimalarial");
        check("Paracetamol syrup", ItemType::Medication, "Analgesic");
        check("Normal saline 500ml", ItemType::Medication, "IV Fluid");
        check("tab vitamin c", ItemType::Medication, "Medication");
    }

    #[test]
    fn test_procedure_beats_medication() {
        check("surgery with inj", ItemType::Procedure, "Surgical Procedure");
    }

    #[test]
    fn test_other_services() {
        check("admission 3 days", ItemType::OtherService, "Bed & Nursing Care");
        check("specialist visit", ItemType::OtherService, "Specialist Service");
        check("ambulance", ItemType::OtherService, "Medical Service");
    }

    #[test]
    fn test_short_keywords_ignore_word_tails() {
        check("blood sample", ItemType::OtherService, "Medical Service");
        check("forward referral", ItemType::OtherService, "Medical Service");
        check("paracetamol 500mg", ItemType::Medication, "Analgesic");
        check("ward round", ItemType::OtherService, "Bed & Nursing Care");
    }
}
