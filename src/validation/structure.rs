//! Structural check for imported records

use serde_json::Value;

use super::{validate_field, Field};

/// Keys every imported record object must carry
pub const REQUIRED_KEYS: [&str; 7] = [
    "id",
    "description",
    "amount",
    "category",
    "date",
    "createdAt",
    "updatedAt",
];

/// Check that a JSON value looks like an exported record.
///
/// Requires all seven keys, a numeric amount that passes the amount rule, a
/// textual id and a date that passes the date rule. Description and category
/// are deliberately not run through their form rules.
pub fn validate_record_structure(candidate: &Value) -> bool {
    let Some(obj) = candidate.as_object() else {
        return false;
    };

    if !REQUIRED_KEYS.iter().all(|key| obj.contains_key(*key)) {
        return false;
    }

    let Some(amount) = obj["amount"].as_f64() else {
        return false;
    };
    if !obj["id"].is_string() {
        return false;
    }

    let Some(date) = obj["date"].as_str() else {
        return false;
    };

    validate_field(Field::Amount, &amount.to_string()) && validate_field(Field::Date, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "id": "x",
            "description": "a",
            "amount": 5,
            "category": "Food",
            "date": "2024-01-01",
            "createdAt": "t",
            "updatedAt": "t"
        })
    }

    #[test]
    fn test_valid_structure() {
        assert!(validate_record_structure(&valid()));
    }

    #[test]
    fn test_missing_key_fails() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("updatedAt");
        assert!(!validate_record_structure(&value));
    }

    #[test]
    fn test_wrong_types_fail() {
        let mut value = valid();
        value["amount"] = json!("5");
        assert!(!validate_record_structure(&value));

        let mut value = valid();
        value["id"] = json!(17);
        assert!(!validate_record_structure(&value));
    }

    #[test]
    fn test_amount_and_date_rules_apply() {
        let mut value = valid();
        value["amount"] = json!(0);
        assert!(!validate_record_structure(&value));

        let mut value = valid();
        value["amount"] = json!(1.005);
        assert!(!validate_record_structure(&value));

        let mut value = valid();
        value["date"] = json!("01/01/2024");
        assert!(!validate_record_structure(&value));
    }

    #[test]
    fn test_form_rules_do_not_apply() {
        let mut value = valid();
        value["description"] = json!("  padded padded  ");
        value["category"] = json!("Food & Drink 2");
        assert!(validate_record_structure(&value));
    }

    #[test]
    fn test_non_object_fails() {
        assert!(!validate_record_structure(&json!([1, 2])));
        assert!(!validate_record_structure(&json!("record")));
    }
}
