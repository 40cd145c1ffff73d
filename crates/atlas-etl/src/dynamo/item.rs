//! Analytics record -> DynamoDB item marshalling
//!
//! Numbers travel as the `N` attribute type built from the value's shortest
//! round-trip decimal string, never from the binary float expansion; the
//! store has no native binary-float type. Null markers are the `NULL`
//! attribute so every record carries the full field set.

use crate::countries::models::AnalyticsRecord;
use atlas_common::{AtlasError, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// Partition key attribute of the analytics table
pub const PARTITION_KEY: &str = "country_name";

/// Build the DynamoDB item for one analytics record.
///
/// A record with a null `country_name` cannot be keyed and fails with
/// [`AtlasError::MissingPartitionKey`] carrying the offending record as
/// JSON for diagnosis.
pub fn to_item(record: &AnalyticsRecord) -> Result<HashMap<String, AttributeValue>> {
    let Some(country_name) = record.country_name.as_deref() else {
        return Err(AtlasError::MissingPartitionKey {
            key: PARTITION_KEY.to_string(),
            record: serde_json::to_string(record)?,
        });
    };

    let mut item = HashMap::new();
    item.insert(
        PARTITION_KEY.to_string(),
        AttributeValue::S(country_name.to_string()),
    );
    item.insert("independent".to_string(), bool_attr(record.independent));
    item.insert("un_member".to_string(), bool_attr(record.un_member));
    item.insert(
        "start_of_week".to_string(),
        string_attr(&record.start_of_week),
    );
    item.insert(
        "official_name".to_string(),
        string_attr(&record.official_name),
    );
    item.insert(
        "common_native_name".to_string(),
        string_attr(&record.common_native_name),
    );
    item.insert(
        "currency_code".to_string(),
        string_attr(&record.currency_code),
    );
    item.insert(
        "currency_name".to_string(),
        string_attr(&record.currency_name),
    );
    item.insert(
        "currency_symbol".to_string(),
        string_attr(&record.currency_symbol),
    );
    item.insert(
        "country_code".to_string(),
        string_attr(&record.country_code),
    );
    item.insert("capital".to_string(), string_attr(&record.capital));
    item.insert("region".to_string(), string_attr(&record.region));
    item.insert("subregion".to_string(), string_attr(&record.subregion));
    item.insert(
        "languages".to_string(),
        string_list_attr(&record.languages),
    );
    item.insert("area".to_string(), float_attr(record.area));
    item.insert("population".to_string(), uint_attr(record.population));
    item.insert("continents".to_string(), string_attr(&record.continents));

    Ok(item)
}

fn string_attr(value: &Option<String>) -> AttributeValue {
    match value {
        Some(s) => AttributeValue::S(s.clone()),
        None => AttributeValue::Null(true),
    }
}

fn bool_attr(value: Option<bool>) -> AttributeValue {
    match value {
        Some(b) => AttributeValue::Bool(b),
        None => AttributeValue::Null(true),
    }
}

/// Finite floats render through `Display`, the shortest decimal string that
/// round-trips. NaN and infinities cannot be carried by the `N` type and
/// degrade to the null marker.
fn float_attr(value: Option<f64>) -> AttributeValue {
    match value {
        Some(f) if f.is_finite() => AttributeValue::N(f.to_string()),
        _ => AttributeValue::Null(true),
    }
}

fn uint_attr(value: Option<u64>) -> AttributeValue {
    match value {
        Some(n) => AttributeValue::N(n.to_string()),
        None => AttributeValue::Null(true),
    }
}

fn string_list_attr(value: &Option<Vec<String>>) -> AttributeValue {
    match value {
        Some(items) => AttributeValue::L(
            items
                .iter()
                .map(|s| AttributeValue::S(s.clone()))
                .collect(),
        ),
        None => AttributeValue::Null(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_named(name: &str) -> AnalyticsRecord {
        AnalyticsRecord {
            country_name: Some(name.to_string()),
            ..AnalyticsRecord::default()
        }
    }

    #[test]
    fn test_partition_key_is_required() {
        let record = AnalyticsRecord::default();
        let err = to_item(&record).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::MissingPartitionKey { ref key, .. } if key == PARTITION_KEY
        ));
    }

    #[test]
    fn test_missing_key_error_carries_record_json() {
        let record = AnalyticsRecord {
            area: Some(10.0),
            ..AnalyticsRecord::default()
        };
        match to_item(&record).unwrap_err() {
            AtlasError::MissingPartitionKey { record, .. } => {
                assert!(record.contains("\"area\":10.0"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_renders_as_decimal_string() {
        let mut record = record_named("Test");
        record.area = Some(357114.0);
        let item = to_item(&record).unwrap();
        assert_eq!(item["area"], AttributeValue::N("357114".to_string()));

        record.area = Some(0.1);
        let item = to_item(&record).unwrap();
        // Shortest round-trip form, not the binary expansion
        assert_eq!(item["area"], AttributeValue::N("0.1".to_string()));
    }

    #[test]
    fn test_non_finite_float_degrades_to_null() {
        let mut record = record_named("Test");
        record.area = Some(f64::NAN);
        let item = to_item(&record).unwrap();
        assert_eq!(item["area"], AttributeValue::Null(true));
    }

    #[test]
    fn test_null_fields_use_null_marker() {
        let item = to_item(&record_named("Test")).unwrap();
        assert_eq!(item["capital"], AttributeValue::Null(true));
        assert_eq!(item["languages"], AttributeValue::Null(true));
        assert_eq!(item["population"], AttributeValue::Null(true));
        assert_eq!(item["independent"], AttributeValue::Null(true));
    }

    #[test]
    fn test_populated_record_marshalling() {
        let record = AnalyticsRecord {
            country_name: Some("Test".to_string()),
            independent: Some(true),
            population: Some(5),
            languages: Some(vec!["English".to_string(), "French".to_string()]),
            currency_symbol: Some("$".to_string()),
            ..AnalyticsRecord::default()
        };

        let item = to_item(&record).unwrap();
        assert_eq!(item[PARTITION_KEY], AttributeValue::S("Test".to_string()));
        assert_eq!(item["independent"], AttributeValue::Bool(true));
        assert_eq!(item["population"], AttributeValue::N("5".to_string()));
        assert_eq!(
            item["languages"],
            AttributeValue::L(vec![
                AttributeValue::S("English".to_string()),
                AttributeValue::S("French".to_string()),
            ])
        );
        assert_eq!(
            item["currency_symbol"],
            AttributeValue::S("$".to_string())
        );
    }
}
