//! Raw country -> analytics record normalization
//!
//! A pure, per-row mapping. Every rule degrades to `None` when its source
//! substructure is absent or empty, so the mapping is total over any record
//! the lenient wire model can represent.

use crate::countries::models::{AnalyticsRecord, RawCountry};

/// Normalize one raw country document into a flat analytics record.
///
/// "First" always means first in source iteration order, never sorted.
pub fn normalize(raw: &RawCountry) -> AnalyticsRecord {
    let currency = raw.first_currency();

    AnalyticsRecord {
        country_name: raw.common_name().map(str::to_owned),
        independent: raw.independent,
        un_member: raw.un_member,
        start_of_week: raw.start_of_week.clone(),
        official_name: raw.official_name().map(str::to_owned),
        common_native_name: raw.native_official_name().map(str::to_owned),
        currency_code: currency.map(|c| c.code.clone()),
        currency_name: currency.and_then(|c| c.name.clone()),
        currency_symbol: currency.and_then(|c| c.symbol.clone()),
        country_code: raw.dialing_code(),
        capital: raw.first_capital().map(str::to_owned),
        region: raw.region.clone(),
        subregion: raw.subregion.clone(),
        languages: raw.language_names(),
        area: raw.area,
        population: raw.population,
        continents: raw.first_continent().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::models::{CountryName, Currency, Idd};

    fn raw(json: &str) -> RawCountry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_currency_fields_from_first_entry() {
        let record = normalize(&raw(
            r#"{"currencies":{"BWP":{"name":"Botswana pula","symbol":"P"},
                              "ZAR":{"name":"South African rand","symbol":"R"}}}"#,
        ));
        assert_eq!(record.currency_code.as_deref(), Some("BWP"));
        assert_eq!(record.currency_name.as_deref(), Some("Botswana pula"));
        assert_eq!(record.currency_symbol.as_deref(), Some("P"));
    }

    #[test]
    fn test_empty_currencies_yield_null_for_all_dependents() {
        let record = normalize(&raw(r#"{"currencies":{}}"#));
        assert_eq!(record.currency_code, None);
        assert_eq!(record.currency_name, None);
        assert_eq!(record.currency_symbol, None);
    }

    #[test]
    fn test_currency_entry_with_missing_subfields() {
        let record = normalize(&raw(r#"{"currencies":{"XOF":{}}}"#));
        assert_eq!(record.currency_code.as_deref(), Some("XOF"));
        assert_eq!(record.currency_name, None);
        assert_eq!(record.currency_symbol, None);
    }

    #[test]
    fn test_country_code_concatenation() {
        let record = normalize(&raw(r#"{"idd":{"root":"+1","suffixes":["201","684"]}}"#));
        assert_eq!(record.country_code.as_deref(), Some("+1201"));
    }

    #[test]
    fn test_country_code_null_without_suffixes() {
        let record = normalize(&raw(r#"{"idd":{"root":"+1","suffixes":[]}}"#));
        assert_eq!(record.country_code, None);
    }

    #[test]
    fn test_capital_and_continents_take_first_element() {
        let record = normalize(&raw(
            r#"{"capital":["Pretoria","Cape Town","Bloemfontein"],
                "continents":["Africa"]}"#,
        ));
        assert_eq!(record.capital.as_deref(), Some("Pretoria"));
        assert_eq!(record.continents.as_deref(), Some("Africa"));
    }

    #[test]
    fn test_empty_collections_yield_null() {
        let record = normalize(&raw(
            r#"{"capital":[],"continents":[],"translations":{},"languages":{}}"#,
        ));
        assert_eq!(record.capital, None);
        assert_eq!(record.continents, None);
        assert_eq!(record.common_native_name, None);
        assert_eq!(record.languages, None);
    }

    #[test]
    fn test_passthrough_fields_unchanged() {
        let record = normalize(&raw(
            r#"{"independent":false,"unMember":true,"startOfWeek":"sunday",
                "region":"Oceania","subregion":"Polynesia",
                "area":236.0,"population":1871}"#,
        ));
        assert_eq!(record.independent, Some(false));
        assert_eq!(record.un_member, Some(true));
        assert_eq!(record.start_of_week.as_deref(), Some("sunday"));
        assert_eq!(record.region.as_deref(), Some("Oceania"));
        assert_eq!(record.subregion.as_deref(), Some("Polynesia"));
        assert_eq!(record.area, Some(236.0));
        assert_eq!(record.population, Some(1871));
    }

    #[test]
    fn test_normalize_is_total_over_default_record() {
        let record = normalize(&RawCountry::default());
        assert_eq!(record, AnalyticsRecord::default());
    }

    #[test]
    fn test_normalize_from_typed_construction() {
        let raw = RawCountry {
            name: Some(CountryName {
                common: Some("Japan".to_string()),
                official: Some("Japan".to_string()),
            }),
            currencies: vec![Currency {
                code: "JPY".to_string(),
                name: Some("Japanese yen".to_string()),
                symbol: Some("¥".to_string()),
            }],
            idd: Some(Idd {
                root: Some("+8".to_string()),
                suffixes: vec!["1".to_string()],
            }),
            ..RawCountry::default()
        };

        let record = normalize(&raw);
        assert_eq!(record.country_name.as_deref(), Some("Japan"));
        assert_eq!(record.currency_code.as_deref(), Some("JPY"));
        assert_eq!(record.country_code.as_deref(), Some("+81"));
    }
}
