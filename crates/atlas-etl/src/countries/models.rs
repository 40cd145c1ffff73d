//! Country data models
//!
//! [`RawCountry`] is both the wire type (REST Countries JSON) and the
//! columnar row type (Parquet). The keyed JSON objects of the API
//! (`currencies`, `translations`, `languages`) flatten into entry vectors
//! that preserve source iteration order, so "first" always means first as
//! received. Every structured field deserializes leniently: a value of the
//! wrong shape degrades to the field's empty/None default instead of
//! failing the record.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

// ============================================================================
// Raw country record
// ============================================================================

/// One country document as received from the source API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    #[serde(default, deserialize_with = "lenient_struct")]
    pub name: Option<CountryName>,

    #[serde(default)]
    pub independent: Option<bool>,

    #[serde(rename = "unMember", default)]
    pub un_member: Option<bool>,

    #[serde(rename = "startOfWeek", default)]
    pub start_of_week: Option<String>,

    /// Locale-keyed translations, source order preserved
    #[serde(default, deserialize_with = "keyed_entries")]
    pub translations: Vec<Translation>,

    /// Code-keyed currencies, source order preserved
    #[serde(default, deserialize_with = "keyed_entries")]
    pub currencies: Vec<Currency>,

    #[serde(default, deserialize_with = "lenient_struct")]
    pub idd: Option<Idd>,

    #[serde(default, deserialize_with = "string_seq")]
    pub capital: Vec<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub subregion: Option<String>,

    /// Code-keyed language names, source order preserved
    #[serde(default, deserialize_with = "keyed_entries")]
    pub languages: Vec<Language>,

    #[serde(default)]
    pub area: Option<f64>,

    #[serde(default)]
    pub population: Option<u64>,

    #[serde(default, deserialize_with = "string_seq")]
    pub continents: Vec<String>,
}

/// The `name` object of a country document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    #[serde(default)]
    pub common: Option<String>,

    #[serde(default)]
    pub official: Option<String>,
}

/// International direct dialing info
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Idd {
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default, deserialize_with = "string_seq")]
    pub suffixes: Vec<String>,
}

/// One entry of the `currencies` object (key flattened into `code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub symbol: Option<String>,
}

/// One entry of the `translations` object (key flattened into `locale`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub locale: String,

    #[serde(default)]
    pub official: Option<String>,

    #[serde(default)]
    pub common: Option<String>,
}

/// One entry of the `languages` object (key flattened into `code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,

    #[serde(default)]
    pub name: Option<String>,
}

impl RawCountry {
    pub fn common_name(&self) -> Option<&str> {
        self.name.as_ref()?.common.as_deref()
    }

    pub fn official_name(&self) -> Option<&str> {
        self.name.as_ref()?.official.as_deref()
    }

    /// `official` of the first translations entry in source order
    pub fn native_official_name(&self) -> Option<&str> {
        self.translations.first()?.official.as_deref()
    }

    /// First currencies entry in source order
    pub fn first_currency(&self) -> Option<&Currency> {
        self.currencies.first()
    }

    /// `idd.root` + first suffix, only when root is a non-empty string and
    /// at least one suffix is present
    pub fn dialing_code(&self) -> Option<String> {
        let idd = self.idd.as_ref()?;
        let root = idd.root.as_deref().filter(|r| !r.is_empty())?;
        let suffix = idd.suffixes.first()?;
        Some(format!("{root}{suffix}"))
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    pub fn first_continent(&self) -> Option<&str> {
        self.continents.first().map(String::as_str)
    }

    /// All language display names in source order; empty resolves to None
    pub fn language_names(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .languages
            .iter()
            .filter_map(|lang| lang.name.clone())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

// ============================================================================
// Analytics record
// ============================================================================

/// Flat analytics record, one per country, keyed by `country_name`
///
/// Every field is optional; `None` is the explicit null marker required by
/// the normalization rules (missing or empty source structures never error).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    /// Partition key of the analytics table
    pub country_name: Option<String>,
    pub independent: Option<bool>,
    pub un_member: Option<bool>,
    pub start_of_week: Option<String>,
    pub official_name: Option<String>,
    pub common_native_name: Option<String>,
    pub currency_code: Option<String>,
    pub currency_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub country_code: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub languages: Option<Vec<String>>,
    pub area: Option<f64>,
    pub population: Option<u64>,
    pub continents: Option<String>,
}

// ============================================================================
// Lenient deserialization
// ============================================================================

/// Entry of a keyed JSON object, flattened to a (key, body) struct so the
/// wire form (map) and the columnar form (list of entry structs) both
/// deserialize into the same vector.
trait KeyedEntry: de::DeserializeOwned {
    type Body: de::DeserializeOwned;

    fn from_entry(key: String, body: Self::Body) -> Self;
}

#[derive(Debug, Default, Deserialize)]
struct CurrencyBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
}

impl KeyedEntry for Currency {
    type Body = CurrencyBody;

    fn from_entry(code: String, body: CurrencyBody) -> Self {
        Currency {
            code,
            name: body.name,
            symbol: body.symbol,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TranslationBody {
    #[serde(default)]
    official: Option<String>,
    #[serde(default)]
    common: Option<String>,
}

impl KeyedEntry for Translation {
    type Body = TranslationBody;

    fn from_entry(locale: String, body: TranslationBody) -> Self {
        Translation {
            locale,
            official: body.official,
            common: body.common,
        }
    }
}

impl KeyedEntry for Language {
    type Body = MaybeString;

    fn from_entry(code: String, body: MaybeString) -> Self {
        Language { code, name: body.0 }
    }
}

/// String that degrades to None on any other source type
struct MaybeString(Option<String>);

impl<'de> Deserialize<'de> for MaybeString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringVisitor;

        impl<'de> Visitor<'de> for StringVisitor {
            type Value = MaybeString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or any value to discard")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(MaybeString(Some(v.to_owned())))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(MaybeString(Some(v)))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                MaybeString::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(MaybeString(None))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(MaybeString(None))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(MaybeString(None))
            }
        }

        deserializer.deserialize_any(StringVisitor)
    }
}

/// Keyed JSON object or entry list -> entry vector, source order preserved;
/// null and scalar shapes degrade to the empty vector
fn keyed_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: KeyedEntry,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T: KeyedEntry> Visitor<'de> for EntriesVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a keyed object or a list of entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some((key, body)) = map.next_entry::<String, T::Body>()? {
                entries.push(T::from_entry(key, body));
            }
            Ok(entries)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = seq.next_element::<T>()? {
                entries.push(entry);
            }
            Ok(entries)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            keyed_entries(deserializer)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

/// Object -> Some(T); null, scalar, and list shapes degrade to None
fn lenient_struct<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: de::DeserializeOwned,
{
    struct StructVisitor<T>(PhantomData<T>);

    impl<'de, T: de::DeserializeOwned> Visitor<'de> for StructVisitor<T> {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            T::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            lenient_struct(deserializer)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(StructVisitor(PhantomData))
}

/// List of strings; non-string elements are dropped, non-list shapes degrade
/// to the empty vector
fn string_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SeqVisitor;

    impl<'de> Visitor<'de> for SeqVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of strings")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::new();
            while let Some(MaybeString(value)) = seq.next_element::<MaybeString>()? {
                if let Some(value) = value {
                    values.push(value);
                }
            }
            Ok(values)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            string_seq(deserializer)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(SeqVisitor)
}
