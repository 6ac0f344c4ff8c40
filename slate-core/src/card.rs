use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::content::ContentBlock;

/// Heading level of the title generated for a record card.
pub const CARD_HEADING_LEVEL: i64 = 2;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// A flat data record whose fields keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A repeated name replaces the value in place.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to scalar values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Record, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = Record {
                    fields: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((name, value)) = map.next_entry::<String, Scalar>()? {
                    record.insert(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Records to be turned into cards and appended to the page at `page`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardSet {
    pub page: String,
    #[serde(default = "default_title_field")]
    pub title_field: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

fn default_title_field() -> String {
    "name".to_string()
}

/// Uppercase the first character of a field name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Build the blocks of a record card: a heading from `title_field`, then one
/// `"<Field>: <value>"` paragraph per remaining field in record order.
///
/// A record without the title field gets an empty heading.
pub fn compose_card_items(record: &Record, title_field: &str) -> Vec<ContentBlock> {
    let title = record
        .get(title_field)
        .map(ToString::to_string)
        .unwrap_or_default();

    std::iter::once(ContentBlock::heading(CARD_HEADING_LEVEL, title))
        .chain(
            record
                .fields()
                .filter(|(name, _)| *name != title_field)
                .map(|(name, value)| {
                    ContentBlock::paragraph(format!("{}: {}", capitalize(name), value))
                }),
        )
        .collect()
}

pub fn compose_card(record: &Record, title_field: &str) -> ContentBlock {
    ContentBlock::card(compose_card_items(record, title_field))
}

/// One card per record, numbered from 1 in input order.
pub fn compose_cards(records: &[Record], title_field: &str) -> Vec<ContentBlock> {
    records
        .iter()
        .zip(1i64..)
        .map(|(record, n)| compose_card(record, title_field).with_id(n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shawshank() -> Record {
        Record::new()
            .field("name", "X")
            .field("type", "movie")
            .field("year", 1994)
            .field("director", "D")
    }

    #[test]
    fn test_compose_card_items_in_record_order() {
        assert_eq!(
            compose_card_items(&shawshank(), "name"),
            vec![
                ContentBlock::heading(2, "X"),
                ContentBlock::paragraph("Type: movie"),
                ContentBlock::paragraph("Year: 1994"),
                ContentBlock::paragraph("Director: D"),
            ]
        );
    }

    #[test]
    fn test_title_field_may_sit_anywhere() {
        let record = Record::new()
            .field("year", 2008)
            .field("title", "The Dark Knight");
        assert_eq!(
            compose_card_items(&record, "title"),
            vec![
                ContentBlock::heading(2, "The Dark Knight"),
                ContentBlock::paragraph("Year: 2008"),
            ]
        );
    }

    #[test]
    fn test_missing_title_field_gives_empty_heading() {
        let record = Record::new().field("year", 1972);
        let items = compose_card_items(&record, "name");
        assert_eq!(items[0], ContentBlock::heading(2, ""));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let record: Record = serde_json::from_str(
            r#"{"name": "The Godfather", "type": "movie", "year": 1972, "director": "Francis Ford Coppola"}"#,
        )
        .unwrap();

        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "type", "year", "director"]);
        assert_eq!(record.get("year"), Some(&Scalar::Integer(1972)));
    }

    #[test]
    fn test_deserialize_from_toml_preserves_order() {
        let set: CardSet = toml::from_str(
            r#"
            page = "/"
            [[records]]
            name = "The Dark Knight"
            type = "movie"
            year = 2008
            "#,
        )
        .unwrap();

        assert_eq!(set.title_field, "name");
        let names: Vec<&str> = set.records[0].fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "type", "year"]);
    }

    #[test]
    fn test_compose_cards_numbers_from_one() {
        let cards = compose_cards(&[shawshank(), shawshank()], "name");
        let ids: Vec<String> = cards.iter().map(|c| c.id().unwrap().to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("director"), "Director");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(7.5).to_string(), "7.5");
    }
}
