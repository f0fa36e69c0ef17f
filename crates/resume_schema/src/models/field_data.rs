use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::schema::{FieldSchema, SectionSchema};

/// Field values of a dynamic item, keyed by field name, in stored order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FieldData(Map<String, Value>);

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Binds this data to its schema, if one is known.
    pub fn view<'a>(&'a self, schema: Option<&'a SectionSchema>) -> ItemDataView<'a> {
        match schema {
            Some(schema) => ItemDataView::Typed { schema, data: self },
            None => ItemDataView::Opaque(self),
        }
    }
}

impl From<Map<String, Value>> for FieldData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for FieldData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Item data seen through its schema, or as an opaque bag when the schema is unknown.
#[derive(Debug, Clone, Copy)]
pub enum ItemDataView<'a> {
    Typed {
        schema: &'a SectionSchema,
        data: &'a FieldData,
    },
    Opaque(&'a FieldData),
}

impl<'a> ItemDataView<'a> {
    pub fn is_typed(&self) -> bool {
        matches!(self, ItemDataView::Typed { .. })
    }

    pub fn raw(&self) -> &'a FieldData {
        match *self {
            ItemDataView::Typed { data, .. } => data,
            ItemDataView::Opaque(data) => data,
        }
    }

    /// Reads a field. Typed views only expose keys the schema declares.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match *self {
            ItemDataView::Typed { schema, data } => {
                if schema.declares(key) {
                    data.get(key)
                } else {
                    None
                }
            }
            ItemDataView::Opaque(data) => data.get(key),
        }
    }

    /// Declared fields paired with their values, in schema order.
    pub fn declared_fields(&self) -> Vec<(&'a FieldSchema, Option<&'a Value>)> {
        match *self {
            ItemDataView::Typed { schema, data } => schema
                .fields
                .iter()
                .map(|field| (field, data.get(&field.key)))
                .collect(),
            ItemDataView::Opaque(_) => Vec::new(),
        }
    }

    /// Keys present in the data that the schema does not declare.
    pub fn undeclared_keys(&self) -> Vec<&'a str> {
        match *self {
            ItemDataView::Typed { schema, data } => {
                data.keys().filter(|k| !schema.declares(k)).collect()
            }
            ItemDataView::Opaque(_) => Vec::new(),
        }
    }

    /// Required fields that are absent or hold an empty string.
    pub fn missing_required(&self) -> Vec<&'a str> {
        match *self {
            ItemDataView::Typed { schema, data } => schema
                .fields
                .iter()
                .filter(|f| f.required)
                .filter(|f| match data.get(&f.key) {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.trim().is_empty(),
                    Some(_) => false,
                })
                .map(|f| f.key.as_str())
                .collect(),
            ItemDataView::Opaque(_) => Vec::new(),
        }
    }
}
