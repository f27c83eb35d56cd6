use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    String,
    Array,
}

/// Structured-output contract sent to the model, in the provider's schema
/// dialect. The same value validates what comes back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResponseSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

fn violation(path: &str, reason: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

impl ResponseSchema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            enum_values: Vec::new(),
            min_length: None,
            items: None,
            min_items: None,
            max_items: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.min_length = Some(1);
        self
    }

    pub fn items_between(mut self, min: usize, max: usize) -> Self {
        self.min_items = Some(min);
        self.max_items = Some(max);
        self
    }

    /// Adds a required property; declaration order is kept in `propertyOrdering`.
    pub fn required_property(mut self, name: &str, schema: ResponseSchema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self.property_ordering.push(name.to_string());
        self.required.push(name.to_string());
        self
    }

    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), SchemaViolation> {
        match self.kind {
            SchemaType::Object => {
                let map = value
                    .as_object()
                    .ok_or_else(|| violation(path, "expected an object"))?;

                for name in &self.required {
                    match map.get(name) {
                        None | Some(Value::Null) => {
                            return Err(violation(path, format!("missing required field '{}'", name)));
                        }
                        Some(_) => {}
                    }
                }

                for (name, schema) in &self.properties {
                    if let Some(field) = map.get(name) {
                        schema.validate_at(field, &format!("{}.{}", path, name))?;
                    }
                }
                Ok(())
            }
            SchemaType::String => {
                let s = value
                    .as_str()
                    .ok_or_else(|| violation(path, "expected a string"))?;

                if let Some(min) = self.min_length {
                    if s.trim().chars().count() < min {
                        return Err(violation(path, "string is empty"));
                    }
                }

                if !self.enum_values.is_empty() && !self.enum_values.iter().any(|v| v == s) {
                    return Err(violation(
                        path,
                        format!("'{}' is not one of [{}]", s, self.enum_values.join(", ")),
                    ));
                }
                Ok(())
            }
            SchemaType::Array => {
                let items = value
                    .as_array()
                    .ok_or_else(|| violation(path, "expected an array"))?;

                if let Some(min) = self.min_items {
                    if items.len() < min {
                        return Err(violation(path, format!("expected at least {} items, got {}", min, items.len())));
                    }
                }
                if let Some(max) = self.max_items {
                    if items.len() > max {
                        return Err(violation(path, format!("expected at most {} items, got {}", max, items.len())));
                    }
                }

                if let Some(item_schema) = &self.items {
                    for (i, item) in items.iter().enumerate() {
                        item_schema.validate_at(item, &format!("{}[{}]", path, i))?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Schema the equity analysis must conform to.
pub fn analysis_schema() -> ResponseSchema {
    ResponseSchema::object()
        .required_property(
            "summary",
            ResponseSchema::string()
                .describe("A brief executive summary of the company's recent situation.")
                .non_empty(),
        )
        .required_property(
            "bullishCase",
            ResponseSchema::string()
                .describe("Arguments for why the stock price might go up.")
                .non_empty(),
        )
        .required_property(
            "bearishCase",
            ResponseSchema::string()
                .describe("Arguments for why the stock price might go down.")
                .non_empty(),
        )
        .required_property(
            "keyRisks",
            ResponseSchema::array(ResponseSchema::string().non_empty())
                .describe("List of 3-5 major risks facing the company.")
                .items_between(3, 5),
        )
        .required_property(
            "recommendation",
            ResponseSchema::string()
                .describe("A general consensus based on the analysis.")
                .one_of(Recommendation::ALL.iter().map(|r| r.as_str())),
        )
}
