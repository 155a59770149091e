//! # Schema Descriptions
//!
//! An explicit, ordered description of a resource's editable fields.
//! Produced by whoever owns the resource's validation schema and consumed
//! by form renderers, so nothing downstream needs to reflect over a
//! validation library's internals.

use serde::{Deserialize, Serialize};

/// Field value categories a renderer can dispatch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Date,
    Select,
    Unknown,
}

/// One editable field of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }
}

/// Ordered list of field descriptors for one resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaDescription {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_preserves_order() {
        let schema = SchemaDescription::new(vec![
            FieldDescriptor::new("name", FieldKind::Text, true),
            FieldDescriptor::new("seats", FieldKind::Number, false),
            FieldDescriptor::new("date", FieldKind::Date, true),
        ]);

        assert_eq!(schema.fields[0].name, "name");
        assert_eq!(schema.field("seats").unwrap().kind, FieldKind::Number);
        assert!(schema.field("missing").is_none());

        let required: Vec<_> = schema.required_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(required, vec!["name", "date"]);
    }
}
