//! The ordered set of fields a query can refer to.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use strsim::levenshtein;

use crate::error::{RegistryError, RegistryResult};
use crate::field::FieldDescriptor;

/// Maximum Levenshtein distance for a field name suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// On-disk layout of a registry file: a `fields` list (`[[fields]]` in TOML).
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

/// Immutable, ordered collection of field descriptors, looked up by exact
/// name.
///
/// Descriptors are shared with the filters built from them, so a registry can
/// be dropped while its filters live on.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<Arc<FieldDescriptor>>,
}

impl FieldRegistry {
    /// Builds a registry, checking names are unique and defaults fit their
    /// field types.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateField` for a repeated name and
    /// `RegistryError::InvalidDefault` for a default value of the wrong shape.
    pub fn new(fields: Vec<FieldDescriptor>) -> RegistryResult<Self> {
        let mut seen = HashSet::new();
        let mut checked = Vec::with_capacity(fields.len());

        for mut field in fields {
            if !seen.insert(field.name.clone()) {
                return Err(RegistryError::DuplicateField { name: field.name });
            }
            field.default_value = field
                .default_value
                .clone()
                .conform_to(&field)
                .map_err(RegistryError::InvalidDefault)?;
            checked.push(Arc::new(field));
        }

        Ok(Self { fields: checked })
    }

    /// Parses a registry from TOML with a `[[fields]]` array.
    pub fn from_toml_str(content: &str) -> RegistryResult<Self> {
        let file: RegistryFile = toml::from_str(content)?;
        Self::new(file.fields)
    }

    /// Parses a registry from a JSON object with a `fields` array.
    pub fn from_json_str(content: &str) -> RegistryResult<Self> {
        let file: RegistryFile = serde_json::from_str(content)?;
        Self::new(file.fields)
    }

    /// Loads a registry file. Files ending in `.json` are read as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let registry = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            fields = registry.len(),
            "loaded field registry"
        );
        Ok(registry)
    }

    /// Looks up a field by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Iterates the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(|field| field.as_ref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Suggests a known field name close to `name`, ignoring case.
    ///
    /// Registered names and names further than a few edits away yield
    /// `None`. A name differing only in case suggests the registered
    /// spelling, since lookups are case-sensitive.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        if self.get(name).is_some() {
            return None;
        }
        let query = name.to_lowercase();

        let (best_match, best_distance) = self
            .fields
            .iter()
            .map(|field| (field.name.as_str(), levenshtein(&query, &field.name.to_lowercase())))
            .min_by_key(|(_, distance)| *distance)?;

        (best_distance <= MAX_SUGGESTION_DISTANCE).then_some(best_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::FilterValue;

    fn registry() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDescriptor::implicit("Text"),
            FieldDescriptor::new("priority", "Priority", FieldType::Integer, FilterValue::Integer(1)),
            FieldDescriptor::new("ratio", "Ratio", FieldType::Float, FilterValue::Integer(1)),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_exact_name() {
        let registry = registry();
        assert!(registry.get("priority").is_some());
        assert!(registry.get("Priority").is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_default_is_widened() {
        let registry = registry();
        assert_eq!(
            registry.get("ratio").unwrap().default_value,
            FilterValue::Float(1.0)
        );
    }

    #[test]
    fn test_duplicate_field() {
        let err = FieldRegistry::new(vec![
            FieldDescriptor::implicit("Text"),
            FieldDescriptor::implicit("Again"),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateField { name } if name == "<implicit>"));
    }

    #[test]
    fn test_invalid_default() {
        let err = FieldRegistry::new(vec![FieldDescriptor::new(
            "flag",
            "Flag",
            FieldType::Boolean,
            FilterValue::String("no".to_string()),
        )])
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDefault(_)));
    }

    #[test]
    fn test_suggest() {
        let registry = registry();
        assert_eq!(registry.suggest("priorty"), Some("priority"));
        assert_eq!(registry.suggest("PRIORITY"), Some("priority"));
        assert_eq!(registry.suggest("priority"), None);
        assert_eq!(registry.suggest("completely-different"), None);
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
            [[fields]]
            name = "<implicit>"
            display_name = "Text"
            type = "string"
            default_value = ""

            [[fields]]
            name = "size"
            display_name = "Size"
            type = "integer-range"
            default_value = [2, 8]
            constraints = { min = 0, max = 10 }
        "#;
        let registry = FieldRegistry::from_toml_str(toml).unwrap();
        let size = registry.get("size").unwrap();
        assert_eq!(size.default_value, FilterValue::IntegerRange(2, 8));
        assert_eq!(size.bounds(), Some((0.0, 10.0)));
    }

    #[test]
    fn test_from_toml_str_rejects_bad_type() {
        let toml = r#"
            [[fields]]
            name = "x"
            display_name = "X"
            type = "date"
            default_value = ""
        "#;
        assert!(matches!(
            FieldRegistry::from_toml_str(toml),
            Err(RegistryError::Toml(_))
        ));
    }
}
