//! Typed filters.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::FilterResult;
use crate::field::FieldDescriptor;
use crate::value::FilterValue;

/// One editable search constraint: a field and a value of the field's type.
///
/// A `Filter` can only be built through [`Filter::new`], which checks the
/// value against the field, so every filter in existence is well typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: Arc<FieldDescriptor>,
    value: FilterValue,
}

impl Filter {
    /// Creates a filter, checking the value's shape against the field type.
    ///
    /// Integers are accepted for float fields and widened.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::ValueTypeMismatch` if the value does not fit the
    /// field type, and `FilterError::NonFiniteValue` for NaN or infinite
    /// floats.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lucene_filters::{FieldDescriptor, FieldType, Filter, FilterValue};
    ///
    /// let size = Arc::new(FieldDescriptor::new("size", "Size", FieldType::Integer, FilterValue::Integer(0)));
    /// assert!(Filter::new(size.clone(), FilterValue::Integer(3)).is_ok());
    /// assert!(Filter::new(size, FilterValue::Boolean(true)).is_err());
    /// ```
    pub fn new(field: Arc<FieldDescriptor>, value: FilterValue) -> FilterResult<Self> {
        let value = value.conform_to(&field)?;
        Ok(Self { field, value })
    }

    /// Creates a filter from a value produced by coercion for this field.
    pub(crate) fn coerced(field: Arc<FieldDescriptor>, value: FilterValue) -> Self {
        debug_assert_eq!(value.field_type(), field.field_type);
        Self { field, value }
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Filter", 3)?;
        state.serialize_field("field", &self.field.name)?;
        state.serialize_field("type", &self.field.field_type)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}
