//! Create-or-edit intent carried by admin forms.

use serde::{Deserialize, Serialize};

/// Whether a submitted form creates a new entity or replaces an existing one.
///
/// Forms carry the intent in a hidden `intent` field: an empty value (or the
/// literal `create`) means [`EditIntent::Create`], anything else is the key of
/// the entity being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditIntent<K> {
    Create,
    EditExisting(K),
}

impl<K> EditIntent<K> {
    /// Build an intent from the raw form field, converting the key with `parse`.
    ///
    /// # Errors
    ///
    /// Returns whatever `parse` returns for a non-empty key.
    pub fn from_field<E>(
        raw: Option<&str>,
        parse: impl FnOnce(&str) -> Result<K, E>,
    ) -> Result<Self, E> {
        match raw.map(str::trim) {
            None | Some("" | "create") => Ok(Self::Create),
            Some(key) => parse(key).map(Self::EditExisting),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::DepartmentId;

    #[test]
    fn test_blank_field_means_create() {
        let intent: EditIntent<DepartmentId> =
            EditIntent::from_field(None, str::parse).unwrap();
        assert_eq!(intent, EditIntent::Create);

        let intent: EditIntent<DepartmentId> =
            EditIntent::from_field(Some("  "), str::parse).unwrap();
        assert_eq!(intent, EditIntent::Create);

        let intent: EditIntent<DepartmentId> =
            EditIntent::from_field(Some("create"), str::parse).unwrap();
        assert_eq!(intent, EditIntent::Create);
    }

    #[test]
    fn test_key_means_edit() {
        let intent: EditIntent<DepartmentId> =
            EditIntent::from_field(Some("4"), str::parse).unwrap();
        assert_eq!(intent, EditIntent::EditExisting(DepartmentId::new(4)));
    }

    #[test]
    fn test_bad_key_is_an_error() {
        let intent: Result<EditIntent<DepartmentId>, _> =
            EditIntent::from_field(Some("four"), str::parse);
        assert!(intent.is_err());
    }
}
