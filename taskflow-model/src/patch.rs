//! Tri-state patch field for shallow-merge updates.

/// A single field of a partial update.
///
/// Update inputs merge shallowly onto the stored record: a field that is
/// not present in the patch is preserved. For optional entity fields a
/// plain `Option` cannot distinguish "leave unchanged" from "clear", so
/// patches use this three-valued type instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value unchanged.
    #[default]
    Keep,
    /// Clear the stored value to `None`.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Applies this patch to an optional field in place.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *field = None,
            Self::Set(value) => *field = Some(value),
        }
    }

    /// Returns `true` if this patch leaves the field unchanged.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `Some(v)` becomes `Set(v)`, `None` becomes `Clear`.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}
