//! Ordered multiset of tagged key parameters (spec.md §3, §4.1).
//!
//! Deliberately `Vec`-backed rather than a keyed map: `PURPOSE`, `DIGEST`,
//! `PADDING`, `BLOCK_MODE`, and `USER_SECURE_ID` are all legally repeatable,
//! and ordering is observable (spec.md §9: "Avoid a keyed-map representation").

use keymint_types::{KeyParameter, ParamValue, Tag};

/// An ordered, non-deduplicating collection of [`KeyParameter`]s.
///
/// Every key carries two of these (`hw_enforced`, `sw_enforced`); every
/// operation's request/response params are also one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationSet {
    params: Vec<KeyParameter>,
}

impl AuthorizationSet {
    pub fn new() -> Self {
        AuthorizationSet::default()
    }

    /// Builds a set from an already-flattened parameter buffer, preserving
    /// order (spec.md §4.1: "construction from a flat parameter buffer").
    pub fn from_vec(params: Vec<KeyParameter>) -> Self {
        AuthorizationSet { params }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyParameter> {
        self.params.iter()
    }

    /// Appends `param` at the end. Never deduplicates (spec.md §4.1:
    /// "preserves prior ordering and does not deduplicate").
    pub fn push_back(&mut self, param: KeyParameter) {
        self.params.push(param);
    }

    /// Index of the first entry with the given tag, or `None`
    /// (spec.md §4.1: "`find` returns the index of the first occurrence or a
    /// sentinel").
    pub fn find(&self, tag: Tag) -> Option<usize> {
        self.params.iter().position(|p| p.tag == tag)
    }

    /// Removes the entry at `index`. No-op if out of range — callers
    /// generally derive `index` from [`AuthorizationSet::find`], which
    /// already observed the set.
    pub fn erase(&mut self, index: usize) {
        if index < self.params.len() {
            self.params.remove(index);
        }
    }

    /// The typed value of the first entry with `tag`, if present
    /// (spec.md §4.1: "`GetTagValue(tag, &out)`: returns true iff the tag is
    /// present and its value matches the tag's declared type").
    pub fn get_tag_value(&self, tag: Tag) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|p| p.tag == tag)
            .map(|p| &p.value)
            .filter(|value| value.matches_tag_type(tag.tag_type()))
    }

    /// True iff some entry has both `tag` and `value`
    /// (spec.md §4.1: "`Contains(tag, expected_value)`").
    pub fn contains(&self, tag: Tag, value: &ParamValue) -> bool {
        self.params
            .iter()
            .any(|p| p.tag == tag && &p.value == value)
    }

    /// True iff some entry has `tag`, regardless of value.
    pub fn contains_tag(&self, tag: Tag) -> bool {
        self.find(tag).is_some()
    }
}

impl FromIterator<KeyParameter> for AuthorizationSet {
    fn from_iter<I: IntoIterator<Item = KeyParameter>>(iter: I) -> Self {
        AuthorizationSet::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymint_types::tag::{TAG_ALGORITHM, TAG_PURPOSE};

    #[test]
    fn push_back_preserves_order_and_duplicates() {
        let mut set = AuthorizationSet::new();
        set.push_back(KeyParameter::enum_value(TAG_PURPOSE, 0));
        set.push_back(KeyParameter::enum_value(TAG_PURPOSE, 1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.find(TAG_PURPOSE), Some(0));
    }

    #[test]
    fn erase_removes_only_the_targeted_index() {
        let mut set = AuthorizationSet::new();
        set.push_back(KeyParameter::enum_value(TAG_PURPOSE, 0));
        set.push_back(KeyParameter::enum_value(TAG_PURPOSE, 1));
        set.erase(0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_tag_value(TAG_PURPOSE), Some(&ParamValue::Enum(1)));
    }

    #[test]
    fn get_tag_value_rejects_a_type_mismatched_entry() {
        // TAG_ALGORITHM is an Enum tag; this would only happen from a
        // miscoded collaborator, but GetTagValue must not paper over it.
        let mut set = AuthorizationSet::new();
        set.push_back(KeyParameter::uint(TAG_ALGORITHM, 7));
        assert_eq!(set.get_tag_value(TAG_ALGORITHM), None);
    }

    #[test]
    fn contains_checks_tag_and_value_together() {
        let mut set = AuthorizationSet::new();
        set.push_back(KeyParameter::enum_value(TAG_PURPOSE, 2));
        assert!(set.contains(TAG_PURPOSE, &ParamValue::Enum(2)));
        assert!(!set.contains(TAG_PURPOSE, &ParamValue::Enum(3)));
    }
}
