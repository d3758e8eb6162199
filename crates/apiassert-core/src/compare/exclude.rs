use super::Comparator;
use crate::document::masked_copy;
use crate::errors::Result;
use crate::location::Location;
use crate::policy::KeySet;
use crate::primitives::{assert_count_at, CHECK_FIELD_COUNT};
use serde_json::{Map, Value};

impl Comparator<'_> {
    /// Count gate, then every expected key that is not excluded.
    ///
    /// Excluded keys still count towards the gate.
    pub(super) fn compare_excluded(
        &self,
        actual: &Map<String, Value>,
        expected: &Map<String, Value>,
        keys: &KeySet,
        location: &Location<'_>,
    ) -> Result<()> {
        assert_count_at(CHECK_FIELD_COUNT, actual.len(), expected.len(), location)?;

        for (key, value) in expected {
            if keys.contains(key) {
                continue;
            }
            self.compare_at(actual.get(key), Some(value), &location.key(key))?;
        }
        Ok(())
    }

    /// Unordered lookup with excluded keys overwritten on both sides.
    ///
    /// Matched pairs are compared in their masked form, so relative keys
    /// such as `meta.ts` stay hidden below the element as well. Masking works
    /// on copies; the caller's documents are never touched.
    pub(super) fn match_masked(
        &self,
        actual: &[Value],
        expected: &[Value],
        keys: &KeySet,
        location: &Location<'_>,
    ) -> Result<()> {
        let masked_actual = masked_copy(actual, keys);
        let masked_expected = masked_copy(expected, keys);
        self.match_unordered(&masked_actual, &masked_expected, location)
    }
}
