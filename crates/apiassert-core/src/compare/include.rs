use super::Comparator;
use crate::errors::Result;
use crate::location::Location;
use crate::policy::KeySet;
use crate::primitives::{assert_count_at, CHECK_FIELD_COUNT};
use serde_json::{Map, Value};

impl Comparator<'_> {
    /// Count gate, then only the included keys.
    ///
    /// An included key missing on either side reads as `null`.
    pub(super) fn compare_included(
        &self,
        actual: &Map<String, Value>,
        expected: &Map<String, Value>,
        keys: &KeySet,
        location: &Location<'_>,
    ) -> Result<()> {
        assert_count_at(CHECK_FIELD_COUNT, actual.len(), expected.len(), location)?;

        for key in keys {
            self.compare_at(actual.get(key), expected.get(key), &location.key(key))?;
        }
        Ok(())
    }
}
