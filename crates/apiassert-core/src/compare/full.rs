use super::Comparator;
use crate::errors::Result;
use crate::location::Location;
use crate::policy::KeyCoverage;
use crate::primitives::{assert_true_at, CHECK_KEY_PRESENT, MSG_KEY_MISSING};
use serde_json::{Map, Value};

impl Comparator<'_> {
    /// Walk every key of the actual object.
    pub(super) fn compare_objects(
        &self,
        actual: &Map<String, Value>,
        expected: &Map<String, Value>,
        location: &Location<'_>,
    ) -> Result<()> {
        if self.coverage == KeyCoverage::Both {
            for key in expected.keys() {
                assert_true_at(
                    CHECK_KEY_PRESENT,
                    actual.contains_key(key),
                    MSG_KEY_MISSING,
                    &location.key(key),
                )?;
            }
        }

        for (key, value) in actual {
            self.compare_at(Some(value), expected.get(key), &location.key(key))?;
        }
        Ok(())
    }
}
