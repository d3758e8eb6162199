use super::Comparator;
use crate::errors::Result;
use crate::location::Location;
use crate::primitives::{assert_true_at, CHECK_ELEMENT_FOUND, MSG_ELEMENT_NOT_FOUND};
use serde_json::Value;

impl Comparator<'_> {
    /// For each actual element, find the first expected element equal to it,
    /// then compare the pair under the current policy.
    ///
    /// Several actual elements may pair with the same expected element.
    pub(super) fn match_unordered(
        &self,
        actual: &[Value],
        expected: &[Value],
        location: &Location<'_>,
    ) -> Result<()> {
        for (i, element) in actual.iter().enumerate() {
            let here = location.index(i);
            let found = expected.iter().position(|candidate| candidate == element);
            assert_true_at(
                CHECK_ELEMENT_FOUND,
                found.is_some(),
                MSG_ELEMENT_NOT_FOUND,
                &here,
            )?;
            if let Some(j) = found {
                self.compare_at(Some(element), expected.get(j), &here)?;
            }
        }
        Ok(())
    }
}
