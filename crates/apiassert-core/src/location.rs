//! Locations inside a document, for failure reports.
//!
//! A location is a borrowed chain from the node being compared back to the
//! path expression it was reached from. Nothing is rendered unless a
//! failure or a trace event needs it.

use std::fmt;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Location<'a> {
    Root(&'a str),
    Key(&'a Location<'a>, &'a str),
    Index(&'a Location<'a>, usize),
}

impl<'a> Location<'a> {
    pub(crate) fn root(label: &'a str) -> Self {
        Location::Root(label)
    }

    pub(crate) fn key<'b>(&'b self, key: &'b str) -> Location<'b> {
        Location::Key(self, key)
    }

    pub(crate) fn index(&self, index: usize) -> Location<'_> {
        Location::Index(self, index)
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root(label) => f.write_str(label),
            Location::Key(parent, key) if is_plain_key(key) => write!(f, "{}.{}", parent, key),
            Location::Key(parent, key) => {
                write!(f, "{}['{}']", parent, key.replace('\'', "\\'"))
            }
            Location::Index(parent, index) => write!(f, "{}[{}]", parent, index),
        }
    }
}
