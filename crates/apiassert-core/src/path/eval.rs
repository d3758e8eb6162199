//! Segment evaluation over `serde_json::Value` trees.

use super::{FilterOp, Segment};
use serde_json::Value;

pub(super) fn select<'a>(root: &'a Value, segments: &[Segment]) -> Vec<&'a Value> {
    let mut current = vec![root];
    for segment in segments {
        let mut next = Vec::new();
        for node in current {
            apply(segment, node, &mut next);
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

fn apply<'a>(segment: &Segment, node: &'a Value, out: &mut Vec<&'a Value>) {
    match segment {
        Segment::Child(name) => {
            if let Some(child) = node.as_object().and_then(|map| map.get(name)) {
                out.push(child);
            }
        }
        Segment::Index(index) => {
            if let Value::Array(items) = node {
                if let Some(i) = normalize_index(*index, items.len()) {
                    out.push(&items[i]);
                }
            }
        }
        Segment::Slice { start, end } => {
            if let Value::Array(items) = node {
                let (from, to) = slice_bounds(*start, *end, items.len());
                out.extend(items[from..to].iter());
            }
        }
        Segment::Wildcard => match node {
            Value::Object(map) => out.extend(map.values()),
            Value::Array(items) => out.extend(items.iter()),
            _ => {}
        },
        Segment::Descendant(name) => descend(node, name, out),
        Segment::Filter { field, op, value } => {
            if let Value::Array(items) = node {
                out.extend(items.iter().filter(|item| matches_filter(item, field, *op, value)));
            }
        }
    }
}

/// Pre-order walk collecting every `name` member at or below `node`.
fn descend<'a>(node: &'a Value, name: &str, out: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            if let Some(hit) = map.get(name) {
                out.push(hit);
            }
            for child in map.values() {
                descend(child, name, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                descend(child, name, out);
            }
        }
        _ => {}
    }
}

fn matches_filter(item: &Value, field: &str, op: FilterOp, value: &Value) -> bool {
    let Some(actual) = item.as_object().and_then(|map| map.get(field)) else {
        return false;
    };
    match op {
        FilterOp::Eq => actual == value,
        FilterOp::Ne => actual != value,
    }
}

fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let i = if index < 0 { len + index } else { index };
    if (0..len).contains(&i) {
        usize::try_from(i).ok()
    } else {
        None
    }
}

fn slice_bounds(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let clamp = |bound: i64| -> usize {
        let b = if bound < 0 { signed_len + bound } else { bound };
        usize::try_from(b.clamp(0, signed_len)).unwrap_or(0)
    };
    let from = start.map_or(0, clamp);
    let to = end.map_or(len, clamp);
    (from, to.max(from))
}

pub(super) fn assign(node: &mut Value, segments: &[Segment], value: &Value) -> usize {
    let Some((head, rest)) = segments.split_first() else {
        *node = value.clone();
        return 1;
    };

    match head {
        Segment::Child(name) => match node {
            Value::Object(map) if rest.is_empty() => {
                map.insert(name.clone(), value.clone());
                1
            }
            Value::Object(map) => map
                .get_mut(name)
                .map_or(0, |child| assign(child, rest, value)),
            _ => 0,
        },
        Segment::Index(index) => match node {
            Value::Array(items) => match normalize_index(*index, items.len()) {
                Some(i) => assign(&mut items[i], rest, value),
                None => 0,
            },
            _ => 0,
        },
        Segment::Slice { start, end } => match node {
            Value::Array(items) => {
                let (from, to) = slice_bounds(*start, *end, items.len());
                items[from..to]
                    .iter_mut()
                    .map(|item| assign(item, rest, value))
                    .sum()
            }
            _ => 0,
        },
        Segment::Wildcard => match node {
            Value::Object(map) => map
                .values_mut()
                .map(|child| assign(child, rest, value))
                .sum(),
            Value::Array(items) => items
                .iter_mut()
                .map(|item| assign(item, rest, value))
                .sum(),
            _ => 0,
        },
        Segment::Filter {
            field,
            op,
            value: wanted,
        } => match node {
            Value::Array(items) => items
                .iter_mut()
                .filter(|item| matches_filter(item, field, *op, wanted))
                .map(|item| assign(item, rest, value))
                .sum(),
            _ => 0,
        },
        Segment::Descendant(_) => 0,
    }
}
