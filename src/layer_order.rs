//! Layer ordering: turns layer labels into depth ranks.
//!
//! A label names a physical section. Three naming conventions are recognized,
//! tried in order:
//!
//! 1. `<digits>[letter] <r|c word>/<word>`, e.g. `12 r/left` or `7b cau/x`:
//!    the axis is the first letter of the word before the slash.
//! 2. `Section <digits>` (any case): a row.
//! 3. `Sezione <digits>cau` (any case): a column.
//!
//! Rows come before columns; rows ascend and columns descend by their number.
//! When either side has no axis the raw labels are compared instead, as
//! integers if both are numeric. That mix of rules is not guaranteed to be
//! transitive, so layers are ordered with a stable insertion sort that only
//! ever consults the comparator pairwise and cannot fail on a cycle.

use std::cmp::Ordering;

/// Sequence value of a label that matches no convention.
pub const UNPARSED_SEQUENCE: i64 = -1;

/// Section axis encoded in a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    fn from_marker(c: char) -> Option<Axis> {
        match c {
            'r' => Some(Axis::Row),
            'c' => Some(Axis::Column),
            _ => None,
        }
    }
}

/// Ordering key derived from a layer label. Never used as identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerKey {
    pub sequence: i64,
    pub axis: Option<Axis>,
}

impl LayerKey {
    pub fn parse(label: &str) -> Self {
        let parsed = match_slide(label)
            .or_else(|| match_keyword(label, "section", "").map(|n| (n, Axis::Row)))
            .or_else(|| match_keyword(label, "sezione", "cau").map(|n| (n, Axis::Column)));
        match parsed {
            Some((sequence, axis)) => Self {
                sequence,
                axis: Some(axis),
            },
            None => Self {
                sequence: UNPARSED_SEQUENCE,
                axis: None,
            },
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.axis.is_some()
    }
}

// ============================================================================
// Label patterns
// ============================================================================

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `<digits>[a-z]? \s+ ([rc]\w*) / \w+` anywhere in the label.
fn match_slide(label: &str) -> Option<(i64, Axis)> {
    let chars: Vec<char> = label.chars().collect();
    for start in 0..chars.len() {
        if !chars[start].is_ascii_digit() || (start > 0 && chars[start - 1].is_ascii_digit()) {
            continue;
        }
        let mut end = start;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
        let has_letter = end < chars.len() && chars[end].is_ascii_lowercase();
        let tails: &[usize] = if has_letter { &[end + 1, end] } else { &[end] };
        for &tail in tails {
            if let Some(axis) = match_axis_word(&chars[tail..]) {
                let digits: String = chars[start..end].iter().collect();
                if let Ok(n) = digits.parse::<i64>() {
                    return Some((n, axis));
                }
            }
        }
    }
    None
}

/// `\s+ ([rc]\w*) / \w+` at the start of `rest`.
fn match_axis_word(rest: &[char]) -> Option<Axis> {
    let mut i = 0;
    while i < rest.len() && rest[i].is_whitespace() {
        i += 1;
    }
    if i == 0 || i >= rest.len() {
        return None;
    }
    let axis = Axis::from_marker(rest[i])?;
    i += 1;
    while i < rest.len() && is_word_char(rest[i]) {
        i += 1;
    }
    if rest.get(i) != Some(&'/') {
        return None;
    }
    match rest.get(i + 1) {
        Some(&c) if is_word_char(c) => Some(axis),
        _ => None,
    }
}

/// `<keyword> \s* (\d+) <suffix>`, case-insensitive, anywhere in the label.
fn match_keyword(label: &str, keyword: &str, suffix: &str) -> Option<i64> {
    let lower = label.to_ascii_lowercase();
    for (pos, _) in lower.match_indices(keyword) {
        let rest = lower[pos + keyword.len()..].trim_start();
        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 || !rest[digits_len..].starts_with(suffix) {
            continue;
        }
        if let Ok(n) = rest[..digits_len].parse::<i64>() {
            return Some(n);
        }
    }
    None
}

// ============================================================================
// Comparison and sorting
// ============================================================================

/// Compare two layers given their raw labels and derived keys.
pub fn compare_layers(a_label: &str, a: &LayerKey, b_label: &str, b: &LayerKey) -> Ordering {
    match (a.axis, b.axis) {
        (Some(Axis::Row), Some(Axis::Column)) => Ordering::Less,
        (Some(Axis::Column), Some(Axis::Row)) => Ordering::Greater,
        (Some(Axis::Row), Some(Axis::Row)) => a.sequence.cmp(&b.sequence),
        (Some(Axis::Column), Some(Axis::Column)) => b.sequence.cmp(&a.sequence),
        _ => compare_raw_labels(a_label, b_label),
    }
}

/// Integers if both labels are numeric, otherwise lexicographic.
pub fn compare_raw_labels(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable insertion sort driven only by pairwise comparisons.
///
/// An element moves left only past neighbours that compare strictly greater,
/// so equal elements keep their input order and an inconsistent comparator
/// still yields a deterministic permutation.
pub fn insertion_sort_by<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Indices of `labels` in sorted layer order. Position in the result is the depth.
pub fn sorted_order(labels: &[&str]) -> Vec<usize> {
    let keys: Vec<LayerKey> = labels.iter().map(|l| LayerKey::parse(l)).collect();
    let mut order: Vec<usize> = (0..labels.len()).collect();
    insertion_sort_by(&mut order, |&a, &b| {
        compare_layers(labels[a], &keys[a], labels[b], &keys[b])
    });
    order
}
