//! Shared pieces of the tab-separated exchange grammar.

use crate::{axes::indexer::Axis, model::overlay::OverlayKind};

/// First header column.
pub(crate) const TABLE_TAG: &str = "Overlay";
/// Header columns after the axis declarations.
pub(crate) const COLUMNS: [&str; 9] = [
    "x1", "y1", "x2", "y2", "text", "color", "filled", "group", "notes",
];
/// Placeholder for a field the row's variant does not have.
pub(crate) const NOT_APPLICABLE: &str = "N/A";
/// Column line opening every node block.
pub(crate) const NODE_COLUMNS: &str = "X\tY";

/// `Name (len)`
pub(crate) fn axis_label(axis: &Axis) -> String {
    format!("{} ({})", axis.name, axis.length)
}

pub(crate) fn parse_axis_label(field: &str) -> Option<Axis> {
    let (name, rest) = field.rsplit_once(" (")?;
    let length = rest.strip_suffix(')')?.trim().parse().ok()?;
    Some(Axis::new(name, length))
}

/// `# <Type> <k> nodes:` with a 1-based ordinal `k`.
pub(crate) fn node_header(kind: OverlayKind, ordinal: usize) -> String {
    format!("# {kind} {ordinal} nodes:")
}

/// Type name and ordinal of a node block header line.
pub(crate) fn parse_node_header(line: &str) -> Option<(&str, usize)> {
    let rest = line.strip_prefix('#')?;
    let mut tokens = rest.split_whitespace();
    let (kind, ordinal, tail) = (tokens.next()?, tokens.next()?, tokens.next()?);
    if tail != "nodes:" || tokens.next().is_some() {
        return None;
    }
    Some((kind, ordinal.parse().ok()?))
}

/// Replace characters that would break the row structure.
pub(crate) fn sanitize(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
#[path = "../../tests/unit/codec/format.rs"]
mod tests;
