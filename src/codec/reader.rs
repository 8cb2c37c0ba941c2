use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context;
use kurbo::Point;

use crate::{
    axes::indexer::{Axes, Axis},
    codec::format::{
        COLUMNS, NODE_COLUMNS, NOT_APPLICABLE, TABLE_TAG, axis_label, parse_axis_label,
        parse_node_header,
    },
    foundation::{
        core::Rgb8,
        error::{OverlayError, OverlayResult},
    },
    model::{
        noded::NodedCurve,
        overlay::{Overlay, OverlayKind, Shape},
        text::{TextLabel, TextMetrics},
    },
    store::slices::OverlayStore,
};

/// Outcome of a successful read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Overlays added to the store.
    pub overlays: usize,
    /// Rows dropped because of a malformed color.
    pub skipped_rows: usize,
}

/// Read an exchange-format table into `store`.
///
/// The header must declare exactly the store's axes. Nothing is added unless
/// the whole input parses; the first structural problem aborts with a
/// [`OverlayError::Format`] naming its line. Rows with a malformed color are
/// the exception: they are logged, skipped and counted.
#[tracing::instrument(skip_all)]
pub fn read_overlays<R: BufRead>(
    input: R,
    store: &mut OverlayStore,
) -> OverlayResult<ReadSummary> {
    let mut parser = Parser::new(
        store.axes(),
        store.metrics(),
        store.options().text_point_size,
    );
    let mut last = 0;
    for (i, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("read overlay table line {}", i + 1))?;
        parser.feed(i + 1, &line)?;
        last = i + 1;
    }
    let skipped_rows = parser.skipped_rows;
    let staged = parser.finish(last)?;

    let overlays = staged.len();
    for (position, overlay) in staged {
        store.add(overlay, &position);
    }
    tracing::debug!(overlays, skipped_rows, "read overlay table");
    Ok(ReadSummary {
        overlays,
        skipped_rows,
    })
}

/// [`read_overlays`] over an in-memory table.
pub fn read_overlays_str(text: &str, store: &mut OverlayStore) -> OverlayResult<ReadSummary> {
    read_overlays(text.as_bytes(), store)
}

/// [`read_overlays`] from the file at `path`.
pub fn read_overlays_file(
    path: impl AsRef<Path>,
    store: &mut OverlayStore,
) -> OverlayResult<ReadSummary> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("open overlay file '{}'", path.display()))?;
    read_overlays(BufReader::new(file), store)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    WaitingForHeader,
    InTable,
    InNodeBlock,
}

/// A parsed row, in file order.
enum Row {
    Ready(Vec<usize>, Overlay),
    /// Index into `Parser::noded`.
    Noded(usize),
}

/// A freeform/polyline row waiting for its node block.
struct NodedRow {
    line: usize,
    kind: OverlayKind,
    /// `None` for a row skipped over its color; its block is still consumed.
    template: Option<(Vec<usize>, Rgb8, String, String)>,
    nodes: Option<Vec<Point>>,
}

struct OpenBlock {
    header_line: usize,
    ordinal: usize,
    saw_columns: bool,
    nodes: Vec<Point>,
}

struct Parser<'a> {
    axes: &'a Axes,
    metrics: &'a dyn TextMetrics,
    point_size: f64,
    state: State,
    rows: Vec<Row>,
    noded: Vec<NodedRow>,
    block: Option<OpenBlock>,
    blocks_seen: usize,
    skipped_rows: usize,
}

impl<'a> Parser<'a> {
    fn new(axes: &'a Axes, metrics: &'a dyn TextMetrics, point_size: f64) -> Self {
        Self {
            axes,
            metrics,
            point_size,
            state: State::WaitingForHeader,
            rows: Vec::new(),
            noded: Vec::new(),
            block: None,
            blocks_seen: 0,
            skipped_rows: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> OverlayResult<()> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let blank = line.trim().is_empty();

        match self.state {
            State::WaitingForHeader => {
                if blank || line.starts_with('#') {
                    return Ok(());
                }
                self.parse_header(line_no, line)?;
                self.state = State::InTable;
            }
            State::InTable => {
                if blank {
                    return Ok(());
                }
                if let Some((kind, ordinal)) = parse_node_header(line) {
                    self.open_block(line_no, kind, ordinal)?;
                    self.state = State::InNodeBlock;
                } else if !line.starts_with('#') {
                    self.parse_row(line_no, line)?;
                }
            }
            State::InNodeBlock => {
                if blank {
                    return self.close_block(line_no);
                }
                if line.starts_with('#') {
                    self.close_block(line_no)?;
                    if let Some((kind, ordinal)) = parse_node_header(line) {
                        self.open_block(line_no, kind, ordinal)?;
                    }
                    return Ok(());
                }
                let Some(block) = self.block.as_mut() else {
                    return Err(OverlayError::format(
                        line_no,
                        "table rows must come before the node blocks",
                    ));
                };
                if !block.saw_columns {
                    if line.trim() != NODE_COLUMNS {
                        return Err(OverlayError::format(
                            line_no,
                            "node block must start with an 'X<tab>Y' column line",
                        ));
                    }
                    block.saw_columns = true;
                } else {
                    block.nodes.push(parse_node(line_no, line)?);
                }
            }
        }
        Ok(())
    }

    fn finish(mut self, last_line: usize) -> OverlayResult<Vec<(Vec<usize>, Overlay)>> {
        if self.state == State::WaitingForHeader {
            return Err(OverlayError::format(
                last_line.max(1),
                "no 'Overlay' header line found",
            ));
        }
        self.close_block(last_line + 1)?;
        if let Some(missing) = self.noded.get(self.blocks_seen) {
            return Err(OverlayError::format(
                missing.line,
                format!(
                    "{} row {} has no node block",
                    missing.kind,
                    self.blocks_seen + 1
                ),
            ));
        }

        let mut noded: Vec<Option<NodedRow>> = self.noded.into_iter().map(Some).collect();
        let mut out = Vec::with_capacity(self.rows.len());
        for row in self.rows {
            match row {
                Row::Ready(position, overlay) => out.push((position, overlay)),
                Row::Noded(index) => {
                    let Some(NodedRow {
                        line,
                        kind,
                        template: Some((position, color, group, notes)),
                        nodes: Some(nodes),
                    }) = noded.get_mut(index).and_then(Option::take)
                    else {
                        continue;
                    };
                    let curve = NodedCurve::new(nodes)
                        .map_err(|e| OverlayError::format(line, e.to_string()))?;
                    let shape = match kind {
                        OverlayKind::Freeform => Shape::Freeform(curve),
                        _ => Shape::Polyline(curve),
                    };
                    let mut overlay = Overlay::new(shape).with_color(color);
                    overlay.group = group;
                    overlay.notes = notes;
                    out.push((position, overlay));
                }
            }
        }
        Ok(out)
    }

    fn parse_header(&self, line_no: usize, line: &str) -> OverlayResult<()> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.first() != Some(&TABLE_TAG) || fields.len() < 1 + COLUMNS.len() {
            return Err(OverlayError::format(
                line_no,
                format!("expected a header line starting with '{TABLE_TAG}'"),
            ));
        }
        let split = fields.len() - COLUMNS.len();
        if fields[split..] != COLUMNS {
            return Err(OverlayError::format(
                line_no,
                format!("header must end with the columns {}", COLUMNS.join(", ")),
            ));
        }

        let declared = fields[1..split]
            .iter()
            .map(|f| {
                parse_axis_label(f).ok_or_else(|| {
                    OverlayError::format(line_no, format!("malformed axis declaration '{f}'"))
                })
            })
            .collect::<OverlayResult<Vec<_>>>()?;
        if declared != self.axes.axes() {
            let describe = |axes: &[Axis]| {
                axes.iter().map(axis_label).collect::<Vec<_>>().join(", ")
            };
            return Err(OverlayError::format(
                line_no,
                format!(
                    "axis mismatch: file declares [{}] but the store has [{}]",
                    describe(declared.as_slice()),
                    describe(self.axes.axes())
                ),
            ));
        }
        Ok(())
    }

    fn parse_row(&mut self, line_no: usize, line: &str) -> OverlayResult<()> {
        let n_axes = self.axes.len();
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 1 + n_axes + COLUMNS.len() {
            return Err(OverlayError::format(
                line_no,
                format!(
                    "insufficient fields: expected {}, found {}",
                    1 + n_axes + COLUMNS.len(),
                    fields.len()
                ),
            ));
        }

        let kind = OverlayKind::from_name(fields[0]).ok_or_else(|| {
            OverlayError::format(line_no, format!("unknown overlay type '{}'", fields[0]))
        })?;
        let position = fields[1..=n_axes]
            .iter()
            .map(|f| match f.trim().parse::<usize>() {
                Ok(p) if p >= 1 => Ok(p - 1),
                _ => Err(OverlayError::format(
                    line_no,
                    format!("position '{f}' is not a 1-based index"),
                )),
            })
            .collect::<OverlayResult<Vec<_>>>()?;
        self.axes
            .raster(&position)
            .map_err(|e| OverlayError::format(line_no, e.to_string()))?;

        let &[x1, y1, x2, y2, text, color, filled, group, notes] = &fields[1 + n_axes..] else {
            return Err(OverlayError::format(line_no, "insufficient fields"));
        };

        let color = match Rgb8::from_hex(color) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(line = line_no, %err, "skipping row with malformed color");
                self.skipped_rows += 1;
                if kind.is_multi_node() {
                    self.noded.push(NodedRow {
                        line: line_no,
                        kind,
                        template: None,
                        nodes: None,
                    });
                }
                return Ok(());
            }
        };

        let require = |field: &str, name: &str| -> OverlayResult<f64> {
            number(line_no, field, name)?.ok_or_else(|| {
                OverlayError::format(line_no, format!("{kind} rows need a value for {name}"))
            })
        };
        let first = || -> OverlayResult<Point> {
            Ok(Point::new(require(x1, "x1")?, require(y1, "y1")?))
        };
        let second = || -> OverlayResult<Point> {
            Ok(Point::new(require(x2, "x2")?, require(y2, "y2")?))
        };
        let fill = || -> OverlayResult<bool> {
            match filled {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(OverlayError::format(
                    line_no,
                    format!("{kind} rows need 'true' or 'false' for filled, found '{other}'"),
                )),
            }
        };

        let shape = match kind {
            OverlayKind::Line => Shape::Line {
                start: first()?,
                end: second()?,
            },
            OverlayKind::Arrow => Shape::Arrow {
                head: first()?,
                tail: second()?,
            },
            OverlayKind::Box => Shape::Box {
                corner1: first()?,
                corner2: second()?,
                filled: fill()?,
            },
            OverlayKind::Oval => Shape::Oval {
                corner1: first()?,
                corner2: second()?,
                filled: fill()?,
            },
            OverlayKind::Marker => Shape::Marker { at: first()? },
            OverlayKind::Text => {
                Shape::Text(TextLabel::new(first()?, text, self.metrics, self.point_size))
            }
            // Endpoint columns of noded rows only echo the first and last
            // node; the node block is authoritative.
            OverlayKind::Freeform | OverlayKind::Polyline => {
                self.rows.push(Row::Noded(self.noded.len()));
                self.noded.push(NodedRow {
                    line: line_no,
                    kind,
                    template: Some((position, color, group.to_string(), notes.to_string())),
                    nodes: None,
                });
                return Ok(());
            }
        };
        let mut overlay = Overlay::new(shape).with_color(color);
        overlay.group = group.to_string();
        overlay.notes = notes.to_string();
        self.rows.push(Row::Ready(position, overlay));
        Ok(())
    }

    fn open_block(&mut self, line_no: usize, kind: &str, ordinal: usize) -> OverlayResult<()> {
        let Some(row) = self.noded.get(self.blocks_seen) else {
            return Err(OverlayError::format(
                line_no,
                format!("node block '{kind} {ordinal}' has no matching row"),
            ));
        };
        if ordinal != self.blocks_seen + 1 {
            return Err(OverlayError::format(
                line_no,
                format!(
                    "expected node block {}, found {ordinal}",
                    self.blocks_seen + 1
                ),
            ));
        }
        if kind != row.kind.name() {
            return Err(OverlayError::format(
                line_no,
                format!("node block type {kind} does not match row type {}", row.kind),
            ));
        }
        self.block = Some(OpenBlock {
            header_line: line_no,
            ordinal: self.blocks_seen,
            saw_columns: false,
            nodes: Vec::new(),
        });
        self.blocks_seen += 1;
        Ok(())
    }

    fn close_block(&mut self, line_no: usize) -> OverlayResult<()> {
        let Some(block) = self.block.take() else {
            return Ok(());
        };
        if block.nodes.len() < NodedCurve::MIN_NODES {
            return Err(OverlayError::format(
                line_no,
                format!(
                    "node block opened at line {} has {} nodes, need at least {}",
                    block.header_line,
                    block.nodes.len(),
                    NodedCurve::MIN_NODES
                ),
            ));
        }
        if let Some(row) = self.noded.get_mut(block.ordinal) {
            row.nodes = Some(block.nodes);
        }
        Ok(())
    }
}

/// Parse a numeric field; `N/A` yields `None`.
fn number(line_no: usize, field: &str, name: &str) -> OverlayResult<Option<f64>> {
    let field = field.trim();
    if field == NOT_APPLICABLE {
        return Ok(None);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(OverlayError::format(
            line_no,
            format!("{name} value '{field}' is not a finite number"),
        )),
    }
}

fn parse_node(line_no: usize, line: &str) -> OverlayResult<Point> {
    let mut parts = line.split('\t');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(OverlayError::format(
            line_no,
            "node lines need exactly two fields",
        ));
    };
    let missing = || OverlayError::format(line_no, "node coordinates cannot be N/A");
    Ok(Point::new(
        number(line_no, x, "X")?.ok_or_else(missing)?,
        number(line_no, y, "Y")?.ok_or_else(missing)?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/reader.rs"]
mod tests;
