use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;

use crate::{
    codec::{
        format::{
            COLUMNS, NODE_COLUMNS, NOT_APPLICABLE, TABLE_TAG, axis_label, node_header, sanitize,
        },
        stats::StatsFormat,
    },
    foundation::error::OverlayResult,
    model::overlay::Overlay,
    store::slices::OverlayStore,
};

/// Write every overlay of `store` in the tab-separated exchange format.
///
/// Layout: a comment line, the header, one row per overlay in raster then Z
/// order, one `#`-prefixed block per entry of `stats`, then one node block
/// per freeform/polyline in row order.
#[tracing::instrument(skip_all, fields(overlays = store.len(), stats = stats.len()))]
pub fn write_overlays<W: Write>(
    store: &OverlayStore,
    out: W,
    stats: &[&dyn StatsFormat],
) -> OverlayResult<()> {
    let mut out = out;
    write_all(store, &mut out, stats).context("write overlay table")?;
    out.flush().context("flush overlay table")?;
    Ok(())
}

/// [`write_overlays`] into a `String`.
pub fn write_overlays_string(
    store: &OverlayStore,
    stats: &[&dyn StatsFormat],
) -> OverlayResult<String> {
    let mut buf = Vec::new();
    write_overlays(store, &mut buf, stats)?;
    Ok(String::from_utf8(buf).context("overlay table is not utf-8")?)
}

/// [`write_overlays`] into a new file at `path`, replacing any existing one.
pub fn write_overlays_file(
    path: impl AsRef<Path>,
    store: &OverlayStore,
    stats: &[&dyn StatsFormat],
) -> OverlayResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("create overlay file '{}'", path.display()))?;
    write_overlays(store, BufWriter::new(file), stats)
}

fn write_all(
    store: &OverlayStore,
    out: &mut impl Write,
    stats: &[&dyn StatsFormat],
) -> io::Result<()> {
    writeln!(out, "# {}", sanitize(&store.options().header_comment))?;

    let mut header: Vec<String> = vec![TABLE_TAG.to_string()];
    header.extend(store.axes().axes().iter().map(axis_label));
    header.extend(COLUMNS.iter().map(|c| c.to_string()));
    writeln!(out, "{}", header.join("\t"))?;

    for (position, slot) in store.iter_slices() {
        for overlay in slot {
            writeln!(out, "{}", row(overlay, &position).join("\t"))?;
        }
    }

    for format in stats {
        writeln!(out)?;
        writeln!(out, "# {}", sanitize(format.title()))?;
        let mut columns: Vec<String> = vec![TABLE_TAG.to_string()];
        columns.extend(store.axes().axes().iter().map(|a| sanitize(&a.name)));
        columns.extend(format.columns().iter().map(|c| sanitize(c)));
        writeln!(out, "# {}", columns.join("\t"))?;

        for (position, slot) in store.iter_slices() {
            for overlay in slot {
                let Some(values) = format.row(overlay, &position) else {
                    continue;
                };
                let mut fields = vec![overlay.kind().name().to_string()];
                fields.extend(position.iter().map(|p| (p + 1).to_string()));
                fields.extend(values.iter().map(|v| sanitize(v)));
                writeln!(out, "# {}", fields.join("\t"))?;
            }
        }
    }

    let curves = store
        .iter_slices()
        .flat_map(|(_, slot)| slot.iter())
        .filter_map(|o| o.curve().map(|c| (o.kind(), c)));
    for (ordinal, (kind, curve)) in curves.enumerate() {
        writeln!(out)?;
        writeln!(out, "{}", node_header(kind, ordinal + 1))?;
        writeln!(out, "{NODE_COLUMNS}")?;
        for node in curve.nodes() {
            writeln!(out, "{}\t{}", node.x, node.y)?;
        }
    }
    Ok(())
}

/// Table row of one overlay. Positions are written 1-based.
fn row(overlay: &Overlay, position: &[usize]) -> Vec<String> {
    let na = || NOT_APPLICABLE.to_string();
    let p1 = overlay.endpoint1();
    let (x2, y2) = overlay
        .endpoint2()
        .map_or_else(|| (na(), na()), |p| (p.x.to_string(), p.y.to_string()));

    let mut fields = Vec::with_capacity(10 + position.len());
    fields.push(overlay.kind().name().to_string());
    fields.extend(position.iter().map(|p| (p + 1).to_string()));
    fields.extend([p1.x.to_string(), p1.y.to_string(), x2, y2]);
    fields.push(overlay.label().map_or_else(na, |l| sanitize(l.text())));
    fields.push(overlay.color.to_hex());
    fields.push(overlay.filled().map_or_else(na, |f| f.to_string()));
    fields.push(sanitize(&overlay.group));
    fields.push(sanitize(&overlay.notes));
    fields
}

#[cfg(test)]
#[path = "../../tests/unit/codec/writer.rs"]
mod tests;
