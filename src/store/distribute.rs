use crate::{
    foundation::{
        core::Rgb8,
        error::{OverlayError, OverlayResult},
        math::lerp_u8,
    },
    model::{
        noded::NodedCurve,
        overlay::{Overlay, Shape},
        text::{TextLabel, TextMetrics},
    },
    store::slices::OverlayStore,
};

impl OverlayStore {
    /// Fill the positions strictly between `from` and `to` with overlays
    /// interpolated between the single clipboard entry and the single
    /// selected overlay at `to`.
    ///
    /// The two positions must differ along exactly one axis. Geometry and
    /// color are interpolated linearly with `q = i / n`; fill, group, notes
    /// and text carry over only where both ends agree. Returns the number of
    /// overlays added. On error the store is unchanged.
    #[tracing::instrument(skip(self))]
    pub fn distribute(&mut self, from: &[usize], to: &[usize]) -> OverlayResult<usize> {
        let [start] = self.clipboard.overlays() else {
            return Err(OverlayError::validation(format!(
                "distribute needs exactly one overlay on the clipboard, found {}",
                self.clipboard.len()
            )));
        };
        self.axes().raster(from)?;
        self.axes().raster(to)?;

        let selected: Vec<&Overlay> = self.selected(to).map(|(_, o)| o).collect();
        let [end] = selected.as_slice() else {
            return Err(OverlayError::validation(format!(
                "distribute needs exactly one selected overlay at the target position, found {}",
                selected.len()
            )));
        };
        if start.kind() != end.kind() {
            return Err(OverlayError::validation(format!(
                "cannot distribute between a {} and a {}",
                start.kind(),
                end.kind()
            )));
        }

        let differing: Vec<usize> = (0..from.len()).filter(|&a| from[a] != to[a]).collect();
        let [axis] = differing.as_slice() else {
            return Err(OverlayError::validation(format!(
                "positions must differ along exactly one axis, they differ along {}",
                differing.len()
            )));
        };
        let axis = *axis;

        let steps = from[axis].abs_diff(to[axis]);
        let point_size = self.options().text_point_size;
        let mut staged = Vec::with_capacity(steps.saturating_sub(1));
        for i in 1..steps {
            let q = i as f64 / steps as f64;
            let mut position = from.to_vec();
            position[axis] = if to[axis] > from[axis] {
                from[axis] + i
            } else {
                from[axis] - i
            };
            let overlay = interpolate(start, end, q, self.metrics(), point_size)?;
            staged.push((position, overlay));
        }

        let added = staged.len();
        for (position, overlay) in staged {
            self.add(overlay, &position);
        }
        tracing::debug!(added, axis, "distributed overlays");
        Ok(added)
    }
}

fn interpolate(
    a: &Overlay,
    b: &Overlay,
    q: f64,
    metrics: &dyn TextMetrics,
    point_size: f64,
) -> OverlayResult<Overlay> {
    let shape = match (a.shape(), b.shape()) {
        (
            Shape::Line {
                start: s0,
                end: e0,
            },
            Shape::Line {
                start: s1,
                end: e1,
            },
        ) => Shape::Line {
            start: s0.lerp(*s1, q),
            end: e0.lerp(*e1, q),
        },
        (
            Shape::Arrow {
                head: h0,
                tail: t0,
            },
            Shape::Arrow {
                head: h1,
                tail: t1,
            },
        ) => Shape::Arrow {
            head: h0.lerp(*h1, q),
            tail: t0.lerp(*t1, q),
        },
        (
            Shape::Box {
                corner1: a0,
                corner2: b0,
                filled: f0,
            },
            Shape::Box {
                corner1: a1,
                corner2: b1,
                filled: f1,
            },
        ) => Shape::Box {
            corner1: a0.lerp(*a1, q),
            corner2: b0.lerp(*b1, q),
            filled: *f0 && *f1,
        },
        (
            Shape::Oval {
                corner1: a0,
                corner2: b0,
                filled: f0,
            },
            Shape::Oval {
                corner1: a1,
                corner2: b1,
                filled: f1,
            },
        ) => Shape::Oval {
            corner1: a0.lerp(*a1, q),
            corner2: b0.lerp(*b1, q),
            filled: *f0 && *f1,
        },
        (Shape::Marker { at: p0 }, Shape::Marker { at: p1 }) => Shape::Marker {
            at: p0.lerp(*p1, q),
        },
        (Shape::Text(l0), Shape::Text(l1)) => {
            let text = if l0.text() == l1.text() { l0.text() } else { "" };
            Shape::Text(TextLabel::new(
                l0.at().lerp(l1.at(), q),
                text,
                metrics,
                point_size,
            ))
        }
        (Shape::Freeform(c0), Shape::Freeform(c1)) => Shape::Freeform(lerp_curve(c0, c1, q)?),
        (Shape::Polyline(c0), Shape::Polyline(c1)) => Shape::Polyline(lerp_curve(c0, c1, q)?),
        (s0, s1) => {
            return Err(OverlayError::validation(format!(
                "cannot interpolate between a {} and a {}",
                s0.kind(),
                s1.kind()
            )));
        }
    };

    let mut out = Overlay::new(shape).with_color(lerp_color(a.color, b.color, q));
    if a.group == b.group {
        out.group = a.group.clone();
    }
    if a.notes == b.notes {
        out.notes = a.notes.clone();
    }
    Ok(out)
}

fn lerp_curve(a: &NodedCurve, b: &NodedCurve, q: f64) -> OverlayResult<NodedCurve> {
    if a.node_count() != b.node_count() {
        return Err(OverlayError::validation(format!(
            "node counts differ ({} vs {})",
            a.node_count(),
            b.node_count()
        )));
    }
    NodedCurve::new(
        a.nodes()
            .iter()
            .zip(b.nodes())
            .map(|(p0, p1)| p0.lerp(*p1, q))
            .collect(),
    )
}

fn lerp_color(a: Rgb8, b: Rgb8, q: f64) -> Rgb8 {
    Rgb8::new(lerp_u8(a.r, b.r, q), lerp_u8(a.g, b.g, q), lerp_u8(a.b, b.b, q))
}

#[cfg(test)]
#[path = "../../tests/unit/store/distribute.rs"]
mod tests;
