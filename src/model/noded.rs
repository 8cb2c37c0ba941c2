use kurbo::{Point, Rect, Vec2};

use crate::foundation::error::{OverlayError, OverlayResult};

/// Ordered control points of a freeform or polyline overlay.
///
/// Always holds at least two nodes. The total curve length is cached and
/// refreshed by every mutating method.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct NodedCurve {
    nodes: Vec<Point>,
    length: f64,
    highlighted: Option<usize>,
}

impl NodedCurve {
    /// Minimum number of nodes a curve can have.
    pub const MIN_NODES: usize = 2;

    /// Validate a chain of at least [`NodedCurve::MIN_NODES`] finite nodes.
    pub fn new(nodes: Vec<Point>) -> OverlayResult<Self> {
        if nodes.len() < Self::MIN_NODES {
            return Err(OverlayError::validation(format!(
                "noded overlay needs at least {} nodes, got {}",
                Self::MIN_NODES,
                nodes.len()
            )));
        }
        if nodes.iter().any(|p| !p.is_finite()) {
            return Err(OverlayError::validation("node coordinates must be finite"));
        }
        let mut curve = Self {
            nodes,
            length: 0.0,
            highlighted: None,
        };
        curve.refresh_length();
        Ok(curve)
    }

    /// All nodes in drawing order.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// Number of nodes (at least two).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node at `index`, if any.
    pub fn node(&self, index: usize) -> Option<Point> {
        self.nodes.get(index).copied()
    }

    /// First node.
    pub fn first(&self) -> Point {
        self.nodes[0]
    }

    /// Last node.
    pub fn last(&self) -> Point {
        self.nodes[self.nodes.len() - 1]
    }

    /// Total length of the chain through all nodes.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Node singled out for editing, drawn with an extra highlight dot.
    pub fn highlighted_node(&self) -> Option<usize> {
        self.highlighted
    }

    /// Fails when `index` is not a node of this curve.
    pub fn set_highlighted_node(&mut self, index: Option<usize>) -> OverlayResult<()> {
        if let Some(i) = index {
            self.check_index(i)?;
        }
        self.highlighted = index;
        Ok(())
    }

    /// Move the node at `index` to `p`.
    pub fn set_node(&mut self, index: usize, p: Point) -> OverlayResult<()> {
        self.check_index(index)?;
        self.nodes[index] = p;
        self.refresh_length();
        Ok(())
    }

    /// Insert `p` before `index`; `index == node_count()` appends.
    pub fn insert_node(&mut self, index: usize, p: Point) -> OverlayResult<()> {
        if index > self.nodes.len() {
            return Err(OverlayError::out_of_range(format!(
                "insert position {index} is past the end of {} nodes",
                self.nodes.len()
            )));
        }
        self.nodes.insert(index, p);
        if let Some(h) = self.highlighted
            && h >= index
        {
            self.highlighted = Some(h + 1);
        }
        self.refresh_length();
        Ok(())
    }

    /// Append `p` as the new last node.
    pub fn push_node(&mut self, p: Point) {
        self.nodes.push(p);
        self.refresh_length();
    }

    /// Remove and return the node at `index`, keeping at least two nodes.
    pub fn remove_node(&mut self, index: usize) -> OverlayResult<Point> {
        self.check_index(index)?;
        if self.nodes.len() <= Self::MIN_NODES {
            return Err(OverlayError::validation(format!(
                "cannot remove a node from a curve with only {} nodes",
                self.nodes.len()
            )));
        }
        let removed = self.nodes.remove(index);
        self.highlighted = match self.highlighted {
            Some(h) if h == index => None,
            Some(h) if h > index => Some(h - 1),
            other => other,
        };
        self.refresh_length();
        Ok(removed)
    }

    /// Index of and distance to the node closest to `p`.
    pub fn nearest_node(&self, p: Point) -> (usize, f64) {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance(p)))
            .fold((0, f64::INFINITY), |best, cur| {
                if cur.1 < best.1 { cur } else { best }
            })
    }

    /// Shift every node by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for n in &mut self.nodes {
            *n += delta;
        }
    }

    /// Axis-aligned extent of the nodes.
    pub fn bounds(&self) -> Rect {
        let first = self.nodes[0];
        self.nodes
            .iter()
            .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p))
    }

    fn check_index(&self, index: usize) -> OverlayResult<()> {
        if index >= self.nodes.len() {
            return Err(OverlayError::out_of_range(format!(
                "node index {index} is outside [0, {})",
                self.nodes.len()
            )));
        }
        Ok(())
    }

    fn refresh_length(&mut self) {
        self.length = self.nodes.windows(2).map(|w| w[0].distance(w[1])).sum();
    }
}

impl TryFrom<Vec<Point>> for NodedCurve {
    type Error = OverlayError;

    fn try_from(nodes: Vec<Point>) -> OverlayResult<Self> {
        Self::new(nodes)
    }
}

impl From<NodedCurve> for Vec<Point> {
    fn from(curve: NodedCurve) -> Self {
        curve.nodes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/noded.rs"]
mod tests;
