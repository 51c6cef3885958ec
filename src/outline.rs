//! Boundary extraction: cell set -> closed outline chains.
//!
//! ## Algorithm
//!
//! 1. Every cell emits its four unit edges, oriented clockwise on screen
//!    (y grows downward).
//! 2. Edges are toggled in a map keyed by the undirected edge. An edge shared
//!    by two cells is inserted twice and therefore cancels, leaving exactly the
//!    outer boundary plus the boundary of any hole.
//! 3. Surviving directed edges are walked endpoint to endpoint into closed
//!    chains. Where two continuations meet at one vertex (cells touching only
//!    diagonally) the walk prefers a right turn, then straight, then left, so
//!    every chain is a simple loop.
//! 4. Collinear runs are merged so chains list corners only. Each chain starts
//!    at its top-left-most vertex; chains are ordered by that vertex, which
//!    puts the outer boundary of a region first.
//!
//! Outer chains run clockwise on screen (positive shoelace area), holes run
//! counter-clockwise (negative area).

use crate::cells::CellSet;
use crate::error::{EditorError, EditorResult};
use crate::profile_scope;
use crate::types::{Cell, Edge, GridPoint};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

type DirectedEdge = (GridPoint, GridPoint);

/// One closed loop of corner vertices. The closing segment back to the first
/// vertex is implicit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain {
    points: Vec<GridPoint>,
}

impl Chain {
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive corner pairs, including the closing pair.
    pub fn sides(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Twice the signed shoelace area. Positive for outer boundaries.
    pub fn signed_area2(&self) -> i64 {
        self.sides()
            .map(|(p, q)| p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64)
            .sum()
    }

    pub fn is_hole(&self) -> bool {
        self.signed_area2() < 0
    }

    /// Length in unit edges.
    pub fn perimeter(&self) -> usize {
        self.sides()
            .map(|(p, q)| ((q.x - p.x).abs() + (q.y - p.y).abs()) as usize)
            .sum()
    }

    /// Expand the corners back into unit edges.
    pub fn segments(&self) -> impl Iterator<Item = Edge> + '_ {
        self.sides().flat_map(|(p, q)| {
            let steps = (q.x - p.x).abs().max((q.y - p.y).abs());
            let (sx, sy) = ((q.x - p.x).signum(), (q.y - p.y).signum());
            (0..steps).map(move |i| {
                let from = GridPoint::new(p.x + sx * i, p.y + sy * i);
                let to = GridPoint::new(from.x + sx, from.y + sy);
                Edge::new(from, to)
            })
        })
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "({},{})", p.x, p.y)?;
        }
        Ok(())
    }
}

/// The ordered closed chains bounding a cell set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    chains: Vec<Chain>,
}

impl Outline {
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Outer boundary (first chain).
    pub fn outer(&self) -> Option<&Chain> {
        self.chains.first()
    }

    pub fn holes(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter().filter(|chain| chain.is_hole())
    }

    pub fn segments(&self) -> impl Iterator<Item = Edge> + '_ {
        self.chains.iter().flat_map(Chain::segments)
    }

    pub fn perimeter(&self) -> usize {
        self.chains.iter().map(Chain::perimeter).sum()
    }

    /// Enclosed area in cells (holes subtract).
    pub fn area(&self) -> i64 {
        self.chains.iter().map(Chain::signed_area2).sum::<i64>() / 2
    }

    /// Area-weighted centroid in grid units; holes pull it away from themselves.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        let mut area2 = 0.0;
        let (mut cx, mut cy) = (0.0, 0.0);
        for chain in &self.chains {
            for (p, q) in chain.sides() {
                let cross = p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
                area2 += cross;
                cx += (p.x + q.x) as f64 * cross;
                cy += (p.y + q.y) as f64 * cross;
            }
        }
        if area2.abs() < f64::EPSILON {
            return None;
        }
        Some((cx / (3.0 * area2), cy / (3.0 * area2)))
    }

    /// Re-derive the enclosed cells with an even-odd scanline through cell centers.
    pub fn cells(&self) -> CellSet {
        let mut crossings: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for chain in &self.chains {
            for (p, q) in chain.sides() {
                if p.x != q.x {
                    continue;
                }
                for row in p.y.min(q.y)..p.y.max(q.y) {
                    crossings.entry(row).or_default().push(p.x);
                }
            }
        }

        let mut cells = CellSet::new();
        for (row, mut xs) in crossings {
            xs.sort_unstable();
            for span in xs.chunks_exact(2) {
                cells.extend((span[0]..span[1]).map(|x| Cell::new(x, row)));
            }
        }
        cells
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{chain}")?;
        }
        Ok(())
    }
}

/// The four clockwise edges of a cell: top, right, bottom, left.
fn cell_edges(cell: Cell) -> [DirectedEdge; 4] {
    let (x, y) = (cell.x, cell.y);
    let tl = GridPoint::new(x, y);
    let tr = GridPoint::new(x + 1, y);
    let br = GridPoint::new(x + 1, y + 1);
    let bl = GridPoint::new(x, y + 1);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Derive the outline of `cells`.
///
/// An empty set yields an empty outline. Fails with
/// [`EditorError::MalformedBoundary`] if a walk cannot close, which cannot
/// happen for edges produced by whole cells but is reported rather than
/// panicking.
pub fn extract(cells: &CellSet) -> EditorResult<Outline> {
    profile_scope!("outline_extract");

    let mut surviving: HashMap<Edge, DirectedEdge> = HashMap::with_capacity(cells.len() * 4);
    for cell in cells.iter() {
        for directed in cell_edges(cell) {
            let key = Edge::new(directed.0, directed.1);
            if surviving.remove(&key).is_none() {
                surviving.insert(key, directed);
            }
        }
    }

    walk_chains(surviving.into_values().collect(), cells.len())
}

fn walk_chains(mut edges: Vec<DirectedEdge>, cell_count: usize) -> EditorResult<Outline> {
    edges.sort_unstable_by_key(|(from, to)| (from.scan_key(), to.scan_key()));

    let mut outgoing: HashMap<GridPoint, Vec<GridPoint>> = HashMap::with_capacity(edges.len());
    for &(from, to) in &edges {
        outgoing.entry(from).or_default().push(to);
    }

    let mut used: HashSet<DirectedEdge> = HashSet::with_capacity(edges.len());
    let mut chains = Vec::new();

    for &start in &edges {
        if used.contains(&start) {
            continue;
        }

        let mut vertices = vec![start.0];
        let mut current = start;
        loop {
            used.insert(current);
            let (from, to) = current;
            if to == start.0 {
                break;
            }
            let next = next_edge(&outgoing, &used, from, to).ok_or(
                EditorError::MalformedBoundary { cells: cell_count, x: to.x, y: to.y },
            )?;
            vertices.push(to);
            current = (to, next);
        }

        chains.push(canonical_chain(vertices));
    }

    chains.sort_by_key(|chain| chain.points.first().map(|p| p.scan_key()));
    Ok(Outline { chains })
}

/// Pick the continuation at `to`: right turn, then straight, then left.
fn next_edge(
    outgoing: &HashMap<GridPoint, Vec<GridPoint>>,
    used: &HashSet<DirectedEdge>,
    from: GridPoint,
    to: GridPoint,
) -> Option<GridPoint> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    outgoing
        .get(&to)?
        .iter()
        .copied()
        .filter(|next| !used.contains(&(to, *next)))
        .min_by_key(|next| {
            let (ex, ey) = (next.x - to.x, next.y - to.y);
            let cross = dx * ey - dy * ex;
            let dot = dx * ex + dy * ey;
            match (cross.signum(), dot.signum()) {
                (1, _) => 0,
                (0, 1) => 1,
                (-1, _) => 2,
                _ => 3,
            }
        })
}

/// Drop collinear vertices and rotate so the top-left-most corner comes first.
fn canonical_chain(vertices: Vec<GridPoint>) -> Chain {
    let n = vertices.len();
    let direction = |a: GridPoint, b: GridPoint| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let corners: Vec<GridPoint> = (0..n)
        .filter(|&i| {
            let prev = vertices[(i + n - 1) % n];
            let here = vertices[i];
            let next = vertices[(i + 1) % n];
            direction(prev, here) != direction(here, next)
        })
        .map(|i| vertices[i])
        .collect();

    let start = corners
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.scan_key())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut points = corners;
    points.rotate_left(start);
    Chain { points }
}
