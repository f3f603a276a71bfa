/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Stepping-stone cycles.
//!
//! A stepping-stone cycle is a closed sequence of distinct cells
//! `(c_0, c_1, ..., c_{k-1})` with even `k >= 4` such that consecutive cells
//! share a row or a column, alternating between the two. Moving `delta` units
//! along the cycle (adding at even positions, subtracting at odd positions)
//! keeps all row and column sums unchanged.

use crate::basis::{BasisGraph, Node};
use crate::error::{Error, Result};
use crate::matrix::{Cell, Matrix};
use crate::Value;

use log::{debug, trace};

use std::collections::{HashMap, HashSet, VecDeque};

/// A validated stepping-stone cycle.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cycle {
    cells: Vec<Cell>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Line {
    Row,
    Col,
}

fn line(a: Cell, b: Cell) -> Option<Line> {
    if a == b {
        None
    } else if a.0 == b.0 {
        Some(Line::Row)
    } else if a.1 == b.1 {
        Some(Line::Col)
    } else {
        None
    }
}

fn collinear(a: Cell, b: Cell, c: Cell) -> bool {
    (a.0 == b.0 && b.0 == c.0) || (a.1 == b.1 && b.1 == c.1)
}

impl Cycle {
    /// Create a cycle from a sequence of cells.
    ///
    /// Returns [`Error::InvalidCycle`] if the sequence is not a valid
    /// stepping-stone cycle.
    pub fn new(cells: Vec<Cell>) -> Result<Cycle> {
        if Cycle::is_valid(&cells) {
            Ok(Cycle { cells })
        } else {
            Err(Error::InvalidCycle(cells))
        }
    }

    /// Return `true` if `cells` is a valid stepping-stone cycle.
    pub fn is_valid(cells: &[Cell]) -> bool {
        let k = cells.len();
        if k < 4 || k % 2 != 0 {
            return false;
        }
        let mut lines = Vec::with_capacity(k);
        for p in 0..k {
            match line(cells[p], cells[(p + 1) % k]) {
                Some(l) => lines.push(l),
                None => return false,
            }
        }
        if (0..k).any(|p| lines[p] == lines[(p + 1) % k]) {
            return false;
        }
        let distinct: HashSet<_> = cells.iter().collect();
        distinct.len() == k
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells at even positions, which receive flow.
    pub fn plus(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().step_by(2).cloned()
    }

    /// The cells at odd positions, which give away flow.
    pub fn minus(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(1).step_by(2).cloned()
    }

    /// Return the blocking cell and the maximal amount that can be moved.
    ///
    /// The amount is the minimum value over the `minus` cells, the blocking
    /// cell is the first `minus` cell (in cycle order) attaining it.
    pub fn leaving<F>(&self, allocation: &Matrix<F>) -> (Cell, F)
    where
        F: Value,
    {
        let mut best = (self.cells[1], allocation[self.cells[1]]);
        for c in self.minus().skip(1) {
            if allocation[c] < best.1 {
                best = (c, allocation[c]);
            }
        }
        best
    }

    /// Add `delta` to all `plus` cells and subtract it from all `minus` cells.
    ///
    /// Row and column sums do not change.
    pub fn shift<F>(&self, allocation: &mut Matrix<F>, delta: F)
    where
        F: Value,
    {
        for c in self.plus() {
            allocation[c] += delta;
        }
        for c in self.minus() {
            allocation[c] -= delta;
        }
    }

    /// Move flow along the cycle.
    ///
    /// The amount `delta` is the minimum value over the `minus` cells. If
    /// `delta > zero`, it is added to all `plus` cells and subtracted from all
    /// `minus` cells, and minus cells that end up within `zero` of zero are
    /// set to exactly zero. The amount is returned.
    ///
    /// Otherwise the first cell is set to zero and `None` is returned. This
    /// breaks the cycle for the basis because the first cell is no longer
    /// basic.
    pub fn redistribute<F>(&self, allocation: &mut Matrix<F>, zero: F) -> Option<F>
    where
        F: Value,
    {
        let (_, delta) = self.leaving(allocation);
        if !(delta > zero) {
            allocation[self.cells[0]] = F::zero();
            return None;
        }
        self.shift(allocation, delta);
        for c in self.minus() {
            if allocation[c].abs() <= zero {
                allocation[c] = F::zero();
            }
        }
        Some(delta)
    }
}

/// Remove the middle cell of three consecutive cells on the same line.
///
/// A closed walk in the cell adjacency graph may run along a row or column
/// through several cells. Dropping the intermediate cells keeps the walk
/// closed and makes the lines alternate.
fn shortcut(mut cells: Vec<Cell>) -> Vec<Cell> {
    loop {
        let k = cells.len();
        if k < 3 {
            return cells;
        }
        match (0..k).find(|&p| collinear(cells[(p + k - 1) % k], cells[p], cells[(p + 1) % k])) {
            Some(p) => {
                cells.remove(p);
            }
            None => return cells,
        }
    }
}

/// Reconstruct the closed walk through the tree edge `u - v` and the BFS tree.
fn reconstruct(u: Cell, v: Cell, parent: &HashMap<Cell, Option<Cell>>) -> Vec<Cell> {
    let chain = |mut c: Cell| {
        let mut chain = vec![c];
        while let Some(&Some(p)) = parent.get(&c) {
            chain.push(p);
            c = p;
        }
        chain
    };
    let chain_u = chain(u);
    let chain_v = chain(v);
    let on_v: HashSet<_> = chain_v.iter().cloned().collect();
    let lca_pos = chain_u.iter().position(|c| on_v.contains(c)).unwrap_or(chain_u.len() - 1);
    let lca = chain_u[lca_pos];

    let mut cells: Vec<_> = chain_u[..=lca_pos].to_vec();
    let v_pos = chain_v.iter().position(|&c| c == lca).unwrap_or(chain_v.len());
    cells.extend(chain_v[..v_pos].iter().rev());
    cells
}

/// Detect a stepping-stone cycle among the basic cells of `allocation`.
///
/// Cells are adjacent if they share a row or a column. A breadth-first search
/// from every unvisited basic cell (in row-major order) reports the first
/// non-tree adjacency for which the reconstructed closed walk is a valid
/// cycle. If this fails although the basis graph is not a forest, a cycle
/// through some basic cell is determined by a path search in the basis graph.
///
/// Returns `None` if the basic cells form a forest.
pub fn detect_cycle<F>(allocation: &Matrix<F>, zero: F) -> Option<Cycle>
where
    F: Value,
{
    let graph = BasisGraph::new(allocation, zero);
    if !graph.has_cycle() {
        return None;
    }

    let basic: Vec<Cell> = allocation.iter().filter(|&(_, x)| x > zero).map(|(c, _)| c).collect();
    let mut parent: HashMap<Cell, Option<Cell>> = HashMap::with_capacity(basic.len());
    let mut queue = VecDeque::new();

    for &start in &basic {
        if parent.contains_key(&start) {
            continue;
        }
        parent.insert(start, None);
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            let (i, j) = u;
            let row = graph.row_cols(i).iter().filter(|&&j2| j2 != j).map(|&j2| (i, j2));
            let col = graph.col_rows(j).iter().filter(|&&i2| i2 != i).map(|&i2| (i2, j));
            for v in row.chain(col) {
                match parent.get(&v).cloned() {
                    None => {
                        parent.insert(v, Some(u));
                        queue.push_back(v);
                    }
                    Some(p) if p != Some(u) && parent.get(&u) != Some(&Some(v)) => {
                        let cells = shortcut(reconstruct(u, v, &parent));
                        if Cycle::is_valid(&cells) {
                            trace!("Cycle found by cell search: {:?}", cells);
                            return Some(Cycle { cells });
                        }
                    }
                    Some(_) => (),
                }
            }
        }
    }

    // fallback: close a path between the ends of some basic cell
    debug!("Cell search found no cycle, trying paths in the basis graph");
    for &(i, j) in &basic {
        if let Some(path) = graph.path(Node::Row(i), Node::Col(j), Some((i, j))) {
            let mut cells = Vec::with_capacity(path.len() + 1);
            cells.push((i, j));
            cells.extend(path);
            if Cycle::is_valid(&cells) {
                return Some(Cycle { cells });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        assert!(Cycle::is_valid(&[(0, 0), (0, 1), (1, 1), (1, 0)]));
        assert!(Cycle::is_valid(&[(0, 0), (0, 2), (2, 2), (2, 1), (1, 1), (1, 0)]));
        // too short
        assert!(!Cycle::is_valid(&[(0, 0), (0, 1)]));
        // odd length
        assert!(!Cycle::is_valid(&[(0, 0), (0, 1), (1, 1), (1, 0), (0, 0)]));
        // no alternation
        assert!(!Cycle::is_valid(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
        // consecutive cells on no common line
        assert!(!Cycle::is_valid(&[(0, 0), (1, 1), (0, 1), (1, 0)]));
        // repeated cell
        assert!(!Cycle::is_valid(&[(0, 0), (0, 1), (1, 1), (1, 0), (0, 0), (0, 1)]));

        assert_eq!(
            Cycle::new(vec![(0, 0), (1, 1), (0, 1), (1, 0)]),
            Err(Error::InvalidCycle(vec![(0, 0), (1, 1), (0, 1), (1, 0)]))
        );
    }

    #[test]
    fn test_signs() {
        let c = Cycle::new(vec![(0, 0), (0, 2), (2, 2), (2, 1), (1, 1), (1, 0)]).unwrap();
        assert_eq!(c.len(), 6);
        assert_eq!(c.plus().collect::<Vec<_>>(), vec![(0, 0), (2, 2), (1, 1)]);
        assert_eq!(c.minus().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 0)]);
    }

    #[test]
    fn test_leaving_and_shift() {
        let c = Cycle::new(vec![(0, 0), (0, 2), (2, 2), (2, 1), (1, 1), (1, 0)]).unwrap();
        let mut x = Matrix::from_rows(vec![vec![1.0, 0.0, 4.0], vec![2.0, 6.0, 0.0], vec![0.0, 2.0, 3.0]]).unwrap();
        // (2, 1) and (1, 0) both hold 2, the first in cycle order blocks
        assert_eq!(c.leaving(&x), ((2, 1), 2.0));

        c.shift(&mut x, 2.0);
        assert_eq!(x.to_rows(), vec![vec![3.0, 0.0, 2.0], vec![0.0, 8.0, 0.0], vec![0.0, 0.0, 5.0]]);
    }

    #[test]
    fn test_shortcut() {
        let cells = shortcut(vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 0)]);
        assert_eq!(cells, vec![(0, 0), (0, 2), (1, 2), (1, 0)]);
    }

    #[test]
    fn test_diagonal_is_acyclic() {
        let x = Matrix::from_fn(4, 4, |i, j| if i == j { 7.0 } else { 0.0 });
        assert_eq!(detect_cycle(&x, 1e-9), None);
    }

    #[test]
    fn test_tree_is_acyclic() {
        let x = Matrix::from_rows(vec![vec![30.0, 0.0, 0.0], vec![10.0, 40.0, 0.0], vec![0.0, 0.0, 40.0]]).unwrap();
        assert_eq!(detect_cycle(&x, 1e-9), None);
    }

    #[test]
    fn test_block() {
        let mut x = Matrix::from_rows(vec![
            vec![50.0, 50.0, 0.0],
            vec![50.0, 50.0, 0.0],
            vec![0.0, 0.0, 150.0],
        ])
        .unwrap();
        let cycle = detect_cycle(&x, 1e-9).unwrap();
        assert_eq!(cycle.len(), 4);
        assert!(Cycle::is_valid(cycle.cells()));

        let delta = cycle.redistribute(&mut x, 1e-9);
        assert_eq!(delta, Some(50.0));
        assert_eq!(detect_cycle(&x, 1e-9), None);

        let main = (x[(0, 0)], x[(1, 1)]);
        let anti = (x[(0, 1)], x[(1, 0)]);
        assert!(main == (100.0, 100.0) && anti == (0.0, 0.0) || main == (0.0, 0.0) && anti == (100.0, 100.0));
        assert_eq!(x[(2, 2)], 150.0);
        for i in 0..3 {
            assert_eq!(x.row_sum(i), [100.0, 100.0, 150.0][i]);
            assert_eq!(x.col_sum(i), [100.0, 100.0, 150.0][i]);
        }
    }

    #[test]
    fn test_long_cycle() {
        let mut x = Matrix::from_rows(vec![
            vec![1.0, 0.0, 2.0, 0.0],
            vec![3.0, 4.0, 0.0, 0.0],
            vec![0.0, 5.0, 6.0, 1.0],
        ])
        .unwrap();
        let cycle = detect_cycle(&x, 1e-9).unwrap();
        assert_eq!(cycle.len(), 6);
        let rows: Vec<_> = (0..3).map(|i| x.row_sum(i)).collect();
        let cols: Vec<_> = (0..4).map(|j| x.col_sum(j)).collect();
        assert!(cycle.redistribute(&mut x, 1e-9).is_some());
        assert_eq!((0..3).map(|i| x.row_sum(i)).collect::<Vec<_>>(), rows);
        assert_eq!((0..4).map(|j| x.col_sum(j)).collect::<Vec<_>>(), cols);
        assert_eq!(detect_cycle(&x, 1e-9), None);
    }

    #[test]
    fn test_degenerate_redistribution() {
        let cycle = Cycle::new(vec![(1, 0), (0, 0), (0, 1), (1, 1)]).unwrap();
        let mut x = Matrix::from_rows(vec![vec![1e-6, 5.0], vec![1.0, 5.0]]).unwrap();
        assert_eq!(cycle.redistribute(&mut x, 1e-9), Some(1e-6));
        assert_eq!(x[(0, 0)], 0.0);

        let cycle = Cycle::new(vec![(0, 0), (0, 1), (1, 1), (1, 0)]).unwrap();
        let mut y = Matrix::from_rows(vec![vec![0.5, 1e-12], vec![3.0, 5.0]]).unwrap();
        assert_eq!(cycle.redistribute(&mut y, 1e-9), None);
        assert_eq!(y[(0, 0)], 0.0);
        assert_eq!(y[(1, 0)], 3.0);
    }
}
