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

//! The bipartite graph of basic cells.
//!
//! The nodes of the graph are the rows and columns of the transportation
//! table, each basic cell `(i, j)` is an edge between `Row(i)` and `Col(j)`.
//! A basic feasible solution is non-degenerate if this graph is a spanning
//! tree.

use crate::matrix::{Cell, Matrix};
use crate::search::{bfs, path_from_incomings};
use crate::Value;

use either::Either;
use log::trace;
use ordered_float::OrderedFloat;

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A node of the basis graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Node {
    /// The supply node of row `i`.
    Row(usize),
    /// The demand node of column `j`.
    Col(usize),
}

impl Node {
    /// Return the row or column index.
    pub fn index(self) -> usize {
        match self {
            Node::Row(i) | Node::Col(i) => i,
        }
    }

    pub fn is_row(self) -> bool {
        matches!(self, Node::Row(_))
    }

    /// Return the other end of the edge `cell` incident with `u`.
    pub fn other(cell: Cell, u: Node) -> Node {
        match u {
            Node::Row(_) => Node::Col(cell.1),
            Node::Col(_) => Node::Row(cell.0),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Row(i) => write!(f, "r{}", i),
            Node::Col(j) => write!(f, "c{}", j),
        }
    }
}

/// Adjacency lists of the basic cells.
///
/// The graph is a snapshot, it does not change if the allocation it has been
/// built from changes.
#[derive(Clone, Debug)]
pub struct BasisGraph {
    /// The columns of the basic cells in each row, increasing.
    rows: Vec<Vec<usize>>,
    /// The rows of the basic cells in each column, increasing.
    cols: Vec<Vec<usize>>,
    nedges: usize,
}

impl BasisGraph {
    /// Build the basis graph of all cells with value greater than `zero`.
    pub fn new<F: Value>(allocation: &Matrix<F>, zero: F) -> Self {
        let mut g = BasisGraph {
            rows: vec![vec![]; allocation.num_rows()],
            cols: vec![vec![]; allocation.num_cols()],
            nedges: 0,
        };
        for (cell, x) in allocation.iter() {
            if x > zero {
                g.add_edge(cell);
            }
        }
        g
    }

    /// Add the cell `(i, j)` as an edge.
    ///
    /// Cells must be added in row-major order to keep the adjacency lists
    /// sorted, otherwise only the order of the search is affected.
    pub fn add_edge(&mut self, (i, j): Cell) {
        self.rows[i].push(j);
        self.cols[j].push(i);
        self.nedges += 1;
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Number of nodes, i.e. rows plus columns.
    pub fn num_nodes(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    /// Number of edges, i.e. basic cells.
    pub fn num_edges(&self) -> usize {
        self.nedges
    }

    /// Return a unique id in `0..num_nodes()`.
    ///
    /// Rows come first, column `j` has id `num_rows() + j`.
    pub fn node_id(&self, u: Node) -> usize {
        match u {
            Node::Row(i) => i,
            Node::Col(j) => self.rows.len() + j,
        }
    }

    pub fn id2node(&self, id: usize) -> Node {
        if id < self.rows.len() {
            Node::Row(id)
        } else {
            Node::Col(id - self.rows.len())
        }
    }

    /// Return an iterator over all nodes, rows first.
    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.rows.len()).map(Node::Row).chain((0..self.cols.len()).map(Node::Col))
    }

    /// Return the columns of the basic cells in row `i`.
    pub fn row_cols(&self, i: usize) -> &[usize] {
        &self.rows[i]
    }

    /// Return the rows of the basic cells in column `j`.
    pub fn col_rows(&self, j: usize) -> &[usize] {
        &self.cols[j]
    }

    /// Return an iterator over the incident edges and adjacent nodes of `u`.
    pub fn neighbors(&self, u: Node) -> impl Iterator<Item = (Cell, Node)> + '_ {
        match u {
            Node::Row(i) => Either::Left(self.rows[i].iter().map(move |&j| ((i, j), Node::Col(j)))),
            Node::Col(j) => Either::Right(self.cols[j].iter().map(move |&i| ((i, j), Node::Row(i)))),
        }
    }

    /// Return the `k`-th incident edge of `u`.
    pub(crate) fn neighbor_at(&self, u: Node, k: usize) -> Option<(Cell, Node)> {
        match u {
            Node::Row(i) => self.rows[i].get(k).map(|&j| ((i, j), Node::Col(j))),
            Node::Col(j) => self.cols[j].get(k).map(|&i| ((i, j), Node::Row(i))),
        }
    }

    /// Return the connected components.
    ///
    /// Each component is listed in breadth-first order starting at its
    /// smallest node (rows before columns). The component of `Row(0)` comes
    /// first.
    pub fn components(&self) -> Vec<Vec<Node>> {
        let mut comps = vec![];
        let mut search = bfs::Bfs::new(self, None);
        for u in self.nodes() {
            if search.is_reached(u) {
                continue;
            }
            search.restart(u);
            let mut comp = vec![u];
            comp.extend(search.by_ref().map(|(v, _)| v));
            comps.push(comp);
        }
        comps
    }

    /// Return the component index of each node (by node id) and the number of
    /// components.
    pub fn component_labels(&self) -> (Vec<usize>, usize) {
        let mut labels = vec![0; self.num_nodes()];
        let comps = self.components();
        for (k, comp) in comps.iter().enumerate() {
            for &u in comp {
                labels[self.node_id(u)] = k;
            }
        }
        (labels, comps.len())
    }

    pub fn num_components(&self) -> usize {
        self.components().len()
    }

    /// Return `true` if all rows and columns are in one component.
    pub fn is_connected(&self) -> bool {
        self.num_components() <= 1
    }

    /// Return `true` if the basic cells contain a cycle.
    pub fn has_cycle(&self) -> bool {
        self.nedges + self.num_components() > self.num_nodes()
    }

    /// Return a path of basic cells from `src` to `dst` avoiding `excluded`.
    ///
    /// The cells are returned in order from `src` to `dst`. Consecutive cells
    /// share a row or a column. Returns `None` if there is no such path.
    pub fn path(&self, src: Node, dst: Node, excluded: Option<Cell>) -> Option<Vec<Cell>> {
        if src == dst {
            return Some(vec![]);
        }
        let mut search = bfs::start_excluding(self, src, excluded);
        search.find(|&(v, _)| v == dst)?;
        let mut path: Vec<_> =
            path_from_incomings(dst, |v| search.incoming_edge(v).map(|e| (e, Node::other(e, v)))).collect();
        path.reverse();
        Some(path)
    }
}

/// Connect the basis graph by adding artificial basic cells.
///
/// As long as the basis graph of `allocation` is disconnected, the cheapest
/// non-basic cell joining the component of `Row(0)` with another component
/// is set to `epsilon`. The added cells are returned in the order of
/// insertion. At most `n + m - 1` cells are added and no cycle is created.
pub fn connect<F>(costs: &Matrix<F>, allocation: &mut Matrix<F>, zero: F, epsilon: F) -> Vec<Cell>
where
    F: Value,
{
    connect_sampled(costs, allocation, zero, epsilon, None)
}

/// Connect the basis graph examining a limited number of candidates.
///
/// This is [`connect`] but the search for the cheapest joining cell stops
/// after `max_scan` candidates (if at least one has been found). With
/// `max_scan == None` all candidates are examined.
pub fn connect_sampled<F>(
    costs: &Matrix<F>,
    allocation: &mut Matrix<F>,
    zero: F,
    epsilon: F,
    max_scan: Option<usize>,
) -> Vec<Cell>
where
    F: Value,
{
    let (n, m) = allocation.shape();
    let mut added = vec![];
    if n == 0 || m == 0 {
        return added;
    }

    let graph = BasisGraph::new(allocation, zero);
    let (mut labels, mut ncomps) = graph.component_labels();

    while ncomps > 1 {
        // the component of Row(0) is always labelled 0
        let lbl = &labels;
        let from_rows = (0..n)
            .filter(|&i| lbl[i] == 0)
            .flat_map(|i| (0..m).filter(move |&j| lbl[n + j] != 0).map(move |j| (i, j)));
        let from_cols = (0..m)
            .filter(|&j| lbl[n + j] == 0)
            .flat_map(|j| (0..n).filter(move |&i| lbl[i] != 0).map(move |i| (i, j)));
        let best = from_rows
            .chain(from_cols)
            .take(max_scan.unwrap_or(usize::MAX).max(1))
            .min_by_key(|&cell| OrderedFloat(costs[cell]));

        let (i, j) = match best {
            Some(cell) => cell,
            None => break,
        };
        trace!("Connect components by cell ({}, {})", i, j);
        allocation[(i, j)] = epsilon;
        added.push((i, j));

        let other = if labels[i] == 0 { labels[n + j] } else { labels[i] };
        for l in labels.iter_mut().filter(|l| **l == other) {
            *l = 0;
        }
        ncomps -= 1;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(n: usize) -> Matrix<f64> {
        Matrix::from_fn(n, n, |i, j| if i == j { 10.0 } else { 0.0 })
    }

    #[test]
    fn test_components() {
        let x = diagonal(3);
        let g = BasisGraph::new(&x, 1e-9);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(
            g.components(),
            vec![
                vec![Node::Row(0), Node::Col(0)],
                vec![Node::Row(1), Node::Col(1)],
                vec![Node::Row(2), Node::Col(2)],
            ]
        );
        assert!(!g.is_connected());
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_neighbors() {
        let x = Matrix::from_rows(vec![vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 1.0]]).unwrap();
        let g = BasisGraph::new(&x, 1e-9);
        let row: Vec<_> = g.neighbors(Node::Row(0)).collect();
        assert_eq!(row, vec![((0, 0), Node::Col(0)), ((0, 2), Node::Col(2))]);
        let col: Vec<_> = g.neighbors(Node::Col(2)).collect();
        assert_eq!(col, vec![((0, 2), Node::Row(0)), ((1, 2), Node::Row(1))]);
        for u in g.nodes() {
            assert_eq!(g.id2node(g.node_id(u)), u);
        }
    }

    #[test]
    fn test_path() {
        let x = Matrix::from_rows(vec![vec![1.0, 1.0, 0.0], vec![0.0, 1.0, 1.0]]).unwrap();
        let g = BasisGraph::new(&x, 1e-9);
        assert!(g.is_connected());
        assert_eq!(
            g.path(Node::Row(0), Node::Col(2), None),
            Some(vec![(0, 1), (1, 1), (1, 2)])
        );
        assert_eq!(g.path(Node::Row(0), Node::Col(2), Some((1, 1))), None);
        assert_eq!(g.path(Node::Col(0), Node::Col(0), None), Some(vec![]));
    }

    #[test]
    fn test_tiny_values_are_not_basic() {
        let x = Matrix::from_rows(vec![vec![1.0, 1e-12], vec![0.0, 1.0]]).unwrap();
        let g = BasisGraph::new(&x, 1e-9);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.num_components(), 2);
    }

    #[test]
    fn test_connect_diagonal() {
        let costs = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0 } else { (i + 2 * j) as f64 });
        let mut x = diagonal(3);
        let added = connect(&costs, &mut x, 1e-9, 1e-6);
        // (0, 1) costs 2, (1, 0) costs 1 and is cheaper
        assert_eq!(added[0], (1, 0));
        assert_eq!(added.len(), 2);
        assert_eq!(x[(1, 0)], 1e-6);

        let g = BasisGraph::new(&x, 1e-9);
        assert!(g.is_connected());
        assert!(!g.has_cycle());
        assert_eq!(g.num_edges(), 5);
    }

    #[test]
    fn test_connect_empty() {
        let costs = Matrix::from_elem(3, 4, 1.0);
        let mut x = Matrix::new(3, 4);
        let added = connect(&costs, &mut x, 1e-9, 1e-6);
        assert_eq!(added.len(), 3 + 4 - 1);
        let g = BasisGraph::new(&x, 1e-9);
        assert!(g.is_connected());
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_connect_sampled() {
        let costs = Matrix::from_fn(4, 4, |i, j| (i + j) as f64);
        let mut x = diagonal(4);
        let added = connect_sampled(&costs, &mut x, 1e-9, 1e-6, Some(1));
        assert_eq!(added.len(), 3);
        let g = BasisGraph::new(&x, 1e-9);
        assert!(g.is_connected());
        assert!(!g.has_cycle());
    }
}
