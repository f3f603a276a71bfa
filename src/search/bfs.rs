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

//! Breadth-first-search on the basis graph.
//!
//! # Example
//!
//! ```
//! use rs_transport::{BasisGraph, Matrix, Node};
//! use rs_transport::search::bfs;
//!
//! let x = Matrix::from_rows(vec![vec![5.0, 0.0], vec![1.0, 2.0]]).unwrap();
//! let g = BasisGraph::new(&x, 1e-9);
//! let mut cnt = 0;
//! for (v, _) in bfs::start(&g, Node::Row(0)) {
//!     assert_ne!(v, Node::Row(0));
//!     cnt += 1;
//! }
//! assert_eq!(cnt, g.num_nodes() - 1);
//! ```

use crate::basis::{BasisGraph, Node};
use crate::matrix::Cell;

use std::collections::VecDeque;

/// Start and return a BFS iterator.
///
/// The returned iterator traverses the basis graph in breadth-first order. The
/// iterator returns the next node and its incoming edge (the basic cell by
/// which it has been reached). Note that the start node is *not* returned by
/// the iterator.
pub fn start(graph: &BasisGraph, src: Node) -> Bfs {
    start_excluding(graph, src, None)
}

/// Start and return a BFS iterator that ignores the edge `excluded`.
pub fn start_excluding(graph: &BasisGraph, src: Node, excluded: Option<Cell>) -> Bfs {
    let mut bfs = Bfs::new(graph, excluded);
    bfs.restart(src);
    bfs
}

/// The BFS iterator.
pub struct Bfs<'a> {
    graph: &'a BasisGraph,
    excluded: Option<Cell>,
    seen: Vec<bool>,
    incoming: Vec<Option<Cell>>,
    queue: VecDeque<Node>,
    current: Option<Node>,
    pos: usize,
}

impl<'a> Bfs<'a> {
    /// Create a search that has not visited any node yet.
    ///
    /// Use [`Bfs::restart`] to start the search at some node.
    pub fn new(graph: &'a BasisGraph, excluded: Option<Cell>) -> Self {
        Bfs {
            graph,
            excluded,
            seen: vec![false; graph.num_nodes()],
            incoming: vec![None; graph.num_nodes()],
            queue: VecDeque::new(),
            current: None,
            pos: 0,
        }
    }

    /// Continue the search at a new source node.
    ///
    /// Nodes visited by earlier runs stay visited, so consecutive restarts at
    /// unvisited nodes enumerate the connected components.
    pub fn restart(&mut self, src: Node) {
        self.queue.clear();
        self.seen[self.graph.node_id(src)] = true;
        self.current = Some(src);
        self.pos = 0;
    }

    /// Run the bfs completely.
    pub fn run(&mut self) {
        while self.next().is_some() {}
    }

    /// Return whether node `u` has been visited.
    pub fn is_reached(&self, u: Node) -> bool {
        self.seen[self.graph.node_id(u)]
    }

    /// Return the incoming edge of a node.
    ///
    /// Source nodes and unreached nodes have no incoming edge.
    pub fn incoming_edge(&self, u: Node) -> Option<Cell> {
        self.incoming[self.graph.node_id(u)]
    }
}

impl<'a> Iterator for Bfs<'a> {
    type Item = (Node, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let u = self.current?;
            while let Some((e, v)) = self.graph.neighbor_at(u, self.pos) {
                self.pos += 1;
                if Some(e) == self.excluded {
                    continue;
                }
                let vid = self.graph.node_id(v);
                if !self.seen[vid] {
                    self.seen[vid] = true;
                    self.incoming[vid] = Some(e);
                    self.queue.push_back(v);
                    return Some((v, e));
                }
            }
            self.current = self.queue.pop_front();
            self.pos = 0;
        }
    }
}
