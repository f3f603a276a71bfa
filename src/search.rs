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

//! # Search on the basis graph.
//!
//! The search algorithms are implemented as iterators over the nodes of a
//! [`BasisGraph`][crate::BasisGraph] in the order in which they are visited.
//! Each visited node is returned together with the cell (edge) by which it
//! has been reached.

pub mod bfs;

/// Compute a path from a map of incoming edges for each node.
///
/// # Parameters
/// - `dst`: the destination node
/// - `incomings(v)`: return the incoming edge and preceding node for node `v`
///   (or `None` if it does not exist)
///
/// # Return
/// An iterator over the incoming edges starting from the last one.
///
/// # Example
///
/// ```
/// use rs_transport::{BasisGraph, Matrix, Node};
/// use rs_transport::search::{bfs, path_from_incomings};
///
/// let x = Matrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
/// let g = BasisGraph::new(&x, 1e-9);
///
/// let mut search = bfs::start(&g, Node::Row(1));
/// search.run();
///
/// let path: Vec<_> = path_from_incomings(Node::Col(0), |v| {
///     search.incoming_edge(v).map(|e| (e, Node::other(e, v)))
/// })
/// .collect();
/// assert_eq!(path, vec![(0, 0), (0, 1), (1, 1)]);
/// ```
pub fn path_from_incomings<N, E, I>(dst: N, incomings: I) -> impl Iterator<Item = E>
where
    N: Copy,
    I: Fn(N) -> Option<(E, N)>,
{
    PathIter { incomings, u: dst }
}

#[doc(hidden)]
struct PathIter<N, I> {
    incomings: I,
    u: N,
}

impl<N, E, I> Iterator for PathIter<N, I>
where
    N: Copy,
    I: Fn(N) -> Option<(E, N)>,
{
    type Item = E;

    fn next(&mut self) -> Option<E> {
        let (e, v) = (self.incomings)(self.u)?;
        self.u = v;
        Some(e)
    }
}
