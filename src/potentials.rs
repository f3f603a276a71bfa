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

//! Dual potentials and marginal costs.
//!
//! For a spanning basis tree the potentials `u_i` (rows) and `v_j` (columns)
//! satisfy `u_i + v_j = c_ij` for every basic cell, normalized by `u_0 = 0`.
//! The marginal cost of a cell is `c_ij - (u_i + v_j)`. An allocation is
//! optimal if no marginal cost is negative.

use crate::basis::{BasisGraph, Node};
use crate::matrix::{Cell, Matrix};
use crate::search::bfs;
use crate::Value;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Pricing strategy for selecting the entering cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Pricing {
    /// Choose the cell with the most negative marginal cost.
    Best,
    /// Choose the first cell (in row-major order) with negative marginal cost.
    First,
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing::Best
    }
}

/// A candidate for entering the basis.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Entering<F> {
    pub cell: Cell,
    /// The (negative) marginal cost of the cell.
    pub marginal: F,
}

/// Row and column potentials.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Potentials<F> {
    /// The row potentials `u`.
    pub rows: Vec<F>,
    /// The column potentials `v`.
    pub cols: Vec<F>,
}

impl<F> Potentials<F>
where
    F: Value,
{
    /// Compute the potentials along the basis graph.
    ///
    /// The potentials are propagated by a breadth-first search starting at
    /// `Row(0)` with `u_0 = 0`. Nodes not reachable from `Row(0)` keep the
    /// potential 0.
    pub fn compute(costs: &Matrix<F>, graph: &BasisGraph) -> Self {
        let mut rows = vec![F::zero(); graph.num_rows()];
        let mut cols = vec![F::zero(); graph.num_cols()];
        if graph.num_rows() > 0 {
            for (v, (i, j)) in bfs::start(graph, Node::Row(0)) {
                match v {
                    Node::Col(_) => cols[j] = costs[(i, j)] - rows[i],
                    Node::Row(_) => rows[i] = costs[(i, j)] - cols[j],
                }
            }
        }
        Potentials { rows, cols }
    }

    /// The potential cost `u_i + v_j` of a cell.
    pub fn potential_cost(&self, (i, j): Cell) -> F {
        self.rows[i] + self.cols[j]
    }

    /// The marginal cost `c_ij - (u_i + v_j)` of a cell.
    pub fn marginal_cost(&self, costs: &Matrix<F>, cell: Cell) -> F {
        costs[cell] - self.potential_cost(cell)
    }

    /// Return the matrix of all potential costs.
    pub fn potential_costs(&self) -> Matrix<F> {
        Matrix::from_fn(self.rows.len(), self.cols.len(), |i, j| self.potential_cost((i, j)))
    }

    /// Return the matrix of all marginal costs.
    pub fn marginal_costs(&self, costs: &Matrix<F>) -> Matrix<F> {
        Matrix::from_fn(self.rows.len(), self.cols.len(), |i, j| self.marginal_cost(costs, (i, j)))
    }

    /// Select a non-basic cell with marginal cost below `-zero`.
    ///
    /// Cells with `basis > zero` are basic and never selected. Returns
    /// `None` if no such cell exists, i.e. the allocation is optimal.
    pub fn find_entering(
        &self,
        costs: &Matrix<F>,
        basis: &Matrix<F>,
        pricing: Pricing,
        zero: F,
    ) -> Option<Entering<F>> {
        let mut candidates = basis
            .iter()
            .filter(|&(_, x)| !(x > zero))
            .map(|(cell, _)| Entering {
                cell,
                marginal: self.marginal_cost(costs, cell),
            })
            .filter(|e| e.marginal < -zero);

        match pricing {
            Pricing::First => candidates.next(),
            Pricing::Best => candidates.fold(None, |best: Option<Entering<F>>, e| match best {
                Some(b) if b.marginal <= e.marginal => Some(b),
                _ => Some(e),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs() -> Matrix<f64> {
        Matrix::from_rows(vec![vec![30.0, 20.0, 20.0], vec![10.0, 50.0, 20.0], vec![50.0, 40.0, 30.0]]).unwrap()
    }

    #[test]
    fn test_optimal_duals() {
        let x = Matrix::from_rows(vec![vec![0.0, 30.0, 0.0], vec![40.0, 0.0, 10.0], vec![0.0, 10.0, 30.0]]).unwrap();
        let g = BasisGraph::new(&x, 1e-9);
        let p = Potentials::compute(&costs(), &g);
        assert_eq!(p.rows, vec![0.0, 10.0, 20.0]);
        assert_eq!(p.cols, vec![0.0, 20.0, 10.0]);

        let marginal = p.marginal_costs(&costs());
        for (cell, d) in marginal.iter() {
            if x[cell] > 0.0 {
                assert_eq!(d, 0.0);
            } else {
                assert!(d >= 0.0);
            }
        }
        assert_eq!(p.find_entering(&costs(), &x, Pricing::Best, 1e-9), None);
        assert_eq!(p.find_entering(&costs(), &x, Pricing::First, 1e-9), None);
    }

    #[test]
    fn test_entering() {
        // the north-west corner start, connected by (0, 2)
        let x = Matrix::from_rows(vec![vec![30.0, 0.0, 1e-6], vec![10.0, 40.0, 0.0], vec![0.0, 0.0, 40.0]]).unwrap();
        let g = BasisGraph::new(&x, 1e-9);
        assert!(g.is_connected());
        let p = Potentials::compute(&costs(), &g);
        assert_eq!(p.rows, vec![0.0, -20.0, 10.0]);
        assert_eq!(p.cols, vec![30.0, 70.0, 20.0]);
        assert_eq!(p.potential_costs()[(1, 1)], 50.0);

        // marginals: (0,1) = -50, (1,2) = 20, (2,0) = 10, (2,1) = -40
        assert_eq!(
            p.find_entering(&costs(), &x, Pricing::Best, 1e-9),
            Some(Entering {
                cell: (0, 1),
                marginal: -50.0
            })
        );
        assert_eq!(p.marginal_cost(&costs(), (2, 1)), -40.0);
        assert_eq!(
            p.find_entering(&costs(), &x, Pricing::First, 1e-9).map(|e| e.cell),
            Some((0, 1))
        );
    }

    #[test]
    fn test_unreachable_defaults_to_zero() {
        let x = Matrix::from_rows(vec![vec![5.0, 0.0], vec![0.0, 5.0]]).unwrap();
        let c = Matrix::from_rows(vec![vec![3.0, 1.0], vec![1.0, 4.0]]).unwrap();
        let p = Potentials::compute(&c, &BasisGraph::new(&x, 1e-9));
        assert_eq!(p.rows, vec![0.0, 0.0]);
        assert_eq!(p.cols, vec![3.0, 0.0]);
    }
}
