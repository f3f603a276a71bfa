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

//! Vogel's approximation method (Balas-Hammer).
//!
//! In each step the row or column with the largest *penalty* is selected. The
//! penalty of a line is the difference between its two smallest costs among
//! the still active counterparts (0 if fewer than two remain). The cheapest
//! active cell of the selected line receives as much as possible and the
//! exhausted row and/or column is deactivated.
//!
//! The costs of each line are sorted once in advance. A pointer per line
//! skips deactivated counterparts, so finding the two smallest active costs
//! is amortized cheap. Penalties are cached and only recomputed after a
//! counterpart of the line has been deactivated.

use super::{complete_greedy, InitialSolution};
use crate::matrix::Matrix;
use crate::{tolerance, Value, ZERO};

use log::{debug, warn};
use ordered_float::OrderedFloat;

use std::time::Instant;

fn expired(deadline: Option<Instant>) -> bool {
    deadline.map(|d| Instant::now() >= d).unwrap_or(false)
}

/// Advance `ptr` to the first active entry of `order` and return it.
fn first_active(order: &[usize], ptr: &mut usize, active: &[bool]) -> Option<usize> {
    while *ptr < order.len() && !active[order[*ptr]] {
        *ptr += 1;
    }
    order.get(*ptr).cloned()
}

/// Compute the penalty of a line from its sorted counterparts.
fn penalty<F, C>(order: &[usize], ptr: &mut usize, active: &[bool], cost: C) -> F
where
    F: Value,
    C: Fn(usize) -> F,
{
    let first = match first_active(order, ptr, active) {
        Some(k) => k,
        None => return F::zero(),
    };
    match order[*ptr + 1..].iter().find(|&&k| active[k]) {
        Some(&second) => cost(second) - cost(first),
        None => F::zero(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Line {
    Row(usize),
    Col(usize),
}

/// Working state of the heuristic.
struct Vogel<'a, F> {
    costs: &'a Matrix<F>,
    zero: F,
    allocation: Matrix<F>,
    supplies: Vec<F>,
    demands: Vec<F>,

    active_rows: Vec<bool>,
    active_cols: Vec<bool>,
    nactive_rows: usize,
    nactive_cols: usize,

    /// Column indices of each row sorted by cost.
    sorted_rows: Vec<Vec<usize>>,
    /// Row indices of each column sorted by cost.
    sorted_cols: Vec<Vec<usize>>,
    ptr_rows: Vec<usize>,
    ptr_cols: Vec<usize>,

    /// Cached penalties, `None` if dirty.
    row_penalties: Vec<Option<F>>,
    col_penalties: Vec<Option<F>>,
}

impl<'a, F> Vogel<'a, F>
where
    F: Value,
{
    fn new(costs: &'a Matrix<F>, supplies: &[F], demands: &[F]) -> Self {
        let (n, m) = (supplies.len(), demands.len());
        Vogel {
            costs,
            zero: tolerance(ZERO),
            allocation: Matrix::new(n, m),
            supplies: supplies.to_vec(),
            demands: demands.to_vec(),
            active_rows: vec![true; n],
            active_cols: vec![true; m],
            nactive_rows: n,
            nactive_cols: m,
            sorted_rows: Vec::with_capacity(n),
            sorted_cols: Vec::with_capacity(m),
            ptr_rows: vec![0; n],
            ptr_cols: vec![0; m],
            row_penalties: vec![None; n],
            col_penalties: vec![None; m],
        }
    }

    /// Sort the costs of all lines.
    ///
    /// Returns `false` if the deadline expired before all lines were sorted.
    fn sort(&mut self, deadline: Option<Instant>) -> bool {
        let costs = self.costs;
        let (n, m) = costs.shape();
        for i in 0..n {
            if expired(deadline) {
                return false;
            }
            let mut order: Vec<_> = (0..m).collect();
            order.sort_by_key(|&j| OrderedFloat(costs[(i, j)]));
            self.sorted_rows.push(order);
        }
        for j in 0..m {
            if expired(deadline) {
                return false;
            }
            let mut order: Vec<_> = (0..n).collect();
            order.sort_by_key(|&i| OrderedFloat(costs[(i, j)]));
            self.sorted_cols.push(order);
        }
        true
    }

    fn row_penalty(&mut self, i: usize) -> F {
        if let Some(p) = self.row_penalties[i] {
            return p;
        }
        let costs = self.costs;
        let p = penalty(&self.sorted_rows[i], &mut self.ptr_rows[i], &self.active_cols, |j| {
            costs[(i, j)]
        });
        self.row_penalties[i] = Some(p);
        p
    }

    fn col_penalty(&mut self, j: usize) -> F {
        if let Some(p) = self.col_penalties[j] {
            return p;
        }
        let costs = self.costs;
        let p = penalty(&self.sorted_cols[j], &mut self.ptr_cols[j], &self.active_rows, |i| {
            costs[(i, j)]
        });
        self.col_penalties[j] = Some(p);
        p
    }

    /// Select the line with the largest penalty.
    ///
    /// Ties are broken by the smallest index, rows before columns.
    fn select(&mut self) -> Option<Line> {
        let mut best = -F::one();
        let mut line = None;
        for i in 0..self.active_rows.len() {
            if self.active_rows[i] {
                let p = self.row_penalty(i);
                if p > best {
                    best = p;
                    line = Some(Line::Row(i));
                }
            }
        }
        for j in 0..self.active_cols.len() {
            if self.active_cols[j] {
                let p = self.col_penalty(j);
                if p > best {
                    best = p;
                    line = Some(Line::Col(j));
                }
            }
        }
        line
    }

    /// Allocate as much as possible to cell `(i, j)` and deactivate exhausted lines.
    fn allocate(&mut self, i: usize, j: usize) {
        let q = self.supplies[i].min(self.demands[j]);
        self.allocation[(i, j)] += q;
        self.supplies[i] -= q;
        self.demands[j] -= q;

        if self.supplies[i] < self.zero {
            self.active_rows[i] = false;
            self.nactive_rows -= 1;
            self.row_penalties[i] = None;
            for (p, _) in self.col_penalties.iter_mut().zip(&self.active_cols).filter(|(_, a)| **a) {
                *p = None;
            }
        }
        if self.demands[j] < self.zero {
            self.active_cols[j] = false;
            self.nactive_cols -= 1;
            self.col_penalties[j] = None;
            for (p, _) in self.row_penalties.iter_mut().zip(&self.active_rows).filter(|(_, a)| **a) {
                *p = None;
            }
        }
    }

    /// Run the main loop.
    ///
    /// Returns `false` if the deadline expired.
    fn run(&mut self, deadline: Option<Instant>) -> bool {
        let mut nsteps = 0;
        while self.nactive_rows > 0 && self.nactive_cols > 0 {
            if expired(deadline) {
                return false;
            }
            let (i, j) = match self.select() {
                Some(Line::Row(i)) => {
                    match first_active(&self.sorted_rows[i], &mut self.ptr_rows[i], &self.active_cols) {
                        Some(j) => (i, j),
                        None => break,
                    }
                }
                Some(Line::Col(j)) => {
                    match first_active(&self.sorted_cols[j], &mut self.ptr_cols[j], &self.active_rows) {
                        Some(i) => (i, j),
                        None => break,
                    }
                }
                None => break,
            };
            self.allocate(i, j);
            nsteps += 1;
        }
        debug!("Vogel's method finished after {} steps", nsteps);
        true
    }

    fn finish(mut self, completed: bool) -> InitialSolution<F> {
        if !completed {
            warn!("Deadline of Vogel's method expired, completing greedily");
        }
        complete_greedy(&mut self.allocation, &mut self.supplies, &mut self.demands);
        InitialSolution {
            allocation: self.allocation,
            degraded: !completed,
        }
    }
}

/// Compute an initial allocation by Vogel's approximation method.
///
/// If `deadline` expires before the heuristic is done, the remaining supplies
/// are shipped greedily in row-major order. The allocation is feasible in any
/// case, but flagged as `degraded`.
///
/// # Example
///
/// ```
/// use rs_transport::{total_cost, vogel, Matrix};
///
/// let costs = Matrix::from_rows(vec![
///     vec![30.0, 20.0, 20.0],
///     vec![10.0, 50.0, 20.0],
///     vec![50.0, 40.0, 30.0],
/// ]).unwrap();
/// let sol = vogel(&costs, &[30.0, 50.0, 40.0], &[40.0, 40.0, 40.0], None);
/// assert!(!sol.degraded);
/// assert_eq!(total_cost(&costs, &sol.allocation), Ok(2500.0));
/// ```
pub fn vogel<F>(costs: &Matrix<F>, supplies: &[F], demands: &[F], deadline: Option<Instant>) -> InitialSolution<F>
where
    F: Value,
{
    let mut vogel = Vogel::new(costs, supplies, demands);
    let completed = vogel.sort(deadline) && vogel.run(deadline);
    vogel.finish(completed)
}
