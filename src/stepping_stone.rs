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

//! The stepping-stone method with potentials (MODI).
//!
//! Starting from a feasible allocation, each iteration
//!
//! 1. removes cycles from the set of basic cells by moving flow along them,
//! 2. connects the basis graph by adding artificial basic cells without
//!    flow (and removes cycles again),
//! 3. computes the potentials of the basis tree,
//! 4. selects a non-basic cell with negative marginal cost and
//! 5. moves as much flow as possible along the cycle closed by this cell.
//!
//! The method stops when no cell has negative marginal cost (the allocation
//! is optimal) or when one of the iteration, cycle-repair or time limits is
//! reached. In the latter case the last consistent allocation is kept.
//!
//! # Basis and flow
//!
//! The solver keeps two matrices. The *allocation* holds the shipped amounts
//! and is only changed by moving flow along cycles, so its row and column
//! sums never change. The *basis* matrix marks the basic cells: it equals the
//! allocation on cells with positive flow and holds `epsilon` on basic cells
//! without flow, e.g. the cells added by the connectivity repair. All
//! structural steps (cycle detection, connectivity repair, potentials,
//! pricing) work on the basis matrix.

use crate::basis::{connect_sampled, BasisGraph, Node};
use crate::cycle::{detect_cycle, Cycle};
use crate::error::{Error, Result};
use crate::matrix::{total_cost, Cell, Matrix};
use crate::potentials::{Potentials, Pricing};
use crate::{tolerance, Value, EPSILON, ZERO};

use log::{debug, info, trace, warn};

use std::time::{Duration, Instant};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// State of the solution after the solver has been run.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet.
    Unknown,
    /// The allocation is optimal.
    Optimal,
    /// The solver stopped early, see [`Abort`].
    Aborted,
}

/// The reason why the solver stopped early.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Abort {
    /// The maximal number of iterations has been reached.
    Iterations,
    /// Too many cycles had to be removed in one pass.
    CycleRepairLimit,
    /// The deadline expired.
    Deadline,
}

/// The result of [`stepping_stone`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<F> {
    /// The final allocation.
    pub allocation: Matrix<F>,
    /// The final basis, `epsilon` on basic cells without flow.
    pub basis: Matrix<F>,
    /// The number of iterations.
    pub iterations: usize,
    /// The number of times a cell has been made basic without flow.
    pub artificial: usize,
    pub state: SolutionState,
    pub abort: Option<Abort>,
}

/// Limits of the solver depending on the size of the problem.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Limits {
    /// The maximal number of iterations.
    pub max_iterations: usize,
    /// The maximal number of cycles removed in one pass.
    pub max_cycle_repairs: usize,
    /// The pricing strategy.
    pub pricing: Pricing,
    /// The time available to the solver, starting when the limits are applied.
    pub time_budget: Duration,
    /// The number of candidates examined per artificial cell when connecting
    /// the basis graph, `None` for all.
    pub max_scan: Option<usize>,
}

impl Limits {
    /// Return the limits for an `n x n` problem.
    ///
    /// Large problems get fewer iterations, use first-improvement pricing and
    /// sample the candidates of the connectivity repair.
    pub fn for_size(n: usize) -> Self {
        let max_iterations = if n >= 10_000 {
            50
        } else if n >= 5000 {
            100
        } else if n >= 1000 {
            200
        } else {
            1000
        };
        let max_cycle_repairs = if n < 1000 { 100 } else { 50 };
        let pricing = if n < 500 { Pricing::Best } else { Pricing::First };
        let secs = if n >= 5000 {
            300
        } else if n >= 1000 {
            60
        } else if n >= 500 {
            10
        } else if n >= 200 {
            20
        } else {
            30
        };
        Limits {
            max_iterations,
            max_cycle_repairs,
            pricing,
            time_budget: Duration::from_secs(secs),
            max_scan: if n >= 1000 { Some(4 * n) } else { None },
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::for_size(0)
    }
}

/// The stepping-stone solver.
pub struct SteppingStone<'a, F> {
    costs: &'a Matrix<F>,
    allocation: Matrix<F>,
    basis: Matrix<F>,

    niter: usize,
    nartificial: usize,
    solution_state: SolutionState,
    abort: Option<Abort>,

    /// The pricing strategy. Defaults to [`Pricing::Best`].
    pub pricing: Pricing,
    /// Cells with a value not greater than this are non-basic. Defaults to `1e-9`.
    pub zero: F,
    /// The marker of basic cells without flow. Defaults to `1e-6`.
    pub epsilon: F,
    /// The maximal number of iterations.
    pub max_iterations: usize,
    /// The maximal number of cycles removed in one pass.
    pub max_cycle_repairs: usize,
    /// Stop at this point in time (checked between steps).
    pub deadline: Option<Instant>,
    /// The maximal number of candidates examined when connecting the basis
    /// graph. `None` (the default) examines all candidates.
    pub max_scan: Option<usize>,
}

impl<'a, F> SteppingStone<'a, F>
where
    F: Value,
{
    pub fn new(costs: &'a Matrix<F>) -> Self {
        let limits = Limits::default();
        SteppingStone {
            costs,
            allocation: Matrix::new(costs.num_rows(), costs.num_cols()),
            basis: Matrix::new(costs.num_rows(), costs.num_cols()),
            niter: 0,
            nartificial: 0,
            solution_state: SolutionState::Unknown,
            abort: None,
            pricing: limits.pricing,
            zero: tolerance(ZERO),
            epsilon: tolerance(EPSILON),
            max_iterations: limits.max_iterations,
            max_cycle_repairs: limits.max_cycle_repairs,
            deadline: None,
            max_scan: limits.max_scan,
        }
    }

    /// Apply the given limits.
    ///
    /// The deadline is set to now plus the time budget.
    pub fn with_limits(mut self, limits: &Limits) -> Self {
        self.max_iterations = limits.max_iterations;
        self.max_cycle_repairs = limits.max_cycle_repairs;
        self.pricing = limits.pricing;
        self.max_scan = limits.max_scan;
        self.deadline = Some(Instant::now() + limits.time_budget);
        self
    }

    pub fn costs(&self) -> &'a Matrix<F> {
        self.costs
    }

    /// Return the current allocation.
    pub fn allocation(&self) -> &Matrix<F> {
        &self.allocation
    }

    /// Return the current basis.
    ///
    /// Basic cells have a value greater than `zero`, basic cells without flow
    /// hold `epsilon`.
    pub fn basis(&self) -> &Matrix<F> {
        &self.basis
    }

    /// Return the cost of the current allocation.
    pub fn value(&self) -> F {
        total_cost(self.costs, &self.allocation).unwrap_or_else(|_| F::nan())
    }

    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Return the number of times a cell has been made basic without flow.
    pub fn num_artificial(&self) -> usize {
        self.nartificial
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Return the reason of an early stop of the latest computation.
    pub fn abort_reason(&self) -> Option<Abort> {
        self.abort
    }

    /// Return the result of the latest computation.
    pub fn into_solution(self) -> Solution<F> {
        Solution {
            allocation: self.allocation,
            basis: self.basis,
            iterations: self.niter,
            artificial: self.nartificial,
            state: self.solution_state,
            abort: self.abort,
        }
    }

    /// Improve the feasible allocation `initial` until it is optimal.
    ///
    /// Returns an error if the shapes of the inputs do not match or the basis
    /// structure became inconsistent. Reaching a limit is not an error, it is
    /// reported as [`SolutionState::Aborted`].
    pub fn solve(&mut self, supplies: &[F], demands: &[F], initial: Matrix<F>) -> Result<SolutionState> {
        let shape = self.costs.shape();
        if (supplies.len(), demands.len()) != shape {
            return Err(Error::DimensionMismatch {
                what: "supplies and demands",
                expected: shape,
                found: (supplies.len(), demands.len()),
            });
        }
        if initial.shape() != shape {
            return Err(Error::DimensionMismatch {
                what: "initial allocation",
                expected: shape,
                found: initial.shape(),
            });
        }
        debug_assert!({
            let s = supplies.iter().fold(F::zero(), |s, &x| s + x);
            let d = demands.iter().fold(F::zero(), |s, &x| s + x);
            (s - d).abs() <= tolerance::<F>(EPSILON) * (F::one() + s.abs())
        });

        let zero = self.zero;
        self.basis = Matrix::from_fn(shape.0, shape.1, |i, j| {
            let x = initial[(i, j)];
            if x > zero {
                x
            } else {
                F::zero()
            }
        });
        self.allocation = initial;
        self.niter = 0;
        self.nartificial = 0;
        self.solution_state = SolutionState::Unknown;
        self.abort = None;

        if shape.0 == 0 || shape.1 == 0 {
            self.solution_state = SolutionState::Optimal;
            return Ok(self.solution_state);
        }

        loop {
            if self.niter >= self.max_iterations {
                return Ok(self.stop(Abort::Iterations));
            }
            if self.expired() {
                return Ok(self.stop(Abort::Deadline));
            }
            self.niter += 1;
            trace!("Iteration {}", self.niter);

            if let Some(reason) = self.remove_cycles() {
                return Ok(self.stop(reason));
            }

            let graph = BasisGraph::new(&self.basis, self.zero);
            let mut repair = vec![];
            if !graph.is_connected() {
                if self.expired() {
                    return Ok(self.stop(Abort::Deadline));
                }
                repair = connect_sampled(self.costs, &mut self.basis, self.zero, self.epsilon, self.max_scan);
                debug!("Added {} artificial basic cells: {:?}", repair.len(), repair);
                self.nartificial += repair.len();
                if let Some(reason) = self.remove_cycles() {
                    return Ok(self.stop(reason));
                }
            }

            let graph = BasisGraph::new(&self.basis, self.zero);
            let potentials = Potentials::compute(self.costs, &graph);
            let entering = match potentials.find_entering(self.costs, &self.basis, self.pricing, self.zero) {
                Some(entering) => entering,
                None => {
                    self.solution_state = SolutionState::Optimal;
                    info!(
                        "Optimal allocation with value {} after {} iterations",
                        self.value(),
                        self.niter
                    );
                    return Ok(self.solution_state);
                }
            };
            debug!(
                "Iteration {}: entering cell {:?} with marginal cost {}",
                self.niter, entering.cell, entering.marginal
            );

            self.pivot(entering.cell, &repair)?;
        }
    }

    /// Move flow along the cycle closed by the entering cell.
    fn pivot(&mut self, (i, j): Cell, repair: &[Cell]) -> Result<()> {
        // the placeholder makes the entering cell basic while the cycle is searched
        self.basis[(i, j)] = F::one();
        let graph = BasisGraph::new(&self.basis, self.zero);
        let path = graph.path(Node::Row(i), Node::Col(j), Some((i, j)));
        self.basis[(i, j)] = F::zero();

        let cycle = match path {
            Some(path) => {
                let mut cells = Vec::with_capacity(path.len() + 1);
                cells.push((i, j));
                cells.extend(path);
                Cycle::new(cells)?
            }
            None => {
                self.degenerate_pivot((i, j), repair, None);
                return Ok(());
            }
        };

        let (leaving, delta) = cycle.leaving(&self.allocation);
        if delta > self.zero {
            cycle.shift(&mut self.allocation, delta);
            for &cell in cycle.cells() {
                self.set_basic(cell);
            }
            self.basis[leaving] = F::zero();
            debug!("Moved {} units along the cycle of {:?}, {:?} leaves", delta, (i, j), leaving);
        } else {
            self.degenerate_pivot((i, j), repair, Some((&cycle, leaving)));
        }
        Ok(())
    }

    /// Handle a pivot that cannot move any flow.
    ///
    /// The cells added by this iteration's connectivity repair are removed
    /// from the basis and the entering cell becomes basic with `epsilon`. If
    /// the cycle does not run through a removed cell, its blocking cell leaves
    /// the basis.
    fn degenerate_pivot(&mut self, entering: Cell, repair: &[Cell], cycle: Option<(&Cycle, Cell)>) {
        debug!("Degenerate pivot at {:?}", entering);
        for &cell in repair {
            if !(self.allocation[cell] > self.zero) {
                self.basis[cell] = F::zero();
            }
        }
        self.set_basic(entering);
        self.nartificial += 1;

        if let Some((cycle, leaving)) = cycle {
            if !cycle.cells().iter().any(|c| repair.contains(c)) {
                self.basis[leaving] = F::zero();
            }
        }
    }

    /// Remove cycles from the basic cells.
    ///
    /// Returns the reason if a limit has been reached.
    fn remove_cycles(&mut self) -> Option<Abort> {
        let mut nrepairs = 0;
        while let Some(cycle) = detect_cycle(&self.basis, self.zero) {
            if nrepairs >= self.max_cycle_repairs {
                return Some(Abort::CycleRepairLimit);
            }
            if self.expired() {
                return Some(Abort::Deadline);
            }
            let (leaving, delta) = cycle.leaving(&self.allocation);
            if delta > self.zero {
                cycle.shift(&mut self.allocation, delta);
                for &cell in cycle.cells() {
                    self.set_basic(cell);
                }
                trace!("Removed cycle {:?} moving {}", cycle.cells(), delta);
            } else {
                trace!("Removed degenerate cycle {:?}", cycle.cells());
            }
            self.basis[leaving] = F::zero();
            nrepairs += 1;
        }
        None
    }

    /// Mark `cell` as basic.
    fn set_basic(&mut self, cell: Cell) {
        let x = self.allocation[cell];
        self.basis[cell] = if x > self.zero { x } else { self.epsilon };
    }

    fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    fn stop(&mut self, reason: Abort) -> SolutionState {
        warn!("Stepping-stone stopped after {} iterations: {:?}", self.niter, reason);
        self.solution_state = SolutionState::Aborted;
        self.abort = Some(reason);
        self.solution_state
    }
}

/// Solve a transportation problem with the stepping-stone method.
///
/// `initial` must be a feasible allocation, e.g. computed by
/// [`northwest_corner`][crate::northwest_corner] or [`vogel`][crate::vogel].
/// The function returns the final allocation and the state of the solver.
pub fn stepping_stone<F>(
    costs: &Matrix<F>,
    supplies: &[F],
    demands: &[F],
    initial: Matrix<F>,
    max_iterations: usize,
    max_cycle_repairs: usize,
    deadline: Option<Instant>,
) -> Result<Solution<F>>
where
    F: Value,
{
    let mut spx = SteppingStone::new(costs);
    spx.max_iterations = max_iterations;
    spx.max_cycle_repairs = max_cycle_repairs;
    spx.deadline = deadline;
    spx.solve(supplies, demands, initial)?;
    Ok(spx.into_solution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::{northwest_corner, vogel};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn instance() -> (Matrix<f64>, Vec<f64>, Vec<f64>) {
        (
            Matrix::from_rows(vec![vec![30.0, 20.0, 20.0], vec![10.0, 50.0, 20.0], vec![50.0, 40.0, 30.0]]).unwrap(),
            vec![30.0, 50.0, 40.0],
            vec![40.0, 40.0, 40.0],
        )
    }

    fn check_feasible(x: &Matrix<f64>, s: &[f64], d: &[f64]) {
        for (i, &si) in s.iter().enumerate() {
            assert!((x.row_sum(i) - si).abs() <= 1e-6, "row {}: {} != {}", i, x.row_sum(i), si);
        }
        for (j, &dj) in d.iter().enumerate() {
            assert!((x.col_sum(j) - dj).abs() <= 1e-6, "col {}: {} != {}", j, x.col_sum(j), dj);
        }
        assert!(x.iter().all(|(_, v)| v >= 0.0));
    }

    /// Check that the basis is a spanning tree containing all cells with flow.
    fn check_basis(x: &Matrix<f64>, basis: &Matrix<f64>) {
        let g = BasisGraph::new(basis, 1e-9);
        assert!(g.is_connected());
        assert!(!g.has_cycle());
        for (cell, v) in x.iter() {
            if v > 1e-9 {
                assert_eq!(basis[cell], v, "cell {:?}", cell);
            }
        }
    }

    #[test]
    fn test_regression() {
        init_logger();
        let (costs, s, d) = instance();

        let nw = northwest_corner(&s, &d);
        let vg = vogel(&costs, &s, &d, None).allocation;
        let nw_cost = total_cost(&costs, &nw).unwrap();
        let vg_cost = total_cost(&costs, &vg).unwrap();
        assert!(vg_cost <= nw_cost);

        let sol_nw = stepping_stone(&costs, &s, &d, nw, 100, 100, None).unwrap();
        let sol_vg = stepping_stone(&costs, &s, &d, vg, 100, 100, None).unwrap();
        assert_eq!(sol_nw.state, SolutionState::Optimal);
        assert_eq!(sol_vg.state, SolutionState::Optimal);
        assert_eq!(sol_nw.abort, None);
        // (0, 2) connects the start, (1, 2) enters without flow
        assert_eq!(sol_nw.artificial, 2);
        assert_eq!(sol_nw.iterations, 4);
        assert_eq!(sol_vg.artificial, 0);
        assert_eq!(sol_vg.iterations, 1);
        check_feasible(&sol_nw.allocation, &s, &d);
        check_feasible(&sol_vg.allocation, &s, &d);
        check_basis(&sol_nw.allocation, &sol_nw.basis);
        check_basis(&sol_vg.allocation, &sol_vg.basis);

        let v_nw = total_cost(&costs, &sol_nw.allocation).unwrap();
        let v_vg = total_cost(&costs, &sol_vg.allocation).unwrap();
        assert!((v_nw - 2500.0).abs() < 1e-6);
        assert!((v_nw - v_vg).abs() < 1e-6);
        assert_eq!(sol_nw.allocation, sol_vg.allocation);
    }

    #[test]
    fn test_optimal_is_stable() {
        init_logger();
        let (costs, s, d) = instance();
        let start = northwest_corner(&s, &d);
        let mut spx = SteppingStone::new(&costs);
        assert_eq!(spx.solution_state(), SolutionState::Unknown);
        assert_eq!(spx.solve(&s, &d, start), Ok(SolutionState::Optimal));

        let basis = spx.basis().clone();
        let g = BasisGraph::new(&basis, 1e-9);
        assert!(g.is_connected());
        let p = Potentials::compute(&costs, &g);
        assert_eq!(p.find_entering(&costs, &basis, Pricing::Best, 1e-9), None);
        for (cell, m) in p.marginal_costs(&costs).iter() {
            if basis[cell] <= 1e-9 {
                assert!(m >= -1e-6);
            }
        }

        let x = spx.allocation().clone();
        let value = spx.value();
        assert_eq!(spx.solve(&s, &d, x), Ok(SolutionState::Optimal));
        assert_eq!(spx.num_iterations(), 1);
        assert!((spx.value() - value).abs() < 1e-9);
    }

    #[test]
    fn test_first_pricing() {
        let (costs, s, d) = instance();
        let mut spx = SteppingStone::new(&costs);
        spx.pricing = Pricing::First;
        assert_eq!(spx.solve(&s, &d, northwest_corner(&s, &d)), Ok(SolutionState::Optimal));
        assert!((spx.value() - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn test_iteration_limit() {
        let (costs, s, d) = instance();
        let sol = stepping_stone(&costs, &s, &d, northwest_corner(&s, &d), 1, 100, None).unwrap();
        assert_eq!(sol.state, SolutionState::Aborted);
        assert_eq!(sol.abort, Some(Abort::Iterations));
        assert_eq!(sol.iterations, 1);
        check_feasible(&sol.allocation, &s, &d);
        assert_eq!(total_cost(&costs, &sol.allocation), Ok(2700.0));
    }

    #[test]
    fn test_deadline() {
        let (costs, s, d) = instance();
        let sol = stepping_stone(&costs, &s, &d, northwest_corner(&s, &d), 100, 100, Some(Instant::now())).unwrap();
        assert_eq!(sol.state, SolutionState::Aborted);
        assert_eq!(sol.abort, Some(Abort::Deadline));
        assert_eq!(sol.iterations, 0);
    }

    #[test]
    fn test_cycle_repair_limit() {
        let costs = Matrix::from_elem(3, 3, 1.0);
        let x = Matrix::from_rows(vec![vec![50.0, 50.0, 0.0], vec![50.0, 50.0, 0.0], vec![0.0, 0.0, 150.0]]).unwrap();
        let s = [100.0, 100.0, 150.0];
        let sol = stepping_stone(&costs, &s, &s, x.clone(), 10, 0, None).unwrap();
        assert_eq!(sol.abort, Some(Abort::CycleRepairLimit));
        assert_eq!(sol.allocation, x);

        let sol = stepping_stone(&costs, &s, &s, x, 10, 1, None).unwrap();
        assert_eq!(sol.state, SolutionState::Optimal);
        check_feasible(&sol.allocation, &s, &s);
        check_basis(&sol.allocation, &sol.basis);
    }

    #[test]
    fn test_degenerate_diagonal() {
        init_logger();
        let costs = Matrix::from_fn(4, 4, |i, j| if i == j { 1.0 } else { 9.0 });
        let s = [10.0; 4];
        let start = northwest_corner(&s, &s);
        assert_eq!(start.count_above(1e-9), 4);
        let sol = stepping_stone(&costs, &s, &s, start.clone(), 100, 100, None).unwrap();
        assert_eq!(sol.state, SolutionState::Optimal);
        assert_eq!(sol.artificial, 3);
        // the artificial cells are basic but carry no flow
        assert_eq!(sol.allocation, start);
        assert_eq!(sol.basis.count_above(1e-9), 7);
        assert_eq!(sol.basis[(0, 1)], 1e-6);
        assert_eq!(total_cost(&costs, &sol.allocation), Ok(40.0));
        check_basis(&sol.allocation, &sol.basis);
    }

    #[test]
    fn test_degenerate_pivot() {
        init_logger();
        let costs = Matrix::from_rows(vec![vec![1.0, 2.0, 2.0], vec![9.0, 8.0, 5.0], vec![9.0, 9.0, 1.0]]).unwrap();
        let s = [10.0; 3];
        let start = Matrix::from_fn(3, 3, |i, j| if i == j { 10.0 } else { 0.0 });

        // The repair adds (0, 1) and (0, 2). The entering cell (1, 2) closes
        // the cycle (1, 2), (1, 1), (0, 1), (0, 2) blocked by (0, 2) without flow.
        let mut spx = SteppingStone::new(&costs);
        spx.max_iterations = 1;
        assert_eq!(spx.solve(&s, &s, start.clone()), Ok(SolutionState::Aborted));
        assert_eq!(spx.abort_reason(), Some(Abort::Iterations));
        assert_eq!(spx.num_artificial(), 3);
        assert_eq!(spx.allocation(), &start);
        assert_eq!(spx.basis()[(0, 1)], 0.0);
        assert_eq!(spx.basis()[(0, 2)], 0.0);
        assert_eq!(spx.basis()[(1, 2)], spx.epsilon);
        assert_eq!(spx.basis().count_above(1e-9), 4);

        spx.max_iterations = 100;
        assert_eq!(spx.solve(&s, &s, start.clone()), Ok(SolutionState::Optimal));
        assert_eq!(spx.allocation(), &start);
        assert_eq!(spx.value(), 100.0);
        check_basis(spx.allocation(), spx.basis());
    }

    #[test]
    fn test_zero_supply_rows() {
        init_logger();
        let costs = Matrix::from_rows(vec![
            vec![4.0, 6.0, 9.0, 5.0],
            vec![2.0, 1.0, 3.0, 8.0],
            vec![7.0, 3.0, 2.0, 6.0],
            vec![5.0, 8.0, 4.0, 1.0],
        ])
        .unwrap();
        let s = [10.0, 0.0, 15.0, 0.0];
        let d = [5.0, 5.0, 0.0, 15.0];
        for start in [northwest_corner(&s, &d), vogel(&costs, &s, &d, None).allocation].iter() {
            for &pricing in &[Pricing::Best, Pricing::First] {
                let mut spx = SteppingStone::new(&costs);
                spx.pricing = pricing;
                assert_eq!(spx.solve(&s, &d, start.clone()), Ok(SolutionState::Optimal));
                check_feasible(spx.allocation(), &s, &d);
                check_basis(spx.allocation(), spx.basis());
                // 5 * 4 + 5 * 5 + 5 * 3 + 10 * 6
                assert_eq!(spx.value(), 120.0);
            }
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let (costs, s, d) = instance();
        let mut spx = SteppingStone::new(&costs);
        assert_eq!(
            spx.solve(&s, &d, Matrix::new(2, 3)),
            Err(Error::DimensionMismatch {
                what: "initial allocation",
                expected: (3, 3),
                found: (2, 3)
            })
        );
        assert!(spx.solve(&s[..2], &d, Matrix::new(3, 3)).is_err());
    }

    #[test]
    fn test_limits() {
        let l = Limits::for_size(10);
        assert_eq!(l.max_iterations, 1000);
        assert_eq!(l.max_cycle_repairs, 100);
        assert_eq!(l.pricing, Pricing::Best);
        assert_eq!(l.time_budget, Duration::from_secs(30));
        assert_eq!(l.max_scan, None);

        let l = Limits::for_size(600);
        assert_eq!(l.pricing, Pricing::First);
        assert_eq!(l.time_budget, Duration::from_secs(10));

        let l = Limits::for_size(5000);
        assert_eq!(l.max_iterations, 100);
        assert_eq!(l.max_cycle_repairs, 50);
        assert_eq!(l.time_budget, Duration::from_secs(300));
        assert_eq!(l.max_scan, Some(20_000));

        assert_eq!(Limits::for_size(20_000).max_iterations, 50);

        let costs = Matrix::<f64>::new(2, 2);
        let spx = SteppingStone::new(&costs).with_limits(&Limits::for_size(1000));
        assert_eq!(spx.max_iterations, 200);
        assert_eq!(spx.max_scan, Some(4000));
        assert!(spx.deadline.is_some());
    }
}
