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

//! A library for the balanced transportation problem.
//!
//! The solver is the classical *stepping-stone* method with potentials
//! (MODI). A basic feasible starting solution is computed by one of the
//! heuristics in [`initial`] and then improved by pivoting along cycles of
//! the basis tree until all marginal costs are non-negative.
//!
//! # Example
//!
//! ```
//! use rs_transport::{northwest_corner, stepping_stone, total_cost, Matrix, SolutionState};
//!
//! let costs = Matrix::from_rows(vec![
//!     vec![30.0, 20.0, 20.0],
//!     vec![10.0, 50.0, 20.0],
//!     vec![50.0, 40.0, 30.0],
//! ]).unwrap();
//! let supplies: Vec<f64> = vec![30.0, 50.0, 40.0];
//! let demands = vec![40.0, 40.0, 40.0];
//!
//! let start = northwest_corner(&supplies, &demands);
//! let sol = stepping_stone(&costs, &supplies, &demands, start, 100, 100, None).unwrap();
//!
//! assert_eq!(sol.state, SolutionState::Optimal);
//! assert!((total_cost(&costs, &sol.allocation).unwrap() - 2500.0).abs() < 1e-3);
//! ```

use std::fmt::{Debug, Display};

mod num {
    pub use num_traits as traits;
}

use self::num::traits::{Float, FromPrimitive, NumAssign};

/// The scalar type used for costs and quantities.
///
/// This is implemented automatically for all floating point types, in
/// particular `f64` and `f32`.
pub trait Value: Float + NumAssign + FromPrimitive + Debug + Display + Send + Sync + 'static {}

impl<T> Value for T where T: Float + NumAssign + FromPrimitive + Debug + Display + Send + Sync + 'static {}

/// Convert a tolerance constant to the value type.
pub(crate) fn tolerance<F: Value>(x: f64) -> F {
    F::from_f64(x).unwrap_or_else(F::epsilon)
}

/// Values below this threshold are considered to be zero.
pub const ZERO: f64 = 1e-9;

/// The value marking basic cells without flow.
pub const EPSILON: f64 = 1e-6;

// # Data structures

pub mod error;
pub use self::error::Error;

pub mod matrix;
pub use self::matrix::{total_cost, Cell, Matrix};

pub mod problem;
pub use self::problem::Problem;

pub mod search;

pub mod basis;
pub use self::basis::{BasisGraph, Node};

// # Algorithms

pub mod cycle;
pub use self::cycle::{detect_cycle, Cycle};

pub mod initial;
pub use self::initial::{northwest_corner, vogel, Initial, InitialSolution};

pub mod potentials;
pub use self::potentials::{Entering, Potentials, Pricing};

pub mod stepping_stone;
pub use self::stepping_stone::{stepping_stone, Abort, Limits, Solution, SolutionState, SteppingStone};

// # Input and output

pub mod format;
pub mod generate;
