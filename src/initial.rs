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

//! Initial basic feasible solutions.
//!
//! The stepping-stone method needs a feasible starting allocation. This
//! module provides the two classical construction heuristics:
//!
//! - [`northwest_corner`]: fills the table from the top left, ignoring costs,
//! - [`vogel`]: Vogel's approximation method (also known as Balas-Hammer),
//!   which usually starts much closer to an optimal solution.

pub mod northwest;
pub use self::northwest::northwest_corner;

pub mod vogel;
pub use self::vogel::vogel;

use crate::matrix::Matrix;
use crate::problem::Problem;
use crate::{tolerance, Value, ZERO};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// The result of an initial heuristic.
#[derive(Clone, PartialEq, Debug)]
pub struct InitialSolution<F> {
    pub allocation: Matrix<F>,
    /// `true` if the heuristic has been interrupted by its deadline and the
    /// allocation has been completed greedily.
    pub degraded: bool,
}

/// The available initial heuristics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Initial {
    Northwest,
    Vogel,
}

impl Initial {
    /// All heuristics.
    pub fn all() -> [Initial; 2] {
        [Initial::Northwest, Initial::Vogel]
    }

    /// Build an initial solution for `problem`.
    ///
    /// The deadline is ignored by the north-west corner rule.
    pub fn build<F>(self, problem: &Problem<F>, deadline: Option<Instant>) -> InitialSolution<F>
    where
        F: Value,
    {
        match self {
            Initial::Northwest => InitialSolution {
                allocation: northwest_corner(&problem.supplies, &problem.demands),
                degraded: false,
            },
            Initial::Vogel => vogel(&problem.costs, &problem.supplies, &problem.demands, deadline),
        }
    }
}

impl fmt::Display for Initial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Initial::Northwest => write!(f, "northwest"),
            Initial::Vogel => write!(f, "vogel"),
        }
    }
}

impl FromStr for Initial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "northwest" | "nw" => Ok(Initial::Northwest),
            "vogel" | "balas-hammer" => Ok(Initial::Vogel),
            _ => Err(format!("Unknown initial heuristic: {}", s)),
        }
    }
}

/// Ship the remaining supplies greedily in row-major order.
///
/// Every row with remaining supply sends as much as possible to each column
/// with remaining demand, in increasing column order.
pub(crate) fn complete_greedy<F>(allocation: &mut Matrix<F>, supplies: &mut [F], demands: &mut [F])
where
    F: Value,
{
    let zero = tolerance::<F>(ZERO);
    for (i, s) in supplies.iter_mut().enumerate() {
        for (j, d) in demands.iter_mut().enumerate() {
            if !(*s > zero) {
                break;
            }
            if *d > zero {
                let q = (*s).min(*d);
                allocation[(i, j)] += q;
                *s -= q;
                *d -= q;
            }
        }
    }
}
