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

//! Random problem instances.
//!
//! Costs are drawn uniformly from `1..=100`. Supplies and demands are the row
//! and column sums of a second random matrix with entries in `1..=100`, so
//! every generated instance is balanced.

use crate::matrix::Matrix;
use crate::problem::Problem;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a random `n x n` instance from a seed.
///
/// # Example
///
/// ```
/// use rs_transport::generate::random_problem;
///
/// let p = random_problem(10, 42);
/// assert_eq!(p.costs.shape(), (10, 10));
/// assert_eq!(p, random_problem(10, 42));
/// ```
pub fn random_problem(n: usize, seed: u64) -> Problem<f64> {
    random_problem_with(n, n, &mut StdRng::seed_from_u64(seed))
}

/// Generate a random `n x m` instance using the given random number generator.
pub fn random_problem_with<R: Rng>(n: usize, m: usize, rng: &mut R) -> Problem<f64> {
    let costs = Matrix::from_fn(n, m, |_, _| f64::from(rng.gen_range(1..=100u32)));
    let flows = Matrix::from_fn(n, m, |_, _| f64::from(rng.gen_range(1..=100u32)));
    Problem {
        costs,
        supplies: (0..n).map(|i| flows.row_sum(i)).collect(),
        demands: (0..m).map(|j| flows.col_sum(j)).collect(),
    }
}
