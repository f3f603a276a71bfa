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

//! Validated instances of the balanced transportation problem.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::traits::ToPrimitive;
use crate::{tolerance, Value, ZERO};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A balanced transportation problem.
///
/// The fields are public for convenience; an instance built by
/// [`Problem::new`] is guaranteed to be balanced and all values are
/// non-negative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Problem<F> {
    /// The unit transportation costs, one row per supply node.
    pub costs: Matrix<F>,
    /// The supply of each origin.
    pub supplies: Vec<F>,
    /// The demand of each destination.
    pub demands: Vec<F>,
}

impl<F> Problem<F>
where
    F: Value,
{
    /// Create a new problem instance.
    ///
    /// Returns an error if the shapes do not match, a value is negative or
    /// total supply and total demand differ by more than `1e-9`.
    pub fn new(costs: Matrix<F>, supplies: Vec<F>, demands: Vec<F>) -> Result<Self> {
        if costs.shape() != (supplies.len(), demands.len()) {
            return Err(Error::DimensionMismatch {
                what: "cost matrix",
                expected: (supplies.len(), demands.len()),
                found: costs.shape(),
            });
        }

        // `!(x >= 0)` also rejects NaN
        if let Some(i) = supplies.iter().position(|&s| !(s >= F::zero())) {
            return Err(Error::NegativeValue { what: "supply", index: i });
        }
        if let Some(j) = demands.iter().position(|&d| !(d >= F::zero())) {
            return Err(Error::NegativeValue { what: "demand", index: j });
        }
        if let Some(k) = costs.iter().position(|(_, c)| !(c >= F::zero())) {
            return Err(Error::NegativeValue { what: "cost", index: k });
        }

        let supply = supplies.iter().fold(F::zero(), |s, &x| s + x);
        let demand = demands.iter().fold(F::zero(), |s, &x| s + x);
        if (supply - demand).abs() > tolerance(ZERO) {
            return Err(Error::Unbalanced {
                supply: supply.to_f64().unwrap_or(f64::NAN),
                demand: demand.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Problem {
            costs,
            supplies,
            demands,
        })
    }

    /// Number of supply nodes.
    pub fn num_supplies(&self) -> usize {
        self.supplies.len()
    }

    /// Number of demand nodes.
    pub fn num_demands(&self) -> usize {
        self.demands.len()
    }

    /// The total amount to be shipped.
    pub fn total_supply(&self) -> F {
        self.supplies.iter().fold(F::zero(), |s, &x| s + x)
    }
}
