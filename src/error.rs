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

//! Errors of the transportation solver.

use crate::matrix::Cell;

use std::error;
use std::fmt;

/// Error raised by the solver or when building a problem instance.
///
/// Degeneracy and exhausted iteration or time limits are *not* errors, they
/// are reported by the [`SolutionState`][crate::SolutionState] of the solver.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Two objects do not have compatible shapes.
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The rows of a matrix do not have equal length.
    RaggedRows { row: usize, len: usize, expected: usize },
    /// A supply, demand or cost is negative (or not a number).
    NegativeValue { what: &'static str, index: usize },
    /// Total supply and total demand differ.
    Unbalanced { supply: f64, demand: f64 },
    /// A sequence of cells that should be a stepping-stone cycle is not.
    ///
    /// This indicates a broken basis tree and is never recovered.
    InvalidCycle(Vec<Cell>),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            DimensionMismatch { what, expected, found } => write!(
                fmt,
                "Dimension mismatch of {}: expected {}x{}, got {}x{}",
                what, expected.0, expected.1, found.0, found.1
            ),
            RaggedRows { row, len, expected } => {
                write!(fmt, "Row {} has {} entries, expected {}", row, len, expected)
            }
            NegativeValue { what, index } => write!(fmt, "Invalid {} at index {}: must be non-negative", what, index),
            Unbalanced { supply, demand } => write!(
                fmt,
                "Problem is not balanced: total supply {} != total demand {}",
                supply, demand
            ),
            InvalidCycle(cells) => write!(fmt, "Invalid stepping-stone cycle: {:?}", cells),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
