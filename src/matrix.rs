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

//! Dense matrices for costs and allocations.

use crate::error::{Error, Result};
use crate::Value;

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::ChunksExact;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A cell `(i, j)` of a transportation table.
///
/// `i` is the row (supply) index and `j` the column (demand) index.
pub type Cell = (usize, usize);

/// A dense `n x m` matrix stored in row-major order.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix<F> {
    nrows: usize,
    ncols: usize,
    data: Vec<F>,
}

impl<F> Matrix<F>
where
    F: Value,
{
    /// Return a new matrix with all entries zero.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::from_elem(nrows, ncols, F::zero())
    }

    /// Return a new matrix with all entries equal to `value`.
    pub fn from_elem(nrows: usize, ncols: usize, value: F) -> Self {
        Matrix {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }

    /// Create a matrix from a list of rows.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: ncols,
                });
            }
            data.extend(row);
        }
        Ok(Matrix { nrows, ncols, data })
    }

    /// Create a matrix with entries given by a function of the cell.
    pub fn from_fn<G>(nrows: usize, ncols: usize, mut f: G) -> Self
    where
        G: FnMut(usize, usize) -> F,
    {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Matrix { nrows, ncols, data }
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Return the entries of row `i`.
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Return an iterator over all rows.
    pub fn rows(&self) -> ChunksExact<F> {
        // chunks_exact panics on a chunk size of 0
        self.data.chunks_exact(self.ncols.max(1))
    }

    /// Return an iterator over all cells and their values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, F)> + '_ {
        let ncols = self.ncols;
        self.data.iter().enumerate().map(move |(k, &x)| ((k / ncols, k % ncols), x))
    }

    pub fn row_sum(&self, i: usize) -> F {
        self.row(i).iter().fold(F::zero(), |s, &x| s + x)
    }

    pub fn col_sum(&self, j: usize) -> F {
        (0..self.nrows).fold(F::zero(), |s, i| s + self[(i, j)])
    }

    /// Return the sum of all entries.
    pub fn sum(&self) -> F {
        self.data.iter().fold(F::zero(), |s, &x| s + x)
    }

    /// Return the number of entries greater than `zero`.
    pub fn count_above(&self, zero: F) -> usize {
        self.data.iter().filter(|&&x| x > zero).count()
    }

    /// Return the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<F>> {
        self.rows().take(self.nrows).map(<[F]>::to_vec).collect()
    }
}

impl<F> Index<Cell> for Matrix<F> {
    type Output = F;

    fn index(&self, (i, j): Cell) -> &F {
        debug_assert!(i < self.nrows && j < self.ncols);
        &self.data[i * self.ncols + j]
    }
}

impl<F> IndexMut<Cell> for Matrix<F> {
    fn index_mut(&mut self, (i, j): Cell) -> &mut F {
        debug_assert!(i < self.nrows && j < self.ncols);
        &mut self.data[i * self.ncols + j]
    }
}

impl<F> fmt::Display for Matrix<F>
where
    F: Value,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        for row in self.rows().take(self.nrows) {
            let mut first = true;
            for x in row {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Return the total cost `sum c_ij * x_ij` of an allocation.
///
/// Fails if the matrices do not have the same shape.
pub fn total_cost<F>(costs: &Matrix<F>, allocation: &Matrix<F>) -> Result<F>
where
    F: Value,
{
    if costs.shape() != allocation.shape() {
        return Err(Error::DimensionMismatch {
            what: "allocation",
            expected: costs.shape(),
            found: allocation.shape(),
        });
    }
    Ok(costs
        .data
        .iter()
        .zip(allocation.data.iter())
        .fold(F::zero(), |s, (&c, &x)| s + c * x))
}
