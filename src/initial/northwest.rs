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

//! The north-west corner rule.

use crate::matrix::Matrix;
use crate::{tolerance, Value, ZERO};

use log::debug;

/// Compute an initial allocation by the north-west corner rule.
///
/// Starting at cell `(0, 0)`, the current cell receives the minimum of the
/// remaining supply of its row and the remaining demand of its column. Then
/// the row is advanced if its supply is exhausted, otherwise the column. The
/// costs are not used.
///
/// Because the row is advanced first, a cell that exhausts both its row and
/// its column is followed by an explicit zero allocation in the next row. The
/// resulting solution has at most `n + m - 1` cells with positive value.
///
/// # Example
///
/// ```
/// use rs_transport::northwest_corner;
///
/// let x = northwest_corner(&[30.0, 50.0, 40.0], &[40.0, 40.0, 40.0]);
/// assert_eq!(x.to_rows(), vec![
///     vec![30.0, 0.0, 0.0],
///     vec![10.0, 40.0, 0.0],
///     vec![0.0, 0.0, 40.0],
/// ]);
/// ```
pub fn northwest_corner<F>(supplies: &[F], demands: &[F]) -> Matrix<F>
where
    F: Value,
{
    let zero = tolerance::<F>(ZERO);
    let (n, m) = (supplies.len(), demands.len());
    let mut allocation = Matrix::new(n, m);
    let mut supplies = supplies.to_vec();
    let mut demands = demands.to_vec();

    let (mut i, mut j) = (0, 0);
    let mut nsteps = 0;
    while i < n && j < m {
        let q = supplies[i].min(demands[j]);
        allocation[(i, j)] = q;
        supplies[i] -= q;
        demands[j] -= q;
        nsteps += 1;
        if supplies[i] < zero {
            i += 1;
        } else if demands[j] < zero {
            j += 1;
        } else {
            // neither exhausted, can only happen for invalid input
            break;
        }
    }
    debug!("North-west corner rule finished after {} steps", nsteps);

    allocation
}
