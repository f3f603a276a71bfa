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

//! Reading and writing transportation problems in text format.
//!
//! An instance with `n` supply and `m` demand nodes consists of
//!
//! - a line `n m`,
//! - `n` lines, each with the `m` costs of a row followed by its supply,
//! - a line with the `m` demands.
//!
//! Empty lines and lines starting with `#` are ignored.
//!
//! ```text
//! # 3 origins, 3 destinations
//! 3 3
//! 30 20 20 30
//! 10 50 20 50
//! 50 40 30 40
//! 40 40 40
//! ```
//!
//! Solutions are written in the style of DIMACS solution files: a line
//! `s <value>` followed by one line `f <row> <col> <amount>` for each cell
//! with positive amount (1-based indices).

use crate::matrix::Matrix;
use crate::problem::Problem;
use crate::Value;

use std::error;
use std::fmt::{self, Display};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a file.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format { line: usize, msg: String },
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Format { line, msg } => write!(fmt, "Format error on line {}: {}", line, msg),
            Data { line, msg } => write!(fmt, "Data error on line {}: {}", line, msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

struct Reader<R: Read> {
    io: BufReader<R>,
    line: String,
    line_number: usize,
}

impl<R: Read> Reader<R> {
    fn new(reader: R) -> Self {
        Reader {
            io: BufReader::new(reader),
            line: String::new(),
            line_number: 0,
        }
    }

    /// Return the tokens of the next non-empty, non-comment line.
    fn read_line(&mut self) -> Result<Option<Tokens>> {
        loop {
            self.line.clear();
            if self.io.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let content = self.line.trim_start();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            return Ok(Some(Tokens {
                it: self.line.split_whitespace(),
                line: self.line_number,
            }));
        }
    }

    fn expect_line(&mut self, what: &str) -> Result<Tokens> {
        let line_number = self.line_number;
        self.read_line()?.ok_or_else(|| Error::Format {
            line: line_number,
            msg: format!("unexpected end of file, expected {}", what),
        })
    }
}

/// Iterates over the tokens in a line.
struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn str(&mut self) -> Result<&'a str> {
        self.it.next().ok_or_else(|| Error::Format {
            line: self.line,
            msg: "expected token".to_string(),
        })
    }

    /// Returns the next token converted to a number.
    fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let line = self.line;
        self.it
            .next()
            .ok_or_else(|| Error::Format {
                line,
                msg: "expected number".to_string(),
            })?
            .parse()
            .map_err(|e| Error::Format {
                line,
                msg: format!("{}", e),
            })
    }

    /// Returns the next token as a non-negative number.
    fn nonnegative<F>(&mut self, what: &str) -> Result<F>
    where
        F: Value + FromStr,
        F::Err: Display,
    {
        let x: F = self.number()?;
        if x >= F::zero() {
            Ok(x)
        } else {
            Err(Error::Data {
                line: self.line,
                msg: format!("{} must be non-negative, got {}", what, x),
            })
        }
    }

    /// Ensures that there is no next token.
    fn end(&mut self) -> Result<()> {
        if let Some(s) = self.it.next() {
            Err(Error::Format {
                line: self.line,
                msg: format!("unexpected token at end of line: {}", s),
            })
        } else {
            Ok(())
        }
    }
}

/// Read a transportation problem.
pub fn read<R, F>(r: R) -> Result<Problem<F>>
where
    R: Read,
    F: Value + FromStr,
    F::Err: Display,
{
    let mut reader = Reader::new(r);

    let (n, m) = {
        let mut toks = reader.expect_line("problem size")?;
        let n: usize = toks.number()?;
        let m: usize = toks.number()?;
        toks.end()?;
        (n, m)
    };

    let mut costs = Matrix::new(n, m);
    let mut supplies = Vec::with_capacity(n);
    for i in 0..n {
        let mut toks = reader.expect_line(&format!("costs and supply of row {}", i + 1))?;
        for j in 0..m {
            costs[(i, j)] = toks.nonnegative("cost")?;
        }
        supplies.push(toks.nonnegative("supply")?);
        toks.end()?;
    }

    let (demands, line) = {
        let mut toks = reader.expect_line("demands")?;
        let mut demands = Vec::with_capacity(m);
        for _ in 0..m {
            demands.push(toks.nonnegative("demand")?);
        }
        toks.end()?;
        (demands, toks.line)
    };

    if let Some(toks) = reader.read_line()? {
        return Err(Error::Format {
            line: toks.line,
            msg: "unexpected line after demands".to_string(),
        });
    }

    Problem::new(costs, supplies, demands).map_err(|e| Error::Data {
        line,
        msg: e.to_string(),
    })
}

/// Read a transportation problem from a named file.
pub fn read_from_file<F>(filename: &str) -> Result<Problem<F>>
where
    F: Value + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation problem.
pub fn write<W, F>(mut w: W, problem: &Problem<F>) -> io::Result<()>
where
    W: Write,
    F: Value,
{
    writeln!(w, "{} {}", problem.num_supplies(), problem.num_demands())?;
    for (row, s) in problem.costs.rows().zip(&problem.supplies) {
        for c in row {
            write!(w, "{} ", c)?;
        }
        writeln!(w, "{}", s)?;
    }
    let demands: Vec<_> = problem.demands.iter().map(|d| d.to_string()).collect();
    writeln!(w, "{}", demands.join(" "))?;
    Ok(())
}

/// Write a transportation problem to a named file.
pub fn write_to_file<F>(filename: &str, problem: &Problem<F>) -> io::Result<()>
where
    F: Value,
{
    write(&mut std::fs::File::create(filename)?, problem)
}

/// Write a solution of a transportation problem.
pub fn write_solution<W, F>(mut w: W, allocation: &Matrix<F>, value: F) -> io::Result<()>
where
    W: Write,
    F: Value,
{
    writeln!(w, "s {}", value)?;
    for ((i, j), x) in allocation.iter() {
        if x > F::zero() {
            writeln!(w, "f {} {} {}", i + 1, j + 1, x)?;
        }
    }
    Ok(())
}

/// Write a solution of a transportation problem to a named file.
pub fn write_solution_to_file<F>(filename: &str, allocation: &Matrix<F>, value: F) -> io::Result<()>
where
    F: Value,
{
    write_solution(&mut std::fs::File::create(filename)?, allocation, value)
}

/// Read a solution of a transportation problem.
///
/// Returns the solution value and the list of `(row, col, amount)` with
/// 0-based indices.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = Reader::new(r);
    let mut cells = vec![];
    let mut sol = None;

    while let Some(mut toks) = reader.read_line()? {
        match toks.str()? {
            "s" => {
                if sol.is_some() {
                    return Err(Error::Format {
                        line: toks.line,
                        msg: "The solution value must be specified exactly once".to_string(),
                    });
                }
                sol = Some(toks.number()?);
            }
            "f" => {
                let i = toks.number::<usize>()?;
                let j = toks.number::<usize>()?;
                if i == 0 || j == 0 {
                    return Err(Error::Data {
                        line: toks.line,
                        msg: "indices must be positive".to_string(),
                    });
                }
                cells.push((i - 1, j - 1, toks.number()?));
            }
            d => {
                return Err(Error::Format {
                    line: toks.line,
                    msg: format!("unexpected line, expected 's' or 'f', got '{}'", d),
                })
            }
        }
        toks.end()?;
    }

    let line = reader.line_number;
    sol.map(|v| (v, cells)).ok_or_else(|| Error::Format {
        line,
        msg: "missing solution value".to_string(),
    })
}

/// Read a solution of a transportation problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INSTANCE: &str = "# a small instance
3 3
30 20 20 30
10 50 20 50

50 40 30 40
40 40 40
";

    #[test]
    fn test_read() {
        let p: Problem<f64> = read(Cursor::new(INSTANCE)).unwrap();
        assert_eq!(p.costs.shape(), (3, 3));
        assert_eq!(p.costs[(1, 2)], 20.0);
        assert_eq!(p.supplies, vec![30.0, 50.0, 40.0]);
        assert_eq!(p.demands, vec![40.0, 40.0, 40.0]);
    }

    #[test]
    fn test_write_read() {
        let p: Problem<f64> = read(Cursor::new(INSTANCE)).unwrap();
        let mut buf = vec![];
        write(&mut buf, &p).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "3 3\n30 20 20 30\n10 50 20 50\n50 40 30 40\n40 40 40\n"
        );
        let q: Problem<f64> = read(Cursor::new(buf)).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_errors() {
        // end of file after the last complete line
        match read::<_, f64>(Cursor::new("2 2\n1 2 3\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read::<_, f64>(Cursor::new("1 1\n1 2 3\n2\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read::<_, f64>(Cursor::new("1 2\n1 x 3\n1 2\n")) {
            Err(Error::Format { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read::<_, f64>(Cursor::new("1 1\n1 -3\n-3\n")) {
            Err(Error::Data { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match read::<_, f64>(Cursor::new("1 2\n1 1 3\n1 1\n")) {
            Err(Error::Data { line: 3, msg }) => assert!(msg.contains("not balanced")),
            r => panic!("unexpected result: {:?}", r),
        }
        match read::<_, f64>(Cursor::new("1 1\n1 3\n3\n4\n")) {
            Err(Error::Format { line: 4, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_solution() {
        let x = Matrix::from_rows(vec![vec![0.0, 30.0], vec![40.0, 0.5]]).unwrap();
        let mut buf = vec![];
        write_solution(&mut buf, &x, 1234.5).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "s 1234.5\nf 1 2 30\nf 2 1 40\nf 2 2 0.5\n"
        );
        let (value, cells) = read_solution::<_, f64>(Cursor::new(buf)).unwrap();
        assert_eq!(value, 1234.5);
        assert_eq!(cells, vec![(0, 1, 30.0), (1, 0, 40.0), (1, 1, 0.5)]);

        assert!(read_solution::<_, f64>(Cursor::new("f 1 1 1\n")).is_err());
        assert!(read_solution::<_, f64>(Cursor::new("s 1\ns 2\n")).is_err());
    }
}
