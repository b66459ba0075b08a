//! Plain-text instance format.
//!
//! ```text
//! n
//! t_1 ... t_k      (one row per task, k = worker count)
//! i j              (precedence pairs, 1-based)
//! -1 -1            (end marker)
//! ```
//!
//! The token `Inf` (any capitalization, or anything that parses to +∞)
//! marks a cell as incapable. Blank lines are skipped and lines starting
//! with `#` are comments. The precedence list ends at the `-1 -1` marker
//! or at end of input, whichever comes first.

use std::str::FromStr;

use super::{Instance, MalformedInstance};

impl FromStr for Instance {
    type Err = MalformedInstance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines.next().ok_or(MalformedInstance::MissingTaskCount)?;
        let num_tasks: usize =
            header
                .parse()
                .map_err(|_| MalformedInstance::InvalidTaskCount {
                    line: header.to_string(),
                })?;

        let mut rows = Vec::with_capacity(num_tasks);
        for row in 1..=num_tasks {
            let line = lines
                .next()
                .ok_or(MalformedInstance::MissingTimeRow { row })?;
            let times = line
                .split_whitespace()
                .map(|token| parse_time(token, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(times);
        }

        let mut precedences = Vec::new();
        for line in lines {
            match parse_pair(line)? {
                (-1, -1) => break,
                (i, j) if i >= 1 && j >= 1 => precedences.push((i as usize, j as usize)),
                _ => {
                    return Err(MalformedInstance::InvalidPrecedence {
                        line: line.to_string(),
                    })
                }
            }
        }

        Instance::new(rows, precedences)
    }
}

fn parse_time(token: &str, row: usize) -> Result<Option<f64>, MalformedInstance> {
    if token.eq_ignore_ascii_case("inf") {
        return Ok(None);
    }
    let value: f64 = token.parse().map_err(|_| MalformedInstance::InvalidTime {
        row,
        token: token.to_string(),
    })?;
    if value.is_nan() {
        return Err(MalformedInstance::InvalidTime {
            row,
            token: token.to_string(),
        });
    }
    // Overflowing literals parse to +∞ and count as incapacity too
    Ok((!value.is_infinite()).then_some(value))
}

fn parse_pair(line: &str) -> Result<(i64, i64), MalformedInstance> {
    let invalid = || MalformedInstance::InvalidPrecedence {
        line: line.to_string(),
    };
    let mut tokens = line.split_whitespace();
    let i = tokens.next().ok_or_else(invalid)?;
    let j = tokens.next().ok_or_else(invalid)?;
    if tokens.next().is_some() {
        return Err(invalid());
    }
    Ok((
        i.parse().map_err(|_| invalid())?,
        j.parse().map_err(|_| invalid())?,
    ))
}
