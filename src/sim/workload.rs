use std::{error, fmt};

use rand::prelude::*;

use crate::core::{Priority, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub service_time: Ticks,
    pub priority: Priority,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, service_time: Ticks, priority: Priority) -> Self {
        Self {
            name: name.into(),
            service_time,
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingField { line: usize, field: &'static str },
    BadNumber { line: usize, field: &'static str },
    ExtraField { line: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { line, field } => write!(f, "line {line}: missing {field}"),
            Self::BadNumber { line, field } => {
                write!(f, "line {line}: {field} is not a valid number")
            }
            Self::ExtraField { line } => write!(
                f,
                "line {line}: too many fields (expected name, service time, priority)"
            ),
        }
    }
}

impl error::Error for ParseError {}

// One process per line: `name service_time priority`.
// Blank lines and `#` comments are skipped.
pub fn parse_workload(input: &str) -> Result<Vec<ProcessSpec>, ParseError> {
    let mut specs = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let mut fields = text.split_whitespace();
        let name = fields
            .next()
            .ok_or(ParseError::MissingField { line, field: "name" })?;
        let service = fields.next().ok_or(ParseError::MissingField {
            line,
            field: "service time",
        })?;
        let priority = fields.next().ok_or(ParseError::MissingField {
            line,
            field: "priority",
        })?;
        if fields.next().is_some() {
            return Err(ParseError::ExtraField { line });
        }

        let service_time = service.parse().map_err(|_| ParseError::BadNumber {
            line,
            field: "service time",
        })?;
        let priority = priority.parse().map_err(|_| ParseError::BadNumber {
            line,
            field: "priority",
        })?;

        specs.push(ProcessSpec {
            name: name.to_string(),
            service_time,
            priority,
        });
    }

    Ok(specs)
}

// Deterministic per seed; service times stay positive so every spec admits.
pub fn random_workload(
    count: usize,
    max_service: Ticks,
    max_priority: Priority,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| ProcessSpec {
            name: format!("P{}", i + 1),
            service_time: rng.random_range(1..=max_service),
            priority: rng.random_range(0..=max_priority),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_and_skips_noise() {
        let input = "# workload\nA 2 3\n\n  B 1 -4\n";
        let specs = parse_workload(input).unwrap();
        assert_eq!(
            specs,
            vec![ProcessSpec::new("A", 2, 3), ProcessSpec::new("B", 1, -4)]
        );
    }

    #[test]
    fn reports_missing_fields_with_line_numbers() {
        let err = parse_workload("A 2 3\nB 1\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                line: 2,
                field: "priority",
            }
        );
    }

    #[test]
    fn rejects_non_numeric_service_time() {
        let err = parse_workload("A two 3\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::BadNumber {
                line: 1,
                field: "service time",
            }
        );
    }

    #[test]
    fn rejects_trailing_fields() {
        let err = parse_workload("A 2 3 extra\n").unwrap_err();
        assert_eq!(err, ParseError::ExtraField { line: 1 });
    }

    #[test]
    fn random_workload_is_deterministic_per_seed() {
        let a = random_workload(8, 6, 10, 42);
        let b = random_workload(8, 6, 10, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.service_time >= 1 && s.service_time <= 6));
        assert!(a.iter().all(|s| (0..=10).contains(&s.priority)));
    }
}
