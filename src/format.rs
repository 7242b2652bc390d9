//! Plain-text instance format.
//!
//! The classic QKP benchmark layout:
//!
//! ```text
//! <instance name>
//! <n>
//! <n linear values>
//! <n-1 rows of the upper triangle: row i holds pair(i, j) for j > i>
//!
//! <constraint type: 0 = "<=", 1 = "=">
//! <capacity>
//! <n weights>
//! ```
//!
//! The first line is taken verbatim as the name; everything after it is read
//! as whitespace-separated tokens, so line breaks inside a section do not
//! matter. Anything after the weights is ignored.

use crate::error::{QkpError, Result};
use crate::instance::{ConstraintType, Instance, InteractionMatrix};
use std::path::Path;
use std::str::FromStr;

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let text = std::fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Writes `instance` to `path` in the text format.
pub fn write_instance_file(instance: &Instance, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, write_instance(instance))?;
    Ok(())
}

/// Parses an instance from text.
///
/// # Errors
/// [`QkpError::Parse`] with the offending line for missing or malformed
/// tokens; [`QkpError::InvalidInstance`] when the numbers parse but violate
/// an instance invariant (for example a negative capacity).
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut lines = text.lines();
    let name = lines
        .next()
        .ok_or_else(|| parse_error(1, "missing instance name"))?
        .trim()
        .to_string();

    let mut tokens = Tokens::new(lines);

    let n: usize = tokens.next("item count")?;
    let values: Vec<f64> = (0..n)
        .map(|_| tokens.next("linear value"))
        .collect::<Result<_>>()?;

    let mut rows = Vec::with_capacity(n.saturating_sub(1));
    for i in 0..n.saturating_sub(1) {
        let row: Vec<f64> = (i + 1..n)
            .map(|_| tokens.next("interaction value"))
            .collect::<Result<_>>()?;
        rows.push(row);
    }

    let code_line = tokens.line();
    let code: i64 = tokens.next("constraint type")?;
    let constraint_type = ConstraintType::from_code(code)
        .ok_or_else(|| parse_error(code_line, &format!("unknown constraint type {code}")))?;
    let capacity: f64 = tokens.next("capacity")?;
    let weights: Vec<f64> = (0..n)
        .map(|_| tokens.next("weight"))
        .collect::<Result<_>>()?;

    let interactions = InteractionMatrix::from_upper_triangle(n, &rows)?;
    Ok(Instance::new(weights, values, interactions, capacity)?
        .with_name(name)
        .with_constraint_type(constraint_type))
}

/// Formats an instance in the text format accepted by [`parse_instance`].
pub fn write_instance(instance: &Instance) -> String {
    let n = instance.num_items();
    let mut lines = vec![
        instance.name().to_string(),
        n.to_string(),
        join((0..n).map(|i| instance.value(i))),
    ];
    lines.extend((0..n.saturating_sub(1)).map(|i| join((i + 1..n).map(|j| instance.pair(i, j)))));
    lines.push(String::new());
    lines.push(instance.constraint_type().code().to_string());
    lines.push(instance.capacity().to_string());
    lines.push(join((0..n).map(|i| instance.weight(i))));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join(values: impl Iterator<Item = f64>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_error(line: usize, message: &str) -> QkpError {
    QkpError::Parse {
        line,
        message: message.to_string(),
    }
}

/// Whitespace tokenizer that remembers 1-based line numbers.
struct Tokens<'a, I: Iterator<Item = &'a str>> {
    lines: I,
    current: std::str::SplitWhitespace<'a>,
    line: usize,
}

impl<'a, I: Iterator<Item = &'a str>> Tokens<'a, I> {
    /// Starts after the name line.
    fn new(lines: I) -> Self {
        Self {
            lines,
            current: "".split_whitespace(),
            line: 1,
        }
    }

    /// Line of the next token (or of the end of input).
    fn line(&mut self) -> usize {
        self.peek_line();
        self.line
    }

    fn peek_line(&mut self) {
        loop {
            if self.current.clone().next().is_some() {
                return;
            }
            match self.lines.next() {
                Some(l) => {
                    self.line += 1;
                    self.current = l.split_whitespace();
                }
                None => return,
            }
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        self.peek_line();
        let token = self
            .current
            .next()
            .ok_or_else(|| parse_error(self.line, &format!("unexpected end of input, expected {what}")))?;
        token
            .parse()
            .map_err(|_| parse_error(self.line, &format!("invalid {what} '{token}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
r_10_100_13
3
10 20 30
5 -3
8

0
4
1 2 3
";

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance(SAMPLE).unwrap();
        assert_eq!(inst.name(), "r_10_100_13");
        assert_eq!(inst.num_items(), 3);
        assert_eq!(inst.value(2), 30.0);
        assert_eq!(inst.pair(0, 1), 5.0);
        assert_eq!(inst.pair(2, 0), -3.0);
        assert_eq!(inst.pair(1, 2), 8.0);
        assert_eq!(inst.capacity(), 4.0);
        assert_eq!(inst.weight(1), 2.0);
        assert_eq!(inst.constraint_type(), ConstraintType::LessOrEqual);
    }

    #[test]
    fn test_round_trip() {
        let inst = parse_instance(SAMPLE).unwrap();
        let text = write_instance(&inst);
        assert_eq!(parse_instance(&text).unwrap(), inst);
    }

    #[test]
    fn test_write_reproduces_layout() {
        let inst = parse_instance(SAMPLE).unwrap();
        assert_eq!(write_instance(&inst), SAMPLE);
    }

    #[test]
    fn test_single_item_has_no_triangle() {
        let inst = parse_instance("one\n1\n7\n\n0\n5\n2\n").unwrap();
        assert_eq!(inst.num_items(), 1);
        assert_eq!(inst.value(0), 7.0);
        assert_eq!(inst.weight(0), 2.0);
    }

    #[test]
    fn test_trailing_text_ignored() {
        let text = format!("{SAMPLE}\nsome comment line\n");
        assert!(parse_instance(&text).is_ok());
    }

    #[test]
    fn test_equality_constraint_carried() {
        let text = SAMPLE.replace("\n0\n4\n", "\n1\n4\n");
        let inst = parse_instance(&text).unwrap();
        assert_eq!(inst.constraint_type(), ConstraintType::Equality);
        assert!(write_instance(&inst).contains("\n1\n4\n"));
    }

    #[test]
    fn test_truncated_input_reports_line() {
        let err = parse_instance("name\n3\n10 20 30\n5 -3\n").unwrap_err();
        match err {
            QkpError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("interaction value"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bad_token_reports_line() {
        let text = SAMPLE.replace("5 -3", "5 x");
        match parse_instance(&text).unwrap_err() {
            QkpError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("'x'"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unknown_constraint_type() {
        let text = SAMPLE.replace("\n0\n4\n", "\n7\n4\n");
        match parse_instance(&text).unwrap_err() {
            QkpError::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_negative_capacity_is_invalid_instance() {
        let text = SAMPLE.replace("\n0\n4\n", "\n0\n-4\n");
        assert!(matches!(
            parse_instance(&text),
            Err(QkpError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_zero_items_is_invalid_instance() {
        assert!(matches!(
            parse_instance("empty\n0\n\n0\n10\n"),
            Err(QkpError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(parse_instance(""), Err(QkpError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_instance("/nonexistent/qkp/instance.txt"),
            Err(QkpError::Io(_))
        ));
    }
}
