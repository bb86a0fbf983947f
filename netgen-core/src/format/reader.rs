//! Parses the text format back into its problem, node, arc, and
//! interdependency lines.

use std::{
    fmt,
    io::{self, BufRead},
    str::SplitWhitespace,
};

use thiserror::Error;

use crate::{error::define_error_codes, network::Interdependency, params::ParentMode};

/// Problem flavour declared by the `p` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// `p min`: balances, costed arcs, and interdependencies.
    MinCost {
        /// What the interdependency parents originally referred to.
        parent_mode: ParentMode,
    },
    /// `p max`: sources and sinks tagged, arcs without cost.
    MaxFlow,
}

/// Role given to a node by an `n` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeDesignation {
    /// Signed supply (positive) or demand (negative).
    Balance(i64),
    /// Maximum-flow source.
    Source,
    /// Maximum-flow sink.
    Sink,
}

/// An `n` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNode {
    /// 1-based node id.
    pub id: usize,
    /// Balance or terminal tag.
    pub designation: NodeDesignation,
}

/// An `a` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedArc {
    /// Origin node id.
    pub tail: i64,
    /// Destination node id.
    pub head: i64,
    /// Upper bound on flow.
    pub capacity: i64,
    /// Unit cost; absent in the maximum-flow form.
    pub cost: Option<i64>,
}

/// Contents of a parsed problem file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProblem {
    /// Declared problem flavour.
    pub kind: ProblemKind,
    /// Declared node count.
    pub nodes: usize,
    /// Node lines in file order.
    pub node_lines: Vec<ParsedNode>,
    /// Arc lines in file order; arc id `k` is at index `k - 1`.
    pub arcs: Vec<ParsedArc>,
    /// Interdependency lines in file order.
    pub interdependencies: Vec<Interdependency>,
}

impl ParsedProblem {
    /// Sum of positive balances.
    #[must_use]
    pub fn total_supply(&self) -> i64 {
        self.balances().filter(|&balance| balance > 0).sum()
    }

    /// Sum of negative balances, as a positive number.
    #[must_use]
    pub fn total_demand(&self) -> i64 {
        -self.balances().filter(|&balance| balance < 0).sum::<i64>()
    }

    /// Capacity of the arcs into the artificial node 0.
    #[must_use]
    pub fn delivered_demand(&self) -> i64 {
        self.arcs
            .iter()
            .filter(|arc| arc.head == 0)
            .map(|arc| arc.capacity)
            .sum()
    }

    fn balances(&self) -> impl Iterator<Item = i64> + '_ {
        self.node_lines
            .iter()
            .filter_map(|node| match node.designation {
                NodeDesignation::Balance(balance) => Some(balance),
                NodeDesignation::Source | NodeDesignation::Sink => None,
            })
    }
}

/// Error produced while reading a problem file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read problem: {source}")]
    Io {
        /// Source error from the reader.
        #[source]
        source: io::Error,
    },
    /// The input ended without a `p` line.
    #[error("missing problem line")]
    MissingProblemLine,
    /// A second `p` line appeared.
    #[error("line {line}: duplicate problem line")]
    DuplicateProblemLine {
        /// 1-based line number.
        line: usize,
    },
    /// A node, arc, or interdependency line preceded the `p` line.
    #[error("line {line}: '{tag}' line before the problem line")]
    BeforeProblemLine {
        /// 1-based line number.
        line: usize,
        /// Line tag.
        tag: char,
    },
    /// The line tag is not one of `c`, `p`, `n`, `a`, `i`.
    #[error("line {line}: unknown line type '{tag}'")]
    UnknownLineType {
        /// 1-based line number.
        line: usize,
        /// Offending tag.
        tag: String,
    },
    /// A required field is missing.
    #[error("line {line}: missing {field}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the absent field.
        field: &'static str,
    },
    /// A numeric field did not parse.
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// A keyword field held an unexpected value.
    #[error("line {line}: unexpected {field} '{value}'")]
    UnexpectedToken {
        /// 1-based line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// Extra fields followed a complete line.
    #[error("line {line}: unexpected trailing field '{value}'")]
    TrailingField {
        /// 1-based line number.
        line: usize,
        /// First extra field.
        value: String,
    },
    /// The vestigial lower-bound field was not zero.
    #[error("line {line}: arc lower bound must be 0 (got {value})")]
    NonZeroLowerBound {
        /// 1-based line number.
        line: usize,
        /// Lower bound found.
        value: i64,
    },
    /// A node id fell outside `1..=nodes`.
    #[error("line {line}: node {id} outside 1..={nodes}")]
    NodeOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Offending node id.
        id: usize,
        /// Declared node count.
        nodes: usize,
    },
    /// The number of lines of some kind disagrees with the problem line.
    #[error("problem line declares {declared} {what} but {found} were read")]
    CountMismatch {
        /// Kind of line counted.
        what: &'static str,
        /// Count from the problem line.
        declared: usize,
        /// Count actually read.
        found: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ParseError`] variants.
    enum ParseErrorCode for ParseError {
        /// The underlying reader failed.
        Io => Io { .. } => "NETGEN_PARSE_IO",
        /// The input ended without a `p` line.
        MissingProblemLine => MissingProblemLine => "NETGEN_PARSE_MISSING_PROBLEM",
        /// A second `p` line appeared.
        DuplicateProblemLine => DuplicateProblemLine { .. } => "NETGEN_PARSE_DUPLICATE_PROBLEM",
        /// A data line preceded the `p` line.
        BeforeProblemLine => BeforeProblemLine { .. } => "NETGEN_PARSE_BEFORE_PROBLEM",
        /// Unknown line tag.
        UnknownLineType => UnknownLineType { .. } => "NETGEN_PARSE_UNKNOWN_LINE",
        /// A required field is missing.
        MissingField => MissingField { .. } => "NETGEN_PARSE_MISSING_FIELD",
        /// A numeric field did not parse.
        InvalidNumber => InvalidNumber { .. } => "NETGEN_PARSE_INVALID_NUMBER",
        /// A keyword field held an unexpected value.
        UnexpectedToken => UnexpectedToken { .. } => "NETGEN_PARSE_UNEXPECTED_TOKEN",
        /// Extra fields followed a complete line.
        TrailingField => TrailingField { .. } => "NETGEN_PARSE_TRAILING_FIELD",
        /// The arc lower bound was not zero.
        NonZeroLowerBound => NonZeroLowerBound { .. } => "NETGEN_PARSE_LOWER_BOUND",
        /// A node id fell outside the declared range.
        NodeOutOfRange => NodeOutOfRange { .. } => "NETGEN_PARSE_NODE_RANGE",
        /// Line counts disagree with the problem line.
        CountMismatch => CountMismatch { .. } => "NETGEN_PARSE_COUNT_MISMATCH",
    }
}

impl ParseError {
    /// 1-based line the error refers to, when it refers to one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::DuplicateProblemLine { line }
            | Self::BeforeProblemLine { line, .. }
            | Self::UnknownLineType { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::TrailingField { line, .. }
            | Self::NonZeroLowerBound { line, .. }
            | Self::NodeOutOfRange { line, .. } => Some(*line),
            Self::Io { .. } | Self::MissingProblemLine | Self::CountMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

/// Header values taken from the `p` line.
#[derive(Debug, Clone, Copy)]
struct ProblemLine {
    kind: ProblemKind,
    nodes: usize,
    arcs: usize,
    interdependencies: usize,
}

/// Whitespace-separated fields of one line, with line-numbered errors.
struct Fields<'a> {
    line: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn token(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::MissingField {
            line: self.line,
            field,
        })
    }

    fn number<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, ParseError> {
        let value = self.token(field)?;
        value.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            field,
            value: value.to_owned(),
        })
    }

    fn unexpected(&self, field: &'static str, value: &str) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line,
            field,
            value: value.to_owned(),
        }
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(extra) => Err(ParseError::TrailingField {
                line: self.line,
                value: extra.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Reads a problem file.
///
/// Lines whose first character is `c` and blank lines are skipped. The
/// arc and interdependency counts on the `p` line must match the lines that
/// follow it.
///
/// # Errors
/// Returns a [`ParseError`] naming the first malformed line, or the count
/// that disagrees with the problem line.
///
/// # Examples
/// ```
/// use netgen_core::{ParentMode, ProblemKind, read_problem};
///
/// let text = "c demo\np min 3 2 1 a\nn 1 5\nn 3 -5\na 1 2 0 5 1\na 2 3 0 5 1\ni 1 2\n";
/// let problem = read_problem(text.as_bytes()).expect("problem parses");
/// assert_eq!(problem.kind, ProblemKind::MinCost { parent_mode: ParentMode::Arc });
/// assert_eq!(problem.arcs.len(), 2);
/// assert_eq!(problem.total_supply(), problem.total_demand());
/// ```
pub fn read_problem<R: BufRead>(reader: R) -> Result<ParsedProblem, ParseError> {
    let mut header: Option<ProblemLine> = None;
    let mut node_lines = Vec::new();
    let mut arcs = Vec::new();
    let mut interdependencies = Vec::new();

    for (index, text) in reader.lines().enumerate() {
        let text = text?;
        let line = index + 1;
        if text.starts_with('c') {
            continue;
        }
        let mut fields = Fields {
            line,
            tokens: text.split_whitespace(),
        };
        let Some(tag) = fields.tokens.next() else {
            continue;
        };
        if tag == "p" {
            if header.is_some() {
                return Err(ParseError::DuplicateProblemLine { line });
            }
            header = Some(parse_problem_line(fields)?);
            continue;
        }
        let tag_char = tag.chars().next().unwrap_or(' ');
        let Some(problem) = header else {
            return if matches!(tag, "n" | "a" | "i") {
                Err(ParseError::BeforeProblemLine { line, tag: tag_char })
            } else {
                Err(ParseError::UnknownLineType {
                    line,
                    tag: tag.to_owned(),
                })
            };
        };
        match tag {
            "n" => node_lines.push(parse_node_line(fields, problem)?),
            "a" => arcs.push(parse_arc_line(fields, problem)?),
            "i" => interdependencies.push(parse_interdependency_line(fields)?),
            _ => {
                return Err(ParseError::UnknownLineType {
                    line,
                    tag: tag.to_owned(),
                });
            }
        }
    }

    let problem = header.ok_or(ParseError::MissingProblemLine)?;
    check_count("arcs", problem.arcs, arcs.len())?;
    check_count(
        "interdependencies",
        problem.interdependencies,
        interdependencies.len(),
    )?;
    Ok(ParsedProblem {
        kind: problem.kind,
        nodes: problem.nodes,
        node_lines,
        arcs,
        interdependencies,
    })
}

fn parse_problem_line(mut fields: Fields<'_>) -> Result<ProblemLine, ParseError> {
    let flavour = fields.token("problem type")?;
    let problem = match flavour {
        "min" => {
            let nodes = fields.number("node count")?;
            let arcs = fields.number("arc count")?;
            let interdependencies = fields.number("interdependency count")?;
            let token = fields.token("parent mode")?;
            let parent_mode = parent_mode_from(token)
                .ok_or_else(|| fields.unexpected("parent mode", token))?;
            ProblemLine {
                kind: ProblemKind::MinCost { parent_mode },
                nodes,
                arcs,
                interdependencies,
            }
        }
        "max" => ProblemLine {
            kind: ProblemKind::MaxFlow,
            nodes: fields.number("node count")?,
            arcs: fields.number("arc count")?,
            interdependencies: 0,
        },
        other => return Err(fields.unexpected("problem type", other)),
    };
    fields.finish()?;
    Ok(problem)
}

fn parent_mode_from(token: &str) -> Option<ParentMode> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    ParentMode::from_token(first)
}

fn parse_node_line(mut fields: Fields<'_>, problem: ProblemLine) -> Result<ParsedNode, ParseError> {
    let id: usize = fields.number("node id")?;
    if id == 0 || id > problem.nodes {
        return Err(ParseError::NodeOutOfRange {
            line: fields.line,
            id,
            nodes: problem.nodes,
        });
    }
    let designation = match problem.kind {
        ProblemKind::MinCost { .. } => NodeDesignation::Balance(fields.number("balance")?),
        ProblemKind::MaxFlow => match fields.token("terminal tag")? {
            "s" => NodeDesignation::Source,
            "t" => NodeDesignation::Sink,
            other => return Err(fields.unexpected("terminal tag", other)),
        },
    };
    fields.finish()?;
    Ok(ParsedNode { id, designation })
}

fn parse_arc_line(mut fields: Fields<'_>, problem: ProblemLine) -> Result<ParsedArc, ParseError> {
    let tail = fields.number("tail")?;
    let head = fields.number("head")?;
    let arc = match problem.kind {
        ProblemKind::MinCost { .. } => {
            let lower: i64 = fields.number("lower bound")?;
            if lower != 0 {
                return Err(ParseError::NonZeroLowerBound {
                    line: fields.line,
                    value: lower,
                });
            }
            ParsedArc {
                tail,
                head,
                capacity: fields.number("capacity")?,
                cost: Some(fields.number("cost")?),
            }
        }
        ProblemKind::MaxFlow => ParsedArc {
            tail,
            head,
            capacity: fields.number("capacity")?,
            cost: None,
        },
    };
    fields.finish()?;
    Ok(arc)
}

fn parse_interdependency_line(mut fields: Fields<'_>) -> Result<Interdependency, ParseError> {
    let parent = fields.number("parent arc")?;
    let child = fields.number("child arc")?;
    fields.finish()?;
    Ok(Interdependency { parent, child })
}

const fn check_count(what: &'static str, declared: usize, found: usize) -> Result<(), ParseError> {
    if declared == found {
        Ok(())
    } else {
        Err(ParseError::CountMismatch {
            what,
            declared,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn parse(text: &str) -> Result<ParsedProblem, ParseError> {
        read_problem(text.as_bytes())
    }

    #[test]
    fn reads_a_min_cost_problem() {
        let problem = parse(
            "c header\nc\np min 4 3 1 n\nn 1 30\nn 4 -30\n\na 1 2 0 30 5\na 2 4 0 30 7\na 3 0 0 10 -100\ni 3 1\n",
        )
        .expect("problem parses");
        assert_eq!(
            problem.kind,
            ProblemKind::MinCost {
                parent_mode: ParentMode::Node
            }
        );
        assert_eq!(problem.nodes, 4);
        assert_eq!(problem.node_lines.len(), 2);
        assert_eq!(
            problem.arcs.get(2),
            Some(&ParsedArc {
                tail: 3,
                head: 0,
                capacity: 10,
                cost: Some(-100),
            })
        );
        assert_eq!(
            problem.interdependencies,
            vec![Interdependency { parent: 3, child: 1 }]
        );
        assert_eq!(problem.total_supply(), 30);
        assert_eq!(problem.total_demand(), 30);
        assert_eq!(problem.delivered_demand(), 10);
    }

    #[test]
    fn reads_a_max_flow_problem() {
        let problem = parse("p max 3 2\nn 1 s\nn 3 t\na 1 2 40\na 2 3 40\n").expect("problem parses");
        assert_eq!(problem.kind, ProblemKind::MaxFlow);
        assert_eq!(
            problem.node_lines,
            vec![
                ParsedNode {
                    id: 1,
                    designation: NodeDesignation::Source
                },
                ParsedNode {
                    id: 3,
                    designation: NodeDesignation::Sink
                },
            ]
        );
        assert!(problem.arcs.iter().all(|arc| arc.cost.is_none()));
        assert_eq!(problem.total_supply(), 0);
        assert_eq!(problem.delivered_demand(), 0);
    }

    #[rstest]
    #[case("", ParseErrorCode::MissingProblemLine, None)]
    #[case("p min 2 0 0 a\np min 2 0 0 a\n", ParseErrorCode::DuplicateProblemLine, Some(2))]
    #[case("n 1 5\np min 2 0 0 a\n", ParseErrorCode::BeforeProblemLine, Some(1))]
    #[case("p min 2 0 0 a\nx 1\n", ParseErrorCode::UnknownLineType, Some(2))]
    #[case("p min 2 0 0\n", ParseErrorCode::MissingField, Some(1))]
    #[case("p min 2 1 0 a\na 1 two 0 4 4\n", ParseErrorCode::InvalidNumber, Some(2))]
    #[case("p min 2 0 0 z\n", ParseErrorCode::UnexpectedToken, Some(1))]
    #[case("p sum 2 0\n", ParseErrorCode::UnexpectedToken, Some(1))]
    #[case("p max 2 0\nn 1 x\n", ParseErrorCode::UnexpectedToken, Some(2))]
    #[case("p min 2 0 0 a\nn 1 5 6\n", ParseErrorCode::TrailingField, Some(2))]
    #[case("p min 2 1 0 a\na 1 2 3 4 5\n", ParseErrorCode::NonZeroLowerBound, Some(2))]
    #[case("p min 2 0 0 a\nn 3 5\n", ParseErrorCode::NodeOutOfRange, Some(2))]
    #[case("p min 2 2 0 a\na 1 2 0 4 4\n", ParseErrorCode::CountMismatch, None)]
    #[case("p min 2 1 1 a\na 1 2 0 4 4\n", ParseErrorCode::CountMismatch, None)]
    fn rejects_malformed_input(
        #[case] text: &str,
        #[case] code: ParseErrorCode,
        #[case] line: Option<usize>,
    ) {
        let err = parse(text).expect_err("input is malformed");
        assert_eq!(err.code(), code);
        assert_eq!(err.line(), line);
    }

    #[test]
    fn error_messages_name_the_line() {
        let err = parse("p min 2 1 0 a\na 1 2 7 4 4\n").expect_err("lower bound is not zero");
        assert_eq!(err.to_string(), "line 2: arc lower bound must be 0 (got 7)");
        assert_eq!(err.code().as_str(), "NETGEN_PARSE_LOWER_BOUND");
    }
}
