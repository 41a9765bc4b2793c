//! Clause operators.

use std::cmp::Ordering;
use std::fmt;

/// How a clause compares a field against its value.
///
/// `StartsWith`, `EndsWith`, `Contains` and `Regex` only apply to text.
/// The rest compare through an [`Ordering`], so they work on any value type
/// with a defined order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    StartsWith,
    EndsWith,
    /// Substring match, evaluated with the prefix-table matcher.
    Contains,
    Regex,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    pub const ALL: [Op; 10] = [
        Op::Eq,
        Op::Ne,
        Op::StartsWith,
        Op::EndsWith,
        Op::Contains,
        Op::Regex,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
    ];

    /// Expression syntax for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::StartsWith => "^=",
            Op::EndsWith => "$=",
            Op::Contains => "~",
            Op::Regex => "=~",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }

    /// `>`, `>=`, `<` and `<=`.
    pub fn is_comparison(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Whether a field ordered `ordering` against the clause value satisfies
    /// this operator. Text-only operators never do.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering.is_eq(),
            Op::Ne => ordering.is_ne(),
            Op::Gt => ordering.is_gt(),
            Op::Gte => ordering.is_ge(),
            Op::Lt => ordering.is_lt(),
            Op::Lte => ordering.is_le(),
            Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex => false,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
