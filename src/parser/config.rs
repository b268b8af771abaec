//! Parser configuration
//!
//! Two grammar decisions are switchable. The defaults reproduce the language
//! as it has always parsed:
//!
//! - [`Precedence::TermComparisons`]: comparison operators share the `*` `/`
//!   tier, so `a + b < c` groups as `a + (b < c)`.
//! - [`ArrayPolicy::Reject`]: an array literal mixing token kinds is a parse
//!   error.

use super::lexer::TokenKind;

/// Binary operator precedence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// `expr := term (+ - && ||)`, `term := factor (* / < > <= >= == !=)`
    #[default]
    TermComparisons,
    /// `||` < `&&` < comparisons < `+ -` < `* /`
    Standard,
}

const TERM_COMPARISON_TIERS: &[&[TokenKind]] = &[
    &[
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::AndAnd,
        TokenKind::OrOr,
    ],
    &[
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::Le,
        TokenKind::Ge,
        TokenKind::EqEq,
        TokenKind::NotEq,
    ],
];

const STANDARD_TIERS: &[&[TokenKind]] = &[
    &[TokenKind::OrOr],
    &[TokenKind::AndAnd],
    &[
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::Le,
        TokenKind::Ge,
        TokenKind::EqEq,
        TokenKind::NotEq,
    ],
    &[TokenKind::Plus, TokenKind::Minus],
    &[TokenKind::Star, TokenKind::Slash],
];

impl Precedence {
    /// Operator tiers from loosest to tightest binding
    pub fn tiers(self) -> &'static [&'static [TokenKind]] {
        match self {
            Precedence::TermComparisons => TERM_COMPARISON_TIERS,
            Precedence::Standard => STANDARD_TIERS,
        }
    }
}

/// What to do with an array literal whose elements differ in kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayPolicy {
    #[default]
    Reject,
    /// Record a warning and keep an empty array literal
    WarnAndClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    pub precedence: Precedence,
    pub arrays: ArrayPolicy,
}

impl ParserConfig {
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_array_policy(mut self, arrays: ArrayPolicy) -> Self {
        self.arrays = arrays;
        self
    }
}
