use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::lexer::tokens::TokenKind;

/// Binary precedence levels, loosest first.
///
/// Every level folds to the left. Prefix operators bind tighter than all of
/// these and are parsed separately.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl BindingPower {
    /// The operators folded at this level.
    pub fn operators(&self) -> &'static [TokenKind] {
        match self {
            BindingPower::LogicalOr => &[TokenKind::Or],
            BindingPower::LogicalAnd => &[TokenKind::And],
            BindingPower::Equality => &[TokenKind::Equals, TokenKind::NotEquals],
            BindingPower::Relational => &[
                TokenKind::Less,
                TokenKind::LessEquals,
                TokenKind::Greater,
                TokenKind::GreaterEquals,
            ],
            BindingPower::Additive => &[TokenKind::Plus, TokenKind::Dash],
            BindingPower::Multiplicative => &[TokenKind::Star, TokenKind::Slash],
        }
    }

    /// The next tighter level, or `None` when operands are prefix expressions.
    pub fn tighter(&self) -> Option<BindingPower> {
        match self {
            BindingPower::LogicalOr => Some(BindingPower::LogicalAnd),
            BindingPower::LogicalAnd => Some(BindingPower::Equality),
            BindingPower::Equality => Some(BindingPower::Relational),
            BindingPower::Relational => Some(BindingPower::Additive),
            BindingPower::Additive => Some(BindingPower::Multiplicative),
            BindingPower::Multiplicative => None,
        }
    }
}

pub const PREFIX_OPERATORS: &[TokenKind] = &[TokenKind::Not, TokenKind::Dash];

lazy_static! {
    /// Binary operator to the level it is folded at.
    pub static ref BP_LOOKUP: HashMap<TokenKind, BindingPower> = {
        let mut lookup = HashMap::new();
        let mut level = Some(BindingPower::LogicalOr);

        while let Some(bp) = level {
            for kind in bp.operators() {
                lookup.insert(*kind, bp);
            }
            level = bp.tighter();
        }

        lookup
    };
}
