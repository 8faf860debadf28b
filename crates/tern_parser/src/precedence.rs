//! Binary operator precedence.

use tern_ast::SyntaxKind;

/// Operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Entry level of the binary loop: every operator binds tighter.
    Lowest = 0,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    Exponentiation = 16,
    /// Not a binary operator.
    Invalid = 255,
}

impl OperatorPrecedence {
    /// Whether an operator at this level continues a binary chain whose
    /// operands are being parsed at `current`. `**` is right-associative,
    /// so it also binds at its own level; everything else needs a strictly
    /// higher one.
    pub fn binds_tighter_than(self, current: OperatorPrecedence, operator: SyntaxKind) -> bool {
        if self == OperatorPrecedence::Invalid {
            return false;
        }
        if operator == SyntaxKind::AsteriskAsteriskToken {
            self >= current
        } else {
            self > current
        }
    }
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::SatisfiesKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        use OperatorPrecedence::*;
        let ladder = [
            NullishCoalescing,
            LogicalOr,
            LogicalAnd,
            BitwiseOr,
            BitwiseXor,
            BitwiseAnd,
            Equality,
            Relational,
            Shift,
            Additive,
            Multiplicative,
            Exponentiation,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_associativity() {
        let add = get_binary_operator_precedence(SyntaxKind::MinusToken);
        assert!(!add.binds_tighter_than(add, SyntaxKind::MinusToken));
        let exp = get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken);
        assert!(exp.binds_tighter_than(exp, SyntaxKind::AsteriskAsteriskToken));
    }

    #[test]
    fn test_non_operators_are_invalid() {
        assert_eq!(get_binary_operator_precedence(SyntaxKind::CommaToken), OperatorPrecedence::Invalid);
        assert_eq!(get_binary_operator_precedence(SyntaxKind::EqualsToken), OperatorPrecedence::Invalid);
        assert!(!OperatorPrecedence::Invalid.binds_tighter_than(OperatorPrecedence::Lowest, SyntaxKind::CommaToken));
    }
}
