//! SyntaxKind: every token and node kind the scanner and parser produce.
//!
//! Variant order is significant. The range predicates below compare
//! discriminants, so tokens, keywords and nodes must stay grouped.

/// The kind of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Trivia
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    NewLineTrivia,
    WhitespaceTrivia,
    ShebangTrivia,
    ConflictMarkerTrivia,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    JsxText,
    JsxTextAllWhiteSpaces,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,

    // Template pieces
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    /// Free text inside a documentation comment.
    JSDocCommentTextToken,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    LessThanSlashToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    BacktickToken,
    HashToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AssertKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IntrinsicKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    OutKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    UsingKeyword,
    FromKeyword,
    GlobalKeyword,
    BigIntKeyword,
    OverrideKeyword,
    OfKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,
    Decorator,

    // Type and class members
    PropertySignature,
    PropertyDeclaration,
    MethodSignature,
    MethodDeclaration,
    ClassStaticBlockDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,
    NamedTupleMember,
    TemplateLiteralType,
    TemplateLiteralTypeSpan,
    ImportType,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    DeleteExpression,
    TypeOfExpression,
    VoidExpression,
    AwaitExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    YieldExpression,
    SpreadElement,
    ClassExpression,
    OmittedExpression,
    ExpressionWithTypeArguments,
    AsExpression,
    NonNullExpression,
    MetaProperty,
    SatisfiesExpression,

    // Misc elements
    TemplateSpan,
    SemicolonClassElement,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    CaseBlock,
    NamespaceExportDeclaration,
    ImportEqualsDeclaration,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportAssignment,
    ExportDeclaration,
    NamedExports,
    NamespaceExport,
    ExportSpecifier,
    MissingDeclaration,

    // Module references
    ExternalModuleReference,

    // JSX
    JsxElement,
    JsxSelfClosingElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxFragment,
    JsxOpeningFragment,
    JsxClosingFragment,
    JsxAttribute,
    JsxAttributes,
    JsxSpreadAttribute,
    JsxExpression,
    JsxNamespacedName,

    // Clauses
    CaseClause,
    DefaultClause,
    HeritageClause,
    CatchClause,

    // Import attributes
    ImportAttributes,
    ImportAttribute,

    // Property assignments
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    EnumMember,

    SourceFile,

    // Documentation comments
    JSDocTypeExpression,
    JSDocAllType,
    JSDocUnknownType,
    JSDocNullableType,
    JSDocNonNullableType,
    JSDocOptionalType,
    JSDocVariadicType,
    JSDoc,
    JSDocText,
    JSDocTag,
    JSDocDeprecatedTag,
    JSDocParameterTag,
    JSDocReturnTag,
    JSDocTypeTag,
    JSDocTemplateTag,
    JSDocSeeTag,
}

macro_rules! keyword_table {
    ($($kind:ident => $text:literal,)*) => {
        impl SyntaxKind {
            /// The source text of a keyword kind.
            pub fn keyword_text(self) -> Option<&'static str> {
                match self {
                    $(SyntaxKind::$kind => Some($text),)*
                    _ => None,
                }
            }

            /// Look up the keyword kind for an identifier's text.
            pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
                match text {
                    $($text => Some(SyntaxKind::$kind),)*
                    _ => None,
                }
            }
        }
    };
}

keyword_table! {
    BreakKeyword => "break",
    CaseKeyword => "case",
    CatchKeyword => "catch",
    ClassKeyword => "class",
    ConstKeyword => "const",
    ContinueKeyword => "continue",
    DebuggerKeyword => "debugger",
    DefaultKeyword => "default",
    DeleteKeyword => "delete",
    DoKeyword => "do",
    ElseKeyword => "else",
    EnumKeyword => "enum",
    ExportKeyword => "export",
    ExtendsKeyword => "extends",
    FalseKeyword => "false",
    FinallyKeyword => "finally",
    ForKeyword => "for",
    FunctionKeyword => "function",
    IfKeyword => "if",
    ImportKeyword => "import",
    InKeyword => "in",
    InstanceOfKeyword => "instanceof",
    NewKeyword => "new",
    NullKeyword => "null",
    ReturnKeyword => "return",
    SuperKeyword => "super",
    SwitchKeyword => "switch",
    ThisKeyword => "this",
    ThrowKeyword => "throw",
    TrueKeyword => "true",
    TryKeyword => "try",
    TypeOfKeyword => "typeof",
    VarKeyword => "var",
    VoidKeyword => "void",
    WhileKeyword => "while",
    WithKeyword => "with",
    ImplementsKeyword => "implements",
    InterfaceKeyword => "interface",
    LetKeyword => "let",
    PackageKeyword => "package",
    PrivateKeyword => "private",
    ProtectedKeyword => "protected",
    PublicKeyword => "public",
    StaticKeyword => "static",
    YieldKeyword => "yield",
    AbstractKeyword => "abstract",
    AccessorKeyword => "accessor",
    AsKeyword => "as",
    AssertsKeyword => "asserts",
    AssertKeyword => "assert",
    AnyKeyword => "any",
    AsyncKeyword => "async",
    AwaitKeyword => "await",
    BooleanKeyword => "boolean",
    ConstructorKeyword => "constructor",
    DeclareKeyword => "declare",
    GetKeyword => "get",
    InferKeyword => "infer",
    IntrinsicKeyword => "intrinsic",
    IsKeyword => "is",
    KeyOfKeyword => "keyof",
    ModuleKeyword => "module",
    NamespaceKeyword => "namespace",
    NeverKeyword => "never",
    OutKeyword => "out",
    ReadonlyKeyword => "readonly",
    RequireKeyword => "require",
    NumberKeyword => "number",
    ObjectKeyword => "object",
    SatisfiesKeyword => "satisfies",
    SetKeyword => "set",
    StringKeyword => "string",
    SymbolKeyword => "symbol",
    TypeKeyword => "type",
    UndefinedKeyword => "undefined",
    UniqueKeyword => "unique",
    UnknownKeyword => "unknown",
    UsingKeyword => "using",
    FromKeyword => "from",
    GlobalKeyword => "global",
    BigIntKeyword => "bigint",
    OverrideKeyword => "override",
    OfKeyword => "of",
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_COMPOUND_ASSIGNMENT: SyntaxKind = SyntaxKind::PlusEqualsToken;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const FIRST_TYPE_NODE: SyntaxKind = SyntaxKind::TypePredicate;
    pub const LAST_TYPE_NODE: SyntaxKind = SyntaxKind::ImportType;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::QualifiedName;
    pub const FIRST_JSDOC_NODE: SyntaxKind = SyntaxKind::JSDocTypeExpression;
    pub const LAST_JSDOC_NODE: SyntaxKind = SyntaxKind::JSDocSeeTag;

    #[inline]
    fn between(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        self >= first && self <= last
    }

    /// Whether this kind is a token rather than a node.
    #[inline]
    pub fn is_token(self) -> bool {
        self < Self::FIRST_NODE
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= Self::FIRST_NODE
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.between(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Keywords that can never be used as identifiers.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.between(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Identifiers, private names and every keyword.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self.between(SyntaxKind::Identifier, Self::LAST_KEYWORD)
    }

    /// Identifiers plus every keyword that is not reserved. Contextual
    /// restrictions (`yield`, `await`) are the parser's business.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.between(SyntaxKind::ImplementsKeyword, Self::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.between(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_keyword_or_punctuation(self) -> bool {
        self.is_keyword() || self.is_punctuation()
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.between(SyntaxKind::NumericLiteral, SyntaxKind::NoSubstitutionTemplateLiteral)
    }

    #[inline]
    pub fn is_template_literal_kind(self) -> bool {
        self.between(SyntaxKind::NoSubstitutionTemplateLiteral, SyntaxKind::TemplateTail)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        self.between(SyntaxKind::SingleLineCommentTrivia, SyntaxKind::ConflictMarkerTrivia)
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.between(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.between(Self::FIRST_COMPOUND_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::OutKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Modifiers that may turn a constructor parameter into a property.
    pub fn is_parameter_property_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        )
    }

    pub fn is_class_member_modifier(self) -> bool {
        self.is_parameter_property_modifier()
            || matches!(self, SyntaxKind::StaticKeyword | SyntaxKind::AccessorKeyword)
    }

    /// Keywords that name a primitive type when used in type position.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::IntrinsicKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    #[inline]
    pub fn is_type_node(self) -> bool {
        self.between(Self::FIRST_TYPE_NODE, Self::LAST_TYPE_NODE)
    }

    #[inline]
    pub fn is_jsdoc_node(self) -> bool {
        self.between(Self::FIRST_JSDOC_NODE, Self::LAST_JSDOC_NODE)
    }

    pub fn is_statement(self) -> bool {
        self.between(SyntaxKind::Block, SyntaxKind::DebuggerStatement)
            || matches!(
                self,
                SyntaxKind::FunctionDeclaration
                    | SyntaxKind::ClassDeclaration
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::TypeAliasDeclaration
                    | SyntaxKind::EnumDeclaration
                    | SyntaxKind::ModuleDeclaration
                    | SyntaxKind::ImportDeclaration
                    | SyntaxKind::ImportEqualsDeclaration
                    | SyntaxKind::ExportDeclaration
                    | SyntaxKind::ExportAssignment
                    | SyntaxKind::NamespaceExportDeclaration
                    | SyntaxKind::MissingDeclaration
            )
    }

    /// Expression kinds that may appear on the left of `=` or as the target
    /// of a member access without parentheses.
    pub fn is_left_hand_side_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::PropertyAccessExpression
                | SyntaxKind::ElementAccessExpression
                | SyntaxKind::NewExpression
                | SyntaxKind::CallExpression
                | SyntaxKind::JsxElement
                | SyntaxKind::JsxSelfClosingElement
                | SyntaxKind::JsxFragment
                | SyntaxKind::TaggedTemplateExpression
                | SyntaxKind::ArrayLiteralExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::ObjectLiteralExpression
                | SyntaxKind::ClassExpression
                | SyntaxKind::FunctionExpression
                | SyntaxKind::Identifier
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateExpression
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::NonNullExpression
                | SyntaxKind::ExpressionWithTypeArguments
                | SyntaxKind::MetaProperty
                | SyntaxKind::ImportKeyword
                | SyntaxKind::MissingDeclaration
        )
    }

    /// Source text of a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::LessThanSlashToken => "</",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::BacktickToken => "`",
            SyntaxKind::HashToken => "#",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Fixed source text of a keyword or punctuation token.
    pub fn token_text(self) -> Option<&'static str> {
        self.keyword_text().or_else(|| self.punctuation_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip_table() {
        for kind in [
            SyntaxKind::BreakKeyword,
            SyntaxKind::YieldKeyword,
            SyntaxKind::SatisfiesKeyword,
            SyntaxKind::OfKeyword,
        ] {
            let text = kind.keyword_text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
        }
        assert_eq!(SyntaxKind::from_keyword("foo"), None);
    }

    #[test]
    fn test_identifier_like() {
        assert!(SyntaxKind::Identifier.is_identifier_like());
        assert!(SyntaxKind::AsyncKeyword.is_identifier_like());
        assert!(SyntaxKind::LetKeyword.is_identifier_like());
        assert!(!SyntaxKind::ClassKeyword.is_identifier_like());
        assert!(!SyntaxKind::QualifiedName.is_identifier_like());
        assert!(SyntaxKind::PrivateIdentifier.is_identifier_or_keyword());
    }

    #[test]
    fn test_ranges() {
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsToken.is_compound_assignment());
        assert!(SyntaxKind::TemplateTail.is_template_literal_kind());
        assert!(!SyntaxKind::JSDocCommentTextToken.is_template_literal_kind());
        assert!(SyntaxKind::ImportType.is_type_node());
        assert!(SyntaxKind::OfKeyword.is_token());
        assert!(SyntaxKind::QualifiedName.is_node());
        assert_eq!(SyntaxKind::CloseParenToken.token_text(), Some(")"));
        assert_eq!(SyntaxKind::ClassKeyword.token_text(), Some("class"));
    }
}
