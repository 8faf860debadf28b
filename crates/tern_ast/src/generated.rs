//! Typed views over arena nodes.
//!
//! Each view wraps a `NodeId` of one kind and names its slots. The slot
//! numbers here are the layout the parser builds; keep both in sync.

use crate::node::{ListId, Node, NodeArena, NodeId, NodeList};
use crate::syntax_kind::SyntaxKind;

macro_rules! node_views {
    (@accessor $field:ident node $idx:literal) => {
        #[inline]
        pub fn $field(&self) -> Option<NodeId> {
            self.node().child_node($idx)
        }
    };
    (@accessor $field:ident list $idx:literal) => {
        #[inline]
        pub fn $field(&self) -> Option<&'a NodeList> {
            self.node().child_list($idx).map(|list: ListId| self.arena.list(list))
        }
    };
    ($($view:ident { $($field:ident : $shape:ident $idx:literal),* $(,)? })*) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $view<'a> {
                arena: &'a NodeArena,
                id: NodeId,
            }

            impl<'a> $view<'a> {
                pub const KIND: SyntaxKind = SyntaxKind::$view;

                pub fn cast(arena: &'a NodeArena, id: NodeId) -> Option<Self> {
                    (arena.kind(id) == SyntaxKind::$view).then_some(Self { arena, id })
                }

                #[inline]
                pub fn id(&self) -> NodeId {
                    self.id
                }

                #[inline]
                pub fn node(&self) -> &'a Node {
                    self.arena.node(self.id)
                }

                $( node_views!(@accessor $field $shape $idx); )*
            }
        )*
    };
}

node_views! {
    SourceFile { statements: list 0, end_of_file_token: node 1 }

    // Names
    QualifiedName { left: node 0, right: node 1 }
    ComputedPropertyName { expression: node 0 }

    // Signature elements
    TypeParameter { modifiers: list 0, name: node 1, constraint: node 2, default_type: node 3 }
    Parameter {
        modifiers: list 0,
        dot_dot_dot_token: node 1,
        name: node 2,
        question_token: node 3,
        type_annotation: node 4,
        initializer: node 5,
    }
    Decorator { expression: node 0 }

    // Members
    PropertySignature { modifiers: list 0, name: node 1, question_token: node 2, type_annotation: node 3 }
    PropertyDeclaration {
        modifiers: list 0,
        name: node 1,
        question_or_exclamation_token: node 2,
        type_annotation: node 3,
        initializer: node 4,
    }
    MethodSignature {
        modifiers: list 0,
        name: node 1,
        question_token: node 2,
        type_parameters: list 3,
        parameters: list 4,
        type_annotation: node 5,
    }
    MethodDeclaration {
        modifiers: list 0,
        asterisk_token: node 1,
        name: node 2,
        question_token: node 3,
        type_parameters: list 4,
        parameters: list 5,
        type_annotation: node 6,
        body: node 7,
    }
    ClassStaticBlockDeclaration { body: node 0 }
    Constructor { modifiers: list 0, type_parameters: list 1, parameters: list 2, type_annotation: node 3, body: node 4 }
    GetAccessor {
        modifiers: list 0,
        name: node 1,
        type_parameters: list 2,
        parameters: list 3,
        type_annotation: node 4,
        body: node 5,
    }
    SetAccessor {
        modifiers: list 0,
        name: node 1,
        type_parameters: list 2,
        parameters: list 3,
        type_annotation: node 4,
        body: node 5,
    }
    CallSignature { type_parameters: list 0, parameters: list 1, type_annotation: node 2 }
    ConstructSignature { type_parameters: list 0, parameters: list 1, type_annotation: node 2 }
    IndexSignature { modifiers: list 0, parameters: list 1, type_annotation: node 2 }

    // Types
    TypePredicate { asserts_modifier: node 0, parameter_name: node 1, type_annotation: node 2 }
    TypeReference { type_name: node 0, type_arguments: list 1 }
    FunctionType { type_parameters: list 0, parameters: list 1, type_annotation: node 2 }
    ConstructorType { modifiers: list 0, type_parameters: list 1, parameters: list 2, type_annotation: node 3 }
    TypeQuery { expr_name: node 0, type_arguments: list 1 }
    TypeLiteral { members: list 0 }
    ArrayType { element_type: node 0 }
    TupleType { elements: list 0 }
    OptionalType { type_node: node 0 }
    RestType { type_node: node 0 }
    UnionType { types: list 0 }
    IntersectionType { types: list 0 }
    ConditionalType { check_type: node 0, extends_type: node 1, true_type: node 2, false_type: node 3 }
    InferType { type_parameter: node 0 }
    ParenthesizedType { type_node: node 0 }
    TypeOperator { operator: node 0, type_node: node 1 }
    IndexedAccessType { object_type: node 0, index_type: node 1 }
    MappedType {
        readonly_token: node 0,
        type_parameter: node 1,
        name_type: node 2,
        question_token: node 3,
        type_node: node 4,
    }
    LiteralType { literal: node 0 }
    NamedTupleMember { dot_dot_dot_token: node 0, name: node 1, question_token: node 2, type_node: node 3 }
    TemplateLiteralType { head: node 0, template_spans: list 1 }
    TemplateLiteralTypeSpan { type_node: node 0, literal: node 1 }
    ImportType {
        typeof_keyword: node 0,
        argument: node 1,
        attributes: node 2,
        qualifier: node 3,
        type_arguments: list 4,
    }

    // Binding patterns
    ObjectBindingPattern { elements: list 0 }
    ArrayBindingPattern { elements: list 0 }
    BindingElement { dot_dot_dot_token: node 0, property_name: node 1, name: node 2, initializer: node 3 }

    // Expressions
    ArrayLiteralExpression { elements: list 0 }
    ObjectLiteralExpression { properties: list 0 }
    PropertyAccessExpression { expression: node 0, question_dot_token: node 1, name: node 2 }
    ElementAccessExpression { expression: node 0, question_dot_token: node 1, argument_expression: node 2 }
    CallExpression { expression: node 0, question_dot_token: node 1, type_arguments: list 2, arguments: list 3 }
    NewExpression { expression: node 0, type_arguments: list 1, arguments: list 2 }
    TaggedTemplateExpression { tag: node 0, type_arguments: list 1, template: node 2 }
    TypeAssertionExpression { type_node: node 0, expression: node 1 }
    ParenthesizedExpression { expression: node 0 }
    FunctionExpression {
        modifiers: list 0,
        asterisk_token: node 1,
        name: node 2,
        type_parameters: list 3,
        parameters: list 4,
        type_annotation: node 5,
        body: node 6,
    }
    ArrowFunction {
        modifiers: list 0,
        type_parameters: list 1,
        parameters: list 2,
        type_annotation: node 3,
        equals_greater_than_token: node 4,
        body: node 5,
    }
    DeleteExpression { expression: node 0 }
    TypeOfExpression { expression: node 0 }
    VoidExpression { expression: node 0 }
    AwaitExpression { expression: node 0 }
    PrefixUnaryExpression { operator: node 0, operand: node 1 }
    PostfixUnaryExpression { operand: node 0, operator: node 1 }
    BinaryExpression { left: node 0, operator_token: node 1, right: node 2 }
    ConditionalExpression {
        condition: node 0,
        question_token: node 1,
        when_true: node 2,
        colon_token: node 3,
        when_false: node 4,
    }
    TemplateExpression { head: node 0, template_spans: list 1 }
    YieldExpression { asterisk_token: node 0, expression: node 1 }
    SpreadElement { expression: node 0 }
    ClassExpression {
        modifiers: list 0,
        name: node 1,
        type_parameters: list 2,
        heritage_clauses: list 3,
        members: list 4,
    }
    ExpressionWithTypeArguments { expression: node 0, type_arguments: list 1 }
    AsExpression { expression: node 0, type_node: node 1 }
    NonNullExpression { expression: node 0 }
    MetaProperty { keyword_token: node 0, name: node 1 }
    SatisfiesExpression { expression: node 0, type_node: node 1 }
    TemplateSpan { expression: node 0, literal: node 1 }

    // Statements
    Block { statements: list 0 }
    VariableStatement { modifiers: list 0, declaration_list: node 1 }
    ExpressionStatement { expression: node 0 }
    IfStatement { expression: node 0, then_statement: node 1, else_statement: node 2 }
    DoStatement { statement: node 0, expression: node 1 }
    WhileStatement { expression: node 0, statement: node 1 }
    ForStatement { initializer: node 0, condition: node 1, incrementor: node 2, statement: node 3 }
    ForInStatement { initializer: node 0, expression: node 1, statement: node 2 }
    ForOfStatement { await_modifier: node 0, initializer: node 1, expression: node 2, statement: node 3 }
    ContinueStatement { label: node 0 }
    BreakStatement { label: node 0 }
    ReturnStatement { expression: node 0 }
    WithStatement { expression: node 0, statement: node 1 }
    SwitchStatement { expression: node 0, case_block: node 1 }
    LabeledStatement { label: node 0, statement: node 1 }
    ThrowStatement { expression: node 0 }
    TryStatement { try_block: node 0, catch_clause: node 1, finally_block: node 2 }
    VariableDeclaration { name: node 0, exclamation_token: node 1, type_annotation: node 2, initializer: node 3 }
    VariableDeclarationList { declarations: list 0 }
    FunctionDeclaration {
        modifiers: list 0,
        asterisk_token: node 1,
        name: node 2,
        type_parameters: list 3,
        parameters: list 4,
        type_annotation: node 5,
        body: node 6,
    }
    ClassDeclaration {
        modifiers: list 0,
        name: node 1,
        type_parameters: list 2,
        heritage_clauses: list 3,
        members: list 4,
    }
    InterfaceDeclaration {
        modifiers: list 0,
        name: node 1,
        type_parameters: list 2,
        heritage_clauses: list 3,
        members: list 4,
    }
    TypeAliasDeclaration { modifiers: list 0, name: node 1, type_parameters: list 2, type_node: node 3 }
    EnumDeclaration { modifiers: list 0, name: node 1, members: list 2 }
    ModuleDeclaration { modifiers: list 0, name: node 1, body: node 2 }
    ModuleBlock { statements: list 0 }
    CaseBlock { clauses: list 0 }
    NamespaceExportDeclaration { modifiers: list 0, name: node 1 }
    ImportEqualsDeclaration { modifiers: list 0, type_keyword: node 1, name: node 2, module_reference: node 3 }
    ImportDeclaration { modifiers: list 0, import_clause: node 1, module_specifier: node 2, attributes: node 3 }
    ImportClause { type_keyword: node 0, name: node 1, named_bindings: node 2 }
    NamespaceImport { name: node 0 }
    NamedImports { elements: list 0 }
    ImportSpecifier { type_keyword: node 0, property_name: node 1, name: node 2 }
    ExportAssignment { modifiers: list 0, equals_token: node 1, expression: node 2 }
    ExportDeclaration {
        modifiers: list 0,
        type_keyword: node 1,
        export_clause: node 2,
        module_specifier: node 3,
        attributes: node 4,
    }
    NamedExports { elements: list 0 }
    NamespaceExport { name: node 0 }
    ExportSpecifier { type_keyword: node 0, property_name: node 1, name: node 2 }
    MissingDeclaration { modifiers: list 0 }
    ExternalModuleReference { expression: node 0 }

    // JSX
    JsxElement { opening_element: node 0, children: list 1, closing_element: node 2 }
    JsxSelfClosingElement { tag_name: node 0, type_arguments: list 1, attributes: node 2 }
    JsxOpeningElement { tag_name: node 0, type_arguments: list 1, attributes: node 2 }
    JsxClosingElement { tag_name: node 0 }
    JsxFragment { opening_fragment: node 0, children: list 1, closing_fragment: node 2 }
    JsxAttribute { name: node 0, initializer: node 1 }
    JsxAttributes { properties: list 0 }
    JsxSpreadAttribute { expression: node 0 }
    JsxExpression { dot_dot_dot_token: node 0, expression: node 1 }
    JsxNamespacedName { namespace: node 0, name: node 1 }

    // Clauses
    CaseClause { expression: node 0, statements: list 1 }
    DefaultClause { statements: list 0 }
    HeritageClause { token: node 0, types: list 1 }
    CatchClause { variable_declaration: node 0, block: node 1 }
    ImportAttributes { token: node 0, elements: list 1 }
    ImportAttribute { name: node 0, value: node 1 }

    // Object literal members
    PropertyAssignment { modifiers: list 0, name: node 1, question_token: node 2, initializer: node 3 }
    ShorthandPropertyAssignment {
        modifiers: list 0,
        name: node 1,
        question_token: node 2,
        equals_token: node 3,
        object_assignment_initializer: node 4,
    }
    SpreadAssignment { expression: node 0 }
    EnumMember { name: node 0, initializer: node 1 }

    // Documentation comments
    JSDocTypeExpression { type_node: node 0 }
    JSDocNullableType { type_node: node 0 }
    JSDocNonNullableType { type_node: node 0 }
    JSDocOptionalType { type_node: node 0 }
    JSDocVariadicType { type_node: node 0 }
    JSDoc { comment: list 0, tags: list 1 }
    JSDocTag { tag_name: node 0, comment: node 1 }
    JSDocDeprecatedTag { tag_name: node 0, comment: node 1 }
    JSDocParameterTag { tag_name: node 0, type_expression: node 1, name: node 2, comment: node 3 }
    JSDocReturnTag { tag_name: node 0, type_expression: node 1, comment: node 2 }
    JSDocTypeTag { tag_name: node 0, type_expression: node 1, comment: node 2 }
    JSDocTemplateTag { tag_name: node 0, constraint: node 1, type_parameters: list 2, comment: node 3 }
    JSDocSeeTag { tag_name: node 0, name: node 1, comment: node 2 }
}

impl<'a> Parameter<'a> {
    pub fn is_rest(&self) -> bool {
        self.dot_dot_dot_token().is_some()
    }
}
