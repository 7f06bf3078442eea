//! Typed AST nodes for declarations: the compilation unit, package and
//! imports, type declarations, their members, and the shared pieces
//! (modifiers, annotations, types, parameters, declarators).

use crate::ast::expr::{ArgList, Expr};
use crate::ast::stmt::Block;
use crate::ast::{ast_node, child_node, child_nodes, child_token, AstNode};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

// ── SourceFile ───────────────────────────────────────────────────────────

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn package(&self) -> Option<PackageDecl> {
        child_node(&self.syntax)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + '_ {
        child_nodes(&self.syntax)
    }

    /// Top-level type declarations.
    pub fn types(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.syntax.children().filter_map(TypeDecl::cast)
    }
}

// ── Package / Import ─────────────────────────────────────────────────────

ast_node!(PackageDecl, PACKAGE_DECL);

impl PackageDecl {
    /// The dotted package name.
    pub fn name(&self) -> String {
        child_node::<QualifiedName>(&self.syntax)
            .map(|n| n.text())
            .unwrap_or_default()
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    /// The imported name without the trailing `.*`.
    pub fn name(&self) -> String {
        child_node::<QualifiedName>(&self.syntax)
            .map(|n| n.text())
            .unwrap_or_default()
    }

    pub fn is_static(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::STATIC_KW).is_some()
    }

    pub fn is_wildcard(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::STAR).is_some()
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    pub fn text(&self) -> String {
        crate::ast::raw_text(&self.syntax)
    }
}

// ── Modifiers ────────────────────────────────────────────────────────────

ast_node!(Modifiers, MODIFIERS);

impl Modifiers {
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn has(&self, kind: SyntaxKind) -> bool {
        child_token(&self.syntax, kind).is_some()
    }
}

ast_node!(Annotation, ANNOTATION);

impl Annotation {
    /// The simple name: `RestController` for `@org.x.RestController`.
    pub fn name(&self) -> String {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .last()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> String {
        child_token(&self.syntax, SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

/// Text of the NAME child of `node`, or an empty string.
fn name_of(node: &SyntaxNode) -> String {
    child_node::<Name>(node).map(|n| n.text()).unwrap_or_default()
}

// ── Type declarations ────────────────────────────────────────────────────

/// Which kind of type a [`TypeDecl`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
}

ast_node!(TypeDecl, CLASS_DECL | INTERFACE_DECL | ENUM_DECL | RECORD_DECL);

impl TypeDecl {
    pub fn kind(&self) -> TypeDeclKind {
        match self.syntax.kind() {
            SyntaxKind::INTERFACE_DECL => TypeDeclKind::Interface,
            SyntaxKind::ENUM_DECL => TypeDeclKind::Enum,
            SyntaxKind::RECORD_DECL => TypeDeclKind::Record,
            _ => TypeDeclKind::Class,
        }
    }

    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }

    pub fn modifiers(&self) -> Option<Modifiers> {
        child_node(&self.syntax)
    }

    /// Types after `extends` (one for classes, any number for interfaces).
    pub fn extended_types(&self) -> Vec<TypeRef> {
        child_node::<ExtendsClause>(&self.syntax)
            .map(|c| child_nodes(&c.syntax).collect())
            .unwrap_or_default()
    }

    pub fn implemented_types(&self) -> Vec<TypeRef> {
        child_node::<ImplementsClause>(&self.syntax)
            .map(|c| child_nodes(&c.syntax).collect())
            .unwrap_or_default()
    }

    /// Record components.
    pub fn record_params(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<ClassBody> {
        child_node(&self.syntax)
    }
}

ast_node!(ExtendsClause, EXTENDS_CLAUSE);
ast_node!(ImplementsClause, IMPLEMENTS_CLAUSE);

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.syntax.children().filter_map(Member::cast)
    }
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(InitializerBlock),
    Type(TypeDecl),
    EnumConstant(EnumConstant),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let member = match node.kind() {
            SyntaxKind::FIELD_DECL => Member::Field(FieldDecl { syntax: node }),
            SyntaxKind::METHOD_DECL => Member::Method(MethodDecl { syntax: node }),
            SyntaxKind::CONSTRUCTOR_DECL => Member::Constructor(ConstructorDecl { syntax: node }),
            SyntaxKind::INITIALIZER_BLOCK => {
                Member::Initializer(InitializerBlock { syntax: node })
            }
            SyntaxKind::ENUM_CONSTANT => Member::EnumConstant(EnumConstant { syntax: node }),
            _ => Member::Type(TypeDecl::cast(node)?),
        };
        Some(member)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Member::Field(n) => &n.syntax,
            Member::Method(n) => &n.syntax,
            Member::Constructor(n) => &n.syntax,
            Member::Initializer(n) => &n.syntax,
            Member::Type(n) => &n.syntax,
            Member::EnumConstant(n) => &n.syntax,
        }
    }
}

ast_node!(EnumConstant, ENUM_CONSTANT);

impl EnumConstant {
    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        child_node(&self.syntax)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    /// `None` for abstract and interface methods.
    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }

    /// `None` for the compact form of a record constructor.
    pub fn param_list(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(InitializerBlock, INITIALIZER_BLOCK);

impl InitializerBlock {
    pub fn is_static(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::STATIC_KW).is_some()
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

// ── Parameters ───────────────────────────────────────────────────────────

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn modifiers(&self) -> Option<Modifiers> {
        child_node(&self.syntax)
    }

    /// `None` for an untyped lambda parameter.
    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }
}

// ── Types ────────────────────────────────────────────────────────────────

ast_node!(TypeRef, TYPE);

impl TypeRef {
    /// The last identifier of the type name: `Map` for
    /// `java.util.Map<K, V>[]`.
    pub fn simple_name(&self) -> String {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::IDENT | SyntaxKind::VOID_KW))
            .last()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// Number of `[]` pairs.
    pub fn array_dims(&self) -> usize {
        self.syntax
            .children_with_tokens()
            .filter(|it| it.kind() == SyntaxKind::L_BRACKET)
            .count()
    }

    pub fn is_array(&self) -> bool {
        self.array_dims() > 0
    }

    pub fn type_args(&self) -> Option<TypeArgs> {
        child_node(&self.syntax)
    }

    /// The type as written, layout normalized.
    pub fn text(&self) -> String {
        crate::ast::raw_text(&self.syntax)
    }
}

ast_node!(TypeArgs, TYPE_ARGS);

// ── Variables ────────────────────────────────────────────────────────────

ast_node!(VarDeclarator, VAR_DECLARATOR);

impl VarDeclarator {
    pub fn name(&self) -> String {
        name_of(&self.syntax)
    }

    /// Extra `[]` after the name: `int a[]`.
    pub fn extra_dims(&self) -> usize {
        self.syntax
            .children_with_tokens()
            .filter(|it| it.kind() == SyntaxKind::L_BRACKET)
            .count()
    }

    /// Initializer expression, unless it is a bare array initializer.
    pub fn init(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// `int[] a = {1, 2}` style initializer.
    pub fn array_init(&self) -> Option<ArrayInit> {
        child_node(&self.syntax)
    }

    pub fn has_initializer(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::EQ).is_some()
    }
}

ast_node!(ArrayInit, ARRAY_INIT);

/// One element of an array initializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayElement {
    Expr(Expr),
    Nested(ArrayInit),
}

impl ArrayInit {
    pub fn elements(&self) -> impl Iterator<Item = ArrayElement> + '_ {
        self.syntax.children().filter_map(|node| {
            if let Some(nested) = ArrayInit::cast(node.clone()) {
                Some(ArrayElement::Nested(nested))
            } else {
                Expr::cast(node).map(ArrayElement::Expr)
            }
        })
    }
}
