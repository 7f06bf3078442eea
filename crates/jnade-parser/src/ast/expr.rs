//! Typed AST nodes for expressions.

use crate::ast::item::{ArrayInit, ClassBody, Name, TypeRef};
use crate::ast::stmt::Switch;
use crate::ast::{ast_node, child_node, child_nodes, child_token, significant_child_tokens, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Expr enum ────────────────────────────────────────────────────────────

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    NameRef(NameRef),
    This(ThisExpr),
    Super(SuperExpr),
    Paren(ParenExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Assign(AssignExpr),
    Conditional(ConditionalExpr),
    Instanceof(InstanceofExpr),
    Cast(CastExpr),
    FieldAccess(FieldAccess),
    MethodCall(MethodCall),
    New(NewExpr),
    ArrayCreation(ArrayCreation),
    Index(IndexExpr),
    Lambda(LambdaExpr),
    MethodRef(MethodRef),
    ClassLiteral(ClassLiteral),
    Switch(Switch),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let expr = match node.kind() {
            SyntaxKind::LITERAL => Expr::Literal(Literal { syntax: node }),
            SyntaxKind::NAME_REF => Expr::NameRef(NameRef { syntax: node }),
            SyntaxKind::THIS_EXPR => Expr::This(ThisExpr { syntax: node }),
            SyntaxKind::SUPER_EXPR => Expr::Super(SuperExpr { syntax: node }),
            SyntaxKind::PAREN_EXPR => Expr::Paren(ParenExpr { syntax: node }),
            SyntaxKind::BINARY_EXPR => Expr::Binary(BinaryExpr { syntax: node }),
            SyntaxKind::PREFIX_EXPR => Expr::Prefix(PrefixExpr { syntax: node }),
            SyntaxKind::POSTFIX_EXPR => Expr::Postfix(PostfixExpr { syntax: node }),
            SyntaxKind::ASSIGN_EXPR => Expr::Assign(AssignExpr { syntax: node }),
            SyntaxKind::CONDITIONAL_EXPR => Expr::Conditional(ConditionalExpr { syntax: node }),
            SyntaxKind::INSTANCEOF_EXPR => Expr::Instanceof(InstanceofExpr { syntax: node }),
            SyntaxKind::CAST_EXPR => Expr::Cast(CastExpr { syntax: node }),
            SyntaxKind::FIELD_ACCESS => Expr::FieldAccess(FieldAccess { syntax: node }),
            SyntaxKind::METHOD_CALL => Expr::MethodCall(MethodCall { syntax: node }),
            SyntaxKind::NEW_EXPR => Expr::New(NewExpr { syntax: node }),
            SyntaxKind::ARRAY_CREATION => Expr::ArrayCreation(ArrayCreation { syntax: node }),
            SyntaxKind::INDEX_EXPR => Expr::Index(IndexExpr { syntax: node }),
            SyntaxKind::LAMBDA_EXPR => Expr::Lambda(LambdaExpr { syntax: node }),
            SyntaxKind::METHOD_REF => Expr::MethodRef(MethodRef { syntax: node }),
            SyntaxKind::CLASS_LITERAL => Expr::ClassLiteral(ClassLiteral { syntax: node }),
            SyntaxKind::SWITCH_EXPR => Expr::Switch(Switch::cast(node)?),
            _ => return None,
        };
        Some(expr)
    }

    /// Access the underlying syntax node regardless of variant.
    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(n) => &n.syntax,
            Expr::NameRef(n) => &n.syntax,
            Expr::This(n) => &n.syntax,
            Expr::Super(n) => &n.syntax,
            Expr::Paren(n) => &n.syntax,
            Expr::Binary(n) => &n.syntax,
            Expr::Prefix(n) => &n.syntax,
            Expr::Postfix(n) => &n.syntax,
            Expr::Assign(n) => &n.syntax,
            Expr::Conditional(n) => &n.syntax,
            Expr::Instanceof(n) => &n.syntax,
            Expr::Cast(n) => &n.syntax,
            Expr::FieldAccess(n) => &n.syntax,
            Expr::MethodCall(n) => &n.syntax,
            Expr::New(n) => &n.syntax,
            Expr::ArrayCreation(n) => &n.syntax,
            Expr::Index(n) => &n.syntax,
            Expr::Lambda(n) => &n.syntax,
            Expr::MethodRef(n) => &n.syntax,
            Expr::ClassLiteral(n) => &n.syntax,
            Expr::Switch(n) => n.syntax(),
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(self) -> Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = &expr {
            match paren.inner() {
                Some(inner) => expr = inner,
                None => break,
            }
        }
        expr
    }

    /// The enclosing expression, if this expression is an operand of one.
    pub fn parent_expr(&self) -> Option<Expr> {
        self.syntax().parent().and_then(Expr::cast)
    }
}

// ── Literal ──────────────────────────────────────────────────────────────

ast_node!(Literal, LITERAL);

/// What kind of literal a [`Literal`] node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    TextBlock,
    Char,
    True,
    False,
    Null,
}

impl Literal {
    /// The literal token.
    pub fn token(&self) -> Option<SyntaxToken> {
        significant_child_tokens(&self.syntax).next()
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::INT_LITERAL => LiteralKind::Int,
            SyntaxKind::FLOAT_LITERAL => LiteralKind::Float,
            SyntaxKind::STRING_LITERAL => LiteralKind::String,
            SyntaxKind::TEXT_BLOCK => LiteralKind::TextBlock,
            SyntaxKind::CHAR_LITERAL => LiteralKind::Char,
            SyntaxKind::TRUE_KW => LiteralKind::True,
            SyntaxKind::FALSE_KW => LiteralKind::False,
            SyntaxKind::NULL_KW => LiteralKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// The literal exactly as written, quotes and suffixes included.
    pub fn text(&self) -> String {
        self.token().map(|t| t.text().to_string()).unwrap_or_default()
    }

    /// For string and char literals, the text between the quotes (escape
    /// sequences untouched). For text blocks, the text between the `"""`
    /// delimiters.
    pub fn quoted_content(&self) -> Option<String> {
        let text = self.text();
        match self.kind()? {
            LiteralKind::TextBlock => text
                .strip_prefix("\"\"\"")
                .and_then(|t| t.strip_suffix("\"\"\""))
                .map(str::to_string),
            LiteralKind::String => text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .map(str::to_string),
            LiteralKind::Char => text
                .strip_prefix('\'')
                .and_then(|t| t.strip_suffix('\''))
                .map(str::to_string),
            _ => None,
        }
    }

    /// Whether this is a string, text block or char literal.
    pub fn is_textual(&self) -> bool {
        matches!(
            self.kind(),
            Some(LiteralKind::String | LiteralKind::TextBlock | LiteralKind::Char)
        )
    }
}

// ── Names ────────────────────────────────────────────────────────────────

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn text(&self) -> String {
        child_token(&self.syntax, SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

ast_node!(ThisExpr, THIS_EXPR);

impl ThisExpr {
    /// `Outer` in `Outer.this`.
    pub fn qualifier(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

ast_node!(SuperExpr, SUPER_EXPR);

// ── Operators ────────────────────────────────────────────────────────────

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

/// Binary operators, with `>>` and `>>>` recovered from their `>` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<BinaryOp> {
        let ops: Vec<SyntaxKind> = significant_child_tokens(&self.syntax)
            .map(|t| t.kind())
            .collect();
        let op = match ops.as_slice() {
            [SyntaxKind::PLUS] => BinaryOp::Add,
            [SyntaxKind::MINUS] => BinaryOp::Sub,
            [SyntaxKind::STAR] => BinaryOp::Mul,
            [SyntaxKind::SLASH] => BinaryOp::Div,
            [SyntaxKind::PERCENT] => BinaryOp::Rem,
            [SyntaxKind::EQ_EQ] => BinaryOp::Eq,
            [SyntaxKind::NOT_EQ] => BinaryOp::NotEq,
            [SyntaxKind::LT] => BinaryOp::Lt,
            [SyntaxKind::GT] => BinaryOp::Gt,
            [SyntaxKind::LT_EQ] => BinaryOp::LtEq,
            [SyntaxKind::GT_EQ] => BinaryOp::GtEq,
            [SyntaxKind::AMP_AMP] => BinaryOp::And,
            [SyntaxKind::PIPE_PIPE] => BinaryOp::Or,
            [SyntaxKind::AMP] => BinaryOp::BitAnd,
            [SyntaxKind::PIPE] => BinaryOp::BitOr,
            [SyntaxKind::CARET] => BinaryOp::BitXor,
            [SyntaxKind::SHL] => BinaryOp::Shl,
            [SyntaxKind::GT, SyntaxKind::GT] => BinaryOp::Shr,
            [SyntaxKind::GT, SyntaxKind::GT, SyntaxKind::GT] => BinaryOp::UShr,
            _ => return None,
        };
        Some(op)
    }
}

ast_node!(PrefixExpr, PREFIX_EXPR);

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxKind> {
        significant_child_tokens(&self.syntax).next().map(|t| t.kind())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

ast_node!(PostfixExpr, POSTFIX_EXPR);

impl PostfixExpr {
    pub fn op(&self) -> Option<SyntaxKind> {
        significant_child_tokens(&self.syntax).next().map(|t| t.kind())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

ast_node!(AssignExpr, ASSIGN_EXPR);

impl AssignExpr {
    pub fn target(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// The right-hand side, unless it is an array initializer.
    pub fn value(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    /// `a = {1, 2}` style right-hand side.
    pub fn array_init(&self) -> Option<ArrayInit> {
        child_node(&self.syntax)
    }

    /// The assignment operator token kind (`EQ`, `PLUS_EQ`, ...).
    pub fn op(&self) -> Option<SyntaxKind> {
        significant_child_tokens(&self.syntax)
            .map(|t| t.kind())
            .find(|k| k.is_assign_op())
    }

    /// The arithmetic operator of a compound assignment: `+` for `+=`.
    pub fn compound_op(&self) -> Option<&'static str> {
        match self.op()? {
            SyntaxKind::PLUS_EQ => Some("+"),
            SyntaxKind::MINUS_EQ => Some("-"),
            SyntaxKind::STAR_EQ => Some("*"),
            SyntaxKind::SLASH_EQ => Some("/"),
            SyntaxKind::PERCENT_EQ => Some("%"),
            SyntaxKind::AMP_EQ => Some("&"),
            SyntaxKind::PIPE_EQ => Some("|"),
            SyntaxKind::CARET_EQ => Some("^"),
            SyntaxKind::SHL_EQ => Some("<<"),
            SyntaxKind::SHR_EQ => Some(">>"),
            SyntaxKind::USHR_EQ => Some(">>>"),
            _ => None,
        }
    }
}

ast_node!(ConditionalExpr, CONDITIONAL_EXPR);

impl ConditionalExpr {
    pub fn condition(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn then_expr(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    pub fn else_expr(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(2)
    }
}

ast_node!(InstanceofExpr, INSTANCEOF_EXPR);

impl InstanceofExpr {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    /// The pattern variable in `o instanceof String s`.
    pub fn binding(&self) -> Option<Name> {
        child_node(&self.syntax)
    }
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

// ── Member access and calls ──────────────────────────────────────────────

ast_node!(FieldAccess, FIELD_ACCESS);

impl FieldAccess {
    pub fn receiver(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn name(&self) -> String {
        child_token(&self.syntax, SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

ast_node!(MethodCall, METHOD_CALL);

impl MethodCall {
    /// The receiver expression; `None` for an unqualified call.
    pub fn receiver(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn name(&self) -> String {
        child_token(&self.syntax, SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }

    pub fn args(&self) -> Vec<Expr> {
        self.arg_list().map(|a| a.args().collect()).unwrap_or_default()
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(NewExpr, NEW_EXPR);

impl NewExpr {
    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn args(&self) -> Vec<Expr> {
        child_node::<ArgList>(&self.syntax)
            .map(|a| a.args().collect())
            .unwrap_or_default()
    }

    /// Anonymous class body.
    pub fn class_body(&self) -> Option<ClassBody> {
        child_node(&self.syntax)
    }
}

ast_node!(ArrayCreation, ARRAY_CREATION);

impl ArrayCreation {
    /// The element type, without dimensions.
    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    /// Sized dimensions, outermost first.
    pub fn dims(&self) -> Vec<Expr> {
        child_nodes::<DimExpr>(&self.syntax)
            .filter_map(|d| d.expr())
            .collect()
    }

    pub fn init(&self) -> Option<ArrayInit> {
        child_node(&self.syntax)
    }
}

ast_node!(DimExpr, DIM_EXPR);

impl DimExpr {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

ast_node!(IndexExpr, INDEX_EXPR);

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn index(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }
}

// ── Functional forms ─────────────────────────────────────────────────────

ast_node!(LambdaExpr, LAMBDA_EXPR);

impl LambdaExpr {
    /// Block body, for `x -> { ... }`.
    pub fn block_body(&self) -> Option<crate::ast::stmt::Block> {
        child_node(&self.syntax)
    }

    /// Expression body, for `x -> x + 1`.
    pub fn expr_body(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

ast_node!(MethodRef, METHOD_REF);

ast_node!(ClassLiteral, CLASS_LITERAL);
