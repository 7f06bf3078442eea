//! Typed AST nodes for statements and blocks.

use crate::ast::expr::{ArgList, Expr};
use crate::ast::item::{Modifiers, Name, Param, TypeDecl, TypeRef, VarDeclarator};
use crate::ast::{ast_node, child_node, child_nodes, child_token, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Stmt enum ────────────────────────────────────────────────────────────

/// Any statement that can appear in a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(Block),
    LocalVar(LocalVarDecl),
    LocalType(TypeDecl),
    Expr(ExprStmt),
    If(IfStmt),
    For(ForStmt),
    Foreach(ForeachStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    Switch(Switch),
    Try(TryStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Throw(ThrowStmt),
    Yield(YieldStmt),
    Assert(AssertStmt),
    Empty(EmptyStmt),
    Labeled(LabeledStmt),
    Synchronized(SynchronizedStmt),
    ExplicitCtorCall(ExplicitCtorCall),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let stmt = match node.kind() {
            SyntaxKind::BLOCK => Stmt::Block(Block { syntax: node }),
            SyntaxKind::LOCAL_VAR_DECL => Stmt::LocalVar(LocalVarDecl { syntax: node }),
            SyntaxKind::EXPR_STMT => Stmt::Expr(ExprStmt { syntax: node }),
            SyntaxKind::IF_STMT => Stmt::If(IfStmt { syntax: node }),
            SyntaxKind::FOR_STMT => Stmt::For(ForStmt { syntax: node }),
            SyntaxKind::FOREACH_STMT => Stmt::Foreach(ForeachStmt { syntax: node }),
            SyntaxKind::WHILE_STMT => Stmt::While(WhileStmt { syntax: node }),
            SyntaxKind::DO_WHILE_STMT => Stmt::DoWhile(DoWhileStmt { syntax: node }),
            SyntaxKind::SWITCH_STMT => Stmt::Switch(Switch { syntax: node }),
            SyntaxKind::TRY_STMT => Stmt::Try(TryStmt { syntax: node }),
            SyntaxKind::RETURN_STMT => Stmt::Return(ReturnStmt { syntax: node }),
            SyntaxKind::BREAK_STMT => Stmt::Break(BreakStmt { syntax: node }),
            SyntaxKind::CONTINUE_STMT => Stmt::Continue(ContinueStmt { syntax: node }),
            SyntaxKind::THROW_STMT => Stmt::Throw(ThrowStmt { syntax: node }),
            SyntaxKind::YIELD_STMT => Stmt::Yield(YieldStmt { syntax: node }),
            SyntaxKind::ASSERT_STMT => Stmt::Assert(AssertStmt { syntax: node }),
            SyntaxKind::EMPTY_STMT => Stmt::Empty(EmptyStmt { syntax: node }),
            SyntaxKind::LABELED_STMT => Stmt::Labeled(LabeledStmt { syntax: node }),
            SyntaxKind::SYNCHRONIZED_STMT => {
                Stmt::Synchronized(SynchronizedStmt { syntax: node })
            }
            SyntaxKind::EXPLICIT_CTOR_CALL => {
                Stmt::ExplicitCtorCall(ExplicitCtorCall { syntax: node })
            }
            _ => Stmt::LocalType(TypeDecl::cast(node)?),
        };
        Some(stmt)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::Block(n) => &n.syntax,
            Stmt::LocalVar(n) => &n.syntax,
            Stmt::LocalType(n) => n.syntax(),
            Stmt::Expr(n) => &n.syntax,
            Stmt::If(n) => &n.syntax,
            Stmt::For(n) => &n.syntax,
            Stmt::Foreach(n) => &n.syntax,
            Stmt::While(n) => &n.syntax,
            Stmt::DoWhile(n) => &n.syntax,
            Stmt::Switch(n) => &n.syntax,
            Stmt::Try(n) => &n.syntax,
            Stmt::Return(n) => &n.syntax,
            Stmt::Break(n) => &n.syntax,
            Stmt::Continue(n) => &n.syntax,
            Stmt::Throw(n) => &n.syntax,
            Stmt::Yield(n) => &n.syntax,
            Stmt::Assert(n) => &n.syntax,
            Stmt::Empty(n) => &n.syntax,
            Stmt::Labeled(n) => &n.syntax,
            Stmt::Synchronized(n) => &n.syntax,
            Stmt::ExplicitCtorCall(n) => &n.syntax,
        }
    }
}

/// The first statement child of `node`.
fn child_stmt(node: &SyntaxNode) -> Option<Stmt> {
    node.children().find_map(Stmt::cast)
}

/// The first expression child of `node`.
fn child_expr(node: &SyntaxNode) -> Option<Expr> {
    node.children().find_map(Expr::cast)
}

// ── Block ────────────────────────────────────────────────────────────────

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }

    pub fn l_brace(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::L_BRACE)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::R_BRACE)
    }
}

// ── Declarations and expressions ─────────────────────────────────────────

ast_node!(LocalVarDecl, LOCAL_VAR_DECL);

impl LocalVarDecl {
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

ast_node!(ExprStmt, EXPR_STMT);

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

ast_node!(ExplicitCtorCall, EXPLICIT_CTOR_CALL);

impl ExplicitCtorCall {
    /// `super(...)` rather than `this(...)`.
    pub fn is_super(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::SUPER_KW).is_some()
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

// ── Conditionals ─────────────────────────────────────────────────────────

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn then_branch(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }

    pub fn else_branch(&self) -> Option<ElseBranch> {
        child_node(&self.syntax)
    }
}

ast_node!(ElseBranch, ELSE_BRANCH);

impl ElseBranch {
    pub fn else_token(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::ELSE_KW)
    }

    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }

    /// The nested `if` of an `else if`.
    pub fn else_if(&self) -> Option<IfStmt> {
        match self.body()? {
            Stmt::If(stmt) => Some(stmt),
            _ => None,
        }
    }
}

// ── Loops ────────────────────────────────────────────────────────────────

ast_node!(ForStmt, FOR_STMT);

impl ForStmt {
    pub fn init(&self) -> Option<ForInit> {
        child_node(&self.syntax)
    }

    pub fn condition(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn update(&self) -> Option<ForUpdate> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }
}

ast_node!(ForInit, FOR_INIT);

impl ForInit {
    pub fn local_var(&self) -> Option<LocalVarDecl> {
        child_node(&self.syntax)
    }

    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(ForUpdate, FOR_UPDATE);

impl ForUpdate {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

ast_node!(ForeachStmt, FOREACH_STMT);

impl ForeachStmt {
    pub fn param(&self) -> Option<Param> {
        child_node(&self.syntax)
    }

    pub fn iterable(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }
}

ast_node!(WhileStmt, WHILE_STMT);

impl WhileStmt {
    pub fn condition(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }
}

ast_node!(DoWhileStmt, DO_WHILE_STMT);

impl DoWhileStmt {
    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }

    pub fn condition(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn while_token(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::WHILE_KW)
    }
}

// ── Switch ───────────────────────────────────────────────────────────────

ast_node!(Switch, SWITCH_STMT | SWITCH_EXPR);

impl Switch {
    pub fn is_expr(&self) -> bool {
        self.syntax.kind() == SyntaxKind::SWITCH_EXPR
    }

    pub fn selector(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn entries(&self) -> impl Iterator<Item = SwitchEntry> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::R_BRACE)
    }
}

ast_node!(SwitchEntry, SWITCH_ENTRY);

impl SwitchEntry {
    /// `default:` / `default ->`, including `case null, default`.
    pub fn is_default(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::DEFAULT_KW).is_some()
            || self
                .labels()
                .any(|l| child_token(&l.syntax, SyntaxKind::DEFAULT_KW).is_some())
    }

    pub fn labels(&self) -> impl Iterator<Item = SwitchLabel> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn is_arrow(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::ARROW).is_some()
    }

    /// The statements of a colon group, or the single body of an arrow rule.
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }
}

ast_node!(SwitchLabel, SWITCH_LABEL);

impl SwitchLabel {
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

// ── Try ──────────────────────────────────────────────────────────────────

ast_node!(TryStmt, TRY_STMT);

impl TryStmt {
    pub fn resources(&self) -> Vec<Resource> {
        child_node::<ResourceList>(&self.syntax)
            .map(|l| child_nodes(&l.syntax).collect())
            .unwrap_or_default()
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    pub fn catches(&self) -> impl Iterator<Item = CatchClause> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn finally(&self) -> Option<FinallyClause> {
        child_node(&self.syntax)
    }
}

ast_node!(ResourceList, RESOURCE_LIST);
ast_node!(Resource, RESOURCE);

impl Resource {
    pub fn ty(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn declarator(&self) -> Option<VarDeclarator> {
        child_node(&self.syntax)
    }

    /// A resource given as an existing variable or field.
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

ast_node!(CatchClause, CATCH_CLAUSE);

impl CatchClause {
    pub fn param(&self) -> Option<CatchParam> {
        child_node(&self.syntax)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(CatchParam, CATCH_PARAM);

impl CatchParam {
    /// Caught types; more than one for a multi-catch.
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn name(&self) -> String {
        child_node::<Name>(&self.syntax)
            .map(|n| n.text())
            .unwrap_or_default()
    }
}

ast_node!(FinallyClause, FINALLY_CLAUSE);

impl FinallyClause {
    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

// ── Simple statements ────────────────────────────────────────────────────

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

ast_node!(BreakStmt, BREAK_STMT);

impl BreakStmt {
    pub fn label(&self) -> Option<String> {
        child_token(&self.syntax, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }
}

ast_node!(ContinueStmt, CONTINUE_STMT);

impl ContinueStmt {
    pub fn label(&self) -> Option<String> {
        child_token(&self.syntax, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }
}

ast_node!(ThrowStmt, THROW_STMT);

impl ThrowStmt {
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

ast_node!(YieldStmt, YIELD_STMT);

impl YieldStmt {
    pub fn expr(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }
}

ast_node!(AssertStmt, ASSERT_STMT);

impl AssertStmt {
    pub fn condition(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn message(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }
}

ast_node!(EmptyStmt, EMPTY_STMT);

ast_node!(LabeledStmt, LABELED_STMT);

impl LabeledStmt {
    pub fn label(&self) -> String {
        child_token(&self.syntax, SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Stmt> {
        child_stmt(&self.syntax)
    }
}

ast_node!(SynchronizedStmt, SYNCHRONIZED_STMT);

impl SynchronizedStmt {
    pub fn lock(&self) -> Option<Expr> {
        child_expr(&self.syntax)
    }

    pub fn block(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}
