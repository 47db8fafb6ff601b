//! AST node definitions for DuelScript.
//!
//! Expressions and statements are closed enums with one payload struct per
//! variant. Children are arena references, lists are arena slices. The tree
//! is built once by the parser and only read afterwards.

use crate::token::Token;

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Program
// ============================================================================

/// The top-level statements of one compilation unit, in source order.
#[derive(Debug)]
pub struct Program<'a> {
    pub statements: NodeList<'a, Stmt<'a>>,
}

impl<'a> Program<'a> {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// The value carried by a literal expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
    Nothing,
}

#[derive(Debug)]
pub enum Expr<'a> {
    Binary(BinaryExpr<'a>),
    Grouping(GroupingExpr<'a>),
    Literal(LiteralExpr<'a>),
    Unary(UnaryExpr<'a>),
    Variable(VariableExpr<'a>),
    Assign(AssignExpr<'a>),
    Call(CallExpr<'a>),
    Get(GetExpr<'a>),
    Set(SetExpr<'a>),
}

impl<'a> Expr<'a> {
    /// Short variant name, used by debugging output and tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Binary(_) => "Binary",
            Expr::Grouping(_) => "Grouping",
            Expr::Literal(_) => "Literal",
            Expr::Unary(_) => "Unary",
            Expr::Variable(_) => "Variable",
            Expr::Assign(_) => "Assign",
            Expr::Call(_) => "Call",
            Expr::Get(_) => "Get",
            Expr::Set(_) => "Set",
        }
    }
}

#[derive(Debug)]
pub struct BinaryExpr<'a> {
    pub left: &'a Expr<'a>,
    pub operator: Token<'a>,
    pub right: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct GroupingExpr<'a> {
    pub expression: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct LiteralExpr<'a> {
    pub value: LiteralValue<'a>,
}

#[derive(Debug)]
pub struct UnaryExpr<'a> {
    pub operator: Token<'a>,
    pub operand: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct VariableExpr<'a> {
    pub name: Token<'a>,
}

#[derive(Debug)]
pub struct AssignExpr<'a> {
    pub name: Token<'a>,
    pub value: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct CallExpr<'a> {
    pub callee: &'a Expr<'a>,
    /// The closing parenthesis, kept for error reporting.
    pub paren: Token<'a>,
    pub arguments: NodeList<'a, Expr<'a>>,
}

#[derive(Debug)]
pub struct GetExpr<'a> {
    pub object: &'a Expr<'a>,
    pub name: Token<'a>,
}

#[derive(Debug)]
pub struct SetExpr<'a> {
    pub object: &'a Expr<'a>,
    pub name: Token<'a>,
    pub value: &'a Expr<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Stmt<'a> {
    Expression(ExpressionStmt<'a>),
    Summon(SummonStmt<'a>),
    Draw(DrawStmt<'a>),
    VarDecl(VarDecl<'a>),
    Block(Block<'a>),
    If(IfStmt<'a>),
    While(WhileStmt<'a>),
    Function(FunctionDecl<'a>),
    Return(ReturnStmt<'a>),
    Class(ClassDecl<'a>),
    Struct(StructDecl<'a>),
    Include(IncludeDecl<'a>),
    Using(UsingDecl<'a>),
}

impl<'a> Stmt<'a> {
    /// Short variant name, used by debugging output and tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Expression(_) => "Expression",
            Stmt::Summon(_) => "Summon",
            Stmt::Draw(_) => "Draw",
            Stmt::VarDecl(_) => "VarDecl",
            Stmt::Block(_) => "Block",
            Stmt::If(_) => "If",
            Stmt::While(_) => "While",
            Stmt::Function(_) => "Function",
            Stmt::Return(_) => "Return",
            Stmt::Class(_) => "Class",
            Stmt::Struct(_) => "Struct",
            Stmt::Include(_) => "Include",
            Stmt::Using(_) => "Using",
        }
    }
}

/// An expression evaluated for its effect.
#[derive(Debug)]
pub struct ExpressionStmt<'a> {
    pub expression: &'a Expr<'a>,
}

/// `Summon << expr << expr ;` outputs a computed value.
#[derive(Debug)]
pub struct SummonStmt<'a> {
    pub keyword: Token<'a>,
    pub expression: &'a Expr<'a>,
}

/// `Draw >> name ;` outputs by name.
#[derive(Debug)]
pub struct DrawStmt<'a> {
    pub keyword: Token<'a>,
    pub name: Token<'a>,
}

#[derive(Debug)]
pub struct VarDecl<'a> {
    pub type_name: Token<'a>,
    pub name: Token<'a>,
    pub initializer: Option<&'a Expr<'a>>,
}

#[derive(Debug)]
pub struct Block<'a> {
    pub statements: NodeList<'a, Stmt<'a>>,
}

#[derive(Debug)]
pub struct IfStmt<'a> {
    pub condition: &'a Expr<'a>,
    pub then_branch: &'a Stmt<'a>,
    pub else_branch: Option<&'a Stmt<'a>>,
}

#[derive(Debug)]
pub struct WhileStmt<'a> {
    pub condition: &'a Expr<'a>,
    pub body: &'a Stmt<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    pub type_name: Token<'a>,
    pub name: Token<'a>,
}

/// A `Ritual` declaration. Also used for class methods.
#[derive(Debug)]
pub struct FunctionDecl<'a> {
    pub name: Token<'a>,
    pub params: NodeList<'a, Parameter<'a>>,
    pub body: Block<'a>,
}

#[derive(Debug)]
pub struct ReturnStmt<'a> {
    /// The `Tribute` keyword, kept for line information.
    pub keyword: Token<'a>,
    pub value: Option<&'a Expr<'a>>,
}

#[derive(Debug)]
pub struct ClassDecl<'a> {
    pub name: Token<'a>,
    pub fields: NodeList<'a, VarDecl<'a>>,
    pub methods: NodeList<'a, FunctionDecl<'a>>,
}

#[derive(Debug)]
pub struct StructDecl<'a> {
    pub name: Token<'a>,
    pub fields: NodeList<'a, VarDecl<'a>>,
}

/// `#SetField "path";` declares a dependency on another source unit.
#[derive(Debug)]
pub struct IncludeDecl<'a> {
    /// String token; the lexeme is the path without quotes.
    pub path: Token<'a>,
}

/// `Kaiba Joey;`
#[derive(Debug)]
pub struct UsingDecl<'a> {
    pub namespace: Token<'a>,
    pub name: Token<'a>,
}
