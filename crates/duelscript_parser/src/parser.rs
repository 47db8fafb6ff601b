//! The DuelScript parser implementation.
//!
//! A recursive descent parser over a borrowed token slice. It builds an
//! arena-allocated AST and recovers from syntax errors at statement
//! boundaries, so one malformed declaration never hides the rest of the file.

use bumpalo::Bump;
use duelscript_ast::node::*;
use duelscript_ast::{Token, TokenKind, MAIN_FUNCTION_NAME};
use duelscript_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage, Location};

use crate::error::{ParseError, ParseResult};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{is_synchronization_point, FunctionKind};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Maximum number of call arguments or ritual parameters.
const MAX_LIST_ENTRIES: usize = 255;

/// Allocate a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// The parser turns a token stream into a [`Program`].
pub struct Parser<'a> {
    arena: &'a Bump,
    tokens: &'a [Token<'a>],
    /// Index of the next unconsumed token.
    current: usize,
    diagnostics: DiagnosticCollection,
    had_error: bool,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, tokens: &'a [Token<'a>]) -> Self {
        Self {
            arena,
            tokens,
            current: 0,
            diagnostics: DiagnosticCollection::new(),
            had_error: false,
            recursion_depth: 0,
        }
    }

    /// Parse top-level declarations until the end-of-stream token.
    ///
    /// Statement-fatal errors are recorded and skipped over, so the returned
    /// program may have gaps. Check [`Parser::had_error`] before trusting it.
    pub fn parse_program(&mut self) -> Program<'a> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.parse_declaration() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.record(error);
                    self.synchronize();
                }
            }
        }
        Program {
            statements: alloc_vec_in(self.arena, statements),
        }
    }

    /// Whether any syntax error, fatal or not, was reported.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        self.diagnostics.take()
    }

    // ========================================================================
    // Token cursor
    // ========================================================================

    /// End-of-stream stand-in for positions past the token slice.
    fn end_token(&self) -> Token<'a> {
        let line = self.tokens.last().map_or(1, |t| t.line);
        Token::eof(line)
    }

    #[inline]
    fn peek(&self) -> Token<'a> {
        match self.tokens.get(self.current) {
            Some(token) => *token,
            None => self.end_token(),
        }
    }

    #[inline]
    fn peek_next(&self) -> Token<'a> {
        match self.tokens.get(self.current + 1) {
            Some(token) => *token,
            None => self.end_token(),
        }
    }

    #[inline]
    fn previous(&self) -> Token<'a> {
        match self.current.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => *token,
            None => self.end_token(),
        }
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn advance(&mut self) -> Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Check the token after the current one. Never matches past the end.
    fn check_next(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        let next = self.peek_next();
        !next.is_eof() && next.kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(
        &mut self,
        kind: TokenKind,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> ParseResult<Token<'a>> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error(self.peek(), message, args))
    }

    // ========================================================================
    // Error reporting
    // ========================================================================

    fn diagnostic_at(token: Token<'a>, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        let location = if token.is_eof() {
            Location::End
        } else {
            Location::Lexeme(token.lexeme.to_string())
        };
        Diagnostic::parser(token.line, location, message, args)
    }

    fn error(&self, token: Token<'a>, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        ParseError::new(Self::diagnostic_at(token, message, args))
    }

    /// Report a non-fatal error. Parsing of the current construct continues.
    fn report(&mut self, token: Token<'a>, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Self::diagnostic_at(token, message, args));
        self.had_error = true;
    }

    fn record(&mut self, error: ParseError) {
        self.diagnostics.add(error.into_diagnostic());
        self.had_error = true;
    }

    /// Skip tokens until a likely declaration boundary: just past a `;`, or
    /// in front of a keyword that starts a declaration or statement.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if is_synchronization_point(self.peek().kind) {
                return;
            }
            self.advance();
        }
    }

    #[inline]
    fn alloc_expr(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    #[inline]
    fn alloc_stmt(&self, stmt: Stmt<'a>) -> &'a Stmt<'a> {
        self.arena.alloc(stmt)
    }

    fn with_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(self.error(self.peek(), &messages::NESTING_TOO_DEEP, &[]));
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        if self.match_kind(TokenKind::KeywordSetField) {
            return self.parse_include_declaration();
        }
        if self.match_kind(TokenKind::KeywordKaiba) {
            return self.parse_using_declaration();
        }
        if self.match_kind(TokenKind::KeywordLordOfD) {
            return self.parse_class_declaration();
        }
        if self.match_kind(TokenKind::KeywordToonWorld) {
            return self.parse_struct_declaration();
        }
        if self.match_kind(TokenKind::KeywordRitual) {
            return self
                .parse_function_declaration(FunctionKind::Function)
                .map(Stmt::Function);
        }
        if self.is_var_declaration_start() {
            return self.parse_var_declaration().map(Stmt::VarDecl);
        }
        self.parse_statement()
    }

    /// `Type name` starts a variable declaration; `Type(` or `Type.x` does not.
    /// The type may be a plain identifier, hence the two-token lookahead.
    fn is_var_declaration_start(&self) -> bool {
        self.peek().kind.is_type_start()
            && self.check_next(TokenKind::Identifier)
            && self.peek_next().lexeme != MAIN_FUNCTION_NAME
    }

    fn parse_include_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        let path = self.consume(
            TokenKind::String,
            &messages::EXPECT_MODULE_NAME_AFTER_SETFIELD,
            &[],
        )?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["#SetField declaration"],
        )?;
        Ok(Stmt::Include(IncludeDecl { path }))
    }

    fn parse_using_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        let namespace = self.previous();
        let name = self.consume(TokenKind::KeywordJoey, &messages::EXPECT_JOEY_AFTER_KAIBA, &[])?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["'using' declaration"],
        )?;
        Ok(Stmt::Using(UsingDecl { namespace, name }))
    }

    fn parse_class_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        let name = self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &["class"])?;
        self.consume(
            TokenKind::LeftBrace,
            &messages::EXPECT_OPEN_BRACE_BEFORE_0_BODY,
            &["class"],
        )?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if self.match_kind(TokenKind::KeywordRitual) {
                methods.push(self.parse_function_declaration(FunctionKind::Method)?);
            } else if self.peek().kind.is_type_start() {
                fields.push(self.parse_var_declaration()?);
            } else if self.check(TokenKind::Semicolon) {
                // Stray terminators between members are tolerated.
                self.advance();
            } else {
                return Err(self.error(self.peek(), &messages::EXPECT_CLASS_MEMBER, &[]));
            }
        }

        self.consume(
            TokenKind::RightBrace,
            &messages::EXPECT_CLOSE_BRACE_AFTER_0,
            &["class body"],
        )?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["class declaration"],
        )?;

        Ok(Stmt::Class(ClassDecl {
            name,
            fields: alloc_vec_in(self.arena, fields),
            methods: alloc_vec_in(self.arena, methods),
        }))
    }

    fn parse_struct_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        let name = self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &["struct"])?;
        self.consume(
            TokenKind::LeftBrace,
            &messages::EXPECT_OPEN_BRACE_BEFORE_0_BODY,
            &["struct"],
        )?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if !self.peek().kind.is_type_start() {
                return Err(self.error(self.peek(), &messages::EXPECT_FIELD_INSIDE_STRUCT, &[]));
            }
            fields.push(self.parse_var_declaration()?);
        }

        self.consume(
            TokenKind::RightBrace,
            &messages::EXPECT_CLOSE_BRACE_AFTER_0,
            &["struct body"],
        )?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["struct declaration"],
        )?;

        Ok(Stmt::Struct(StructDecl {
            name,
            fields: alloc_vec_in(self.arena, fields),
        }))
    }

    /// Parse the rest of a `Ritual` declaration; the keyword is already consumed.
    fn parse_function_declaration(&mut self, kind: FunctionKind) -> ParseResult<FunctionDecl<'a>> {
        let name = if self.match_kind(TokenKind::KeywordYugi) {
            self.previous()
        } else {
            self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &[kind.as_str()])?
        };

        let after_name = format!("{} name", kind.as_str());
        self.consume(
            TokenKind::LeftParen,
            &messages::EXPECT_OPEN_PAREN_AFTER_0,
            &[&after_name],
        )?;
        let params = self.parse_parameters()?;
        self.consume(
            TokenKind::RightParen,
            &messages::EXPECT_CLOSE_PAREN_AFTER_0,
            &["parameters"],
        )?;
        self.consume(
            TokenKind::LeftBrace,
            &messages::EXPECT_OPEN_BRACE_BEFORE_0_BODY,
            &[kind.as_str()],
        )?;
        let body = self.parse_block()?;

        Ok(FunctionDecl { name, params, body })
    }

    fn parse_parameters(&mut self) -> ParseResult<&'a [Parameter<'a>]> {
        let mut params = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(&[]);
        }

        loop {
            if params.len() >= MAX_LIST_ENTRIES {
                self.report(self.peek(), &messages::TOO_MANY_PARAMETERS, &[]);
            }
            if !self.peek().kind.is_type_start() {
                return Err(self.error(self.peek(), &messages::EXPECT_PARAMETER_TYPE, &[]));
            }
            let type_name = self.advance();
            let name = self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &["parameter"])?;
            params.push(Parameter { type_name, name });

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(alloc_vec_in(self.arena, params))
    }

    /// `Type name (= initializer)? ;`. Consumes its own type token.
    fn parse_var_declaration(&mut self) -> ParseResult<VarDecl<'a>> {
        if !self.peek().kind.is_type_start() {
            return Err(self.error(self.peek(), &messages::EXPECT_VARIABLE_TYPE, &[]));
        }
        let type_name = self.advance();
        let name = self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &["variable"])?;

        let initializer = if self.match_kind(TokenKind::Equal) {
            let value = self.parse_expression()?;
            Some(self.alloc_expr(value))
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["variable declaration"],
        )?;
        Ok(VarDecl { type_name, name, initializer })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Stmt<'a>> {
        self.with_depth(Self::parse_statement_worker)
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Stmt<'a>> {
        match self.peek().kind {
            TokenKind::KeywordJudgmentOfAnubis => {
                self.advance();
                self.parse_if_statement()
            }
            TokenKind::KeywordSwordsOfRevealingLight => {
                self.advance();
                self.parse_while_statement()
            }
            TokenKind::KeywordSummon => {
                self.advance();
                self.parse_summon_statement()
            }
            TokenKind::KeywordDraw => {
                self.advance();
                self.parse_draw_statement()
            }
            TokenKind::KeywordTribute => {
                self.advance();
                self.parse_return_statement()
            }
            TokenKind::LeftBrace => {
                self.advance();
                self.parse_block().map(Stmt::Block)
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt<'a>> {
        self.consume(
            TokenKind::LeftParen,
            &messages::EXPECT_OPEN_PAREN_AFTER_0,
            &["'JudgmentOfAnubis'"],
        )?;
        let condition = self.parse_expression()?;
        self.consume(
            TokenKind::RightParen,
            &messages::EXPECT_CLOSE_PAREN_AFTER_0,
            &["if condition"],
        )?;

        let then_branch = self.parse_statement()?;
        let else_branch = if self.match_kind(TokenKind::KeywordSolemnJudgment) {
            let statement = self.parse_statement()?;
            Some(self.alloc_stmt(statement))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition: self.alloc_expr(condition),
            then_branch: self.alloc_stmt(then_branch),
            else_branch,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt<'a>> {
        self.consume(
            TokenKind::LeftParen,
            &messages::EXPECT_OPEN_PAREN_AFTER_0,
            &["'SwordsOfRevealingLight'"],
        )?;
        let condition = self.parse_expression()?;
        self.consume(
            TokenKind::RightParen,
            &messages::EXPECT_CLOSE_PAREN_AFTER_0,
            &["while condition"],
        )?;
        let body = self.parse_statement()?;

        Ok(Stmt::While(WhileStmt {
            condition: self.alloc_expr(condition),
            body: self.alloc_stmt(body),
        }))
    }

    /// `Summon << a << b ;` folds into left-associative `<<` Binary nodes.
    fn parse_summon_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.previous();
        self.consume(
            TokenKind::SummonOp,
            &messages::EXPECT_SUMMON_OP_AFTER_SUMMON,
            &[],
        )?;

        let mut expression = self.parse_expression()?;
        while self.match_kind(TokenKind::SummonOp) {
            let operator = self.previous();
            let right = self.parse_expression()?;
            expression = Expr::Binary(BinaryExpr {
                left: self.alloc_expr(expression),
                operator,
                right: self.alloc_expr(right),
            });
        }

        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["'Summon' statement"],
        )?;
        Ok(Stmt::Summon(SummonStmt {
            keyword,
            expression: self.alloc_expr(expression),
        }))
    }

    fn parse_draw_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.previous();
        self.consume(TokenKind::DrawOp, &messages::EXPECT_DRAW_OP_AFTER_DRAW, &[])?;
        let name = self.consume(TokenKind::Identifier, &messages::EXPECT_0_NAME, &["variable"])?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["'Draw' statement"],
        )?;
        Ok(Stmt::Draw(DrawStmt { keyword, name }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.previous();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            let value = self.parse_expression()?;
            Some(self.alloc_expr(value))
        };

        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["'Tribute' value"],
        )?;
        Ok(Stmt::Return(ReturnStmt { keyword, value }))
    }

    /// Parse declarations up to and including the closing `}`.
    /// The opening `{` is already consumed.
    fn parse_block(&mut self) -> ParseResult<Block<'a>> {
        self.with_depth(|parser| {
            let mut statements = Vec::new();
            while !parser.check(TokenKind::RightBrace) && !parser.is_at_end() {
                statements.push(parser.parse_declaration()?);
            }
            parser.consume(
                TokenKind::RightBrace,
                &messages::EXPECT_CLOSE_BRACE_AFTER_0,
                &["block"],
            )?;
            Ok(Block {
                statements: alloc_vec_in(parser.arena, statements),
            })
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let expression = self.parse_expression()?;
        self.consume(
            TokenKind::Semicolon,
            &messages::EXPECT_SEMICOLON_AFTER_0,
            &["expression"],
        )?;
        Ok(Stmt::Expression(ExpressionStmt {
            expression: self.alloc_expr(expression),
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expr<'a>> {
        self.with_depth(Self::parse_assignment_expression)
    }

    /// Right-associative. The target is parsed as an ordinary expression
    /// first and rewritten once `=` shows up.
    fn parse_assignment_expression(&mut self) -> ParseResult<Expr<'a>> {
        let expr = self.parse_binary_expression(OperatorPrecedence::Lowest)?;

        if !self.match_kind(TokenKind::Equal) {
            return Ok(expr);
        }
        let equals = self.previous();
        let value = self.parse_expression()?;

        match expr {
            Expr::Variable(variable) => Ok(Expr::Assign(AssignExpr {
                name: variable.name,
                value: self.alloc_expr(value),
            })),
            Expr::Get(get) => Ok(Expr::Set(SetExpr {
                object: get.object,
                name: get.name,
                value: self.alloc_expr(value),
            })),
            target => {
                self.report(equals, &messages::INVALID_ASSIGNMENT_TARGET, &[]);
                Ok(target)
            }
        }
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> ParseResult<Expr<'a>> {
        let mut left = self.parse_unary_expression()?;

        loop {
            let precedence = get_binary_operator_precedence(self.peek().kind);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }

            let operator = self.advance();
            let right = self.parse_binary_expression(precedence)?;
            left = Expr::Binary(BinaryExpr {
                left: self.alloc_expr(left),
                operator,
                right: self.alloc_expr(right),
            });
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expr<'a>> {
        match self.peek().kind {
            TokenKind::Bang | TokenKind::Minus => {
                let operator = self.advance();
                let operand = self.with_depth(Self::parse_unary_expression)?;
                Ok(Expr::Unary(UnaryExpr {
                    operator,
                    operand: self.alloc_expr(operand),
                }))
            }
            _ => self.parse_call_expression(),
        }
    }

    /// Postfix calls and property accesses, chained left to right.
    fn parse_call_expression(&mut self) -> ParseResult<Expr<'a>> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            if self.match_kind(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_kind(TokenKind::Dot) {
                let name = self.consume(
                    TokenKind::Identifier,
                    &messages::EXPECT_PROPERTY_NAME_AFTER_DOT,
                    &[],
                )?;
                expr = Expr::Get(GetExpr {
                    object: self.alloc_expr(expr),
                    name,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr<'a>) -> ParseResult<Expr<'a>> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_LIST_ENTRIES {
                    self.report(self.peek(), &messages::TOO_MANY_ARGUMENTS, &[]);
                }
                arguments.push(self.parse_expression()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(
            TokenKind::RightParen,
            &messages::EXPECT_CLOSE_PAREN_AFTER_0,
            &["arguments"],
        )?;
        Ok(Expr::Call(CallExpr {
            callee: self.alloc_expr(callee),
            paren,
            arguments: alloc_vec_in(self.arena, arguments),
        }))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expr<'a>> {
        let token = self.peek();
        let value = match token.kind {
            TokenKind::KeywordFalse => LiteralValue::Boolean(false),
            TokenKind::KeywordTrue => LiteralValue::Boolean(true),
            TokenKind::Number => match token.lexeme.parse::<f64>() {
                Ok(number) => LiteralValue::Number(number),
                Err(_) => return Err(self.error(token, &messages::EXPECT_EXPRESSION, &[])),
            },
            TokenKind::String => LiteralValue::String(token.lexeme),
            // `Yugi` is a keyword but still names the main ritual, e.g. `Yugi();`.
            TokenKind::Identifier | TokenKind::KeywordYugi => {
                self.advance();
                return Ok(Expr::Variable(VariableExpr { name: token }));
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.consume(
                    TokenKind::RightParen,
                    &messages::EXPECT_CLOSE_PAREN_AFTER_0,
                    &["expression"],
                )?;
                return Ok(Expr::Grouping(GroupingExpr {
                    expression: self.alloc_expr(inner),
                }));
            }
            _ => return Err(self.error(token, &messages::EXPECT_EXPRESSION, &[])),
        };

        self.advance();
        Ok(Expr::Literal(LiteralExpr { value }))
    }
}
