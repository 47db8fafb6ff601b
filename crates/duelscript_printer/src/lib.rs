//! duelscript_printer: AST to S-expression text.
//!
//! Renders a parsed [`Program`] as an indented S-expression listing, one
//! statement per line. Expressions are printed inline. The printer only
//! reads the tree; it never reports errors.

use duelscript_ast::node::*;
use duelscript_ast::Token;

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string for one nesting level.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            new_line: "\n".to_string(),
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    /// Print a whole program to a string.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.open("(Program");
        for stmt in program.statements {
            self.print_statement(stmt);
        }
        self.close();
        std::mem::take(&mut self.output)
    }

    /// Print a single expression without indentation or newline.
    pub fn print_expression_to_string(&mut self, expr: &Expr<'_>) -> String {
        self.output.clear();
        self.print_expression(expr);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Expression(n) => {
                self.write_indent();
                self.write("(ExpressionStmt ");
                self.print_expression(n.expression);
                self.write(")");
                self.write_newline();
            }
            Stmt::Summon(n) => {
                self.write_indent();
                self.write("(Summon ");
                self.print_expression(n.expression);
                self.write(")");
                self.write_newline();
            }
            Stmt::Draw(n) => {
                self.write_indent();
                self.write("(Draw ");
                self.write(n.name.lexeme);
                self.write(")");
                self.write_newline();
            }
            Stmt::VarDecl(n) => self.print_var_decl(n),
            Stmt::Block(n) => self.print_block(n),
            Stmt::If(n) => self.print_if_statement(n),
            Stmt::While(n) => {
                self.write_indent();
                self.write("(While ");
                self.print_expression(n.condition);
                self.write_newline();
                self.increase_indent();
                self.print_statement(n.body);
                self.close();
            }
            Stmt::Function(n) => self.print_function(n),
            Stmt::Return(n) => {
                self.write_indent();
                self.write("(Tribute (Return)");
                if let Some(value) = n.value {
                    self.write(" ");
                    self.print_expression(value);
                }
                self.write(")");
                self.write_newline();
            }
            Stmt::Class(n) => self.print_class(n),
            Stmt::Struct(n) => {
                self.open(&format!("(Struct {}", n.name.lexeme));
                for field in n.fields {
                    self.print_var_decl(field);
                }
                self.close();
            }
            Stmt::Include(n) => {
                self.write_indent();
                self.write("($SetField \"");
                self.write(n.path.lexeme);
                self.write("\")");
                self.write_newline();
            }
            Stmt::Using(n) => {
                self.write_indent();
                self.write("(Using ");
                self.write(n.namespace.lexeme);
                self.write(" ");
                self.write(n.name.lexeme);
                self.write(")");
                self.write_newline();
            }
        }
    }

    fn print_var_decl(&mut self, decl: &VarDecl<'_>) {
        self.write_indent();
        self.write("(VarDecl ");
        self.write(decl.type_name.lexeme);
        self.write(" ");
        self.write(decl.name.lexeme);
        if let Some(initializer) = decl.initializer {
            self.write(" = ");
            self.print_expression(initializer);
        }
        self.write(")");
        self.write_newline();
    }

    fn print_block(&mut self, block: &Block<'_>) {
        self.open("(Block");
        for stmt in block.statements {
            self.print_statement(stmt);
        }
        self.close();
    }

    fn print_if_statement(&mut self, node: &IfStmt<'_>) {
        self.write_indent();
        self.write("(If ");
        self.print_expression(node.condition);
        self.write_newline();
        self.increase_indent();

        self.open("(Then");
        self.print_statement(node.then_branch);
        self.close();

        if let Some(else_branch) = node.else_branch {
            self.open("(Else");
            self.print_statement(else_branch);
            self.close();
        }

        self.close();
    }

    fn print_function(&mut self, function: &FunctionDecl<'_>) {
        self.write_indent();
        self.write("(Function ");
        self.write(function.name.lexeme);
        self.write(" (");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(param.type_name.lexeme);
            self.write(" ");
            self.write(param.name.lexeme);
        }
        self.write(")");
        self.write_newline();
        self.increase_indent();
        self.print_block(&function.body);
        self.close();
    }

    fn print_class(&mut self, class: &ClassDecl<'_>) {
        self.open(&format!("(Class {}", class.name.lexeme));
        if !class.fields.is_empty() {
            self.open("(Fields");
            for field in class.fields {
                self.print_var_decl(field);
            }
            self.close();
        }
        if !class.methods.is_empty() {
            self.open("(Methods");
            for method in class.methods {
                self.print_function(method);
            }
            self.close();
        }
        self.close();
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::Binary(n) => self.parenthesize(n.operator.lexeme, &[n.left, n.right]),
            Expr::Grouping(n) => self.parenthesize("group", &[n.expression]),
            Expr::Literal(n) => self.print_literal(n.value),
            Expr::Unary(n) => self.parenthesize(n.operator.lexeme, &[n.operand]),
            Expr::Variable(n) => self.write(n.name.lexeme),
            Expr::Assign(n) => {
                self.write("(= ");
                self.write(n.name.lexeme);
                self.write(" ");
                self.print_expression(n.value);
                self.write(")");
            }
            Expr::Call(n) => {
                self.write("(call ");
                self.print_expression(n.callee);
                for argument in n.arguments {
                    self.write(" ");
                    self.print_expression(argument);
                }
                self.write(")");
            }
            Expr::Get(n) => {
                self.write("(");
                self.print_member_name(n.name);
                self.write(" ");
                self.print_expression(n.object);
                self.write(")");
            }
            Expr::Set(n) => {
                self.write("(set ");
                self.print_member_name(n.name);
                self.write(" ");
                self.print_expression(n.object);
                self.write(" ");
                self.print_expression(n.value);
                self.write(")");
            }
        }
    }

    fn print_literal(&mut self, value: LiteralValue<'_>) {
        match value {
            LiteralValue::String(s) => {
                self.write("\"");
                self.write(s);
                self.write("\"");
            }
            LiteralValue::Number(n) => self.write_owned(format_number(n)),
            LiteralValue::Boolean(b) => self.write(if b { "true" } else { "false" }),
            LiteralValue::Nothing => self.write("nil"),
        }
    }

    fn print_member_name(&mut self, name: Token<'_>) {
        self.write(".");
        self.write(name.lexeme);
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr<'_>]) {
        self.write("(");
        self.write(name);
        for expr in exprs {
            self.write(" ");
            self.print_expression(expr);
        }
        self.write(")");
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    /// Write `header` on its own line and indent what follows.
    fn open(&mut self, header: &str) {
        self.write_indent();
        self.write(header);
        self.write_newline();
        self.increase_indent();
    }

    /// Dedent and write the closing parenthesis of the innermost `open`.
    fn close(&mut self) {
        self.decrease_indent();
        self.write_indent();
        self.write(")");
        self.write_newline();
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Shortest decimal form of a number literal: `2500`, `0.5`.
fn format_number(n: f64) -> String {
    format!("{}", n)
}

/// Render `program` with the default options.
pub fn print_program(program: &Program<'_>) -> String {
    Printer::new().print_program(program)
}
