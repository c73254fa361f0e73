//! Recursive-descent parser producing a resolved [`Expr`] tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr       := or_expr [ "if" or_expr "else" expr ]
//! or_expr    := and_expr ( "or" and_expr )*
//! and_expr   := not_expr ( "and" not_expr )*
//! not_expr   := "not" not_expr | comparison
//! comparison := arith ( cmp_op arith )*
//! arith      := term ( ( "+" | "-" ) term )*
//! term       := unary ( ( "*" | "/" | "//" | "%" ) unary )*
//! unary      := ( "+" | "-" ) unary | power
//! power      := primary [ "**" unary ]
//! primary    := NUMBER | NAME | NAME "(" [ expr ( "," expr )* ] ")" | "(" expr ")"
//! ```

use super::ast::{BinOp, CmpOp, Expr};
use super::error::{ExprError, ExprErrorKind};
use super::lexer::{tokenize, Token, TokenKind};
use super::symbols::{Function, Symbol, SymbolTable, TIME_VARIABLE};

/// Most tokens accepted in one expression, the end marker included.
pub const MAX_TOKENS: usize = 4096;

/// Deepest accepted nesting of parentheses, calls, conditionals, unary
/// operators and exponents.
pub const MAX_NESTING: usize = 100;

/// Parses `source` and resolves every name against `symbols`.
pub fn parse(source: &str, symbols: &SymbolTable) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    if tokens.len() > MAX_TOKENS {
        return Err(ExprError::new(
            ExprErrorKind::TooLong(MAX_TOKENS),
            tokens[MAX_TOKENS].offset,
        ));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        symbols,
    };
    let expr = parser.expr()?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    symbols: &'a SymbolTable,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // tokenize() always ends with Eof, and Eof is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ExprError {
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::Eof => ExprErrorKind::UnexpectedEnd,
            ref found => ExprErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            },
        };
        ExprError::new(kind, token.offset)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ExprError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_end(&self) -> Result<(), ExprError> {
        match self.peek().kind {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("an operator or end of expression")),
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExprError>,
    ) -> Result<T, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::new(
                ExprErrorKind::TooDeep(MAX_NESTING),
                self.peek().offset,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        self.nested(Self::conditional)
    }

    fn conditional(&mut self) -> Result<Expr, ExprError> {
        let then = self.or_expr()?;
        if !self.eat(&TokenKind::If) {
            return Ok(then);
        }
        let cond = self.or_expr()?;
        self.expect(TokenKind::Else, "'else'")?;
        let otherwise = self.expr()?;
        Ok(Expr::If {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn or_expr(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.not_expr()?;
        while self.eat(&TokenKind::And) {
            let right = self.not_expr()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not_expr(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Not) {
            let operand = self.nested(Self::not_expr)?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ExprError> {
        let first = self.arith()?;
        let mut links = Vec::new();
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => CmpOp::Lt,
                TokenKind::Le => CmpOp::Le,
                TokenKind::Gt => CmpOp::Gt,
                TokenKind::Ge => CmpOp::Ge,
                TokenKind::EqEq => CmpOp::Eq,
                TokenKind::NotEq => CmpOp::Ne,
                _ => break,
            };
            self.advance();
            links.push((op, self.arith()?));
        }
        if links.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare(Box::new(first), links))
        }
    }

    fn arith(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.term()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.nested(Self::unary)?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::StarStar) {
            // Right operand is a unary, which makes ** right-associative.
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::Binary(
                BinOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::Const(value))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.peek().kind == TokenKind::LParen {
                    self.call(&name, token.offset)
                } else {
                    self.name(&name, token.offset)
                }
            }
            _ => Err(self.unexpected("a number, name or '('")),
        }
    }

    fn name(&self, name: &str, offset: usize) -> Result<Expr, ExprError> {
        if name == TIME_VARIABLE {
            return Ok(Expr::Time);
        }
        match self.symbols.get(name) {
            Some(Symbol::Constant(value)) => Ok(Expr::Const(*value)),
            Some(Symbol::Function(_)) => Err(ExprError::new(
                ExprErrorKind::MissingCall(name.to_string()),
                offset,
            )),
            None => Err(ExprError::new(
                ExprErrorKind::UnknownName(name.to_string()),
                offset,
            )),
        }
    }

    fn call(&mut self, name: &str, offset: usize) -> Result<Expr, ExprError> {
        let function = match self.symbols.get(name) {
            Some(Symbol::Function(function)) => *function,
            Some(Symbol::Constant(_)) => {
                return Err(ExprError::new(
                    ExprErrorKind::NotCallable(name.to_string()),
                    offset,
                ))
            }
            None if name == TIME_VARIABLE => {
                return Err(ExprError::new(
                    ExprErrorKind::NotCallable(name.to_string()),
                    offset,
                ))
            }
            None => {
                return Err(ExprError::new(
                    ExprErrorKind::UnknownName(name.to_string()),
                    offset,
                ))
            }
        };

        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                args.push(self.expr()?);
                if self.eat(&TokenKind::Comma) {
                    // Allow a trailing comma before ')'.
                    if self.eat(&TokenKind::RParen) {
                        break;
                    }
                    continue;
                }
                self.expect(TokenKind::RParen, "',' or ')'")?;
                break;
            }
        }

        if !function.accepts(args.len()) {
            return Err(ExprError::new(
                ExprErrorKind::Arity {
                    name: name.to_string(),
                    expected: function.arity(),
                    found: args.len(),
                },
                offset,
            ));
        }

        let mut args = args.into_iter();
        Ok(match (function, args.len()) {
            (Function::Unary(f), 1) => Expr::Call1(f, Box::new(next_arg(&mut args))),
            (Function::Binary(f), 2) => {
                let a = next_arg(&mut args);
                let b = next_arg(&mut args);
                Expr::Call2(f, Box::new(a), Box::new(b))
            }
            (Function::Variadic { call, .. }, _) => Expr::CallN(call, args.collect()),
            // accepts() already rejected every other count
            (Function::Unary(_) | Function::Binary(_), _) => Expr::Const(f64::NAN),
        })
    }
}

fn next_arg(args: &mut std::vec::IntoIter<Expr>) -> Expr {
    args.next().unwrap_or(Expr::Const(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str, t: f64) -> f64 {
        parse(source, &SymbolTable::standard()).unwrap().eval(t)
    }

    fn err(source: &str) -> ExprError {
        parse(source, &SymbolTable::standard()).unwrap_err()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(eval("10 - 4 - 3", 0.0), 3.0);
        assert_eq!(eval("2 * t + 1", 4.0), 9.0);
    }

    #[test]
    fn test_power_binds_tighter_than_unary_minus() {
        assert_eq!(eval("-2 ** 2", 0.0), -4.0);
        assert_eq!(eval("2 ** -1", 0.0), 0.5);
        assert_eq!(eval("2 ** 3 ** 2", 0.0), 512.0);
    }

    #[test]
    fn test_floor_div_and_mod() {
        assert_eq!(eval("7 // 2", 0.0), 3.0);
        assert_eq!(eval("-7 // 2", 0.0), -4.0);
        assert_eq!(eval("t % 3", -1.0), 2.0);
    }

    #[test]
    fn test_conditional_and_logic() {
        let source = "1 if 0 <= t < 0.5 else -1";
        assert_eq!(eval(source, 0.25), 1.0);
        assert_eq!(eval(source, 0.75), -1.0);
        assert_eq!(eval("not t", 0.0), 1.0);
        assert_eq!(eval("t > 1 and t < 2 or t == 5", 5.0), 1.0);
    }

    #[test]
    fn test_calls_resolve() {
        assert_eq!(eval("sq(t)", 0.0), 1.0);
        assert_eq!(eval("fadein(t, 2)", 1.0), 0.25);
        assert_eq!(eval("max(t, 2, 3,)", 10.0), 10.0);
        assert!((eval("sin(pi / 2)", 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trailing_operator() {
        let e = err("t +");
        assert_eq!(e.kind, ExprErrorKind::UnexpectedEnd);
        assert_eq!(e.offset, 3);
    }

    #[test]
    fn test_unknown_name() {
        let e = err("sin(t) * foo");
        assert_eq!(e.kind, ExprErrorKind::UnknownName("foo".to_string()));
        assert_eq!(e.offset, 9);
    }

    #[test]
    fn test_unknown_function() {
        let e = err("open(t)");
        assert_eq!(e.kind, ExprErrorKind::UnknownName("open".to_string()));
    }

    #[test]
    fn test_function_without_call() {
        assert_eq!(err("sin").kind, ExprErrorKind::MissingCall("sin".to_string()));
    }

    #[test]
    fn test_constant_called() {
        assert_eq!(err("pi(2)").kind, ExprErrorKind::NotCallable("pi".to_string()));
        assert_eq!(err("t(2)").kind, ExprErrorKind::NotCallable("t".to_string()));
    }

    #[test]
    fn test_wrong_arity() {
        let e = err("sin(t, 2)");
        assert_eq!(
            e.kind,
            ExprErrorKind::Arity {
                name: "sin".to_string(),
                expected: "1".to_string(),
                found: 2,
            }
        );
    }

    #[test]
    fn test_trailing_tokens() {
        let e = err("t t");
        assert_eq!(e.code(), "E003");
        assert_eq!(e.offset, 2);
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(err("(t + 1").kind, ExprErrorKind::UnexpectedEnd);
        assert_eq!(err("t + 1)").code(), "E003");
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}t{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(err(&deep).kind, ExprErrorKind::TooDeep(MAX_NESTING));

        let negations = format!("{}t", "-".repeat(MAX_NESTING * 2));
        assert_eq!(err(&negations).code(), "E010");

        let shallow = format!("{}t{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(eval(&shallow, 3.0), 3.0);
    }

    #[test]
    fn test_token_limit() {
        let long = vec!["1"; MAX_TOKENS].join("+");
        assert_eq!(err(&long).kind, ExprErrorKind::TooLong(MAX_TOKENS));

        let ok = vec!["t"; 1000].join("+");
        assert_eq!(eval(&ok, 1.0), 1000.0);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(err("").kind, ExprErrorKind::UnexpectedEnd);
        assert_eq!(err("   ").kind, ExprErrorKind::UnexpectedEnd);
    }
}
