//! Expression grammar.
//!
//! A shunting-yard pass that emits postfix [`RpnExpr`] sequences directly.
//! Operands go straight to the output; operators wait on a side stack until
//! something of equal or lower precedence arrives. Unary operators bind
//! tighter than every binary operator and associate to the right.

use psc_diagnostic::ErrorCode;
use psc_ir::{BinaryOp, ExprElem, Name, RpnExpr, Span, TokenKind, UnaryOp, Value};

use crate::{ParseError, Parser};

/// Pending operator on the shunting-yard stack.
enum OpEntry {
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// Open parenthesis, with its span for unclosed-delimiter reports.
    OpenParen(Span),
}

impl Parser<'_> {
    /// Parse one expression in postfix order.
    ///
    /// Stops (without consuming) at the first token that cannot continue
    /// the expression: newline, keyword, comma, or an unmatched closing
    /// delimiter. The caller decides whether that token is welcome.
    pub(crate) fn parse_expr(&mut self) -> Result<RpnExpr, ParseError> {
        let mut output = RpnExpr::new();
        let mut ops: Vec<OpEntry> = Vec::new();
        let mut expect_operand = true;

        loop {
            if expect_operand {
                let span = self.cursor.current_span();
                match *self.cursor.current_kind() {
                    TokenKind::Int(n) => {
                        self.cursor.advance();
                        output.push(ExprElem::Literal(Value::Int(n)));
                    }
                    TokenKind::Real(x) => {
                        self.cursor.advance();
                        output.push(ExprElem::Literal(Value::Real(x)));
                    }
                    TokenKind::Str(name) => {
                        self.cursor.advance();
                        let text = self.cursor.interner().lookup(name).to_owned();
                        output.push(ExprElem::Literal(Value::Str(text)));
                    }
                    TokenKind::Verdadero => {
                        self.cursor.advance();
                        output.push(ExprElem::Literal(Value::Bool(true)));
                    }
                    TokenKind::Falso => {
                        self.cursor.advance();
                        output.push(ExprElem::Literal(Value::Bool(false)));
                    }
                    TokenKind::Ident(name) => {
                        output.push(self.parse_invocation(name, span)?);
                    }
                    TokenKind::Minus => {
                        self.cursor.advance();
                        ops.push(OpEntry::Unary(UnaryOp::Neg));
                        continue;
                    }
                    TokenKind::No => {
                        self.cursor.advance();
                        ops.push(OpEntry::Unary(UnaryOp::Not));
                        continue;
                    }
                    TokenKind::LParen => {
                        self.cursor.advance();
                        ops.push(OpEntry::OpenParen(span));
                        continue;
                    }
                    ref other => {
                        return Err(ParseError::new(
                            ErrorCode::E1002,
                            format!("se esperaba una expresion, se encontro {other}"),
                            span,
                        ));
                    }
                }
                expect_operand = false;
            } else if let Some(op) = binary_op(self.cursor.current_kind()) {
                self.cursor.advance();
                // Left-associative: pop everything that binds at least as
                // tightly. Pending unaries always do.
                while let Some(top) = ops.last() {
                    match top {
                        OpEntry::Unary(u) => {
                            output.push(ExprElem::Unary(*u));
                            ops.pop();
                        }
                        OpEntry::Binary(b) if b.precedence() >= op.precedence() => {
                            output.push(ExprElem::Binary(*b));
                            ops.pop();
                        }
                        _ => break,
                    }
                }
                ops.push(OpEntry::Binary(op));
                expect_operand = true;
            } else if self.cursor.check(&TokenKind::RParen)
                && ops.iter().any(|e| matches!(e, OpEntry::OpenParen(_)))
            {
                self.cursor.advance();
                loop {
                    match ops.pop() {
                        Some(OpEntry::Binary(b)) => output.push(ExprElem::Binary(b)),
                        Some(OpEntry::Unary(u)) => output.push(ExprElem::Unary(u)),
                        Some(OpEntry::OpenParen(_)) => break,
                        None => unreachable!("matching paren checked above"),
                    }
                }
            } else {
                break;
            }
        }

        while let Some(entry) = ops.pop() {
            match entry {
                OpEntry::Binary(b) => output.push(ExprElem::Binary(b)),
                OpEntry::Unary(u) => output.push(ExprElem::Unary(u)),
                OpEntry::OpenParen(span) => {
                    return Err(ParseError::new(
                        ErrorCode::E1004,
                        "parentesis sin cerrar",
                        span,
                    ));
                }
            }
        }
        Ok(output)
    }

    /// Identifier in operand position: a call `f(…)`, an array load
    /// `v[…]`, or a scalar load.
    fn parse_invocation(&mut self, name: Name, span: Span) -> Result<ExprElem, ParseError> {
        self.cursor.advance();
        match self.cursor.current_kind() {
            TokenKind::LParen => {
                let args = self.parse_arg_list()?;
                let span = span.merge(self.cursor.previous_span());
                Ok(ExprElem::Call { name, args, span })
            }
            TokenKind::LBracket => {
                let indices = self.parse_index_list()?;
                let span = span.merge(self.cursor.previous_span());
                Ok(ExprElem::Load {
                    name,
                    indices,
                    span,
                })
            }
            _ => Ok(ExprElem::Load {
                name,
                indices: Vec::new(),
                span,
            }),
        }
    }

    /// Parse `( [expr {, expr}] )` into an argument list.
    pub(crate) fn parse_arg_list(&mut self) -> Result<Vec<RpnExpr>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Parse `[ expr {, expr} ]` into an index list.
    pub(crate) fn parse_index_list(&mut self) -> Result<Vec<RpnExpr>, ParseError> {
        self.cursor.expect(&TokenKind::LBracket)?;
        let mut indices = Vec::new();
        loop {
            indices.push(self.parse_expr()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(indices)
    }
}

/// Map an operator token to its binary operator, if it is one.
const fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::Ne => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Le => Some(BinaryOp::Le),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Ge => Some(BinaryOp::Ge),
        TokenKind::Y => Some(BinaryOp::And),
        TokenKind::O => Some(BinaryOp::Or),
        _ => None,
    }
}
