//! Statement grammar.

use psc_diagnostic::ErrorCode;
use psc_ir::{Name, Span, Stmt, StmtKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a statement list until one of `terminators` (or end of input)
    /// is the current token. Bad statements are recorded and the cursor
    /// resynchronizes to the next line.
    pub(crate) fn parse_stmts(&mut self, terminators: &[TokenKind]) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        self.cursor.skip_newlines();
        loop {
            if self.cursor.is_at_end() || terminators.iter().any(|t| self.cursor.check(t)) {
                break;
            }
            match self.parse_stmt() {
                Ok(stmt) => {
                    stmts.push(stmt);
                    if let Err(e) = self.cursor.expect_newline() {
                        self.errors.push(e);
                        self.cursor.sync_to_next_line();
                    }
                }
                Err(e) => {
                    self.errors.push(e);
                    self.cursor.sync_to_next_line();
                }
            }
        }
        stmts
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        match *self.cursor.current_kind() {
            TokenKind::Si => self.parse_if(start),
            TokenKind::Mientras => self.parse_while(start),
            TokenKind::Hasta => self.parse_until(start),
            TokenKind::Para => self.parse_for(start),
            TokenKind::Retornar => self.parse_return(start),
            TokenKind::Ident(name) => self.parse_ident_stmt(name, start),
            ref other => Err(ParseError::new(
                ErrorCode::E1003,
                format!("se esperaba una instruccion, se encontro {other}"),
                start,
            )),
        }
    }

    /// `si cond entonces … [sino …] finsi`
    fn parse_if(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Entonces)?;
        self.cursor.expect_newline()?;

        let then_body = self.parse_stmts(&[TokenKind::Sino, TokenKind::FinSi]);
        let else_body = if self.cursor.eat(&TokenKind::Sino) {
            self.cursor.expect_newline()?;
            self.parse_stmts(&[TokenKind::FinSi])
        } else {
            Vec::new()
        };
        let end = self.cursor.expect(&TokenKind::FinSi)?;

        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            start.merge(end),
        ))
    }

    /// `mientras cond hacer … finmientras`
    fn parse_while(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Hacer)?;
        self.cursor.expect_newline()?;
        let body = self.parse_stmts(&[TokenKind::FinMientras]);
        let end = self.cursor.expect(&TokenKind::FinMientras)?;
        Ok(Stmt::new(StmtKind::While { cond, body }, start.merge(end)))
    }

    /// `hasta cond hacer … finhasta` — body runs while the condition is
    /// false.
    fn parse_until(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Hacer)?;
        self.cursor.expect_newline()?;
        let body = self.parse_stmts(&[TokenKind::FinHasta]);
        let end = self.cursor.expect(&TokenKind::FinHasta)?;
        Ok(Stmt::new(StmtKind::Until { cond, body }, start.merge(end)))
    }

    /// `para i <- e1 hasta e2 hacer … finpara`
    fn parse_for(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let (counter, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Assign)?;
        let from = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Hasta)?;
        let to = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Hacer)?;
        self.cursor.expect_newline()?;
        let body = self.parse_stmts(&[TokenKind::FinPara]);
        let end = self.cursor.expect(&TokenKind::FinPara)?;
        Ok(Stmt::new(
            StmtKind::For {
                counter,
                from,
                to,
                body,
            },
            start.merge(end),
        ))
    }

    /// `retornar [expr]`
    fn parse_return(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        let value = if self.cursor.check(&TokenKind::Newline) || self.cursor.is_at_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Return { value }, span))
    }

    /// Statement starting with an identifier: assignment, indexed
    /// assignment, or call.
    fn parse_ident_stmt(&mut self, name: Name, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.advance();
        match self.cursor.current_kind() {
            TokenKind::Assign => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = start.merge(self.cursor.previous_span());
                Ok(Stmt::new(
                    StmtKind::Assign {
                        name,
                        indices: Vec::new(),
                        value,
                    },
                    span,
                ))
            }
            TokenKind::LBracket => {
                let indices = self.parse_index_list()?;
                self.cursor.expect(&TokenKind::Assign)?;
                let value = self.parse_expr()?;
                let span = start.merge(self.cursor.previous_span());
                Ok(Stmt::new(
                    StmtKind::Assign {
                        name,
                        indices,
                        value,
                    },
                    span,
                ))
            }
            TokenKind::LParen => {
                let args = self.parse_arg_list()?;
                let span = start.merge(self.cursor.previous_span());
                Ok(Stmt::new(StmtKind::Call { name, args }, span))
            }
            other => Err(ParseError::new(
                ErrorCode::E1001,
                format!("se esperaba `<-`, `[` o `(`, se encontro {other}"),
                self.cursor.current_span(),
            )),
        }
    }
}
