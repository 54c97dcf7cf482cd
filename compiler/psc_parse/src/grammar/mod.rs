//! Program structure grammar: modules, parameter lists, declarations.

mod expr;
mod stmt;

use psc_diagnostic::ErrorCode;
use psc_ir::{
    Decl, ModuleDef, ModuleKind, Param, SourceProgram, TokenKind, Type, MAIN_MODULE,
};
use tracing::debug;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole file: any number of callables plus exactly one main
    /// block, in any order.
    pub fn parse_program(mut self) -> (SourceProgram, Vec<ParseError>) {
        let mut program = SourceProgram::default();
        let mut main_seen = false;

        self.cursor.skip_newlines();
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::Funcion => match self.parse_callable(true) {
                    Ok(module) => program.modules.push(module),
                    Err(e) => {
                        self.errors.push(e);
                        self.sync_to_module_boundary();
                    }
                },
                TokenKind::Procedimiento => match self.parse_callable(false) {
                    Ok(module) => program.modules.push(module),
                    Err(e) => {
                        self.errors.push(e);
                        self.sync_to_module_boundary();
                    }
                },
                TokenKind::Variables | TokenKind::Inicio => {
                    if main_seen {
                        self.errors.push(ParseError::new(
                            ErrorCode::E1005,
                            "el bloque principal ya fue definido",
                            self.cursor.current_span(),
                        ));
                        self.sync_to_module_boundary();
                    } else {
                        main_seen = true;
                        match self.parse_main() {
                            Ok(module) => program.modules.push(module),
                            Err(e) => {
                                self.errors.push(e);
                                self.sync_to_module_boundary();
                            }
                        }
                    }
                }
                other => {
                    self.errors.push(ParseError::new(
                        ErrorCode::E1003,
                        format!("se esperaba una definicion de modulo, se encontro {other}"),
                        self.cursor.current_span(),
                    ));
                    self.sync_to_module_boundary();
                }
            }
            self.cursor.skip_newlines();
        }

        if !main_seen {
            self.errors.push(ParseError::new(
                ErrorCode::E1005,
                "falta el bloque principal (`inicio` ... `fin`)",
                self.cursor.current_span(),
            ));
        }

        debug!(
            modules = program.modules.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        (program, self.errors)
    }

    /// Parse `funcion nombre(params): tipo … finfuncion` or
    /// `procedimiento nombre(params) … finprocedimiento`.
    fn parse_callable(&mut self, is_function: bool) -> Result<ModuleDef, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.advance();

        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;

        let kind = if is_function {
            self.cursor.expect(&TokenKind::Colon)?;
            ModuleKind::Function {
                ret: self.expect_type()?,
            }
        } else {
            ModuleKind::Procedure
        };
        self.cursor.expect_newline()?;

        let decls = self.parse_variables_section()?;
        self.cursor.expect(&TokenKind::Inicio)?;
        self.cursor.expect_newline()?;

        let terminator = if is_function {
            TokenKind::FinFuncion
        } else {
            TokenKind::FinProcedimiento
        };
        let body = self.parse_stmts(&[terminator.clone()]);
        let end = self.cursor.expect(&terminator)?;

        Ok(ModuleDef {
            name,
            kind,
            params,
            decls,
            body,
            span: start.merge(end),
        })
    }

    /// Parse the main block: `[variables …] inicio … fin`.
    fn parse_main(&mut self) -> Result<ModuleDef, ParseError> {
        let start = self.cursor.current_span();
        let decls = self.parse_variables_section()?;
        self.cursor.expect(&TokenKind::Inicio)?;
        self.cursor.expect_newline()?;
        let body = self.parse_stmts(&[TokenKind::Fin]);
        let end = self.cursor.expect(&TokenKind::Fin)?;

        Ok(ModuleDef {
            name: self.cursor.interner().intern(MAIN_MODULE),
            kind: ModuleKind::Main,
            params: Vec::new(),
            decls,
            body,
            span: start.merge(end),
        })
    }

    /// Parse one `[var] tipo nombre` parameter.
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let start = self.cursor.current_span();
        let by_ref = self.cursor.eat(&TokenKind::Var);
        let ty = self.expect_type()?;
        let (name, span) = self.cursor.expect_ident()?;
        Ok(Param {
            name,
            ty,
            by_ref,
            span: start.merge(span),
        })
    }

    /// Parse an optional `variables` section into a declaration list.
    fn parse_variables_section(&mut self) -> Result<Vec<Decl>, ParseError> {
        let mut decls = Vec::new();
        if !self.cursor.eat(&TokenKind::Variables) {
            return Ok(decls);
        }
        self.cursor.expect_newline()?;

        while let Some(ty) = self.cursor.current_kind().as_type() {
            self.cursor.advance();
            loop {
                decls.push(self.parse_decl(ty)?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect_newline()?;
        }
        Ok(decls)
    }

    /// Parse one declarator: `nombre` or `nombre[d0, d1]`.
    fn parse_decl(&mut self, ty: Type) -> Result<Decl, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        let mut dims = Vec::new();
        if self.cursor.eat(&TokenKind::LBracket) {
            loop {
                dims.push(self.expect_dimension()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RBracket)?;
        }
        Ok(Decl {
            name,
            ty,
            dims,
            span,
        })
    }

    /// Parse one constant array dimension (a positive integer literal).
    fn expect_dimension(&mut self) -> Result<u32, ParseError> {
        let span = self.cursor.current_span();
        if let TokenKind::Int(n) = *self.cursor.current_kind() {
            self.cursor.advance();
            return u32::try_from(n).ok().filter(|&d| d >= 1).ok_or_else(|| {
                ParseError::new(
                    ErrorCode::E1006,
                    format!("dimension invalida: {n}"),
                    span,
                )
            });
        }
        Err(ParseError::new(
            ErrorCode::E1006,
            "las dimensiones deben ser literales enteros",
            span,
        ))
    }

    /// Consume a type keyword.
    fn expect_type(&mut self) -> Result<Type, ParseError> {
        if let Some(ty) = self.cursor.current_kind().as_type() {
            self.cursor.advance();
            return Ok(ty);
        }
        Err(ParseError::new(
            ErrorCode::E1001,
            format!(
                "se esperaba un tipo, se encontro {}",
                self.cursor.current_kind()
            ),
            self.cursor.current_span(),
        ))
    }

    /// Skip to the next plausible module start (error recovery).
    fn sync_to_module_boundary(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            self.cursor.sync_to_next_line();
            if matches!(
                self.cursor.current_kind(),
                TokenKind::Funcion
                    | TokenKind::Procedimiento
                    | TokenKind::Variables
                    | TokenKind::Inicio
                    | TokenKind::Eof
            ) {
                return;
            }
        }
    }
}
