//! Error codes for all toolchain diagnostics.
//!
//! Each code is a unique identifier (e.g. `E1001`) whose first digit
//! indicates the phase that produced it.

use std::fmt;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Declarator / decorator errors
/// - E6xxx: Runtime / evaluation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Unterminated string literal
    E0002,
    /// Invalid number literal
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected statement
    E1003,
    /// Unclosed delimiter
    E1004,
    /// Missing or duplicate main block
    E1005,
    /// Invalid declaration
    E1006,

    // Declarator / Decorator Errors (E2xxx)
    /// Duplicate variable declaration
    E2001,
    /// Duplicate module name
    E2002,
    /// Undefined variable reference
    E2003,
    /// Undefined module reference
    E2004,
    /// Wrong number of call arguments
    E2005,
    /// Wrong number of array indices
    E2006,
    /// Indexing a scalar variable
    E2007,
    /// Array used without indices
    E2008,
    /// By-reference argument is not a variable
    E2009,
    /// `retornar` value/shape mismatch
    E2010,
    /// The main module is not callable
    E2011,
    /// `leer` target is not a variable
    E2012,
    /// Built-in call arity violation
    E2013,
    /// Function call used where a procedure is required (or vice versa)
    E2014,

    // Runtime Errors (E6xxx)
    /// Array index out of bounds
    E6001,
    /// Division by zero
    E6002,
    /// Operand kind mismatch
    E6003,
}

impl ErrorCode {
    /// The code as it appears in rendered diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
        }
    }

    /// The phase that raises this code.
    pub const fn phase(self) -> &'static str {
        match self {
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003 => "lexer",
            ErrorCode::E1001
            | ErrorCode::E1002
            | ErrorCode::E1003
            | ErrorCode::E1004
            | ErrorCode::E1005
            | ErrorCode::E1006 => "parser",
            ErrorCode::E6001 | ErrorCode::E6002 | ErrorCode::E6003 => "runtime",
            _ => "semantic",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
