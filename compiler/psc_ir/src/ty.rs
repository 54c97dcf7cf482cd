//! Declared variable types.

use std::fmt;

/// The declared type of a variable, parameter, or function result.
///
/// `caracter` and `cadena` are distinct declarations but share the string
/// value representation at run time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Entero,
    Real,
    Logico,
    Caracter,
    Cadena,
}

impl Type {
    /// The (unaccented) source keyword for this type.
    pub const fn keyword(self) -> &'static str {
        match self {
            Type::Entero => "entero",
            Type::Real => "real",
            Type::Logico => "logico",
            Type::Caracter => "caracter",
            Type::Cadena => "cadena",
        }
    }

    /// Whether values of this type are stored as strings.
    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(self, Type::Caracter | Type::Cadena)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
