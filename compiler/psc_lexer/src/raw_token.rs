//! Raw token definitions for the logos pass.

use logos::Logos;

/// Raw token from logos (before interning).
///
/// Keywords accept the accented Spanish spellings as alternates; both map
/// to the same token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    // Structure keywords
    #[token("variables")]
    Variables,
    #[token("inicio")]
    Inicio,
    #[token("fin")]
    Fin,
    #[token("funcion")]
    #[token("función")]
    Funcion,
    #[token("finfuncion")]
    #[token("finfunción")]
    FinFuncion,
    #[token("procedimiento")]
    Procedimiento,
    #[token("finprocedimiento")]
    FinProcedimiento,

    // Statement keywords
    #[token("si")]
    Si,
    #[token("entonces")]
    Entonces,
    #[token("sino")]
    Sino,
    #[token("finsi")]
    FinSi,
    #[token("mientras")]
    Mientras,
    #[token("hacer")]
    Hacer,
    #[token("finmientras")]
    FinMientras,
    #[token("hasta")]
    Hasta,
    #[token("finhasta")]
    FinHasta,
    #[token("para")]
    Para,
    #[token("finpara")]
    FinPara,
    #[token("retornar")]
    Retornar,
    #[token("var")]
    Var,

    // Type keywords
    #[token("entero")]
    Entero,
    #[token("real")]
    RealKw,
    #[token("logico")]
    #[token("lógico")]
    Logico,
    #[token("caracter")]
    #[token("carácter")]
    Caracter,
    #[token("cadena")]
    Cadena,

    // Literal keywords
    #[token("verdadero")]
    Verdadero,
    #[token("falso")]
    Falso,

    // Logical operators. The single-letter keywords tie with the `Ident`
    // char class at logos' default priorities, so they get an explicit bump.
    #[token("y", priority = 3)]
    Y,
    #[token("o", priority = 3)]
    O,
    #[token("no")]
    No,

    // Literals
    #[regex(r"[0-9]+\.[0-9]+")]
    Real,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""[^"\n]*""#, priority = 10)]
    Str,
    #[regex(r#""[^"\n]*"#)]
    UnterminatedStr,
    #[regex(r"[A-Za-z_ñÑáéíóúÁÉÍÓÚ][A-Za-z0-9_ñÑáéíóúÁÉÍÓÚ]*")]
    Ident,

    // Symbols
    #[token("<-")]
    Assign,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<>")]
    Ne,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
}
