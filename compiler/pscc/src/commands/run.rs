//! The `run` command: full pipeline, then drive the interpreter against
//! stdin/stdout.

use std::io::{self, BufRead};

use psc_eval::{lower, Event, Interpreter};
use psc_ir::{StringInterner, Type, Value};

use super::{frontend, read_file};

/// Run a PsC source file. One line of stdin answers each read request;
/// each write lands on its own stdout line.
pub fn run_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let Some(checked) = frontend(path, &source, &interner) else {
        std::process::exit(1);
    };

    let program = lower(checked, &interner);
    let mut interpreter = Interpreter::new(program, &interner);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match interpreter.run_to_event() {
            Event::Started | Event::Resumed => {}
            Event::Write(value) => println!("{value}"),
            Event::Read { ty } => {
                let Some(line) = lines.next() else {
                    eprintln!("error: el programa espera entrada pero stdin se agoto");
                    std::process::exit(1);
                };
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        eprintln!("error: no se pudo leer stdin: {error}");
                        std::process::exit(1);
                    }
                };
                match parse_input(line.trim(), ty) {
                    Ok(value) => {
                        interpreter.provide_input(value);
                    }
                    Err(message) => {
                        eprintln!("error: {message}");
                        std::process::exit(1);
                    }
                }
            }
            // Reads are answered before stepping again.
            Event::Paused => unreachable!("driver always answers reads immediately"),
            Event::Finished => break,
            Event::EvaluationError(error) => {
                eprintln!("error[{}]: {error}", error.code());
                std::process::exit(1);
            }
        }
    }
}

/// Parse one input line against the requested type.
fn parse_input(line: &str, ty: Type) -> Result<Value, String> {
    match ty {
        Type::Entero => line
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("se esperaba un entero, se recibio '{line}'")),
        Type::Real => line
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| format!("se esperaba un real, se recibio '{line}'")),
        Type::Logico => match line.to_lowercase().as_str() {
            "verdadero" | "v" | "si" => Ok(Value::Bool(true)),
            "falso" | "f" | "no" => Ok(Value::Bool(false)),
            _ => Err(format!("se esperaba verdadero o falso, se recibio '{line}'")),
        },
        Type::Caracter | Type::Cadena => Ok(Value::Str(line.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use psc_ir::{Type, Value};

    use super::parse_input;

    #[test]
    fn parses_by_requested_type() {
        assert_eq!(parse_input("42", Type::Entero), Ok(Value::Int(42)));
        assert_eq!(parse_input("2.5", Type::Real), Ok(Value::Real(2.5)));
        assert_eq!(parse_input("Verdadero", Type::Logico), Ok(Value::Bool(true)));
        assert_eq!(
            parse_input("hola", Type::Cadena),
            Ok(Value::Str("hola".to_owned())),
        );
    }

    #[test]
    fn rejects_mismatched_input() {
        assert!(parse_input("hola", Type::Entero).is_err());
        assert!(parse_input("3", Type::Logico).is_err());
    }
}
