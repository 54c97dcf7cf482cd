//! PsC toolchain CLI.

mod commands;

use commands::{check_file, run_file, tokens_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: psc run <file.psc>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: psc check <file.psc>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "tokens" => {
            if args.len() < 3 {
                eprintln!("Usage: psc tokens <file.psc>");
                std::process::exit(1);
            }
            tokens_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("psc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.psc` path runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("psc"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("PSC_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("PsC pseudocode interpreter");
    println!();
    println!("Usage: psc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.psc>     Run a PsC program (reads stdin, writes stdout)");
    println!("  check <file.psc>   Check a file without running it");
    println!("  tokens <file.psc>  Tokenize and display the token stream");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  PSC_LOG=<filter>   Enable tracing output (e.g. PSC_LOG=debug)");
    println!();
    println!("Examples:");
    println!("  psc run programa.psc");
    println!("  psc check programa.psc");
    println!("  PSC_LOG=psc_eval=trace psc run programa.psc");
}
