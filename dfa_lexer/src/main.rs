use dfa_lexer::config::compile_time::lexical as lexical_limits;
use dfa_lexer::config::{build_info, RuntimeConfig};
use dfa_lexer::lexical::{self, Scanner};
use dfa_lexer::logging::{self, codes};
use dfa_lexer::{log_info, Automaton, ExplicitAutomaton, Strategy, TableAutomaton, Token};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct Options {
    strategy: Option<Strategy>,
    compare: bool,
    json: bool,
    metrics: bool,
    config: Option<PathBuf>,
    help: bool,
    input: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("dfa_lexer");

    let options = match parse_options(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [OPTIONS] <INPUT>", program);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }

    let runtime = match &options.config {
        Some(path) => RuntimeConfig::from_file(path).map_err(|e| {
            logging::safe_log_error(codes::config::CONFIG_LOAD_FAILED, &e.to_string());
            e
        })?,
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    lexical::validate_automata()?;

    let Some(input) = options.input.clone() else {
        eprintln!("Error: input string argument missing");
        eprintln!("Usage: {} [OPTIONS] <INPUT>", program);
        std::process::exit(2);
    };
    let strategy = options
        .strategy
        .unwrap_or(runtime.scanner.default_strategy);

    log_info!("Scanning input",
        "strategy" => if options.compare { "both" } else { strategy.as_str() },
        "characters" => input.chars().count()
    );

    if options.compare {
        return match lexical::compare_strategies(&input) {
            Ok(stream) => {
                for token in stream.iter() {
                    print_token(token, &input, options.json)?;
                }
                println!("Strategies agree on {} tokens", stream.len());
                Ok(())
            }
            Err(e) => {
                eprintln!("Error [{}]: {}", e.error_code(), e);
                std::process::exit(1);
            }
        };
    }

    let mut preferences = runtime.scanner;
    preferences.collect_metrics |= options.metrics;

    match strategy {
        Strategy::Explicit => run(
            Scanner::with_preferences(&input, ExplicitAutomaton::new(), preferences),
            &input,
            &options,
        ),
        Strategy::Table => run(
            Scanner::with_preferences(&input, TableAutomaton::new(), preferences),
            &input,
            &options,
        ),
    }
}

/// Print tokens as they are scanned; the first error ends the run
fn run<A: Automaton>(
    mut scanner: Scanner<A>,
    input: &str,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    for result in scanner.by_ref() {
        match result {
            Ok(token) if token.kind.is_end() => break,
            Ok(token) => print_token(&token, input, options.json)?,
            Err(e) => {
                eprintln!("Error [{}]: {}", e.error_code(), e);
                std::process::exit(1);
            }
        }
    }

    if options.metrics {
        let metrics = scanner.metrics();
        if options.json {
            println!("{}", serde_json::to_string(metrics)?);
        } else {
            println!("Scanner: {}", scanner.automaton().name());
            println!("  Tokens: {}", metrics.total_tokens);
            println!("    WS: {}", metrics.whitespace_tokens);
            println!("    ID: {}", metrics.identifier_tokens);
            println!("    INT: {}", metrics.keyword_tokens);
            println!("  Transitions: {}", metrics.transitions);
            println!("  Pushbacks: {}", metrics.pushbacks);
            println!("  Characters consumed: {}", metrics.chars_consumed);
        }
    }

    Ok(())
}

fn print_token(token: &Token, input: &str, json: bool) -> Result<(), serde_json::Error> {
    if json {
        let value = serde_json::json!({
            "kind": token.kind,
            "label": token.kind.label(),
            "span": token.span,
            "lexeme": token.lexeme(input),
        });
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("Found token: {}", token.kind.label());
    }
    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--compare" => options.compare = true,
            "--json" => options.json = true,
            "--metrics" => options.metrics = true,
            "--strategy" => {
                let value = args
                    .get(i + 1)
                    .ok_or("--strategy requires a value (explicit or table)")?;
                options.strategy = Some(value.parse().map_err(|e| format!("{}", e))?);
                i += 1;
            }
            "--config" => {
                let value = args.get(i + 1).ok_or("--config requires a file path")?;
                options.config = Some(PathBuf::from(value));
                i += 1;
            }
            // Everything after `--` is input, even if it looks like an option
            "--" => {
                for arg in &args[i + 1..] {
                    set_input(&mut options, arg)?;
                }
                break;
            }
            arg if arg.starts_with("--") => return Err(format!("Unknown option '{}'", arg)),
            arg => set_input(&mut options, arg)?,
        }
        i += 1;
    }

    Ok(options)
}

fn set_input(options: &mut Options, arg: &str) -> Result<(), String> {
    if options.input.is_some() {
        return Err(format!(
            "Unexpected argument '{}'; quote the input to scan spaces",
            arg
        ));
    }
    options.input = Some(arg.to_string());
    Ok(())
}

fn print_help(program_name: &str) {
    println!("DFA Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Longest-match scanner for whitespace, identifiers and the keyword 'int'");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <INPUT>", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <INPUT>    Text to scan: lowercase letters and spaces");
    println!();
    println!("OPTIONS:");
    println!("    --help               Show this help message");
    println!("    --strategy <NAME>    Automaton to use: explicit or table");
    println!("    --compare            Run both automata and require identical tokens");
    println!("    --json               Print one JSON object per token");
    println!("    --metrics            Print scanner metrics after the tokens");
    println!("    --config <FILE>      Load runtime preferences from a TOML file");
    println!();
    println!("OUTPUT:");
    println!("    Found token: WS | ID | INT    one line per token");
    println!("    Exit status 1 on an illegal character or unmatched input");
    println!();
    println!("LIMITS:");
    println!(
        "    {} characters per input ({})",
        lexical_limits::MAX_INPUT_LENGTH,
        build_info::source_info()
    );
    println!();
    println!("EXAMPLES:");
    println!("    {} \"i in int intx\"", program_name);
    println!("    {} --strategy explicit --metrics \"int x\"", program_name);
    println!("    {} --compare --json \"intint int\"", program_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options =
            parse_options(&args(&["--strategy", "explicit", "--json", "i in"])).unwrap();
        assert_eq!(options.strategy, Some(Strategy::Explicit));
        assert!(options.json);
        assert!(!options.compare);
        assert_eq!(options.input.as_deref(), Some("i in"));
    }

    #[test]
    fn test_double_dash_ends_options() {
        let options = parse_options(&args(&["--metrics", "--", "--json"])).unwrap();
        assert!(options.metrics);
        assert!(!options.json);
        assert_eq!(options.input.as_deref(), Some("--json"));
    }

    #[test]
    fn test_invalid_options() {
        assert!(parse_options(&args(&["--strategy"])).is_err());
        assert!(parse_options(&args(&["--strategy", "regex"])).is_err());
        assert!(parse_options(&args(&["--verbose"])).is_err());
        assert!(parse_options(&args(&["i", "in"])).is_err());
    }
}
