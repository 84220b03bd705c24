#[macro_use] extern crate log;

use std::{env, fs, process};

use prolog_encoder::{BoxedErrorTrait, Reader, ReaderOptions, SymbolTable};

const USAGE: &str = "usage: prolog-encoder <source.pl> [--config reader.toml] [--symbols symbols.toml]";

fn main() {
    pretty_env_logger::init();
    if let Err(why) = run() {
        eprintln!("{}", why);
        process::exit(1);
    }
}

fn run() -> Result<(), BoxedErrorTrait> {
    let mut args = env::args().skip(1);
    let mut source_path = None;
    let mut config_path = None;
    let mut symbols_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().ok_or(USAGE)?),
            "--symbols" => symbols_path = Some(args.next().ok_or(USAGE)?),
            _ if source_path.is_none() => source_path = Some(arg),
            _ => return Err(USAGE.into()),
        }
    }
    let source_path = source_path.ok_or(USAGE)?;

    let options = match config_path {
        Some(path) => ReaderOptions::load(path)?,
        None => ReaderOptions::default(),
    };
    let symbols = match symbols_path {
        Some(path) => Some(SymbolTable::load(path)?),
        None => None,
    };
    let source = fs::read_to_string(&source_path)?;
    info!("read {} bytes from {}", source.len(), source_path);

    let reader = Reader::new(options);
    let mut parsed = 0;
    let mut failed = 0;
    for result in reader.clauses(&source) {
        let clause = match result {
            Ok(clause) => clause,
            Err(why) => {
                error!("{}", why);
                failed += 1;
                continue;
            }
        };
        parsed += 1;
        println!("{}", clause);
        if let Some(symbols) = &symbols {
            let goals = std::iter::once(&clause.head).chain(clause.body.iter());
            for goal in goals {
                match goal.encode(symbols) {
                    Ok(codes) => println!("    {:?}", codes),
                    Err(why) => error!("could not encode `{}`: {}", goal, why),
                }
            }
        }
    }
    info!("parsed {} clauses, {} failed", parsed, failed);
    if failed > 0 {
        return Err(format!("{} of {} clauses failed to parse", failed, parsed + failed).into());
    }
    Ok(())
}
