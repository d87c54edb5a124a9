use std::env;
use std::process::ExitCode;

use hellenic_morph::{MorphDecoder, Source};
use hellenic_types::GrammarModel;

const USAGE: &str =
    "usage: cargo run -p hellenic-morph --example decode -- <lxx|perseus|tischendorf> <code> [lemma]";

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (Some(source), Some(code)) = (args.next(), args.next()) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let lemma = args.next().unwrap_or_default();

    let source: Source = match source.parse() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let grammar = GrammarModel::greek();
    let decoder = source.decoder(&grammar);

    println!("Source: {source}");
    match decoder.decode(&code, &lemma) {
        Ok(Some(tag)) => {
            println!("  {code:<12} {tag}");
            for inflection in &tag.inflections {
                println!("    {:<8} {}", inflection.category.key(), inflection.name);
            }
        }
        Ok(None) => println!("  {code:<12} (skipped by source convention)"),
        Err(err) => {
            eprintln!("  {code:<12} error: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
