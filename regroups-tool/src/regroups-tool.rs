#![allow(clippy::uninlined_format_args)]

use regroups::{AnalysisCache, Flags, ParseOutcome, Requiredness};
use std::{fs, path::PathBuf, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "regroups-tool")]
struct Opt {
    /// The regular expression.
    #[structopt(required_unless = "file")]
    pattern: Option<String>,

    /// The flags of the regular expression, like "gu".
    #[structopt(long, short)]
    flags: Option<Flags>,

    /// Analyze each line of a specified file as a pattern.
    #[structopt(long, conflicts_with = "pattern")]
    file: Option<PathBuf>,
}

fn describe(req: Requiredness) -> &'static str {
    if req.is_required() {
        "required"
    } else {
        "optional"
    }
}

/// Print the outcome for \p pattern.
/// \return whether the pattern was valid.
fn report(pattern: &str, flags: Flags, outcome: &ParseOutcome) -> bool {
    println!("/{}/{}", pattern, flags);
    match outcome {
        ParseOutcome::Success { groups } if groups.is_empty() => {
            println!("  no named groups");
            true
        }
        ParseOutcome::Success { groups } => {
            for (name, req) in groups {
                println!("  {}: {}", name, describe(*req));
            }
            true
        }
        ParseOutcome::Failure { diagnostics } => {
            for diag in diagnostics {
                eprintln!("  {}", diag);
            }
            false
        }
    }
}

fn main() {
    let args = Opt::from_args();
    let flags = args.flags.unwrap_or_default();

    let contents;
    let patterns: Vec<&str> = if let Some(ref path) = args.file {
        contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("{}: {}", err, path.display());
                process::exit(1);
            }
        };
        contents.lines().filter(|line| !line.is_empty()).collect()
    } else {
        args.pattern.iter().map(String::as_str).collect()
    };

    let mut cache = AnalysisCache::new();
    let mut all_valid = true;
    for pattern in patterns {
        let outcome = cache.analyze(pattern);
        all_valid &= report(pattern, flags, outcome);
    }
    if !all_valid {
        process::exit(1);
    }
}
