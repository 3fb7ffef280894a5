use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kst-cli",
    about = "Read KST record documents and numeric tokens",
    version
)]
struct Args {
    /// Value separator, literal text or a regular expression
    #[arg(long, default_value = kst::options::DEFAULT_SEPARATOR)]
    separator: String,

    /// Record terminator, literal text or a regular expression
    #[arg(long, default_value = kst::options::DEFAULT_TERMINATOR)]
    terminator: String,

    /// Pretty-print JSON on output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Print record and value counts instead of the document
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Interpret each token as a number and print the integer and real readings
    #[arg(long, num_args = 1.., value_name = "TOKEN", allow_hyphen_values = true)]
    eval: Vec<String>,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.eval.is_empty() {
        for token in &args.eval {
            println!("{}", eval_token(token));
        }
        return Ok(());
    }

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_end(&mut buf)?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }
    let text = kst::reader::normalize_text(&buf);

    let options = kst::Options::new(&args.separator, &args.terminator)?;
    let reader = kst::read_from_str(&text, &options).context("invalid document")?;

    if args.summary {
        println!("records: {}", reader.record_count());
        for (i, record) in reader.records().iter().enumerate() {
            println!("record {i}: {} values", record.len());
        }
    } else {
        println!("{}", kst::json::to_string(&reader, args.pretty)?);
    }

    Ok(())
}

fn eval_token(token: &str) -> String {
    let lower = token.to_lowercase();
    let long = kst::parse_long(&lower).map_or_else(|| "-".to_string(), |v| v.to_string());
    let real = kst::parse_real(&lower).map_or_else(|| "-".to_string(), kst::number::format_real);
    format!("{token}\t{long}\t{real}")
}
