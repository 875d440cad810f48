// ABOUTME: CLI binary for the blogdate extraction engine.
// ABOUTME: Reads an HTML file (or stdin) and prints the extracted publish date.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use blogdate::{Engine, SiteRegistry};

#[derive(Parser, Debug)]
#[command(name = "blogdate")]
#[command(about = "Extract the publish date from a saved blog-post HTML document")]
struct Args {
    /// Site identifier, e.g. "toss" or "kakao"
    #[arg(short = 's', long = "site")]
    site: String,

    /// HTML file to read, or "-" for stdin
    #[arg(long = "html")]
    html: PathBuf,

    /// Source URL of the post (consulted by the known-bad-URL overrides)
    #[arg(long = "url")]
    url: Option<String>,

    /// Run the structured-metadata fallback when the selector path fails
    #[arg(long = "structured")]
    structured: bool,

    /// Load selector rules from a JSON file instead of the builtin table
    #[arg(long = "selectors")]
    selectors: Option<PathBuf>,

    /// Output a JSON object instead of a bare date
    #[arg(long = "json")]
    json_output: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    site: &'a str,
    url: Option<&'a str>,
    published_at: Option<NaiveDate>,
}

fn read_html(path: &PathBuf) -> std::io::Result<String> {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let html = match read_html(&args.html) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("error reading {:?}: {}", args.html, e);
            return ExitCode::from(1);
        }
    };

    let mut builder = Engine::builder().structured_fallback(args.structured);
    if let Some(path) = &args.selectors {
        match SiteRegistry::from_file(path) {
            Ok(registry) => builder = builder.registry(registry),
            Err(e) => {
                eprintln!("error loading selectors: {}", e);
                return ExitCode::from(1);
            }
        }
    }
    let engine = builder.build();

    let date = engine.extract_publish_date(&html, &args.site, args.url.as_deref());

    if args.json_output {
        let out = Output {
            site: &args.site,
            url: args.url.as_deref(),
            published_at: date,
        };
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
    } else if let Some(date) = date {
        println!("{}", date);
    }

    match date {
        Some(_) => ExitCode::SUCCESS,
        None => {
            if !args.json_output {
                eprintln!("no publish date resolved for site {}", args.site);
            }
            ExitCode::from(1)
        }
    }
}
