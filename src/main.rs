// Fetches a public scholar profile and draws its citations per year as a
// labelled bar chart, with total citations, h-index and i10-index in the title.

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod chart;
mod error;
mod extract;
mod fetch;
mod logger;
mod series;

use anyhow::{Context, Result};
use chart::{RenderConfig, RenderRequest};
use chrono::Local;
use clap::Parser;
use extract::ProfileDocument;
use fetch::{profile_url, ProfileFetcher, DEFAULT_SCHOLAR_URL};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

// CL arguments for config
#[derive(Parser, Debug)]
#[command(author, version, about = "Gets the citation bargraph of a Google Scholar profile", long_about = None)]
struct Args {
    scholar_id: String,

    #[arg(short = 's', long)]
    year_start: Option<i32>,

    #[arg(short = 'e', long)]
    year_end: Option<i32>,

    /// Output file (default: STARTYEAR_ENDYEAR_ABBREVIATEDNAME.svg)
    #[arg(short, long)]
    filename: Option<PathBuf>,

    #[arg(short = 'u', long, default_value = DEFAULT_SCHOLAR_URL)]
    gscholar_url: String,

    #[arg(long, default_value = "serif")]
    font_family: String,

    #[arg(long, default_value_t = false)]
    plain_text: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// "Jane Q. Public" -> "JQPublic"
fn abbreviate_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        Some((last, rest)) => rest
            .iter()
            .filter_map(|part| part.chars().next())
            .chain(last.chars())
            .collect(),
        None => String::new(),
    }
}

fn default_filename(year_start: i32, year_end: i32, name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.svg",
        year_start,
        year_end,
        abbreviate_name(name)
    ))
}

async fn run(args: Args) -> Result<PathBuf> {
    let url = profile_url(&args.gscholar_url, &args.scholar_id);
    let fetcher = ProfileFetcher::new()?;
    let body = fetcher
        .fetch(&url)
        .await
        .with_context(|| format!("could not fetch profile {}", args.scholar_id))?;

    let page = ProfileDocument::parse(&body);
    let series = page.citation_series()?;
    let identity = page.identity()?;
    let summary = page.summary()?;
    info!(
        name = %identity.name,
        first = series.first_year(),
        last = series.last_year(),
        "profile parsed"
    );

    let selected = series.select(args.year_start, args.year_end)?;
    info!(
        from = selected.first_year(),
        to = selected.last_year(),
        years = selected.len(),
        "range selected"
    );

    let path = args.filename.unwrap_or_else(|| {
        default_filename(selected.first_year(), selected.last_year(), &identity.name)
    });
    let config = RenderConfig {
        font_family: args.font_family,
        math_rendering: !args.plain_text,
    };
    let request = RenderRequest {
        series: &selected,
        identity: &identity,
        summary: &summary,
        source: &url,
        fetched_on: Local::now().date_naive(),
    };
    chart::render(&path, &request, &config)
        .with_context(|| format!("could not produce chart {}", path.display()))?;

    Ok(path)
}

// Parse CL arguments, fetch, extract, select and render
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match run(args).await {
        Ok(path) => {
            info!(path = %path.display(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
