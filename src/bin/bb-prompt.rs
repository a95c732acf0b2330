use bb_league::dataset::{DataFormat, Dataset};
use bb_league::prompt::{self, PromptInputs};
use bb_league::{LeagueInfo, Narrative};
use std::path::PathBuf;
use std::process::ExitCode;

/// Everything the flags can carry. League name and the report framing are
/// required; lore and the CSV dataset are optional extras.
#[derive(Debug, Default)]
struct Args {
    league: String,
    lore: String,
    csv: Option<PathBuf>,
    bullets: bool,
    inputs: PromptInputs,
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            return ExitCode::from(2);
        }
    };

    let mut missing = Vec::new();
    if args.inputs.report_type.trim().is_empty() {
        missing.push("Type of Report".to_string());
    }
    if args.league.trim().is_empty() {
        missing.push("League Name".to_string());
    }
    for field in args.inputs.validate() {
        if field != "Type of Report" && !missing.contains(&field) {
            missing.push(field);
        }
    }
    if !missing.is_empty() {
        eprintln!("The following fields are required: {}", missing.join(", "));
        return ExitCode::from(2);
    }

    let dataset = match &args.csv {
        Some(path) => match Dataset::from_path(path) {
            Ok(data) => Some(data),
            Err(e) => {
                eprintln!("Error reading the CSV file {}: {e}", path.display());
                return ExitCode::from(2);
            }
        },
        None => None,
    };
    let format = if args.bullets {
        DataFormat::BulletPoints
    } else {
        DataFormat::MarkdownTable
    };

    let info = LeagueInfo {
        name: args.league.trim().to_string(),
        description: String::new(),
    };
    let narratives: Vec<Narrative> = if args.lore.trim().is_empty() {
        Vec::new()
    } else {
        vec![Narrative {
            title: "Narrative and Lore".to_string(),
            description: args.lore.trim().to_string(),
            ..Default::default()
        }]
    };

    let prompt = prompt::assemble(
        &info,
        &[],
        &[],
        &[],
        &[],
        &narratives,
        &args.inputs,
        dataset.as_ref().map(|d| (d, format)),
    );
    print!("{prompt}");
    ExitCode::SUCCESS
}

/// `Ok(None)` means --help was handled; `Err` is a usage problem.
fn parse_args() -> Result<Option<Args>, String> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);

    while let Some(flag) = raw.next() {
        let mut value_for = |name: &str| {
            raw.next()
                .ok_or_else(|| format!("Missing value for {name}"))
        };
        match flag.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return Ok(None);
            }
            "--league" => args.league = value_for("--league")?,
            "--report-type" => args.inputs.report_type = value_for("--report-type")?,
            "--reporter" => args.inputs.reporter_name = value_for("--reporter")?,
            "--reporter-desc" => {
                args.inputs.reporter_description = value_for("--reporter-desc")?;
            }
            "--tone" => args.inputs.tone_style = value_for("--tone")?,
            "--format" => args.inputs.format_length = value_for("--format")?,
            "--details" => args.inputs.additional_details = value_for("--details")?,
            "--lore" => args.lore = value_for("--lore")?,
            "--csv" => args.csv = Some(PathBuf::from(value_for("--csv")?)),
            "--bullets" => args.bullets = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(Some(args))
}

fn usage_text() -> &'static str {
    "bb-prompt - one-shot Blood Bowl report prompt generator

Usage:
  bb-prompt --league NAME --report-type TYPE --reporter NAME \\
            --reporter-desc TEXT --tone TEXT --format TEXT \\
            [--details TEXT] [--lore TEXT] [--csv FILE] [--bullets]

Options:
  --league NAME         League name (required)
  --report-type TYPE    e.g. \"Match Summary\", \"Season Recap\" (required)
  --reporter NAME       Reporter character name (required)
  --reporter-desc TEXT  Reporter personality and quirks (required)
  --tone TEXT           e.g. \"humorous and satirical\" (required)
  --format TEXT         e.g. \"Newspaper article, about 500 words\" (required)
  --details TEXT        Quotes or events to highlight
  --lore TEXT           Narrative and lore to include
  --csv FILE            League data CSV, interpolated into the prompt
  --bullets             Render the CSV as bullet points (default: table)

The assembled prompt is printed to stdout for piping or copy-out."
}
