use crate::types::OutputFormat;
use anyhow::Result;
use devlens_server::Config;
use devlens_trace::{Categorizer, ExceptionAnalyzer};
use devlens_types::ExceptionReport;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::Path;

pub fn handle(config: &Config, file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let frames: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    let report = ExceptionReport {
        class_name: "Trace".to_string(),
        message: format!("{} frames", frames.len()),
        frames,
    };
    let analyzer = ExceptionAnalyzer::new(report, Categorizer::new(&config.project_root));
    let trace = analyzer.grouped_trace();

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(trace)?);
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    for group in &trace.groups {
        let label = group.category.label();
        if color {
            println!("{}", label.bold().underline());
        } else {
            println!("== {} ==", label);
        }
        for frame in &group.frames {
            match (&frame.file, frame.line) {
                (Some(file), Some(line)) => {
                    let location = format!("{}:{}", file, line);
                    match &frame.method {
                        Some(method) => println!("  {}  in {}", location, method),
                        None => println!("  {}", location),
                    }
                }
                _ => println!("  {}", frame.raw),
            }
        }
    }

    Ok(())
}
