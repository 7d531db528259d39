//! Analyze command - answer questions about a single policy document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use pqa_core::models::config::PqaConfig;
use pqa_core::{
    load_document, AnalysisRequest, AnalysisResponse, AnalysisResult, PolicyAnalyzer,
    QuestionAnswerer,
};

use super::config::load_config;
use crate::fetch::fetch_document;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Document location: a file path or an http(s) URL
    #[arg(required_unless_present = "request")]
    location: Option<String>,

    /// Question to answer (repeatable)
    #[arg(short = 'q', long = "question")]
    questions: Vec<String>,

    /// File with questions: a JSON array or one question per line
    #[arg(long = "questions")]
    questions_file: Option<PathBuf>,

    /// Request file: {"documents": "<location>", "questions": [...]}
    #[arg(long)]
    request: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show per-answer confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let request = match &args.request {
        Some(path) => Some(read_request(path)?),
        None => None,
    };

    let location = args
        .location
        .clone()
        .or_else(|| request.as_ref().map(|r| r.documents.clone()))
        .ok_or_else(|| anyhow::anyhow!("No document location given"))?;

    let mut questions = request.map(|r| r.questions).unwrap_or_default();
    if let Some(path) = &args.questions_file {
        questions.extend(read_questions(path)?);
    }
    questions.extend(args.questions.iter().cloned());

    if questions.is_empty() {
        anyhow::bail!("No questions given. Use -q, --questions or --request.");
    }

    info!("Analyzing {} with {} questions", location, questions.len());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Fetching document...");
    pb.set_position(10);
    let data = fetch_document(&location, &config).await?;

    pb.set_message("Extracting text...");
    pb.set_position(40);
    let result = analyze_bytes(&data, &questions, &config)?;

    pb.set_position(100);
    pb.finish_and_clear();

    let output = format_result(&result, args.format, args.show_confidence)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load a document from raw bytes and answer `questions` about it.
pub fn analyze_bytes(
    data: &[u8],
    questions: &[String],
    config: &PqaConfig,
) -> anyhow::Result<AnalysisResult> {
    let document = load_document(data, &config.document)?;
    if document.is_empty() {
        warn!("No text could be extracted from the document");
    }

    let analyzer = PolicyAnalyzer::from_config(&config.engine);
    Ok(analyzer.analyze(&document.text, questions))
}

fn read_request(path: &Path) -> anyhow::Result<AnalysisRequest> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid request file {}: {}", path.display(), e))
}

/// Read questions from a JSON array file or a plain list with one question
/// per line. Blank lines and lines starting with `#` are skipped.
pub fn read_questions(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_questions(&content))
}

fn parse_questions(content: &str) -> Vec<String> {
    if content.trim_start().starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(content) {
            return list;
        }
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Render an analysis in the requested format.
pub fn format_result(
    result: &AnalysisResult,
    format: OutputFormat,
    show_confidence: bool,
) -> anyhow::Result<String> {
    let mut response = AnalysisResponse::from_result(result);
    if show_confidence {
        response = response.with_confidence(result);
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&response)?),
        OutputFormat::Csv => format_csv(&response),
        OutputFormat::Text => Ok(format_text(&response)),
    }
}

fn format_csv(response: &AnalysisResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let with_confidence = response.results.iter().any(|r| r.confidence.is_some());

    if with_confidence {
        wtr.write_record(["question", "answer", "confidence"])?;
    } else {
        wtr.write_record(["question", "answer"])?;
    }

    for entry in &response.results {
        if with_confidence {
            let confidence = format!("{:.2}", entry.confidence.unwrap_or_default());
            wtr.write_record([
                entry.question.as_str(),
                entry.answer.as_str(),
                confidence.as_str(),
            ])?;
        } else {
            wtr.write_record([entry.question.as_str(), entry.answer.as_str()])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &AnalysisResponse) -> String {
    let mut output = String::new();

    for (i, entry) in response.results.iter().enumerate() {
        output.push_str(&format!("Q{}: {}\n", i + 1, entry.question));
        output.push_str(&format!("A{}: {}\n", i + 1, entry.answer));
        if let Some(confidence) = entry.confidence {
            output.push_str(&format!("    confidence: {:.2}\n", confidence));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Found {}/{} ({:.1}%)\n",
        response.found_count, response.total_questions, response.accuracy
    ));
    output.push_str(&format!("{}\n", response.timestamp));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_lines() {
        let content = "# policy questions\nWhat is the grace period?\n\n  Is AYUSH covered?  \n";
        assert_eq!(
            parse_questions(content),
            vec!["What is the grace period?", "Is AYUSH covered?"]
        );
    }

    #[test]
    fn test_parse_questions_json() {
        let content = r#"["What is the NCD?", "Define hospital"]"#;
        assert_eq!(parse_questions(content), vec!["What is the NCD?", "Define hospital"]);
    }

    #[test]
    fn test_analyze_bytes_text_document() {
        let questions = vec!["What is the grace period?".to_string()];
        let result = analyze_bytes(
            b"A grace period of 30 days is allowed.",
            &questions,
            &PqaConfig::default(),
        )
        .unwrap();

        assert_eq!(result.found_count, 1);
        assert_eq!(result.answers[0].text, "Grace period: 30 days");
    }

    #[test]
    fn test_format_csv_with_confidence() {
        let questions = vec!["What is the grace period?".to_string()];
        let result = analyze_bytes(
            b"A grace period of 30 days is allowed.",
            &questions,
            &PqaConfig::default(),
        )
        .unwrap();

        let csv = format_result(&result, OutputFormat::Csv, true).unwrap();
        assert!(csv.starts_with("question,answer,confidence\n"));
        assert!(csv.contains("Grace period: 30 days,0.95"));
    }
}
