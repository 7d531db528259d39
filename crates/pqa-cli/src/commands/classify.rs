//! Classify command - show how a question maps to answer categories.

use clap::Args;
use console::style;

use pqa_core::policy::QuestionClassifier;
use pqa_core::CategoryRegistry;

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Question to classify
    #[arg(required = true)]
    question: String,

    /// Print the ranking as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let registry = CategoryRegistry::builtin();
    let classification = QuestionClassifier::new(registry).classify(&args.question);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification.ranking)?);
        return Ok(());
    }

    if classification.is_unclassified() {
        println!(
            "{} Question does not match any category",
            style("✗").yellow()
        );
        return Ok(());
    }

    for (rank, scored) in classification.ranking.iter().enumerate() {
        let label = registry
            .get(scored.category)
            .map(|c| c.label())
            .unwrap_or_default();
        let line = format!(
            "{:>2}. {:<20} score {:>2}  {}",
            rank + 1,
            scored.category.as_str(),
            scored.score,
            label
        );

        if rank == 0 {
            println!("{}", style(line).green().bold());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}
