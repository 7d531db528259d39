//! Categories command - list the answer categories and their rules.

use clap::Args;
use console::style;

use pqa_core::CategoryRegistry;

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Also list rule names in priority order
    #[arg(long)]
    rules: bool,
}

pub fn run(args: CategoriesArgs) -> anyhow::Result<()> {
    let registry = CategoryRegistry::builtin();

    println!("{}", style(format!("{} categories", registry.len())).bold());
    println!();

    for category in registry.all_categories() {
        let keywords: Vec<&str> = category
            .keywords()
            .iter()
            .map(|k| k.phrase.as_str())
            .collect();

        println!(
            "{} {} ({} rules)",
            style(format!("▸ {}", category.id())).bold(),
            category.label(),
            category.rules().len()
        );
        println!("    keywords: {}", keywords.join(", "));
        println!("    template: {}", category.template());

        if args.rules {
            for rule in category.rules() {
                println!("      - {} ({:.2})", rule.name(), rule.confidence());
            }
        }
    }

    Ok(())
}
