//! Question catalog commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::QuestionCatalog;

pub async fn seed_questions(catalog: &QuestionCatalog) -> Result<(), CliError> {
    let count = catalog.seed_defaults().await?;
    println!(
        "{} Seeded {} questions",
        "✓".bold().green(),
        count.to_string().green()
    );
    Ok(())
}

pub async fn list_questions(catalog: &QuestionCatalog) -> Result<(), CliError> {
    let questions = catalog.list_questions().await?;

    if questions.is_empty() {
        println!(
            "{} No questions found. Run `muka seed` first.",
            "ℹ".bold().blue()
        );
        return Ok(());
    }

    println!("{}", "Question catalog:".bold().green());
    println!();
    for q in &questions {
        println!(
            "  {} {} {}",
            format!("#{}", q.id).cyan(),
            q.template,
            format!("[{} / order {}]", q.category, q.order).dimmed()
        );
        if let Some(description) = &q.description {
            println!("      {}", description.dimmed());
        }
    }
    println!();
    println!(
        "{} Total {} questions",
        "ℹ".bold().blue(),
        questions.len().to_string().green()
    );
    Ok(())
}
