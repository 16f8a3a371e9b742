//! Link inspection commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;
use crate::storage::LinkState;
use crate::utils::format_iso8601;

pub async fn show_link(service: &LinkService, hash: &str) -> Result<(), CliError> {
    let inspection = service.inspect_link(hash).await?;
    let link = &inspection.link;

    let state = match inspection.state {
        LinkState::Active => inspection.state.as_ref().green(),
        LinkState::Expired => inspection.state.as_ref().yellow(),
        LinkState::Used => inspection.state.as_ref().red(),
    };

    println!("{} {}", link.hash.cyan().bold(), state);
    println!("  share url : {}", service.share_url(&link.hash).blue().underline());
    println!(
        "  question  : #{} {}",
        inspection.question.id, inspection.question.template
    );
    println!("  created   : {}", format_iso8601(&link.created_at));
    println!("  expires   : {}", format_iso8601(&link.expires_at));
    Ok(())
}

pub async fn mark_used(service: &LinkService, hash: &str) -> Result<(), CliError> {
    service.mark_used(hash).await?;
    println!("{} Link {} marked as used", "✓".bold().green(), hash.cyan());
    Ok(())
}
