use clap::Parser;

use muka::cli::{Cli, Commands};
use muka::config::{get_config, init_config};
use muka::runtime::modes;
use muka::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = get_config();
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };
            modes::run_server().await
        }
        cmd => {
            if let Err(e) = modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
