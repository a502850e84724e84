//! `chatbox` binary.

use chatbox::cli::{
    Cli, Commands, handle_chat_command, handle_notes_command, handle_serve_command, render_json,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    chatbox::init_tracing(cli.json_logs);

    match cli.command {
        Commands::Serve { config, bind } => handle_serve_command(config, bind).await?,
        Commands::Chat { server, message } => handle_chat_command(server, message).await?,
        Commands::Notes {
            query,
            filter,
            max_results,
        } => {
            let output = handle_notes_command(query, filter, max_results)?;
            println!("{}", render_json(&output)?);
        }
    }

    Ok(())
}
