//! Chat command handler.

use chatbox_client::{AttemptState, ChatClient, ClientConfig, Conversation, HttpTransport};
use chatbox_error::{ChatboxResult, HttpError};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// Handle the `chat` command.
///
/// Sends `message` once when given, otherwise reads messages line by line
/// from stdin until EOF or `exit`, keeping the conversation between them.
#[instrument(skip(message))]
pub async fn handle_chat_command(server: String, message: Option<String>) -> ChatboxResult<()> {
    let config = ClientConfig::builder()
        .base_url(server)
        .build()
        .map_err(|e| HttpError::new(format!("Invalid client configuration: {}", e)))?;
    let client = ChatClient::connect(config);
    let mut conversation = Conversation::new();

    if let Some(message) = message {
        return exchange(&client, &mut conversation, &message).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let line = lines
            .next_line()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read input: {}", e)))?;
        let Some(line) = line else { break };

        let line = line.trim();
        if line == "exit" || line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        exchange(&client, &mut conversation, line).await?;
    }

    debug!(turns = conversation.len(), "Chat session ended");
    Ok(())
}

async fn exchange(
    client: &ChatClient<HttpTransport>,
    conversation: &mut Conversation,
    message: &str,
) -> ChatboxResult<()> {
    let mut output_open = true;
    let report = client
        .submit(conversation, message, |chunk| {
            if !output_open {
                return;
            }
            if let Err(e) = write_flushed(&mut std::io::stdout().lock(), chunk.as_bytes()) {
                debug!(error = %e, "Stdout closed, discarding the rest of the reply");
                output_open = false;
            }
        })
        .await?;

    println!();
    if *report.final_state() == AttemptState::FailedFinal {
        if let Some(notice) = conversation.last() {
            eprintln!("{}", notice.content());
        }
    }
    Ok(())
}

fn prompt() -> ChatboxResult<()> {
    write_flushed(&mut std::io::stdout().lock(), b"> ")
        .map_err(|e| HttpError::new(format!("Failed to write output: {}", e)))?;
    Ok(())
}

fn write_flushed<W: Write>(out: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}
