pub mod client;
pub mod search;
pub mod tools;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::{error, info};

use crate::image::ImageResource;
use crate::settings::Settings;

pub use client::{ChatClient, ChatCompletion, ChatMessage};
pub use search::SearchClient;

const SYSTEM_PROMPT: &str = "\
You are an advanced AI research assistant that is knowledgeable and very meticulous.
You have access to a variety of tools and resources to help you with your tasks.
Your goal is to provide the user with the information they are looking for by using
the search tool provided and provide recommendations based on the search results.";

const FOLLOW_UP_PROMPT: &str = "Answer my previous query based on the search results";

/// Runs the interactive research-assistant loop on stdin/stdout.
///
/// Each turn: read a query, send the transcript, dispatch any tool calls the
/// model requests, then print the final answer. Any error ends the session;
/// an empty line, `exit`, or `quit` ends it cleanly.
pub async fn run_chat(settings: &Settings) -> Result<()> {
    let chat = ChatClient::new(
        &settings.chat_base_url,
        &settings.xai_api_key,
        &settings.chat_model,
    )?;
    let search = SearchClient::new(&settings.search_base_url, &settings.exa_api_key)?;
    let tool_defs = tools::tool_definitions();

    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
    let stdin = io::stdin();

    loop {
        print!("What do you want to know? ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() || query == "exit" || query == "quit" {
            break;
        }

        messages.push(ChatMessage::user(query));

        let completion = match chat.complete(&messages, Some(&tool_defs)).await {
            Ok(completion) => completion,
            Err(e) => {
                error!("{e:#}");
                break;
            }
        };
        let Some(reply) = completion.message().cloned() else {
            error!("Chat completion contained no choices");
            break;
        };

        match reply.tool_calls.clone().filter(|calls| !calls.is_empty()) {
            Some(tool_calls) => {
                messages.push(reply);
                if let Err(e) = tools::dispatch_tool_calls(&search, &tool_calls, &mut messages).await {
                    error!("{e:#}");
                    break;
                }
                messages.push(ChatMessage::user(FOLLOW_UP_PROMPT));

                match chat.complete(&messages, Some(&tool_defs)).await {
                    Ok(completion) => {
                        let answer = completion.content_text().unwrap_or_default();
                        println!("\n{answer}\n");
                    }
                    Err(e) => {
                        error!("{e:#}");
                        break;
                    }
                }
            }
            None => {
                let model = completion.model.as_deref().unwrap_or(chat.model());
                let answer = reply.text().unwrap_or_default();
                println!("\n{}: {answer}\n", model.to_uppercase());
                messages.push(reply);
            }
        }
    }

    info!("Chat session ended");
    Ok(())
}

/// One-shot vision request: download the image at `image_url`, embed it as a
/// base64 data URL, and ask the vision model `question` about it.
pub async fn describe_image(settings: &Settings, image_url: &str, question: &str) -> Result<String> {
    fs::create_dir_all(&settings.assets_dir)
        .with_context(|| format!("Failed to create assets dir {}", settings.assets_dir))?;

    let file_name = crate::utils::file_name_from_url(image_url);
    let mut image = ImageResource::new(
        settings.assets_dir.as_str(),
        file_name,
        Some(image_url.to_string()),
    )?;

    info!("Downloading image from {}", image_url);
    let encoded = image.encode_url_to_base64().await?;

    let chat = ChatClient::new(
        &settings.vision_base_url,
        &settings.github_token,
        &settings.vision_model,
    )?;
    let messages = vec![ChatMessage::user_with_image(
        question,
        image.mime_type(),
        &encoded,
    )];

    let completion = chat.complete(&messages, None).await?;
    completion
        .content_text()
        .context("Vision model returned no content")
}
