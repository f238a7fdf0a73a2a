use anyhow::{bail, Result};
use std::env;
use std::fs;

use scratchpad_api::api::config::ApiConfig;
use scratchpad_api::api::start_server;
use scratchpad_api::assistant;
use scratchpad_api::image::ImageResource;
use scratchpad_api::settings::Settings;
use scratchpad_api::utils::file_name_from_url;
use scratchpad_api::utils::logger::init_logger;

#[actix_web::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logger("logs")?;

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("serve");

    match command {
        "serve" => {
            let config = ApiConfig::from_settings(&settings);
            start_server(&settings.bind_host, settings.bind_port, Some(config)).await?;
        }
        "chat" => {
            assistant::run_chat(&settings).await?;
        }
        "fetch" => {
            let Some(url) = args.get(2) else {
                bail!("Usage: {} fetch <url> [file_name]", args[0]);
            };
            let file_name = args
                .get(3)
                .cloned()
                .unwrap_or_else(|| file_name_from_url(url));

            // The folder must exist before the resource is constructed
            fs::create_dir_all(&settings.assets_dir)?;
            let image = ImageResource::new(
                settings.assets_dir.as_str(),
                file_name,
                Some(url.clone()),
            )?;
            image.fetch_to_disk().await?;
            println!("Saved {}", image.path().display());
        }
        "show" => {
            let Some(file_name) = args.get(2) else {
                bail!("Usage: {} show <file_name>", args[0]);
            };
            let image = ImageResource::local(settings.assets_dir.as_str(), file_name.clone())?;
            image.display()?;
        }
        "describe" => {
            let (Some(url), Some(question)) = (args.get(2), args.get(3)) else {
                bail!("Usage: {} describe <image_url> <question>", args[0]);
            };
            let answer = assistant::describe_image(&settings, url, question).await?;
            println!("{answer}");
        }
        other => {
            eprintln!("Usage: {} [serve|chat|fetch|show|describe]", args[0]);
            bail!("Unknown command: {other}");
        }
    }

    Ok(())
}
