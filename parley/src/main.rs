#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Write;

use args::{Args, Command};
use clap::Parser;
use futures_util::StreamExt;
use parley_config::Config;
use parley_llm::{ChatCompletionsAdapter, ContentGenerator, Contents, GenerateContentRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    parley_telemetry::init(&config.telemetry, args.log_filter.as_deref())?;

    tracing::debug!(
        config_path = %args.config.display(),
        endpoint = %config.adapter.endpoint,
        "starting parley"
    );

    let adapter = ChatCompletionsAdapter::new(
        &config.adapter.endpoint,
        config.adapter.model.clone(),
        config.adapter.api_key().cloned(),
    )?;

    match args.command {
        Command::Generate(generate) => run_generate(&adapter, &generate.into_request()).await,
        Command::Stream(generate) => run_stream(&adapter, &generate.into_request()).await,
        Command::CountTokens { text } => {
            let count = adapter.count_tokens(&Contents::from(text)).await?;
            println!("{}", count.total_tokens);
            Ok(())
        }
        Command::Embed { text } => {
            let response = adapter.embed_content(&Contents::from(text)).await?;
            let dimensions = response.embeddings.first().map_or(0, |e| e.values.len());
            println!("{dimensions}");
            Ok(())
        }
    }
}

async fn run_generate(adapter: &impl ContentGenerator, request: &GenerateContentRequest) -> anyhow::Result<()> {
    let response = adapter.generate_content(request).await?;

    println!("{}", response.text());

    if let Some(usage) = response.usage_metadata {
        tracing::info!(
            prompt_tokens = usage.prompt_token_count,
            completion_tokens = usage.candidates_token_count,
            total_tokens = usage.total_token_count,
            "generation finished"
        );
    }

    Ok(())
}

/// Print fragments as they arrive; Ctrl+C stops reading and drops the stream
async fn run_stream(adapter: &impl ContentGenerator, request: &GenerateContentRequest) -> anyhow::Result<()> {
    let mut fragments = adapter.generate_content_stream(request).await?;
    let mut stdout = std::io::stdout();
    let mut count = 0_usize;

    loop {
        let fragment = tokio::select! {
            fragment = fragments.next() => fragment,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(fragments = count, "stream interrupted");
                break;
            }
        };

        let Some(fragment) = fragment else {
            break;
        };

        let fragment = fragment?;
        count += 1;

        write!(stdout, "{}", fragment.text())?;
        stdout.flush()?;
    }

    writeln!(stdout)?;
    tracing::debug!(fragments = count, "stream finished");

    Ok(())
}
