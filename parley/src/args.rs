use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parley_llm::{GenerateContentConfig, GenerateContentRequest};

/// Parley command line
#[derive(Debug, Parser)]
#[command(
    name = "parley",
    about = "Content-generation client for OpenAI-compatible chat completions servers"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "parley.toml", env = "PARLEY_CONFIG")]
    pub config: PathBuf,

    /// Override the log filter (takes precedence over `RUST_LOG`)
    #[arg(long, env = "PARLEY_LOG")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a complete response and print its text
    Generate(GenerateArgs),
    /// Stream a response, printing fragments as they arrive
    Stream(GenerateArgs),
    /// Print the estimated token count of some text
    CountTokens {
        /// Text to estimate
        text: String,
    },
    /// Print the length of the embedding vector for some text
    Embed {
        /// Text to embed
        text: String,
    },
}

/// Prompt and generation settings shared by `generate` and `stream`
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// User prompt
    pub prompt: String,

    /// System instruction
    #[arg(long)]
    pub system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum number of output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Nucleus sampling threshold
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Stop sequence (repeatable)
    #[arg(long = "stop")]
    pub stop_sequences: Vec<String>,
}

impl GenerateArgs {
    /// Build the generation request
    pub fn into_request(self) -> GenerateContentRequest {
        let config = GenerateContentConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_tokens,
            top_p: self.top_p,
            stop_sequences: (!self.stop_sequences.is_empty()).then_some(self.stop_sequences),
            system_instruction: self.system.map(Into::into),
        };

        GenerateContentRequest::new(self.prompt).with_config(config)
    }
}
