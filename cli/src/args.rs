use std::path::PathBuf;

use clap::{Parser, Subcommand};
use regolo_core::config::{
    DEFAULT_AUDIO_FILE, DEFAULT_CHAT_MODEL, DEFAULT_CHAT_PROMPT, DEFAULT_IMAGE_PROMPT,
    DEFAULT_TRANSCRIPTION_MODEL,
};
use regolo_core::Service;

#[derive(Debug, Parser)]
#[command(name = "regolo", about = "Call a hosted inference endpoint once and print the JSON reply")]
pub struct Cli {
    /// Endpoint URL. Overrides ENDPOINT for chat and image, and the fixed
    /// whisper URL for transcription.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Bearer credential. Overrides REGOLO_TOKEN / REGOLOAI_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat completion with a single user prompt.
    Chat {
        #[arg(long, default_value = DEFAULT_CHAT_MODEL)]
        model: String,
        #[arg(long, default_value = DEFAULT_CHAT_PROMPT)]
        prompt: String,
    },
    /// Image generation; repeat --prompt for several images.
    Image {
        #[arg(long = "prompt", default_value = DEFAULT_IMAGE_PROMPT)]
        prompts: Vec<String>,
    },
    /// Upload an audio file for transcription.
    Transcribe {
        #[arg(long, default_value = DEFAULT_TRANSCRIPTION_MODEL)]
        model: String,
        #[arg(long, default_value = DEFAULT_AUDIO_FILE)]
        file: PathBuf,
    },
}

impl Command {
    pub fn service(&self) -> Service {
        match self {
            Command::Chat { .. } => Service::Chat,
            Command::Image { .. } => Service::ImageGeneration,
            Command::Transcribe { .. } => Service::Transcription,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn chat_defaults_match_reference_call() {
        let cli = parse(&["regolo", "--endpoint", "http://x", "chat"]);
        match cli.command {
            Command::Chat { model, prompt } => {
                assert_eq!(model, "mistralai/Mistral-7B-Instruct-v0.2");
                assert_eq!(prompt, "Tell me about Rome in a concise manner");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn image_collects_repeated_prompts() {
        let cli = parse(&["regolo", "image", "--prompt", "a", "--prompt", "b"]);
        match cli.command {
            Command::Image { prompts } => assert_eq!(prompts, vec!["a", "b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn image_default_prompt() {
        let cli = parse(&["regolo", "image"]);
        match cli.command {
            Command::Image { prompts } => assert_eq!(prompts, vec!["Cat playing the piano"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["regolo", "transcribe", "--api-key", "k", "--file", "a.wav"]);
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.command.service(), Service::Transcription);
        match cli.command {
            Command::Transcribe { model, file } => {
                assert_eq!(model, "whisper-1");
                assert_eq!(file, PathBuf::from("a.wav"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["regolo"]).is_err());
    }
}
