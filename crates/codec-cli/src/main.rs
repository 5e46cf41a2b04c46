//! # codec-cli
//!
//! Command-line driver for the codec generator.
//!
//! Compiles the decoder and/or encoder schema files and writes the
//! generated C header. Either schema file may be absent; running with
//! neither is an error.

use clap::Parser;
use codec_compiler::CodecBundle;
use codec_emit::HeaderWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codecgen")]
#[command(about = "Generate the application codec header from YAML schemas")]
#[command(version)]
struct Cli {
    /// Decoder schema YAML file
    #[arg(short, long, default_value = "codec/cbor-decoder.yaml")]
    decoder: PathBuf,

    /// Encoder schema YAML file
    #[arg(short, long, default_value = "codec/cbor-encoder.yaml")]
    encoder: PathBuf,

    /// Output header file
    #[arg(short, long, default_value = "src/app_codec.h")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("generating codec");

    let bundle = CodecBundle::from_paths(&cli.decoder, &cli.encoder)?;
    HeaderWriter::new().write_to_path(&cli.output, &bundle)?;

    tracing::info!(output = %cli.output.display(), "codec generated");
    Ok(())
}
