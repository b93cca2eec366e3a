use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "toybind",
    author,
    version,
    about = "Lex annotated ShaderToy GLSL and resolve texture channel bindings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of a shader source.
    Tokens(TokensArgs),
    /// List the preview directives (`#include`, `#iChannel<n>`, ...) of a shader source.
    Directives(DirectivesArgs),
    /// Resolve the channel bindings declared by a shader document (TOML).
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Shader source file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Character offset to start lexing from.
    #[arg(long, value_name = "CHARS", default_value_t = 0)]
    pub offset: usize,

    /// Emit one JSON object per token instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DirectivesArgs {
    /// Shader source file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Shader document listing buffers and their texture inputs.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Keep local texture paths as written instead of emitting resource references.
    #[arg(long, env = "TOYBIND_STANDALONE")]
    pub standalone: bool,

    /// Prefix for resource references when not standalone.
    #[arg(long, value_name = "PREFIX", env = "TOYBIND_SCHEME", default_value = "file://")]
    pub scheme: String,

    /// Decode bound local images and run the post-load size checks.
    #[arg(long)]
    pub probe: bool,

    /// Emit the resolution as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
