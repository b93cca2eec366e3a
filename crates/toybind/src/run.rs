use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use binder::{BindingOp, BindingResolver, FsHost, Resolution, TextureLocation};
use serde::Serialize;
use shaderlex::{scan_directives, Lexer, LineRange, Token};
use shadertoy::ShaderDocument;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, DirectivesArgs, ResolveArgs, TokensArgs};
use crate::probe::probe_images;
use crate::report::TerminalSink;

pub fn run(cli: Cli) -> Result<()> {
    initialise_tracing();

    match cli.command {
        Command::Tokens(args) => print_tokens(&args),
        Command::Directives(args) => print_directives(&args),
        Command::Resolve(args) => resolve_document(&args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    line: usize,
    range: LineRange,
    #[serde(flatten)]
    token: &'a Token,
}

fn print_tokens(args: &TokensArgs) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read shader source '{}'", args.file.display()))?;
    let mut lexer = Lexer::default();
    lexer
        .reset(&source, args.offset)
        .with_context(|| format!("cannot start lexing '{}'", args.file.display()))?;

    let mut out = io::stdout().lock();
    let mut count = 0usize;
    while !lexer.eof() {
        let Some(token) = lexer.next() else {
            continue;
        };
        let record = TokenRecord {
            line: lexer.last_line(),
            range: lexer.last_range(),
            token: &token,
        };
        if args.json {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{:>5} {:>6}..{:<6} {:<20} {}",
                record.line + 1,
                record.range.begin,
                record.range.end,
                format!("{:?}", token.kind),
                token.value
            )?;
        }
        count += 1;
    }
    tracing::debug!(file = %args.file.display(), tokens = count, "lexed shader source");
    Ok(())
}

fn print_directives(args: &DirectivesArgs) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read shader source '{}'", args.file.display()))?;
    let directives = scan_directives(&source);

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &directives)?;
        writeln!(out)?;
        return Ok(());
    }
    for directive in &directives {
        match &directive.argument {
            Some(argument) => writeln!(
                out,
                "{:>5} #{} \"{}\"",
                directive.line + 1,
                directive.keyword,
                argument
            )?,
            None => writeln!(out, "{:>5} #{}", directive.line + 1, directive.keyword)?,
        }
    }
    Ok(())
}

fn resolve_document(args: &ResolveArgs) -> Result<()> {
    let document = ShaderDocument::load(&args.document).with_context(|| {
        format!(
            "failed to load shader document '{}'",
            args.document.display()
        )
    })?;
    for issue in document.validate() {
        tracing::warn!(document = %args.document.display(), "{issue}");
    }
    tracing::info!(
        document = %args.document.display(),
        buffers = document.buffers.len(),
        standalone = args.standalone,
        "resolving channel bindings"
    );

    let host = FsHost::new(document.path_resolver()).with_scheme(args.scheme.as_str());
    let mut resolution = BindingResolver::new(&host)
        .standalone(args.standalone)
        .resolve(&document.buffers);

    let sink = TerminalSink::new();
    resolution.publish(&sink);

    let probed = if args.probe {
        probe_images(&document, &host, &mut resolution, &sink)
    } else {
        Vec::new()
    };

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &resolution)?;
        writeln!(out)?;
    } else {
        write_summary(&mut out, &document, &resolution)?;
        for (id, size) in &probed {
            writeln!(
                out,
                "loaded buffer {} channel {}: {}x{}",
                id.buffer, id.channel, size.width, size.height
            )?;
        }
    }

    let (errors, warnings) = sink.counts();
    tracing::info!(errors, warnings, "resolution finished");
    if errors > 0 {
        bail!("{errors} texture input(s) could not be bound");
    }
    Ok(())
}

fn write_summary(
    out: &mut impl Write,
    document: &ShaderDocument,
    resolution: &Resolution,
) -> Result<()> {
    for resolved in &resolution.buffers {
        let name = document
            .buffers
            .get(resolved.index)
            .map(|buffer| buffer.name.as_str())
            .unwrap_or("?");
        writeln!(out, "buffer {} ({name}):", resolved.index)?;
        for op in &resolved.ops {
            writeln!(out, "  {}", describe_op(op))?;
        }
    }
    Ok(())
}

fn describe_location(location: &TextureLocation) -> String {
    match location {
        TextureLocation::Path(path) => path.display().to_string(),
        TextureLocation::Resource(reference) => reference.clone(),
    }
}

fn describe_op(op: &BindingOp) -> String {
    match op {
        BindingOp::CubeMap {
            channel,
            faces,
            sampler,
        } => format!(
            "iChannel{channel} <- cube map [{}] {sampler:?}",
            faces.iter().map(describe_location).collect::<Vec<_>>().join(", ")
        ),
        BindingOp::BufferRef { channel, source } => {
            format!("iChannel{channel} <- buffer {source}")
        }
        BindingOp::File {
            channel,
            location,
            sampler,
        } => format!(
            "iChannel{channel} <- file {} {sampler:?}",
            describe_location(location)
        ),
        BindingOp::Remote {
            channel,
            url,
            sampler,
        } => format!("iChannel{channel} <- remote {url} {sampler:?}"),
        BindingOp::SelfFeedback { channel } => format!("iChannel{channel} <- previous frame"),
        BindingOp::Keyboard { texture } => format!(
            "iKeyboard <- {} ({}x{})",
            texture.label, texture.width, texture.height
        ),
    }
}
