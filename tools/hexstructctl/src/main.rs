// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hexstructctl - decode, encode and check hexstruct streams.
//!
//! ```text
//! hexstructctl decode < input.txt
//! hexstructctl decode --input input.txt --json
//! hexstructctl encode --schema shapes.schema --tree doc.json
//! hexstructctl check --schema shapes.schema
//! ```

mod input;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hexstruct::{
    parse_schema, Decoder, Encoder, EncoderConfig, HexCase, IndexMode, PrimitiveRegistry,
    Record, RenderConfig, SchemaCatalog,
};
use input::ProgramInput;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hexstructctl")]
#[command(about = "Schema-driven hex record decoder/encoder")]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode program input (header, schema, hex line) and print the tree
    Decode {
        /// Program input file (stdin if omitted)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Spaces per nesting level
        #[arg(long, default_value_t = 1)]
        indent: usize,

        /// Print the document as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Encode a JSON document tree into a hex stream
    Encode {
        /// Schema text file
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// JSON document tree (stdin if omitted)
        #[arg(short, long, value_name = "FILE")]
        tree: Option<PathBuf>,

        /// Struct numbering: catalog or first-seen
        #[arg(long, default_value = "catalog")]
        index_mode: IndexMode,

        /// Write lowercase hex digits
        #[arg(long)]
        lowercase: bool,
    },

    /// Parse and validate a schema, then list its declarations
    Check {
        /// Schema text file
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let output = match cli.command {
        Commands::Decode {
            input,
            indent,
            json,
        } => {
            let text = read_source(input.as_deref())?;
            cmd_decode(&text, indent, json)?
        }
        Commands::Encode {
            schema,
            tree,
            index_mode,
            lowercase,
        } => {
            let schema_text = read_file(&schema)?;
            let tree_json = read_source(tree.as_deref())?;
            let hex_case = if lowercase {
                HexCase::Lower
            } else {
                HexCase::Upper
            };
            let config = EncoderConfig::new()
                .index_mode(index_mode)
                .hex_case(hex_case);
            cmd_encode(&schema_text, &tree_json, config)?
        }
        Commands::Check { schema } => cmd_check(&read_file(&schema)?)?,
    };

    println!("{}", output);
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_catalog(text: &str, registry: &PrimitiveRegistry) -> anyhow::Result<SchemaCatalog> {
    let catalog = parse_schema(text).context("invalid schema")?;
    catalog.validate(registry).context("schema rejected")?;
    Ok(catalog)
}

fn cmd_decode(text: &str, indent: usize, json: bool) -> anyhow::Result<String> {
    let input = ProgramInput::parse(text)?;
    let registry = PrimitiveRegistry::builtin();
    let catalog = input.catalog()?;
    catalog.validate(&registry).context("schema rejected")?;
    log::info!(
        "[hexstructctl] {} structs, {} hex chars",
        catalog.len(),
        input.hex.len()
    );

    let doc = Decoder::new(&catalog, &registry)
        .decode_document(&input.hex)
        .context("decode failed")?;

    if json {
        return serde_json::to_string_pretty(&doc).context("failed to serialize tree");
    }
    Ok(hexstruct::render_document(
        &doc,
        &RenderConfig::new().indent_width(indent),
    ))
}

fn cmd_encode(schema_text: &str, tree_json: &str, config: EncoderConfig) -> anyhow::Result<String> {
    let registry = PrimitiveRegistry::builtin();
    let catalog = load_catalog(schema_text, &registry)?;
    let doc: Record = serde_json::from_str(tree_json).context("invalid JSON tree")?;
    if config.index_mode == IndexMode::FirstSeen {
        log::warn!("[hexstructctl] first-seen numbering: output will not decode back");
    }

    Encoder::new(&catalog, &registry)
        .with_config(config)
        .encode_document(&doc)
        .context("encode failed")
}

fn cmd_check(schema_text: &str) -> anyhow::Result<String> {
    let registry = PrimitiveRegistry::builtin();
    let catalog = load_catalog(schema_text, &registry)?;

    let lines: Vec<String> = catalog
        .iter()
        .enumerate()
        .map(|(i, decl)| format!("{:>4}  {} ({})", i + 1, decl.name, decl.field_types.join(", ")))
        .collect();
    Ok(format!("[OK] {} structs\n{}", catalog.len(), lines.join("\n")))
}
