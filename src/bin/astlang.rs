use std::{
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize as _;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "astlang", version)]
struct Cli {
    /// Maximum composite nesting accepted or produced.
    #[arg(long, global = true, default_value_t = ast_language::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Raise log verbosity (repeat for more).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON expression tree as text.
    ToText(InputArgs),
    /// Decode text into a JSON expression tree.
    ToAst(ToAstArgs),
    /// Rewrite text in canonical form.
    Normalize(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input file (stdin when omitted).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ToAstArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = ast_language::CodecOptions::with_max_depth(cli.max_depth);
    let out = match cli.cmd {
        Command::ToText(args) => cmd_to_text(&args, &opts)?,
        Command::ToAst(args) => cmd_to_ast(&args, &opts)?,
        Command::Normalize(args) => cmd_normalize(&args, &opts)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{out}").context("write output")?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("read '{}'", p.display())),
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .context("read stdin")?;
            Ok(s)
        }
    }
}

fn cmd_to_text(args: &InputArgs, opts: &ast_language::CodecOptions) -> anyhow::Result<String> {
    let json = read_input(args.in_path.as_deref())?;
    let tree = parse_tree_json(&json, opts.max_depth).context("parse expression tree JSON")?;
    let text = ast_language::serialize_with(&tree, opts).context("encode expression tree")?;
    tracing::info!(bytes = text.len(), "encoded tree");
    Ok(text)
}

/// JSON levels a single composite can open (`Select` -> selector -> body).
const JSON_LEVELS_PER_COMPOSITE: usize = 3;

/// serde_json's own recursion limit (128) is far below what `--max-depth` allows, so it is lifted
/// and replaced by a bound derived from the codec limit.
fn parse_tree_json(json: &str, max_depth: usize) -> anyhow::Result<ast_language::Node> {
    let limit = max_depth
        .saturating_mul(JSON_LEVELS_PER_COMPOSITE)
        .saturating_add(1);
    let depth = json_nesting(json);
    anyhow::ensure!(
        depth <= limit,
        "JSON nests {depth} levels; --max-depth {max_depth} allows at most {limit}"
    );

    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let tree = ast_language::Node::deserialize(&mut de)?;
    de.end()?;
    Ok(tree)
}

/// Deepest `{`/`[` nesting outside string literals.
fn json_nesting(json: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

fn cmd_to_ast(args: &ToAstArgs, opts: &ast_language::CodecOptions) -> anyhow::Result<String> {
    let text = read_input(args.input.in_path.as_deref())?;
    let tree = ast_language::deserialize_with(&text, opts)
        .context("decode expression text")?;
    tracing::info!(kind = tree.kind(), "decoded text");
    let json = if args.compact {
        serde_json::to_string(&tree)
    } else {
        serde_json::to_string_pretty(&tree)
    };
    json.context("write expression tree JSON")
}

fn cmd_normalize(args: &InputArgs, opts: &ast_language::CodecOptions) -> anyhow::Result<String> {
    let text = read_input(args.in_path.as_deref())?;
    ast_language::normalize_with(&text, opts).context("normalize expression text")
}
