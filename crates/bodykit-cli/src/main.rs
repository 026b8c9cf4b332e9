use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bodykit::store::DEFAULT_BODY_FILE_DIR;
use bodykit::{Assembler, Body, BodyFileDir, SiblingPolicy, XmlConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod collab;

use collab::{parse_var, ExampleSchema, VarEvaluator};

#[derive(Debug, Parser)]
#[command(
    name = "bodykit",
    version,
    about = "Transcode simple XML/JSON bodies and assemble request payloads"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert simple XML to pretty JSON
    XmlToJson(TranscodeArgs),
    /// Convert a JSON object of objects and strings to simple XML
    JsonToXml(TranscodeArgs),
    /// Assemble a body descriptor (JSON) into parameters and attachments
    Assemble(AssembleArgs),
}

#[derive(Debug, clap::Args)]
struct TranscodeArgs {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// What to do with repeated sibling tags
    #[arg(long, value_enum, default_value_t = SiblingArg::Overwrite)]
    siblings: SiblingArg,
}

#[derive(Debug, clap::Args)]
struct AssembleArgs {
    /// Descriptor file (defaults to stdin)
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: Option<PathBuf>,
    /// Field name for file entries without a name
    #[arg(long, default_value = "request")]
    request_id: String,
    /// Directory holding uploaded body files
    #[arg(long, env = "BODYKIT_BODY_FILE_DIR", default_value = DEFAULT_BODY_FILE_DIR)]
    body_dir: PathBuf,
    /// Placeholder value for `${{ NAME }}`, may be repeated
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,
    /// What to do with repeated sibling tags in XML raw bodies
    #[arg(long, value_enum, default_value_t = SiblingArg::Overwrite)]
    siblings: SiblingArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SiblingArg {
    Overwrite,
    KeepFirst,
    Reject,
}

impl From<SiblingArg> for SiblingPolicy {
    fn from(value: SiblingArg) -> Self {
        match value {
            SiblingArg::Overwrite => SiblingPolicy::Overwrite,
            SiblingArg::KeepFirst => SiblingPolicy::KeepFirst,
            SiblingArg::Reject => SiblingPolicy::Reject,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::XmlToJson(args) => {
            let input = read_input(&args.input)?;
            let config = XmlConfig::default().with_siblings(args.siblings.into());
            let tree = bodykit::xml::parse_with_config(&input, config)?;
            let mut output = bodykit::to_json_pretty(&tree);
            output.push('\n');
            write_output(&args.output, output.as_bytes())
        }
        Command::JsonToXml(args) => {
            let input = read_input(&args.input)?;
            let output = bodykit::json_to_xml(&input)?;
            write_output(&args.output, output.as_bytes())
        }
        Command::Assemble(args) => assemble(args),
    }
}

fn assemble(args: AssembleArgs) -> Result<()> {
    let input = read_input(&args.descriptor)?;
    let body: Body = serde_json::from_str(&input).context("failed to parse body descriptor")?;
    if !body.is_valid() {
        bail!("body descriptor has nothing to send");
    }
    debug!(vars = args.vars.len(), "assembling descriptor");

    let assembler = Assembler::new(
        VarEvaluator::new(args.vars),
        ExampleSchema,
        BodyFileDir::new(args.body_dir),
    )
    .with_xml_config(XmlConfig::default().with_siblings(args.siblings.into()));
    let assembled = assembler.assemble(&body, &args.request_id)?;

    let mut output = serde_json::to_string_pretty(&assembled)?;
    output.push('\n');
    write_output(&args.output, output.as_bytes())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
