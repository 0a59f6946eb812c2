use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::settings::{BlockPolicy, EntityPolicy, MentionFields, Settings};

mod settings;

#[derive(Debug, Parser)]
#[command(version, about = "Convert Draft.js raw content into a Tiptap document", long_about = None)]
struct Cli {
    /// Draft.js JSON file to read (`-` or omitted for stdin)
    input: Option<PathBuf>,

    /// Where to write the Tiptap JSON (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// KDL settings file
    #[arg(long, env = "DRAFT_TIPTAP_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Mention data field used as the mention node's `id`
    #[arg(long, value_name = "NAME")]
    mention_id_field: Option<String>,

    /// Mention data field used as the mention node's `label`
    #[arg(long, value_name = "NAME")]
    mention_label_field: Option<String>,

    /// How to handle entities with no native mapping
    #[arg(long, value_enum)]
    unknown_entities: Option<EntityPolicy>,

    /// How to handle block types with no native mapping
    #[arg(long, value_enum)]
    unknown_blocks: Option<BlockPolicy>,

    /// Log conversion details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Settings file values with command line flags layered on top.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if self.pretty {
            settings.pretty = true;
        }
        if let Some(fields) =
            MentionFields::from_flags(self.mention_id_field.clone(), self.mention_label_field.clone())
        {
            settings.mention = Some(fields);
        }
        if let Some(policy) = self.unknown_entities {
            settings.unknown_entities = policy;
        }
        if let Some(policy) = self.unknown_blocks {
            settings.unknown_blocks = policy;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    init_miette()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = cli.settings()?;
    tracing::debug!(?settings, "resolved settings");

    let input = read_input(cli.input.as_deref())?;
    let doc = draft_tiptap::convert_str(&input, &settings.to_convert_config())?;

    let mut json = if settings.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .into_diagnostic()?;
    json.push('\n');

    write_output(cli.output.as_deref(), &json)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .into_diagnostic()
            .map_err(|e| e.wrap_err(format!("could not read {}", path.display()))),
        _ => std::io::read_to_string(std::io::stdin()).into_diagnostic(),
    }
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)
            .into_diagnostic()
            .map_err(|e| e.wrap_err(format!("could not write {}", path.display()))),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes()).into_diagnostic()?;
            stdout.flush().into_diagnostic()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
