//! Taginput CLI application entry point
//!
//! Interactive and scripted front ends for the tag input controller.
//!
//! # Usage
//!
//! ```bash
//! # Edit tags in the terminal (default command)
//! taginput
//! taginput edit -t draft --suggest Rust --suggest Ruby
//!
//! # Record a chord: prints "Control,Alt,x"
//! taginput --special-keys replay Control Alt x Enter
//!
//! # Type text and commit it, printing the list markup too
//! taginput replay --markup a b Enter
//!
//! # Show what autocomplete offers for a query
//! taginput suggest ru -s Rust -s Ruby -s Go
//!
//! # Encode text for markup
//! taginput escape "<b>café</b>"
//! ```
//!
//! # Configuration
//!
//! Options are read from `~/.config/taginput/config.toml` on Linux (or
//! `--config PATH`), then `TAGINPUT_*` environment variables, then flags.
//! Logging goes to stderr and is controlled by `TAGINPUT_LOG`
//! (e.g. `TAGINPUT_LOG=taginput=debug`).

use taginput::{
    TagInputError,
    autocomplete::SuggestionFilter,
    cli::{Cli, Commands},
    config::TagInputConfig,
    controller::TagListController,
    escape::encode_entities,
    keys::parse_key_sequence,
    render::HtmlRenderer,
    sink::{OutputField, OutputSink},
    ui::{OutputWriter, StdoutWriter, TagInputApp},
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

type Result<T> = std::result::Result<T, TagInputError>;

const LOG_ENV_VAR: &str = "TAGINPUT_LOG";

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the interactive editor and print the resulting tags
fn handle_edit_command(config: TagInputConfig, output: &StdoutWriter) -> Result<()> {
    let outcome = TagInputApp::new().run(config)?;
    if outcome.aborted {
        output.info("Aborted");
    } else {
        output.write(&outcome.serialized);
    }
    Ok(())
}

/// Press and release each named key on a headless controller
fn handle_replay_command(
    config: TagInputConfig,
    keys: &[String],
    markup: bool,
    output: &StdoutWriter,
) -> Result<()> {
    let keys = parse_key_sequence(keys.iter().map(String::as_str))?;

    let field = config.output_id.as_ref().map(|_| OutputField::new());
    let sink = match &field {
        Some(field) => OutputSink::none().with_field(field.clone()),
        None => OutputSink::none(),
    };
    let mut controller = TagListController::new(config, HtmlRenderer::new(), sink)?;

    for key in keys {
        controller.tap(key);
    }

    let serialized = field.map_or_else(|| controller.serialized(), |f| f.value());
    output.write(&serialized);

    if markup {
        let renderer = controller.renderer();
        output.write(renderer.list_markup());
        if !renderer.suggestions_hidden() {
            output.write(renderer.suggestion_markup());
        }
    }
    if !controller.buffer().is_empty() {
        output.info(&format!("Uncommitted input: {}", controller.buffer()));
    }
    Ok(())
}

/// Print every suggestion shown for `query`
fn handle_suggest_command(config: TagInputConfig, query: &str, output: &StdoutWriter) -> Result<()> {
    config.validate()?;
    let filter = SuggestionFilter::new(config.autocomplete_list)
        .with_min_query_len(config.min_suggest_len);

    let panel = filter.panel(query);
    if panel.is_visible() {
        for item in panel.items() {
            output.write(item);
        }
    } else {
        output.info("No suggestions");
    }
    Ok(())
}

/// Save the effective configuration to the config file
fn handle_init_command(cli: &Cli, config: &TagInputConfig, force: bool, output: &StdoutWriter) -> Result<()> {
    let path = cli.config_path()?;
    if path.exists() && !force {
        return Err(TagInputError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    config.validate()?;
    config.save_to(&path)?;
    output.success(&format!("Configuration saved to {}", path.display()));
    Ok(())
}

fn run(cli: &Cli, output: &StdoutWriter) -> Result<()> {
    let command = cli.get_command();
    if command != Commands::Edit {
        init_logging();
    }

    if let Commands::Escape { text } = &command {
        output.write(&encode_entities(text));
        return Ok(());
    }

    let config = cli.load_config()?;
    tracing::debug!(?command, "running command");

    match command {
        Commands::Edit => handle_edit_command(config, output),
        Commands::Replay { keys, markup } => handle_replay_command(config, &keys, markup, output),
        Commands::Suggest { query } => handle_suggest_command(config, &query, output),
        Commands::Init { force } => handle_init_command(cli, &config, force, output),
        Commands::Escape { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse_args();
    let output = StdoutWriter::new().quiet(cli.options.quiet);

    if let Err(e) = run(&cli, &output) {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}
