use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tower_lsp::{LspService, Server};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tagsig::{
    EchoContext, EchoEngine, Settings, TagFiles, TagSigServer,
    config::{find_config_file, generate_configuration_markdown, generate_json_schema, load_config_file},
};

#[derive(Parser, Debug)]
#[command(name = "tagsig", version, about)]
struct Args {
    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the language server on stdio (the default)
    Serve,

    /// Print the signature echoed for a `(` typed at the end of TEXT
    Echo {
        #[command(flatten)]
        lookup: LookupArgs,

        /// Line above TEXT, used when the parenthesis starts its line
        #[arg(long)]
        previous_line: Option<String>,

        /// Width of the echo area; 0 disables trimming
        #[arg(long, default_value_t = 0)]
        columns: usize,

        /// Print every candidate instead of the first
        #[arg(long)]
        all: bool,

        text: String,
    },

    /// Print the hover tooltip for WORD
    Hover {
        #[command(flatten)]
        lookup: LookupArgs,

        word: String,
    },

    /// Print the configuration schema
    Schema {
        /// Markdown reference instead of JSON schema
        #[arg(long)]
        markdown: bool,
    },
}

#[derive(clap::Args, Debug)]
struct LookupArgs {
    /// Tags file to search; repeat for several. Defaults to the configured files
    #[arg(long = "tags")]
    tags: Vec<String>,

    /// Editor language of the text, e.g. `c` or `cpp`
    #[arg(long, short, default_value = "c")]
    language: String,
}

fn default_log_path() -> PathBuf {
    let dir = dirs_or_tmp();
    dir.join("tagsig.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".tagsig");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

/// Settings from the nearest `.tagsig.toml`, and the directory it was found
/// in.
fn load_settings() -> (Settings, Option<PathBuf>) {
    let Ok(cwd) = std::env::current_dir() else {
        return (Settings::default(), None);
    };
    let Some(path) = find_config_file(&cwd) else {
        return (Settings::default(), None);
    };
    match load_config_file(&path) {
        Ok(payload) => (Settings::default().merged_with_payload(&payload), path.parent().map(Path::to_path_buf)),
        Err(error) => {
            eprintln!("tagsig: ignoring config file: {error}");
            (Settings::default(), None)
        },
    }
}

fn init_tracing(
    args: &Args,
    settings: &Settings,
) -> PathBuf {
    let level = settings.logging.level.filter_directive();
    let stderr_filter = if args.verbose {
        EnvFilter::new("tagsig=debug,tower_lsp=debug")
    } else {
        EnvFilter::new(format!("{level},tower_lsp=warn"))
    };
    let file_filter = if args.verbose {
        EnvFilter::new("tagsig=debug,tower_lsp=info")
    } else {
        EnvFilter::new(format!("{level},tower_lsp=warn"))
    };

    let log_path = args
        .log_file
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| settings.logging.file.clone())
        .unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("tagsig.log")),
    );

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

/// Tags files for a one-shot lookup: `--tags` wins over the configuration.
fn open_tags(
    lookup: &LookupArgs,
    settings: &Settings,
    config_dir: Option<&Path>,
) -> TagFiles {
    if lookup.tags.is_empty() {
        TagFiles::open_all(&settings.tags.files, config_dir, settings.tags.binary_search)
    } else {
        TagFiles::open_all(&lookup.tags, None, settings.tags.binary_search)
    }
}

async fn serve() {
    info!("Starting tagsig server v{}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(TagSigServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("tagsig server stopped");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let (settings, config_dir) = load_settings();
    let log_path = init_tracing(&args, &settings);
    info!("Log file: {}", log_path.display());

    match &args.command {
        None | Some(Command::Serve) => {
            serve().await;
            ExitCode::SUCCESS
        },
        Some(Command::Echo {
            lookup,
            previous_line,
            columns,
            all,
            text,
        }) => {
            let index = open_tags(lookup, &settings, config_dir.as_deref());
            let engine = EchoEngine::new(&settings, &index);
            let mut ctx = EchoContext::default();
            if engine.on_open_paren(&mut ctx, text, previous_line.as_deref(), &lookup.language).is_none()
                && ctx.is_empty()
            {
                warn!("No signature for {text:?}");
                return ExitCode::FAILURE;
            }
            if *all {
                for candidate in ctx.candidates() {
                    println!("{}", engine.display_line(candidate, *columns));
                }
            } else {
                println!("{}", engine.display_line(ctx.current(), *columns));
            }
            ExitCode::SUCCESS
        },
        Some(Command::Hover {
            lookup,
            word,
        }) => {
            let index = open_tags(lookup, &settings, config_dir.as_deref());
            match EchoEngine::new(&settings, &index).tooltip(word, &lookup.language) {
                Some(tooltip) => {
                    println!("{tooltip}");
                    ExitCode::SUCCESS
                },
                None => {
                    warn!("No tags for {word:?}");
                    ExitCode::FAILURE
                },
            }
        },
        Some(Command::Schema {
            markdown,
        }) => {
            if *markdown {
                print!("{}", generate_configuration_markdown());
            } else {
                match serde_json::to_string_pretty(&generate_json_schema()) {
                    Ok(schema) => println!("{schema}"),
                    Err(error) => {
                        eprintln!("tagsig: {error}");
                        return ExitCode::FAILURE;
                    },
                }
            }
            ExitCode::SUCCESS
        },
    }
}
