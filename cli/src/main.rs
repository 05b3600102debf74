use clap::{Parser, Subcommand};
use std::io::Write;

use trigger_cli::{CliContext, commands, logging, readline};

#[tokio::main]
async fn main() -> Result<(), String> {
    let ctx = CliContext::new();
    logging::init(ctx.config.read().await.debug_logging);

    let has_definitions_dir = !ctx.config.read().await.definitions_dir.is_empty();
    if has_definitions_dir && let Err(err) = commands::load(None, &ctx).await {
        tracing::warn!(error = %err.trim_end(), "could not load configured definitions");
    }

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.tasks.lock().await.abort_all();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "trigger shell")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a definitions file or directory
    Load {
        #[arg(short, long)]
        path: Option<String>,
    },
    List,
    Explain {
        #[arg(short, long)]
        id: String,
    },
    Activate {
        #[arg(short, long)]
        id: String,
    },
    /// Advance game time by the given seconds
    Advance {
        #[arg(short, long)]
        secs: f32,
    },
    /// Advance game time in real time
    Play {
        #[arg(short, long)]
        secs: Option<f32>,
    },
    Stop,
    Vars,
    Set {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        value: f64,
    },
    Config,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "trigger".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => commands::load(path.as_deref(), ctx).await?,
        Some(Commands::List) => commands::list(ctx).await?,
        Some(Commands::Explain { id }) => commands::explain(id, ctx).await?,
        Some(Commands::Activate { id }) => commands::activate(id, ctx).await?,
        Some(Commands::Advance { secs }) => commands::advance(*secs, ctx).await?,
        Some(Commands::Play { secs }) => commands::play(*secs, ctx).await?,
        Some(Commands::Stop) => commands::stop(ctx).await,
        Some(Commands::Vars) => commands::show_variables(ctx).await?,
        Some(Commands::Set { name, value }) => commands::set_variable(name, *value, ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SetDirectory { path }) => commands::set_directory(path, ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
