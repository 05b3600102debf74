use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use trigger_core::{
    ActivationOutcome, AppConfigExt, DefinitionError, DefinitionFile, HostContext, TriggerSet,
    load_definitions_from_dir, load_definitions_from_file,
};

use crate::context::CliContext;
use crate::playback::spawn_playback;

pub async fn load(path: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    let source = match path {
        Some(path) => PathBuf::from(path),
        None => {
            let dir = ctx.config.read().await.definitions_dir.clone();
            if dir.is_empty() {
                return Err("no path given and no definitions directory configured\n".to_string());
            }
            PathBuf::from(dir)
        }
    };

    let timer = Instant::now();
    let defs = read_definitions(&source).map_err(|e| format!("{e}\n"))?;
    let host = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("host")
        .to_string();
    let set = TriggerSet::from_definitions(defs, HostContext::new(host))
        .map_err(|e| format!("{e}\n"))?;

    println!(
        "loaded {} triggers, {} actions, {} conditions in {}ms",
        set.len(),
        set.action_count(),
        set.condition_count(),
        timer.elapsed().as_millis()
    );
    ctx.start_session(set, source).await;
    Ok(())
}

fn read_definitions(source: &Path) -> Result<DefinitionFile, DefinitionError> {
    if source.is_dir() {
        load_definitions_from_dir(source)
    } else {
        load_definitions_from_file(source)
    }
}

pub async fn list(ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let s = session.read().await;
    for trigger in s.set.triggers() {
        println!(
            "{:<24} {:<6} {:?} pending={}",
            trigger.id(),
            if trigger.config().enabled { "on" } else { "off" },
            trigger.state(),
            trigger.pending()
        );
    }
    Ok(())
}

pub async fn explain(id: &str, ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let s = session.read().await;
    let text = s.set.explain(id).ok_or(format!("unknown trigger '{id}'\n"))?;
    print!("{text}");
    Ok(())
}

pub async fn activate(id: &str, ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let mut s = session.write().await;
    let now = s.clock;
    let outcome = s
        .set
        .activate(id, now)
        .ok_or(format!("unknown trigger '{id}'\n"))?;

    match &outcome {
        ActivationOutcome::Disabled => println!("{id}: disabled"),
        ActivationOutcome::AlreadyFired => println!("{id}: already fired"),
        ActivationOutcome::PreconditionsFailed => println!("{id}: preconditions not met"),
        ActivationOutcome::Dispatched(report) => {
            println!(
                "{id}: executed {}, scheduled {}, skipped {} disabled, {} misconfigured",
                report.executed,
                report.scheduled.len(),
                report.skipped_disabled,
                report.defects.len()
            );
            let label = s.elapsed_label();
            for entry in s.set.context().drain_journal() {
                println!("[{label}] {entry}");
            }
        }
    }
    Ok(())
}

pub async fn advance(secs: f32, ctx: &CliContext) -> Result<(), String> {
    let by = Duration::try_from_secs_f32(secs).map_err(|e| format!("{e}\n"))?;
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let mut s = session.write().await;
    let ran = s.advance(by)?;

    let label = s.elapsed_label();
    for entry in s.set.context().drain_journal() {
        println!("[{label}] {entry}");
    }
    println!("{label}: {ran} delayed actions ran, {} pending", s.set.pending());
    Ok(())
}

pub async fn play(secs: Option<f32>, ctx: &CliContext) -> Result<(), String> {
    let limit = secs
        .map(Duration::try_from_secs_f32)
        .transpose()
        .map_err(|e| format!("{e}\n"))?;
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let tick_ms = ctx.config.read().await.tick_interval_ms.max(1);

    let mut tasks = ctx.tasks.lock().await;
    tasks.abort_all();
    tasks.playback = Some(spawn_playback(session, Duration::from_millis(tick_ms), limit));
    Ok(())
}

pub async fn stop(ctx: &CliContext) {
    ctx.tasks.lock().await.abort_all();
}

pub async fn show_variables(ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    let s = session.read().await;
    for (name, value) in s.set.context().variables() {
        println!("{name} = {value}");
    }
    Ok(())
}

pub async fn set_variable(name: &str, value: f64, ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session().await.ok_or("no definitions loaded\n")?;
    session.read().await.set.context().set_variable(name, value);
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match trigger_core::AppConfig::config_path() {
        Ok(path) => println!("config file: {}", path.display()),
        Err(err) => println!("config file: unavailable ({err})"),
    }
    println!("definitions_dir: {}", config.definitions_dir);
    println!("tick_interval_ms: {}", config.tick_interval_ms);
    println!("debug_logging: {}", config.debug_logging);
}

pub async fn set_directory(path: &str, ctx: &CliContext) -> Result<(), String> {
    let dir = PathBuf::from(path);
    if !(dir.exists() && dir.is_dir()) {
        return Err(format!("update failed, '{path}' is not a directory\n"));
    }

    let mut config = ctx.config.write().await;
    if config.definitions_dir == path {
        println!("definitions directory already set to {path}");
        return Ok(());
    }
    config.definitions_dir = path.to_string();
    config.save().map_err(|e| format!("{e}\n"))?;
    println!("definitions directory set to {path}");
    Ok(())
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").ok();
    std::io::stdout().flush().ok();
}
