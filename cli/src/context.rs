use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use trigger_core::{AppConfig, AppConfigExt, TriggerSet};

/// Loaded triggers plus the game clock that drives them.
pub struct Session {
    pub set: TriggerSet,
    /// Where the definitions came from
    pub source: PathBuf,
    pub started_at: NaiveDateTime,
    pub clock: NaiveDateTime,
}

impl Session {
    pub fn new(set: TriggerSet, source: PathBuf) -> Self {
        let now = Local::now().naive_local();
        Self {
            set,
            source,
            started_at: now,
            clock: now,
        }
    }

    /// Move the clock forward and run whatever came due. Returns how many ran.
    pub fn advance(&mut self, by: Duration) -> Result<usize, String> {
        let delta = TimeDelta::from_std(by).map_err(|e| e.to_string())?;
        self.clock = self
            .clock
            .checked_add_signed(delta)
            .ok_or("clock overflow")?;
        Ok(self.set.update(self.clock))
    }

    /// Game time since the session was loaded, as `t+1.25s`
    pub fn elapsed_label(&self) -> String {
        let elapsed = self.clock - self.started_at;
        format!("t+{:.2}s", elapsed.num_milliseconds() as f64 / 1000.0)
    }
}

pub type SessionHandle = Arc<RwLock<Session>>;

#[derive(Default)]
pub struct BackgroundTasks {
    pub playback: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.playback.take() {
            handle.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// None until definitions are loaded
    session: Arc<RwLock<Option<SessionHandle>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    /// Replace the current session. Any running playback is stopped first.
    pub async fn start_session(&self, set: TriggerSet, source: PathBuf) -> SessionHandle {
        self.tasks.lock().await.abort_all();
        let handle = Arc::new(RwLock::new(Session::new(set, source)));
        *self.session.write().await = Some(Arc::clone(&handle));
        handle
    }

    pub async fn session(&self) -> Option<SessionHandle> {
        self.session.read().await.clone()
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigger_core::{HostContext, load_definitions_from_file};

    const DEFS: &str = r#"
[[action]]
id = "ring"
type = "change_variable"
variable = "rings"
amount = 1.0

[[trigger]]
id = "bell"

[[trigger.actions]]
delay_secs = 1.5
action = "ring"
"#;

    fn session() -> Session {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bell.toml");
        std::fs::write(&path, DEFS).unwrap();

        let defs = load_definitions_from_file(&path).unwrap();
        let set = TriggerSet::from_definitions(defs, HostContext::new("bell")).unwrap();
        Session::new(set, path)
    }

    #[test]
    fn advance_runs_due_actions() {
        let mut s = session();
        let now = s.clock;
        assert!(s.set.activate("bell", now).unwrap().is_dispatched());

        assert_eq!(s.advance(Duration::from_secs(1)).unwrap(), 0);
        assert_eq!(s.advance(Duration::from_millis(500)).unwrap(), 1);
        assert_eq!(s.set.context().variable("rings"), Some(1.0));
        assert_eq!(s.elapsed_label(), "t+1.50s");
    }
}
