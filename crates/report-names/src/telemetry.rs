//! Tracing setup for applications that consume the registry.
//!
//! Env wins over `[logging]` in the user config, which wins over defaults.
//! Output goes to stderr and, when enabled, to a daily rolling file.

use std::path::{Path, PathBuf};

use env_flags::env_flags;
use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, prelude::*};

use crate::config::{LoggingCfg, load_user_config};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Json,
    Compact,
    Pretty,
    Full,
}

impl LogStyle {
    /// JSON beats compact beats pretty; none set means the full formatter.
    pub fn select(json: bool, compact: bool, pretty: bool) -> Self {
        if json {
            LogStyle::Json
        } else if compact {
            LogStyle::Compact
        } else if pretty {
            LogStyle::Pretty
        } else {
            LogStyle::Full
        }
    }
}

/// Resolved logging knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub style: LogStyle,
    pub to_file: bool,
    pub dir: PathBuf,
}

impl LogSettings {
    pub fn resolve(home: &Path, cfg: Option<&LoggingCfg>) -> Self {
        env_flags! {
            /// Tracing filter, e.g. "info", "debug", or targets format.
            RUST_LOG: &str = "info";
            /// Preferred filter env (alias). If set, overrides RUST_LOG.
            TRACING_FILTER: &str = "";
            /// Pretty formatting (ignored if TRACING_JSON=true).
            TRACING_PRETTY: bool = false;
            /// Compact single-line formatting (ignored if TRACING_JSON=true).
            TRACING_COMPACT: bool = true;
            /// JSON formatting
            TRACING_JSON: bool = false;
            /// Also log to a file under <REPORT_NAMES_HOME>/logs or LOG_DIR
            LOG_TO_FILE: bool = false;
            /// Optional explicit log directory (absolute).
            LOG_DIR: &str = "";
        }

        let env_set = |k: &str| std::env::var_os(k).is_some();
        let pick = |k: &str, env: bool, from_cfg: Option<bool>| {
            if env_set(k) { env } else { from_cfg.unwrap_or(env) }
        };

        let tracing_filter = env_set("TRACING_FILTER").then(|| (*TRACING_FILTER).to_string());
        let rust_log = env_set("RUST_LOG").then(|| (*RUST_LOG).to_string());
        let filter = select_filter(
            tracing_filter.as_deref(),
            rust_log.as_deref(),
            cfg.and_then(|c| c.level.as_deref()),
        );

        let json = pick("TRACING_JSON", *TRACING_JSON, cfg.and_then(|c| c.json));
        let compact = pick("TRACING_COMPACT", *TRACING_COMPACT, cfg.and_then(|c| c.compact));
        let pretty = pick("TRACING_PRETTY", *TRACING_PRETTY, cfg.and_then(|c| c.pretty));
        let to_file = pick("LOG_TO_FILE", *LOG_TO_FILE, cfg.and_then(|c| c.to_file));

        let dir = if !(*LOG_DIR).is_empty() {
            PathBuf::from((*LOG_DIR).to_string())
        } else if let Some(dir) = cfg.and_then(|c| c.dir.as_ref()) {
            crate::config::expand_home(dir)
        } else {
            home.join("logs")
        };

        Self {
            filter,
            style: LogStyle::select(json, compact, pretty),
            to_file,
            dir,
        }
    }
}

const DEFAULT_FILTER: &str = "info";

/// Filter directive from env vars that are set (possibly empty) and the
/// config level. The config only applies when neither env var is present.
fn select_filter(
    tracing_filter: Option<&str>,
    rust_log: Option<&str>,
    cfg_level: Option<&str>,
) -> String {
    if let Some(f) = tracing_filter.filter(|f| !f.is_empty()) {
        return f.to_string();
    }
    if tracing_filter.is_some() || rust_log.is_some() {
        return rust_log.unwrap_or(DEFAULT_FILTER).to_string();
    }
    cfg_level.unwrap_or(DEFAULT_FILTER).to_string()
}

fn fmt_layer<W>(writer: W, ansi: bool, style: LogStyle) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match style {
        LogStyle::Json => base.json().boxed(),
        LogStyle::Compact => base.compact().boxed(),
        LogStyle::Pretty => base.pretty().boxed(),
        LogStyle::Full => base.boxed(),
    }
}

/// Install a global subscriber. Safe to call more than once; later calls are
/// no-ops and do not touch the log directory.
pub fn init_tracing(home: &Path) {
    let user_cfg = load_user_config(home).ok().flatten();
    let settings = LogSettings::resolve(home, user_cfg.as_ref().and_then(|c| c.logging.as_ref()));
    init_with(&settings);
}

pub fn init_with(settings: &LogSettings) {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("tracing already set; skipping init");
        return;
    }
    let filter = EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(std::io::stderr, true, settings.style)];
    let mut file_err = None;
    if settings.to_file {
        match std::fs::create_dir_all(&settings.dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&settings.dir, "report-names.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(fmt_layer(nb, false, settings.style));
            }
            Err(e) => file_err = Some(e),
        }
    }

    let subscriber = tracing_subscriber::registry().with(filter).with(layers);
    if let Err(e) = subscriber.try_init() {
        tracing::debug!("tracing already set: {:?}", e);
        return;
    }
    if let Some(e) = file_err {
        tracing::warn!("failed to create log dir {}: {}", settings.dir.display(), e);
    }
}
