use std::path::{Path, PathBuf};

use anyhow::Context as _;
use env_flags::env_flags;
use serde::Deserialize;

/// Optional `<home>/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub lookup: Option<LookupCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupCfg {
    /// "pass_through", "fallback" or "error"
    pub unknown_policy: Option<String>,
    pub fallback_label: Option<String>,
}

pub fn from_toml_str(s: &str) -> anyhow::Result<UserConfig> {
    let cfg: UserConfig = toml::from_str(s)?;
    Ok(cfg)
}

/// Load `<home>/config.toml`; `Ok(None)` when the file does not exist.
pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let cfg = from_toml_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

/// `REPORT_NAMES_HOME`, else `$HOME/.report-names`, else `./.report-names`.
pub fn names_home() -> PathBuf {
    env_flags! {
        /// Home directory for config and logs (absolute). Defaults to $HOME/.report-names
        REPORT_NAMES_HOME: &str = "";
    }

    if !(*REPORT_NAMES_HOME).is_empty() {
        expand_home(&(*REPORT_NAMES_HOME).to_string())
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".report-names")
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".report-names")
    }
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_logging_and_lookup_sections() {
        let toml = r#"
[logging]
level = "debug"
json = true

[lookup]
unknown_policy = "fallback"
fallback_label = "Unlisted"
"#;
        let cfg = from_toml_str(toml).expect("parse ok");
        let logging = cfg.logging.expect("logging section");
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.json, Some(true));
        assert_eq!(logging.to_file, None);
        let lookup = cfg.lookup.expect("lookup section");
        assert_eq!(lookup.unknown_policy.as_deref(), Some("fallback"));
        assert_eq!(lookup.fallback_label.as_deref(), Some("Unlisted"));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = from_toml_str("").expect("parse ok");
        assert!(cfg.logging.is_none());
        assert!(cfg.lookup.is_none());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_user_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn loads_file_from_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("config.toml")).unwrap();
        f.write_all(b"[lookup]\nunknown_policy = \"error\"\n").unwrap();
        f.sync_all().ok();

        let cfg = load_user_config(dir.path()).unwrap().expect("config present");
        assert_eq!(
            cfg.lookup.and_then(|l| l.unknown_policy).as_deref(),
            Some("error")
        );
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[lookup\nunknown_policy=").unwrap();
        let err = load_user_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/var/log/names"), PathBuf::from("/var/log/names"));
    }
}
