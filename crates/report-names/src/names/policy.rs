//! What a display lookup does with an identifier that has no entry.

use env_flags::env_flags;
use once_cell::sync::OnceCell;

use crate::config::{self, LookupCfg};
use crate::error::NameError;

/// Placeholder shown by [`UnknownKeyPolicy::Fallback`] when none is configured.
pub const DEFAULT_FALLBACK_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Show the raw identifier.
    #[default]
    PassThrough,
    /// Show a fixed placeholder label.
    Fallback(String),
    /// Treat the miss as [`NameError::UnknownIdentifier`].
    Error,
}

static POLICY: OnceCell<UnknownKeyPolicy> = OnceCell::new();

impl UnknownKeyPolicy {
    /// Parse a policy name (`pass_through`, `fallback` or `error`).
    /// `label` is only used by `fallback`.
    pub fn parse(kind: &str, label: Option<&str>) -> Result<Self, NameError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "pass_through" | "passthrough" | "identifier" => Ok(Self::PassThrough),
            "fallback" | "placeholder" => Ok(Self::Fallback(
                label
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or(DEFAULT_FALLBACK_LABEL)
                    .to_string(),
            )),
            "error" | "strict" => Ok(Self::Error),
            _ => Err(NameError::InvalidPolicy(kind.to_string())),
        }
    }

    /// The process-wide policy. Resolved from env and the user config on first
    /// use unless [`init_policy`] ran earlier; fixed afterwards.
    pub fn global() -> &'static UnknownKeyPolicy {
        POLICY.get_or_init(|| {
            let home = config::names_home();
            let user_cfg = match config::load_user_config(&home) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("ignoring unreadable config under {}: {:#}", home.display(), e);
                    None
                }
            };
            let policy = resolve_policy(user_cfg.as_ref().and_then(|c| c.lookup.as_ref()));
            tracing::debug!(?policy, "unknown-key policy resolved");
            policy
        })
    }
}

/// Install the process-wide policy. Fails once a policy is in place, including
/// one resolved implicitly by [`UnknownKeyPolicy::global`].
pub fn init_policy(policy: UnknownKeyPolicy) -> Result<(), NameError> {
    POLICY.set(policy).map_err(|_| NameError::PolicyAlreadySet)
}

/// Resolve the policy with env taking precedence over `cfg`.
pub fn resolve_policy(cfg: Option<&LookupCfg>) -> UnknownKeyPolicy {
    env_flags! {
        /// Unknown-key policy: "pass_through", "fallback" or "error". Empty defers to config.
        REPORT_NAMES_UNKNOWN_POLICY: &str = "";
        /// Placeholder for the "fallback" policy. Empty defers to config.
        REPORT_NAMES_FALLBACK_LABEL: &str = "";
    }

    let env_kind = (*REPORT_NAMES_UNKNOWN_POLICY).to_string();
    let env_label = (*REPORT_NAMES_FALLBACK_LABEL).to_string();
    policy_from_sources(
        Some(env_kind.as_str()).filter(|s| !s.is_empty()),
        Some(env_label.as_str()).filter(|s| !s.is_empty()),
        cfg,
    )
}

fn policy_from_sources(
    env_kind: Option<&str>,
    env_label: Option<&str>,
    cfg: Option<&LookupCfg>,
) -> UnknownKeyPolicy {
    let kind = env_kind.or_else(|| cfg.and_then(|c| c.unknown_policy.as_deref()));
    let label = env_label.or_else(|| cfg.and_then(|c| c.fallback_label.as_deref()));
    let Some(kind) = kind else {
        return UnknownKeyPolicy::default();
    };
    match UnknownKeyPolicy::parse(kind, label) {
        Ok(policy) => policy,
        Err(e) => {
            tracing::warn!("{}; using pass_through", e);
            UnknownKeyPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(policy: Option<&str>, label: Option<&str>) -> LookupCfg {
        LookupCfg {
            unknown_policy: policy.map(|s| s.to_string()),
            fallback_label: label.map(|s| s.to_string()),
        }
    }

    #[test]
    fn parse_accepts_names_and_aliases() {
        assert_eq!(
            UnknownKeyPolicy::parse("pass_through", None).unwrap(),
            UnknownKeyPolicy::PassThrough
        );
        assert_eq!(
            UnknownKeyPolicy::parse(" Strict ", None).unwrap(),
            UnknownKeyPolicy::Error
        );
        assert_eq!(
            UnknownKeyPolicy::parse("fallback", Some("n/a")).unwrap(),
            UnknownKeyPolicy::Fallback("n/a".into())
        );
        assert_eq!(
            UnknownKeyPolicy::parse("fallback", Some("  ")).unwrap(),
            UnknownKeyPolicy::Fallback(DEFAULT_FALLBACK_LABEL.into())
        );
        assert_eq!(
            UnknownKeyPolicy::parse(" Panic ", None).unwrap_err(),
            NameError::InvalidPolicy(" Panic ".into())
        );
    }

    #[test]
    fn env_wins_over_config() {
        let c = cfg(Some("fallback"), Some("Other"));
        assert_eq!(
            policy_from_sources(Some("error"), None, Some(&c)),
            UnknownKeyPolicy::Error
        );
        assert_eq!(
            policy_from_sources(None, Some("Missing"), Some(&c)),
            UnknownKeyPolicy::Fallback("Missing".into())
        );
    }

    #[test]
    fn config_used_when_env_absent() {
        let c = cfg(Some("fallback"), None);
        assert_eq!(
            policy_from_sources(None, None, Some(&c)),
            UnknownKeyPolicy::Fallback("Unknown".into())
        );
    }

    #[test]
    fn defaults_to_pass_through() {
        assert_eq!(policy_from_sources(None, None, None), UnknownKeyPolicy::PassThrough);
        assert_eq!(
            policy_from_sources(None, Some("x"), Some(&cfg(None, None))),
            UnknownKeyPolicy::PassThrough
        );
        // unparseable values degrade rather than fail
        assert_eq!(
            policy_from_sources(Some("bogus"), None, None),
            UnknownKeyPolicy::PassThrough
        );
    }

    #[test]
    fn policy_cannot_be_replaced_once_resolved() {
        let _ = UnknownKeyPolicy::global();
        assert_eq!(
            init_policy(UnknownKeyPolicy::Error),
            Err(NameError::PolicyAlreadySet)
        );
    }
}
