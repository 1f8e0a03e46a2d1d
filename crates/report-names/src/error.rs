use thiserror::Error;

use crate::names::Namespace;

/// Errors raised by name lookups and policy setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The identifier has no entry in the table for `namespace`.
    #[error("unknown {namespace} identifier '{key}'")]
    UnknownIdentifier { namespace: Namespace, key: String },
    #[error("unknown-key policy is already set for this process")]
    PolicyAlreadySet,
    #[error("invalid unknown-key policy '{0}' (expected pass_through, fallback or error)")]
    InvalidPolicy(String),
}

impl NameError {
    /// True for a missed lookup, as opposed to a setup problem.
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(self, NameError::UnknownIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identifier_message_names_namespace_and_key() {
        let err = NameError::UnknownIdentifier {
            namespace: Namespace::Task,
            key: "sepsis_sql".into(),
        };
        assert_eq!(err.to_string(), "unknown task identifier 'sepsis_sql'");
        assert!(err.is_unknown_identifier());
        assert!(!NameError::PolicyAlreadySet.is_unknown_identifier());
    }
}
