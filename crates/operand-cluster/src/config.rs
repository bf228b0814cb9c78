//! Operator settings read from the environment.

/// Install scope used when `INSTALL_SCOPE` is unset.
pub const DEFAULT_INSTALL_SCOPE: &str = "cluster";

/// Operator runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSettings {
    /// Namespace the operator runs in (empty if unknown)
    pub operator_namespace: String,

    /// Namespace watched for resources
    pub watch_namespace: String,

    /// Installation scope, e.g. "cluster" or "namespace"
    pub install_scope: String,

    /// Run without touching resources outside the watch namespace
    pub isolated_mode: bool,

    /// Operator checker explicitly switched off
    pub operator_checker_disabled: bool,
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            operator_namespace: String::new(),
            watch_namespace: String::new(),
            install_scope: DEFAULT_INSTALL_SCOPE.to_string(),
            isolated_mode: false,
            operator_checker_disabled: false,
        }
    }
}

impl OperatorSettings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPERATOR_NAMESPACE`: Namespace of the operator
    /// - `WATCH_NAMESPACE`: Watched namespace (defaults to `OPERATOR_NAMESPACE`)
    /// - `INSTALL_SCOPE`: Installation scope (defaults to "cluster")
    /// - `ISOLATED_MODE`: Enabled only by the exact value "true"
    /// - `OPERATORCHECKER_MODE`: The exact value "false" disables the checker
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(ns) = lookup("OPERATOR_NAMESPACE") {
            settings.operator_namespace = ns;
        }

        settings.watch_namespace =
            lookup("WATCH_NAMESPACE").unwrap_or_else(|| settings.operator_namespace.clone());

        if let Some(scope) = lookup("INSTALL_SCOPE") {
            settings.install_scope = scope;
        }

        settings.isolated_mode = lookup("ISOLATED_MODE").as_deref() == Some("true");
        settings.operator_checker_disabled =
            lookup("OPERATORCHECKER_MODE").as_deref() == Some("false");

        tracing::debug!(
            operator_namespace = %settings.operator_namespace,
            watch_namespace = %settings.watch_namespace,
            install_scope = %settings.install_scope,
            isolated_mode = settings.isolated_mode,
            operator_checker_disabled = settings.operator_checker_disabled,
            "Loaded operator settings"
        );

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> OperatorSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        OperatorSettings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(settings(&[]), OperatorSettings::default());
        assert_eq!(settings(&[]).install_scope, "cluster");
    }

    #[test]
    fn watch_namespace_falls_back_to_operator_namespace() {
        let s = settings(&[("OPERATOR_NAMESPACE", "ibm-common-services")]);
        assert_eq!(s.watch_namespace, "ibm-common-services");

        let s = settings(&[
            ("OPERATOR_NAMESPACE", "ibm-common-services"),
            ("WATCH_NAMESPACE", "tenant-a,tenant-b"),
        ]);
        assert_eq!(s.operator_namespace, "ibm-common-services");
        assert_eq!(s.watch_namespace, "tenant-a,tenant-b");
    }

    #[test]
    fn install_scope_override() {
        assert_eq!(settings(&[("INSTALL_SCOPE", "namespace")]).install_scope, "namespace");
    }

    #[test]
    fn isolated_mode_requires_exact_true() {
        assert!(settings(&[("ISOLATED_MODE", "true")]).isolated_mode);
        assert!(!settings(&[("ISOLATED_MODE", "TRUE")]).isolated_mode);
        assert!(!settings(&[("ISOLATED_MODE", "1")]).isolated_mode);
    }

    #[test]
    fn operator_checker_disabled_only_by_false() {
        assert!(settings(&[("OPERATORCHECKER_MODE", "false")]).operator_checker_disabled);
        assert!(!settings(&[("OPERATORCHECKER_MODE", "true")]).operator_checker_disabled);
        assert!(!settings(&[]).operator_checker_disabled);
    }
}
