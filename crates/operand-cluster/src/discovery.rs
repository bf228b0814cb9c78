//! API resource discovery.
//!
//! Mirrors the server's discovery document: one [`ApiResourceList`] per
//! group version, each listing the kinds it serves and whether they are
//! namespace-scoped.

use serde::{Deserialize, Serialize};

/// A resource served by the API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    /// Plural resource name (e.g., "operandrequests")
    pub name: String,
    /// Kind (e.g., "OperandRequest")
    pub kind: String,
    /// Whether the resource lives in a namespace
    #[serde(default)]
    pub namespaced: bool,
}

/// The resources served under one group version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    /// Group version (e.g., "operator.ibm.com/v1alpha1")
    pub group_version: String,
    /// Resources in this group version
    #[serde(default)]
    pub resources: Vec<ApiResource>,
}

impl ApiResourceList {
    /// Create a list for `group_version`.
    #[must_use]
    pub fn new(group_version: impl Into<String>, resources: Vec<ApiResource>) -> Self {
        Self {
            group_version: group_version.into(),
            resources,
        }
    }
}

/// Source of the server's resource lists.
pub trait Discovery {
    /// Fetch every resource list the server advertises.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] if the server cannot be queried.
    fn server_resources(&self) -> Result<Vec<ApiResourceList>, DiscoveryError>;
}

/// Discovery backed by a fixed set of resource lists.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    lists: Vec<ApiResourceList>,
}

impl StaticDiscovery {
    /// Create from resource lists.
    #[must_use]
    pub fn new(lists: Vec<ApiResourceList>) -> Self {
        Self { lists }
    }

    /// Parse a JSON array of resource lists.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Parse`] if the document is malformed.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DiscoveryError> {
        let lists =
            serde_json::from_slice(bytes).map_err(|e| DiscoveryError::Parse(e.to_string()))?;
        Ok(Self { lists })
    }
}

impl Discovery for StaticDiscovery {
    fn server_resources(&self) -> Result<Vec<ApiResourceList>, DiscoveryError> {
        Ok(self.lists.clone())
    }
}

/// Look up `kind` within `group_version`.
fn find_resource<D: Discovery + ?Sized>(
    dc: &D,
    group_version: &str,
    kind: &str,
) -> Result<Option<ApiResource>, DiscoveryError> {
    let lists = dc.server_resources()?;
    let found = lists
        .into_iter()
        .filter(|list| list.group_version == group_version)
        .flat_map(|list| list.resources)
        .find(|resource| resource.kind == kind);
    tracing::debug!(group_version, kind, found = found.is_some(), "Resource lookup");
    Ok(found)
}

/// Returns `true` if `kind` is served under `group_version`.
///
/// # Errors
///
/// Propagates the discovery failure.
pub fn resource_exists<D: Discovery + ?Sized>(
    dc: &D,
    group_version: &str,
    kind: &str,
) -> Result<bool, DiscoveryError> {
    Ok(find_resource(dc, group_version, kind)?.is_some())
}

/// Returns `true` if `kind` under `group_version` is namespace-scoped.
///
/// Unknown kinds report `false`.
///
/// # Errors
///
/// Propagates the discovery failure.
pub fn resource_namespaced<D: Discovery + ?Sized>(
    dc: &D,
    group_version: &str,
    kind: &str,
) -> Result<bool, DiscoveryError> {
    Ok(find_resource(dc, group_version, kind)?.is_some_and(|resource| resource.namespaced))
}

/// Errors that can occur during discovery.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiscoveryError {
    /// The server could not be reached
    #[error("discovery request error: {0}")]
    Request(String),
    /// The discovery document could not be parsed
    #[error("discovery parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl Discovery for Unreachable {
        fn server_resources(&self) -> Result<Vec<ApiResourceList>, DiscoveryError> {
            Err(DiscoveryError::Request("connection refused".to_string()))
        }
    }

    fn cluster() -> StaticDiscovery {
        StaticDiscovery::new(vec![
            ApiResourceList::new(
                "operator.ibm.com/v1alpha1",
                vec![ApiResource {
                    name: "operandrequests".to_string(),
                    kind: "OperandRequest".to_string(),
                    namespaced: true,
                }],
            ),
            ApiResourceList::new(
                "rbac.authorization.k8s.io/v1",
                vec![ApiResource {
                    name: "clusterroles".to_string(),
                    kind: "ClusterRole".to_string(),
                    namespaced: false,
                }],
            ),
        ])
    }

    #[test]
    fn exists_in_group_version() {
        let dc = cluster();
        assert!(resource_exists(&dc, "operator.ibm.com/v1alpha1", "OperandRequest").unwrap());
        assert!(!resource_exists(&dc, "operator.ibm.com/v1", "OperandRequest").unwrap());
        assert!(!resource_exists(&dc, "operator.ibm.com/v1alpha1", "OperandConfig").unwrap());
    }

    #[test]
    fn namespaced_lookup() {
        let dc = cluster();
        assert!(resource_namespaced(&dc, "operator.ibm.com/v1alpha1", "OperandRequest").unwrap());
        assert!(!resource_namespaced(&dc, "rbac.authorization.k8s.io/v1", "ClusterRole").unwrap());
        assert!(!resource_namespaced(&dc, "rbac.authorization.k8s.io/v1", "Missing").unwrap());
    }

    #[test]
    fn discovery_errors_propagate() {
        let err = resource_exists(&Unreachable, "v1", "Pod").unwrap_err();
        assert!(matches!(err, DiscoveryError::Request(_)));
        assert!(resource_namespaced(&Unreachable, "v1", "Pod").is_err());
    }

    #[test]
    fn from_discovery_document() {
        let doc = br#"[
            {"groupVersion": "v1", "resources": [
                {"name": "pods", "kind": "Pod", "namespaced": true},
                {"name": "nodes", "kind": "Node", "namespaced": false}
            ]}
        ]"#;
        let dc = StaticDiscovery::from_json(doc).unwrap();

        assert!(resource_namespaced(&dc, "v1", "Pod").unwrap());
        assert!(resource_exists(&dc, "v1", "Node").unwrap());
        assert!(!resource_namespaced(&dc, "v1", "Node").unwrap());
    }

    #[test]
    fn malformed_document_rejected() {
        let err = StaticDiscovery::from_json(b"{}").unwrap_err();
        assert!(matches!(err, DiscoveryError::Parse(_)));
    }
}
