/// Failures reported by the npm registry and downloads APIs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The registry has no package by this name
    #[error("package '{0}' not found")]
    PackageNotFound(String),

    /// The registry answered but the document lacks something essential
    #[error("{0}")]
    PackageData(String),

    /// Transport failure or unexpected HTTP status
    #[error("registry request failed{}: {message}", status_suffix(*.status))]
    Upstream { status: Option<u16>, message: String },
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}
