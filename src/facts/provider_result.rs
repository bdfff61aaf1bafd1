use std::sync::Arc;

/// Outcome of asking one data source about a package
#[derive(Debug, Clone)]
pub enum ProviderResult<T> {
    /// The source answered and its data was normalized.
    Found(T),

    /// The source was never queried because the package gives it nothing to look up,
    /// e.g. hosting facts for a package without a GitHub repository.
    Unavailable,

    /// The source was queried and the lookup failed.
    Error(Arc<ohno::AppError>),
}

impl<T, E> From<Result<T, E>> for ProviderResult<T>
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Found(data),
            Err(e) => Self::Error(Arc::new(ohno::AppError::new(e))),
        }
    }
}
