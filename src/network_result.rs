/// State of one asynchronous fetch, as seen by the UI.
///
/// A fresh value is published for every transition; values are never mutated
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResult<T> {
    /// Request in flight
    Loading,
    /// Request completed with a payload
    Success(T),
    /// Request failed with a user-facing message
    Error { message: String, data: Option<T> },
}

impl<T> NetworkResult<T> {
    pub fn loading() -> Self {
        NetworkResult::Loading
    }

    pub fn success(data: T) -> Self {
        NetworkResult::Success(data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        NetworkResult::Error {
            message: message.into(),
            data: None,
        }
    }

    pub fn error_with_data(message: impl Into<String>, data: T) -> Self {
        NetworkResult::Error {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, NetworkResult::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NetworkResult::Error { .. })
    }

    /// Payload carried by `Success`, or by `Error` when one was attached
    pub fn data(&self) -> Option<&T> {
        match self {
            NetworkResult::Loading => None,
            NetworkResult::Success(data) => Some(data),
            NetworkResult::Error { data, .. } => data.as_ref(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            NetworkResult::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> NetworkResult<U> {
        match self {
            NetworkResult::Loading => NetworkResult::Loading,
            NetworkResult::Success(data) => NetworkResult::Success(f(data)),
            NetworkResult::Error { message, data } => NetworkResult::Error {
                message,
                data: data.map(f),
            },
        }
    }
}
