//! Error types for sealing operations.

use thiserror::Error;

/// The main error type for sealedsecret operations.
///
/// Every variant is terminal for the operation that produced it: a failed
/// create records nothing, whether it sealed one value or a whole map.
#[derive(Error, Debug)]
pub enum SealError {
    /// Scope token is not one of `strict`, `namespace-wide`, `cluster-wide`
    #[error("Invalid scope '{0}': expected one of strict, namespace-wide, cluster-wide")]
    InvalidScope(String),

    /// Certificate or key bytes could not be decoded
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// Decoded key is not an RSA public key
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Certificate validity window has already closed
    #[error("Refusing to seal with a certificate that expired on {not_after}")]
    ExpiredCertificate {
        /// Expiry date of the certificate, human readable
        not_after: String,
    },

    /// Key wrapping or payload encryption was rejected
    #[error("Encryption failure: {0}")]
    EncryptionFailure(String),

    /// Encoded ciphertext does not have the sealed envelope layout
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// A required request attribute was not supplied
    #[error("Missing required attribute `{0}`")]
    MissingAttribute(&'static str),

    /// A request attribute has the wrong shape
    #[error("Invalid attribute `{attribute}`: {reason}")]
    InvalidAttribute {
        /// Attribute name as the host sees it
        attribute: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal bug - should never happen in production
    #[error("Bug detected: {0}\n\nThis is an internal error. Please report this issue at:\nhttps://github.com/sealedsecret/sealedsecret-rs/issues")]
    Bug(String),
}

impl SealError {
    /// Whether the error came from the certificate input rather than the
    /// request shape or the cipher.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            SealError::MalformedKey(_)
                | SealError::UnsupportedKeyType(_)
                | SealError::ExpiredCertificate { .. }
        )
    }
}

/// A specialized Result type for sealedsecret operations.
pub type Result<T> = std::result::Result<T, SealError>;

/// Helper macro to create and return a SealError::Bug
///
/// This should be used for conditions that should never occur
/// in normal operation.
///
/// # Example
///
/// ```ignore
/// if wrapped.len() > u16::MAX as usize {
///     bug!("wrapped key of {} bytes does not fit the length prefix", wrapped.len());
/// }
/// ```
#[macro_export]
macro_rules! bug {
    ($msg:expr) => {
        return Err($crate::SealError::Bug($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::SealError::Bug(format!($fmt, $($arg)*)))
    };
}

/// Helper macro to bail out with a SealError carrying a message.
///
/// # Example
///
/// ```ignore
/// if bytes.is_empty() {
///     bail!(MalformedKey, "certificate is empty");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::SealError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::SealError::$variant(format!($fmt, $($arg)*)))
    };
}
