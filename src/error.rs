//! Error kinds surfaced by the recipe query engine.
//!
//! Store-level code keeps returning `anyhow::Result` with context; every
//! public `RecipeManager` operation converts failures into exactly one
//! `QueryError` before handing them to the caller.

use neo4rs::{Neo4jClientErrorKind, Neo4jErrorKind, Neo4jSecurityErrorKind};
use thiserror::Error;

/// Failure of a single logical read request.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A single-entity lookup matched nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller supplied a parameter outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Store unreachable, failing, or the request deadline elapsed.
    /// Retrying the whole request is safe.
    #[error("graph store unavailable: {0}")]
    TransientStore(String),

    /// The graph violates an invariant the engine relies on
    /// (duplicate ids, undecodable records)
    #[error("data integrity fault: {0}")]
    DataIntegrity(String),

    /// The store refused the request for a reason a retry cannot fix:
    /// bad credentials, invalid configuration, a rejected query.
    #[error("graph store rejected the request: {0}")]
    StoreRejected(String),
}

impl QueryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::TransientStore(message.into())
    }

    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity(message.into())
    }

    pub fn store_rejected(message: impl Into<String>) -> Self {
        Self::StoreRejected(message.into())
    }

    /// Map a store-layer error to a query error.
    ///
    /// A `QueryError` raised inside the store and carried through `anyhow`
    /// keeps its kind. A `neo4rs::Error` anywhere in the chain is classified
    /// by [`Self::from_neo4j`]. Anything else is a transient store failure.
    pub fn from_store(err: anyhow::Error) -> Self {
        let err = match err.downcast::<QueryError>() {
            Ok(query_err) => return query_err,
            Err(other) => other,
        };

        let message = format!("{:#}", err);
        match err
            .chain()
            .find_map(|cause| cause.downcast_ref::<neo4rs::Error>())
        {
            Some(neo4j_err) => Self::from_neo4j(neo4j_err, message),
            None => Self::TransientStore(message),
        }
    }

    /// Classify a driver error; `message` is the full context chain.
    pub fn from_neo4j(err: &neo4rs::Error, message: String) -> Self {
        use neo4rs::Error as E;

        match err {
            E::IOError { .. } | E::ConnectionError => Self::TransientStore(message),
            E::Neo4j(server) => Self::from_server_kind(server.kind(), message),
            E::DeserializationError(_)
            | E::ConversionError
            | E::UnknownType(_)
            | E::InvalidTypeMarker(_) => Self::DataIntegrity(message),
            _ => Self::StoreRejected(message),
        }
    }

    /// Classify an error reported by the server from its status code class.
    ///
    /// Transient errors, expired sessions and expired authorizations may
    /// succeed on retry; every other client or database error will not.
    pub fn from_server_kind(kind: Neo4jErrorKind, message: String) -> Self {
        match kind {
            Neo4jErrorKind::Transient
            | Neo4jErrorKind::Client(Neo4jClientErrorKind::SessionExpired)
            | Neo4jErrorKind::Client(Neo4jClientErrorKind::Security(
                Neo4jSecurityErrorKind::AuthorizationExpired,
            )) => Self::TransientStore(message),
            _ => Self::StoreRejected(message),
        }
    }

    /// Whether the caller may retry the whole request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientStore(_))
    }

    /// Short machine-readable kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::TransientStore(_) => "transient_store",
            Self::DataIntegrity(_) => "data_integrity",
            Self::StoreRejected(_) => "store_rejected",
        }
    }
}

/// Result alias for manager operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;
