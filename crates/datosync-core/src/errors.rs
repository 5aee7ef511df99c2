use serde_json::Value;
use thiserror::Error;

/// Result type alias using DatoSyncError
pub type Result<T> = std::result::Result<T, DatoSyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events, diagnostics and
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// A local snapshot is unreadable or is not a JSON array of models
    InvalidSnapshot,

    // Normalization defects
    /// A titleField, orderingField or validator itemType id does not resolve
    UnresolvedReference,
    /// Two models (or two fields of one model) share an apiKey
    DuplicateKey,

    // Integration/IO
    Io,
    Serialization,
    /// The remote API answered with an error or could not be reached
    ExternalService,
    /// The remote API rejected the access token
    Unauthorised,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::UnresolvedReference => "ERR_UNRESOLVED_REFERENCE",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling, the HTTP status of
/// remote failures, and an optional raw JSON payload that diagnostics print
/// verbatim.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_key: Option<String>,
    status_code: Option<u16>,
    status_text: Option<String>,
    message: String,
    details: Option<Value>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_key: None,
            status_code: None,
            status_text: None,
            message: String::new(),
            details: None,
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the apiKey (or `model/field` path) the error relates to
    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    /// Set the HTTP status code of a remote failure
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Set the HTTP status text of a remote failure
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    /// Set the human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the raw error payload
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if set
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity key, if set
    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    /// Get the HTTP status code, if set
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Get the HTTP status text, if set
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the raw error payload, if set
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.entity_key {
            write!(f, " (entity: {})", key)?;
        }
        if let Some(status) = self.status_code {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised while turning raw records into canonical form
///
/// All of these indicate malformed source data rather than a difference
/// between two snapshots.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatoSyncError {
    /// A model's titleField id matches none of its own fields
    #[error("Model {model} has titleField {field_id} which matches none of its fields")]
    TitleFieldNotFound { model: String, field_id: String },

    /// A model's orderingField id matches none of its own fields
    #[error("Model {model} has orderingField {field_id} which matches none of its fields")]
    OrderingFieldNotFound { model: String, field_id: String },

    /// A validator references a model id absent from the snapshot
    #[error("Field {model}/{field} validator {validator} references unknown model id {item_type_id}")]
    UnknownItemType {
        model: String,
        field: String,
        validator: String,
        item_type_id: String,
    },

    /// A validator's itemTypes entry is not a string id
    #[error("Field {model}/{field} validator {validator} has a non-string itemTypes entry")]
    MalformedItemTypes {
        model: String,
        field: String,
        validator: String,
    },

    /// Two models share an apiKey
    #[error("Duplicate model apiKey: {model}")]
    DuplicateModelKey { model: String },

    /// Two fields of one model share an apiKey
    #[error("Duplicate field apiKey {field} in model {model}")]
    DuplicateFieldKey { model: String, field: String },
}

impl From<DatoSyncError> for ExError {
    fn from(err: DatoSyncError) -> Self {
        let message = err.to_string();
        match err {
            DatoSyncError::TitleFieldNotFound { model, .. }
            | DatoSyncError::OrderingFieldNotFound { model, .. } => {
                ExError::new(ExErrorKind::UnresolvedReference)
                    .with_entity_key(model)
                    .with_message(message)
            }
            DatoSyncError::UnknownItemType { model, field, .. }
            | DatoSyncError::MalformedItemTypes { model, field, .. } => {
                ExError::new(ExErrorKind::UnresolvedReference)
                    .with_entity_key(format!("{}/{}", model, field))
                    .with_message(message)
            }
            DatoSyncError::DuplicateModelKey { model } => ExError::new(ExErrorKind::DuplicateKey)
                .with_entity_key(model)
                .with_message(message),
            DatoSyncError::DuplicateFieldKey { model, field } => {
                ExError::new(ExErrorKind::DuplicateKey)
                    .with_entity_key(format!("{}/{}", model, field))
                    .with_message(message)
            }
        }
    }
}
