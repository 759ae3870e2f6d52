// Cadastro - registration form engine
// Field masking and validation policy, submission gating, payload building and transport

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod notification;
pub mod payload;
pub mod route;
pub mod storage;
pub mod transport;

pub use config::{Config, EndpointConfig, ServerConfig, StorageBackend, StorageConfig, ValidationConfig};
pub use error::{FormError, RouteError, SubmitBlocked};
pub use field::{FieldController, FieldInput, FieldValue, Phase, ValidationTrigger};
pub use form::{
    FieldSnapshot, FormEvent, FormRecord, FormSnapshot, FormState, RegistrationForm, SubmissionStatus,
    SubmitOutcome,
};
pub use notification::{Notification, NotificationKind};
pub use payload::SubmissionPayload;
pub use route::EntryRoute;
pub use storage::{open_storage, FilesystemStorage, MemoryStorage, Storage};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

// Re-export the pure validation layer
pub use cadastro_validation::{self as validation, FieldError, FieldKind, UnknownField};
