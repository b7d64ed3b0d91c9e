//! jsend-core
//!
//! The JSend response envelope: a `status` of success, fail or error, plus the
//! fields that status prescribes.
//!
//! # Modules
//! - **status**: the closed `Status` enum
//! - **envelope**: `Envelope` construction, serialization and parsing
//! - **truthy**: the emptiness rule for optional fields
//! - **error**: `JSendError` / `ParseError`
//!
//! ```
//! use jsend_core::{Envelope, Status};
//! use serde_json::json;
//!
//! let body = Envelope::success(json!({"id": 1})).to_json()?;
//! assert_eq!(body, r#"{"status":"success","data":{"id":1}}"#);
//!
//! let parsed = Envelope::parse(&body)?;
//! assert_eq!(parsed.status(), Status::Success);
//! # Ok::<(), jsend_core::JSendError>(())
//! ```

pub mod envelope;
pub mod error;
pub mod status;
pub mod truthy;

pub use self::envelope::{DEFAULT_PARSED_CODE, Envelope};
pub use self::error::{JSendError, ParseError};
pub use self::status::Status;
