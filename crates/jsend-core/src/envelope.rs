//! Envelope: the JSend response value.
//!
//! The same type serves both ends of the wire. A producer builds an envelope
//! and serializes it onto a response body; a consumer parses a body back into
//! an envelope and branches on its status.
//!
//! # Wire shapes
//! - success / fail: `{"status", "data"}`; `data` is always present, possibly null.
//! - error: `{"status", "message"}` followed by `code` and `data` only when set.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{JSendError, ParseError};
use crate::status::Status;
use crate::truthy::is_truthy;

/// Code assigned by `parse` when the document does not carry one.
pub const DEFAULT_PARSED_CODE: i64 = 200;

/// A JSend response.
///
/// Fields are private so the status can only ever hold one of the three
/// [`Status`] values; an unset optional field is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    status: Status,
    data: Option<Value>,
    code: Option<i64>,
    message: Option<String>,
}

impl Envelope {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            data: None,
            code: None,
            message: None,
        }
    }

    pub fn success(data: Value) -> Self {
        Self::new(Status::Success).with_data(data)
    }

    pub fn fail(data: Value) -> Self {
        Self::new(Status::Fail).with_data(data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error).with_message(message)
    }

    /// Build an envelope from loosely-typed producer input.
    ///
    /// Empty arguments (see [`crate::truthy`]) count as not supplied: a `code`
    /// of `0`, an empty `message` or a null/empty `data` leave the field unset.
    ///
    /// # Errors
    /// `JSendError::InvalidStatus` when `status` is not success, fail or error.
    pub fn create<S>(
        status: S,
        data: Option<Value>,
        code: Option<i64>,
        message: Option<String>,
    ) -> Result<Self, JSendError>
    where
        S: TryInto<Status>,
        JSendError: From<S::Error>,
    {
        let mut envelope = Self::new(status.try_into()?);
        if let Some(data) = data.filter(is_truthy) {
            envelope.set_data(data);
        }
        if let Some(code) = code.filter(|c| *c != 0) {
            envelope.set_code(code);
        }
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            envelope.set_message(message);
        }
        Ok(envelope)
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_fail(&self) -> bool {
        self.status == Status::Fail
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// True when data is set and not empty.
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(is_truthy)
    }

    /// True when message is set and not empty.
    pub fn has_message(&self) -> bool {
        self.message.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Decode the payload into a caller-defined type.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, JSendError> {
        let data = self.data.as_ref().ok_or(ParseError::MissingField("data"))?;
        let decoded = T::deserialize(data).map_err(ParseError::from)?;
        Ok(decoded)
    }

    // ========================================
    // Mutators
    // ========================================

    /// Replace the status.
    ///
    /// Accepts either a [`Status`] (never fails) or a `&str` (validated).
    pub fn set_status<S>(&mut self, status: S) -> Result<&mut Self, JSendError>
    where
        S: TryInto<Status>,
        JSendError: From<S::Error>,
    {
        self.status = status.try_into()?;
        Ok(self)
    }

    /// Replace the payload. `Value::Null` clears it.
    pub fn set_data(&mut self, data: Value) -> &mut Self {
        self.data = (!data.is_null()).then_some(data);
        self
    }

    pub fn set_code(&mut self, code: i64) -> &mut Self {
        self.code = Some(code);
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.set_data(data);
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.set_code(code);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    // ========================================
    // Wire format
    // ========================================

    pub fn to_json(&self) -> Result<String, JSendError> {
        serde_json::to_string(self).map_err(JSendError::Encode)
    }

    pub fn to_json_pretty(&self) -> Result<String, JSendError> {
        serde_json::to_string_pretty(self).map_err(JSendError::Encode)
    }

    /// Note: `serde_json::Value` objects sort their keys, so use [`Envelope::to_json`]
    /// when the wire order matters.
    pub fn to_value(&self) -> Result<Value, JSendError> {
        serde_json::to_value(self).map_err(JSendError::Encode)
    }

    /// Parse a JSON document into an envelope.
    ///
    /// A document that decodes to a JSON string is decoded once more, for
    /// callers that double-encode their bodies.
    ///
    /// # Errors
    /// - `ParseError::Json` when the text is not JSON.
    /// - `ParseError::MissingField` when `status`, or the field its status
    ///   requires (`message` for error, `data` otherwise), is absent.
    /// - `JSendError::InvalidStatus` when the status is not one of the three values.
    /// - `ParseError::NotAnObject` when the document is not an object (`null`,
    ///   an array, a number); such input is not reported as a missing `status`.
    pub fn parse(input: &str) -> Result<Self, JSendError> {
        let value: Value = serde_json::from_str(input).map_err(ParseError::from)?;
        Self::from_value(value)
    }

    /// Same as [`Envelope::parse`] for an already-decoded document.
    pub fn from_value(value: Value) -> Result<Self, JSendError> {
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner).map_err(ParseError::from)?,
            other => other,
        };
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(ParseError::NotAnObject(json_kind(&other)).into()),
        };
        Self::from_fields(fields)
    }

    fn from_fields(mut fields: Map<String, Value>) -> Result<Self, JSendError> {
        let status = match fields.remove("status") {
            None | Some(Value::Null) => return Err(ParseError::MissingField("status").into()),
            Some(Value::String(status)) => status.parse::<Status>()?,
            Some(other) => return Err(JSendError::InvalidStatus(other.to_string())),
        };
        let mut envelope = Self::new(status);

        let code = match fields.remove("code") {
            None | Some(Value::Null) => DEFAULT_PARSED_CODE,
            Some(code) => code.as_i64().ok_or(ParseError::InvalidField {
                field: "code",
                expected: "an integer",
            })?,
        };
        envelope.set_code(code);

        match status {
            Status::Error => {
                match fields.remove("message") {
                    None => return Err(ParseError::MissingField("message").into()),
                    Some(Value::Null) => {}
                    Some(Value::String(message)) => {
                        envelope.set_message(message);
                    }
                    Some(_) => {
                        return Err(ParseError::InvalidField {
                            field: "message",
                            expected: "a string",
                        }
                        .into());
                    }
                }
                if let Some(data) = fields.remove("data") {
                    envelope.set_data(data);
                }
            }
            Status::Success | Status::Fail => {
                let data = fields
                    .remove("data")
                    .ok_or(ParseError::MissingField("data"))?;
                envelope.set_data(data);
            }
        }

        Ok(envelope)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(Status::default())
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.status {
            Status::Success | Status::Fail => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", &self.status)?;
                map.serialize_entry("data", &self.data)?;
                map.end()
            }
            Status::Error => {
                let code = self.code.filter(|c| *c != 0);
                let data = self.data.as_ref().filter(|d| is_truthy(d));
                let len = 2 + usize::from(code.is_some()) + usize::from(data.is_some());

                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("status", &self.status)?;
                map.serialize_entry("message", &self.message)?;
                if let Some(code) = code {
                    map.serialize_entry("code", &code)?;
                }
                if let Some(data) = data {
                    map.serialize_entry("data", data)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Envelope::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
