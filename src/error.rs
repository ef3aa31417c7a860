//! Error types for the callable object model

use thiserror::Error;

use crate::prelude::*;
use crate::value::{JsString, JsValue};

/// Main error type for invocation, binding and application
#[derive(Debug, Error)]
pub enum JsError {
    #[error("TypeError: {message}")]
    TypeError { message: String },

    #[error("RangeError: {message}")]
    RangeError { message: String },

    /// `bind`, `apply` or `call` was invoked on something that is not callable.
    /// Rendered as a TypeError, the way a host engine reports it.
    #[error("TypeError: {operation} called on non-callable {found}")]
    InvalidOperand {
        operation: &'static str,
        found: &'static str,
    },

    /// An arbitrary value thrown by a host function. Propagates unchanged
    /// through bound functions and `apply`.
    #[error("Uncaught {value:?}")]
    ThrownValue { value: JsValue },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JsError {
    pub fn type_error(message: impl Into<String>) -> Self {
        JsError::TypeError {
            message: message.into(),
        }
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        JsError::RangeError {
            message: message.into(),
        }
    }

    /// Create the error for an operation applied to a non-callable operand.
    /// `found` is the operand's `typeof` so the message names what was passed.
    pub fn invalid_operand(operation: &'static str, operand: &JsValue) -> Self {
        JsError::InvalidOperand {
            operation,
            found: operand.type_of(),
        }
    }

    /// Wrap a value thrown by user code
    pub fn thrown(value: JsValue) -> Self {
        JsError::ThrownValue { value }
    }

    /// Create an internal error for unexpected object-model states
    pub fn internal_error(message: impl Into<String>) -> Self {
        JsError::Internal(message.into())
    }

    /// Check whether this is a TypeError (including invalid operands)
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            JsError::TypeError { .. } | JsError::InvalidOperand { .. }
        )
    }

    /// Extract the JsValue that host code observes for this error
    pub fn to_value(&self) -> JsValue {
        match self {
            JsError::ThrownValue { value } => value.clone(),
            JsError::TypeError { message } => {
                JsValue::String(JsString::from(format!("TypeError: {}", message)))
            }
            JsError::RangeError { message } => {
                JsValue::String(JsString::from(format!("RangeError: {}", message)))
            }
            JsError::InvalidOperand { .. } => JsValue::String(JsString::from(self.to_string())),
            JsError::Internal(msg) => {
                JsValue::String(JsString::from(format!("InternalError: {}", msg)))
            }
        }
    }
}
