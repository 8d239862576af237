use http::Method;
use std::fmt;

/// Failure raised while turning an OpenAPI operation into a registered route.
///
/// `add_routes_from_specification` stops at the first of these. Routes
/// registered earlier in the same call stay registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// TAG mapping found no usable tag and the `index` fallback is disabled.
    NoTags {
        /// Operation method
        method: Method,
        /// Path template as written in the document
        path: String,
    },
    /// The operation has no usable `operationId` and the path fallback is disabled.
    NoOperationId {
        /// Operation method
        method: Method,
        /// Path template as written in the document
        path: String,
    },
    /// The loader does not know the resolved controller.
    ControllerNotFound {
        /// Resolved controller name
        controller: String,
        /// Operation method
        method: Method,
        /// Path template as written in the document
        path: String,
    },
    /// The controller exists but exposes no function with the resolved name.
    FunctionNotFound {
        /// Resolved controller name
        controller: String,
        /// Resolved function name
        function: String,
        /// Operation method
        method: Method,
        /// Path template as written in the document
        path: String,
    },
    /// The router is configured to reject a second registration of the same method and path.
    DuplicateRoute {
        /// Route method
        method: Method,
        /// Full path including the router prefix
        path: String,
    },
    /// A path could not be compiled into a matcher.
    InvalidPath {
        /// The offending path
        path: String,
        /// Why it was rejected
        reason: String,
    },
}

impl RegistrationError {
    /// Short machine-readable name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::NoTags { .. } => "NoTags",
            RegistrationError::NoOperationId { .. } => "NoOperationId",
            RegistrationError::ControllerNotFound { .. } => "ControllerNotFound",
            RegistrationError::FunctionNotFound { .. } => "FunctionNotFound",
            RegistrationError::DuplicateRoute { .. } => "DuplicateRoute",
            RegistrationError::InvalidPath { .. } => "InvalidPath",
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::NoTags { method, path } => {
                write!(f, "Method {method} in path {path} has no tags!")
            }
            RegistrationError::NoOperationId { method, path } => {
                write!(f, "Method {method} in path {path} has no operationId!")
            }
            RegistrationError::ControllerNotFound {
                controller,
                method,
                path,
            } => write!(
                f,
                "Controller {controller} not found (method {method} in path {path})"
            ),
            RegistrationError::FunctionNotFound {
                controller,
                function,
                method,
                path,
            } => write!(
                f,
                "Function {function} not found in controller {controller} (method {method} in path {path})"
            ),
            RegistrationError::DuplicateRoute { method, path } => {
                write!(f, "Route {method} {path} is already registered")
            }
            RegistrationError::InvalidPath { path, reason } => {
                write!(f, "Invalid route path '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
