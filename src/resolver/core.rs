use super::naming::{
    derive_function_name, is_param_segment, normalize_controller_name, normalize_function_name,
    path_segments, INDEX_CONTROLLER,
};
use super::policy::{MapControllerBy, ResolutionPolicy};
use crate::error::RegistrationError;
use crate::spec::Operation;
use tracing::debug;

/// Controller and function picked for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub controller: String,
    pub function: String,
}

/// Controller name for the first path segment, if that segment can name one.
///
/// Parameter segments (`/{id}`) and the root path have no controller segment.
#[must_use]
pub fn path_controller(path: &str) -> Option<String> {
    let first = path_segments(path).next()?;
    if is_param_segment(first) {
        return None;
    }
    normalize_controller_name(first)
}

/// Pick the controller name for `op`.
///
/// PATH mapping uses the first path segment and falls back to `index` when
/// there is none; it never fails. TAG mapping uses the first tag, then
/// `index` if `fallback_controller_to_index` is set, and otherwise fails with
/// [`RegistrationError::NoTags`].
pub fn resolve_controller(
    op: &Operation,
    policy: &ResolutionPolicy,
) -> Result<String, RegistrationError> {
    match policy.map_controller_by {
        MapControllerBy::Path => {
            Ok(path_controller(&op.path).unwrap_or_else(|| INDEX_CONTROLLER.to_string()))
        }
        MapControllerBy::Tag => {
            if let Some(name) = op.first_tag().and_then(normalize_controller_name) {
                return Ok(name);
            }
            if policy.fallback_controller_to_index {
                debug!(
                    method = %op.method,
                    path = %op.path,
                    "No usable tag, falling back to index controller"
                );
                Ok(INDEX_CONTROLLER.to_string())
            } else {
                Err(RegistrationError::NoTags {
                    method: op.method.clone(),
                    path: op.path.clone(),
                })
            }
        }
    }
}

/// Pick the function name for `op` once its controller is known.
///
/// A usable `operationId` wins. Without one, the name is derived from the
/// method and the path segments left after the controller segment (PATH
/// mapping consumes the first segment when it produced `controller`), or
/// the call fails with [`RegistrationError::NoOperationId`] when
/// `fallback_controller_function_to_path` is off.
pub fn resolve_function(
    op: &Operation,
    controller: &str,
    policy: &ResolutionPolicy,
) -> Result<String, RegistrationError> {
    if let Some(name) = op.operation_id.as_deref().and_then(normalize_function_name) {
        return Ok(name);
    }

    if !policy.fallback_controller_function_to_path {
        return Err(RegistrationError::NoOperationId {
            method: op.method.clone(),
            path: op.path.clone(),
        });
    }

    let consumed = policy.map_controller_by == MapControllerBy::Path
        && path_controller(&op.path).as_deref() == Some(controller);
    let skip = usize::from(consumed);
    let function = derive_function_name(&op.method, path_segments(&op.path).skip(skip));

    debug!(
        method = %op.method,
        path = %op.path,
        controller = %controller,
        function = %function,
        "No operationId, derived function name from path"
    );
    Ok(function)
}

/// Resolve controller then function for `op`.
pub fn resolve(op: &Operation, policy: &ResolutionPolicy) -> Result<Resolution, RegistrationError> {
    let controller = resolve_controller(op, policy)?;
    let function = resolve_function(op, &controller, policy)?;
    Ok(Resolution {
        controller,
        function,
    })
}
