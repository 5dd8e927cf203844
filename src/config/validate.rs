use std::collections::BTreeSet;

use crate::error::{AppError, AppResult, ValidationError};

use super::plan::{DEFAULT_SUCCESS_STATUS_MAX, DEFAULT_SUCCESS_STATUS_MIN};
use super::types::{ConfigFile, EndpointSection, GlobalSection};

/// Checks the raw config for structural defects before normalization.
///
/// The first violation found wins; later problems are not collected.
///
/// # Errors
///
/// Returns a [`ValidationError`] wrapped in [`AppError`] describing the
/// offending field.
pub fn validate_config(file: &ConfigFile) -> AppResult<()> {
    if file.endpoints.is_empty() {
        return Err(AppError::validation(ValidationError::EndpointsEmpty));
    }

    if let Some(global) = file.global.as_ref() {
        validate_global(global)?;
    }

    let mut names: BTreeSet<&str> = BTreeSet::new();
    for (index, endpoint) in file.endpoints.iter().enumerate() {
        if endpoint.name.trim().is_empty() {
            return Err(AppError::validation(ValidationError::EndpointNameEmpty {
                index,
            }));
        }
        if !names.insert(endpoint.name.as_str()) {
            return Err(AppError::validation(
                ValidationError::DuplicateEndpointName {
                    name: endpoint.name.clone(),
                },
            ));
        }
    }

    for endpoint in &file.endpoints {
        validate_endpoint(endpoint, &names)?;
    }

    Ok(())
}

fn validate_global(global: &GlobalSection) -> AppResult<()> {
    if global.concurrent == Some(0) {
        return Err(AppError::validation(ValidationError::GlobalFieldZero {
            field: "concurrent",
        }));
    }
    if global.timeout == Some(0) {
        return Err(AppError::validation(ValidationError::GlobalFieldZero {
            field: "timeout",
        }));
    }
    if global.max_requests == Some(0) {
        return Err(AppError::validation(ValidationError::GlobalFieldZero {
            field: "max_requests",
        }));
    }

    let min = global
        .success_status_min
        .unwrap_or(DEFAULT_SUCCESS_STATUS_MIN);
    let max = global
        .success_status_max
        .unwrap_or(DEFAULT_SUCCESS_STATUS_MAX);
    if min >= max {
        return Err(AppError::validation(ValidationError::SuccessRangeEmpty {
            min,
            max,
        }));
    }

    Ok(())
}

fn validate_endpoint(endpoint: &EndpointSection, names: &BTreeSet<&str>) -> AppResult<()> {
    if endpoint.url.trim().is_empty() {
        return Err(AppError::validation(ValidationError::EndpointUrlEmpty {
            endpoint: endpoint.name.clone(),
        }));
    }
    if endpoint.max_requests == Some(0) {
        return Err(AppError::validation(ValidationError::EndpointFieldZero {
            endpoint: endpoint.name.clone(),
            field: "max_requests",
        }));
    }

    for dependency in &endpoint.dependencies {
        if dependency == &endpoint.name {
            return Err(AppError::validation(ValidationError::SelfDependency {
                endpoint: endpoint.name.clone(),
            }));
        }
        if !names.contains(dependency.as_str()) {
            return Err(AppError::validation(ValidationError::UnknownDependency {
                endpoint: endpoint.name.clone(),
                dependency: dependency.clone(),
            }));
        }
    }

    for variable in &endpoint.variables {
        if variable.name.trim().is_empty() {
            return Err(AppError::validation(ValidationError::VariableNameEmpty {
                endpoint: endpoint.name.clone(),
            }));
        }
        if variable.path.trim().is_empty() {
            return Err(AppError::validation(ValidationError::VariablePathEmpty {
                endpoint: endpoint.name.clone(),
                variable: variable.name.clone(),
            }));
        }
    }

    Ok(())
}
