use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Config must define at least one endpoint.")]
    EndpointsEmpty,
    #[error("Endpoint at index {index} has an empty name.")]
    EndpointNameEmpty { index: usize },
    #[error("Duplicate endpoint name '{name}'.")]
    DuplicateEndpointName { name: String },
    #[error("Endpoint '{endpoint}' has an empty url.")]
    EndpointUrlEmpty { endpoint: String },
    #[error("Endpoint '{endpoint}' depends on unknown endpoint '{dependency}'.")]
    UnknownDependency { endpoint: String, dependency: String },
    #[error("Endpoint '{endpoint}' cannot depend on itself.")]
    SelfDependency { endpoint: String },
    #[error("Endpoint '{endpoint}': '{field}' must be >= 1.")]
    EndpointFieldZero {
        endpoint: String,
        field: &'static str,
    },
    #[error("Global '{field}' must be >= 1.")]
    GlobalFieldZero { field: &'static str },
    #[error("Endpoint '{endpoint}' has a variable rule with an empty name.")]
    VariableNameEmpty { endpoint: String },
    #[error("Endpoint '{endpoint}': variable '{variable}' has an empty path.")]
    VariablePathEmpty { endpoint: String, variable: String },
    #[error("Global success status range {min}..{max} is empty.")]
    SuccessRangeEmpty { min: u16, max: u16 },
}
