mod example;
mod loader;
mod plan;
pub mod types;
mod validate;


pub use example::{EXAMPLE_CONFIG, write_example_config};
pub use loader::load_config_file;
pub use plan::{
    BenchPlan, EndpointPolicy, EndpointSpec, GlobalPolicy, PlanOverrides, StatusRange,
    VariableRule, VariableSource,
};
pub use validate::validate_config;
