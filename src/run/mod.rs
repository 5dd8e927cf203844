mod observer;
mod orchestrator;
mod resolver;
mod scheduler;


pub use observer::{LogObserver, NoopObserver, RunObserver};
pub use orchestrator::run_plan;
pub use resolver::resolve_order;
pub use scheduler::{DURATION_SAFETY_CAP, run_endpoint};
