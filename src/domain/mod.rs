// Domain layer: stored models and ports (interfaces) to storage and configuration.

pub mod model;
pub mod ports;
