// Domain layer: practitioner and query-state models plus the ports the core talks through.

pub mod model;
pub mod ports;
