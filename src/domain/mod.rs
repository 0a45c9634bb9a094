// Domain layer: wire models, outcomes and ports. No I/O here.

pub mod model;
pub mod ports;
