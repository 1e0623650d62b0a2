// Domain layer: entity identifiers, the resource table and the ports the core talks through.

pub mod model;
pub mod ports;
