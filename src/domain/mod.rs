// Domain layer: records received from the services and the ports (interfaces) the session talks to.

pub mod model;
pub mod ports;
