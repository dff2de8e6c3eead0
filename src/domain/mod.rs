// Domain layer: models and ports. Nothing here talks to the network or the terminal.

pub mod model;
pub mod ports;
