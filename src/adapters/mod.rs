// Adapters layer: concrete implementations of the domain ports (http clients, terminal views).

pub mod http;
pub mod terminal;
