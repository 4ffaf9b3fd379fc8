// Adapters layer: concrete implementations of the domain ports (HTTP feed, address bar).

pub mod address_bar;
pub mod http;
