//! Application layer - Prestige use cases over the domain
//!
//! Services here orchestrate the domain through outbound ports; the
//! infrastructure layer supplies the adapters.

pub mod ports;
pub mod services;
