//! Application services - Use case implementations
//!
//! Services accept port dependencies and expose the prestige use cases to
//! the HTTP layer.

pub mod prestige_service;
pub mod settings_service;

pub use prestige_service::{
    HostAdapters, PrestigeService, PurchaseError, PurchaseReceipt, ResetOutcome,
};
pub use settings_service::SettingsService;
