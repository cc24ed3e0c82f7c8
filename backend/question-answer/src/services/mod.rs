pub mod hydration_service;

pub use hydration_service::HydrationService;
