pub mod config;
pub mod error;
pub mod gamification;
pub mod portal;
pub mod telemetry;
