//! # Confessions Hex
//!
//! Application service layer and HTTP adapter for the confessions service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (credential check, validation, insert)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api/openapi.json`
//!
//! The service is generic over `C: StoreConnector`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::ConfessionService;
