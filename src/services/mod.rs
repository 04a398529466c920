pub mod audit_service;
pub mod collection_service;
pub mod index_service;
pub mod integrity_service;
pub mod login_check_service;
pub mod stats_service;

pub use audit_service::*;
