pub mod collaborators;
pub mod config;
pub mod context;
pub mod engine;
pub mod extract;
pub mod handlers;
pub mod intent;
pub mod logging;
pub mod runtime;
pub mod store;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
