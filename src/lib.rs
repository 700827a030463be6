pub mod canonical;
pub mod config;
pub mod error;
pub mod payload;
pub mod signer;
pub mod submitter;
pub mod transport;
