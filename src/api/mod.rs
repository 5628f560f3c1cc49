// CloudBackup API core: signing, transport, envelope parsing and the CRUD engine
pub mod client;
pub mod envelope;
pub mod resource;
pub mod signer;
pub mod transport;

pub use client::{normalize_host, Client};
pub use envelope::Envelope;
pub use resource::Resource;
pub use signer::{Credentials, Signature, Signer};
pub use transport::{HttpBackend, Method, RawResponse, Request, Transport, UreqBackend};

#[cfg(test)]
mod envelope_tests;
#[cfg(test)]
mod signer_tests;
