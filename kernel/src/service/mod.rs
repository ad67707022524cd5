//! Ports to external services: identity provider, transactional email and
//! generative text completion.

pub mod completion;
pub mod identity;
pub mod mail;
pub mod suggestion;
