//! Clients for the remote services an investigation talks to.

pub mod country;
pub mod currency;
pub mod geo;
pub mod remote;

pub use remote::RemoteClient;
