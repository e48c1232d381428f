//! Signed token codec and the issuance/refresh/revocation service.

pub mod codec;
pub mod service;

pub use codec::{Claims, TokenCodec};
pub use service::{TokenPair, TokenService};
