pub mod jwks_verifier;

pub use jwks_verifier::JwksTokenVerifier;
