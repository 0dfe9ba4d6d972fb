//! Opaque session token generation.

use rand::Rng;

/// Generate a random session token: 32 bytes, lowercase hex (64 chars).
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}
