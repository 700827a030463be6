use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute `sha256=<hex>` over `body` keyed with `secret`.
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Check a received `X-Signature-256` value against `body`. Constant-time.
pub fn verify(body: &[u8], secret: &str, signature: &str) -> bool {
    let expected = sign(body, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}
