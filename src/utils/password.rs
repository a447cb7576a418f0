use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{AppError, AppResult};

const VERSION_PREFIX: &str = "v1:";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ITERATIONS: u32 = 120_000;

/// Hash a password into the stored form `v1:<salt_b64>:<key_b64>`.
pub fn hash_password(password: &str) -> AppResult<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let key = derive_key(password, &salt);

    Ok(format!(
        "{VERSION_PREFIX}{}:{}",
        Base64.encode(salt),
        Base64.encode(key)
    ))
}

/// Check a password against a stored hash. A malformed stored value is an
/// error, not a mismatch.
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    let encoded = stored
        .strip_prefix(VERSION_PREFIX)
        .ok_or_else(|| AppError::other("지원하지 않는 비밀번호 해시 형식입니다"))?;

    let (salt_b64, key_b64) = encoded
        .split_once(':')
        .ok_or_else(|| AppError::other("비밀번호 해시가 손상되었습니다"))?;

    let salt = Base64
        .decode(salt_b64.as_bytes())
        .map_err(|_| AppError::other("비밀번호 해시가 손상되었습니다"))?;
    let expected = Base64
        .decode(key_b64.as_bytes())
        .map_err(|_| AppError::other("비밀번호 해시가 손상되었습니다"))?;

    if salt.len() != SALT_LEN || expected.len() != KEY_LEN {
        return Err(AppError::other("비밀번호 해시 길이가 올바르지 않습니다"));
    }

    let derived = derive_key(password, &salt);

    Ok(constant_time_eq(&derived, &expected))
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
