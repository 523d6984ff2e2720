use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rusqlite::Connection;
use sha2::Sha256;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::queries;
use crate::errors::AppError;
use crate::models::Admin;

const B64: base64::engine::GeneralPurpose = base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AdminClaims {
    pub admin_id: String,
    pub expires_at: i64,
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Token format: `base64url(admin_id:expiry_unix) . hex(hmac_sha256)`.
pub fn issue_token(admin_id: &str, secret: &str, ttl_hours: i64) -> String {
    let expires_at = Utc::now().timestamp() + ttl_hours * 3600;
    let encoded = B64.encode(format!("{admin_id}:{expires_at}").as_bytes());
    let sig = sign(&encoded, secret);
    format!("{encoded}.{sig}")
}

pub fn verify_token(token: &str, secret: &str) -> Result<AdminClaims, AppError> {
    let (encoded, sig) = token.split_once('.').ok_or(AppError::Unauthorized)?;

    let expected = sign(encoded, secret);
    if !constant_time_eq(expected.as_bytes(), sig.as_bytes()) {
        return Err(AppError::Unauthorized);
    }

    let payload = B64.decode(encoded).map_err(|_| AppError::Unauthorized)?;
    let payload = String::from_utf8(payload).map_err(|_| AppError::Unauthorized)?;
    let (admin_id, expires_at) = payload.rsplit_once(':').ok_or(AppError::Unauthorized)?;
    let expires_at: i64 = expires_at.parse().map_err(|_| AppError::Unauthorized)?;

    if expires_at < Utc::now().timestamp() {
        return Err(AppError::Unauthorized);
    }

    Ok(AdminClaims {
        admin_id: admin_id.to_string(),
        expires_at,
    })
}

fn sign(data: &str, secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("valid key");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Seeds the first admin account from configuration when the table is empty.
pub fn ensure_bootstrap_admin(conn: &Connection, config: &AppConfig) -> anyhow::Result<()> {
    if config.admin_email.is_empty() || config.admin_password.is_empty() {
        return Ok(());
    }
    if queries::count_admins(conn)? > 0 {
        return Ok(());
    }

    let now = Utc::now().naive_utc();
    let admin = Admin {
        id: Uuid::new_v4().to_string(),
        email: config.admin_email.clone(),
        name: "Administrator".to_string(),
        password_hash: hash_password(&config.admin_password)?,
        created_at: now,
        updated_at: now,
    };
    queries::insert_admin(conn, &admin)?;
    tracing::info!(email = %admin.email, "seeded bootstrap admin");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password(&hash, "s3cret"));
        assert!(!verify_password(&hash, "wrong"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("not-a-hash", "s3cret"));
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token("admin-1", "secret", 1);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.admin_id, "admin-1");
        assert!(claims.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue_token("admin-1", "secret", 1);
        let mut tampered = token.clone();
        tampered.replace_range(0..1, "Z");
        assert!(verify_token(&tampered, "secret").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token("admin-1", "secret", 1);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue_token("admin-1", "secret", -1);
        assert!(matches!(
            verify_token(&token, "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("nonsense", "secret").is_err());
        assert!(verify_token("a.b", "secret").is_err());
        assert!(verify_token("", "secret").is_err());
    }
}
