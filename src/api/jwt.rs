use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;
use crate::storage::Role;

/// Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// 主体 id（字符串形式）
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn subject_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// JWT Service for generating and validating tokens
///
/// 启动时构造一次，通过 `web::Data` 共享给 handler 和中间件。
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_hours: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_hours,
        }
    }

    /// Create JwtService from config
    pub fn from_config(auth: &AuthConfig) -> Self {
        // 获取 JWT secret，如果为空则生成一个安全的随机值
        let secret = if auth.jwt_secret.is_empty() {
            warn!("JWT secret not configured or empty, generating secure random token");
            crate::utils::generate_secure_token(32)
        } else {
            auth.jwt_secret.clone()
        };

        Self::new(&secret, auth.token_hours)
    }

    pub fn token_hours(&self) -> u64 {
        self.token_hours
    }

    /// 签发 token，有效期 `token_hours`
    pub fn generate_token(
        &self,
        subject_id: i32,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_hours as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// 校验签名和过期时间
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}
