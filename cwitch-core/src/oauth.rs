//! OAuth 1.0a 签名模块
//!
//! 为 RESTlet 请求生成 HMAC-SHA256 签名的 `Authorization` 头。
//! 每次请求都应重新签名，时间戳和 nonce 不可复用。

use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::Sha256;
use url::Url;

use crate::credentials::CredentialSet;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;

/// 参与签名的 URL 查询参数
const SIGNED_QUERY_PARAMS: &[&str] = &["script", "deploy"];

/// RFC 3986 百分号编码
pub fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

/// 生成随机 nonce
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// 签名器，绑定一套凭据和一个 RESTlet 地址
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
    token_key: String,
    token_secret: String,
    realm: String,
    /// 不含查询串和片段的地址
    base_url: String,
    /// 从地址中提取的 script / deploy
    query_params: Vec<(String, String)>,
}

impl OAuthSigner {
    /// 校验凭据并解析目标地址
    ///
    /// consumer key/secret 或 token key 为空时返回 [`AppError::AuthConfig`]，
    /// 地址缺少 `deploy` 参数时返回 [`AppError::InvalidUrl`]。
    pub fn new(credentials: &CredentialSet) -> Result<Self, AppError> {
        if credentials.consumer_key.trim().is_empty()
            || credentials.consumer_secret.trim().is_empty()
        {
            return Err(AppError::AuthConfig(
                "consumer key/secret 为空，请检查 .env 中的 CONSUMER_TOKEN 和 CONSUMER_SECRET"
                    .to_string(),
            ));
        }
        if credentials.token_key.trim().is_empty() {
            return Err(AppError::AuthConfig(
                "token key 为空，请检查 .env 中的 NETSUITE_KEY".to_string(),
            ));
        }

        let mut url = Url::parse(&credentials.target_url)
            .map_err(|e| AppError::invalid_url(&credentials.target_url, e.to_string()))?;

        let query_params: Vec<(String, String)> = SIGNED_QUERY_PARAMS
            .iter()
            .filter_map(|name| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| (name.to_string(), v.into_owned()))
            })
            .collect();

        if !query_params.iter().any(|(k, _)| k == "deploy") {
            return Err(AppError::invalid_url(
                &credentials.target_url,
                "缺少 deploy 参数",
            ));
        }
        if !query_params.iter().any(|(k, _)| k == "script") {
            log::warn!("RESTlet 地址缺少 script 参数: {}", credentials.target_url);
        }

        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.clone(),
            token_key: credentials.token_key.clone(),
            token_secret: credentials.token_secret.clone(),
            realm: credentials.realm.clone(),
            base_url: url.to_string(),
            query_params,
        })
    }

    /// 参与签名的地址（无查询串）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 用当前时间和新 nonce 生成 `Authorization` 头
    pub fn authorization_header(&self, method: &str) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_at(method, timestamp, &generate_nonce())
    }

    /// 用指定的时间戳和 nonce 生成 `Authorization` 头
    pub fn authorization_header_at(&self, method: &str, timestamp: i64, nonce: &str) -> String {
        let timestamp = timestamp.to_string();
        let base_string = self.signature_base_string(method, &timestamp, nonce);
        let signature = self.sign(&base_string);

        let fields = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_token", self.token_key.as_str()),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_version", OAUTH_VERSION),
            ("oauth_signature", signature.as_str()),
        ]
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

        format!("OAuth realm=\"{}\", {}", self.realm, fields)
    }

    /// 构造签名基串
    pub fn signature_base_string(&self, method: &str, timestamp: &str, nonce: &str) -> String {
        let mut params: Vec<(String, String)> = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_token", self.token_key.as_str()),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_nonce", nonce),
            ("oauth_version", OAUTH_VERSION),
        ]
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            self.query_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
        params.sort();

        let normalized = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(&self.base_url),
            percent_encode(&normalized)
        )
    }

    /// 对基串做 HMAC-SHA256 并 base64 编码
    pub fn sign(&self, base_string: &str) -> String {
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.token_secret)
        );
        hmac_sha256_base64(&signing_key, base_string)
    }
}

fn hmac_sha256_base64(key: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
