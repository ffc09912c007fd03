//! 凭据模块
//!
//! 从环境变量（及项目 `.env`）中读取某个账户的一整套凭据。

use std::fmt;
use std::path::Path;

use crate::error::AppError;

/// 所有账户共用的 RESTlet 主机后缀变量
pub const URL_VAR: &str = "URL";

/// 一次调用所用的完整凭据，构造后不可变
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_key: String,
    pub token_secret: String,
    pub realm: String,
    pub target_url: String,
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("consumer_key", &mask_secret(&self.consumer_key))
            .field("consumer_secret", &mask_secret(&self.consumer_secret))
            .field("token_key", &mask_secret(&self.token_key))
            .field("token_secret", &mask_secret(&self.token_secret))
            .field("realm", &self.realm)
            .field("target_url", &self.target_url)
            .finish()
    }
}

impl CredentialSet {
    /// 从进程环境变量读取
    pub fn from_env(prefix: &str) -> Result<Self, AppError> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取，`prefix` 为 cwitchconfig.json 中配置的前缀
    ///
    /// 密钥缺失时保留为空字符串，由签名器决定是否拒绝。
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{prefix}{name}"));

        let realm = var("REALM")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::MissingEnv(format!("{prefix}REALM")))?;
        let host = lookup(URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::MissingEnv(URL_VAR.to_string()))?;

        Ok(Self {
            target_url: restlet_url(&realm, &host),
            consumer_key: var("CONSUMER_TOKEN").unwrap_or_default(),
            consumer_secret: var("CONSUMER_SECRET").unwrap_or_default(),
            token_key: var("NETSUITE_KEY").unwrap_or_default(),
            token_secret: var("NETSUITE_SECRET").unwrap_or_default(),
            realm,
        })
    }
}

/// `https://<realm 小写且 _ 换成 ->.<host>`
pub fn restlet_url(realm: &str, host: &str) -> String {
    let subdomain = realm.trim().to_lowercase().replace('_', "-");
    format!("https://{}.{}", subdomain, host.trim().trim_start_matches('.'))
}

/// 加载项目 `.env`，已存在的进程环境变量优先
pub fn load_dotenv(path: &Path) -> Result<(), AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "找不到 .env 文件: {}",
            path.display()
        )));
    }

    dotenvy::from_path(path).map_err(|e| {
        AppError::Config(format!("无法加载 {}: {}", path.display(), e))
    })?;
    log::debug!("已加载环境变量文件 {}", path.display());
    Ok(())
}

/// 掩码敏感值
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn env_map() -> HashMap<String, String> {
        [
            ("URL", "restlets.api.netsuite.com/app/site/hosting/restlet.nl?script=12&deploy=1"),
            ("SB1_REALM", "1234567_SB1"),
            ("SB1_NETSUITE_KEY", "token-key"),
            ("SB1_NETSUITE_SECRET", "token-secret"),
            ("SB1_CONSUMER_TOKEN", "consumer-key"),
            ("SB1_CONSUMER_SECRET", "consumer-secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_lookup_maps_variables() {
        let env = env_map();
        let creds = CredentialSet::from_lookup("SB1_", |k| env.get(k).cloned()).unwrap();

        assert_eq!(creds.realm, "1234567_SB1");
        assert_eq!(
            creds.target_url,
            "https://1234567-sb1.restlets.api.netsuite.com/app/site/hosting/restlet.nl?script=12&deploy=1"
        );
        assert_eq!(creds.consumer_key, "consumer-key");
        assert_eq!(creds.consumer_secret, "consumer-secret");
        assert_eq!(creds.token_key, "token-key");
        assert_eq!(creds.token_secret, "token-secret");
    }

    #[test]
    fn test_missing_realm_or_url() {
        let mut env = env_map();
        env.remove("SB1_REALM");
        let err = CredentialSet::from_lookup("SB1_", |k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AppError::MissingEnv(ref v) if v == "SB1_REALM"));

        let mut env = env_map();
        env.remove("URL");
        let err = CredentialSet::from_lookup("SB1_", |k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AppError::MissingEnv(ref v) if v == "URL"));
    }

    #[test]
    fn test_missing_secrets_become_empty() {
        let mut env = env_map();
        env.remove("SB1_CONSUMER_TOKEN");
        let creds = CredentialSet::from_lookup("SB1_", |k| env.get(k).cloned()).unwrap();
        assert!(creds.consumer_key.is_empty());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let env = env_map();
        let creds = CredentialSet::from_lookup("SB1_", |k| env.get(k).cloned()).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("consumer-secret"));
        assert!(debug.contains("1234567_SB1"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "-");
        assert_eq!(mask_secret("short"), "*****");
        assert_eq!(mask_secret("abcd1234wxyz"), "abcd...wxyz");
    }

    #[test]
    #[serial]
    fn test_load_dotenv_and_from_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "URL=example.com/restlet?deploy=1\nCWT_REALM=ACME_SB2\nCWT_CONSUMER_TOKEN=ck\n",
        )
        .unwrap();

        load_dotenv(&path).unwrap();
        let creds = CredentialSet::from_env("CWT_").unwrap();
        assert_eq!(creds.target_url, "https://acme-sb2.example.com/restlet?deploy=1");
        assert_eq!(creds.consumer_key, "ck");

        std::env::remove_var("URL");
        std::env::remove_var("CWT_REALM");
        std::env::remove_var("CWT_CONSUMER_TOKEN");
    }

    #[test]
    fn test_load_dotenv_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_dotenv(&dir.path().join(".env")),
            Err(AppError::Config(_))
        ));
    }
}
