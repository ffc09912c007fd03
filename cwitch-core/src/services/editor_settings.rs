//! 编辑器设置服务模块
//!
//! 把当前账户的凭据写入 `.vscode/settings.json`，供编辑器内的上传插件使用。
//! 文件中的其他设置保持原样和原顺序。

use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{read_json_file, write_json_file};
use crate::credentials::CredentialSet;
use crate::error::AppError;

pub const KEY_RESTLET: &str = "netSuiteUpload.restlet";
pub const KEY_TOKEN_KEY: &str = "netSuiteUpload.netSuiteKey";
pub const KEY_TOKEN_SECRET: &str = "netSuiteUpload.netSuiteSecret";
pub const KEY_CONSUMER_KEY: &str = "netSuiteUpload.consumerToken";
pub const KEY_CONSUMER_SECRET: &str = "netSuiteUpload.consumerSecret";
pub const KEY_REALM: &str = "netSuiteUpload.realm";

/// 编辑器设置服务
pub struct EditorSettingsService;

impl EditorSettingsService {
    /// 写入凭据，文件必须已存在
    pub fn apply(path: &Path, credentials: &CredentialSet) -> Result<(), AppError> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "找不到编辑器设置文件: {}",
                path.display()
            )));
        }

        let mut settings = Self::read_object(path)?;

        let entries = [
            (KEY_RESTLET, &credentials.target_url),
            (KEY_TOKEN_KEY, &credentials.token_key),
            (KEY_TOKEN_SECRET, &credentials.token_secret),
            (KEY_CONSUMER_KEY, &credentials.consumer_key),
            (KEY_CONSUMER_SECRET, &credentials.consumer_secret),
            (KEY_REALM, &credentials.realm),
        ];
        for (key, value) in entries {
            settings.insert(key.to_string(), Value::String(value.clone()));
        }

        write_json_file(path, &Value::Object(settings))?;
        log::info!("已写入 {} (realm: {})", path.display(), credentials.realm);
        Ok(())
    }

    /// 读取当前写入的 realm，文件或字段不存在时返回 None
    pub fn current_realm(path: &Path) -> Result<Option<String>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        let settings = Self::read_object(path)?;
        Ok(settings
            .get(KEY_REALM)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn read_object(path: &Path) -> Result<Map<String, Value>, AppError> {
        match read_json_file::<Value>(path)? {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Config(format!(
                "{} 不是 JSON 对象",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn credentials() -> CredentialSet {
        CredentialSet {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            token_key: "tk".to_string(),
            token_secret: "ts".to_string(),
            realm: "1234567_SB1".to_string(),
            target_url: "https://1234567-sb1.example.com/restlet.nl?script=1&deploy=1".to_string(),
        }
    }

    #[test]
    fn test_apply_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"editor.tabSize": 2, "netSuiteUpload.realm": "OLD", "files.exclude": {"**/.git": true}}"#,
        )
        .unwrap();

        EditorSettingsService::apply(&path, &credentials()).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "editor.tabSize",
                "netSuiteUpload.realm",
                "files.exclude",
                KEY_RESTLET,
                KEY_TOKEN_KEY,
                KEY_TOKEN_SECRET,
                KEY_CONSUMER_KEY,
                KEY_CONSUMER_SECRET,
            ]
        );
        assert_eq!(value[KEY_REALM], "1234567_SB1");
        assert_eq!(value[KEY_CONSUMER_KEY], "ck");
        assert_eq!(value[KEY_TOKEN_SECRET], "ts");
        assert_eq!(value["editor.tabSize"], 2);

        assert_eq!(
            EditorSettingsService::current_realm(&path).unwrap(),
            Some("1234567_SB1".to_string())
        );
    }

    #[test]
    fn test_apply_requires_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(matches!(
            EditorSettingsService::apply(&path, &credentials()),
            Err(AppError::Config(_))
        ));
        assert!(!path.exists());
        assert_eq!(EditorSettingsService::current_realm(&path).unwrap(), None);
    }

    #[test]
    fn test_non_object_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(
            EditorSettingsService::apply(&path, &credentials()),
            Err(AppError::Config(_))
        ));
    }
}
