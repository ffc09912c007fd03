//! 项目配置模块
//!
//! 对应项目根目录下的 `cwitchconfig.json`，例如:
//!
//! ```json
//! {
//!     "tsconfig": "tsconfig.json",
//!     "accounts": {
//!         "Production": "PROD_",
//!         "Staging": "SB1_"
//!     },
//!     "upload": { "dir": "dist", "extensions": ["js"] }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::account::AccountType;
use crate::config::read_json_file;
use crate::error::AppError;

/// 上传相关设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSettings {
    /// 扫描目录（相对项目根目录）
    #[serde(default = "default_upload_dir")]
    pub dir: String,

    /// 允许上传的扩展名
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// 文件柜中的逻辑根目录
    #[serde(default = "default_logical_root")]
    pub logical_root: String,
}

fn default_upload_dir() -> String {
    ".".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_logical_root() -> String {
    "SuiteScripts".to_string()
}

fn default_compiler() -> String {
    "tsc".to_string()
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            extensions: default_extensions(),
            logical_root: default_logical_root(),
        }
    }
}

/// `cwitchconfig.json` 结构
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// tsconfig 路径（相对项目根目录）
    pub tsconfig: String,

    /// 账户显示名 -> 环境变量前缀
    #[serde(default)]
    pub accounts: IndexMap<String, String>,

    /// 编译器命令
    #[serde(default = "default_compiler")]
    pub compiler: String,

    #[serde(default)]
    pub upload: UploadSettings,
}

impl ProjectConfig {
    /// 加载配置
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let config: Self = read_json_file(path)?;
        log::debug!(
            "已加载 {}: {} 个账户",
            path.display(),
            config.accounts.len()
        );
        Ok(config)
    }

    /// 解析用户输入的账户，返回账户类型及其环境变量前缀
    pub fn resolve_account(&self, input: &str) -> Result<(AccountType, &str), AppError> {
        let account = AccountType::from_str(input)?;
        let prefix = self
            .accounts
            .get(account.display_name())
            .ok_or_else(|| AppError::UnknownAccount(input.trim().to_string()))?;
        Ok((account, prefix.as_str()))
    }

    /// 已配置的账户（按配置文件顺序）
    pub fn configured_accounts(&self) -> Vec<(AccountType, &str)> {
        self.accounts
            .iter()
            .filter_map(|(name, prefix)| {
                AccountType::all()
                    .iter()
                    .find(|a| a.display_name() == name)
                    .map(|a| (*a, prefix.as_str()))
            })
            .collect()
    }
}
