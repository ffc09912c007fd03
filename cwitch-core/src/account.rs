//! 账户类型定义模块
//!
//! 定义可切换的 NetSuite 账户类型。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// 支持的账户类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// 生产环境
    Production,
    /// 预发环境
    Staging,
    /// 管理技术账户
    AdminTech,
    /// 发布预览
    ReleasePreview,
}

impl AccountType {
    /// 获取账户类型的字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::AdminTech => "admin-tech",
            Self::ReleasePreview => "release-preview",
        }
    }

    /// 获取显示名称，同时也是 cwitchconfig.json 中 `accounts` 的键
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Staging => "Staging",
            Self::AdminTech => "Admin Tech",
            Self::ReleasePreview => "Release Preview",
        }
    }

    /// 获取所有账户类型
    pub fn all() -> &'static [AccountType] {
        &[
            Self::Production,
            Self::AdminTech,
            Self::Staging,
            Self::ReleasePreview,
        ]
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AccountType {
    type Err = AppError;

    /// 按首字母匹配，`p` / `prod` / `Production` 都选中生产环境
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let first = trimmed
            .chars()
            .next()
            .ok_or_else(|| AppError::InvalidInput("账户名称不能为空".to_string()))?;

        match first.to_ascii_lowercase() {
            'p' => Ok(Self::Production),
            's' => Ok(Self::Staging),
            'a' => Ok(Self::AdminTech),
            'r' => Ok(Self::ReleasePreview),
            _ => Err(AppError::UnknownAccount(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_from_str() {
        assert_eq!(AccountType::from_str("p").unwrap(), AccountType::Production);
        assert_eq!(
            AccountType::from_str("Production").unwrap(),
            AccountType::Production
        );
        assert_eq!(AccountType::from_str("staging").unwrap(), AccountType::Staging);
        assert_eq!(
            AccountType::from_str("admin tech").unwrap(),
            AccountType::AdminTech
        );
        assert_eq!(
            AccountType::from_str(" R ").unwrap(),
            AccountType::ReleasePreview
        );
        assert!(matches!(
            AccountType::from_str("xyz"),
            Err(AppError::UnknownAccount(_))
        ));
        assert!(matches!(
            AccountType::from_str("  "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_names_are_config_keys() {
        let names: Vec<_> = AccountType::all().iter().map(|a| a.display_name()).collect();
        assert_eq!(
            names,
            vec!["Production", "Admin Tech", "Staging", "Release Preview"]
        );
    }
}
