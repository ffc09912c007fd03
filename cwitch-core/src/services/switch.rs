//! 账户切换服务模块
//!
//! 解析账户、读取凭据、按需编译，然后把凭据写入编辑器设置。

use std::path::PathBuf;

use crate::account::AccountType;
use crate::config::ProjectPaths;
use crate::credentials::{load_dotenv, CredentialSet};
use crate::error::AppError;
use crate::project::ProjectConfig;
use crate::services::compile::CompileService;
use crate::services::editor_settings::EditorSettingsService;

/// 切换结果
#[derive(Debug, Clone)]
pub struct SwitchReport {
    pub account: AccountType,
    pub realm: String,
    pub target_url: String,
    pub compiled: bool,
}

/// 预检项
#[derive(Debug, Clone)]
pub struct PreflightItem {
    pub label: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

/// 账户切换服务
pub struct SwitchService;

impl SwitchService {
    /// 解析账户并构造其凭据（会先加载 `.env`）
    pub fn credentials(
        paths: &ProjectPaths,
        config: &ProjectConfig,
        input: &str,
    ) -> Result<(AccountType, CredentialSet), AppError> {
        let (account, prefix) = config.resolve_account(input)?;
        load_dotenv(&paths.env_file)?;
        let credentials = CredentialSet::from_env(prefix)?;
        log::debug!("{} 的凭据: {:?}", account, credentials);
        Ok((account, credentials))
    }

    /// 切换到指定账户
    pub fn switch(
        paths: &ProjectPaths,
        config: &ProjectConfig,
        input: &str,
        compile: bool,
    ) -> Result<SwitchReport, AppError> {
        if !paths.editor_settings.exists() {
            return Err(AppError::Config(format!(
                "找不到编辑器设置文件: {}",
                paths.editor_settings.display()
            )));
        }

        let (account, credentials) = Self::credentials(paths, config, input)?;

        if compile {
            CompileService::run(&config.compiler, &paths.resolve(&config.tsconfig))?;
        }

        EditorSettingsService::apply(&paths.editor_settings, &credentials)?;
        log::info!("已切换到 {} ({})", account, credentials.realm);

        Ok(SwitchReport {
            account,
            realm: credentials.realm,
            target_url: credentials.target_url,
            compiled: compile,
        })
    }

    /// 检查项目所需文件是否齐全
    pub fn preflight(paths: &ProjectPaths, config: Option<&ProjectConfig>) -> Vec<PreflightItem> {
        let mut items = vec![
            PreflightItem {
                label: "cwitchconfig.json",
                exists: paths.project_config.exists(),
                path: paths.project_config.clone(),
            },
            PreflightItem {
                label: ".env",
                exists: paths.env_file.exists(),
                path: paths.env_file.clone(),
            },
        ];

        if let Some(config) = config {
            let tsconfig = paths.resolve(&config.tsconfig);
            items.push(PreflightItem {
                label: "tsconfig",
                exists: tsconfig.exists(),
                path: tsconfig,
            });
        }

        items.push(PreflightItem {
            label: ".vscode/settings.json",
            exists: paths.editor_settings.exists(),
            path: paths.editor_settings.clone(),
        });

        items
    }
}
