//! check 命令实现
//!
//! 检查项目文件是否齐全，以及各账户所需的环境变量是否存在。

use anyhow::Result;
use cwitch_core::{load_dotenv, CredentialSet, OAuthSigner, ProjectConfig, ProjectPaths, SwitchService};

use crate::output::{print_checks, print_info, CheckRow, OutputContext};

/// 执行检查
pub fn check(ctx: &OutputContext) -> Result<()> {
    let paths = ProjectPaths::discover()?;
    let config = if paths.project_config.exists() {
        Some(ProjectConfig::load(&paths.project_config)?)
    } else {
        None
    };

    let mut rows: Vec<CheckRow> = SwitchService::preflight(&paths, config.as_ref())
        .into_iter()
        .map(|item| CheckRow {
            item: item.label.to_string(),
            result: (if item.exists { "✓" } else { "✗" }).to_string(),
            detail: item.path.display().to_string(),
        })
        .collect();

    if let Some(config) = &config {
        let env_loaded = load_dotenv(&paths.env_file).is_ok();

        for (account, prefix) in config.configured_accounts() {
            let (result, detail) = if !env_loaded {
                ("-", "未加载 .env".to_string())
            } else {
                match CredentialSet::from_env(prefix)
                    .and_then(|creds| OAuthSigner::new(&creds).map(|_| creds))
                {
                    Ok(creds) => ("✓", creds.realm),
                    Err(err) => ("✗", err.to_string()),
                }
            };
            rows.push(CheckRow {
                item: format!("{} ({})", account.display_name(), prefix),
                result: result.to_string(),
                detail,
            });
        }
    }

    print_checks(ctx, rows);

    if config.is_none() {
        print_info("提示: 在项目根目录创建 cwitchconfig.json，或设置 CWITCH_ROOT");
    }

    Ok(())
}
