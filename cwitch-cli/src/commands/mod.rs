//! 命令执行模块
//!
//! 实现各个 CLI 子命令的具体逻辑。

pub mod accounts;
pub mod check;
pub mod switch;
pub mod upload;

use anyhow::{Context, Result};
use cwitch_core::{ProjectConfig, ProjectPaths};

use crate::cli::Commands;
use crate::output::OutputContext;

/// 定位项目并加载 cwitchconfig.json
pub fn load_project() -> Result<(ProjectPaths, ProjectConfig)> {
    let paths = ProjectPaths::discover()?;
    if !paths.project_config.exists() {
        anyhow::bail!(
            "找不到 cwitchconfig.json 文件: {}",
            paths.project_config.display()
        );
    }
    let config = ProjectConfig::load(&paths.project_config)
        .with_context(|| format!("无法加载 {}", paths.project_config.display()))?;
    Ok((paths, config))
}

/// 执行 CLI 命令
pub fn execute(ctx: &OutputContext, command: Commands) -> Result<()> {
    match command {
        Commands::Switch { account, compile } => switch::switch(ctx, &account, compile),
        Commands::Upload {
            account,
            files,
            compile,
        } => upload::upload(ctx, &account, files, compile),
        Commands::Accounts => accounts::list_accounts(ctx),
        Commands::Check => check::check(ctx),
        Commands::Version => {
            println!("{} {}", cwitch_core::APP_NAME, cwitch_core::VERSION);
            Ok(())
        }
    }
}
