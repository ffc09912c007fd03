//! 账户切换命令实现

use anyhow::Result;
use cwitch_core::{AppError, SwitchService};

use crate::cli::OutputFormat;
use crate::commands::load_project;
use crate::output::{
    print_info, print_success, print_switch_json, print_usage, OutputContext, SwitchSummary,
};

/// 切换账户，`compile` 为真时先编译
pub fn switch(ctx: &OutputContext, account: &str, compile: bool) -> Result<()> {
    let (paths, config) = load_project()?;
    let json = ctx.format == OutputFormat::Json;

    if compile && !json {
        print_info(&format!("正在编译 {} ...", config.tsconfig));
    }

    let report = match SwitchService::switch(&paths, &config, account, compile) {
        Ok(report) => report,
        Err(err @ (AppError::UnknownAccount(_) | AppError::InvalidInput(_))) => {
            // 错误本身由 main 打印，这里只补充用法
            if !json {
                print_usage();
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        print_switch_json(&SwitchSummary {
            account: report.account.display_name().to_string(),
            realm: report.realm,
            restlet: report.target_url,
            compiled: report.compiled,
        });
        return Ok(());
    }

    if report.compiled {
        print_success("编译完成");
    }
    print_success(&format!("已切换到账户: {}", report.account));
    print_info(&format!("Realm: {}", report.realm));
    print_info(&format!("RESTlet: {}", report.target_url));
    Ok(())
}
