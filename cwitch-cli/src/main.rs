//! cwitch CLI
//!
//! 在多个 NetSuite 账户之间切换凭据，并把文件上传到 RESTlet。
//!
//! # 使用示例
//!
//! ```bash
//! # 进入交互式菜单
//! cwitch
//!
//! # 编译并切换到 Staging
//! cwitch -a s
//!
//! # 只切换到 Production
//! cwitch -s p
//!
//! # 上传文件
//! cwitch upload s dist/a.js
//! ```

mod cli;
mod commands;
mod interactive;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use commands::execute;
use output::OutputContext;

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let ctx = OutputContext::new(cli.format, cli.no_color);

    if let Some(account) = cli.compile_and_switch.as_deref() {
        return commands::switch::switch(&ctx, account, true);
    }
    if let Some(account) = cli.switch_only.as_deref() {
        return commands::switch::switch(&ctx, account, false);
    }

    match cli.command {
        Some(command) => execute(&ctx, command),
        None => interactive::main_menu(&ctx),
    }
}
