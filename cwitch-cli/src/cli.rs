//! CLI 参数定义模块
//!
//! 使用 clap 定义命令行接口结构。

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cwitch - NetSuite 账户切换工具
///
/// 在多个 NetSuite 账户之间切换凭据，写入 VS Code 设置，并可上传编译后的文件。
#[derive(Parser, Debug)]
#[command(
    name = "cwitch",
    version,
    author,
    about = "🔄 NetSuite 账户切换工具 - 切换凭据、编译并上传 SuiteScript",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════╗
║              cwitch - NetSuite 账户切换工具                          ║
╚══════════════════════════════════════════════════════════════════════╝

从 .env 读取各账户的凭据，写入 .vscode/settings.json，
可选地先执行 tsc 编译，或直接把文件上传到 RESTlet。

账户名称按首字母匹配: p, a, s, r
或 production, admin tech, staging, release preview

🚀 快速开始:
   cwitch                 进入交互式菜单
   cwitch -a <账户>       编译并切换账户
   cwitch -s <账户>       只切换账户
   cwitch upload <账户>   上传文件到 RESTlet

📖 详细帮助:
   cwitch <命令> --help   查看命令详情
"#,
    after_help = r#"💡 提示: 直接运行 cwitch 不带参数可进入交互式菜单"#
)]
pub struct Cli {
    /// 编译 ts 文件并切换到指定账户
    #[arg(
        short = 'a',
        long = "account",
        value_name = "ACCOUNT",
        conflicts_with = "switch_only",
        help = "编译并切换账户 (p, a, s, r)"
    )]
    pub compile_and_switch: Option<String>,

    /// 只切换到指定账户
    #[arg(
        short = 's',
        long = "switch",
        value_name = "ACCOUNT",
        help = "只切换账户，不编译 (p, a, s, r)"
    )]
    pub switch_only: Option<String>,

    /// 输出格式
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value = "table",
        global = true,
        help = "输出格式 (table, json)"
    )]
    pub format: OutputFormat,

    /// 禁用彩色输出
    #[arg(long, global = true, help = "禁用彩色输出")]
    pub no_color: bool,

    /// 显示详细信息
    #[arg(short, long, global = true, help = "显示详细日志")]
    pub verbose: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 表格格式（默认）
    Table,
    /// JSON 格式
    Json,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 🔄 切换到指定账户
    #[command(
        visible_alias = "use",
        long_about = "把指定账户的凭据写入 .vscode/settings.json。\n\n示例:\n  cwitch switch p             切换到 Production\n  cwitch switch staging -c    先编译再切换到 Staging"
    )]
    Switch {
        /// 账户名称 (p, a, s, r)
        account: String,

        /// 切换前先执行编译
        #[arg(short, long)]
        compile: bool,
    },

    /// 📤 上传文件到 RESTlet
    #[command(
        long_about = "使用指定账户的凭据，把文件逐个上传到 RESTlet。\n不指定文件时，扫描 cwitchconfig.json 中 upload.dir 下符合扩展名的文件。\n\n示例:\n  cwitch upload s dist/a.js dist/b.js   上传两个文件\n  cwitch upload p --compile             编译后上传整个目录"
    )]
    Upload {
        /// 账户名称 (p, a, s, r)
        account: String,

        /// 要上传的文件
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// 上传前先执行编译
        #[arg(short, long)]
        compile: bool,
    },

    /// 📋 列出已配置的账户
    #[command(visible_alias = "ls")]
    Accounts,

    /// ✅ 检查项目文件和环境变量
    Check,

    /// ℹ️ 显示版本信息
    Version,
}
