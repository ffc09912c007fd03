//! 输出格式化模块
//!
//! 处理表格、JSON 输出和彩色消息。

use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use cwitch_core::{Diagnostic, UploadOutcome};

use crate::cli::OutputFormat;

/// 输出上下文
pub struct OutputContext {
    pub format: OutputFormat,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }
}

/// 账户列表行
#[derive(Tabled, Serialize)]
pub struct AccountRow {
    #[tabled(rename = "账户")]
    pub account: String,
    #[tabled(rename = "前缀")]
    pub prefix: String,
    #[tabled(rename = "Realm")]
    pub realm: String,
    #[tabled(rename = "RESTlet")]
    pub restlet: String,
    #[tabled(rename = "Consumer Key")]
    pub consumer_key: String,
    #[tabled(rename = "状态")]
    pub status: String,
}

/// 检查结果行
#[derive(Tabled, Serialize)]
pub struct CheckRow {
    #[tabled(rename = "检查项")]
    pub item: String,
    #[tabled(rename = "结果")]
    pub result: String,
    #[tabled(rename = "详情")]
    pub detail: String,
}

/// 切换结果（JSON 输出）
#[derive(Serialize)]
pub struct SwitchSummary {
    pub account: String,
    pub realm: String,
    pub restlet: String,
    pub compiled: bool,
}

/// 单个文件的上传结果行
#[derive(Tabled, Serialize)]
pub struct UploadRow {
    #[tabled(rename = "文件")]
    pub file: String,
    #[tabled(rename = "结果")]
    pub status: String,
    #[tabled(rename = "信息")]
    pub message: String,
}

impl UploadRow {
    pub fn from_outcome(path: &Path, outcome: &UploadOutcome) -> Self {
        Self {
            file: path.display().to_string(),
            status: if outcome.is_success() { "success" } else { "failure" }.to_string(),
            message: outcome.message(),
        }
    }
}

fn print_rows<T: Tabled + Serialize>(ctx: &OutputContext, rows: &[T], empty: &str) {
    match ctx.format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", empty.dimmed());
                return;
            }
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows).unwrap_or_default();
            println!("{}", json);
        }
    }
}

/// 打印账户列表
pub fn print_accounts(ctx: &OutputContext, rows: Vec<AccountRow>) {
    print_rows(ctx, &rows, "cwitchconfig.json 中没有配置账户");
}

/// 打印检查结果
pub fn print_checks(ctx: &OutputContext, rows: Vec<CheckRow>) {
    print_rows(ctx, &rows, "没有检查项");
}

/// 打印上传结果
pub fn print_uploads(ctx: &OutputContext, rows: Vec<UploadRow>) {
    print_rows(ctx, &rows, "没有上传任何文件");
}

/// 以 JSON 打印切换结果
pub fn print_switch_json(summary: &SwitchSummary) {
    println!("{}", serde_json::to_string_pretty(summary).unwrap_or_default());
}

/// 打印成功消息
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// 打印错误消息
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// 打印警告消息
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// 打印信息消息
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// 把诊断格式化为多行文本，首行标红
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut lines = diagnostic.lines.iter();
    let mut out = String::new();
    if let Some(first) = lines.next() {
        out.push_str(&format!("{} {}", "✗".red().bold(), first.red().bold()));
    }
    for line in lines {
        out.push('\n');
        out.push_str(&format!("  {}", line));
    }
    out
}

/// 格式化单个上传结果
pub fn format_outcome(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Success { .. } => {
            format!("{} {}", "✓".green().bold(), outcome.message().green())
        }
        UploadOutcome::Failure { diagnostic, .. } => format_diagnostic(diagnostic),
    }
}

/// 格式化状态标签
pub fn format_status(is_current: bool) -> String {
    if is_current {
        "● 当前".green().bold().to_string()
    } else {
        "○".dimmed().to_string()
    }
}

/// 截断字符串
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// 打印用法说明（账户参数错误时附带）
pub fn print_usage() {
    println!();
    println!("{}", "用法:".white().bold());
    println!("  {}            打印帮助", "cwitch -h".green());
    println!(
        "  {}  编译并切换账户: p, a, s, r 或 production, admin tech, staging, release preview",
        "cwitch -a <账户>".green()
    );
    println!(
        "  {}  只切换账户: p, a, s, r 或 production, admin tech, staging, release preview",
        "cwitch -s <账户>".green()
    );
}
