//! 交互式菜单模块
//!
//! 不带参数运行时，列出已配置的账户供选择。

use anyhow::{bail, Result};
use colored::Colorize;
use std::io::{self, Write};

use crate::commands;
use crate::output::OutputContext;

const JUST_SWITCH_ACCOUNT: &str = "Just Switch Account";

/// 读取用户输入
fn read_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        bail!("输入已结束");
    }
    Ok(input.trim().to_string())
}

/// 从列表中选择一项，可输入序号或完整名称
fn select<'a>(title: &str, options: &'a [String]) -> Result<&'a str> {
    println!("\n{}", title.cyan().bold());
    for (i, option) in options.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).green(), option);
    }
    println!("  {} {}", "0.".green(), "退出".white());

    loop {
        let choice = read_input("\n请输入序号: ")?;

        if let Ok(num) = choice.parse::<usize>() {
            if num == 0 {
                bail!("已取消");
            }
            if num <= options.len() {
                return Ok(options[num - 1].as_str());
            }
        }

        if let Some(option) = options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(&choice))
        {
            return Ok(option.as_str());
        }

        println!(
            "{}",
            format!("无效选择，请输入 0-{}", options.len()).yellow()
        );
    }
}

/// 主菜单
pub fn main_menu(ctx: &OutputContext) -> Result<()> {
    let (_, config) = commands::load_project()?;

    let accounts: Vec<String> = config
        .configured_accounts()
        .iter()
        .map(|(account, _)| account.display_name().to_string())
        .collect();
    if accounts.is_empty() {
        bail!("cwitchconfig.json 中没有配置账户");
    }

    println!();
    println!("{}", "╔════════════════════════════════════════╗".cyan());
    println!("{}", "║     cwitch - NetSuite 账户切换工具     ║".cyan().bold());
    println!("{}", "╚════════════════════════════════════════╝".cyan());

    let mut options = accounts.clone();
    options.push(JUST_SWITCH_ACCOUNT.to_string());

    let choice = select("请选择操作 (选择账户会先编译再切换):", &options)?;

    if choice == JUST_SWITCH_ACCOUNT {
        let account = select("请选择账户:", &accounts)?;
        commands::switch::switch(ctx, account, false)
    } else {
        commands::switch::switch(ctx, choice, true)
    }
}
