//! 上传命令实现

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use cwitch_core::{CompileService, ScanService, SwitchService, UploadContext, UploadService};

use crate::cli::OutputFormat;
use crate::commands::load_project;
use crate::output::{
    format_outcome, print_error, print_info, print_success, print_uploads, OutputContext,
    UploadRow,
};

/// 把指定文件（或扫描到的文件）上传到账户对应的 RESTlet
pub fn upload(ctx: &OutputContext, account: &str, files: Vec<PathBuf>, compile: bool) -> Result<()> {
    let json = ctx.format == OutputFormat::Json;
    let (paths, config) = load_project()?;
    let (account, credentials) = SwitchService::credentials(&paths, &config, account)?;

    // 凭据不完整时在编译和发送请求之前就失败
    let upload_ctx = UploadContext::new(&credentials, &paths.root, &config.upload.logical_root)?;

    if compile {
        if !json {
            print_info(&format!("正在编译 {} ...", config.tsconfig));
        }
        CompileService::run(&config.compiler, &paths.resolve(&config.tsconfig))?;
        if !json {
            print_success("编译完成");
        }
    }

    let files = if files.is_empty() {
        let dir = paths.resolve(&config.upload.dir);
        ScanService::collect(&dir, &config.upload.extensions)?
    } else {
        let cwd = std::env::current_dir().context("无法获取当前目录")?;
        files
            .into_iter()
            .map(|f| if f.is_absolute() { f } else { cwd.join(f) })
            .collect()
    };

    if files.is_empty() {
        if json {
            print_uploads(ctx, Vec::new());
        } else {
            print_info("没有需要上传的文件");
        }
        return Ok(());
    }

    let progress = if json {
        ProgressBar::hidden()
    } else {
        print_info(&format!(
            "上传 {} 个文件到 {} ({})",
            files.len(),
            account,
            credentials.realm
        ));
        ProgressBar::new(files.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut rows = Vec::with_capacity(files.len());
    let runtime = tokio::runtime::Runtime::new().context("无法创建异步运行时")?;
    let outcomes = runtime.block_on(UploadService::upload_all(&upload_ctx, &files, |path, outcome| {
        progress.set_message(path.display().to_string());
        if json {
            rows.push(UploadRow::from_outcome(path, outcome));
        } else {
            // 非终端时进度条被隐藏，suspend 仍会执行输出
            progress.suspend(|| println!("{}", format_outcome(outcome)));
        }
        progress.inc(1);
    }));
    progress.finish_and_clear();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    let succeeded = outcomes.len() - failed;

    if json {
        print_uploads(ctx, rows);
    } else {
        println!();
        if failed == 0 {
            print_success(&format!("全部 {} 个文件上传成功", succeeded));
        } else {
            print_error(&format!("上传完成: {} 个成功, {} 个失败", succeeded, failed));
        }
    }

    if failed > 0 {
        bail!("{} 个文件上传失败", failed);
    }
    Ok(())
}
