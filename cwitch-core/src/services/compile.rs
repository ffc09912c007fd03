//! 编译服务模块
//!
//! 调用外部 TypeScript 编译器 (`tsc -p <tsconfig>`)。

use std::path::Path;
use std::process::Command;

use crate::error::AppError;

/// 编译服务
pub struct CompileService;

impl CompileService {
    /// 同步执行编译，`compiler` 可以带参数（如 `npx tsc`）
    pub fn run(compiler: &str, tsconfig: &Path) -> Result<(), AppError> {
        if !tsconfig.exists() {
            return Err(AppError::Config(format!(
                "找不到 tsconfig 文件: {}",
                tsconfig.display()
            )));
        }

        let mut parts = compiler.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::Config("编译器命令为空".to_string()))?;

        log::debug!("执行 {} -p {}", compiler, tsconfig.display());

        let output = Command::new(program)
            .args(parts)
            .arg("-p")
            .arg(tsconfig)
            .output()
            .map_err(|e| AppError::Compile(format!("无法启动 {}: {}", program, e)))?;

        if output.status.success() {
            log::info!("编译完成: {}", tsconfig.display());
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };

        Err(AppError::Compile(format!(
            "{} 退出码 {}{}",
            program,
            output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string()),
            if detail.is_empty() {
                String::new()
            } else {
                format!("\n{detail}")
            }
        )))
    }
}
