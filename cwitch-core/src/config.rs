//! 项目路径和配置文件读写模块
//!
//! 解析项目根目录下的各类文件路径，并提供 JSON 的读取与原子写入。

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 项目配置文件名
pub const PROJECT_CONFIG_FILE: &str = "cwitchconfig.json";

/// 项目内各文件路径
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// 项目根目录
    pub root: PathBuf,
    /// `.env` 文件
    pub env_file: PathBuf,
    /// 编辑器设置文件 `.vscode/settings.json`
    pub editor_settings: PathBuf,
    /// `cwitchconfig.json`
    pub project_config: PathBuf,
}

impl ProjectPaths {
    /// 以指定目录为根构造路径
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            env_file: root.join(".env"),
            editor_settings: root.join(".vscode").join("settings.json"),
            project_config: root.join(PROJECT_CONFIG_FILE),
            root,
        }
    }

    /// 定位项目根目录
    ///
    /// 支持 `CWITCH_ROOT` 环境变量覆盖，否则使用当前目录
    pub fn discover() -> Result<Self, AppError> {
        let cwd = std::env::current_dir().map_err(|e| AppError::IoContext {
            context: "无法获取当前目录".to_string(),
            source: e,
        })?;

        if let Ok(root) = std::env::var("CWITCH_ROOT") {
            let trimmed = root.trim();
            if !trimmed.is_empty() {
                // 相对路径按当前目录解析，保证上传时能做前缀匹配
                return Ok(Self::from_root(cwd.join(trimmed)));
            }
        }

        Ok(Self::from_root(cwd))
    }

    /// 相对于项目根目录解析路径
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.root.join(relative)
        }
    }
}

/// 读取 JSON 配置文件
pub fn read_json_file<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!("文件不存在: {}", path.display())));
    }

    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| AppError::json(path, e))
}

/// 写入 JSON 配置文件（原子写入，4 空格缩进）
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), AppError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)
        .map_err(|e| AppError::JsonSerialize { source: e })?;

    atomic_write(path, &buf)
}

/// 原子写入：写入临时文件后 rename 替换，避免半写状态
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }

    let parent = path
        .parent()
        .ok_or_else(|| AppError::Config("无效的路径".to_string()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Config("无效的文件名".to_string()))?
        .to_string_lossy()
        .to_string();

    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    let mut tmp = parent.to_path_buf();
    tmp.push(format!("{file_name}.tmp.{ts}"));

    {
        let mut f = fs::File::create(&tmp).map_err(|e| AppError::io(&tmp, e))?;
        f.write_all(data).map_err(|e| AppError::io(&tmp, e))?;
        f.flush().map_err(|e| AppError::io(&tmp, e))?;
    }

    // Unix: 保留原文件权限
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = fs::metadata(path) {
            let perm = meta.permissions().mode();
            let _ = fs::set_permissions(&tmp, fs::Permissions::from_mode(perm));
        }
    }

    fs::rename(&tmp, path).map_err(|e| AppError::IoContext {
        context: format!("原子替换失败: {} -> {}", tmp.display(), path.display()),
        source: e,
    })?;

    Ok(())
}
