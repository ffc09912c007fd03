//! 统一错误类型模块
//!
//! 定义应用中使用的所有错误类型。单个文件上传的失败不走这里，
//! 而是以诊断行的形式出现在 [`crate::upload::UploadOutcome`] 中。

use std::path::Path;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 无效输入
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 未知账户
    #[error("未知账户: \"{0}\" (可选: p, a, s, r 或 production, admin tech, staging, release preview)")]
    UnknownAccount(String),

    /// 缺少环境变量
    #[error("缺少环境变量: {0}")]
    MissingEnv(String),

    /// 认证配置缺失，禁止发出任何请求
    #[error("认证配置缺失: {0}")]
    AuthConfig(String),

    /// RESTlet 地址无效
    #[error("无效的 RESTlet 地址 {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// 读取待上传文件失败
    #[error("无法读取文件 {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 文件不在仓库根目录下
    #[error("文件 {path} 不在仓库根目录 {root} 下")]
    PathMapping { path: String, root: String },

    /// 编译失败
    #[error("编译失败: {0}")]
    Compile(String),

    /// IO 错误（带路径上下文）
    #[error("IO 错误: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO 错误（带自定义上下文）
    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析错误
    #[error("JSON 解析错误: {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON 序列化错误
    #[error("JSON 序列化失败: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    Http(String),
}

impl AppError {
    /// 创建 IO 错误
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建 JSON 解析错误
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建文件读取错误
    pub fn file_read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建路径映射错误
    pub fn path_mapping(path: impl AsRef<Path>, root: impl AsRef<Path>) -> Self {
        Self::PathMapping {
            path: path.as_ref().display().to_string(),
            root: root.as_ref().display().to_string(),
        }
    }

    /// 创建 URL 错误
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::IoContext {
            context: "IO 操作失败".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonSerialize { source: err }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AppError>;
