//! 上传上下文模块
//!
//! 保存一次上传批次共享的只读状态：签名器、目标地址、仓库根目录和 HTTP 客户端。

use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::credentials::CredentialSet;
use crate::diagnostics::Diagnostic;
use crate::error::AppError;
use crate::oauth::OAuthSigner;

/// 单次请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 建连超时
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 失败时的自定义消息
pub const UPLOAD_ERROR_MESSAGE: &str = "ERROR uploading file.";

/// 上传批次共享的只读上下文
pub struct UploadContext {
    signer: OAuthSigner,
    target_url: String,
    repo_root: PathBuf,
    logical_root: String,
    client: reqwest::Client,
}

impl UploadContext {
    /// 构造上下文
    ///
    /// 凭据不完整时直接失败，此时不会发出任何请求。
    pub fn new(
        credentials: &CredentialSet,
        repo_root: impl Into<PathBuf>,
        logical_root: impl Into<String>,
    ) -> Result<Self, AppError> {
        Self::with_timeouts(
            credentials,
            repo_root,
            logical_root,
            REQUEST_TIMEOUT,
            CONNECT_TIMEOUT,
        )
    }

    /// 使用自定义超时构造上下文
    pub fn with_timeouts(
        credentials: &CredentialSet,
        repo_root: impl Into<PathBuf>,
        logical_root: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, AppError> {
        let signer = OAuthSigner::new(credentials)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            signer,
            target_url: credentials.target_url.clone(),
            repo_root: repo_root.into(),
            logical_root: logical_root.into(),
            client,
        })
    }

    pub fn signer(&self) -> &OAuthSigner {
        &self.signer
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// 计算文件在远端的逻辑名称
    pub fn logical_name(&self, path: &Path) -> Result<String, AppError> {
        logical_name(path, &self.repo_root, &self.logical_root)
    }
}

/// 把仓库内的文件路径映射为 `<logical_root>/<相对路径>`
///
/// 路径先按字面消去 `.` 和 `..`，结果不在 `repo_root` 下时返回 [`AppError::PathMapping`]。
pub fn logical_name(path: &Path, repo_root: &Path, logical_root: &str) -> Result<String, AppError> {
    let normalized = normalize(path);
    let relative = normalized
        .strip_prefix(normalize(repo_root))
        .map_err(|_| AppError::path_mapping(path, repo_root))?;

    let mut segments: Vec<String> = logical_root
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let prefix_len = segments.len();

    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(AppError::path_mapping(path, repo_root)),
        }
    }

    if segments.len() == prefix_len {
        return Err(AppError::path_mapping(path, repo_root));
    }

    Ok(segments.join("/"))
}

/// 不访问文件系统地消去 `.` 和 `..`，根目录之上的 `..` 被丢弃
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// 请求体
#[derive(Debug, Serialize)]
pub struct UploadPayload<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> UploadPayload<'a> {
    pub fn file(name: &'a str, content: &'a str) -> Self {
        Self {
            kind: "file",
            name,
            content,
        }
    }
}

/// 单个文件的上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { file_name: String },
    Failure { path: PathBuf, diagnostic: Diagnostic },
}

impl UploadOutcome {
    pub fn success(path: &Path) -> Self {
        Self::Success {
            file_name: base_name(path),
        }
    }

    pub fn failure(path: &Path, diagnostic: Diagnostic) -> Self {
        Self::Failure {
            path: path.to_path_buf(),
            diagnostic,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 面向用户的输出文本
    pub fn message(&self) -> String {
        match self {
            Self::Success { file_name } => format!("SUCCESS! File \"{file_name}\" uploaded."),
            Self::Failure { diagnostic, .. } => diagnostic.render(),
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
