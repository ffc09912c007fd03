//! 上传错误诊断模块
//!
//! 把一次失败的上传整理成若干行可读的诊断信息。纯格式化，不做任何 IO。

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// 远端返回的 "缺少必填参数" 错误名
pub const MISSING_REQUIRED_ARGUMENT: &str = "SSS_MISSING_REQD_ARGUMENT";

/// 空文件提示，追加在自定义消息之后
pub const EMPTY_FILE_NOTE: &str = " NetSuite N/file module does not allow storing an empty file.";

/// 诊断末尾固定的提示行
pub const CONSOLE_HINT: &str =
    "Use Help > Toggle Developer Tools and choose the Console tab for a better formatted error message.";

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 403
    AuthenticationFailed,
    /// 预置的简短消息
    ShortCircuit,
    /// 响应体中带有远端错误对象
    RemoteService,
    /// 响应体中有 error 字段但无法解析
    MalformedRemote,
    /// 其他传输错误（含超时）
    UnknownTransport,
    /// 读取本地文件失败
    FileRead,
    /// 文件不在仓库根目录下
    PathMapping,
}

/// 一次失败请求的原始信息
#[derive(Debug, Clone, Default)]
pub struct TransportFailure {
    /// HTTP 状态码（传输层失败时没有）
    pub status: Option<u16>,
    /// 本地错误消息
    pub message: String,
    /// 预置的简短消息，存在时只显示它
    pub short_message: Option<String>,
    /// 响应体原文
    pub body: Option<String>,
    /// 本地错误链
    pub stack: Vec<String>,
}

impl TransportFailure {
    /// 从非 2xx 响应构造
    pub fn from_response(status: u16, reason: Option<&str>, body: String) -> Self {
        let message = match reason {
            Some(reason) => format!("cannot POST ({status} {reason})"),
            None => format!("cannot POST ({status})"),
        };
        Self {
            status: Some(status),
            message,
            body: Some(body),
            ..Self::default()
        }
    }

    /// 从任意错误构造，错误链作为本地堆栈
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
            stack: error_chain(err),
            ..Self::default()
        }
    }
}

/// 诊断结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub lines: Vec<String>,
}

impl Diagnostic {
    /// 本地错误（读取失败、路径映射失败等），同样带上自定义消息和提示行
    pub fn from_app_error(custom_message: &str, err: &AppError) -> Self {
        let kind = match err {
            AppError::FileRead { .. } => ErrorKind::FileRead,
            AppError::PathMapping { .. } => ErrorKind::PathMapping,
            _ => ErrorKind::UnknownTransport,
        };
        Self {
            kind,
            lines: vec![
                custom_message.to_string(),
                err.to_string(),
                CONSOLE_HINT.to_string(),
            ],
        }
    }

    /// 合并为一段文本
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct RemoteError {
    #[serde(default, rename = "type")]
    kind: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    stack: Option<Value>,
}

/// `error.message` 本身是一段 JSON 编码的远端错误
fn remote_error(error: &Value) -> Option<RemoteError> {
    let raw = error.get("message")?.as_str()?;
    serde_json::from_str(raw).ok()
}

/// 对失败请求进行分类并生成诊断行
///
/// 第一行总是 `custom_message`（可能附加空文件提示），最后一行总是 [`CONSOLE_HINT`]。
pub fn classify(custom_message: &str, failure: &TransportFailure) -> Diagnostic {
    let mut headline = custom_message.to_string();

    let (kind, mut details) = if failure.status == Some(403) {
        let mut lines = vec![
            "AUTHENTICATION FAILED!".to_string(),
            "HTTP Status: 403".to_string(),
            format!("HTTP Error: {}", failure.message),
        ];
        lines.extend(local_stack(failure));
        (ErrorKind::AuthenticationFailed, lines)
    } else if let Some(short) = failure.short_message.as_deref() {
        (ErrorKind::ShortCircuit, vec![short.to_string()])
    } else if let Some(error) = parse_error_field(failure.body.as_deref()) {
        match remote_error(&error) {
            Some(remote) => {
                if remote.name.as_ref().and_then(Value::as_str) == Some(MISSING_REQUIRED_ARGUMENT) {
                    headline.push_str(EMPTY_FILE_NOTE);
                }
                let mut lines = vec![
                    "NetSuite Error Details:".to_string(),
                    value_text(remote.kind.as_ref()),
                    value_text(remote.name.as_ref()),
                    value_text(remote.message.as_ref()),
                    value_text(remote.code.as_ref()),
                    "Remote Stack:".to_string(),
                    value_text(remote.stack.as_ref()),
                ];
                lines.extend(local_status(failure));
                lines.extend(local_stack(failure));
                (ErrorKind::RemoteService, lines)
            }
            None => {
                let mut lines = vec![
                    "NetSuite Error Details:".to_string(),
                    format!("NS Error: {}", value_text(error.get("code"))),
                    format!("NS Message: {}", value_text(error.get("message"))),
                ];
                lines.extend(local_status(failure));
                lines.extend(local_stack(failure));
                (ErrorKind::MalformedRemote, lines)
            }
        }
    } else {
        let mut lines = vec!["Unknown Error:".to_string()];
        lines.extend(local_status(failure));
        lines.extend(local_stack(failure));
        (ErrorKind::UnknownTransport, lines)
    };

    let mut lines = Vec::with_capacity(details.len() + 2);
    lines.push(headline);
    lines.append(&mut details);
    lines.push(CONSOLE_HINT.to_string());

    Diagnostic { kind, lines }
}

/// 响应体中非 null 的 `error` 字段，形状不限
fn parse_error_field(body: Option<&str>) -> Option<Value> {
    let body: ResponseBody = serde_json::from_str(body?).ok()?;
    body.error.filter(|error| !error.is_null())
}

fn local_status(failure: &TransportFailure) -> Vec<String> {
    let status = failure
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    vec![
        format!("HTTP Status: {status}"),
        format!("HTTP Error: {}", failure.message),
    ]
}

fn local_stack(failure: &TransportFailure) -> Vec<String> {
    let mut lines = vec!["Local Stack:".to_string()];
    if failure.stack.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.extend(failure.stack.iter().cloned());
    }
    lines
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(none)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| value_text(Some(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => other.to_string(),
    }
}

/// 展开错误的 source 链
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = vec![format!("{err:?}")];
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(format!("caused by: {cause}"));
        current = cause.source();
    }
    chain
}
