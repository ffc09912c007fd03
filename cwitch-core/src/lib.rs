//! cwitch Core Library
//!
//! 核心业务逻辑库：在多个 NetSuite 账户之间切换凭据，把凭据写入编辑器设置，
//! 并通过 OAuth 1.0a 签名的请求把编译后的文件上传到 RESTlet。
//! 此库不做任何终端交互，可在 CLI 或其他工具中使用。
//!
//! # 架构设计
//!
//! ```text
//! cwitch-core/
//! ├── lib.rs           - 公共 API 导出
//! ├── config.rs        - 项目路径和 JSON 读写
//! ├── error.rs         - 统一错误类型
//! ├── account.rs       - 账户类型
//! ├── project.rs       - cwitchconfig.json
//! ├── credentials.rs   - 凭据与环境变量
//! ├── oauth.rs         - OAuth 1.0a 签名
//! ├── diagnostics.rs   - 上传错误诊断
//! ├── upload.rs        - 上传上下文与结果
//! └── services/        - 业务逻辑服务层
//!     ├── switch.rs
//!     ├── editor_settings.rs
//!     ├── compile.rs
//!     ├── scan.rs
//!     └── upload.rs
//! ```
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use cwitch_core::{ProjectConfig, ProjectPaths, SwitchService, UploadContext, UploadService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let paths = ProjectPaths::discover()?;
//!     let config = ProjectConfig::load(&paths.project_config)?;
//!
//!     // 切换到预发环境（不编译）
//!     let report = SwitchService::switch(&paths, &config, "staging", false)?;
//!     println!("当前 realm: {}", report.realm);
//!
//!     // 上传一个文件
//!     let (_, credentials) = SwitchService::credentials(&paths, &config, "staging")?;
//!     let ctx = UploadContext::new(&credentials, &paths.root, "SuiteScripts")?;
//!     let file = paths.root.join("dist/main.js");
//!     let outcome = tokio::runtime::Runtime::new()?
//!         .block_on(UploadService::upload_file(&ctx, &file));
//!     println!("{}", outcome.message());
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod config;
pub mod credentials;
pub mod diagnostics;
pub mod error;
pub mod oauth;
pub mod project;
pub mod services;
pub mod upload;

// 公共类型导出
pub use account::AccountType;
pub use config::{read_json_file, write_json_file, ProjectPaths};
pub use credentials::{load_dotenv, mask_secret, CredentialSet};
pub use diagnostics::{classify, Diagnostic, ErrorKind, TransportFailure};
pub use error::AppError;
pub use oauth::OAuthSigner;
pub use project::{ProjectConfig, UploadSettings};
pub use services::{
    CompileService, EditorSettingsService, PreflightItem, ScanService, SwitchReport,
    SwitchService, UploadService,
};
pub use upload::{UploadContext, UploadOutcome};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用名称
pub const APP_NAME: &str = "cwitch";
