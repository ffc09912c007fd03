//! 服务层模块
//!
//! 提供账户切换、编译、文件扫描和上传等业务逻辑。

pub mod compile;
pub mod editor_settings;
pub mod scan;
pub mod switch;
pub mod upload;

pub use compile::CompileService;
pub use editor_settings::EditorSettingsService;
pub use scan::ScanService;
pub use switch::{PreflightItem, SwitchReport, SwitchService};
pub use upload::UploadService;
