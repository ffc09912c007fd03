//! 文件扫描服务模块
//!
//! 在上传目录中查找扩展名在白名单内的文件。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 扫描时跳过的目录
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// 扫描服务
pub struct ScanService;

impl ScanService {
    /// 递归收集 `dir` 下扩展名匹配的文件，结果按路径排序
    ///
    /// 扩展名不区分大小写，前导 `.` 可有可无。隐藏文件和目录会被跳过。
    pub fn collect(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, AppError> {
        if !dir.is_dir() {
            return Err(AppError::Config(format!(
                "上传目录不存在: {}",
                dir.display()
            )));
        }

        let allowed: Vec<String> = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        let mut found = Vec::new();
        Self::walk(dir, &allowed, &mut found)?;
        found.sort();

        log::debug!("在 {} 中找到 {} 个文件", dir.display(), found.len());
        Ok(found)
    }

    fn walk(dir: &Path, allowed: &[String], found: &mut Vec<PathBuf>) -> Result<(), AppError> {
        for entry in fs::read_dir(dir).map_err(|e| AppError::io(dir, e))? {
            let entry = entry.map_err(|e| AppError::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            if path.is_dir() {
                if !SKIPPED_DIRS.contains(&name.as_str()) {
                    Self::walk(&path, allowed, found)?;
                }
            } else if Self::is_allowed(&path, allowed) {
                found.push(path);
            }
        }
        Ok(())
    }

    fn is_allowed(path: &Path, allowed: &[String]) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .map(|ext| allowed.iter().any(|a| *a == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_filters_and_sorts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        fs::write(root.join("b/nested/z.js"), "").unwrap();
        fs::write(root.join("a.JS"), "").unwrap();
        fs::write(root.join("b/readme.md"), "").unwrap();
        fs::write(root.join("b/style.css"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join(".git/hook.js"), "").unwrap();
        fs::write(root.join(".hidden.js"), "").unwrap();

        let files = ScanService::collect(root, &["js".to_string(), ".css".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("a.JS"),
                root.join("b/nested/z.js"),
                root.join("b/style.css"),
            ]
        );
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempdir().unwrap();
        let result = ScanService::collect(&dir.path().join("dist"), &["js".to_string()]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
