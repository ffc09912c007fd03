//! 上传服务模块
//!
//! 逐个把文件 POST 到 RESTlet。不重试，某个文件失败不影响后续文件。

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::{classify, Diagnostic, TransportFailure};
use crate::error::AppError;
use crate::upload::{UploadContext, UploadOutcome, UploadPayload, UPLOAD_ERROR_MESSAGE};

/// 上传服务
pub struct UploadService;

impl UploadService {
    /// 上传单个文件
    pub async fn upload_file(ctx: &UploadContext, path: &Path) -> UploadOutcome {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let err = AppError::file_read(path, e);
                log::warn!("{}", err);
                return UploadOutcome::failure(
                    path,
                    Diagnostic::from_app_error(UPLOAD_ERROR_MESSAGE, &err),
                );
            }
        };

        let name = match ctx.logical_name(path) {
            Ok(name) => name,
            Err(err) => {
                log::warn!("{}", err);
                return UploadOutcome::failure(
                    path,
                    Diagnostic::from_app_error(UPLOAD_ERROR_MESSAGE, &err),
                );
            }
        };

        let payload = UploadPayload::file(&name, &content);
        let authorization = ctx.signer().authorization_header("POST");

        log::debug!("POST {} -> {}", name, ctx.target_url());

        let response = ctx
            .client()
            .post(ctx.target_url())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, authorization)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                log::info!("已上传 {}", name);
                UploadOutcome::success(path)
            }
            Ok(resp) => {
                let status = resp.status();
                let body = match resp.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        log::debug!("读取 {} 的响应体失败: {}", name, e);
                        String::new()
                    }
                };
                log::debug!("上传 {} 失败: HTTP {} {}", name, status, body);
                let failure =
                    TransportFailure::from_response(status.as_u16(), status.canonical_reason(), body);
                UploadOutcome::failure(path, classify(UPLOAD_ERROR_MESSAGE, &failure))
            }
            Err(e) => {
                log::debug!("上传 {} 失败: {:?}", name, e);
                let failure = TransportFailure::from_error(&e);
                UploadOutcome::failure(path, classify(UPLOAD_ERROR_MESSAGE, &failure))
            }
        }
    }

    /// 按输入顺序依次上传，每个文件完成后回调 `on_outcome`
    pub async fn upload_all<F>(
        ctx: &UploadContext,
        paths: &[PathBuf],
        mut on_outcome: F,
    ) -> Vec<UploadOutcome>
    where
        F: FnMut(&Path, &UploadOutcome),
    {
        let mut outcomes = Vec::with_capacity(paths.len());

        for path in paths {
            let outcome = Self::upload_file(ctx, path).await;
            on_outcome(path, &outcome);
            outcomes.push(outcome);
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialSet;
    use crate::diagnostics::{ErrorKind, EMPTY_FILE_NOTE};
    use httpmock::prelude::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn credentials(server: &MockServer) -> CredentialSet {
        CredentialSet {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            token_key: "tk".to_string(),
            token_secret: "ts".to_string(),
            realm: "1234567_SB1".to_string(),
            target_url: format!("{}/restlet.nl?script=12&deploy=1", server.base_url()),
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Runtime::new().unwrap()
    }

    #[test]
    fn test_upload_sends_signed_json() {
        let server = MockServer::start();
        let dir = tempdir().unwrap();
        let file = dir.path().join("dist").join("a.js");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "define([], () => ({}));").unwrap();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/restlet.nl")
                .query_param("script", "12")
                .query_param("deploy", "1")
                .header("content-type", "application/json")
                .header_exists("authorization")
                .json_body(serde_json::json!({
                    "type": "file",
                    "name": "SuiteScripts/dist/a.js",
                    "content": "define([], () => ({}));"
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        });

        let ctx = UploadContext::new(&credentials(&server), dir.path(), "SuiteScripts").unwrap();
        let outcome = runtime().block_on(UploadService::upload_file(&ctx, &file));

        mock.assert();
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                file_name: "a.js".to_string()
            }
        );
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let server = MockServer::start();
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.js");
        let second = dir.path().join("second.js");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "2").unwrap();

        let fail_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/restlet.nl")
                .json_body_includes(r#"{ "name": "SuiteScripts/first.js" }"#);
            then.status(500).body("Internal Server Error");
        });
        let ok_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/restlet.nl")
                .json_body_includes(r#"{ "name": "SuiteScripts/second.js" }"#);
            then.status(200).body("ok");
        });

        let ctx = UploadContext::new(&credentials(&server), dir.path(), "SuiteScripts").unwrap();
        let paths = vec![first.clone(), second.clone()];
        let mut seen = Vec::new();
        let outcomes = runtime().block_on(UploadService::upload_all(&ctx, &paths, |p, _| {
            seen.push(p.to_path_buf())
        }));

        fail_mock.assert_calls(1);
        ok_mock.assert_calls(1);
        assert_eq!(seen, paths);
        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            UploadOutcome::Failure { path, diagnostic } => {
                assert_eq!(path, &first);
                assert_eq!(diagnostic.kind, ErrorKind::UnknownTransport);
                assert!(diagnostic.lines.contains(&"HTTP Status: 500".to_string()));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(outcomes[1].is_success());
    }

    #[test]
    fn test_timeout_is_unknown_transport_and_batch_continues() {
        let server = MockServer::start();
        let dir = tempdir().unwrap();
        let slow = dir.path().join("slow.js");
        let fast = dir.path().join("fast.js");
        fs::write(&slow, "1").unwrap();
        fs::write(&fast, "2").unwrap();

        server.mock(|when, then| {
            when.method(POST)
                .path("/restlet.nl")
                .json_body_includes(r#"{ "name": "SuiteScripts/slow.js" }"#);
            then.status(200).delay(Duration::from_secs(3)).body("late");
        });
        let ok_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/restlet.nl")
                .json_body_includes(r#"{ "name": "SuiteScripts/fast.js" }"#);
            then.status(200).body("ok");
        });

        let ctx = UploadContext::with_timeouts(
            &credentials(&server),
            dir.path(),
            "SuiteScripts",
            Duration::from_millis(300),
            Duration::from_millis(300),
        )
        .unwrap();
        let paths = vec![slow.clone(), fast];
        let outcomes = runtime().block_on(UploadService::upload_all(&ctx, &paths, |_, _| {}));

        ok_mock.assert_calls(1);
        match &outcomes[0] {
            UploadOutcome::Failure { path, diagnostic } => {
                assert_eq!(path, &slow);
                assert_eq!(diagnostic.kind, ErrorKind::UnknownTransport);
                assert!(diagnostic.lines.contains(&"HTTP Status: (none)".to_string()));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(outcomes[1].is_success());
    }

    #[test]
    fn test_connection_refused_is_unknown_transport() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "x").unwrap();

        // 先占用再释放一个端口，保证没有服务在监听
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let creds = CredentialSet {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            token_key: "tk".to_string(),
            token_secret: "ts".to_string(),
            realm: "R".to_string(),
            target_url: format!("http://127.0.0.1:{port}/restlet.nl?script=1&deploy=1"),
        };

        let ctx = UploadContext::new(&creds, dir.path(), "SuiteScripts").unwrap();
        let outcome = runtime().block_on(UploadService::upload_file(&ctx, &file));

        match outcome {
            UploadOutcome::Failure { diagnostic, .. } => {
                assert_eq!(diagnostic.kind, ErrorKind::UnknownTransport);
                assert_eq!(diagnostic.lines[1], "Unknown Error:");
                assert!(diagnostic.lines.contains(&"Local Stack:".to_string()));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_forbidden_response() {
        let server = MockServer::start();
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "x").unwrap();

        server.mock(|when, then| {
            when.method(POST).path("/restlet.nl");
            then.status(403).body("{}");
        });

        let ctx = UploadContext::new(&credentials(&server), dir.path(), "SuiteScripts").unwrap();
        let outcome = runtime().block_on(UploadService::upload_file(&ctx, &file));

        match outcome {
            UploadOutcome::Failure { diagnostic, .. } => {
                assert_eq!(diagnostic.kind, ErrorKind::AuthenticationFailed);
                assert_eq!(diagnostic.lines[0], UPLOAD_ERROR_MESSAGE);
                assert!(diagnostic.render().contains("403"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_remote_error() {
        let server = MockServer::start();
        let dir = tempdir().unwrap();
        let file = dir.path().join("empty.js");
        fs::write(&file, "").unwrap();

        server.mock(|when, then| {
            when.method(POST).path("/restlet.nl");
            then.status(400)
                .header("content-type", "application/json")
                .body(r#"{"error":{"code":"SSS_MISSING_REQD_ARGUMENT","message":"{\"name\":\"SSS_MISSING_REQD_ARGUMENT\",\"message\":\"x\"}"}}"#);
        });

        let ctx = UploadContext::new(&credentials(&server), dir.path(), "SuiteScripts").unwrap();
        let outcome = runtime().block_on(UploadService::upload_file(&ctx, &file));

        match outcome {
            UploadOutcome::Failure { diagnostic, .. } => {
                assert_eq!(diagnostic.kind, ErrorKind::RemoteService);
                assert!(diagnostic.lines[0].ends_with(EMPTY_FILE_NOTE));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_local_failures_do_not_hit_the_server() {
        let server = MockServer::start();
        let repo = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let stray = outside.path().join("stray.js");
        fs::write(&stray, "x").unwrap();
        let missing = repo.path().join("missing.js");

        let mock = server.mock(|when, then| {
            when.method(POST).path("/restlet.nl");
            then.status(200);
        });

        let ctx = UploadContext::new(&credentials(&server), repo.path(), "SuiteScripts").unwrap();
        let outcomes = runtime().block_on(UploadService::upload_all(
            &ctx,
            &[missing, stray],
            |_, _| {},
        ));

        mock.assert_calls(0);
        let kinds: Vec<_> = outcomes
            .iter()
            .map(|o| match o {
                UploadOutcome::Failure { diagnostic, .. } => diagnostic.kind,
                UploadOutcome::Success { .. } => panic!("unexpected success"),
            })
            .collect();
        assert_eq!(kinds, vec![ErrorKind::FileRead, ErrorKind::PathMapping]);
    }
}
