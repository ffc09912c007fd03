//! accounts 命令实现

use anyhow::Result;
use cwitch_core::{load_dotenv, mask_secret, CredentialSet, EditorSettingsService};

use crate::commands::load_project;
use crate::output::{format_status, print_accounts, print_warning, truncate, AccountRow, OutputContext};

/// 列出 cwitchconfig.json 中配置的账户
pub fn list_accounts(ctx: &OutputContext) -> Result<()> {
    let (paths, config) = load_project()?;

    if let Err(err) = load_dotenv(&paths.env_file) {
        print_warning(&err.to_string());
    }

    let current_realm = EditorSettingsService::current_realm(&paths.editor_settings)
        .unwrap_or_else(|err| {
            log::warn!("{}", err);
            None
        });

    let rows = config
        .configured_accounts()
        .into_iter()
        .map(|(account, prefix)| match CredentialSet::from_env(prefix) {
            Ok(creds) => AccountRow {
                account: account.display_name().to_string(),
                prefix: prefix.to_string(),
                status: format_status(current_realm.as_deref() == Some(creds.realm.as_str())),
                realm: creds.realm,
                restlet: truncate(&creds.target_url, 48),
                consumer_key: mask_secret(&creds.consumer_key),
            },
            Err(err) => AccountRow {
                account: account.display_name().to_string(),
                prefix: prefix.to_string(),
                realm: "-".to_string(),
                restlet: err.to_string(),
                consumer_key: "-".to_string(),
                status: format_status(false),
            },
        })
        .collect();

    print_accounts(ctx, rows);

    Ok(())
}
