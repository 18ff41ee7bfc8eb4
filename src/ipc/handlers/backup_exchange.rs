use crate::backup;
use crate::error::{AppError, AppResult};
use crate::ipc::error::respond;
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

fn handle_export_bundle(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let workspace = state.workspace.clone().ok_or(AppError::NoWorkspace)?;
    let out_path = PathBuf::from(get_required_str(params, "outPath")?);

    let summary = backup::export_workspace_bundle(&workspace, &out_path)
        .map_err(|e| AppError::Backup(format!("{:#}", e)))?;
    info!(path = %out_path.display(), sha256 = %summary.db_sha256, "workspace exported");
    Ok(json!({
        "ok": true,
        "path": out_path.to_string_lossy(),
        "bundleFormat": summary.bundle_format,
        "entryCount": summary.entry_count,
        "dbSha256": summary.db_sha256,
    }))
}

fn handle_import_bundle(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let workspace = state.workspace.clone().ok_or(AppError::NoWorkspace)?;
    let in_path = PathBuf::from(get_required_str(params, "inPath")?);

    // The open connection must go before the database file is swapped out.
    state.store = None;
    let imported = backup::import_workspace_bundle(&in_path, &workspace);
    let reloaded = state.load(&workspace);
    let summary = match imported {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %in_path.display(), error = %e, "workspace import failed");
            reloaded?;
            return Err(AppError::Backup(format!("{:#}", e)));
        }
    };
    reloaded?;

    info!(path = %in_path.display(), format = %summary.bundle_format_detected, "workspace imported");
    Ok(json!({
        "ok": true,
        "workspacePath": workspace.to_string_lossy(),
        "bundleFormatDetected": summary.bundle_format_detected,
        "authenticated": state.session.authenticated,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "workspace.exportBundle" => handle_export_bundle(state, &req.params),
        "workspace.importBundle" => handle_import_bundle(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
