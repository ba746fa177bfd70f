//! RPC method handler for the Linkstash JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! auth service, link store, and metadata extractor via the `App` struct.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::auth_service::AuthServiceTrait;
use crate::types::filter::{DateRange, SortBy, SortOrder, ViewMode};
use crate::types::link::Link;
use crate::types::user::User;

fn user_json(user: &User) -> Value {
    json!({"id": user.id, "email": user.email, "createdAt": user.created_at * 1000})
}

fn link_json(link: &Link) -> Value {
    json!({
        "id": link.id,
        "url": link.url,
        "title": link.title,
        "description": link.description,
        "image": link.image,
        "tags": link.tags.as_slice(),
        "createdAt": link.created_at * 1000,
    })
}

/// Reads an array-of-strings parameter; non-string entries are dropped.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect()
    })
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(
    app: &Mutex<App>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    match method {
        // ─── Auth ───
        "auth.sign_up" => {
            let email = params.get("email").and_then(|v| v.as_str()).ok_or("missing email")?;
            let password = params
                .get("password")
                .and_then(|v| v.as_str())
                .ok_or("missing password")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let user = a.sign_up(email, password).map_err(|e| e.user_message())?;
            Ok(json!({"user": user_json(&user)}))
        }
        "auth.sign_in" => {
            let email = params.get("email").and_then(|v| v.as_str()).ok_or("missing email")?;
            let password = params
                .get("password")
                .and_then(|v| v.as_str())
                .ok_or("missing password")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let user = a.sign_in(email, password).map_err(|e| e.user_message())?;
            Ok(json!({"user": user_json(&user)}))
        }
        "auth.sign_out" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.sign_out().map_err(|e| e.user_message())?;
            Ok(json!({"ok": true}))
        }
        "auth.current" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            match a.auth.current_user() {
                Some(user) => Ok(json!({"user": user_json(user)})),
                None => Ok(json!({"user": null})),
            }
        }

        // ─── Links ───
        "link.add" => {
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let tags = string_list(params.get("tags")).unwrap_or_default();
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            if store.create(url, tags).await {
                let link = store.links().first().ok_or("link missing after create")?;
                Ok(link_json(link))
            } else {
                Err(store.error().unwrap_or("create failed").to_string())
            }
        }
        "link.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store().ok_or("not signed in")?;
            let items: Vec<Value> = store.visible().iter().map(link_json).collect();
            Ok(json!({
                "items": items,
                "total": store.links().len(),
                "viewMode": store.view_mode().as_str(),
            }))
        }
        "link.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            if store.delete(id) {
                Ok(json!({"ok": true}))
            } else {
                Err(store.error().unwrap_or("delete failed").to_string())
            }
        }
        "link.set_tags" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let tags = string_list(params.get("tags")).ok_or("missing tags")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            if store.set_tags(id, tags) {
                let link = store.links().iter().find(|l| l.id == id);
                Ok(link.map(link_json).unwrap_or(json!({"ok": true})))
            } else {
                Err(store.error().unwrap_or("update failed").to_string())
            }
        }
        "link.add_tag" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let tag = params.get("tag").and_then(|v| v.as_str()).ok_or("missing tag")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            if store.add_tag(id, tag) {
                Ok(json!({"ok": true}))
            } else {
                Err(store.error().unwrap_or("update failed").to_string())
            }
        }
        "link.remove_tag" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let tag = params.get("tag").and_then(|v| v.as_str()).ok_or("missing tag")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            if store.remove_tag(id, tag) {
                Ok(json!({"ok": true}))
            } else {
                Err(store.error().unwrap_or("update failed").to_string())
            }
        }
        "link.tags" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store().ok_or("not signed in")?;
            Ok(json!({"tags": store.all_tags()}))
        }

        // ─── Filter & view ───
        "filter.set" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            let mut spec = store.filter().clone();
            if let Some(term) = params.get("searchTerm").and_then(|v| v.as_str()) {
                spec.search_term = term.to_string();
            }
            if let Some(tags) = string_list(params.get("tags")) {
                spec.tags = tags.into_iter().collect();
            }
            if let Some(range) = params.get("dateRange").and_then(|v| v.as_str()) {
                spec.date_range = DateRange::parse(range);
            }
            if let Some(sort) = params.get("sortBy").and_then(|v| v.as_str()) {
                spec.sort_by = SortBy::parse(sort);
            }
            if let Some(order) = params.get("sortOrder").and_then(|v| v.as_str()) {
                spec.sort_order = SortOrder::parse(order);
            }
            store.set_filter(spec);
            Ok(json!({"ok": true}))
        }
        "filter.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store().ok_or("not signed in")?;
            let spec = store.filter();
            Ok(json!({
                "searchTerm": spec.search_term,
                "tags": spec.tags.as_slice(),
                "dateRange": spec.date_range.as_str(),
                "sortBy": spec.sort_by.as_str(),
                "sortOrder": spec.sort_order.as_str(),
            }))
        }
        "view.set" => {
            let mode = params.get("mode").and_then(|v| v.as_str()).ok_or("missing mode")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store_mut().ok_or("not signed in")?;
            store.set_view_mode(ViewMode::parse(mode));
            Ok(json!({"ok": true}))
        }
        "view.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let store = a.store().ok_or("not signed in")?;
            Ok(json!({"mode": store.view_mode().as_str()}))
        }

        // ─── Metadata ───
        "metadata.fetch" => {
            let url_value = params.get("url").cloned().unwrap_or(Value::Null);
            // Clone the extractor so the lock is not held across the fetch
            let extractor = {
                let a = app.lock().map_err(|e| e.to_string())?;
                a.extractor.clone()
            };
            let meta = extractor.extract_value(&url_value).await;
            serde_json::to_value(meta).map_err(|e| e.to_string())
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
