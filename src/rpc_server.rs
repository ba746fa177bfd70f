//! Linkstash RPC Server — JSON-RPC over stdin/stdout for UI integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"link.add", "params":{"url":"...","tags":[]}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use linkstash::app::App;
use linkstash::rpc_handler::handle_method;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout is the protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Prefer LINKSTASH_DATA_DIR for the DB location, fall back to the
    // executable's directory.
    let db_path = if let Ok(dir) = std::env::var("LINKSTASH_DATA_DIR") {
        std::path::PathBuf::from(dir).join("linkstash.db")
    } else if let Ok(exe) = std::env::current_exe() {
        exe.parent()
            .unwrap_or(std::path::Path::new("."))
            .join("linkstash.db")
    } else {
        std::path::PathBuf::from("linkstash.db")
    };
    let app = Mutex::new(
        App::new(db_path.to_str().unwrap_or("linkstash.db"))
            .expect("Failed to initialize Linkstash"),
    );

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    io::stdout().flush().unwrap();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id":null,"error":format!("parse error: {}",e)});
                println!("{}", err);
                io::stdout().flush().unwrap();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = handle_method(&app, method, &params).await;

        let response = match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
        io::stdout().flush().unwrap();
    }
}
