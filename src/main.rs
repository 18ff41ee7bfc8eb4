mod attendance;
mod backup;
mod calendar;
mod config;
mod db;
mod error;
mod import;
mod ipc;
mod logging;
mod model;
mod records;
mod state;
mod store;

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() {
    logging::init();
    let config = config::Config::from_env();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        store_latency_ms = config.store_latency.as_millis() as u64,
        attendance_latency_ms = config.attendance_latency.as_millis() as u64,
        fixed_times = config.fixed_times,
        "attendanced starting"
    );
    let mut state = ipc::AppState::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request line");
                // No id to reply to.
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    info!("attendanced exiting");
}
