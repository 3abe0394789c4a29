//! 時系列トレースログ
//! 操作とイベントをメモリ上に記録し、コンソールにも出力する

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;

const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String, // "info", "warn", "error"
    pub category: String, // "config", "form", "cache", "calc", "chart"
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    pub fn new() -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    pub fn log(&mut self, level: &str, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: timestamp(),
            level: level.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        write_console(level, category, message);

        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn timestamp() -> String {
    js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
}

// ネイティブ（テスト）ではUNIX秒
#[cfg(not(target_arch = "wasm32"))]
fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: &str, category: &str, message: &str) {
    let line = format!("[{}] {}", category, message);
    match level {
        "error" => web_sys::console::error_1(&line.into()),
        "warn" => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: &str, _category: &str, _message: &str) {}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: RefCell<LogTrace> = RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log("info", category, message, None));
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log("info", category, message, Some(data)));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log("warn", category, message, None));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log("error", category, message, None));
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

/// ログをクリップボードにコピー
pub async fn copy_logs_to_clipboard_async() -> Result<(), String> {
    let json_str = get_logs_json();
    let window = web_sys::window().ok_or("window is not available")?;
    let promise = window.navigator().clipboard().write_text(&json_str);

    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(_) => {
            log_info("log-trace", "copied log to clipboard");
            Ok(())
        }
        Err(e) => {
            let error_msg = format!("clipboard write failed: {:?}", e);
            log_error("log-trace", &error_msg);
            Err(error_msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut trace = LogTrace::new();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            trace.log("info", "form", &format!("entry {}", i), None);
        }
        let logs = trace.get_logs();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[test]
    fn test_logs_json_contains_data() {
        let mut trace = LogTrace::new();
        trace.log("warn", "cache", "corrupt entry", Some(serde_json::json!({ "key": "CACHED_RESULT" })));
        let json = trace.get_logs_json();
        assert!(json.contains("CACHED_RESULT"));
        assert!(json.contains("\"level\": \"warn\""));

        trace.clear();
        assert_eq!(trace.get_logs_json(), "[]");
    }
}
