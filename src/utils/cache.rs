//! SessionStorageキャッシュ管理

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::{CalcResult, FormValues};
use crate::utils::log_trace::{log_info, log_warn};

pub const CACHE_STATUS: &str = "CACHE_STATUS";
pub const CACHED_FORM_DATA: &str = "CACHED_FORM_DATA";
pub const CACHED_RESULT: &str = "CACHED_RESULT";

/// セッション単位のキー/値ストア
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.sessionStorage`
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    /// sessionStorageが使えない環境（プライベートモード等）では `None`
    pub fn open() -> Option<Self> {
        session_storage().map(|_| BrowserSessionStore)
    }
}

fn session_storage() -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    window.session_storage().ok()?
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// メモリ上のストア（ページを閉じると消える）
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// フォーム入力・計算結果・キャッシュ有効フラグの読み書き
#[derive(Clone)]
pub struct FormCache {
    store: Rc<dyn SessionStore>,
}

impl FormCache {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// 未保存なら有効扱い
    pub fn cache_status(&self) -> bool {
        self.read::<bool>(CACHE_STATUS).unwrap_or(true)
    }

    pub fn set_cache_status(&self, enabled: bool) {
        self.write(CACHE_STATUS, &enabled);
    }

    pub fn form(&self) -> Option<FormValues> {
        self.read(CACHED_FORM_DATA)
    }

    pub fn save_form(&self, values: &FormValues) {
        self.write(CACHED_FORM_DATA, values);
    }

    pub fn result(&self) -> Option<CalcResult> {
        self.read(CACHED_RESULT)
    }

    pub fn save_result(&self, result: &CalcResult) {
        self.write(CACHED_RESULT, result);
    }

    /// フォーム入力と計算結果を削除（フラグは残す）
    pub fn clear_data(&self) {
        self.store.remove(CACHED_FORM_DATA);
        self.store.remove(CACHED_RESULT);
        log_info("cache", "cleared cached form data and result");
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.store.get(key)?;
        match serde_json::from_str::<Option<T>>(&json) {
            Ok(value) => value,
            Err(e) => {
                log_warn("cache", &format!("ignoring unreadable {}: {}", key, e));
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.store.set(key, &json),
            Err(e) => log_warn("cache", &format!("could not encode {}: {}", key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cache() -> (Rc<MemoryStore>, FormCache) {
        let store = Rc::new(MemoryStore::default());
        let cache = FormCache::new(store.clone());
        (store, cache)
    }

    #[test]
    fn test_cache_status_defaults_to_true() {
        let (_, cache) = cache();
        assert!(cache.cache_status());
    }

    #[test]
    fn test_cache_status_is_stored_as_json_bool() {
        let (store, cache) = cache();
        cache.set_cache_status(false);
        assert_eq!(store.get(CACHE_STATUS).as_deref(), Some("false"));
        assert!(!cache.cache_status());
    }

    #[test]
    fn test_corrupt_entries_read_as_absent() {
        let (store, cache) = cache();
        store.set(CACHE_STATUS, "not json");
        store.set(CACHED_RESULT, "{\"displayValues\": 3");
        assert!(cache.cache_status());
        assert_eq!(cache.result(), None);
    }

    #[test]
    fn test_json_null_reads_as_absent() {
        let (store, cache) = cache();
        store.set(CACHED_RESULT, "null");
        store.set(CACHED_FORM_DATA, "null");
        assert_eq!(cache.result(), None);
        assert_eq!(cache.form(), None);
    }

    #[test]
    fn test_form_and_result_survive_reload() {
        let (store, cache) = cache();
        let mut values = FormValues::default();
        values.set(2, Some(3.5));
        let result = CalcResult {
            display_values: vec![1.0, 2.0, 3.0, 4.0],
            graph_values: vec![4.0, 3.0, 2.0, 1.0],
        };
        cache.save_form(&values);
        cache.save_result(&result);

        let reloaded = FormCache::new(store);
        assert_eq!(reloaded.form(), Some(values));
        assert_eq!(reloaded.result(), Some(result));
    }

    #[test]
    fn test_clear_data_keeps_status() {
        let (store, cache) = cache();
        cache.set_cache_status(true);
        cache.save_form(&FormValues::default());
        cache.save_result(&CalcResult::default());

        cache.clear_data();
        assert!(!store.contains(CACHED_FORM_DATA));
        assert!(!store.contains(CACHED_RESULT));
        assert!(store.contains(CACHE_STATUS));
    }
}
