//! 入力フォームの状態管理
//!
//! 入力値・キャッシュ有効フラグ・計算結果・送信状態を保持し、
//! sessionStorageとの同期、デバウンス保存、エラー表示の自動消去を行う。

use leptos::*;
use std::rc::Rc;

use crate::error::{CalcError, SubmitError};
use crate::models::{parse_field, CalcResult, FormValues};
use crate::utils::api::CalcClient;
use crate::utils::cache::{FormCache, SessionStore};
use crate::utils::log_trace::{log_error, log_info, log_info_with_data, log_warn};
use crate::utils::timer::{ScheduledTask, Scheduler};

/// 入力変更からsessionStorage書き込みまでの待ち時間
pub const PERSIST_DEBOUNCE_MS: u32 = 300;
/// エラーメッセージの表示時間
pub const ERROR_DISPLAY_MS: u32 = 4000;
pub const ERROR_MESSAGE: &str = "Something went wrong, Try again";

#[derive(Clone, Copy)]
pub struct FormController {
    pub fields: RwSignal<FormValues>,
    pub cache_enabled: RwSignal<bool>,
    pub result: RwSignal<Option<CalcResult>>,
    pub submitted: RwSignal<bool>,
    pub calculating: RwSignal<bool>,
    pub error_msg: RwSignal<Option<String>>,
    /// 復元・リセットなど外部から入力値を書き換えた回数
    pub revision: RwSignal<u32>,
    cache: StoredValue<FormCache>,
    scheduler: StoredValue<Rc<dyn Scheduler>>,
    client: StoredValue<Rc<dyn CalcClient>>,
    persist_task: StoredValue<Option<ScheduledTask>>,
    error_task: StoredValue<Option<ScheduledTask>>,
}

impl FormController {
    pub fn initialize(
        store: Rc<dyn SessionStore>,
        scheduler: Rc<dyn Scheduler>,
        client: Rc<dyn CalcClient>,
    ) -> Self {
        let cache = FormCache::new(store);
        let enabled = cache.cache_status();

        let mut fields = FormValues::default();
        let mut result = None;
        if enabled {
            if let Some(cached) = cache.form() {
                fields = cached;
                log_info("cache", "restored form data");
            }
            if let Some(cached) = cache.result() {
                result = Some(cached);
                log_info("cache", "restored result");
            }
        } else {
            // キャッシュ無効なのにデータが残っていれば消す
            cache.clear_data();
        }

        log_info("form", &format!("initialized (cache {})", if enabled { "on" } else { "off" }));

        Self {
            fields: create_rw_signal(fields),
            cache_enabled: create_rw_signal(enabled),
            result: create_rw_signal(result),
            submitted: create_rw_signal(false),
            calculating: create_rw_signal(false),
            error_msg: create_rw_signal(None),
            revision: create_rw_signal(0),
            cache: store_value(cache),
            scheduler: store_value(scheduler),
            client: store_value(client),
            persist_task: store_value(None),
            error_task: store_value(None),
        }
    }

    /// 計算結果を持っているか
    pub fn calculated(&self) -> bool {
        self.result.with(Option::is_some)
    }

    pub fn field(&self, index: usize) -> Option<f64> {
        self.fields.with(|f| f.get(index))
    }

    /// 入力欄の文字列から値を更新
    pub fn set_field(&self, index: usize, raw: &str) {
        self.set_field_value(index, parse_field(raw));
    }

    pub fn set_field_value(&self, index: usize, value: Option<f64>) {
        self.fields.update(|f| f.set(index, value));
        self.schedule_persist();
    }

    /// キャッシュ有効フラグの切り替え（即時保存）
    pub fn set_cache_enabled(&self, enabled: bool) {
        self.cache_enabled.set(enabled);
        self.cache.with_value(|cache| {
            cache.set_cache_status(enabled);
            if enabled {
                self.fields.with_untracked(|f| cache.save_form(f));
                self.result.with_untracked(|r| {
                    if let Some(r) = r {
                        cache.save_result(r);
                    }
                });
            } else {
                cache.clear_data();
            }
        });
        if !enabled {
            self.persist_task.set_value(None);
        }
        log_info("cache", &format!("cache {}", if enabled { "enabled" } else { "disabled" }));
    }

    /// 入力が止まってから保存する。前回の予約は取り消す
    fn schedule_persist(&self) {
        let ctrl = *self;
        let task = self
            .scheduler
            .with_value(|s| s.schedule(PERSIST_DEBOUNCE_MS, Box::new(move || ctrl.persist_form())));
        self.persist_task.set_value(Some(task));
    }

    fn persist_form(&self) {
        if !self.cache_enabled.get_untracked() {
            return;
        }
        let values = self.fields.get_untracked();
        self.cache.with_value(|cache| cache.save_form(&values));
    }

    /// 送信開始：検証して送信内容を返す
    pub fn begin_submit(&self) -> Result<FormValues, SubmitError> {
        if self.calculating.get_untracked() {
            log_warn("calc", "submit ignored while a calculation is in progress");
            return Err(SubmitError::Busy);
        }

        self.submitted.set(true);
        self.error_msg.set(None);
        self.error_task.set_value(None);

        let values = self.fields.get_untracked();
        if let Some(field) = values.first_missing() {
            log_info("form", &format!("validation failed at input_{}", field + 1));
            return Err(SubmitError::Invalid { field });
        }

        self.calculating.set(true);
        Ok(values)
    }

    /// 送信完了：結果の反映またはエラー表示
    pub fn finish_submit(&self, outcome: Result<CalcResult, CalcError>) -> Result<(), SubmitError> {
        self.calculating.set(false);
        match outcome {
            Ok(result) => {
                if self.cache_enabled.get_untracked() {
                    self.cache.with_value(|cache| cache.save_result(&result));
                }
                self.result.set(Some(result));
                log_info("calc", "calculation succeeded");
                Ok(())
            }
            Err(e) => {
                log_error("calc", &e.to_string());
                self.show_error();
                Err(SubmitError::Remote(e))
            }
        }
    }

    pub async fn submit(self) -> Result<(), SubmitError> {
        let values = self.begin_submit()?;
        if let Ok(payload) = serde_json::to_value(values) {
            log_info_with_data("calc", "posting form", payload);
        }
        let client = self.client.get_value();
        let outcome = client.calculate(&values).await;
        self.finish_submit(outcome)
    }

    fn show_error(&self) {
        self.error_msg.set(Some(ERROR_MESSAGE.to_string()));
        let error_msg = self.error_msg;
        let task = self
            .scheduler
            .with_value(|s| s.schedule(ERROR_DISPLAY_MS, Box::new(move || error_msg.set(None))));
        self.error_task.set_value(Some(task));
    }

    /// 入力を空に戻す。計算結果とキャッシュ設定はそのまま
    pub fn reset_form(&self) {
        self.submitted.set(false);
        self.fields.set(FormValues::default());
        self.revision.update(|r| *r += 1);
        self.schedule_persist();
        log_info("form", "form reset");
    }

    /// 送信後のみグラフへスクロール
    pub fn scroll_to_graph(&self, reveal: impl FnOnce()) -> bool {
        if !self.submitted.get_untracked() {
            return false;
        }
        reveal();
        true
    }
}
