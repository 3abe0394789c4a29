use leptos::*;
use std::rc::Rc;

mod chart;
mod components;
mod config;
mod error;
mod form;
mod models;
mod utils;
mod views;

use config::ApiConfig;
use form::FormController;
use utils::api::HttpCalcClient;
use utils::cache::{BrowserSessionStore, MemoryStore, SessionStore};
use utils::log_trace::{clear_logs, copy_logs_to_clipboard_async, log_error, log_info, log_warn};
use utils::timer::BrowserScheduler;
use views::{CalcForm, ResultPanel};

/// sessionStorageが使えなければメモリ上で代用
fn session_store() -> Rc<dyn SessionStore> {
    match BrowserSessionStore::open() {
        Some(store) => Rc::new(store),
        None => {
            log_warn("cache", "sessionStorage unavailable, values will not survive a reload");
            Rc::new(MemoryStore::default())
        }
    }
}

// ============================================
// ログ操作（フッター）
// ============================================

#[component]
fn LogFooter() -> impl IntoView {
    let (copied, set_copied) = create_signal(false);

    let copy_logs = move |_| {
        spawn_local(async move {
            if copy_logs_to_clipboard_async().await.is_ok() {
                set_copied.set(true);
                // 2秒後にリセット
                gloo::timers::future::TimeoutFuture::new(2000).await;
                set_copied.set(false);
            }
        });
    };

    view! {
        <footer class="app-footer">
            <button class="link-btn" on:click=copy_logs>
                {move || if copied.get() { "Copied!" } else { "Copy log" }}
            </button>
            <button class="link-btn" on:click=move |_| clear_logs()>"Clear log"</button>
        </footer>
    }
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    let config = match ApiConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log_error("config", &e.to_string());
            return view! {
                <div class="app">
                    <p class="status error">"Configuration error: " {e.to_string()}</p>
                </div>
            }
            .into_view();
        }
    };
    log_info("config", &format!("calculate endpoint: {}", config.calculate_url()));

    let ctrl = FormController::initialize(
        session_store(),
        Rc::new(BrowserScheduler),
        Rc::new(HttpCalcClient::new(config.calculate_url())),
    );
    provide_context(ctrl);

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Calculator"</h1>
            </header>

            <main class="container">
                <CalcForm />
                <ResultPanel />
            </main>

            <LogFooter />
        </div>
    }
    .into_view()
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
