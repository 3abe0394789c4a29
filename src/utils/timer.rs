//! 遅延実行（キャンセル可能なタイマー）

use std::any::Any;

/// 遅延実行の予約。dropすると未実行のコールバックは取り消される
pub struct ScheduledTask {
    _guard: Box<dyn Any>,
}

impl ScheduledTask {
    pub fn new<G: 'static>(guard: G) -> Self {
        Self { _guard: Box::new(guard) }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

/// `setTimeout` ベースのスケジューラ
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask {
        // Timeout はdrop時に clearTimeout する
        ScheduledTask::new(gloo::timers::callback::Timeout::new(delay_ms, task))
    }
}
