//! 定时等待
//!
//! 驱动器唯一的同步手段是无条件的固定时长睡眠。

use std::time::Duration;

pub trait Clock {
    /// 阻塞直到 `duration` 过去；一旦开始总会完整执行。
    fn sleep(&mut self, duration: Duration);
}

/// 使用 `std::thread::sleep` 的真实时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
