//! Blocking delays

use std::{thread, time::Duration};

/// Pauses execution for `ms` milliseconds. Zero returns immediately.
pub fn delay_ms(ms: u32) {
    if ms == 0 {
        return;
    }
    thread::sleep(Duration::from_millis(ms.into()));
}
