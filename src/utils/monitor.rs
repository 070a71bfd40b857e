use std::sync::Mutex;
use std::time::Instant;
use sysinfo::{Pid, System};

/// Per-stage resource reporting for `--monitor`. When disabled (or when
/// the current PID cannot be resolved) every call is a no-op.
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    start_time: Instant,
}

struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let state = if enabled {
            sysinfo::get_current_pid().ok().map(|pid| {
                let mut system = System::new_all();
                system.refresh_all();
                Mutex::new(MonitorState {
                    system,
                    pid,
                    peak_memory_mb: 0,
                })
            })
        } else {
            None
        };

        Self {
            state,
            start_time: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn log_stage(&self, stage: &str) {
        let Some(state) = &self.state else {
            return;
        };
        let Ok(mut state) = state.lock() else {
            return;
        };

        state.system.refresh_all();
        let Some(process) = state.system.process(state.pid) else {
            return;
        };

        let memory_mb = process.memory() / 1024 / 1024;
        let cpu_usage = process.cpu_usage();
        if memory_mb > state.peak_memory_mb {
            state.peak_memory_mb = memory_mb;
        }

        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
            stage,
            cpu_usage,
            memory_mb,
            state.peak_memory_mb,
            self.start_time.elapsed()
        );
    }

    pub fn log_final(&self) {
        let Some(state) = &self.state else {
            return;
        };
        let Ok(state) = state.lock() else {
            return;
        };

        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            self.start_time.elapsed(),
            state.peak_memory_mb
        );
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
