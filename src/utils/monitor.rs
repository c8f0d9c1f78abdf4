use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

#[cfg(feature = "cli")]
struct ProcessSampler {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

/// 每個階段結束時記錄行程的 CPU 與記憶體用量
pub struct SystemMonitor {
    start_time: Instant,
    #[cfg(feature = "cli")]
    sampler: Option<Mutex<ProcessSampler>>,
}

impl SystemMonitor {
    #[cfg(feature = "cli")]
    pub fn new(enabled: bool) -> Self {
        let sampler = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    Some(Mutex::new(ProcessSampler {
                        system,
                        pid,
                        peak_memory_mb: 0,
                    }))
                }
                Err(e) => {
                    tracing::warn!("⚠️ System monitoring disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            start_time: Instant::now(),
            sampler,
        }
    }

    // 非 CLI 建置沒有 sysinfo，只保留計時
    #[cfg(not(feature = "cli"))]
    pub fn new(_enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    #[cfg(feature = "cli")]
    pub fn sample(&self) -> Option<PhaseStats> {
        let mut sampler = self.sampler.as_ref()?.lock().ok()?;
        sampler.system.refresh_all();

        let pid = sampler.pid;
        let (cpu_usage, memory_mb) = {
            let process = sampler.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        sampler.peak_memory_mb = sampler.peak_memory_mb.max(memory_mb);

        Some(PhaseStats {
            cpu_usage,
            memory_mb,
            peak_memory_mb: sampler.peak_memory_mb,
            elapsed: self.start_time.elapsed(),
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn sample(&self) -> Option<PhaseStats> {
        None
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_mb,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }
    }

    pub fn log_final(&self) {
        match self.sample() {
            Some(stats) => tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed,
                stats.peak_memory_mb
            ),
            None => tracing::debug!("Finished in {:?}", self.start_time.elapsed()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.sampler.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::default();
        assert!(!monitor.is_enabled());
        assert!(monitor.sample().is_none());
        monitor.log_phase("extract");
        monitor.log_final();
    }
}
