use std::sync::Mutex;

/// Counters for the frame loop.
pub struct FrameMetrics {
    inner: Mutex<Counters>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_stepped: u64,
    pub frames_rendered: u64,
    pub collision_warnings: u64,
}

struct Counters {
    stepped: u64,
    rendered: u64,
    warnings: u64,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                stepped: 0,
                rendered: 0,
                warnings: 0,
            }),
        }
    }

    pub fn record_step(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.stepped += 1;
        }
    }

    pub fn record_render(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.rendered += 1;
        }
    }

    pub fn record_warnings(&self, count: usize) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.warnings += count as u64;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                frames_stepped: counters.stepped,
                frames_rendered: counters.rendered,
                collision_warnings: counters.warnings,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
