#[cfg(test)]
pub(crate) mod tests;

use std::fmt;
use std::time::Instant;

/// Wall time since the start, displayed in seconds.
pub struct Timer {
    time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.time.elapsed().as_secs_f32()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "elapsed time:",
            self.elapsed_seconds()
        )
    }
}
