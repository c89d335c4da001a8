//! Step-based progress logging

/// Logs `title [###___] NN%` each time another step of the total is crossed
pub struct ProgressLog {
    title: &'static str,
    steps: usize,
    total: usize,
    current: usize,
    last_step: usize,
}

impl ProgressLog {
    pub fn new(title: &'static str, steps: usize, total: usize) -> Self {
        log::info!("{}: {} item(s)", title, total);
        Self {
            title,
            steps: steps.max(1),
            total,
            current: 0,
            last_step: 0,
        }
    }

    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        (self.current * 100).div_ceil(self.total)
    }

    pub fn increment(&mut self) {
        self.current += 1;
        let step = self.percent() * self.steps / 100;
        if step > self.last_step {
            self.last_step = step;
            log::info!(
                "{} [{}{}] {}%",
                self.title,
                "#".repeat(step),
                "_".repeat(self.steps - step.min(self.steps)),
                self.percent()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_up() {
        let mut progress = ProgressLog::new("test", 10, 3);
        progress.increment();
        assert_eq!(progress.percent(), 34);
        progress.increment();
        progress.increment();
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.last_step, 10);
    }
}
