use std::time::{Duration, Instant};

/// Progress never exceeds this value.
pub const COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    Progress(u8),
    Finished,
}

/// Simulated work that advances by a fixed step on a fixed period.
///
/// The task owns no timer. The caller polls it with the current instant
/// (once per UI frame) and receives every tick that became due since the
/// last poll, so a slow frame never skips a progress value. Cancelling, or
/// dropping the task, stops it for good.
#[derive(Debug, Clone)]
pub struct ProgressTask {
    step: u8,
    period: Duration,
    progress: u8,
    next_tick: Instant,
    state: TaskState,
}

impl ProgressTask {
    pub fn start(step: u8, period: Duration, now: Instant) -> Self {
        Self {
            step: step.max(1),
            period,
            progress: 0,
            next_tick: now + period,
            state: TaskState::Running,
        }
    }

    pub fn poll(&mut self, now: Instant) -> Vec<TaskEvent> {
        let mut events = Vec::new();
        while self.state == TaskState::Running && now >= self.next_tick {
            self.progress = self.progress.saturating_add(self.step).min(COMPLETE);
            self.next_tick += self.period;
            events.push(TaskEvent::Progress(self.progress));
            if self.progress == COMPLETE {
                self.state = TaskState::Finished;
                events.push(TaskEvent::Finished);
            }
        }
        events
    }

    pub fn cancel(&mut self) {
        if self.state == TaskState::Running {
            self.state = TaskState::Cancelled;
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TaskState::Running
    }

    /// Time left until the next tick, for repaint scheduling.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.is_running()
            .then(|| self.next_tick.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_first_period() {
        let t0 = Instant::now();
        let mut task = ProgressTask::start(10, Duration::from_millis(200), t0);
        assert!(task.poll(t0 + Duration::from_millis(199)).is_empty());
        assert_eq!(task.progress(), 0);
    }

    #[test]
    fn test_catches_up_on_late_poll() {
        let t0 = Instant::now();
        let mut task = ProgressTask::start(10, Duration::from_millis(200), t0);
        let events = task.poll(t0 + Duration::from_millis(650));
        assert_eq!(
            events,
            vec![
                TaskEvent::Progress(10),
                TaskEvent::Progress(20),
                TaskEvent::Progress(30)
            ]
        );
    }

    #[test]
    fn test_uneven_step_lands_exactly_on_complete() {
        let t0 = Instant::now();
        let mut task = ProgressTask::start(30, Duration::from_millis(10), t0);
        let events = task.poll(t0 + Duration::from_secs(1));
        assert_eq!(
            events,
            vec![
                TaskEvent::Progress(30),
                TaskEvent::Progress(60),
                TaskEvent::Progress(90),
                TaskEvent::Progress(100),
                TaskEvent::Finished
            ]
        );
        assert_eq!(task.state(), TaskState::Finished);
        assert!(task.poll(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut task = ProgressTask::start(10, Duration::from_millis(200), t0);
        task.poll(t0 + Duration::from_millis(400));
        task.cancel();
        assert!(task.poll(t0 + Duration::from_secs(10)).is_empty());
        assert_eq!(task.progress(), 20);
        assert_eq!(task.state(), TaskState::Cancelled);
        assert_eq!(task.until_next_tick(t0), None);
    }

    #[test]
    fn test_cancel_after_finish_keeps_finished() {
        let t0 = Instant::now();
        let mut task = ProgressTask::start(50, Duration::from_millis(1), t0);
        task.poll(t0 + Duration::from_millis(5));
        task.cancel();
        assert_eq!(task.state(), TaskState::Finished);
    }
}
