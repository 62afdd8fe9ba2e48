//! Featured-movie slider: index state and its periodic timer.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::command::AppEvent;

/// Timer posting [`AppEvent::SliderTick`] every interval.
///
/// The task runs until [`SliderTimer::stop`] or until the handle is
/// dropped, so a page owning the timer releases it when it unmounts.
#[derive(Debug)]
pub struct SliderTimer {
    task: Option<JoinHandle<()>>,
}

impl SliderTimer {
    /// Spawns the timer task. Must be called within a tokio runtime.
    #[must_use]
    pub fn start(interval: Duration, events: UnboundedSender<AppEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if events.send(AppEvent::SliderTick).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(?interval, "slider timer started");
        Self { task: Some(task) }
    }

    /// Aborts the timer task. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("slider timer stopped");
        }
    }

    /// Whether the timer task is still scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SliderTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Current slide index over a featured list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderState {
    index: usize,
}

impl SliderState {
    /// Current index, clamped to `len`.
    #[must_use]
    pub const fn index(&self, len: usize) -> usize {
        if self.index < len { self.index } else { 0 }
    }

    /// Advances one slide, wrapping at `len`. No-op on an empty list.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.index = self.index.saturating_add(1).checked_rem(len).unwrap_or(0);
    }

    /// Steps back one slide, wrapping at `len`.
    pub const fn back(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.index = if self.index == 0 || self.index >= len {
            len.saturating_sub(1)
        } else {
            self.index.saturating_sub(1)
        };
    }

    /// Returns to the first slide.
    pub const fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_advance_wraps() {
        // Arrange
        let mut slider = SliderState::default();

        // Act & Assert
        slider.advance(3);
        assert_eq!(slider.index(3), 1);
        slider.advance(3);
        slider.advance(3);
        assert_eq!(slider.index(3), 0);
    }

    #[test]
    fn test_back_wraps() {
        // Arrange
        let mut slider = SliderState::default();

        // Act
        slider.back(4);

        // Assert
        assert_eq!(slider.index(4), 3);
    }

    #[test]
    fn test_empty_list_stays_at_zero() {
        // Arrange
        let mut slider = SliderState::default();

        // Act
        slider.advance(0);
        slider.back(0);

        // Assert
        assert_eq!(slider.index(0), 0);
    }

    #[test]
    fn test_index_clamps_after_list_shrinks() {
        // Arrange
        let mut slider = SliderState::default();
        slider.advance(5);
        slider.advance(5);

        // Act & Assert
        assert_eq!(slider.index(2), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_until_stopped() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = SliderTimer::start(Duration::from_secs(5), tx);

        // Act
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, AppEvent::SliderTick));
            ticks += 1;
        }
        timer.stop();
        tokio::time::sleep(Duration::from_secs(20)).await;

        // Assert
        assert_eq!(ticks, 2);
        assert!(!timer.is_running());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        // Arrange
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = SliderTimer::start(Duration::from_secs(1), tx);

        // Act
        drop(timer);
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Assert
        assert!(rx.try_recv().is_err());
    }
}
