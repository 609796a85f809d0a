//! Training observers
//!
//! Observers allow composable progress reporting during training without
//! coupling the solvers to a specific output format.

use std::{cell::RefCell, rc::Rc};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    ports::{EpisodeSummary, TrainingObserver},
};

/// Progress bar observer - Shows sweeps or episodes as they complete
pub struct ProgressObserver {
    unit: &'static str,
    progress_bar: Option<ProgressBar>,
    recent_return: f64,
}

impl ProgressObserver {
    /// Progress bar counting value iteration sweeps
    pub fn sweeps() -> Self {
        Self::new("sweeps")
    }

    /// Progress bar counting Q-learning episodes
    pub fn episodes() -> Self {
        Self::new("episodes")
    }

    fn new(unit: &'static str) -> Self {
        Self {
            unit,
            progress_bar: None,
            recent_return: 0.0,
        }
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total: usize) -> Result<()> {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {} {{msg}}",
                    self.unit
                ))
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_sweep(&mut self, sweep: usize, residual: f64) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(sweep as u64);
            pb.set_message(format!("residual {residual:.6}"));
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        // Exponential moving average keeps the message readable
        self.recent_return = 0.99 * self.recent_return + 0.01 * summary.total_return;
        if let Some(pb) = &self.progress_bar
            && (episode.is_multiple_of(100) || episode as u64 == pb.length().unwrap_or(0))
        {
            pb.set_position(episode as u64);
            pb.set_message(format!(
                "return {:.3} epsilon {:.3}",
                self.recent_return, summary.epsilon
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
        Ok(())
    }
}

/// One notification received by a [`HistoryObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingEvent {
    Started { total: usize },
    Sweep { sweep: usize, residual: f64 },
    Episode { episode: usize, summary: EpisodeSummary },
    Finished,
}

/// Records every training event in arrival order.
///
/// Clones share one log: keep a clone and pass the other to a solver's
/// `with_observer` to read the history back after training.
#[derive(Debug, Default, Clone)]
pub struct HistoryObserver {
    events: Rc<RefCell<Vec<TrainingEvent>>>,
}

impl HistoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<TrainingEvent> {
        self.events.borrow().clone()
    }

    /// Residual of every sweep, in sweep order.
    pub fn residuals(&self) -> Vec<f64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                TrainingEvent::Sweep { residual, .. } => Some(*residual),
                _ => None,
            })
            .collect()
    }

    /// Undiscounted return of every episode, in episode order.
    pub fn returns(&self) -> Vec<f64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                TrainingEvent::Episode { summary, .. } => Some(summary.total_return),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: TrainingEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TrainingObserver for HistoryObserver {
    fn on_training_start(&mut self, total: usize) -> Result<()> {
        self.record(TrainingEvent::Started { total });
        Ok(())
    }

    fn on_sweep(&mut self, sweep: usize, residual: f64) -> Result<()> {
        self.record(TrainingEvent::Sweep { sweep, residual });
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.record(TrainingEvent::Episode {
            episode,
            summary: *summary,
        });
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.record(TrainingEvent::Finished);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_lifecycle() {
        let mut observer = ProgressObserver::episodes();
        observer.on_training_start(200).unwrap();
        let summary = EpisodeSummary {
            steps: 3,
            total_return: 10.0,
            epsilon: 0.2,
        };
        for episode in 1..=200 {
            observer.on_episode_end(episode, &summary).unwrap();
        }
        observer.on_training_end().unwrap();
        assert!(observer.recent_return > 0.0);
    }

    #[test]
    fn test_sweep_progress_without_start_is_noop() {
        let mut observer = ProgressObserver::sweeps();
        assert!(observer.on_sweep(1, 0.5).is_ok());
        assert!(observer.on_training_end().is_ok());
    }

    #[test]
    fn test_history_observer_clones_share_one_log() {
        let history = HistoryObserver::new();
        let mut attached = history.clone();
        attached.on_training_start(2).unwrap();
        attached.on_sweep(1, 0.5).unwrap();
        attached.on_sweep(2, 0.25).unwrap();
        attached.on_training_end().unwrap();

        assert_eq!(history.residuals(), vec![0.5, 0.25]);
        assert!(history.returns().is_empty());
        assert_eq!(
            history.events().first(),
            Some(&TrainingEvent::Started { total: 2 })
        );
        assert_eq!(history.events().last(), Some(&TrainingEvent::Finished));
    }
}
