use chrono::{DateTime, Duration, Utc};

/// Temporizador del autosave periódico.
///
/// No corre solo: el dueño del loop de eventos llama a `ChallengeWizard::tick`
/// y el temporizador decide si toca guardar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveTimer {
    interval: Duration,
    last: DateTime<Utc>,
}

impl AutosaveTimer {
    pub fn new(interval: Duration, started_at: DateTime<Utc>) -> Self {
        Self { interval, last: started_at }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now - self.last >= self.interval
    }

    /// Reinicia la cuenta (cualquier guardado cuenta).
    pub fn mark(&mut self, at: DateTime<Utc>) {
        if at > self.last {
            self.last = at;
        }
    }
}
