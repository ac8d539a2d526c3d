use crate::classify::Classifier;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::Config;
use crate::models::FollowUpBook;
use chrono::{DateTime, Utc};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<FollowUpBook>>,
    pub classifier: Classifier,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        data: FollowUpBook,
        classifier: Classifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            classifier,
            clock,
        }
    }

    pub fn from_config(config: &Config, data: FollowUpBook) -> Self {
        let clock: Arc<dyn Clock> = match config.fixed_now {
            Some(now) => Arc::new(FixedClock(now)),
            None => Arc::new(SystemClock),
        };
        Self::new(
            config.data_path.clone(),
            data,
            Classifier::new(config.time_zone),
            clock,
        )
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
