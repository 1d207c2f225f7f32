use crate::config::Config;
use crate::recurrence::ExpansionLimits;

#[derive(Clone, Debug)]
pub struct AppState {
    pub cfg: Config,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn limits(&self) -> ExpansionLimits {
        self.cfg.recurrence.limits()
    }
}
