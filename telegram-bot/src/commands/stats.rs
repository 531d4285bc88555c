use async_trait::async_trait;

use super::Command;
use crate::core::Result;
use crate::request_log::RequestLog;

/// `/stats`: request-log summary.
pub struct StatsCommand {
    request_log: RequestLog,
}

impl StatsCommand {
    pub fn new(request_log: RequestLog) -> Self {
        Self { request_log }
    }
}

#[async_trait]
impl Command for StatsCommand {
    async fn execute(&self, _args: &str) -> Result<String> {
        Ok(self.request_log.stats_message().await)
    }
}
