use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-way travel estimate for an address at a given time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub success: bool,
    pub travel_time_minutes: Option<i64>,
}

impl TravelEstimate {
    /// Callers must treat a failed or empty estimate as zero travel time,
    /// never as an error that blocks the flow.
    pub fn minutes_or_zero(&self) -> i64 {
        if !self.success {
            return 0;
        }
        self.travel_time_minutes.unwrap_or(0).max(0)
    }
}

#[async_trait]
pub trait TravelTimeProvider: Send + Sync {
    async fn estimate(
        &self,
        address: &str,
        at_time: DateTime<Utc>,
    ) -> Result<TravelEstimate, Box<dyn std::error::Error + Send + Sync>>;
}

/// Flat-rate provider for local wiring and tests.
pub struct FixedTravelTimeProvider {
    pub minutes: i64,
}

#[async_trait]
impl TravelTimeProvider for FixedTravelTimeProvider {
    async fn estimate(
        &self,
        _address: &str,
        _at_time: DateTime<Utc>,
    ) -> Result<TravelEstimate, Box<dyn std::error::Error + Send + Sync>> {
        Ok(TravelEstimate {
            success: true,
            travel_time_minutes: Some(self.minutes),
        })
    }
}
