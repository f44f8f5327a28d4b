//! Pinterest account analytics.

use chrono::{Days, NaiveDate};
use postmill_core::{AnalyticsSeries, MetricSpec, ProviderError, reshape_daily_metrics};
use tracing::{debug, instrument};

use super::api::{ANALYTICS_PATH, AnalyticsReport};
use super::provider::PinterestProvider;
use crate::response::decode;

/// Reported series, primary metric first.
pub(crate) const METRICS: [MetricSpec; 5] = [
    MetricSpec { label: "Pin click rate", key: "PIN_CLICK_RATE" },
    MetricSpec { label: "Impressions", key: "IMPRESSION" },
    MetricSpec { label: "Pin Clicks", key: "PIN_CLICK" },
    MetricSpec { label: "Engagement", key: "ENGAGEMENT" },
    MetricSpec { label: "Saves", key: "SAVE" },
];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn report_path(since: NaiveDate, until: NaiveDate) -> String {
    format!(
        "{ANALYTICS_PATH}?start_date={}&end_date={}",
        since.format(DATE_FORMAT),
        until.format(DATE_FORMAT)
    )
}

impl PinterestProvider {
    #[instrument(skip(self, token))]
    pub(crate) async fn analytics(
        &self,
        token: &str,
        lookback_days: u32,
    ) -> Result<Vec<AnalyticsSeries>, ProviderError> {
        let until = self.ctx.clock.now().date_naive();
        let since = until
            .checked_sub_days(Days::new(lookback_days.into()))
            .ok_or_else(|| {
                ProviderError::malformed(format!(
                    "Analytics lookback of {lookback_days} days reaches before the earliest date"
                ))
            })?;

        let report: AnalyticsReport = decode(&self.get(&report_path(since, until), token).await?)?;
        let days = report.into_days();
        debug!(days = days.len(), "Analytics report received");

        Ok(reshape_daily_metrics(&days, &METRICS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_dates() {
        let until = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let since = until.checked_sub_days(Days::new(7)).unwrap();
        assert_eq!(
            report_path(since, until),
            "/v5/user_account/analytics?start_date=2024-05-25&end_date=2024-06-01"
        );
    }

    #[test]
    fn test_primary_metric_first() {
        assert_eq!(METRICS[0].key, "PIN_CLICK_RATE");
    }
}
