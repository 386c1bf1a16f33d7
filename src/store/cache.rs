use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use super::LeaveHistorySource;
use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::LeaveRecord;
use crate::model::leave_type::LeaveType;

/// Keeps leave types and holiday calendars in memory for `ttl`.
///
/// Leave history is per employee and changes whenever an application is
/// decided, so it always goes to the inner source.
pub struct CachedSource {
    inner: Arc<dyn LeaveHistorySource>,
    leave_types: Cache<(), Vec<LeaveType>>,
    holidays: Cache<i32, Vec<HolidayPeriod>>,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn LeaveHistorySource>, ttl: Duration) -> Self {
        Self {
            inner,
            leave_types: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            holidays: Cache::builder().max_capacity(16).time_to_live(ttl).build(),
        }
    }
}

#[async_trait]
impl LeaveHistorySource for CachedSource {
    async fn leave_history(&self, employee_id: u64) -> Result<Vec<LeaveRecord>> {
        self.inner.leave_history(employee_id).await
    }

    async fn leave_types(&self) -> Result<Vec<LeaveType>> {
        self.leave_types
            .try_get_with((), async {
                debug!("Leave types cache miss");
                self.inner.leave_types().await
            })
            .await
            .map_err(|e| anyhow!("{e:#}"))
    }

    async fn holidays_by_year(&self, year: i32) -> Result<Vec<HolidayPeriod>> {
        self.holidays
            .try_get_with(year, async {
                debug!(year, "Holiday cache miss");
                self.inner.holidays_by_year(year).await
            })
            .await
            .map_err(|e| anyhow!("{e:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticSource, date, leave_type};

    fn source() -> Arc<StaticSource> {
        Arc::new(StaticSource {
            leave_types: vec![leave_type("annual", "Annual", "green")],
            holidays: vec![
                HolidayPeriod::new(date(2024, 12, 24), date(2024, 12, 26)),
                HolidayPeriod::new(date(2025, 1, 1), date(2025, 1, 1)),
            ],
            ..Default::default()
        })
    }

    #[actix_web::test]
    async fn reference_data_is_read_once() {
        let inner = source();
        let cached = CachedSource::new(inner.clone(), Duration::from_secs(60));

        for _ in 0..3 {
            assert_eq!(cached.leave_types().await.unwrap().len(), 1);
            assert_eq!(cached.holidays_by_year(2024).await.unwrap().len(), 1);
        }

        assert_eq!(StaticSource::reads(&inner.leave_type_reads), 1);
        assert_eq!(StaticSource::reads(&inner.holiday_reads), 1);
    }

    #[actix_web::test]
    async fn holidays_are_cached_per_year() {
        let inner = source();
        let cached = CachedSource::new(inner.clone(), Duration::from_secs(60));

        cached.holidays_by_year(2024).await.unwrap();
        let next_year = cached.holidays_by_year(2025).await.unwrap();

        assert_eq!(next_year, vec![HolidayPeriod::new(date(2025, 1, 1), date(2025, 1, 1))]);
        assert_eq!(StaticSource::reads(&inner.holiday_reads), 2);
    }

    #[actix_web::test]
    async fn history_is_never_cached() {
        let inner = source();
        let cached = CachedSource::new(inner.clone(), Duration::from_secs(60));

        cached.leave_history(1).await.unwrap();
        cached.leave_history(1).await.unwrap();

        assert_eq!(StaticSource::reads(&inner.history_reads), 2);
    }

    #[actix_web::test]
    async fn history_errors_propagate() {
        let inner = Arc::new(StaticSource {
            fail_history: true,
            ..Default::default()
        });
        let cached = CachedSource::new(inner, Duration::from_secs(60));
        assert!(cached.leave_history(1).await.is_err());
    }
}
