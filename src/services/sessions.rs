use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::db::Store;
use crate::error::AppResult;
use crate::models::session::SdkSession;

/// 23:59:59 UTC on the day of `now`.
pub fn end_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    now.date_naive().and_time(last_second).and_utc()
}

/// Issue a session that expires at the end of the current UTC day.
pub async fn create_session(store: &dyn Store, client_id: String) -> AppResult<SdkSession> {
    let now = Utc::now();
    let session = SdkSession {
        id: Uuid::new_v4(),
        client_id,
        session_token: Uuid::new_v4().to_string(),
        expires_at: end_of_day(now),
        created_at: now,
    };

    store.insert_session(&session).await?;
    tracing::info!(client_id = %session.client_id, expires_at = %session.expires_at, "SDK session issued");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_end_of_day_is_not_rolling() {
        let created = Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 30).unwrap();
        let expires = end_of_day(created);
        assert_eq!(expires, Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap());
        assert_eq!((expires - created).num_seconds(), 29);
    }

    #[test]
    fn test_end_of_day_from_midnight() {
        let created = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(
            end_of_day(created),
            Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap()
        );
    }

    #[tokio::test]
    async fn test_sessions_get_distinct_tokens() {
        let store = InMemoryStore::new();
        let a = create_session(&store, "acme".to_string()).await.unwrap();
        let b = create_session(&store, "acme".to_string()).await.unwrap();

        assert_ne!(a.session_token, b.session_token);
        assert_eq!(a.expires_at, end_of_day(a.created_at));
        assert!(a.expires_at >= a.created_at);
    }
}
