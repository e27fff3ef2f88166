use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{present, Resource, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Opaque, compared as text. `YYYY-MM-DD` sorts correctly.
    pub date: String,
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct EventListing {
    pub title: String,
    pub description: String,
    pub date: String,
}

impl Resource for Event {
    const TABLE: &'static str = "events";
    const KIND: &'static str = "event";
    const PATH: &'static str = "/events";
    const LISTING_COLUMNS: &'static str = "title,description,date";
    const LISTING_ORDER: &'static str = "date,id";

    type Draft = EventDraft;
    type Listing = EventListing;

    fn columns(draft: EventDraft) -> StoreResult<Vec<(&'static str, String)>> {
        let (Some(title), Some(date)) = (present(draft.title), present(draft.date)) else {
            return Err(StoreError::Validation("title and date are required".to_owned()));
        };

        Ok(vec![
            ("title", title),
            ("description", draft.description.unwrap_or_default()),
            ("date", date),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{memory_pool, Filter, ResourceStore};

    fn draft(title: &str, date: &str) -> EventDraft {
        EventDraft {
            title: Some(title.to_owned()),
            description: None,
            date: Some(date.to_owned()),
        }
    }

    #[tokio::test]
    async fn created_event_is_active_with_empty_description() {
        let events = ResourceStore::<Event>::new(memory_pool().await);
        let event = events.create(draft("Practice", "2024-05-01")).await.unwrap();

        assert!(event.active);
        assert_eq!(event.description, "");
        assert_eq!(events.list(Filter::All).await.unwrap(), vec![event.clone()]);
        assert_eq!(events.list(Filter::ActiveOnly).await.unwrap(), vec![event]);
        assert_eq!(
            events.listing().await.unwrap(),
            vec![EventListing {
                title: "Practice".into(),
                description: "".into(),
                date: "2024-05-01".into(),
            }]
        );
    }

    #[tokio::test]
    async fn listing_is_ordered_by_date() {
        let events = ResourceStore::<Event>::new(memory_pool().await);
        events.create(draft("Grading", "2024-06-15")).await.unwrap();
        events.create(draft("Seminar", "2024-01-20")).await.unwrap();
        events.create(draft("Practice", "2024-05-01")).await.unwrap();

        let titles: Vec<_> = events.listing().await.unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["Seminar", "Practice", "Grading"]);

        let all: Vec<_> = events.list(Filter::All).await.unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(all, ["Grading", "Seminar", "Practice"]);
    }

    #[tokio::test]
    async fn deactivated_event_is_hidden_from_active_reads_only() {
        let events = ResourceStore::<Event>::new(memory_pool().await);
        let event = events.create(draft("Practice", "2024-05-01")).await.unwrap();

        events.set_active(event.id, false).await.unwrap();
        events.set_active(event.id, false).await.unwrap();

        assert!(events.list(Filter::ActiveOnly).await.unwrap().is_empty());
        assert!(events.listing().await.unwrap().is_empty());
        assert_eq!(events.list(Filter::All).await.unwrap().len(), 1);

        events.set_active(event.id, true).await.unwrap();
        assert_eq!(events.listing().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_title_or_date_is_rejected() {
        let events = ResourceStore::<Event>::new(memory_pool().await);
        for bad in [
            EventDraft { title: None, description: None, date: Some("2024-05-01".into()) },
            EventDraft { title: Some("Practice".into()), description: None, date: Some("".into()) },
            EventDraft::default(),
        ] {
            assert!(matches!(events.create(bad).await, Err(StoreError::Validation(_))));
        }
        assert!(events.list(Filter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_missing_event_is_not_found() {
        let events = ResourceStore::<Event>::new(memory_pool().await);
        assert!(matches!(events.set_active(42, false).await, Err(StoreError::NotFound)));
    }
}
