//! Pure feed filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use edilhub_core::AppError;
use edilhub_entity::notification::Notification;

/// Selection applied to a fetched feed. Selections are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    /// Everything except archived records.
    #[default]
    All,
    /// Unread records only.
    Unread,
    /// Unread records with `alta` or `critica` priority.
    HighPriority,
}

impl FeedFilter {
    /// Whether `n` belongs to this selection.
    pub fn matches(&self, n: &Notification) -> bool {
        match self {
            Self::All => !n.is_archived(),
            Self::Unread => n.is_unread(),
            Self::HighPriority => n.is_high_priority(),
        }
    }

    /// Return the filter as a query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::HighPriority => "high_priority",
        }
    }
}

impl fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "high_priority" | "highpriority" => Ok(Self::HighPriority),
            _ => Err(AppError::validation(format!(
                "Invalid feed filter: '{s}'. Expected one of: all, unread, high_priority"
            ))),
        }
    }
}

/// Apply `selection` to `feed`, preserving order. Never touches the store.
pub fn filter(feed: &[Notification], selection: FeedFilter) -> Vec<Notification> {
    feed.iter()
        .filter(|n| selection.matches(n))
        .cloned()
        .collect()
}

/// Badge counts over a fetched feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCounts {
    /// Records in the feed, archived included.
    pub total: usize,
    /// Unread records.
    pub unread: usize,
    /// Unread high-priority records.
    pub high_priority: usize,
    /// Archived records.
    pub archived: usize,
}

impl FeedCounts {
    /// Count `feed`.
    pub fn of(feed: &[Notification]) -> Self {
        feed.iter().fold(
            Self {
                total: feed.len(),
                ..Self::default()
            },
            |mut acc, n| {
                if n.is_unread() {
                    acc.unread += 1;
                }
                if n.is_high_priority() {
                    acc.high_priority += 1;
                }
                if n.is_archived() {
                    acc.archived += 1;
                }
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edilhub_entity::notification::{
        EntityKind, NewNotification, NotificationKind, NotificationState, Priority,
    };

    fn record(stato: NotificationState, priorita: Priority) -> Notification {
        let mut n = Notification::create(
            NewNotification {
                tipo: NotificationKind::Alert,
                entita_tipo: EntityKind::Ordine,
                entita_id: "ORD-1".to_string(),
                titolo: "Ordine in ritardo".to_string(),
                messaggio: String::new(),
                priorita,
                azione_suggerita: None,
                link_azione: None,
            },
            Utc::now(),
        );
        n.stato = stato;
        if stato == NotificationState::Letta {
            n.letta_at = Some(Utc::now());
        }
        n
    }

    fn mixed_feed() -> Vec<Notification> {
        vec![
            record(NotificationState::NonLetta, Priority::Critica),
            record(NotificationState::Letta, Priority::Bassa),
            record(NotificationState::NonLetta, Priority::Media),
            record(NotificationState::Archiviata, Priority::Alta),
            record(NotificationState::NonLetta, Priority::Alta),
        ]
    }

    #[test]
    fn test_all_excludes_archived() {
        let feed = mixed_feed();
        let all = filter(&feed, FeedFilter::All);
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|n| !n.is_archived()));
    }

    #[test]
    fn test_selections_nest() {
        let feed = mixed_feed();
        let all = filter(&feed, FeedFilter::All);
        let unread = filter(&feed, FeedFilter::Unread);
        let high = filter(&feed, FeedFilter::HighPriority);
        assert!(unread.iter().all(|n| all.contains(n)));
        assert!(high.iter().all(|n| unread.contains(n)));
        assert!(all.iter().all(|n| feed.contains(n)));
        assert_eq!(unread.len(), 3);
        assert_eq!(high.len(), 2);
    }

    #[test]
    fn test_high_priority_scenario() {
        let mut feed = vec![
            record(NotificationState::NonLetta, Priority::Critica),
            record(NotificationState::Letta, Priority::Bassa),
        ];
        let high = filter(&feed, FeedFilter::HighPriority);
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, feed[0].id);

        feed[0].mark_read(Utc::now());
        assert!(filter(&feed, FeedFilter::Unread).is_empty());
    }

    #[test]
    fn test_counts() {
        let counts = FeedCounts::of(&mixed_feed());
        assert_eq!(
            counts,
            FeedCounts {
                total: 5,
                unread: 3,
                high_priority: 2,
                archived: 1,
            }
        );
        assert_eq!(FeedCounts::of(&[]), FeedCounts::default());
    }

    #[test]
    fn test_parse() {
        assert_eq!("unread".parse::<FeedFilter>().unwrap(), FeedFilter::Unread);
        assert_eq!(
            "high_priority".parse::<FeedFilter>().unwrap(),
            FeedFilter::HighPriority
        );
        assert!("archived".parse::<FeedFilter>().is_err());
    }
}
