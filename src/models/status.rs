use serde::Serialize;

/// Workflow state of an idea. Discriminants match the `statuses.id` rows
/// seeded by the initial migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaStatus {
    Open = 1,
    Considering = 2,
    InProgress = 3,
    Implemented = 4,
    Closed = 5,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::Open,
        IdeaStatus::Considering,
        IdeaStatus::InProgress,
        IdeaStatus::Implemented,
        IdeaStatus::Closed,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Display name, also the value carried in `?status=`.
    pub fn name(self) -> &'static str {
        match self {
            IdeaStatus::Open => "Open",
            IdeaStatus::Considering => "Considering",
            IdeaStatus::InProgress => "In Progress",
            IdeaStatus::Implemented => "Implemented",
            IdeaStatus::Closed => "Closed",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            IdeaStatus::Open => "open",
            IdeaStatus::Considering => "considering",
            IdeaStatus::InProgress => "in_progress",
            IdeaStatus::Implemented => "implemented",
            IdeaStatus::Closed => "closed",
        }
    }

    /// CSS classes for the status pill.
    pub fn classes(self) -> &'static str {
        match self {
            IdeaStatus::Open => "bg-gray-200",
            IdeaStatus::Considering => "bg-purple text-white",
            IdeaStatus::InProgress => "bg-yellow text-white",
            IdeaStatus::Implemented => "bg-green text-white",
            IdeaStatus::Closed => "bg-red text-white",
        }
    }

    /// Accepts the display name or the snake_case key, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name) || s.key().eq_ignore_ascii_case(name))
    }
}

/// Unfiltered idea counts per status, shown as badges on the status tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StatusCounts {
    pub all: i64,
    pub open: i64,
    pub considering: i64,
    pub in_progress: i64,
    pub implemented: i64,
    pub closed: i64,
}

impl StatusCounts {
    pub fn for_status(&self, status: IdeaStatus) -> i64 {
        match status {
            IdeaStatus::Open => self.open,
            IdeaStatus::Considering => self.considering,
            IdeaStatus::InProgress => self.in_progress,
            IdeaStatus::Implemented => self.implemented,
            IdeaStatus::Closed => self.closed,
        }
    }

    /// Bump the counter for one idea of the given status.
    pub fn tally(&mut self, status: IdeaStatus) {
        self.all += 1;
        match status {
            IdeaStatus::Open => self.open += 1,
            IdeaStatus::Considering => self.considering += 1,
            IdeaStatus::InProgress => self.in_progress += 1,
            IdeaStatus::Implemented => self.implemented += 1,
            IdeaStatus::Closed => self.closed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_seeded_rows() {
        assert_eq!(IdeaStatus::Open.id(), 1);
        assert_eq!(IdeaStatus::Closed.id(), 5);
        assert_eq!(IdeaStatus::from_id(3), Some(IdeaStatus::InProgress));
        assert_eq!(IdeaStatus::from_id(9), None);
    }

    #[test]
    fn from_name_accepts_display_name_and_key() {
        assert_eq!(IdeaStatus::from_name("In Progress"), Some(IdeaStatus::InProgress));
        assert_eq!(IdeaStatus::from_name("in_progress"), Some(IdeaStatus::InProgress));
        assert_eq!(IdeaStatus::from_name("considering"), Some(IdeaStatus::Considering));
        assert_eq!(IdeaStatus::from_name("Spam"), None);
    }

    #[test]
    fn tally_tracks_total_and_bucket() {
        let mut counts = StatusCounts::default();
        counts.tally(IdeaStatus::Open);
        counts.tally(IdeaStatus::Closed);
        counts.tally(IdeaStatus::Closed);
        assert_eq!(counts.all, 3);
        assert_eq!(counts.for_status(IdeaStatus::Closed), 2);
        assert_eq!(counts.for_status(IdeaStatus::Considering), 0);
    }
}
