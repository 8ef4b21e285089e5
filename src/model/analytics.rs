use serde::{Deserialize, Serialize};

/// Aggregates behind the dashboard header tiles. Every field defaults to
/// zero so a failed or partial read still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_projects: u32,
    #[serde(default)]
    pub active_projects: u32,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub in_progress_tasks: u32,
    #[serde(default)]
    pub overdue_tasks: u32,
    #[serde(default)]
    pub team_members: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub todo: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub review: u32,
    #[serde(default)]
    pub done: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(default)]
    pub low: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub urgent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalytics {
    #[serde(default)]
    pub status_counts: StatusCounts,
    #[serde(default)]
    pub priority_counts: PriorityCounts,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub average_age_days: f64,
}
