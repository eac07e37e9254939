use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Qualitative pipeline progress of a client project. Unrecognized labels
/// deserialize to `Other` so forecast weighting stays defined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Prospecting,
    QuoteSent,
    Planned,
    InProgress,
    Completed,
    #[serde(other)]
    Other,
}

impl PipelineStage {
    /// Likelihood weight applied to a project's budget when estimating
    /// pipeline revenue.
    pub fn weight(self) -> f64 {
        match self {
            PipelineStage::Prospecting => 0.2,
            PipelineStage::QuoteSent => 0.4,
            PipelineStage::Planned => 0.6,
            PipelineStage::InProgress => 0.8,
            PipelineStage::Completed => 1.0,
            PipelineStage::Other => 0.3,
        }
    }
}

/// A business project used for revenue recognition in forecasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub stage: PipelineStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_amount: Option<f64>,
}

impl Project {
    pub fn new(business_id: Uuid, name: impl Into<String>, stage: PipelineStage) -> Self {
        Self {
            id: Uuid::new_v4(),
            business_id,
            name: name.into(),
            stage,
            start_date: None,
            due_date: None,
            budget_amount: None,
        }
    }
}
