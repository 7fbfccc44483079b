use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::form::{Sector, StudyForm};
use super::sources::ExternalSource;
use super::visualization::Visualization;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// The six specialised analysts run for every study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    MarketResearch,
    Legal,
    Financial,
    Customer,
    Strategy,
    Statistics,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::MarketResearch,
        AgentKind::Legal,
        AgentKind::Financial,
        AgentKind::Customer,
        AgentKind::Strategy,
        AgentKind::Statistics,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::MarketResearch => "Market research",
            AgentKind::Legal => "Legal analysis",
            AgentKind::Financial => "Financial analysis",
            AgentKind::Customer => "Customer typology",
            AgentKind::Strategy => "Go-to-market strategy",
            AgentKind::Statistics => "Statistics & forecasts",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Sector specialisation handed to the market-research agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentSector {
    #[default]
    General,
    Fintech,
    Hrtech,
    Martech,
    Saas,
    Ecommerce,
}

impl From<Sector> for AgentSector {
    fn from(sector: Sector) -> Self {
        match sector {
            Sector::Fintech => AgentSector::Fintech,
            Sector::Hrtech => AgentSector::Hrtech,
            Sector::Martech => AgentSector::Martech,
            Sector::Saas => AgentSector::Saas,
            Sector::Ecommerce => AgentSector::Ecommerce,
            Sector::Other => AgentSector::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Pending,
    Completed,
    Error,
}

/// One agent's contribution to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent_name: String,
    pub kind: AgentKind,
    pub sector: AgentSector,
    pub content: String,
    pub status: AgentStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Structured block pulled from `content`, when one was present and valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Why `data` is absent for a completed agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
}

impl AgentResult {
    pub fn pending(kind: AgentKind, sector: AgentSector) -> Self {
        Self {
            agent_name: kind.display_name().to_string(),
            kind,
            sector,
            content: String::new(),
            status: AgentStatus::Pending,
            timestamp: Utc::now(),
            error: None,
            data: None,
            data_warning: None,
            visualization: None,
        }
    }

    pub fn failed(kind: AgentKind, sector: AgentSector, error: impl fmt::Display) -> Self {
        Self {
            status: AgentStatus::Error,
            error: Some(error.to_string()),
            ..Self::pending(kind, sector)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AgentStatus::Completed
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

pub const WELCOME_MESSAGE: &str =
    "Welcome! I am your specialised assistant. How can I help you?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConversation {
    pub kind: AgentKind,
    pub messages: Vec<AgentMessage>,
}

impl AgentConversation {
    /// A fresh conversation opened by the system greeting.
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            messages: vec![AgentMessage::new(MessageRole::System, WELCOME_MESSAGE)],
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub form: StudyForm,
    pub agents: BTreeMap<AgentKind, AgentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub conversations: BTreeMap<AgentKind, AgentConversation>,
    #[serde(default)]
    pub external_sources: Vec<ExternalSource>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// New report with every agent pending and every conversation greeted.
    pub fn new(form: StudyForm) -> Self {
        let sector = AgentSector::from(form.sector);
        let agents = AgentKind::ALL
            .iter()
            .map(|&kind| (kind, AgentResult::pending(kind, agent_sector(kind, sector))))
            .collect();
        let conversations = AgentKind::ALL
            .iter()
            .map(|&kind| (kind, AgentConversation::new(kind)))
            .collect();

        Self {
            id: Uuid::new_v4(),
            project_name: form.company_name.clone(),
            created_at: Utc::now(),
            form,
            agents,
            summary: None,
            conversations,
            external_sources: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn completed_agents(&self) -> impl Iterator<Item = &AgentResult> {
        self.agents.values().filter(|r| r.is_completed())
    }
}

/// Only market research is sector-specialised; the others run general.
pub fn agent_sector(kind: AgentKind, form_sector: AgentSector) -> AgentSector {
    match kind {
        AgentKind::MarketResearch => form_sector,
        _ => AgentSector::General,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::form::tests::sample_form;

    #[test]
    fn test_new_report_has_all_agents_pending() {
        let report = AnalysisReport::new(sample_form());
        assert_eq!(report.project_name, "SaaS Vision");
        assert_eq!(report.agents.len(), 6);
        assert!(report
            .agents
            .values()
            .all(|a| a.status == AgentStatus::Pending));
        assert_eq!(report.completed_agents().count(), 0);
    }

    #[test]
    fn test_conversations_open_with_greeting() {
        let report = AnalysisReport::new(sample_form());
        for kind in AgentKind::ALL {
            let conv = &report.conversations[&kind];
            assert_eq!(conv.messages.len(), 1);
            assert_eq!(conv.messages[0].role, MessageRole::System);
        }
    }

    #[test]
    fn test_only_market_research_is_sector_specialised() {
        let report = AnalysisReport::new(sample_form());
        assert_eq!(report.agents[&AgentKind::MarketResearch].sector, AgentSector::Saas);
        assert_eq!(report.agents[&AgentKind::Legal].sector, AgentSector::General);
    }

    #[test]
    fn test_other_sector_maps_to_general() {
        assert_eq!(AgentSector::from(Sector::Other), AgentSector::General);
        assert_eq!(AgentSector::from(Sector::Fintech), AgentSector::Fintech);
    }

    #[test]
    fn test_report_json_roundtrip_keeps_agent_keys() {
        let report = AnalysisReport::new(sample_form());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["agents"].get("market-research").is_some());
        let back: AnalysisReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_failed_result_carries_error() {
        let result = AgentResult::failed(AgentKind::Legal, AgentSector::General, "timeout");
        assert_eq!(result.status, AgentStatus::Error);
        assert_eq!(result.error.as_deref(), Some("timeout"));
        assert!(!result.is_completed());
    }
}
