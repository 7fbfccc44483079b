//! Multi-agent market study: one form fans out to six specialised language
//! model calls whose answers are assembled into a report, each with its own
//! follow-up conversation.
//!
//! The model itself is external and reached through [`model::LanguageModel`];
//! reports live behind [`store::ReportStore`].

pub mod agent;
pub mod extract;
pub mod form;
pub mod model;
pub mod orchestrator;
pub mod prompts;
pub mod sources;
pub mod store;
pub mod visualization;

pub use agent::{
    AgentConversation, AgentKind, AgentMessage, AgentResult, AgentSector, AgentStatus,
    AnalysisReport, MessageRole,
};
pub use extract::extract_structured_data;
pub use form::StudyForm;
pub use model::{ChatMessage, ChatRole, CompletionRequest, LanguageModel, RequestPurpose};
pub use orchestrator::{continue_conversation, run_agent, run_study};
pub use sources::{find_external_sources, ExternalSource, SourceKind};
pub use store::{InMemoryReportStore, ReportStore};
pub use visualization::{visualization_for, Visualization};
