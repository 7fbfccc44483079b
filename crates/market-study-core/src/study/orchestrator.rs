use rayon::prelude::*;
use uuid::Uuid;

use super::agent::{
    agent_sector, AgentConversation, AgentKind, AgentMessage, AgentResult, AgentSector,
    AgentStatus, AnalysisReport, MessageRole,
};
use super::extract::extract_structured_data;
use super::form::StudyForm;
use super::model::LanguageModel;
use super::prompts::{analysis_request, conversation_request, summary_request};
use super::sources::find_external_sources;
use super::store::ReportStore;
use super::visualization::visualization_for;
use crate::error::{MarketStudyError, ModelError};
use crate::MarketStudyResult;

/// Shown in place of the executive summary when no agent completed.
pub const SUMMARY_UNAVAILABLE: &str =
    "Executive summary unavailable: no agent analysis completed.";

/// Posted to a conversation when the model could not answer.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, an error occurred while processing your request. Please try again.";

/// Run one agent. Never fails: model errors are recorded on the result.
pub fn run_agent(
    kind: AgentKind,
    form: &StudyForm,
    sector: AgentSector,
    model: &dyn LanguageModel,
) -> AgentResult {
    let request = analysis_request(kind, form, sector);
    let content = match model.complete(&request) {
        Ok(text) if text.trim().is_empty() => {
            tracing::warn!(agent = %kind, "model returned an empty completion");
            return AgentResult::failed(kind, sector, ModelError::EmptyCompletion);
        }
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(agent = %kind, error = %e, "agent call failed");
            return AgentResult::failed(kind, sector, e);
        }
    };

    let mut result = AgentResult::pending(kind, sector);
    match extract_structured_data(&content) {
        Ok(data) => {
            result.visualization = visualization_for(kind, &data);
            result.data = Some(data);
        }
        Err(e) => {
            tracing::debug!(agent = %kind, error = %e, "no structured data in agent output");
            result.data_warning = Some(e.to_string());
        }
    }
    result.content = content;
    result.status = AgentStatus::Completed;
    result
}

/// Run every agent against `form` and assemble the report.
///
/// Agents and the external-source lookup run in parallel and independently:
/// one failure leaves the others untouched and is recorded on its own result
/// (a failed source is simply left out). Only an invalid form fails the whole
/// study.
pub fn run_study(form: StudyForm, model: &dyn LanguageModel) -> MarketStudyResult<AnalysisReport> {
    form.validate()?;
    let mut report = AnalysisReport::new(form);
    let form_sector = AgentSector::from(report.form.sector);

    let (results, external_sources) = rayon::join(
        || {
            AgentKind::ALL
                .par_iter()
                .map(|&kind| run_agent(kind, &report.form, agent_sector(kind, form_sector), model))
                .collect::<Vec<AgentResult>>()
        },
        || find_external_sources(&report.form, model),
    );
    report.external_sources = external_sources;

    for result in results {
        if let Some(err) = &result.error {
            report
                .warnings
                .push(format!("{} failed: {err}", result.agent_name));
        }
        report.agents.insert(result.kind, result);
    }

    let completed: Vec<(&str, &str)> = report
        .completed_agents()
        .map(|r| (r.agent_name.as_str(), r.content.as_str()))
        .collect();

    let summary = if completed.is_empty() {
        tracing::warn!(report_id = %report.id, "every agent failed; skipping executive summary");
        Some(SUMMARY_UNAVAILABLE.to_string())
    } else {
        match model.complete(&summary_request(completed)) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                report
                    .warnings
                    .push(format!("Executive summary failed: {}", ModelError::EmptyCompletion));
                None
            }
            Err(e) => {
                tracing::warn!(report_id = %report.id, error = %e, "executive summary failed");
                report.warnings.push(format!("Executive summary failed: {e}"));
                None
            }
        }
    };
    report.summary = summary;

    tracing::debug!(
        report_id = %report.id,
        completed = report.completed_agents().count(),
        "study finished"
    );
    Ok(report)
}

/// Append `message` to the agent's conversation, ask the model for a reply
/// and store the updated report. Returns the message appended after the
/// user's: the agent reply, or a system apology when the model failed.
pub fn continue_conversation(
    store: &dyn ReportStore,
    report_id: &Uuid,
    kind: AgentKind,
    message: &str,
    model: &dyn LanguageModel,
) -> MarketStudyResult<AgentMessage> {
    if message.trim().is_empty() {
        return Err(MarketStudyError::InvalidInput {
            field: "message".into(),
            reason: "Message must not be empty".into(),
        });
    }

    let mut report = store
        .get(report_id)?
        .ok_or_else(|| MarketStudyError::ReportNotFound(report_id.to_string()))?;

    let conversation = report
        .conversations
        .entry(kind)
        .or_insert_with(|| AgentConversation::new(kind));
    conversation
        .messages
        .push(AgentMessage::new(MessageRole::User, message));

    let reply = match model.complete(&conversation_request(conversation)) {
        Ok(text) if !text.trim().is_empty() => AgentMessage::new(MessageRole::Agent, text),
        Ok(_) => {
            tracing::warn!(report_id = %report_id, agent = %kind, "empty conversation reply");
            AgentMessage::new(MessageRole::System, APOLOGY_MESSAGE)
        }
        Err(e) => {
            tracing::warn!(report_id = %report_id, agent = %kind, error = %e, "conversation call failed");
            AgentMessage::new(MessageRole::System, APOLOGY_MESSAGE)
        }
    };
    conversation.messages.push(reply.clone());

    store.put(report)?;
    Ok(reply)
}
