//! Request builders for each model call.
//!
//! Only the project context and the expected JSON keys are fixed here; the
//! wording of the instructions is product copy and may change freely.

use super::agent::{AgentConversation, AgentKind, AgentSector, MessageRole};
use super::form::StudyForm;
use super::model::{ChatMessage, CompletionRequest, RequestPurpose};

pub const ANALYST_SYSTEM_PROMPT: &str =
    "You are a SaaS expert specialised in reviewing startup business plans.";

const RESEARCH_SYSTEM_PROMPT: &str =
    "You are a research assistant who finds relevant sources for SaaS market studies.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are a business advisor for SaaS startups. \
     Condense detailed analyses into a clear, actionable executive summary.";

const ANALYSIS_TEMPERATURE: f32 = 0.2;
const ANALYSIS_MAX_TOKENS: u32 = 2500;
const FOLLOW_UP_TEMPERATURE: f32 = 0.3;
const FOLLOW_UP_MAX_TOKENS: u32 = 1000;
const SOURCE_MAX_TOKENS: u32 = 150;

/// Characters of each agent's answer fed into the executive summary.
pub const SUMMARY_EXCERPT_CHARS: usize = 500;

/// Project facts shared by every agent prompt.
pub fn base_context(form: &StudyForm) -> String {
    let b = &form.business;
    format!(
        "SaaS project context:\n\
         - Company: {}\n\
         - Sector: {}\n\
         - Development stage: {}\n\
         - Target market: {:?}\n\
         - Revenue model: {}\n\
         - Average monthly price: {} EUR\n\
         - Team size: {}\n\
         - Monthly budget: {} EUR\n\
         - Available capital: {} EUR\n\
         - Current CAC: {} EUR\n\
         - Monthly churn: {}%\n\
         - Sales cycle: {} days\n\
         - 12-month client target: {}\n\
         - 12-month MRR target: {} EUR\n\n\
         Product description:\n{}\n",
        form.company_name,
        form.sector.display_name(),
        form.development_stage.display_name(),
        form.target_market,
        form.revenue_model.display_name(),
        b.average_price,
        form.team_size,
        b.monthly_budget,
        b.capital,
        b.cac,
        b.churn_rate,
        b.sales_cycle_days,
        b.client_target_12m,
        b.mrr_target_12m,
        form.description,
    )
}

fn agent_brief(kind: AgentKind) -> (&'static str, &'static str) {
    match kind {
        AgentKind::MarketResearch => (
            "Analyse market size and trends, the main competitors with their strengths, \
             weaknesses and pricing, untapped opportunities and barriers to entry.",
            r#"{"market_size": {"value": 0, "unit": "USD", "growth_rate": 0}, "competitors": [{"name": "", "url": "", "pricing": {"min": 0, "max": 0, "unit": "EUR", "model": "monthly"}, "strengths": [], "weaknesses": []}]}"#,
        ),
        AgentKind::Legal => (
            "Review the legal framework: applicable regulation, data protection, \
             contracts and intellectual property risks.",
            r#"{"regulations": [{"name": "", "impact": "", "actions": []}], "risks": [{"area": "", "level": "low|medium|high"}]}"#,
        ),
        AgentKind::Financial => (
            "Assess burn rate, runway, break-even and three-year revenue projections.",
            r#"{"financial_metrics": {"burn_rate": {"value": 0, "unit": "EUR", "period": "monthly"}, "runway": {"value": 0, "unit": "months"}, "break_even": {"value": 0, "unit": "months"}}, "revenue_projections": [{"period": "Y1", "value": 0, "unit": "EUR"}]}"#,
        ),
        AgentKind::Customer => (
            "Describe the target customer personas, their pain points, goals and \
             acquisition channels.",
            r#"{"personas": [{"name": "", "role": "", "company_size": "", "pain_points": [], "goals": [], "acquisition_channels": []}]}"#,
        ),
        AgentKind::Strategy => (
            "Propose a go-to-market strategy: positioning, pricing, channels and a \
             phased action plan.",
            r#"{"positioning": "", "channels": [{"name": "", "priority": 1}], "roadmap": [{"phase": "", "actions": []}]}"#,
        ),
        AgentKind::Statistics => (
            "Benchmark the key SaaS metrics against industry averages and forecast \
             growth with probabilities.",
            r#"{"benchmarks": {"cac": {"industry_avg": 0, "unit": "EUR", "source": ""}}, "growth_predictions": [{"metric": "", "period": "12m", "growth_rate": 0, "probability": 0}]}"#,
        ),
    }
}

/// First-pass analysis request for one agent.
pub fn analysis_request(
    kind: AgentKind,
    form: &StudyForm,
    sector: AgentSector,
) -> CompletionRequest {
    let (task, schema) = agent_brief(kind);
    let specialisation = match sector {
        AgentSector::General => String::new(),
        other => format!("Tailor the analysis to the {other:?} sector.\n"),
    };
    let prompt = format!(
        "{context}\n{specialisation}You are the {role} expert. {task}\n\
         Cite credible sources. Structure the answer with headings.\n\
         Include structured data in a fenced block:\n\n```json\n{schema}\n```\n",
        context = base_context(form),
        role = kind.display_name().to_lowercase(),
    );

    CompletionRequest {
        purpose: RequestPurpose::Analysis(kind),
        messages: vec![
            ChatMessage::system(ANALYST_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

/// Executive summary over `(agent name, answer)` excerpts.
pub fn summary_request<'a>(
    analyses: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> CompletionRequest {
    let mut overview = String::new();
    for (name, content) in analyses {
        let excerpt: String = content.chars().take(SUMMARY_EXCERPT_CHARS).collect();
        overview.push_str(&format!("\n\n## {name}\n\n{excerpt}...\n"));
    }

    let prompt = format!(
        "Here are excerpts of detailed analyses of a SaaS project.{overview}\n\n\
         Write a concise executive summary (500 words max) with these sections:\n\
         1. Market overview and opportunities\n\
         2. Project strengths\n\
         3. Main challenges\n\
         4. Key strategic recommendations\n\
         5. Concrete next steps"
    );

    CompletionRequest {
        purpose: RequestPurpose::ExecutiveSummary,
        messages: vec![
            ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ],
        temperature: FOLLOW_UP_TEMPERATURE,
        max_tokens: FOLLOW_UP_MAX_TOKENS,
    }
}

/// Follow-up request replaying the whole conversation.
///
/// The conversation must already end with the user's new message.
pub fn conversation_request(conversation: &AgentConversation) -> CompletionRequest {
    let mut messages = vec![ChatMessage::system(format!(
        "You are a SaaS expert specialised in {}. Answer using the project context \
         and your expertise. Be precise, useful and concise.",
        conversation.kind.display_name().to_lowercase()
    ))];
    messages.extend(conversation.messages.iter().map(|m| match m.role {
        MessageRole::User => ChatMessage::user(m.content.clone()),
        MessageRole::Agent => ChatMessage::assistant(m.content.clone()),
        MessageRole::System => ChatMessage::system(m.content.clone()),
    }));

    CompletionRequest {
        purpose: RequestPurpose::Conversation(conversation.kind),
        messages,
        temperature: FOLLOW_UP_TEMPERATURE,
        max_tokens: FOLLOW_UP_MAX_TOKENS,
    }
}

/// Short description of why one catalogued source matters to this project.
pub fn source_description_request(form: &StudyForm, name: &str, url: &str) -> CompletionRequest {
    let prompt = format!(
        "I am researching a SaaS project in the {sector} sector with a {model} revenue model.\n\n\
         In 2-3 sentences, explain why the source \"{name}\" ({url}) is relevant to it: \
         what kind of information it offers and how that helps.",
        sector = form.sector.display_name(),
        model = form.revenue_model.display_name(),
    );

    CompletionRequest {
        purpose: RequestPurpose::SourceDescription,
        messages: vec![
            ChatMessage::system(RESEARCH_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ],
        temperature: FOLLOW_UP_TEMPERATURE,
        max_tokens: SOURCE_MAX_TOKENS,
    }
}
