use clap::Args;
use serde_json::{json, Value};

use market_study_core::study::agent::AgentKind;
use market_study_core::study::{extract_structured_data, visualization_for};

use crate::input;

#[derive(Args)]
pub struct ExtractArgs {
    /// Path to a text file holding the agent's answer
    #[arg(long)]
    pub input: Option<String>,

    /// Agent that wrote the answer; adds its chart descriptor when known
    #[arg(long)]
    pub agent: Option<String>,
}

pub fn run_extract(args: ExtractArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = if let Some(ref path) = args.input {
        input::file::read_text(path)?
    } else if let Some(text) = input::stdin::read_stdin_text()? {
        text
    } else {
        return Err("--input <answer.txt> or stdin required for extraction".into());
    };

    tracing::debug!(chars = text.chars().count(), "extracting structured data");
    let data = extract_structured_data(&text)?;

    let visualization = match args.agent {
        Some(name) => {
            let kind: AgentKind = serde_json::from_value(Value::String(name.clone()))
                .map_err(|_| format!("Unknown agent '{name}'"))?;
            visualization_for(kind, &data)
        }
        None => None,
    };

    Ok(json!({
        "result": data,
        "visualization": visualization,
    }))
}
