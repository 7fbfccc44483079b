use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::agent::AgentKind;

/// Chart hint attached to an agent result, derived from its structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Visualization {
    CompetitorsTable { data: Value },
    RevenueBarChart { data: Value },
    BenchmarksRadar { data: Vec<BenchmarkPoint> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    pub metric: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Pick a visualization for the agent's data, if the expected key is there.
pub fn visualization_for(kind: AgentKind, data: &Value) -> Option<Visualization> {
    match kind {
        AgentKind::MarketResearch => data
            .get("competitors")
            .map(|c| Visualization::CompetitorsTable { data: c.clone() }),
        AgentKind::Financial => data
            .get("revenue_projections")
            .map(|r| Visualization::RevenueBarChart { data: r.clone() }),
        AgentKind::Statistics => {
            let benchmarks = data.get("benchmarks")?.as_object()?;
            let points = benchmarks
                .iter()
                .map(|(metric, entry)| BenchmarkPoint {
                    metric: metric.clone(),
                    value: entry.get("industry_avg").cloned().unwrap_or(Value::Null),
                    unit: entry
                        .get("unit")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect();
            Some(Visualization::BenchmarksRadar { data: points })
        }
        AgentKind::Legal | AgentKind::Customer | AgentKind::Strategy => None,
    }
}
