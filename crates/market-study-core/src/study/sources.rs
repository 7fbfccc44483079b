//! Curated external sources attached to every report.
//!
//! Each sector has a short catalogue, topped up from the general one. The
//! model only writes the descriptions; titles and links never come from it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::AgentSector;
use super::form::StudyForm;
use super::model::LanguageModel;
use super::prompts::source_description_request;

/// Sources kept per report.
pub const MAX_SOURCES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Article,
    Statistics,
    Report,
    Research,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSource {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// 70..=100, highest first
    pub relevance: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub name: &'static str,
    pub url: &'static str,
}

const fn entry(name: &'static str, url: &'static str) -> CatalogueEntry {
    CatalogueEntry { name, url }
}

const FINTECH: &[CatalogueEntry] = &[
    entry(
        "CB Insights Fintech Trends",
        "https://www.cbinsights.com/research/report/fintech-trends-q4-2023/",
    ),
    entry(
        "McKinsey Financial Services",
        "https://www.mckinsey.com/industries/financial-services/our-insights",
    ),
    entry("Statista Fintech", "https://www.statista.com/topics/2404/fintech/"),
];

const SAAS: &[CatalogueEntry] = &[
    entry("SaaStr", "https://www.saastr.com/"),
    entry("Software Equity Group", "https://www.softwareequity.com/reports/"),
    entry("Statista SaaS", "https://www.statista.com/topics/3071/cloud-software/"),
];

const HRTECH: &[CatalogueEntry] = &[
    entry("Josh Bersin HR Tech", "https://joshbersin.com/hr-tech-market-2/"),
    entry("Capterra HR Tech", "https://www.capterra.com/hr-software/"),
];

const MARTECH: &[CatalogueEntry] = &[
    entry("Chief Martec", "https://chiefmartec.com/"),
    entry(
        "G2 MarTech",
        "https://research.g2.com/insights/marketing-technology",
    ),
];

const ECOMMERCE: &[CatalogueEntry] = &[
    entry(
        "Digital Commerce 360",
        "https://www.digitalcommerce360.com/article/quarterly-online-sales/",
    ),
    entry(
        "Statista E-commerce",
        "https://www.statista.com/outlook/dmo/ecommerce/worldwide",
    ),
];

const GENERAL: &[CatalogueEntry] = &[
    entry("Forrester Research", "https://www.forrester.com/bold"),
    entry(
        "Gartner Magic Quadrant",
        "https://www.gartner.com/en/research/methodologies/magic-quadrant",
    ),
];

pub fn sector_catalogue(sector: AgentSector) -> &'static [CatalogueEntry] {
    match sector {
        AgentSector::Fintech => FINTECH,
        AgentSector::Saas => SAAS,
        AgentSector::Hrtech => HRTECH,
        AgentSector::Martech => MARTECH,
        AgentSector::Ecommerce => ECOMMERCE,
        AgentSector::General => GENERAL,
    }
}

/// Sector sources first, then general ones, without duplicates, capped at
/// [`MAX_SOURCES`].
pub fn candidate_sources(sector: AgentSector) -> Vec<CatalogueEntry> {
    let mut out: Vec<CatalogueEntry> = Vec::with_capacity(MAX_SOURCES);
    for candidate in sector_catalogue(sector).iter().chain(GENERAL) {
        if out.len() == MAX_SOURCES {
            break;
        }
        if !out.iter().any(|e| e.url == candidate.url) {
            out.push(*candidate);
        }
    }
    out
}

/// Classify a source from keywords in its name.
pub fn source_kind(name: &str) -> SourceKind {
    let name = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["research", "insights", "report"]) {
        SourceKind::Research
    } else if has(&["statista", "data"]) {
        SourceKind::Statistics
    } else if has(&["article", "blog"]) {
        SourceKind::Article
    } else if has(&["quadrant", "trends"]) {
        SourceKind::Report
    } else {
        SourceKind::Other
    }
}

/// Relevance from catalogue position: 100 for the first source, six points
/// less for each following one.
pub fn relevance_score(position: usize) -> u8 {
    let step = u8::try_from(position.min(MAX_SOURCES - 1)).unwrap_or(0) * 6;
    100 - step
}

/// Describe each candidate source for `form`. Sources whose description
/// call fails are left out; this never fails as a whole.
pub fn find_external_sources(form: &StudyForm, model: &dyn LanguageModel) -> Vec<ExternalSource> {
    let candidates = candidate_sources(AgentSector::from(form.sector));

    candidates
        .par_iter()
        .enumerate()
        .filter_map(|(position, source)| {
            let request = source_description_request(form, source.name, source.url);
            match model.complete(&request) {
                Ok(text) if !text.trim().is_empty() => Some(ExternalSource {
                    id: Uuid::new_v4(),
                    title: source.name.to_string(),
                    url: source.url.to_string(),
                    description: text.trim().to_string(),
                    kind: source_kind(source.name),
                    relevance: relevance_score(position),
                }),
                Ok(_) => {
                    tracing::warn!(source = source.name, "empty source description; skipping");
                    None
                }
                Err(e) => {
                    tracing::warn!(source = source.name, error = %e, "source description failed; skipping");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::study::form::tests::sample_form;
    use crate::study::form::Sector;
    use crate::study::model::CompletionRequest;

    /// Fails for any prompt that mentions `failing`.
    struct Describer {
        failing: Option<&'static str>,
    }

    impl LanguageModel for Describer {
        fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
            let prompt = &request.messages[1].content;
            match self.failing {
                Some(name) if prompt.contains(name) => {
                    Err(ModelError::Transport("connection reset".into()))
                }
                _ => Ok("  Benchmarks for subscription businesses.  ".into()),
            }
        }
    }

    fn titles(sources: &[ExternalSource]) -> Vec<&str> {
        sources.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_sector_sources_come_first() {
        let sources = find_external_sources(&sample_form(), &Describer { failing: None });
        assert_eq!(
            titles(&sources),
            vec![
                "SaaStr",
                "Software Equity Group",
                "Statista SaaS",
                "Forrester Research",
                "Gartner Magic Quadrant"
            ]
        );
        assert_eq!(sources[0].description, "Benchmarks for subscription businesses.");
    }

    #[test]
    fn test_list_capped_at_five() {
        for sector in [
            AgentSector::Fintech,
            AgentSector::Saas,
            AgentSector::Hrtech,
            AgentSector::Martech,
            AgentSector::Ecommerce,
            AgentSector::General,
        ] {
            assert!(candidate_sources(sector).len() <= MAX_SOURCES);
        }
        assert_eq!(candidate_sources(AgentSector::Fintech).len(), 5);
        assert_eq!(candidate_sources(AgentSector::Hrtech).len(), 4);
    }

    #[test]
    fn test_other_sector_falls_back_to_general_without_duplicates() {
        let mut form = sample_form();
        form.sector = Sector::Other;
        let sources = find_external_sources(&form, &Describer { failing: None });
        assert_eq!(
            titles(&sources),
            vec!["Forrester Research", "Gartner Magic Quadrant"]
        );
    }

    #[test]
    fn test_failed_description_skips_source() {
        let sources = find_external_sources(
            &sample_form(),
            &Describer {
                failing: Some("Software Equity Group"),
            },
        );
        assert_eq!(sources.len(), 4);
        assert!(!titles(&sources).contains(&"Software Equity Group"));
        // scores follow catalogue position, so the gap stays visible
        assert_eq!(sources[0].relevance, 100);
        assert_eq!(sources[1].relevance, 88);
    }

    #[test]
    fn test_relevance_is_deterministic_and_bounded() {
        let scores: Vec<u8> = (0..MAX_SOURCES).map(relevance_score).collect();
        assert_eq!(scores, vec![100, 94, 88, 82, 76]);
        assert_eq!(relevance_score(40), 76);
    }

    #[test]
    fn test_source_kind_keywords() {
        assert_eq!(source_kind("Forrester Research"), SourceKind::Research);
        assert_eq!(source_kind("Statista SaaS"), SourceKind::Statistics);
        assert_eq!(source_kind("Gartner Magic Quadrant"), SourceKind::Report);
        assert_eq!(source_kind("SaaStr"), SourceKind::Other);
        assert_eq!(source_kind("CB Insights Fintech Trends"), SourceKind::Research);
    }
}
