use serde::{Deserialize, Serialize};

use crate::error::MarketStudyError;
use crate::projection::params::{validate_parameters, BusinessParameters};
use crate::MarketStudyResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopmentStage {
    #[serde(rename = "idea")]
    Idea,
    #[default]
    #[serde(rename = "less-1y")]
    LessThanOneYear,
    #[serde(rename = "1-3y")]
    OneToThreeYears,
    #[serde(rename = "more-3y")]
    MoreThanThreeYears,
}

impl DevelopmentStage {
    pub fn display_name(self) -> &'static str {
        match self {
            DevelopmentStage::Idea => "Idea",
            DevelopmentStage::LessThanOneYear => "Less than 1 year",
            DevelopmentStage::OneToThreeYears => "1-3 years",
            DevelopmentStage::MoreThanThreeYears => "More than 3 years",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Fintech,
    Hrtech,
    Martech,
    #[default]
    Saas,
    Ecommerce,
    Other,
}

impl Sector {
    pub fn display_name(self) -> &'static str {
        match self {
            Sector::Fintech => "FinTech",
            Sector::Hrtech => "HR Tech",
            Sector::Martech => "MarTech",
            Sector::Saas => "General SaaS",
            Sector::Ecommerce => "E-commerce",
            Sector::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMarket {
    #[default]
    B2B,
    B2C,
    B2B2C,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueModel {
    #[default]
    Subscription,
    Freemium,
    Usage,
    Other,
}

impl RevenueModel {
    pub fn display_name(self) -> &'static str {
        match self {
            RevenueModel::Subscription => "Subscription",
            RevenueModel::Freemium => "Freemium",
            RevenueModel::Usage => "Pay per use",
            RevenueModel::Other => "Other",
        }
    }
}

/// Everything the founder enters in the multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyForm {
    pub company_name: String,
    #[serde(default)]
    pub development_stage: DevelopmentStage,
    #[serde(default)]
    pub sector: Sector,
    #[serde(default)]
    pub target_market: TargetMarket,
    pub description: String,
    #[serde(default)]
    pub revenue_model: RevenueModel,
    pub team_size: u32,
    pub email: String,
    #[serde(flatten)]
    pub business: BusinessParameters,
}

impl StudyForm {
    pub fn validate(&self) -> MarketStudyResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(MarketStudyError::InvalidInput {
                field: "company_name".into(),
                reason: "Company name is required".into(),
            });
        }
        if self.description.trim().is_empty() {
            return Err(MarketStudyError::InvalidInput {
                field: "description".into(),
                reason: "Product description is required".into(),
            });
        }
        if self.team_size < 1 {
            return Err(MarketStudyError::InvalidInput {
                field: "team_size".into(),
                reason: "Team must have at least one member".into(),
            });
        }
        if !looks_like_email(&self.email) {
            return Err(MarketStudyError::InvalidInput {
                field: "email".into(),
                reason: format!("'{}' is not a valid email address", self.email),
            });
        }
        validate_parameters(&self.business)
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
