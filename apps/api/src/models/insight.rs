//! Profession insight bundle returned by the language model.
//!
//! One canonical schema: `atsKeywords`, `summary`, `certifications`, `salaryRange`,
//! `industryInsights`, `recommendedCourses`, `projectIdeas`. Every field defaults to empty,
//! so a partial or off-schema reply still yields a fully-populated value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionInsightBundle {
    pub ats_keywords: Vec<String>,
    pub summary: String,
    pub certifications: Vec<String>,
    pub salary_range: SalaryRange,
    pub industry_insights: IndustryInsights,
    pub recommended_courses: Vec<CourseRecommendation>,
    pub project_ideas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryRange {
    pub entry: String,
    pub mid: String,
    pub senior: String,
    pub expert: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndustryInsights {
    pub trends: Vec<String>,
    pub challenges: Vec<String>,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecommendation {
    pub name: String,
    pub provider: String,
    pub level: String,
}

impl ProfessionInsightBundle {
    /// The placeholder shown when no insights are available.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}
