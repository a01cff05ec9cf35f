use serde::{Deserialize, Serialize};

use crate::models::record::ResumeRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessCheck {
    pub item: String,
    pub weight: u8,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// 0–100; the weights of all checks sum to 100.
    pub score: u8,
    pub checks: Vec<CompletenessCheck>,
    pub suggestions: Vec<String>,
}

struct Rule {
    item: &'static str,
    weight: u8,
    suggestion: &'static str,
    check: fn(&ResumeRecord) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        item: "fullName",
        weight: 10,
        suggestion: "Add your full name",
        check: |r| !r.personal_info.full_name.trim().is_empty(),
    },
    Rule {
        item: "email",
        weight: 10,
        suggestion: "Add an email address so recruiters can reach you",
        check: |r| !r.personal_info.email.trim().is_empty(),
    },
    Rule {
        item: "summary",
        weight: 10,
        suggestion: "Write a short professional summary",
        check: |r| !r.personal_info.summary.trim().is_empty(),
    },
    Rule {
        item: "skills",
        weight: 10,
        suggestion: "List at least one skill",
        check: |r| !r.skills.is_empty(),
    },
    Rule {
        item: "skills5",
        weight: 10,
        suggestion: "List at least five skills",
        check: |r| r.skills.len() >= 5,
    },
    Rule {
        item: "experience",
        weight: 15,
        suggestion: "Add your work experience",
        check: |r| !r.experience.is_empty(),
    },
    Rule {
        item: "experience2",
        weight: 10,
        suggestion: "Add at least two positions to show career progression",
        check: |r| r.experience.len() >= 2,
    },
    Rule {
        item: "education",
        weight: 15,
        suggestion: "Add your education",
        check: |r| !r.education.is_empty(),
    },
    Rule {
        item: "projects",
        weight: 5,
        suggestion: "Showcase a project",
        check: |r| !r.projects.is_empty(),
    },
    Rule {
        item: "photo",
        weight: 5,
        suggestion: "Upload a profile photo",
        check: |r| !r.personal_info.profile_picture.trim().is_empty(),
    },
];

pub fn compute_completeness_report(record: &ResumeRecord) -> CompletenessReport {
    let mut score = 0u8;
    let mut checks = Vec::with_capacity(RULES.len());
    let mut suggestions = Vec::new();

    for rule in RULES {
        let done = (rule.check)(record);
        if done {
            score += rule.weight;
        } else {
            suggestions.push(rule.suggestion.to_string());
        }
        checks.push(CompletenessCheck {
            item: rule.item.to_string(),
            weight: rule.weight,
            done,
        });
    }

    CompletenessReport {
        score: score.min(100),
        checks,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Education, Experience, Project, Skill};

    #[test]
    fn test_weights_sum_to_100() {
        let total: u32 = RULES.iter().map(|r| r.weight as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let report = compute_completeness_report(&ResumeRecord::default());
        assert_eq!(report.score, 0);
        assert_eq!(report.suggestions.len(), RULES.len());
    }

    #[test]
    fn test_name_and_email_scores_twenty() {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Ada Lovelace".to_string();
        record.personal_info.email = "ada@example.com".to_string();
        let report = compute_completeness_report(&record);
        assert_eq!(report.score, 20);
        assert!(!report.suggestions.iter().any(|s| s.contains("email")));
    }

    #[test]
    fn test_full_record_scores_hundred() {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Ada".to_string();
        record.personal_info.email = "ada@example.com".to_string();
        record.personal_info.summary = "Engineer".to_string();
        record.personal_info.profile_picture = "data:image/png;base64,AA".to_string();
        record.skills = vec![Skill::default(); 5];
        record.experience = vec![Experience::default(); 2];
        record.education = vec![Education::default()];
        record.projects = vec![Project::default()];
        let report = compute_completeness_report(&record);
        assert_eq!(report.score, 100);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_whitespace_name_does_not_count() {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "   ".to_string();
        assert_eq!(compute_completeness_report(&record).score, 0);
    }
}
