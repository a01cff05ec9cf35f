//! Non-blocking field checks. Warnings are reported next to the record; they never
//! prevent a mutation or an export.

use serde::{Deserialize, Serialize};

use crate::models::record::ResumeRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldWarning {
    /// JSON-pointer-like path into the record, e.g. `personalInfo.socialLinks[1]`.
    pub path: String,
    pub message: String,
}

impl FieldWarning {
    fn new(path: impl Into<String>, message: &str) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub fn validate_record(record: &ResumeRecord) -> Vec<FieldWarning> {
    let mut warnings = Vec::new();
    let info = &record.personal_info;

    if !info.email.trim().is_empty() && !looks_like_email(&info.email) {
        warnings.push(FieldWarning::new("personalInfo.email", "Email address looks malformed"));
    }
    if info.phone.chars().any(char::is_alphabetic) {
        warnings.push(FieldWarning::new("personalInfo.phone", "Phone number contains letters"));
    }
    if !info.profile_picture.is_empty() && !info.profile_picture.starts_with("data:") {
        warnings.push(FieldWarning::new(
            "personalInfo.profilePicture",
            "Photo must be uploaded; linked images cannot be exported",
        ));
    }

    for (i, link) in info.social_links.iter().enumerate() {
        check_link(&mut warnings, format!("personalInfo.socialLinks[{i}]"), link);
    }
    for (i, project) in record.projects.iter().enumerate() {
        check_link(&mut warnings, format!("projects[{i}].link"), &project.link);
    }
    for (i, publication) in record.publications.iter().enumerate() {
        check_link(&mut warnings, format!("publications[{i}].link"), &publication.link);
    }
    for (i, reference) in record.references.iter().enumerate() {
        if !reference.email.trim().is_empty() && !looks_like_email(&reference.email) {
            warnings.push(FieldWarning::new(
                format!("references[{i}].email"),
                "Email address looks malformed",
            ));
        }
    }

    warnings
}

fn check_link(warnings: &mut Vec<FieldWarning>, path: String, link: &str) {
    let link = link.trim();
    if link.is_empty() {
        return;
    }
    if !(link.starts_with("http://") || link.starts_with("https://")) {
        warnings.push(FieldWarning::new(path, "Link should start with http:// or https://"));
    }
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
