//! Record mutations sent by the form, one field or one list entry at a time.
//!
//! Lists have no stable identity beyond position: removing index i shifts every later
//! entry down by one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::record::{PersonalInfo, ResumeRecord, Template};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Summary,
    ProfilePicture,
}

impl PersonalField {
    fn slot(self, info: &mut PersonalInfo) -> &mut String {
        match self {
            PersonalField::FullName => &mut info.full_name,
            PersonalField::Title => &mut info.title,
            PersonalField::Email => &mut info.email,
            PersonalField::Phone => &mut info.phone,
            PersonalField::Location => &mut info.location,
            PersonalField::Summary => &mut info.summary,
            PersonalField::ProfilePicture => &mut info.profile_picture,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Education,
    Experience,
    Skills,
    Languages,
    Projects,
    Awards,
    Certifications,
    Volunteer,
    Publications,
    References,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RecordMutation {
    SetPersonal {
        field: PersonalField,
        value: String,
    },
    AddSocialLink {
        url: String,
    },
    RemoveSocialLink {
        index: usize,
    },
    SetTemplate {
        template: Template,
    },
    AppendEntry {
        section: Section,
        #[serde(default)]
        entry: Option<Value>,
    },
    UpdateEntry {
        section: Section,
        index: usize,
        entry: Value,
    },
    RemoveEntry {
        section: Section,
        index: usize,
    },
}

impl RecordMutation {
    /// Wire name of the operation.
    pub fn op(&self) -> &'static str {
        match self {
            RecordMutation::SetPersonal { .. } => "set_personal",
            RecordMutation::AddSocialLink { .. } => "add_social_link",
            RecordMutation::RemoveSocialLink { .. } => "remove_social_link",
            RecordMutation::SetTemplate { .. } => "set_template",
            RecordMutation::AppendEntry { .. } => "append_entry",
            RecordMutation::UpdateEntry { .. } => "update_entry",
            RecordMutation::RemoveEntry { .. } => "remove_entry",
        }
    }

    /// The list a list operation targets.
    pub fn section(&self) -> Option<Section> {
        match self {
            RecordMutation::AppendEntry { section, .. }
            | RecordMutation::UpdateEntry { section, .. }
            | RecordMutation::RemoveEntry { section, .. } => Some(*section),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MutationError {
    #[error("Index {index} is out of range for {section} (length {len})")]
    IndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid {section} entry: {message}")]
    InvalidEntry { section: String, message: String },
}

/// Runs `$op(list, section, args..)` against the list named by `$section`.
macro_rules! on_list {
    ($record:expr, $section:expr, $op:ident ( $($arg:expr),* )) => {
        match $section {
            Section::Education => $op(&mut $record.education, $section, $($arg),*),
            Section::Experience => $op(&mut $record.experience, $section, $($arg),*),
            Section::Skills => $op(&mut $record.skills, $section, $($arg),*),
            Section::Languages => $op(&mut $record.languages, $section, $($arg),*),
            Section::Projects => $op(&mut $record.projects, $section, $($arg),*),
            Section::Awards => $op(&mut $record.awards, $section, $($arg),*),
            Section::Certifications => $op(&mut $record.certifications, $section, $($arg),*),
            Section::Volunteer => $op(&mut $record.volunteer, $section, $($arg),*),
            Section::Publications => $op(&mut $record.publications, $section, $($arg),*),
            Section::References => $op(&mut $record.references, $section, $($arg),*),
        }
    };
}

/// Applies one mutation. On error the record is left unchanged.
pub fn apply_mutation(record: &mut ResumeRecord, mutation: RecordMutation) -> Result<(), MutationError> {
    match mutation {
        RecordMutation::SetPersonal { field, value } => {
            *field.slot(&mut record.personal_info) = value;
            Ok(())
        }
        RecordMutation::AddSocialLink { url } => {
            record.personal_info.social_links.push(url);
            Ok(())
        }
        RecordMutation::RemoveSocialLink { index } => {
            let links = &mut record.personal_info.social_links;
            if index >= links.len() {
                return Err(MutationError::IndexOutOfRange {
                    section: "socialLinks".to_string(),
                    index,
                    len: links.len(),
                });
            }
            links.remove(index);
            Ok(())
        }
        RecordMutation::SetTemplate { template } => {
            record.template = template;
            Ok(())
        }
        RecordMutation::AppendEntry { section, entry } => {
            on_list!(record, section, append_entry(entry))
        }
        RecordMutation::UpdateEntry {
            section,
            index,
            entry,
        } => on_list!(record, section, update_entry(index, entry)),
        RecordMutation::RemoveEntry { section, index } => {
            on_list!(record, section, remove_entry(index))
        }
    }
}

fn section_name(section: Section) -> String {
    serde_json::to_value(section)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{section:?}"))
}

fn parse_entry<T: DeserializeOwned>(section: Section, entry: Value) -> Result<T, MutationError> {
    serde_json::from_value(entry).map_err(|e| MutationError::InvalidEntry {
        section: section_name(section),
        message: e.to_string(),
    })
}

fn check_index<T>(list: &[T], section: Section, index: usize) -> Result<(), MutationError> {
    if index < list.len() {
        Ok(())
    } else {
        Err(MutationError::IndexOutOfRange {
            section: section_name(section),
            index,
            len: list.len(),
        })
    }
}

fn append_entry<T: DeserializeOwned + Default>(
    list: &mut Vec<T>,
    section: Section,
    entry: Option<Value>,
) -> Result<(), MutationError> {
    let item = match entry {
        Some(value) => parse_entry(section, value)?,
        None => T::default(),
    };
    list.push(item);
    Ok(())
}

fn update_entry<T: DeserializeOwned>(
    list: &mut [T],
    section: Section,
    index: usize,
    entry: Value,
) -> Result<(), MutationError> {
    check_index(list, section, index)?;
    list[index] = parse_entry(section, entry)?;
    Ok(())
}

fn remove_entry<T>(list: &mut Vec<T>, section: Section, index: usize) -> Result<(), MutationError> {
    check_index(list, section, index)?;
    list.remove(index);
    Ok(())
}
