//! Post form validation.
//!
//! Rules, checked in field order:
//! 1. `text` must be non-empty after trimming; the stored text is trimmed.
//! 2. `group`, when given, must be a group id that references an existing
//!    group.

use super::entities::{Group, PostDraft};
use super::errors::ValidationError;
use super::value_objects::GroupId;

/// Group selection as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupChoice {
    #[default]
    None,
    Id(GroupId),
    /// Neither empty nor a group id; rejected during validation.
    Invalid(String),
}

impl GroupChoice {
    /// Read a raw `group` field. Empty means no group.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => GroupChoice::None,
            raw => raw
                .parse::<GroupId>()
                .map(GroupChoice::Id)
                .unwrap_or_else(|_| GroupChoice::Invalid(raw.to_string())),
        }
    }
}

impl From<Option<GroupId>> for GroupChoice {
    fn from(group: Option<GroupId>) -> Self {
        group.map_or(GroupChoice::None, GroupChoice::Id)
    }
}

/// Submitted post form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostForm {
    pub text: String,
    pub group: GroupChoice,
}

impl PostForm {
    pub fn new(text: impl Into<String>, group: Option<GroupId>) -> Self {
        Self {
            text: text.into(),
            group: group.into(),
        }
    }

    /// Build from raw form fields without judging them.
    pub fn from_raw(text: impl Into<String>, group: &str) -> Self {
        Self {
            text: text.into(),
            group: GroupChoice::parse(group),
        }
    }

    /// Group id to look up before validation, if any.
    pub fn requested_group(&self) -> Option<GroupId> {
        match self.group {
            GroupChoice::Id(id) => Some(id),
            _ => None,
        }
    }
}

/// Validate `form` against the group the store resolved for `form.group`.
///
/// `resolved_group` must be the store's answer for
/// [`PostForm::requested_group`] (or `None` when no group was requested).
pub fn validate_post_form(
    form: &PostForm,
    resolved_group: Option<&Group>,
) -> Result<PostDraft, ValidationError> {
    let text = form.text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let group = match &form.group {
        GroupChoice::None => None,
        GroupChoice::Invalid(raw) => return Err(ValidationError::InvalidGroupChoice(raw.clone())),
        GroupChoice::Id(requested) => match resolved_group {
            Some(group) if group.id == *requested => Some(group.id),
            _ => return Err(ValidationError::UnknownGroup(*requested)),
        },
    };

    Ok(PostDraft {
        text: text.to_string(),
        group,
    })
}
