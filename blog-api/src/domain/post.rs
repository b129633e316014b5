use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// Author of a post. Both name parts are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl Author {
    /// Builds an author from the two name parts received on the wire.
    pub(crate) fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: require_name("author.firstName", &first_name.into())?,
            last_name: require_name("author.lastName", &last_name.into())?,
        })
    }

    /// Flattened form exposed to clients: `"<first> <last>"`.
    pub(crate) fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Option<Author>,
    pub(crate) created: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<Author>,
        created: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = require_title(&title.into())?;

        Ok(Self {
            id,
            title,
            content: content.into(),
            author,
            created,
        })
    }

    pub(crate) fn author_name(&self) -> String {
        self.author
            .as_ref()
            .map(Author::display_name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Option<Author>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: require_title(&self.title)?,
            content: self.content,
            author: self.author.map(revalidate_author).transpose()?,
        })
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<Author>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self.title.as_deref().map(require_title).transpose()?,
            content: self.content,
            author: self.author.map(revalidate_author).transpose()?,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

fn revalidate_author(author: Author) -> Result<Author, DomainError> {
    Author::new(author.first_name, author.last_name)
}

/// Rejects blank titles; accepted titles are stored exactly as supplied.
fn require_title(title: &str) -> Result<String, DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        });
    }
    Ok(title.to_string())
}

fn require_name(field: &'static str, name: &str) -> Result<String, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(name.to_string())
}
