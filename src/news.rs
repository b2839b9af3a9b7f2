use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news item stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Author of the news item
    pub username: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Fields supplied by the author when posting a news item.
/// Identity and timestamps are assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub username: String,
}

impl NewNews {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            username: username.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_text(&self.title, &self.content)?;
        if self.username.trim().is_empty() {
            bail!("News author must not be empty");
        }
        Ok(())
    }
}

/// Title and content are required on both insert and edit
pub fn validate_text(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("News title must not be empty");
    }
    if content.trim().is_empty() {
        bail!("News content must not be empty");
    }
    Ok(())
}

/// News item as shown to readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// "admin" for items posted by the site owner, the author's username otherwise
    pub author_display: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl NewsItem {
    pub fn from_news(news: News, owner: &str) -> Self {
        let author_display = if news.username == owner {
            "admin".to_string()
        } else {
            news.username
        };

        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            author_display,
            created: news.created,
            last_modified: news.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(username: &str) -> News {
        let now = Utc::now();
        News {
            id: 7,
            title: "Maintenance".to_string(),
            content: "The site will be down tonight".to_string(),
            username: username.to_string(),
            created: now,
            last_modified: now,
        }
    }

    #[test]
    fn test_owner_is_displayed_as_admin() {
        let item = NewsItem::from_news(news("pierre"), "pierre");
        assert_eq!(item.author_display, "admin");
        assert_eq!(item.id, 7);
    }

    #[test]
    fn test_other_authors_keep_their_username() {
        let item = NewsItem::from_news(news("alice"), "pierre");
        assert_eq!(item.author_display, "alice");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(NewNews::new("Title", "Body", "alice").validate().is_ok());

        let err = NewNews::new("  ", "Body", "alice").validate().unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = NewNews::new("Title", "\n", "alice").validate().unwrap_err();
        assert!(err.to_string().contains("content"));

        let err = NewNews::new("Title", "Body", "").validate().unwrap_err();
        assert!(err.to_string().contains("author"));
    }
}
