use anyhow::Result;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, info};

use crate::news::{NewNews, News, validate_text};
use crate::web::PgPool;

// Diesel model for inserting news; id and timestamps come from column defaults
#[derive(Insertable)]
#[diesel(table_name = crate::schema::news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct NewNewsRow {
    title: String,
    content: String,
    username: String,
}

impl From<&NewNews> for NewNewsRow {
    fn from(item: &NewNews) -> Self {
        Self {
            title: item.title.clone(),
            content: item.content.clone(),
            username: item.username.clone(),
        }
    }
}

// Diesel model for querying news
#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::schema::news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct NewsRow {
    id: i32,
    title: String,
    content: String,
    username: String,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            username: row.username,
            created: row.created,
            last_modified: row.last_modified,
        }
    }
}

#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All news items, newest first
    pub async fn list(&self) -> Result<Vec<News>> {
        use crate::schema::news::dsl::*;

        let pool = self.pool.clone();

        let rows = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let rows: Vec<NewsRow> = news
                .order((created.desc(), id.desc()))
                .select(NewsRow::as_select())
                .load(&mut conn)?;
            Ok::<Vec<NewsRow>, anyhow::Error>(rows)
        })
        .await??;

        Ok(rows.into_iter().map(News::from).collect())
    }

    pub async fn get(&self, news_id: i32) -> Result<Option<News>> {
        use crate::schema::news::dsl::*;

        let pool = self.pool.clone();

        let row = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let row: Option<NewsRow> = news
                .find(news_id)
                .select(NewsRow::as_select())
                .first(&mut conn)
                .optional()?;
            Ok::<Option<NewsRow>, anyhow::Error>(row)
        })
        .await??;

        Ok(row.map(News::from))
    }

    /// Insert a news item and return it with its assigned id and timestamps
    pub async fn insert(&self, item: &NewNews) -> Result<News> {
        use crate::schema::news::dsl::*;

        item.validate()?;
        let new_row = NewNewsRow::from(item);
        let pool = self.pool.clone();

        let row = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let row: NewsRow = diesel::insert_into(news)
                .values(&new_row)
                .returning(NewsRow::as_returning())
                .get_result(&mut conn)?;
            Ok::<NewsRow, anyhow::Error>(row)
        })
        .await??;

        info!("Created news item {} by {}", row.id, row.username);
        Ok(News::from(row))
    }

    /// Replace title and content of a news item, bumping `last_modified`.
    /// Returns None if the item does not exist.
    pub async fn update(
        &self,
        news_id: i32,
        new_title: &str,
        new_content: &str,
    ) -> Result<Option<News>> {
        use crate::schema::news::dsl::*;

        validate_text(new_title, new_content)?;
        let new_title = new_title.to_string();
        let new_content = new_content.to_string();
        let pool = self.pool.clone();

        let row = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let row: Option<NewsRow> = diesel::update(news.find(news_id))
                .set((
                    title.eq(new_title),
                    content.eq(new_content),
                    last_modified.eq(diesel::dsl::now),
                ))
                .returning(NewsRow::as_returning())
                .get_result(&mut conn)
                .optional()?;
            Ok::<Option<NewsRow>, anyhow::Error>(row)
        })
        .await??;

        debug!("Updated news item {}: found={}", news_id, row.is_some());
        Ok(row.map(News::from))
    }

    /// Delete a news item. Returns whether a row was removed.
    pub async fn delete(&self, news_id: i32) -> Result<bool> {
        use crate::schema::news::dsl::*;

        let pool = self.pool.clone();

        let deleted = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let deleted = diesel::delete(news.find(news_id)).execute(&mut conn)?;
            Ok::<usize, anyhow::Error>(deleted)
        })
        .await??;

        debug!("Deleted news item {}: rows={}", news_id, deleted);
        Ok(deleted > 0)
    }
}
