use anyhow::{Result, bail};
use tracing::info;

use tripstats::news::{NewNews, NewsItem};
use tripstats::news_repo::NewsRepository;
use tripstats::web::PgPool;

pub async fn handle_news_list(pool: PgPool, owner: &str) -> Result<()> {
    let items: Vec<NewsItem> = NewsRepository::new(pool)
        .list()
        .await?
        .into_iter()
        .map(|news| NewsItem::from_news(news, owner))
        .collect();

    info!("{} news item(s)", items.len());
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

pub async fn handle_news_add(
    pool: PgPool,
    username: String,
    title: String,
    content: String,
) -> Result<()> {
    let news = NewsRepository::new(pool)
        .insert(&NewNews::new(title, content, username))
        .await?;

    println!("{}", serde_json::to_string_pretty(&news)?);
    Ok(())
}

pub async fn handle_news_edit(pool: PgPool, id: i32, title: String, content: String) -> Result<()> {
    match NewsRepository::new(pool).update(id, &title, &content).await? {
        Some(news) => {
            info!("Updated news item {}", news.id);
            println!("{}", serde_json::to_string_pretty(&news)?);
            Ok(())
        }
        None => bail!("News item {} not found", id),
    }
}

pub async fn handle_news_delete(pool: PgPool, id: i32) -> Result<()> {
    if !NewsRepository::new(pool).delete(id).await? {
        bail!("News item {} not found", id);
    }
    info!("Deleted news item {}", id);
    Ok(())
}
