use crate::entities::{articles, prelude::*};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::info;

const SAMPLE_ARTICLES: &[(&str, &str, &str, (i32, u32, u32))] = &[
    (
        "Welcome",
        "This is my personal blog. I post here from time to time: notes on life, ideas, \
         and things I am learning. Thanks for stopping by!",
        "This is my personal blog. I post here from time to time...",
        (2025, 9, 25),
    ),
    (
        "Writing posts in Markdown",
        "Posts are stored as **Markdown**.\n\n### Headings\n\nUse `#` for headings.\n\n\
         ### Images\n\nUpload an image through `/api/upload` and paste the returned URL:\n\n\
         ```\n![caption](https://example.com/uploads/file_1700000000000_42.png)\n```",
        "Posts are stored as Markdown...",
        (2025, 9, 26),
    ),
];

/// Inserts the sample articles when the articles table is empty.
/// Returns how many rows were written.
pub async fn seed_sample_articles(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let existing = Articles::find().count(db).await?;
    if existing > 0 {
        info!("🌱 Skipping sample data: {} articles already present", existing);
        return Ok(0);
    }

    info!("🌱 Seeding sample articles...");

    let now = Utc::now();
    let mut models = Vec::with_capacity(SAMPLE_ARTICLES.len());
    for (title, content, summary, (y, m, d)) in SAMPLE_ARTICLES {
        let date = NaiveDate::from_ymd_opt(*y, *m, *d)
            .ok_or_else(|| anyhow::anyhow!("invalid sample date {}-{}-{}", y, m, d))?;
        models.push(articles::ActiveModel {
            title: Set(title.to_string()),
            content: Set(content.to_string()),
            summary: Set(Some(summary.to_string())),
            date: Set(date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }

    let count = models.len();
    Articles::insert_many(models).exec(db).await?;

    info!("✅ Inserted {} sample articles", count);
    Ok(count)
}
