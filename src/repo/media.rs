use sqlx::PgExecutor;

use uuid::Uuid;

/// An asset accepted by the upload sink, ready to record
#[derive(Debug)]
pub struct NewMediaAsset {
    pub url: String,
    pub public_id: String,
    pub mime_type: String,
    pub size: i64,
    pub source_filename: String,
}

/// Stored media row. Referenced, never owned, by course registrations.
#[derive(Debug, sqlx::FromRow)]
pub struct MediaAssetRecord {
    pub id: Uuid,
    pub url: String,
    pub public_id: String,
    pub mime_type: String,
    pub size: i64,
    pub source_filename: String,
}

/// Repository for the media collection
pub struct MediaRepo;

impl MediaRepo {
    #[tracing::instrument(name = "Insert media asset", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        asset: &NewMediaAsset,
    ) -> sqlx::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into media(url, public_id, mime_type, size, source_filename) \
             values ($1, $2, $3, $4, $5) returning id",
        )
        .bind(&asset.url)
        .bind(&asset.public_id)
        .bind(&asset.mime_type)
        .bind(asset.size)
        .bind(&asset.source_filename)
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch media asset by id", skip(executor))]
    pub async fn find_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<MediaAssetRecord>> {
        sqlx::query_as::<_, MediaAssetRecord>(
            "select id, url, public_id, mime_type, size, source_filename from media where id=$1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
