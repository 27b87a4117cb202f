use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, TransactionTrait};

use crate::database::Database;
use crate::entities;
use crate::services::{ServiceError, ServiceResult};

/// One row of the shows listing, with both partners' display fields attached.
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<ShowListing>> {
        let shows = entities::show::Entity::find().all(&self.db.conn).await?;

        let mut listings = Vec::new();
        for show in shows {
            let venue = entities::venue::Entity::find_by_id(show.venue_id)
                .one(&self.db.conn)
                .await?
                .ok_or(ServiceError::NotFound)?;
            let artist = entities::artist::Entity::find_by_id(show.artist_id)
                .one(&self.db.conn)
                .await?
                .ok_or(ServiceError::NotFound)?;

            listings.push(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: show.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            });
        }

        Ok(listings)
    }

    /// Insert a show after verifying both referenced records exist, so a bad id
    /// reports as not-found instead of a constraint failure.
    pub async fn create(
        &self,
        artist_id: i64,
        venue_id: i64,
        start_time: NaiveDateTime,
    ) -> ServiceResult<entities::show::Model> {
        let txn = self.db.conn.begin().await?;

        if entities::artist::Entity::find_by_id(artist_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound);
        }
        if entities::venue::Entity::find_by_id(venue_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound);
        }

        let show = entities::show::ActiveModel {
            id: ActiveValue::NotSet,
            artist_id: ActiveValue::Set(artist_id),
            venue_id: ActiveValue::Set(venue_id),
            start_time: ActiveValue::Set(start_time),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!(
            "Show created: artist {} at venue {} on {}",
            artist_id,
            venue_id,
            start_time
        );
        Ok(show)
    }
}
