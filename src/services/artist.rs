use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::database::Database;
use crate::date_format::{DisplayFormat, format_timestamp};
use crate::entities;
use crate::genres;
use crate::services::{SearchMatch, SearchResults, ServiceError, ServiceResult};

/// Validated field set for creating or editing an artist.
#[derive(Debug, Clone)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Display fields of the venue hosting one of this artist's shows.
#[derive(Debug, Clone)]
pub struct VenueShowing {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: entities::artist::ArtistPayload,
    pub past_shows: Vec<VenueShowing>,
    pub upcoming_shows: Vec<VenueShowing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All artists, alphabetical by name, as (id, name) pairs.
    pub async fn list(&self) -> ServiceResult<Vec<SearchMatch>> {
        let artists = entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .all(&self.db.conn)
            .await?;

        Ok(artists
            .into_iter()
            .map(|a| SearchMatch {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    /// Case-insensitive substring match against the name column only. An empty
    /// term matches every artist.
    pub async fn search(&self, term: &str) -> ServiceResult<SearchResults> {
        let artists = entities::artist::Entity::find()
            .filter(entities::artist::Column::Name.contains(term))
            .all(&self.db.conn)
            .await?;

        let data: Vec<SearchMatch> = artists
            .into_iter()
            .map(|a| SearchMatch {
                id: a.id,
                name: a.name,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    pub async fn get(&self, artist_id: i64) -> ServiceResult<entities::artist::Model> {
        entities::artist::Entity::find_by_id(artist_id)
            .one(&self.db.conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Fetch one artist and partition their shows around `now`. A show starting
    /// exactly at `now` is upcoming, not past.
    pub async fn get_detail(
        &self,
        artist_id: i64,
        now: NaiveDateTime,
    ) -> ServiceResult<ArtistDetail> {
        let artist = self.get(artist_id).await?;

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .find_also_related(entities::venue::Entity)
            .all(&self.db.conn)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, venue) in shows {
            // The FK guarantees the venue row exists
            let venue = venue.ok_or(ServiceError::NotFound)?;
            let showing = VenueShowing {
                venue_id: venue.id,
                venue_name: venue.name,
                venue_image_link: venue.image_link,
                start_time: format_timestamp(&show.start_time, DisplayFormat::Medium),
            };
            if show.start_time < now {
                past_shows.push(showing);
            } else {
                upcoming_shows.push(showing);
            }
        }

        Ok(ArtistDetail {
            artist: artist.to_payload(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn create(&self, input: ArtistInput) -> ServiceResult<entities::artist::Model> {
        let txn = self.db.conn.begin().await?;

        let artist = entities::artist::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            city: ActiveValue::Set(input.city),
            state: ActiveValue::Set(input.state),
            phone: ActiveValue::Set(input.phone),
            genres: ActiveValue::Set(Some(genres::join(&input.genres))),
            facebook_link: ActiveValue::Set(input.facebook_link),
            image_link: ActiveValue::Set(input.image_link),
            website_link: ActiveValue::Set(input.website_link),
            seeking_venue: ActiveValue::Set(input.seeking_venue),
            seeking_description: ActiveValue::Set(input.seeking_description),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!("Artist created: '{}' (ID: {})", artist.name, artist.id);
        Ok(artist)
    }

    pub async fn update(
        &self,
        artist_id: i64,
        input: ArtistInput,
    ) -> ServiceResult<entities::artist::Model> {
        let txn = self.db.conn.begin().await?;

        let artist = entities::artist::Entity::find_by_id(artist_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let mut active: entities::artist::ActiveModel = artist.into();
        active.name = ActiveValue::Set(input.name);
        active.city = ActiveValue::Set(input.city);
        active.state = ActiveValue::Set(input.state);
        active.phone = ActiveValue::Set(input.phone);
        active.genres = ActiveValue::Set(Some(genres::join(&input.genres)));
        active.facebook_link = ActiveValue::Set(input.facebook_link);
        active.image_link = ActiveValue::Set(input.image_link);
        active.website_link = ActiveValue::Set(input.website_link);
        active.seeking_venue = ActiveValue::Set(input.seeking_venue);
        active.seeking_description = ActiveValue::Set(input.seeking_description);
        let artist = active.update(&txn).await?;

        txn.commit().await?;
        log::info!("Artist updated: '{}' (ID: {})", artist.name, artist.id);
        Ok(artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::show::ShowService;
    use crate::test_utils::{sample_venue, test_db};
    use chrono::{Duration, Utc};

    fn petals_input() -> ArtistInput {
        ArtistInput {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            facebook_link: "https://facebook.com/GunsNPetals".to_string(),
            image_link: "https://example.com/petals.jpg".to_string(),
            website_link: "https://gunsnpetalsband.com".to_string(),
            seeking_venue: true,
            seeking_description: Some("Looking for shows to perform".to_string()),
        }
    }

    #[tokio::test]
    async fn list_is_alphabetical_by_name() {
        let db = test_db().await;
        let service = ArtistService::new(db);
        service
            .create(ArtistInput {
                name: "The Wild Sax Band".to_string(),
                ..petals_input()
            })
            .await
            .unwrap();
        service.create(petals_input()).await.unwrap();
        service
            .create(ArtistInput {
                name: "Matt Quevado".to_string(),
                ..petals_input()
            })
            .await
            .unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(
            names,
            vec!["Guns N Petals", "Matt Quevado", "The Wild Sax Band"]
        );
    }

    #[tokio::test]
    async fn search_matches_substring_case_insensitively() {
        let db = test_db().await;
        let service = ArtistService::new(db);
        service.create(petals_input()).await.unwrap();
        service
            .create(ArtistInput {
                name: "The Wild Sax Band".to_string(),
                ..petals_input()
            })
            .await
            .unwrap();

        let results = service.search("band").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");
    }

    #[tokio::test]
    async fn detail_attaches_venue_display_fields() {
        let db = test_db().await;
        let artists = ArtistService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let artist = artists.create(petals_input()).await.unwrap();
        let venue = sample_venue(&db, "The Musical Hop").await;

        let now = Utc::now().naive_utc();
        shows
            .create(artist.id, venue.id, now + Duration::days(7))
            .await
            .unwrap();

        let detail = artists.get_detail(artist.id, now).await.unwrap();
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.upcoming_shows[0].venue_name, "The Musical Hop");
        assert_eq!(detail.artist.genres, vec!["Rock n Roll"]);
    }

    #[tokio::test]
    async fn detail_of_missing_artist_is_not_found() {
        let db = test_db().await;
        let service = ArtistService::new(db);
        let err = service
            .get_detail(42, Utc::now().naive_utc())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }
}
