use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, TransactionTrait,
};

use crate::database::Database;
use crate::date_format::{DisplayFormat, format_timestamp};
use crate::entities;
use crate::genres;
use crate::services::{SearchMatch, SearchResults, ServiceError, ServiceResult};

/// Validated field set for creating or editing a venue.
#[derive(Debug, Clone)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genre: Vec<String>,
    pub image_link: String,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VenueOverview {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one distinct (city, state) pair.
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueOverview>,
}

/// Display fields of the artist playing one show at this venue.
#[derive(Debug, Clone)]
pub struct ArtistShowing {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: entities::venue::VenuePayload,
    pub past_shows: Vec<ArtistShowing>,
    pub upcoming_shows: Vec<ArtistShowing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub struct VenueService {
    db: Arc<Database>,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Group every venue by its distinct (city, state) pair, counting shows
    /// strictly after `now` per venue. Group and in-group order follow the
    /// scan order of the table.
    pub async fn list_grouped(&self, now: NaiveDateTime) -> ServiceResult<Vec<CityGroup>> {
        let venues = entities::venue::Entity::find().all(&self.db.conn).await?;

        let mut groups: Vec<CityGroup> = Vec::new();
        for venue in venues {
            let num_upcoming_shows = entities::show::Entity::find()
                .filter(entities::show::Column::VenueId.eq(venue.id))
                .filter(entities::show::Column::StartTime.gt(now))
                .count(&self.db.conn)
                .await?;

            let idx = match groups
                .iter()
                .position(|g| g.city == venue.city && g.state == venue.state)
            {
                Some(idx) => idx,
                None => {
                    groups.push(CityGroup {
                        city: venue.city.clone(),
                        state: venue.state.clone(),
                        venues: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            groups[idx].venues.push(VenueOverview {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            });
        }

        Ok(groups)
    }

    /// Case-insensitive substring match against the name column only. An empty
    /// term matches every venue.
    pub async fn search(&self, term: &str) -> ServiceResult<SearchResults> {
        let venues = entities::venue::Entity::find()
            .filter(entities::venue::Column::Name.contains(term))
            .all(&self.db.conn)
            .await?;

        let data: Vec<SearchMatch> = venues
            .into_iter()
            .map(|v| SearchMatch {
                id: v.id,
                name: v.name,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    pub async fn get(&self, venue_id: i64) -> ServiceResult<entities::venue::Model> {
        entities::venue::Entity::find_by_id(venue_id)
            .one(&self.db.conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Fetch one venue and partition its shows around `now`. A show starting
    /// exactly at `now` is upcoming, not past.
    pub async fn get_detail(&self, venue_id: i64, now: NaiveDateTime) -> ServiceResult<VenueDetail> {
        let venue = self.get(venue_id).await?;

        let shows = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .find_also_related(entities::artist::Entity)
            .all(&self.db.conn)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, artist) in shows {
            // The FK guarantees the artist row exists
            let artist = artist.ok_or(ServiceError::NotFound)?;
            let showing = ArtistShowing {
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: format_timestamp(&show.start_time, DisplayFormat::Medium),
            };
            if show.start_time < now {
                past_shows.push(showing);
            } else {
                upcoming_shows.push(showing);
            }
        }

        Ok(VenueDetail {
            venue: venue.to_payload(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn create(&self, input: VenueInput) -> ServiceResult<entities::venue::Model> {
        let txn = self.db.conn.begin().await?;

        let venue = entities::venue::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(input.name),
            city: ActiveValue::Set(input.city),
            state: ActiveValue::Set(input.state),
            address: ActiveValue::Set(input.address),
            phone: ActiveValue::Set(input.phone),
            genre: ActiveValue::Set(Some(genres::join(&input.genre))),
            facebook_link: ActiveValue::Set(input.facebook_link),
            image_link: ActiveValue::Set(input.image_link),
            website_link: ActiveValue::Set(input.website_link),
            seeking_talent: ActiveValue::Set(input.seeking_talent),
            seeking_description: ActiveValue::Set(input.seeking_description),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!("Venue created: '{}' (ID: {})", venue.name, venue.id);
        Ok(venue)
    }

    pub async fn update(
        &self,
        venue_id: i64,
        input: VenueInput,
    ) -> ServiceResult<entities::venue::Model> {
        let txn = self.db.conn.begin().await?;

        let venue = entities::venue::Entity::find_by_id(venue_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let mut active: entities::venue::ActiveModel = venue.into();
        active.name = ActiveValue::Set(input.name);
        active.city = ActiveValue::Set(input.city);
        active.state = ActiveValue::Set(input.state);
        active.address = ActiveValue::Set(input.address);
        active.phone = ActiveValue::Set(input.phone);
        active.genre = ActiveValue::Set(Some(genres::join(&input.genre)));
        active.facebook_link = ActiveValue::Set(input.facebook_link);
        active.image_link = ActiveValue::Set(input.image_link);
        active.website_link = ActiveValue::Set(input.website_link);
        active.seeking_talent = ActiveValue::Set(input.seeking_talent);
        active.seeking_description = ActiveValue::Set(input.seeking_description);
        let venue = active.update(&txn).await?;

        txn.commit().await?;
        log::info!("Venue updated: '{}' (ID: {})", venue.name, venue.id);
        Ok(venue)
    }

    /// Delete a venue; its shows go with it via the FK cascade. Returns the
    /// deleted venue's name for the flash message.
    pub async fn delete(&self, venue_id: i64) -> ServiceResult<String> {
        let txn = self.db.conn.begin().await?;

        let venue = entities::venue::Entity::find_by_id(venue_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound)?;
        let name = venue.name.clone();
        venue.delete(&txn).await?;

        txn.commit().await?;
        log::info!("Venue deleted: '{}' (ID: {})", name, venue_id);
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::show::ShowService;
    use crate::test_utils::{sample_artist, sample_venue, test_db};
    use chrono::{Duration, Utc};

    fn hop_input() -> VenueInput {
        VenueInput {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genre: vec!["Jazz".to_string(), "Folk".to_string()],
            image_link: "https://example.com/hop.jpg".to_string(),
            facebook_link: None,
            website_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring_on_name() {
        let db = test_db().await;
        let service = VenueService::new(db);
        let hop = service.create(hop_input()).await.unwrap();
        let park = service
            .create(VenueInput {
                name: "Park Square Live Music & Coffee".to_string(),
                city: "San Francisco".to_string(),
                ..hop_input()
            })
            .await
            .unwrap();

        let results = service.search("hop").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, hop.id);
        assert_eq!(results.data[0].name, "The Musical Hop");

        let results = service.search("Music").await.unwrap();
        assert_eq!(results.count, 2);
        let names: Vec<&str> = results.data.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"The Musical Hop"));
        assert!(names.contains(&"Park Square Live Music & Coffee"));
        let _ = park;
    }

    #[tokio::test]
    async fn empty_search_term_matches_all_venues() {
        let db = test_db().await;
        let service = VenueService::new(db);
        service.create(hop_input()).await.unwrap();
        service
            .create(VenueInput {
                name: "The Dueling Pianos Bar".to_string(),
                ..hop_input()
            })
            .await
            .unwrap();

        let results = service.search("").await.unwrap();
        assert_eq!(results.count, 2);
    }

    #[tokio::test]
    async fn listing_groups_by_city_state_and_counts_strictly_upcoming() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let sf = venues.create(hop_input()).await.unwrap();
        let nyc = venues
            .create(VenueInput {
                name: "The Dueling Pianos Bar".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                ..hop_input()
            })
            .await
            .unwrap();
        let artist = sample_artist(&db, "Guns N Petals").await;

        let now = Utc::now().naive_utc();
        shows
            .create(artist.id, sf.id, now + Duration::hours(2))
            .await
            .unwrap();
        shows
            .create(artist.id, sf.id, now - Duration::hours(2))
            .await
            .unwrap();
        // exactly `now` is not strictly after it
        shows.create(artist.id, nyc.id, now).await.unwrap();

        let groups = venues.list_grouped(now).await.unwrap();
        assert_eq!(groups.len(), 2);
        let sf_group = groups
            .iter()
            .find(|g| g.city == "San Francisco" && g.state == "CA")
            .unwrap();
        assert_eq!(sf_group.venues.len(), 1);
        assert_eq!(sf_group.venues[0].num_upcoming_shows, 1);
        let ny_group = groups
            .iter()
            .find(|g| g.city == "New York" && g.state == "NY")
            .unwrap();
        assert_eq!(ny_group.venues[0].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn detail_partitions_shows_with_now_counted_upcoming() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let venue = venues.create(hop_input()).await.unwrap();
        let artist = sample_artist(&db, "Guns N Petals").await;

        let now = Utc::now().naive_utc();
        shows
            .create(artist.id, venue.id, now - Duration::days(1))
            .await
            .unwrap();
        shows.create(artist.id, venue.id, now).await.unwrap();
        shows
            .create(artist.id, venue.id, now + Duration::days(1))
            .await
            .unwrap();

        let detail = venues.get_detail(venue.id, now).await.unwrap();
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
        assert_eq!(detail.venue.genre, vec!["Jazz", "Folk"]);
    }

    #[tokio::test]
    async fn detail_of_missing_venue_is_not_found() {
        let db = test_db().await;
        let service = VenueService::new(db);
        let err = service
            .get_detail(999, Utc::now().naive_utc())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_cascades_to_shows() {
        let db = test_db().await;
        let venues = VenueService::new(db.clone());
        let shows = ShowService::new(db.clone());

        let venue = venues.create(hop_input()).await.unwrap();
        let other = sample_venue(&db, "Park Square Live Music & Coffee").await;
        let artist = sample_artist(&db, "Guns N Petals").await;

        let now = Utc::now().naive_utc();
        shows.create(artist.id, venue.id, now).await.unwrap();
        shows.create(artist.id, other.id, now).await.unwrap();

        let name = venues.delete(venue.id).await.unwrap();
        assert_eq!(name, "The Musical Hop");

        let listings = shows.list().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].venue_id, other.id);
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_genre_string() {
        let db = test_db().await;
        let service = VenueService::new(db);
        let venue = service.create(hop_input()).await.unwrap();

        let updated = service
            .update(
                venue.id,
                VenueInput {
                    name: "The Musical Hop (Renovated)".to_string(),
                    genre: vec!["Blues".to_string()],
                    seeking_talent: true,
                    seeking_description: Some("Looking for blues acts".to_string()),
                    ..hop_input()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "The Musical Hop (Renovated)");
        assert_eq!(updated.genre.as_deref(), Some("Blues"));
        assert!(updated.seeking_talent);

        let err = service.update(999, hop_input()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }
}
