use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, Database as SeaDatabase};

use crate::database::Database;
use crate::entities;

pub async fn test_db() -> Arc<Database> {
    let conn = SeaDatabase::connect("sqlite::memory:").await.unwrap();

    // Enable foreign keys
    conn.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();

    migration::Migrator::up(&conn, None).await.unwrap();

    Arc::new(Database { conn })
}

pub async fn sample_venue(db: &Database, name: &str) -> entities::venue::Model {
    entities::venue::ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        city: ActiveValue::Set("San Francisco".to_string()),
        state: ActiveValue::Set("CA".to_string()),
        address: ActiveValue::Set("1015 Folsom Street".to_string()),
        phone: ActiveValue::Set("123-123-1234".to_string()),
        genre: ActiveValue::Set(Some("Jazz".to_string())),
        facebook_link: ActiveValue::Set(None),
        image_link: ActiveValue::Set("https://example.com/venue.jpg".to_string()),
        website_link: ActiveValue::Set(None),
        seeking_talent: ActiveValue::Set(false),
        seeking_description: ActiveValue::Set(None),
    }
    .insert(&db.conn)
    .await
    .unwrap()
}

pub async fn sample_artist(db: &Database, name: &str) -> entities::artist::Model {
    entities::artist::ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        city: ActiveValue::Set("San Francisco".to_string()),
        state: ActiveValue::Set("CA".to_string()),
        phone: ActiveValue::Set("326-123-5000".to_string()),
        genres: ActiveValue::Set(Some("Rock n Roll".to_string())),
        facebook_link: ActiveValue::Set("https://facebook.com/artist".to_string()),
        image_link: ActiveValue::Set("https://example.com/artist.jpg".to_string()),
        website_link: ActiveValue::Set("https://example.com".to_string()),
        seeking_venue: ActiveValue::Set(false),
        seeking_description: ActiveValue::Set(None),
    }
    .insert(&db.conn)
    .await
    .unwrap()
}
