use serde::{Deserialize, Deserializer};

use crate::services::artist::ArtistInput;
use crate::services::venue::VenueInput;

/// Multi-select choices offered by the venue/artist forms. None of these
/// contain a comma, which keeps the comma-joined storage unambiguous.
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// HTML checkboxes post a value only when ticked; any posted value means true.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.is_some())
}

fn required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("missing required field: {field}"))
    } else {
        Ok(())
    }
}

fn known_state(state: &str) -> Result<(), String> {
    if STATE_CHOICES.contains(&state) {
        Ok(())
    } else {
        Err(format!("unknown state: {state}"))
    }
}

fn known_genres(genres: &[String]) -> Result<(), String> {
    for genre in genres {
        if !GENRE_CHOICES.contains(&genre.as_str()) {
            return Err(format!("unknown genre: {genre}"));
        }
    }
    Ok(())
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[derive(Debug, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: String,
}

impl VenueForm {
    pub fn validate(&self) -> Result<(), String> {
        required(&self.name, "name")?;
        required(&self.city, "city")?;
        required(&self.state, "state")?;
        required(&self.address, "address")?;
        required(&self.phone, "phone")?;
        required(&self.image_link, "image_link")?;
        known_state(&self.state)?;
        known_genres(&self.genre)
    }

    pub fn into_input(self) -> VenueInput {
        VenueInput {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genre: self.genre,
            image_link: self.image_link,
            facebook_link: optional(self.facebook_link),
            website_link: optional(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<(), String> {
        required(&self.name, "name")?;
        required(&self.city, "city")?;
        required(&self.state, "state")?;
        required(&self.phone, "phone")?;
        required(&self.facebook_link, "facebook_link")?;
        required(&self.image_link, "image_link")?;
        required(&self.website_link, "website_link")?;
        known_state(&self.state)?;
        known_genres(&self.genres)
    }

    pub fn into_input(self) -> ArtistInput {
        ArtistInput {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website_link: self.website_link,
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

impl ShowForm {
    pub fn parse(&self) -> Result<(i64, i64, chrono::NaiveDateTime), String> {
        let artist_id = self
            .artist_id
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("artist_id is not a valid id: {}", self.artist_id))?;
        let venue_id = self
            .venue_id
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("venue_id is not a valid id: {}", self.venue_id))?;
        let start_time = crate::date_format::parse_datetime(self.start_time.trim())
            .ok_or_else(|| format!("start_time is not a valid timestamp: {}", self.start_time))?;
        Ok((artist_id, venue_id, start_time))
    }
}

/// A one-shot notice carried across a redirect in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub flash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genre: vec!["Jazz".to_string()],
            image_link: "https://example.com/hop.jpg".to_string(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_talent: false,
            seeking_description: String::new(),
        }
    }

    #[test]
    fn venue_form_requires_image_link() {
        let form = VenueForm {
            image_link: String::new(),
            ..venue_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            "missing required field: image_link"
        );
    }

    #[test]
    fn venue_form_rejects_unknown_state_and_genre() {
        let form = VenueForm {
            state: "ZZ".to_string(),
            ..venue_form()
        };
        assert_eq!(form.validate().unwrap_err(), "unknown state: ZZ");

        let form = VenueForm {
            genre: vec!["Polka".to_string()],
            ..venue_form()
        };
        assert_eq!(form.validate().unwrap_err(), "unknown genre: Polka");
    }

    #[test]
    fn empty_optional_fields_become_none() {
        let input = venue_form().into_input();
        assert_eq!(input.facebook_link, None);
        assert_eq!(input.website_link, None);
        assert_eq!(input.seeking_description, None);
    }

    #[test]
    fn checkbox_is_true_for_any_posted_value() {
        let form: VenueForm =
            serde_html_form::from_str("name=x&seeking_talent=y").unwrap();
        assert!(form.seeking_talent);

        let form: VenueForm = serde_html_form::from_str("name=x").unwrap();
        assert!(!form.seeking_talent);
    }

    #[test]
    fn repeated_genre_keys_collect_into_a_list() {
        let form: VenueForm =
            serde_html_form::from_str("genre=Jazz&genre=Folk&genre=Heavy+Metal").unwrap();
        assert_eq!(form.genre, vec!["Jazz", "Folk", "Heavy Metal"]);
    }

    #[test]
    fn show_form_parses_ids_and_timestamp() {
        let form = ShowForm {
            artist_id: "4".to_string(),
            venue_id: "7".to_string(),
            start_time: "2026-06-01 21:30:00".to_string(),
        };
        let (artist_id, venue_id, start_time) = form.parse().unwrap();
        assert_eq!((artist_id, venue_id), (4, 7));
        assert_eq!(start_time.format("%H:%M").to_string(), "21:30");

        let bad = ShowForm {
            artist_id: "abc".to_string(),
            ..form
        };
        assert!(bad.parse().unwrap_err().contains("artist_id"));
    }
}
