//! Server-rendered pages. Handlers pass plain data in; these functions return
//! the HTML string for the response body.

use crate::entities::artist::ArtistPayload;
use crate::entities::venue::VenuePayload;
use crate::http_server::forms::{GENRE_CHOICES, STATE_CHOICES};
use crate::services::artist::ArtistDetail;
use crate::services::show::ShowListing;
use crate::services::venue::{CityGroup, VenueDetail};
use crate::services::{SearchMatch, SearchResults};

pub fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    let flash_banner = match flash {
        Some(message) => format!("<div class=\"flash\">{}</div>\n", escape(message)),
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Showbill</title></head>\n<body>\n\
         <nav><a href=\"/\">Home</a> <a href=\"/venues\">Venues</a> <a href=\"/artists\">Artists</a> <a href=\"/shows\">Shows</a></nav>\n\
         {flash_banner}{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn home_page(flash: Option<&str>) -> String {
    let body = "<h1>Showbill</h1>\n\
                <p>Find venues, artists and the shows that bring them together.</p>\n\
                <ul>\n\
                <li><a href=\"/venues/create\">List a venue</a></li>\n\
                <li><a href=\"/artists/create\">List an artist</a></li>\n\
                <li><a href=\"/shows/create\">List a show</a></li>\n\
                </ul>";
    layout("Home", flash, body)
}

pub fn venues_page(groups: &[CityGroup]) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    for group in groups {
        body.push_str(&format!(
            "<h2>{}, {}</h2>\n<ul>\n",
            escape(&group.city),
            escape(&group.state)
        ));
        for venue in &group.venues {
            body.push_str(&format!(
                "<li><a href=\"/venues/{}\">{}</a> ({} upcoming shows)</li>\n",
                venue.id,
                escape(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Venues", None, &body)
}

pub fn artists_page(artists: &[SearchMatch]) -> String {
    let mut body = String::from("<h1>Artists</h1>\n<ul>\n");
    for artist in artists {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a></li>\n",
            artist.id,
            escape(&artist.name)
        ));
    }
    body.push_str("</ul>");
    layout("Artists", None, &body)
}

pub fn search_results_page(kind: &str, term: &str, results: &SearchResults) -> String {
    let path = kind.to_lowercase();
    let mut body = format!(
        "<h1>Search {kind}</h1>\n<p>{} result(s) for &quot;{}&quot;</p>\n<ul>\n",
        results.count,
        escape(term)
    );
    for hit in &results.data {
        body.push_str(&format!(
            "<li><a href=\"/{path}/{}\">{}</a></li>\n",
            hit.id,
            escape(&hit.name)
        ));
    }
    body.push_str("</ul>");
    layout(&format!("Search {kind}"), None, &body)
}

pub fn venue_detail_page(detail: &VenueDetail, flash: Option<&str>) -> String {
    let venue = &detail.venue;
    let mut body = format!(
        "<h1>{}</h1>\n\
         <p>{}, {} - {}</p>\n\
         <p>Phone: {}</p>\n\
         <p>Genres: {}</p>\n\
         <img src=\"{}\" alt=\"{}\">\n",
        escape(&venue.name),
        escape(&venue.city),
        escape(&venue.state),
        escape(&venue.address),
        escape(&venue.phone),
        escape(&venue.genre.join(", ")),
        escape(&venue.image_link),
        escape(&venue.name),
    );
    if venue.seeking_talent {
        body.push_str(&format!(
            "<p>Seeking talent: {}</p>\n",
            escape(venue.seeking_description.as_deref().unwrap_or_default())
        ));
    }
    body.push_str(&format!(
        "<h2>Upcoming shows ({})</h2>\n<ul>\n",
        detail.upcoming_shows_count
    ));
    for show in &detail.upcoming_shows {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> - {}</li>\n",
            show.artist_id,
            escape(&show.artist_name),
            escape(&show.start_time)
        ));
    }
    body.push_str(&format!(
        "</ul>\n<h2>Past shows ({})</h2>\n<ul>\n",
        detail.past_shows_count
    ));
    for show in &detail.past_shows {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> - {}</li>\n",
            show.artist_id,
            escape(&show.artist_name),
            escape(&show.start_time)
        ));
    }
    body.push_str(&format!(
        "</ul>\n<p><a href=\"/venues/{id}/edit\">Edit</a> <a href=\"/venues/{id}/delete\">Delete</a></p>",
        id = venue.id
    ));
    layout(&venue.name, flash, &body)
}

pub fn artist_detail_page(detail: &ArtistDetail, flash: Option<&str>) -> String {
    let artist = &detail.artist;
    let mut body = format!(
        "<h1>{}</h1>\n\
         <p>{}, {}</p>\n\
         <p>Phone: {}</p>\n\
         <p>Genres: {}</p>\n\
         <img src=\"{}\" alt=\"{}\">\n",
        escape(&artist.name),
        escape(&artist.city),
        escape(&artist.state),
        escape(&artist.phone),
        escape(&artist.genres.join(", ")),
        escape(&artist.image_link),
        escape(&artist.name),
    );
    if artist.seeking_venue {
        body.push_str(&format!(
            "<p>Seeking venues: {}</p>\n",
            escape(artist.seeking_description.as_deref().unwrap_or_default())
        ));
    }
    body.push_str(&format!(
        "<h2>Upcoming shows ({})</h2>\n<ul>\n",
        detail.upcoming_shows_count
    ));
    for show in &detail.upcoming_shows {
        body.push_str(&format!(
            "<li><a href=\"/venues/{}\">{}</a> - {}</li>\n",
            show.venue_id,
            escape(&show.venue_name),
            escape(&show.start_time)
        ));
    }
    body.push_str(&format!(
        "</ul>\n<h2>Past shows ({})</h2>\n<ul>\n",
        detail.past_shows_count
    ));
    for show in &detail.past_shows {
        body.push_str(&format!(
            "<li><a href=\"/venues/{}\">{}</a> - {}</li>\n",
            show.venue_id,
            escape(&show.venue_name),
            escape(&show.start_time)
        ));
    }
    body.push_str(&format!(
        "</ul>\n<p><a href=\"/artists/{}/edit\">Edit</a></p>",
        artist.id
    ));
    layout(&artist.name, flash, &body)
}

pub fn shows_page(listings: &[ShowListing]) -> String {
    let mut body = String::from("<h1>Shows</h1>\n<ul>\n");
    for show in listings {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> at <a href=\"/venues/{}\">{}</a> - {}</li>\n",
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name),
            escape(&show.start_time)
        ));
    }
    body.push_str("</ul>");
    layout("Shows", None, &body)
}

fn text_field(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label} <input type=\"text\" name=\"{name}\" value=\"{}\"></label><br>\n",
        escape(value)
    )
}

fn state_select(selected: &str) -> String {
    let mut options = String::new();
    for state in STATE_CHOICES {
        let marker = if *state == selected { " selected" } else { "" };
        options.push_str(&format!("<option{marker}>{state}</option>"));
    }
    format!("<label>State <select name=\"state\">{options}</select></label><br>\n")
}

fn genre_select(field: &str, selected: &[String]) -> String {
    let mut options = String::new();
    for genre in GENRE_CHOICES {
        let marker = if selected.iter().any(|g| g == genre) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!("<option{marker}>{}</option>", escape(genre)));
    }
    format!(
        "<label>Genres <select name=\"{field}\" multiple>{options}</select></label><br>\n"
    )
}

fn checkbox_field(name: &str, label: &str, checked: bool) -> String {
    let marker = if checked { " checked" } else { "" };
    format!("<label>{label} <input type=\"checkbox\" name=\"{name}\" value=\"y\"{marker}></label><br>\n")
}

pub fn venue_form_page(action: &str, venue: Option<&VenuePayload>) -> String {
    let empty: &[String] = &[];
    let mut form = format!("<form method=\"post\" action=\"{action}\">\n");
    form.push_str(&text_field(
        "name",
        "Name",
        venue.map(|v| v.name.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "city",
        "City",
        venue.map(|v| v.city.as_str()).unwrap_or_default(),
    ));
    form.push_str(&state_select(
        venue.map(|v| v.state.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "address",
        "Address",
        venue.map(|v| v.address.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "phone",
        "Phone",
        venue.map(|v| v.phone.as_str()).unwrap_or_default(),
    ));
    form.push_str(&genre_select(
        "genre",
        venue.map(|v| v.genre.as_slice()).unwrap_or(empty),
    ));
    form.push_str(&text_field(
        "image_link",
        "Image link",
        venue.map(|v| v.image_link.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "facebook_link",
        "Facebook link",
        venue
            .and_then(|v| v.facebook_link.as_deref())
            .unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "website_link",
        "Website link",
        venue
            .and_then(|v| v.website_link.as_deref())
            .unwrap_or_default(),
    ));
    form.push_str(&checkbox_field(
        "seeking_talent",
        "Seeking talent",
        venue.map(|v| v.seeking_talent).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "seeking_description",
        "Seeking description",
        venue
            .and_then(|v| v.seeking_description.as_deref())
            .unwrap_or_default(),
    ));
    form.push_str("<button type=\"submit\">Save venue</button>\n</form>");

    let title = if venue.is_some() {
        "Edit venue"
    } else {
        "New venue"
    };
    layout(title, None, &format!("<h1>{title}</h1>\n{form}"))
}

pub fn artist_form_page(action: &str, artist: Option<&ArtistPayload>) -> String {
    let empty: &[String] = &[];
    let mut form = format!("<form method=\"post\" action=\"{action}\">\n");
    form.push_str(&text_field(
        "name",
        "Name",
        artist.map(|a| a.name.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "city",
        "City",
        artist.map(|a| a.city.as_str()).unwrap_or_default(),
    ));
    form.push_str(&state_select(
        artist.map(|a| a.state.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "phone",
        "Phone",
        artist.map(|a| a.phone.as_str()).unwrap_or_default(),
    ));
    form.push_str(&genre_select(
        "genres",
        artist.map(|a| a.genres.as_slice()).unwrap_or(empty),
    ));
    form.push_str(&text_field(
        "facebook_link",
        "Facebook link",
        artist.map(|a| a.facebook_link.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "image_link",
        "Image link",
        artist.map(|a| a.image_link.as_str()).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "website_link",
        "Website link",
        artist.map(|a| a.website_link.as_str()).unwrap_or_default(),
    ));
    form.push_str(&checkbox_field(
        "seeking_venue",
        "Seeking venues",
        artist.map(|a| a.seeking_venue).unwrap_or_default(),
    ));
    form.push_str(&text_field(
        "seeking_description",
        "Seeking description",
        artist
            .and_then(|a| a.seeking_description.as_deref())
            .unwrap_or_default(),
    ));
    form.push_str("<button type=\"submit\">Save artist</button>\n</form>");

    let title = if artist.is_some() {
        "Edit artist"
    } else {
        "New artist"
    };
    layout(title, None, &format!("<h1>{title}</h1>\n{form}"))
}

pub fn show_form_page() -> String {
    let body = "<h1>New show</h1>\n\
                <form method=\"post\" action=\"/shows/create\">\n\
                <label>Artist ID <input type=\"text\" name=\"artist_id\"></label><br>\n\
                <label>Venue ID <input type=\"text\" name=\"venue_id\"></label><br>\n\
                <label>Start time <input type=\"datetime-local\" name=\"start_time\"></label><br>\n\
                <button type=\"submit\">Save show</button>\n\
                </form>";
    layout("New show", None, body)
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        None,
        "<h1>404</h1>\n<p>The page you were looking for does not exist.</p>",
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server error",
        None,
        "<h1>500</h1>\n<p>Something went wrong. Please try again.</p>",
    )
}

pub fn bad_request_page(message: &str) -> String {
    layout(
        "Invalid submission",
        None,
        &format!("<h1>400</h1>\n<p>{}</p>", escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<b>\"R&B\"</b>"),
            "&lt;b&gt;&quot;R&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn flash_banner_renders_when_present() {
        let page = home_page(Some("Venue The Musical Hop was deleted successfully!"));
        assert!(page.contains("class=\"flash\""));
        assert!(page.contains("The Musical Hop"));
        assert!(!home_page(None).contains("class=\"flash\""));
    }

    #[test]
    fn venue_form_prefills_from_payload() {
        let payload = crate::entities::venue::VenuePayload {
            id: 3,
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genre: vec!["Jazz".to_string()],
            image_link: "https://example.com/hop.jpg".to_string(),
            facebook_link: None,
            website_link: None,
            seeking_talent: true,
            seeking_description: Some("Jazz acts wanted".to_string()),
        };
        let page = venue_form_page("/venues/3/edit", Some(&payload));
        assert!(page.contains("value=\"The Musical Hop\""));
        assert!(page.contains("<option selected>Jazz</option>"));
        assert!(page.contains("name=\"seeking_talent\" value=\"y\" checked"));
    }
}
