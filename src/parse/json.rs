//! JSON catalog payloads (AIS cloud, audiobook library)

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::CatalogEntry;
use crate::error::FetchError;

const CLOUD_FORMAT: &str = "cloud JSON";
const BOOKS_FORMAT: &str = "audiobook JSON";

#[derive(Debug, Deserialize)]
struct CloudEnvelope<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CloudName {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "IMAGE_URL")]
    image_url: Option<String>,
    #[serde(rename = "STREAM_URL")]
    stream_url: Option<String>,
    #[serde(rename = "LOOKUP_URL")]
    lookup_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Book {
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    href: String,
    cover_thumb: Option<String>,
    simple_thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookDetail {
    #[serde(default)]
    media: Vec<BookMedia>,
    cover_thumb: Option<String>,
    simple_thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookMedia {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "type", default)]
    media_type: String,
}

/// `{"data": [...]}` category names. Non-string entries are stringified.
pub fn parse_cloud_types(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let envelope: CloudEnvelope<Value> =
        serde_json::from_slice(body).map_err(|e| FetchError::parse(CLOUD_FORMAT, e))?;

    Ok(envelope
        .data
        .into_iter()
        .map(|value| {
            let name = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            CatalogEntry::new(name.clone(), name)
        })
        .collect())
}

/// Stations or shows within one category. Token is the stream URL for radio
/// and the feed lookup URL for podcasts; empty when the cloud sent neither.
pub fn parse_cloud_names(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let envelope: CloudEnvelope<CloudName> =
        serde_json::from_slice(body).map_err(|e| FetchError::parse(CLOUD_FORMAT, e))?;

    Ok(envelope
        .data
        .into_iter()
        .map(|item| {
            let token = item
                .stream_url
                .or(item.lookup_url)
                .map(|url| url.trim().to_string())
                .unwrap_or_default();
            CatalogEntry::new(item.name, token).with_thumbnail(item.image_url)
        })
        .collect())
}

/// Flat list of every audiobook; author kept in `extra["author"]`
pub fn parse_book_list(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let books: Vec<Book> =
        serde_json::from_slice(body).map_err(|e| FetchError::parse(BOOKS_FORMAT, e))?;

    Ok(books
        .into_iter()
        .map(|book| {
            CatalogEntry::new(book.title, book.href)
                .with_thumbnail(book.cover_thumb.or(book.simple_thumb))
                .with_extra("author", book.author)
        })
        .collect())
}

/// Media attachments of one book; media type kept in `extra["type"]`
pub fn parse_book_media(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let detail: BookDetail =
        serde_json::from_slice(body).map_err(|e| FetchError::parse(BOOKS_FORMAT, e))?;
    let cover = detail.cover_thumb.or(detail.simple_thumb);

    Ok(detail
        .media
        .into_iter()
        .map(|media| {
            CatalogEntry::new(media.name, media.url)
                .with_thumbnail(cover.clone())
                .with_extra("type", media.media_type)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_types_keep_order() {
        let body = br#"{"data": ["Jazz", "Rock", "Klasyczna"]}"#;
        let entries = parse_cloud_types(body).unwrap();
        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Jazz", "Rock", "Klasyczna"]);
        assert_eq!(entries[0].token, "Jazz");
    }

    #[test]
    fn test_cloud_names_radio_station() {
        let body = br#"{"data": [
            {"NAME": "Jazz FM", "IMAGE_URL": "http://img/jazz.png", "STREAM_URL": " http://s/jazz.mp3 "},
            {"NAME": "Silent", "IMAGE_URL": ""}
        ]}"#;
        let entries = parse_cloud_names(body).unwrap();
        assert_eq!(entries[0].token, "http://s/jazz.mp3");
        assert_eq!(entries[0].thumbnail.as_deref(), Some("http://img/jazz.png"));
        assert_eq!(entries[1].token, "");
        assert_eq!(entries[1].thumbnail, None);
    }

    #[test]
    fn test_cloud_names_podcast_lookup_url() {
        let body = br#"{"data": [{"NAME": "BBC", "IMAGE_URL": null, "LOOKUP_URL": "https://feed.url"}]}"#;
        let entries = parse_cloud_names(body).unwrap();
        assert_eq!(entries[0].token, "https://feed.url");
    }

    #[test]
    fn test_cloud_missing_data_is_parse_error() {
        let err = parse_cloud_types(br#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn test_book_list() {
        let body = br#"[
            {"title": "Pan Tadeusz", "author": "Adam Mickiewicz", "href": "https://lib/api/books/pan-tadeusz/", "cover_thumb": "https://lib/pt.jpg", "kind": "Epika"},
            {"title": "Lalka", "href": "https://lib/api/books/lalka/"}
        ]"#;
        let entries = parse_book_list(body).unwrap();
        assert_eq!(entries[0].extra("author"), Some("Adam Mickiewicz"));
        assert_eq!(entries[0].thumbnail.as_deref(), Some("https://lib/pt.jpg"));
        assert_eq!(entries[1].extra("author"), Some(""));
    }

    #[test]
    fn test_book_media_types() {
        let body = r#"{"title": "Lalka", "cover_thumb": "https://lib/l.jpg", "media": [
            {"name": "Rozdział 1", "url": "https://lib/1.mp3", "type": "mp3"},
            {"name": "Rozdział 1", "url": "https://lib/1.ogg", "type": "ogg"},
            {"name": "Audiobook", "url": "https://lib/l.daisy.zip", "type": "daisy"}
        ]}"#;
        let entries = parse_book_media(body.as_bytes()).unwrap();
        let types: Vec<_> = entries.iter().filter_map(|e| e.extra("type")).collect();
        assert_eq!(types, vec!["mp3", "ogg", "daisy"]);
        assert!(entries.iter().all(|e| e.thumbnail.as_deref() == Some("https://lib/l.jpg")));
    }
}
