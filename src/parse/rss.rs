//! Podcast RSS 2.0 feeds
//!
//! Streamed with the quick-xml event reader rather than serde: feeds mix
//! `<image>` and `<itunes:image>` under the same parent and interleave
//! vendor elements between items, which a derived struct handles poorly.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::catalog::CatalogEntry;
use crate::error::FetchError;

const FORMAT: &str = "RSS";

/// Extra key carrying the channel-level image on every item
pub const FEED_IMAGE: &str = "feed_image";

#[derive(Default)]
struct Item {
    title: String,
    enclosure: String,
    image: Option<String>,
}

/// Parse a feed into one entry per `<item>`, in feed order.
///
/// Token is the enclosure URL (empty when the item has none). Thumbnail is
/// the item's `itunes:image`, else the channel image. The channel image is
/// also kept in `extra[FEED_IMAGE]` for the show itself.
pub fn parse_feed(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut seen_channel = false;
    let mut channel_image: Option<String> = None;
    let mut current: Option<Item> = None;
    let mut items = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| FetchError::parse(FORMAT, e))?;

        match event {
            Event::Start(e) => {
                match e.local_name().as_ref() {
                    b"channel" => seen_channel = true,
                    b"item" => current = Some(Item::default()),
                    _ => on_element(&e, &mut current, &mut channel_image)?,
                }
                // Qualified names, so `itunes:title` never reads as `title`
                path.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => on_element(&e, &mut current, &mut channel_image)?,
            Event::End(e) => {
                if e.local_name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                path.pop();
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| FetchError::parse(FORMAT, e))?;
                on_text(&path, &text, &mut current, &mut channel_image);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                on_text(&path, &text, &mut current, &mut channel_image);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_channel {
        return Err(FetchError::parse(FORMAT, "missing <channel> element"));
    }

    Ok(items
        .into_iter()
        .map(|item| {
            let thumbnail = item.image.or_else(|| channel_image.clone());
            let entry =
                CatalogEntry::new(item.title.trim(), item.enclosure.trim()).with_thumbnail(thumbnail);
            match &channel_image {
                Some(image) => entry.with_extra(FEED_IMAGE, image.as_str()),
                None => entry,
            }
        })
        .collect())
}

/// Attribute-carrying elements: `<enclosure url>` and `<itunes:image href>`
fn on_element(
    e: &BytesStart<'_>,
    current: &mut Option<Item>,
    channel_image: &mut Option<String>,
) -> Result<(), FetchError> {
    match e.local_name().as_ref() {
        b"enclosure" => {
            if let (Some(item), Some(url)) = (current.as_mut(), attribute(e, b"url")?) {
                item.enclosure = url;
            }
        }
        b"image" => {
            if let Some(href) = attribute(e, b"href")? {
                match current.as_mut() {
                    Some(item) => item.image = Some(href),
                    None => {
                        channel_image.get_or_insert(href);
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn on_text(
    path: &[Vec<u8>],
    text: &str,
    current: &mut Option<Item>,
    channel_image: &mut Option<String>,
) {
    let tail: Vec<&[u8]> = path.iter().rev().take(3).map(Vec::as_slice).collect();
    match tail.as_slice() {
        [b"title", b"item", ..] => {
            if let Some(item) = current.as_mut() {
                item.title.push_str(text);
            }
        }
        // RSS 2.0 <channel><image><url>
        [b"url", b"image", b"channel"] if channel_image.is_none() => {
            *channel_image = Some(text.trim().to_string());
        }
        _ => {}
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, FetchError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| FetchError::parse(FORMAT, e))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| FetchError::parse(FORMAT, e))?;
            return Ok(Some(value.trim().to_string()));
        }
    }
    Ok(None)
}
