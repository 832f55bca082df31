//! TuneIn OPML directories

use quick_xml::de::from_str as xml_from_str;
use serde::Deserialize;

use crate::catalog::CatalogEntry;
use crate::error::FetchError;

const FORMAT: &str = "OPML";

#[derive(Debug, Deserialize)]
struct Opml {
    body: Body,
}

#[derive(Debug, Default, Deserialize)]
struct Body {
    #[serde(default)]
    outline: Vec<Outline>,
}

#[derive(Debug, Deserialize)]
struct Outline {
    #[serde(rename = "@text", default)]
    text: String,
    #[serde(rename = "@URL")]
    url: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
    #[serde(rename = "@image")]
    image: Option<String>,
    #[serde(default)]
    outline: Vec<Outline>,
}

impl Outline {
    /// `link` and `audio` outlines with a URL; headings and text rows drop out
    fn into_entry(self) -> Option<CatalogEntry> {
        let kind = self.kind.filter(|k| k == "link" || k == "audio")?;
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(
            CatalogEntry::new(self.text, url.trim())
                .with_thumbnail(self.image)
                .with_extra("type", kind),
        )
    }
}

/// Flatten an OPML body into its navigable outlines.
///
/// TuneIn nests sections one level deep (`<outline text="Stations">` holding
/// the actual rows), so both body children and their children are scanned,
/// in document order.
pub fn parse_outlines(body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let xml = std::str::from_utf8(body).map_err(|e| FetchError::parse(FORMAT, e))?;
    let opml: Opml = xml_from_str(xml).map_err(|e| FetchError::parse(FORMAT, e))?;

    let mut entries = Vec::new();
    for mut outline in opml.body.outline {
        let nested = std::mem::take(&mut outline.outline);
        entries.extend(outline.into_entry());
        entries.extend(nested.into_iter().filter_map(Outline::into_entry));
    }
    Ok(entries)
}
