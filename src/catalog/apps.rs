//! Installed-apps catalog of an Xbox-style console
//!
//! Only the capability is declared here. A console client (SDK, cloud API)
//! implements [`AppCatalog`] and is handed to the apps root at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Product id of the console home screen
pub const HOME_PRODUCT_ID: &str = "714681658";
/// Product id of the live TV app
pub const LIVE_TV_PRODUCT_ID: &str = "371594669";

/// Image purposes searched for a thumbnail, best first
pub const IMAGE_PURPOSE_ORDER: [&str; 4] = ["Poster", "Tile", "Logo", "BoxArt"];
/// Narrower images are too small for a browse tile
pub const MIN_IMAGE_WIDTH: u32 = 300;

/// Fixed partition of installed content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppCategory {
    App,
    Game,
}

impl AppCategory {
    pub const ALL: [AppCategory; 2] = [AppCategory::App, AppCategory::Game];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "App",
            Self::Game => "Game",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "App" => Some(Self::App),
            "Game" => Some(Self::Game),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    pub name: String,
    pub product_id: String,
    pub category: AppCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// "Poster", "Tile", "Logo", "BoxArt", "Screenshot", ...
    pub purpose: String,
    pub uri: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub title: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Browse thumbnail for this product, if any image qualifies
    pub fn thumbnail(&self) -> Option<String> {
        find_media_image(&self.images).map(|image| image_url(&image.uri))
    }
}

#[async_trait]
pub trait AppCatalog: Send + Sync {
    /// Everything installed on the console, in the console's order
    async fn installed_apps(&self) -> Result<Vec<InstalledApp>, FetchError>;

    /// Catalog records for the given product ids. Unknown ids are skipped.
    async fn products(&self, product_ids: &[String]) -> Result<Vec<Product>, FetchError>;

    /// Whether the console has a TV tuner configured
    fn supports_live_tv(&self) -> bool;
}

/// First image at least [`MIN_IMAGE_WIDTH`] wide, searching purposes in
/// [`IMAGE_PURPOSE_ORDER`]
pub fn find_media_image(images: &[ProductImage]) -> Option<&ProductImage> {
    IMAGE_PURPOSE_ORDER.iter().find_map(|purpose| {
        images
            .iter()
            .find(|image| image.purpose == *purpose && image.width >= MIN_IMAGE_WIDTH)
    })
}

/// Catalog URIs are often protocol-relative (`//store-images...`)
pub fn image_url(uri: &str) -> String {
    if uri.starts_with("//") {
        format!("https:{}", uri)
    } else {
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(purpose: &str, width: u32, uri: &str) -> ProductImage {
        ProductImage {
            purpose: purpose.to_string(),
            uri: uri.to_string(),
            width,
        }
    }

    #[test]
    fn test_purpose_priority_beats_list_order() {
        let images = vec![
            image("Logo", 300, "//logo"),
            image("Tile", 300, "//tile"),
            image("Screenshot", 1920, "//shot"),
        ];
        assert_eq!(find_media_image(&images).unwrap().uri, "//tile");
    }

    #[test]
    fn test_narrow_images_skipped() {
        let images = vec![
            image("Poster", 299, "//small-poster"),
            image("BoxArt", 1080, "//boxart"),
        ];
        assert_eq!(find_media_image(&images).unwrap().uri, "//boxart");
    }

    #[test]
    fn test_no_qualifying_image() {
        let images = vec![image("Screenshot", 1920, "//shot"), image("Poster", 100, "//p")];
        assert!(find_media_image(&images).is_none());
    }

    #[test]
    fn test_image_url_prefixes_protocol_relative() {
        assert_eq!(image_url("//store-images.s-microsoft.com/x"), "https://store-images.s-microsoft.com/x");
        assert_eq!(image_url("http://cdn/x.png"), "http://cdn/x.png");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(AppCategory::parse("Game"), Some(AppCategory::Game));
        assert_eq!(AppCategory::parse("game"), None);
        for category in AppCategory::ALL {
            assert_eq!(AppCategory::parse(category.as_str()), Some(category));
        }
    }
}
