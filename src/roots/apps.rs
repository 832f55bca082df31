//! Console apps: Home, Live TV and the installed App/Game partition

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::browse::{BrowseNode, DepthSchema, Level, MediaClass, NodePath, RootKind, RootResolver};
use crate::catalog::apps::{HOME_PRODUCT_ID, LIVE_TV_PRODUCT_ID};
use crate::catalog::{AppCatalog, AppCategory, InstalledApp};
use crate::error::BrowseError;
use crate::roots::upstream;

/// Ids the console launches directly
pub const HOME_ID: &str = "Home";
pub const LIVE_TV_ID: &str = "TV";

const APP_LEVELS: &[Level] = &[Level::new("categories", 0), Level::new("installed", 1)];
static APP_SCHEMA: DepthSchema = DepthSchema::new(APP_LEVELS);

fn content_kind(category: AppCategory) -> &'static str {
    match category {
        AppCategory::App => "app",
        AppCategory::Game => "game",
    }
}

fn media_class(category: AppCategory) -> MediaClass {
    match category {
        AppCategory::App => MediaClass::App,
        AppCategory::Game => MediaClass::Game,
    }
}

pub struct AppsRoot {
    catalog: Arc<dyn AppCatalog>,
    title: String,
}

impl AppsRoot {
    pub fn new(catalog: Arc<dyn AppCatalog>) -> Self {
        Self {
            catalog,
            title: RootKind::Apps.default_title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Thumbnails keyed by product id, for whichever products the catalog knows
    async fn thumbnails(
        &self,
        path: &NodePath,
        product_ids: Vec<String>,
    ) -> Result<HashMap<String, String>, BrowseError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let products = self
            .catalog
            .products(&product_ids)
            .await
            .map_err(upstream(path))?;

        Ok(products
            .into_iter()
            .filter_map(|product| {
                let thumbnail = product.thumbnail()?;
                Some((product.product_id, thumbnail))
            })
            .collect())
    }

    async fn categories(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Apps.prefix();
        let installed = self
            .catalog
            .installed_apps()
            .await
            .map_err(upstream(path))?;
        let live_tv = self.catalog.supports_live_tv();

        let mut product_ids = vec![HOME_PRODUCT_ID.to_string()];
        if live_tv {
            product_ids.push(LIVE_TV_PRODUCT_ID.to_string());
        }
        let mut thumbnails = self.thumbnails(path, product_ids).await?;

        let mut children = vec![BrowseNode::leaf("Home", HOME_ID, MediaClass::App, "app")
            .with_thumbnail(thumbnails.remove(HOME_PRODUCT_ID))];
        if live_tv {
            children.push(
                BrowseNode::leaf("Live TV", LIVE_TV_ID, MediaClass::App, "app")
                    .with_thumbnail(thumbnails.remove(LIVE_TV_PRODUCT_ID)),
            );
        }

        children.extend(
            AppCategory::ALL
                .into_iter()
                .filter(|category| installed.iter().any(|app| app.category == *category))
                .map(|category| {
                    let id = APP_SCHEMA.encode(prefix, &[category.as_str()]);
                    BrowseNode::directory(
                        category.as_str(),
                        id,
                        MediaClass::Directory,
                        content_kind(category),
                    )
                }),
        );

        Ok(BrowseNode::directory(&self.title, prefix, MediaClass::Directory, "app")
            .with_children(children))
    }

    async fn installed(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let category =
            AppCategory::parse(path.require(0)?).ok_or_else(|| BrowseError::not_found(&path.node_id))?;

        let apps: Vec<InstalledApp> = self
            .catalog
            .installed_apps()
            .await
            .map_err(upstream(path))?
            .into_iter()
            .filter(|app| app.category == category)
            .collect();

        let ids = apps.iter().map(|app| app.product_id.clone()).collect();
        let mut thumbnails = self.thumbnails(path, ids).await?;

        let children = apps
            .into_iter()
            .map(|app| {
                let thumbnail = thumbnails.remove(&app.product_id);
                BrowseNode::leaf(app.name, app.product_id, media_class(category), content_kind(category))
                    .with_thumbnail(thumbnail)
            })
            .collect();

        Ok(BrowseNode::directory(
            category.as_str(),
            &path.node_id,
            MediaClass::Directory,
            content_kind(category),
        )
        .with_children(children))
    }
}

#[async_trait]
impl RootResolver for AppsRoot {
    fn kind(&self) -> RootKind {
        RootKind::Apps
    }

    fn schema(&self) -> &DepthSchema {
        &APP_SCHEMA
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        match path.level {
            0 => self.categories(path).await,
            _ => self.installed(path).await,
        }
    }
}
