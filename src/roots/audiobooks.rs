//! Audiobooks: authors, books, then chapters
//!
//! The library exposes one flat book list, so authors are derived client-side
//! with [`group_by`] on every visit to the top level.

use async_trait::async_trait;
use std::sync::Arc;

use crate::browse::{
    group_by, BrowseNode, DepthSchema, Level, MediaClass, NodePath, RootKind, RootResolver,
};
use crate::catalog::{CatalogEntry, CatalogGateway};
use crate::error::BrowseError;
use crate::roots::upstream;

/// Chapters of any other media type (ogg, daisy, epub...) are not listed
const AUDIO_MEDIA_TYPE: &str = "mp3";

const AUDIOBOOK_LEVELS: &[Level] = &[
    Level::new("authors", 0),
    Level::new("books", 1),
    // author / title / book url
    Level::new("chapters", 3),
];
static AUDIOBOOK_SCHEMA: DepthSchema = DepthSchema::new(AUDIOBOOK_LEVELS);

pub struct AudioBooksRoot {
    gateway: Arc<dyn CatalogGateway>,
    title: String,
}

fn author_of(book: &CatalogEntry) -> String {
    book.extra("author").unwrap_or_default().to_string()
}

impl AudioBooksRoot {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            title: RootKind::AudioBooks.default_title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    async fn authors(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::AudioBooks.prefix();
        let books = self
            .gateway
            .list_top_level(prefix)
            .await
            .map_err(upstream(path))?;

        let children = group_by(books, author_of)
            .into_iter()
            .map(|(author, books)| {
                let id = AUDIOBOOK_SCHEMA.encode(prefix, &[&author]);
                let thumbnail = books.into_iter().find_map(|book| book.thumbnail);
                BrowseNode::directory(author, id, MediaClass::Artist, prefix)
                    .with_thumbnail(thumbnail)
            })
            .collect();

        Ok(BrowseNode::directory(&self.title, prefix, MediaClass::Directory, prefix)
            .with_children(children))
    }

    async fn books(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::AudioBooks.prefix();
        let author = path.require(0)?;
        let books = self
            .gateway
            .list_children(author)
            .await
            .map_err(upstream(path))?;

        let children = books
            .into_iter()
            .map(|book| {
                if book.token.is_empty() {
                    return Err(BrowseError::missing(path, "book url"));
                }
                let id =
                    AUDIOBOOK_SCHEMA.encode(prefix, &[author, book.label.as_str(), book.token.as_str()]);
                Ok(BrowseNode::directory(book.label, id, MediaClass::Book, prefix)
                    .with_thumbnail(book.thumbnail))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(
            BrowseNode::directory(author, &path.node_id, MediaClass::Artist, prefix)
                .with_children(children),
        )
    }

    async fn chapters(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::AudioBooks.prefix();
        let title = path.require(1)?;
        let book_url = path.require(2)?;
        let media = self
            .gateway
            .fetch_terminal_feed(book_url)
            .await
            .map_err(upstream(path))?;

        let chapters: Vec<_> = media
            .into_iter()
            .filter(|m| m.extra("type") == Some(AUDIO_MEDIA_TYPE))
            .collect();
        if chapters.iter().any(|c| c.token.is_empty()) {
            return Err(BrowseError::missing(path, "chapter url"));
        }

        let thumbnail = chapters.iter().find_map(|c| c.thumbnail.clone());
        let children = chapters
            .into_iter()
            .map(|chapter| {
                BrowseNode::leaf(chapter.label, chapter.token, MediaClass::Track, prefix)
                    .with_thumbnail(chapter.thumbnail)
            })
            .collect();

        Ok(
            BrowseNode::directory(title, &path.node_id, MediaClass::Book, prefix)
                .with_thumbnail(thumbnail)
                .with_children(children),
        )
    }
}

#[async_trait]
impl RootResolver for AudioBooksRoot {
    fn kind(&self) -> RootKind {
        RootKind::AudioBooks
    }

    fn schema(&self) -> &DepthSchema {
        &AUDIOBOOK_SCHEMA
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        match path.level {
            0 => self.authors(path).await,
            1 => self.books(path).await,
            _ => self.chapters(path).await,
        }
    }
}
