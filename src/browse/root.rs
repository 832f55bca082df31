//! Root kinds and their namespace prefixes

use serde::Serialize;

/// A top-level content source registered with the tree builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    Radio,
    Podcast,
    AudioBooks,
    TuneIn,
    Apps,
}

impl RootKind {
    /// Order in which prefixes are tried when routing an id
    pub const ROUTING_ORDER: [RootKind; 5] = [
        RootKind::Radio,
        RootKind::Podcast,
        RootKind::AudioBooks,
        RootKind::TuneIn,
        RootKind::Apps,
    ];

    /// Namespace prefix; also the id of the root's top node
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Radio => "ais_radio",
            Self::Podcast => "ais_podcast",
            Self::AudioBooks => "ais_audio_books",
            Self::TuneIn => "ais_tunein",
            Self::Apps => "xbox",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::Radio => "Radio",
            Self::Podcast => "Podcast",
            Self::AudioBooks => "Audiobooks",
            Self::TuneIn => "TuneIn",
            Self::Apps => "Xbox",
        }
    }

    /// Whether `node_id` lives in this root's namespace
    pub fn owns(self, node_id: &str) -> bool {
        node_id
            .strip_prefix(self.prefix())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    pub fn route(node_id: &str) -> Option<Self> {
        Self::ROUTING_ORDER
            .into_iter()
            .find(|kind| kind.owns(node_id))
    }
}

impl std::fmt::Display for RootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}
