//! The fixed catalog of widgets the dashboard knows about.
//!
//! Widget identifiers are a closed enum, so every lookup is checked at
//! compile time. The string form of each id is what gets persisted; it must
//! stay stable across releases or saved layouts lose their entries.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a dashboard widget.
///
/// Declaration order is registration order, which is also the default
/// layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetId {
    /// Local wall clock.
    Clock,
    /// Current conditions at the configured location.
    Weather,
    /// Cryptocurrency spot prices.
    Crypto,
    /// Quotes for a handful of tech stocks.
    TechStocks,
    /// Rotating programming quote.
    TechQuote,
    /// Biggest gainers and losers among large caps.
    StockMovers,
    /// Hacker News front page.
    HackerNews,
    /// Most-starred repositories created this week.
    GithubTrending,
    /// Popular bioinformatics repositories.
    BioinfoRepos,
    /// Biotech industry headlines.
    BiotechNews,
}

impl WidgetId {
    /// Every widget id in registration order.
    pub const ALL: [WidgetId; 10] = [
        WidgetId::Clock,
        WidgetId::Weather,
        WidgetId::Crypto,
        WidgetId::TechStocks,
        WidgetId::TechQuote,
        WidgetId::StockMovers,
        WidgetId::HackerNews,
        WidgetId::GithubTrending,
        WidgetId::BioinfoRepos,
        WidgetId::BiotechNews,
    ];

    /// Stable persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetId::Clock => "clock",
            WidgetId::Weather => "weather",
            WidgetId::Crypto => "crypto",
            WidgetId::TechStocks => "techStocks",
            WidgetId::TechQuote => "techQuote",
            WidgetId::StockMovers => "stockMovers",
            WidgetId::HackerNews => "hackerNews",
            WidgetId::GithubTrending => "githubTrending",
            WidgetId::BioinfoRepos => "bioinfoRepos",
            WidgetId::BiotechNews => "biotechNews",
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a registered widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget id '{0}'")]
pub struct UnknownWidget(pub String);

impl FromStr for WidgetId {
    type Err = UnknownWidget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownWidget(s.to_string()))
    }
}

/// Static description of a registered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescriptor {
    /// Widget identifier.
    pub id: WidgetId,
    /// Name shown in the grid title and the settings panel.
    pub display_name: &'static str,
    /// Refresh interval used unless the config overrides it.
    pub default_interval: Duration,
}

const fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Built-in descriptors in registration order.
const BUILTIN: [WidgetDescriptor; 10] = [
    WidgetDescriptor {
        id: WidgetId::Clock,
        display_name: "Clock",
        default_interval: secs(1),
    },
    WidgetDescriptor {
        id: WidgetId::Weather,
        display_name: "Weather",
        default_interval: secs(10 * 60),
    },
    WidgetDescriptor {
        id: WidgetId::Crypto,
        display_name: "Crypto Prices",
        default_interval: secs(60),
    },
    WidgetDescriptor {
        id: WidgetId::TechStocks,
        display_name: "Tech Stocks",
        default_interval: secs(60),
    },
    WidgetDescriptor {
        id: WidgetId::TechQuote,
        display_name: "Tech Quote",
        default_interval: secs(30),
    },
    WidgetDescriptor {
        id: WidgetId::StockMovers,
        display_name: "Today's Movers",
        default_interval: secs(2 * 60),
    },
    WidgetDescriptor {
        id: WidgetId::HackerNews,
        display_name: "Hacker News",
        default_interval: secs(5 * 60),
    },
    WidgetDescriptor {
        id: WidgetId::GithubTrending,
        display_name: "GitHub Trending",
        default_interval: secs(30 * 60),
    },
    WidgetDescriptor {
        id: WidgetId::BioinfoRepos,
        display_name: "Bioinfo Repos",
        default_interval: secs(30 * 60),
    },
    WidgetDescriptor {
        id: WidgetId::BiotechNews,
        display_name: "Biotech News",
        default_interval: secs(30 * 60),
    },
];

/// Errors detected while constructing a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same id was registered twice.
    #[error("widget '{0}' registered more than once")]
    Duplicate(WidgetId),
    /// A registry must contain at least one widget.
    #[error("registry is empty")]
    Empty,
}

/// Ordered set of widget descriptors.
///
/// Validated once at construction; after that every id in the registry is
/// unique and lookups cannot fail for ids obtained from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    descriptors: Vec<WidgetDescriptor>,
}

impl Registry {
    /// The built-in registry with all ten widgets.
    pub fn builtin() -> Self {
        Self {
            descriptors: BUILTIN.to_vec(),
        }
    }

    /// Builds a registry from explicit descriptors, rejecting duplicates.
    ///
    /// Used by tests to model a registry from which a widget was removed.
    pub fn from_descriptors(descriptors: Vec<WidgetDescriptor>) -> Result<Self, RegistryError> {
        if descriptors.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::new();
        for d in &descriptors {
            if !seen.insert(d.id) {
                return Err(RegistryError::Duplicate(d.id));
            }
        }
        Ok(Self { descriptors })
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[WidgetDescriptor] {
        &self.descriptors
    }

    /// All ids in registration order.
    pub fn ids(&self) -> Vec<WidgetId> {
        self.descriptors.iter().map(|d| d.id).collect()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.descriptors.iter().any(|d| d.id == id)
    }

    /// Descriptor for `id`, if registered.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Resolves a persisted string to a registered id.
    pub fn resolve(&self, raw: &str) -> Option<WidgetId> {
        raw.parse::<WidgetId>().ok().filter(|id| self.contains(*id))
    }

    /// Display name for `id`, falling back to the raw id string.
    pub fn display_name(&self, id: WidgetId) -> &'static str {
        self.get(id).map(|d| d.display_name).unwrap_or(id.as_str())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
