//! Album listing: one list-type token, one query plan, one runner.

use super::error::BrowseError;
use crate::catalog_store::{
    AlbumFilter, AlbumJoin, AlbumOrder, AlbumQueryPlan, AlbumWithArtist, CatalogStore, Page,
};
use crate::config::BrowseSettings;
use crate::user::UserId;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_FROM_YEAR: i32 = 1800;
pub const DEFAULT_TO_YEAR: i32 = 2200;

/// The album orderings a client can ask `getAlbumList2` for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlbumListType {
    AlphabeticalByArtist,
    AlphabeticalByName,
    ByYear,
    Frequent,
    Newest,
    Random,
    Recent,
}

impl AlbumListType {
    pub const ALL: [AlbumListType; 7] = [
        AlbumListType::AlphabeticalByArtist,
        AlbumListType::AlphabeticalByName,
        AlbumListType::ByYear,
        AlbumListType::Frequent,
        AlbumListType::Newest,
        AlbumListType::Random,
        AlbumListType::Recent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumListType::AlphabeticalByArtist => "alphabeticalByArtist",
            AlbumListType::AlphabeticalByName => "alphabeticalByName",
            AlbumListType::ByYear => "byYear",
            AlbumListType::Frequent => "frequent",
            AlbumListType::Newest => "newest",
            AlbumListType::Random => "random",
            AlbumListType::Recent => "recent",
        }
    }

    /// Whether the listing is scoped to the requesting user's plays.
    pub fn needs_caller(&self) -> bool {
        matches!(self, AlbumListType::Frequent | AlbumListType::Recent)
    }
}

impl fmt::Display for AlbumListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumListType {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlbumListType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BrowseError::UnknownValue {
                param: "type",
                value: s.to_string(),
            })
    }
}

/// Parameters of a `getAlbumList2` call, already parsed into numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumListRequest {
    pub list_type: Option<String>,
    pub offset: usize,
    pub size: Option<usize>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

pub struct AlbumLister {
    store: Arc<dyn CatalogStore>,
    settings: BrowseSettings,
}

impl AlbumLister {
    pub fn new(store: Arc<dyn CatalogStore>, settings: BrowseSettings) -> Self {
        Self { store, settings }
    }

    /// Builds the query plan for a request without touching the store.
    ///
    /// Unknown tokens are rejected here, so they never reach the store.
    pub fn plan(
        &self,
        request: &AlbumListRequest,
        caller: Option<UserId>,
    ) -> Result<AlbumQueryPlan, BrowseError> {
        let list_type: AlbumListType = request
            .list_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(BrowseError::MissingParameter("type"))?
            .parse()?;

        let page = self.settings.page(request.offset, request.size, self.settings.default_list_size);

        let plays_join = match caller {
            Some(user_id) => AlbumJoin::Plays { user_id },
            None if list_type.needs_caller() => {
                return Err(BrowseError::MissingCaller(list_type.as_str()))
            }
            None => AlbumJoin::None,
        };

        let plan = match list_type {
            AlbumListType::AlphabeticalByArtist => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: AlbumJoin::Artist,
                order: AlbumOrder::ArtistName,
                page,
            },
            AlbumListType::AlphabeticalByName => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: AlbumJoin::None,
                order: AlbumOrder::Title,
                page,
            },
            AlbumListType::ByYear => by_year_plan(request.from_year, request.to_year, page),
            AlbumListType::Frequent => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: plays_join,
                order: AlbumOrder::PlayCountDesc,
                page,
            },
            AlbumListType::Newest => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: AlbumJoin::None,
                order: AlbumOrder::ModifiedDesc,
                page,
            },
            AlbumListType::Random => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: AlbumJoin::None,
                order: AlbumOrder::Random,
                page,
            },
            AlbumListType::Recent => AlbumQueryPlan {
                filter: AlbumFilter::None,
                join: plays_join,
                order: AlbumOrder::PlayTimeDesc,
                page,
            },
        };

        debug!("Album list {} resolved to {:?}", list_type, plan);
        Ok(plan)
    }

    pub fn list(
        &self,
        request: &AlbumListRequest,
        caller: Option<UserId>,
    ) -> Result<Vec<AlbumWithArtist>, BrowseError> {
        let plan = self.plan(request, caller)?;
        if plan.page.is_empty() {
            return Ok(vec![]);
        }
        Ok(self.store.find_albums(&plan)?)
    }
}

/// Reversed bounds are swapped and flip the order to newest first.
fn by_year_plan(from_year: Option<i32>, to_year: Option<i32>, page: Page) -> AlbumQueryPlan {
    let from = from_year.unwrap_or(DEFAULT_FROM_YEAR);
    let to = to_year.unwrap_or(DEFAULT_TO_YEAR);
    let (from, to, descending) = if from > to {
        (to, from, true)
    } else {
        (from, to, false)
    };
    AlbumQueryPlan {
        filter: AlbumFilter::YearBetween { from, to },
        join: AlbumJoin::None,
        order: AlbumOrder::Year { descending },
        page,
    }
}
