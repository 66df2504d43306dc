//! Store-independent descriptions of the catalog queries the browse layer needs.
//!
//! The browse layer decides *what* to fetch by building one of these values;
//! a `CatalogStore` decides *how*.

use crate::normalize::fold;
use crate::user::UserId;

/// A window over an ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Page { offset, limit }
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlbumFilter {
    None,
    /// Inclusive on both ends, `from <= to`.
    YearBetween { from: i32, to: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlbumJoin {
    None,
    Artist,
    /// The play aggregates of a single user; albums that user never played drop out.
    Plays { user_id: UserId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlbumOrder {
    ArtistName,
    Title,
    Year { descending: bool },
    PlayCountDesc,
    ModifiedDesc,
    PlayTimeDesc,
    /// No stable order; two runs of the same plan may page differently.
    Random,
}

impl AlbumOrder {
    pub fn needs_plays(&self) -> bool {
        matches!(self, AlbumOrder::PlayCountDesc | AlbumOrder::PlayTimeDesc)
    }
}

/// Filter, join, order and page for one album listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumQueryPlan {
    pub filter: AlbumFilter,
    pub join: AlbumJoin,
    pub order: AlbumOrder,
    pub page: Page,
}

/// An unanchored, case-insensitive substring to look for in names and titles.
///
/// The raw text is matched against the stored display value and its folded
/// form against the stored normalized value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstringPattern {
    raw: String,
    folded: String,
}

pub const LIKE_ESCAPE: char = '\\';

impl SubstringPattern {
    pub fn new(text: &str) -> Self {
        SubstringPattern {
            raw: text.to_string(),
            folded: fold(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.raw
    }

    /// `LIKE` operand for the display column, to be used with `ESCAPE '\'`.
    pub fn like_raw(&self) -> String {
        to_like_operand(&self.raw)
    }

    /// `LIKE` operand for the normalized column, to be used with `ESCAPE '\'`.
    pub fn like_folded(&self) -> String {
        to_like_operand(&self.folded)
    }
}

fn to_like_operand(text: &str) -> String {
    let mut operand = String::with_capacity(text.len() + 2);
    operand.push('%');
    for c in text.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            operand.push(LIKE_ESCAPE);
        }
        operand.push(c);
    }
    operand.push('%');
    operand
}
