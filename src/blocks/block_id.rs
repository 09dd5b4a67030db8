//! Identifies a block texture by its `(id, meta)` pair.

use std::fmt;
use std::str::FromStr;

/// A block identifier, ordered by `id` first and `meta` second so it can key ordered maps.
///
/// The textual form is always `"<id>-<meta>"`, even when `meta` is 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BlockId {
    id: u32,
    meta: u32,
}

impl BlockId {
    pub fn new(id: u32, meta: u32) -> Self {
        Self { id, meta }
    }

    /// Parses `"<id>"`, `"<id>-<meta>"` or `"<id>-<meta>.<ext>"`. Missing meta is 0.
    pub fn parse<T: AsRef<str>>(string: T) -> Self {
        Self::parse_with_meta(string, 0)
    }

    /// Same as [`BlockId::parse`] but uses `default_meta` when the string has no `-`.
    ///
    /// This never fails: numeric text that does not parse becomes 0. Each part is parsed whole,
    /// so `"405-3-1"` has meta 0 and `"7a"` has id 0.
    pub fn parse_with_meta<T: AsRef<str>>(string: T, default_meta: u32) -> Self {
        let string = string.as_ref();

        // Everything after the first dot is an extension.
        let stem = match string.split_once('.') {
            Some((stem, _)) => stem,
            None => string,
        };

        match stem.split_once('-') {
            Some((id, meta)) => Self::new(parse_or_zero(id), parse_or_zero(meta)),
            None => Self::new(parse_or_zero(stem), default_meta),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn meta(&self) -> u32 {
        self.meta
    }
}

/// Parses `text` as a number, falling back to 0 when it is not one.
pub(crate) fn parse_or_zero<N>(text: &str) -> N
where
    N: FromStr + Default,
{
    text.trim().parse().unwrap_or_default()
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.meta)
    }
}

impl From<&str> for BlockId {
    fn from(string: &str) -> Self {
        Self::parse(string)
    }
}

impl From<(u32, u32)> for BlockId {
    fn from((id, meta): (u32, u32)) -> Self {
        Self::new(id, meta)
    }
}
