//! Lookup from a deck position to what the card shows.

/// Maps a card index to displayable content.
///
/// The deck never bounds its index, so providers decide what lies past the
/// end by returning `None` or wrapping.
pub trait CardContentProvider {
    type Content;

    fn content(&self, index: usize) -> Option<&Self::Content>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What an [`IconCatalog`] does with indexes past its last icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    #[default]
    Exhausted,
    Wrap,
}

/// A list of icon identifiers shown one per card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconCatalog {
    icons: Vec<String>,
    overflow: OverflowPolicy,
}

impl IconCatalog {
    pub fn new<I, S>(icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            icons: icons.into_iter().map(Into::into).collect(),
            overflow: OverflowPolicy::default(),
        }
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self::new([
            "logo-html5",
            "logo-css3",
            "logo-javascript",
            "logo-react",
            "logo-python",
            "logo-rust",
        ])
    }
}

impl CardContentProvider for IconCatalog {
    type Content = String;

    fn content(&self, index: usize) -> Option<&String> {
        match self.overflow {
            OverflowPolicy::Exhausted => self.icons.get(index),
            OverflowPolicy::Wrap if self.icons.is_empty() => None,
            OverflowPolicy::Wrap => self.icons.get(index % self.icons.len()),
        }
    }

    fn len(&self) -> usize {
        self.icons.len()
    }
}
