use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of an external media source.
///
/// Identifiers outside the known set are kept verbatim in `Other` so that a
/// provider added server-side still flows through the store, it just gets
/// generic error messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderType {
    Unsplash,
    Coverr,
    /// The site's own media library.
    Local,
    Other(String),
}

impl ProviderType {
    /// Wire form, as used in API filters.
    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::Unsplash => "unsplash",
            ProviderType::Coverr => "coverr",
            ProviderType::Local => "local",
            ProviderType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProviderType::Other(_))
    }
}

impl From<&str> for ProviderType {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("unsplash") {
            ProviderType::Unsplash
        } else if trimmed.eq_ignore_ascii_case("coverr") {
            ProviderType::Coverr
        } else if trimmed.eq_ignore_ascii_case("local") {
            ProviderType::Local
        } else {
            ProviderType::Other(trimmed.to_string())
        }
    }
}

impl FromStr for ProviderType {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(ProviderType::from(raw))
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing message shown when a media page fails to load.
pub fn fetch_media_error_message(provider: &ProviderType) -> &'static str {
    match provider {
        ProviderType::Unsplash => "Error loading media from Unsplash",
        ProviderType::Coverr => "Error loading media from Coverr",
        ProviderType::Local => "Error loading media from Wordpress",
        ProviderType::Other(_) => "Error loading media",
    }
}

/// User-facing message shown when a provider's category list fails to load.
pub fn fetch_categories_error_message(provider: &ProviderType) -> &'static str {
    match provider {
        ProviderType::Unsplash => "Error loading categories from Unsplash",
        ProviderType::Coverr => "Error loading categories from Coverr",
        ProviderType::Local => "Error loading categories from Wordpress",
        ProviderType::Other(_) => "Error loading categories",
    }
}
