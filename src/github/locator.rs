//! URL parsing and identity wrappers for addressing pull requests.

use url::Url;

use super::error::PullsError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, PullsError> {
        if value.is_empty() {
            return Err(PullsError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, PullsError> {
        if value.is_empty() {
            return Err(PullsError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidPullRequestNumber` for zero.
    pub const fn new(value: u64) -> Result<Self, PullsError> {
        if value == 0 {
            return Err(PullsError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, PullsError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PullsError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

fn public_api_base() -> Result<Url, PullsError> {
    Url::parse(GITHUB_API_BASE).map_err(|error| PullsError::InvalidUrl(error.to_string()))
}

/// Derives the GitHub API base URL from a parsed HTML URL.
///
/// `github.com` maps to the public API host; any other host is treated as
/// GitHub Enterprise and served from `/api/v3` on the same origin.
fn derive_api_base(parsed: &Url) -> Result<Url, PullsError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| PullsError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return public_api_base();
    }

    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| PullsError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(parsed.port())
        .map_err(|()| PullsError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

/// Parsed pull request URL and derived API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    repository: RepositoryLocator,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Parses a GitHub pull request URL in the form
    /// `https://github.com/<owner>/<repo>/pull/<number>`.
    ///
    /// Trailing segments such as `/files` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidUrl` when parsing fails, `MissingPathSegments`
    /// when the URL path is not `/owner/repo/pull/<number>`, and
    /// `InvalidPullRequestNumber` when the number is not a positive integer.
    pub fn parse(input: &str) -> Result<Self, PullsError> {
        let parsed = Url::parse(input).map_err(|error| PullsError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(PullsError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(PullsError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(PullsError::MissingPathSegments)?;
        let marker = segments.next().ok_or(PullsError::MissingPathSegments)?;
        let number_segment = segments.next().ok_or(PullsError::MissingPathSegments)?;

        if marker != "pull" || number_segment.is_empty() {
            return Err(PullsError::MissingPathSegments);
        }

        let number = number_segment
            .parse::<u64>()
            .map_err(|_| PullsError::InvalidPullRequestNumber)
            .and_then(PullRequestNumber::new)?;

        let repository = RepositoryLocator {
            api_base: derive_api_base(&parsed)?,
            owner: RepositoryOwner::new(owner_segment)?,
            repository: RepositoryName::new(repository_segment)?,
        };

        Ok(Self { repository, number })
    }

    /// API base URL derived from the pull request host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        self.repository.api_base()
    }

    /// Repository the pull request belongs to.
    #[must_use]
    pub const fn repository_locator(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        self.repository.owner()
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        self.repository.repository()
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!("{}/{}", self.repository.pulls_path(), self.number.get())
    }
}

/// Parsed repository URL with derived API base.
///
/// # Example
///
/// ```
/// use pullwire::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/repo")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator on `github.com` from owner and name.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, PullsError> {
        Ok(Self {
            api_base: public_api_base()?,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Parses a GitHub repository URL in the form
    /// `https://github.com/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the URL path is not `/owner/repo`.
    pub fn parse(input: &str) -> Result<Self, PullsError> {
        let parsed = Url::parse(input).map_err(|error| PullsError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(PullsError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(PullsError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(PullsError::MissingPathSegments)?;

        Ok(Self {
            api_base: derive_api_base(&parsed)?,
            owner: RepositoryOwner::new(owner_segment)?,
            repository: RepositoryName::new(repository_segment.trim_end_matches(".git"))?,
        })
    }

    /// Addresses pull request `number` in this repository.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidPullRequestNumber` for zero.
    pub fn pull_request(&self, number: u64) -> Result<PullRequestLocator, PullsError> {
        Ok(PullRequestLocator {
            repository: self.clone(),
            number: PullRequestNumber::new(number)?,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path for the repository's pull request collection.
    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
