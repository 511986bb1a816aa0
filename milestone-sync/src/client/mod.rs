//! Repository-scoped GitHub REST primitives.
//!
//! Every call carries the bearer token configured on the client and is
//! awaited to completion before the caller issues the next one. Failures are
//! classified into [`RequestError`] and then either logged and swallowed or
//! returned, depending on the [`ErrorPolicy`] chosen by the caller.

mod error;
mod page;
mod policy;

pub use error::RequestError;
pub use page::{Listing, Page, PageCursor};
pub use policy::ErrorPolicy;

use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{FromResponse, Octocrab};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

/// GitHub client bound to one repository.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    api_endpoint: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Builds a client for `owner/repo` against `api_endpoint`.
    ///
    /// Octocrab's retry layer is disabled: a failed request is reported once
    /// and never replayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URI or the underlying
    /// HTTP client cannot be built.
    pub fn new(
        api_endpoint: &str,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Self, octocrab::Error> {
        let api_endpoint = api_endpoint.trim_end_matches('/');
        let octocrab = Octocrab::builder()
            .base_uri(api_endpoint)?
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(Self {
            octocrab,
            api_endpoint: api_endpoint.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Repository in `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Fetches a single resource below the repository endpoint.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        policy: ErrorPolicy,
    ) -> Result<Option<T>, RequestError> {
        let route = self.route(path);
        let url = self.url(&route);
        debug!(url = %url, "GET");
        let result = self.octocrab.get(&route, None::<&()>).await;
        settle("GET", &url, None, policy, result)
    }

    /// Fetches a single resource, treating 404 as `Ok(None)`.
    ///
    /// The status is checked before the body is read, so a 404 is absent
    /// whatever the server sent with it.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`] and
    /// only for failures other than 404.
    pub async fn get_if_exists<T: DeserializeOwned>(
        &self,
        path: &str,
        policy: ErrorPolicy,
    ) -> Result<Option<T>, RequestError> {
        let url = self.url(&self.route(path));
        debug!(url = %url, "GET (existence check)");
        let response = match self.octocrab._get(url.as_str()).await {
            Ok(response) => response,
            Err(e) => return settle("GET", &url, None, policy, Err(e)),
        };

        if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %url, "Resource not found");
            return Ok(None);
        }

        let result = match octocrab::map_github_error(response).await {
            Ok(response) => T::from_response(response).await,
            Err(e) => Err(e),
        };
        settle("GET", &url, None, policy, result)
    }

    /// Fetches the first page of a listing.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn first_page<T, Q>(
        &self,
        path: &str,
        query: &Q,
        policy: ErrorPolicy,
    ) -> Result<Option<Page<T>>, RequestError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let route = self.route(path);
        let url = self.url(&route);
        debug!(url = %url, "GET page");
        let result = self
            .octocrab
            .get::<octocrab::Page<T>, _, _>(&route, Some(query))
            .await;
        Ok(settle("GET", &url, None, policy, result)?.map(Page::from))
    }

    /// Fetches the page a cursor points at.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn next_page<T: DeserializeOwned>(
        &self,
        cursor: &PageCursor,
        policy: ErrorPolicy,
    ) -> Result<Option<Page<T>>, RequestError> {
        let url = cursor.url();
        debug!(url = %url, "GET page");
        let result = self
            .octocrab
            .get_page::<T>(&Some(cursor.0.clone()))
            .await;
        Ok(settle("GET", &url, None, policy, result)?
            .flatten()
            .map(Page::from))
    }

    /// Follows `next` cursors until the server stops advertising one and
    /// returns every record in server order.
    ///
    /// A page that fails under [`ErrorPolicy::Log`] ends the walk early; the
    /// returned [`Listing`] then holds what was gathered and is marked
    /// incomplete.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn list_all<T, Q>(
        &self,
        path: &str,
        query: &Q,
        policy: ErrorPolicy,
    ) -> Result<Listing<T>, RequestError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut listing = Listing {
            items: Vec::new(),
            complete: false,
        };
        let Some(mut page) = self.first_page::<T, Q>(path, query, policy).await? else {
            warn!(path, "First page unavailable, listing is incomplete");
            return Ok(listing);
        };
        let mut pages = 1usize;

        loop {
            listing.items.append(&mut page.items);
            let Some(cursor) = page.next.take() else {
                listing.complete = true;
                break;
            };
            match self.next_page::<T>(&cursor, policy).await? {
                Some(next) => page = next,
                None => {
                    warn!(path, pages, "Pagination stopped early, listing is incomplete");
                    return Ok(listing);
                }
            }
            pages += 1;
        }

        debug!(path, pages, count = listing.len(), "Listing complete");
        Ok(listing)
    }

    /// Sends a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        policy: ErrorPolicy,
    ) -> Result<Option<T>, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let route = self.route(path);
        let url = self.url(&route);
        debug!(url = %url, "POST");
        let result = self.octocrab.post(&route, Some(body)).await;
        settle(
            "POST",
            &url,
            Some(payload(body)),
            policy,
            result,
        )
    }

    /// Sends a PATCH with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified failure only under [`ErrorPolicy::Fatal`].
    pub async fn patch<B, T>(
        &self,
        path: &str,
        body: &B,
        policy: ErrorPolicy,
    ) -> Result<Option<T>, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let route = self.route(path);
        let url = self.url(&route);
        debug!(url = %url, "PATCH");
        let result = self.octocrab.patch(&route, Some(body)).await;
        settle(
            "PATCH",
            &url,
            Some(payload(body)),
            policy,
            result,
        )
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, path)
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.api_endpoint, route)
    }
}

/// Turns an octocrab result into the primitive's outcome, logging failures.
fn settle<T>(
    method: &'static str,
    url: &str,
    payload: Option<String>,
    policy: ErrorPolicy,
    result: Result<T, octocrab::Error>,
) -> Result<Option<T>, RequestError> {
    let failure = match result {
        Ok(value) => return Ok(Some(value)),
        Err(e) => RequestError::classify(method, url, e),
    };

    error!(error = %failure, "Request failed");
    match payload {
        Some(payload) => debug!(url, payload = %payload, "Failed request"),
        None => debug!(url, "Failed request"),
    }
    policy.settle(failure)
}

fn payload<B: Serialize + ?Sized>(body: &B) -> String {
    serde_json::to_string(body).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
