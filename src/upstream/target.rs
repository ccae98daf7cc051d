//! Upstream URL construction.

use url::{form_urlencoded, Url};

use crate::error::ProxyError;

/// Query parameter that carries the wildcard path segments; never forwarded.
pub const SLUG_PARAM: &str = "slug";

/// Fully resolved upstream URL for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    url: Url,
}

impl ProxyTarget {
    /// Build `<base_url><api_path>/<decoded segments>[?<query>]`.
    pub fn new<S: AsRef<str>>(
        base_url: &str,
        api_path: &str,
        segments: &[S],
        query: Option<&str>,
    ) -> Result<Self, ProxyError> {
        let path = join_segments(segments)?;
        let mut raw = format!("{}{}/{}", base_url.trim_end_matches('/'), api_path, path);
        if let Some(query) = forwarded_query(query) {
            raw.push('?');
            raw.push_str(&query);
        }

        Ok(Self {
            url: Url::parse(&raw)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

/// Join segments with `/` and percent-decode the result.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> Result<String, ProxyError> {
    let parts: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
    let joined = parts.join("/");
    Ok(urlencoding::decode(&joined)?.into_owned())
}

/// Re-serialize every query pair except `slug`, keeping their order.
///
/// Returns `None` when nothing is left to forward.
pub fn forwarded_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut kept = 0usize;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == SLUG_PARAM {
            continue;
        }
        serializer.append_pair(&key, &value);
        kept += 1;
    }
    (kept > 0).then(|| serializer.finish())
}
