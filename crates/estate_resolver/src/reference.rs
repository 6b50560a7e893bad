//! Raw reference classification and normalization.

use url::Url;

/// Path markers that precede `<bucket>/<object path>` in storage URLs.
///
/// Ordered most specific first: `/storage/v1/object/` would otherwise match
/// the public and signed forms and leave `public/` in place of the bucket.
const OBJECT_MARKERS: &[&str] = &[
    "/storage/v1/object/public/",
    "/storage/v1/object/sign/",
    "/storage/v1/object/authenticated/",
    "/storage/v1/render/image/public/",
    "/storage/v1/object/",
];

/// A stored image reference, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawReference {
    /// Nothing usable was stored
    Empty,
    /// A storage URL pointing into the configured bucket
    AbsoluteUrl {
        /// The URL as stored
        url: String,
        /// Normalized bucket-relative path extracted from the URL
        path: String,
    },
    /// An absolute URL outside the configured bucket, already renderable
    ExternalUrl(String),
    /// A bucket-relative path with at least one folder segment
    BucketRelative(String),
    /// A single filename with no folder
    BareFilename(String),
}

impl RawReference {
    /// Classify a stored reference against the configured bucket.
    ///
    /// This is the only place that inspects the shape of a raw string; every
    /// later stage matches on the variant.
    pub fn classify(raw: &str, bucket: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return RawReference::Empty;
        }

        if let Ok(url) = Url::parse(trimmed)
            && matches!(url.scheme(), "http" | "https" | "data" | "blob")
        {
            return match split_object_path(url.path()) {
                Some((url_bucket, rest)) if url_bucket == bucket => RawReference::AbsoluteUrl {
                    url: trimmed.to_string(),
                    path: normalize(rest, bucket),
                },
                _ => RawReference::ExternalUrl(trimmed.to_string()),
            };
        }

        let path = normalize(trimmed, bucket);
        if path.is_empty() {
            RawReference::Empty
        } else if path.contains('/') {
            RawReference::BucketRelative(path)
        } else {
            RawReference::BareFilename(path)
        }
    }

    /// Normalized bucket-relative path, empty when there is none.
    pub fn path(&self) -> &str {
        match self {
            RawReference::AbsoluteUrl { path, .. }
            | RawReference::BucketRelative(path)
            | RawReference::BareFilename(path) => path,
            RawReference::Empty | RawReference::ExternalUrl(_) => "",
        }
    }

    /// Final path segment, empty when there is no path.
    pub fn basename(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or_default()
    }

    /// Second-to-last path segment, if the path has one.
    pub fn parent(&self) -> Option<&str> {
        let mut segments = self.path().rsplit('/');
        segments.next();
        segments.next().filter(|s| !s.is_empty())
    }
}

/// Strip storage URL prefixes and percent-decode a raw reference.
///
/// Removes a full `scheme://host/storage/v1/object/public/<bucket>/` prefix
/// (and the signed, authenticated, and render variants) with any query or
/// fragment on such a URL. Then leading slashes, `<bucket>/` segments, and
/// `public/` segments are stripped and the remainder percent-decoded, both
/// repeated until the path stops changing. Text that fails to decode is kept
/// as it is.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// ```
/// use estate_resolver::normalize;
///
/// assert_eq!(
///     normalize("https://host/storage/v1/object/public/property-photos/prop1/a.jpg", "property-photos"),
///     "prop1/a.jpg"
/// );
/// assert_eq!(normalize("/property-photos/public/prop1/a%20b.jpg", "property-photos"), "prop1/a b.jpg");
/// assert_eq!(normalize("public/property-photos/prop1/a%2520b.jpg", "property-photos"), "prop1/a b.jpg");
/// ```
pub fn normalize(raw: &str, bucket: &str) -> String {
    // Every pass that changes the text makes it shorter, so this terminates.
    let mut current = raw.trim().to_string();
    loop {
        let stripped = strip_leading_segments(strip_object_url(&current), bucket);
        let next = match urlencoding::decode(stripped) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                tracing::debug!(reference = stripped, error = %e, "Keeping undecoded reference");
                stripped.to_string()
            }
        };
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Object path of a storage URL, without query or fragment. Other text is
/// returned unchanged.
fn strip_object_url(text: &str) -> &str {
    if !text.contains("://") {
        return text;
    }
    let without_query = text.split(['?', '#']).next().unwrap_or_default();
    match split_object_path(without_query) {
        Some((_, object_path)) => object_path,
        None => without_query,
    }
}

/// Drop whitespace, leading slashes, `<bucket>` segments, and `public`
/// segments in any order until none is left.
fn strip_leading_segments<'a>(path: &'a str, bucket: &str) -> &'a str {
    let trim = |s: &'a str| s.trim().trim_start_matches('/');
    let mut rest = trim(path);
    loop {
        let next = trim(strip_leading_segment(rest, bucket));
        let next = trim(strip_leading_segment(next, "public"));
        if next.len() == rest.len() {
            return rest;
        }
        rest = next;
    }
}

/// Split `.../<marker><bucket>/<rest>` into `(bucket, rest)`.
fn split_object_path(path: &str) -> Option<(&str, &str)> {
    OBJECT_MARKERS.iter().find_map(|marker| {
        let start = path.find(marker)? + marker.len();
        let after = &path[start..];
        Some(after.split_once('/').unwrap_or((after, "")))
    })
}

fn strip_leading_segment<'a>(path: &'a str, segment: &str) -> &'a str {
    if segment.is_empty() {
        return path;
    }
    match path.strip_prefix(segment) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}
