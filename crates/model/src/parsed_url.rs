//! URL inspection helpers.

use url::Url;

/// Returns the host component of `raw`, if it parses as an absolute URL with a
/// non-empty host.
///
/// Unparseable input yields `None`, same as a URL without a host. Parsing
/// follows the WHATWG URL rules, so hosts with forbidden characters such as
/// spaces are rejected rather than extracted loosely.
pub fn host_of(raw: &str) -> Option<String> {
	let parsed = Url::parse(raw).ok()?;
	parsed.host_str().filter(|host| !host.is_empty()).map(str::to_owned)
}

/// Returns true when `raw` carries a host component.
pub fn has_host(raw: &str) -> bool {
	host_of(raw).is_some()
}
