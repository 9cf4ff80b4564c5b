//! Path pattern matching.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use upow_core::{Error, Result};

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Compiled size limit for the generated regex.
const MAX_REGEX_SIZE: usize = 1 << 20;

/// A compiled path pattern.
///
/// Supports patterns like:
/// - `/health/` - Exact match
/// - `/api/entries/{id}/` - Single path parameter
/// - `/api/users/{id}/entries/` - Parameter in the middle
///
/// A trailing slash in the pattern is optional in the matched path, so
/// `/api/me/` also matches `/api/me`.
#[derive(Debug, Clone)]
pub struct PathPattern {
	pattern: String,
	regex: regex::Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compile a pattern.
	///
	/// # Errors
	///
	/// Fails when the pattern is too long, a parameter name is empty or not
	/// an identifier, or a brace is left unclosed.
	///
	/// # Examples
	///
	/// ```
	/// use upow_urls::PathPattern;
	///
	/// let pattern = PathPattern::new("/api/entries/{id}/").unwrap();
	/// let params = pattern.matches("/api/entries/e-42/").unwrap();
	/// assert_eq!(params["id"], "e-42");
	/// assert!(pattern.matches("/api/entries/").is_none());
	/// ```
	pub fn new(pattern: &str) -> Result<Self> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(Error::Internal(format!(
				"Pattern length {} exceeds maximum allowed length of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| Error::Internal(format!("Failed to compile pattern regex: {}", e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	fn compile_pattern(pattern: &str) -> Result<(String, Vec<String>)> {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut chars = pattern.chars().peekable();

		while let Some(c) = chars.next() {
			if c == '{' {
				let mut param = String::new();
				let mut closed = false;
				for next in chars.by_ref() {
					if next == '}' {
						closed = true;
						break;
					}
					param.push(next);
				}

				let valid_name = !param.is_empty()
					&& param.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
				if !closed || !valid_name {
					return Err(Error::Internal(format!(
						"Invalid parameter in pattern: {}",
						pattern
					)));
				}

				regex_str.push_str(&format!("(?P<{}>[^/]+)", param));
				param_names.push(param);
			} else if c == '/' && chars.peek().is_none() {
				regex_str.push_str("/?");
			} else {
				regex_str.push_str(&regex::escape(&c.to_string()));
			}
		}

		regex_str.push('$');
		Ok((regex_str, param_names))
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Match a request path, returning percent-decoded parameter values
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let caps = self.regex.captures(path)?;
		let params = self
			.param_names
			.iter()
			.filter_map(|name| {
				caps.name(name).map(|m| {
					let value = percent_decode_str(m.as_str())
						.decode_utf8_lossy()
						.to_string();
					(name.clone(), value)
				})
			})
			.collect();
		Some(params)
	}
}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/health/", "/health/", true)]
	#[case("/health/", "/health", true)]
	#[case("/health/", "/health/extra/", false)]
	#[case("/api/entries/{id}/", "/api/entries/abc/", true)]
	#[case("/api/entries/{id}/", "/api/entries/abc/validation/", false)]
	#[case("/api/entries/{id}/validation/", "/api/entries/abc/validation", true)]
	fn test_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		let pattern = PathPattern::new(pattern).unwrap();
		assert_eq!(pattern.matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_multiple_params() {
		let pattern = PathPattern::new("/users/{user_id}/entries/{entry_id}/").unwrap();
		let params = pattern.matches("/users/u1/entries/e2/").unwrap();

		assert_eq!(pattern.param_names(), &["user_id", "entry_id"]);
		assert_eq!(params["user_id"], "u1");
		assert_eq!(params["entry_id"], "e2");
	}

	#[rstest]
	fn test_params_are_percent_decoded() {
		let pattern = PathPattern::new("/profile/{id}/").unwrap();
		let params = pattern.matches("/profile/a%20b/").unwrap();

		assert_eq!(params["id"], "a b");
	}

	#[rstest]
	fn test_literal_dots_are_escaped() {
		let pattern = PathPattern::new("/files/index.json").unwrap();

		assert!(pattern.matches("/files/index.json").is_some());
		assert!(pattern.matches("/files/indexXjson").is_none());
	}

	#[rstest]
	#[case("/entries/{}/")]
	#[case("/entries/{id/")]
	#[case("/entries/{id-x}/")]
	fn test_invalid_patterns(#[case] pattern: &str) {
		assert!(PathPattern::new(pattern).is_err());
	}
}
