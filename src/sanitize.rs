use std::collections::HashSet;

use ammonia::Builder;

/// Strips every HTML tag from `text`, keeping the text inside ordinary tags.
/// `script` and `style` elements are dropped together with their content, and
/// characters that would read as markup are entity-escaped.
///
/// Dropping script and style content is stricter than bleach's
/// `clean(strip=True)`, which keeps that inner text in escaped form.
pub fn sanitize(text: &str) -> String {
	Builder::default()
		.tags(HashSet::new())
		.clean(text)
		.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_text_is_unchanged() {
		assert_eq!(sanitize("Alice"), "Alice");
		assert_eq!(sanitize(""), "");
	}

	#[test]
	fn tags_are_stripped() {
		assert_eq!(sanitize("<b>Bob</b>"), "Bob");
		assert_eq!(sanitize("<a href=\"x\">Carol</a> Smith"), "Carol Smith");
	}

	#[test]
	fn scripts_are_removed_with_their_content() {
		assert_eq!(sanitize("<script>alert(1)</script>Dave"), "Dave");
	}

	#[test]
	fn ampersands_are_escaped() {
		assert_eq!(sanitize("Tom & Jerry"), "Tom &amp; Jerry");
	}
}
