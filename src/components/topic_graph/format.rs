/// Compact engagement count: `999`, `1.0K`, `1.5M`.
pub fn format_count(n: u64) -> String {
	if n >= 1_000_000 {
		format!("{:.1}M", n as f64 / 1_000_000.0)
	} else if n >= 1_000 {
		format!("{:.1}K", n as f64 / 1_000.0)
	} else {
		n.to_string()
	}
}

/// Cut `text` so that `measure(result) <= max_width`, ending in an ellipsis
/// when anything was dropped.
pub fn truncate_to_width(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
	if measure(text) <= max_width {
		return text.to_string();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate = format!("{}…", chars.iter().collect::<String>().trim_end());
		if measure(&candidate) <= max_width {
			return candidate;
		}
	}
	"…".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts() {
		assert_eq!(format_count(0), "0");
		assert_eq!(format_count(999), "999");
		assert_eq!(format_count(1_000), "1.0K");
		assert_eq!(format_count(45_200), "45.2K");
		assert_eq!(format_count(234_000), "234.0K");
		assert_eq!(format_count(1_500_000), "1.5M");
	}

	#[test]
	fn truncates_by_measured_width() {
		let per_char = |s: &str| s.chars().count() as f64 * 10.0;
		assert_eq!(truncate_to_width("Gaming News", 120.0, per_char), "Gaming News");
		assert_eq!(
			truncate_to_width("Space Exploration", 120.0, per_char),
			"Space Explo…"
		);
		assert_eq!(truncate_to_width("Web Development", 80.0, per_char), "Web Dev…");
		// trailing whitespace is dropped before the ellipsis
		assert_eq!(truncate_to_width("Web Development", 50.0, per_char), "Web…");
		assert_eq!(truncate_to_width("abc", 5.0, per_char), "…");
	}
}
