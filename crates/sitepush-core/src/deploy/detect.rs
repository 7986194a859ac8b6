//! Published-URL detection in deploy tool output.

const URL_MARKER: &str = "https://";

/// Return the deploy URL announced by `line`, if any.
///
/// A line matches when it contains both `https://` and `provider`, compared
/// case-insensitively. The first `https://` token is returned when it parses
/// as a URL; otherwise the whole trimmed line is returned.
pub fn detect_deploy_url(line: &str, provider: &str) -> Option<String> {
    let lowered = line.to_lowercase();
    if !lowered.contains(URL_MARKER) || !lowered.contains(&provider.to_lowercase()) {
        return None;
    }

    Some(extract_url(line).unwrap_or_else(|| line.trim().to_string()))
}

fn extract_url(line: &str) -> Option<String> {
    line.split_whitespace()
        .filter_map(|token| {
            let start = token
                .as_bytes()
                .windows(URL_MARKER.len())
                .position(|w| w.eq_ignore_ascii_case(URL_MARKER.as_bytes()))?;
            Some(trim_url_token(&token[start..]))
        })
        .find(|candidate| url::Url::parse(candidate).is_ok())
        .map(str::to_string)
}

/// Strip punctuation and quoting the tool wraps around links.
fn trim_url_token(token: &str) -> &str {
    token.trim_end_matches(|c: char| {
        matches!(c, '.' | ',' | ';' | ':' | ')' | ']' | '>' | '"' | '\'' | '`')
    })
}
