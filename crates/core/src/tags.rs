//! Question tag normalization.

/// Maximum number of tags a question may carry.
pub const MAX_TAGS: usize = 10;

/// Trim tags, drop empty ones and duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Split a `?tags=a,b,c` query value into normalized tags.
pub fn parse_tag_query(raw: &str) -> Vec<String> {
    let parts: Vec<String> = raw.split(',').map(str::to_string).collect();
    normalize_tags(&parts)
}

/// Reject tag lists longer than [`MAX_TAGS`].
pub fn validate_tag_count(tags: &[String]) -> Result<(), String> {
    if tags.len() > MAX_TAGS {
        return Err(format!("A question may have at most {MAX_TAGS} tags"));
    }
    Ok(())
}
