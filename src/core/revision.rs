use crate::domain::model::RevisionLink;
use crate::domain::ports::RevisionSearch;

/// Query variants tried in order for one release-note line.
///
/// Revision titles often lack the trailing period of the release note, or
/// use a plain space where the note has `Bug N - title`.
pub fn title_candidates(title: &str) -> Vec<String> {
    let shortened = drop_last_char(title);
    let raw = [
        title.to_string(),
        shortened.to_string(),
        title.replacen(" - ", " ", 1),
        shortened.replacen(" - ", " ", 1),
    ];

    let mut candidates: Vec<String> = Vec::with_capacity(raw.len());
    for candidate in raw {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

fn drop_last_char(s: &str) -> &str {
    match s.char_indices().last() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Looks a release-note line up as an exact phrase. The first error aborts
/// the remaining candidates.
pub async fn resolve_revision<R: RevisionSearch>(search: &R, title: &str) -> RevisionLink {
    for candidate in title_candidates(title) {
        let query = format!("\"{}\"", candidate);
        tracing::debug!("Searching revisions for {}", query);

        match search.find_revision(&query).await {
            Ok(Some(uri)) => return RevisionLink::Found(uri),
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Revision search failed for {}: {}", query, e);
                return RevisionLink::Error(e.to_string());
            }
        }
    }

    RevisionLink::NotFound
}
