//! "Did you mean" matching for mistyped options and sub-commands.

/// Minimum Jaro similarity for a candidate to be suggested.
///
/// Same cut-off clap applies to its own suggestions.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Return the candidates similar to `typed`, best match first.
///
/// Leading dashes and any `=value` suffix are ignored on both sides, so
/// `--tokn=abc` matches `--token`. Candidates with equal scores keep their
/// input order. An exact match is never suggested.
pub fn did_you_mean<I, S>(typed: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needle = bare(typed);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let hay = bare(candidate);
            if hay == needle {
                return None;
            }
            let score = strsim::jaro(needle, hay);
            (score > SIMILARITY_THRESHOLD).then(|| (score, candidate.to_string()))
        })
        .collect();

    // Stable sort keeps input order for ties.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

fn bare(token: &str) -> &str {
    let token = token.trim_start_matches('-');
    match token.split_once('=') {
        Some((name, _)) => name,
        None => token,
    }
}
