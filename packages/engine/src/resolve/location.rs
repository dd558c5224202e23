//! File and location resolution
//!
//! A result's file name comes from, in order: a message embedded on its
//! first location entry, the first location's physical artifact reference
//! (resolved against the run's base-URI table, or against the artifact
//! list when only an index is given), the top-level analysis target, and
//! finally the caller's default.

use url::Url;

use crate::rundata::{non_blank, RunData};
use crate::sarif::{ArtifactLocation, Location};

use super::ResultResolution;

/// Default file name used when no location resolves.
pub const UNKNOWN_FILE: &str = "Unknown";

/// Base-URI chains are input-controlled; cap recursion so a cyclic table
/// cannot overflow the stack.
const MAX_BASE_DEPTH: usize = 8;

impl ResultResolution<'_> {
    /// The result's resolved file name, or `default` when nothing
    /// resolves.
    #[must_use]
    pub fn file_name(&self, default: &str) -> String {
        if let Some(location) = self.first_location() {
            if let Some(text) = location
                .message
                .as_ref()
                .and_then(|m| non_blank(m.text.as_deref()))
            {
                return text.to_string();
            }
            if let Some(name) = location
                .physical_location
                .as_ref()
                .and_then(|pl| pl.artifact_location.as_ref())
                .and_then(|al| full_file_name(al, self.run))
            {
                return name;
            }
        }
        if let Some(name) = self
            .result
            .analysis_target
            .as_ref()
            .and_then(|al| full_file_name(al, self.run))
        {
            return name;
        }
        default.to_string()
    }

    /// Start line of the first physical location's region.
    #[must_use]
    pub fn line_number(&self) -> Option<u32> {
        self.first_location()?
            .physical_location
            .as_ref()?
            .region
            .as_ref()?
            .start_line
    }

    /// Snippet text of the first physical location's region.
    #[must_use]
    pub fn snippet(&self) -> Option<String> {
        let snippet = self
            .first_location()?
            .physical_location
            .as_ref()?
            .region
            .as_ref()?
            .snippet
            .as_ref()?;
        non_blank(snippet.text.as_deref()).map(str::to_string)
    }

    fn first_location(&self) -> Option<&Location> {
        self.result.locations.as_ref()?.first()
    }
}

/// Resolve an artifact location to a full file name. A location without
/// a URI but with an index refers into the run's artifact list.
fn full_file_name(location: &ArtifactLocation, run: &RunData) -> Option<String> {
    if location.uri.is_none() {
        let artifact = run.artifact_by_index(location.index)?;
        let indirect = artifact.location?;
        return resolve_uri(&indirect, run, 0);
    }
    resolve_uri(location, run, 0)
}

fn resolve_uri(location: &ArtifactLocation, run: &RunData, depth: usize) -> Option<String> {
    let uri = location.uri.clone()?;
    let Some(base_id) = location.uri_base_id.as_deref() else {
        return Some(uri);
    };
    let Some(base) = run.base_location(base_id) else {
        return Some(uri);
    };
    if depth >= MAX_BASE_DEPTH {
        log::warn!("base URI chain under '{base_id}' is too deep, treating uri as absolute");
        return Some(uri);
    }
    match resolve_uri(base, run, depth + 1) {
        Some(base_uri) => Some(join_uris(&base_uri, &uri)),
        None => Some(uri),
    }
}

/// Join a relative URI onto a base: RFC resolution when the base parses
/// as an absolute URL, plain path concatenation otherwise.
fn join_uris(base: &str, relative: &str) -> String {
    if let Ok(base_url) = Url::parse(base) {
        if let Ok(joined) = base_url.join(relative) {
            return joined.to_string();
        }
    }
    let mut out = base.trim_end_matches('/').to_string();
    out.push('/');
    out.push_str(relative.trim_start_matches('/'));
    out
}
