//! Release disambiguation
//!
//! A release reference on the command line is a numeric release id, a full
//! commit hash or a commit prefix. [`resolve_release_reference`] maps it to
//! exactly one release id.

use tracing::debug;

use crate::api::{FleetApi, Release};
use crate::bail_usage;
use crate::error::{FleetError, Result};
use crate::resource::ResourceRef;

/// Resolve a raw release reference to a single release id.
///
/// Numeric references are tried as release ids first and fall back to
/// commit-prefix matching when no release has that id. A commit that
/// matches the reference in full wins over longer commits sharing the
/// prefix.
pub async fn resolve_release_reference(api: &dyn FleetApi, raw: &str) -> Result<u64> {
    let reference = raw.trim();
    if reference.is_empty() {
        bail_usage!("release reference must not be empty");
    }

    if let Some(id) = ResourceRef::coerce(reference).as_id() {
        if let Some(release) = api.get_release(id).await? {
            debug!(reference, release_id = release.id, "release resolved by id");
            return Ok(release.id);
        }
        debug!(reference, "no release with this id, trying as commit");
    }

    let commit = reference.to_lowercase();
    let candidates = api.find_releases_by_commit(&commit).await?;
    let release = pick_release(reference, &commit, candidates)?;
    debug!(reference, release_id = release.id, commit = %release.commit, "release resolved by commit");
    Ok(release.id)
}

fn pick_release(reference: &str, commit: &str, mut candidates: Vec<Release>) -> Result<Release> {
    if let Some(pos) = candidates
        .iter()
        .position(|release| release.commit.eq_ignore_ascii_case(commit))
    {
        return Ok(candidates.swap_remove(pos));
    }

    match candidates.len() {
        0 => Err(FleetError::ReleaseNotFound {
            reference: reference.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(FleetError::AmbiguousRelease {
            reference: reference.to_string(),
            candidates: candidates.into_iter().map(|release| release.commit).collect(),
        }),
    }
}
