// SPDX-License-Identifier: MIT OR Apache-2.0
//! The resolution algorithm itself.

use std::collections::BTreeMap;

use uuid::Uuid;
use wd_core::{
    AuthorityClaim, CmpStatus, IdentityScanResult, IdentityStats, IdentityStatus, ProjectIdentity,
    UnresolvedInventoryItem,
};

use crate::authority::Authorities;
use crate::url::normalize;

/// Fixed namespace UUID for minting project UUIDs: a constant shared across
/// all machines. Generated once and never regenerated — changing it would
/// re-mint every project's UUID.
pub const NAMESPACE_FEDERATION: Uuid = Uuid::from_u128(0x5f1c_a1a0_9b2e_4f6d_8c3a_1e7d2b905f44);

/// Mint the deterministic UUIDv5 for a `project_key`.
#[must_use]
pub fn mint_uuid(project_key: &str) -> Uuid {
    Uuid::new_v5(&NAMESPACE_FEDERATION, project_key.as_bytes())
}

/// One authority's non-silent claim, paired with the name used in
/// [`AuthorityClaim::authority`].
///
/// Overrides carry no UUID field of their own (they force `display_name`,
/// `classification`, aliases, and exclusion — see `DESIGN.md`), so only
/// `database` and `legacy_registry` can ever produce a UUID claim.
fn claims_for(project_key: &str, authorities: &Authorities) -> Vec<AuthorityClaim> {
    let mut claims = Vec::new();
    if let Some(record) = authorities.cmp.get(project_key) {
        if let Some(uuid) = record.uuid {
            claims.push(AuthorityClaim { authority: "database".into(), uuid });
        }
    }
    if let Some(uuid) = authorities.legacy_registry.get(project_key) {
        claims.push(AuthorityClaim { authority: "legacy_registry".into(), uuid });
    }
    claims
}

/// Classify `identity_status` given the minted UUID and the explicit
/// authority claims.
///
/// **Design decision (see `DESIGN.md`):** a sole authority claim that
/// disagrees with the deterministic mint is treated as a conflict too, by
/// folding the mint itself in as an implicit claim for disagreement
/// purposes (but never enumerating it as a competing claim — only the
/// explicit authorities appear in `conflicting_claims`). Database presence
/// among agreeing claims
/// distinguishes `converged` (the system of record confirms it) from
/// `keyed` (a weaker authority confirms it, but the database has not yet
/// recorded it).
fn classify(minted: Uuid, claims: &[AuthorityClaim]) -> IdentityStatus {
    if claims.is_empty() {
        return IdentityStatus::Discovered;
    }

    let mut distinct: Vec<Uuid> = vec![minted];
    for claim in claims {
        if !distinct.contains(&claim.uuid) {
            distinct.push(claim.uuid);
        }
    }
    if distinct.len() > 1 {
        return IdentityStatus::Conflict;
    }

    let database_agrees = claims.iter().any(|c| c.authority == "database");
    if database_agrees {
        IdentityStatus::Converged
    } else {
        IdentityStatus::Keyed
    }
}

fn cmp_status(project_key: &str, authorities: &Authorities) -> CmpStatus {
    match authorities.cmp.get(project_key) {
        None => CmpStatus::Missing,
        Some(record) if record.uuid.is_some() => CmpStatus::FoundWithUuid,
        Some(_) => CmpStatus::FoundNoUuid,
    }
}

/// Resolve a single inventory URL into a [`ProjectIdentity`], or `Err` with
/// a reason when the URL does not normalize.
pub fn resolve_one(raw_url: &str, authorities: &Authorities) -> Result<ProjectIdentity, String> {
    let normalized = normalize(raw_url).ok_or_else(|| format!("not a recognizable Git remote URL: {raw_url}"))?;
    let project_key = normalized.project_key();
    let minted = mint_uuid(&project_key);

    let claims = claims_for(&project_key, authorities);
    let identity_status = classify(minted, &claims);
    let cmp = cmp_status(&project_key, authorities);

    let record = authorities.cmp.get(&project_key);
    let override_record = authorities.override_for(&project_key);

    let display_name = override_record
        .and_then(|o| o.display_name.clone())
        .or_else(|| record.map(|r| r.display_name.clone()))
        .unwrap_or_else(|| normalized.repo.clone());

    let classification = override_record
        .and_then(|o| o.classification)
        .or_else(|| record.and_then(|r| r.classification))
        .unwrap_or(wd_core::Classification::Active);

    let excluded = override_record.is_some_and(|o| o.excluded);
    let mut enrichment = BTreeMap::new();
    if excluded {
        enrichment.insert("excluded".to_string(), serde_json::json!(true));
    }

    Ok(ProjectIdentity {
        project_uuid: minted,
        project_key,
        display_name,
        github_url: Some(normalized.url),
        local_paths: Vec::new(),
        classification,
        identity_status,
        cmp_status: cmp,
        conflicting_claims: if identity_status == IdentityStatus::Conflict { claims } else { Vec::new() },
        enrichment,
    })
}

/// Resolve every inventory URL, deduplicated by normalized URL, producing a
/// full [`IdentityScanResult`] ordered by `project_key` ascending, so two
/// runs over the same inputs are byte-for-byte identical.
#[must_use]
pub fn resolve_all(inventory_urls: &[String], authorities: &Authorities) -> IdentityScanResult {
    let mut seen = std::collections::BTreeSet::new();
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();

    for raw in inventory_urls {
        match resolve_one(raw, authorities) {
            Ok(identity) => {
                if seen.insert(identity.project_key.clone()) {
                    resolved.push(identity);
                }
            }
            Err(reason) => unresolved.push(UnresolvedInventoryItem { source: raw.clone(), reason }),
        }
    }

    resolved.sort_by(|a, b| a.project_key.cmp(&b.project_key));
    unresolved.sort_by(|a, b| a.source.cmp(&b.source));

    let mut stats = IdentityStats::default();
    for identity in &resolved {
        stats.record(identity);
    }

    IdentityScanResult { resolved, unresolved, stats }
}
