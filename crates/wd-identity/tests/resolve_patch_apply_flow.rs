// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end coverage of the full identity pipeline exposed by this
//! crate's public API: normalize → resolve → derive patches → apply
//! against a CMP target, across a batch of inventory URLs in one pass.

use std::collections::BTreeMap;

use uuid::Uuid;
use wd_core::{CmpStatus, IdentityPatchAction, IdentityStatus};
use wd_error::WdError;
use wd_identity::{apply_patch, derive_patches, resolve_all, ApplyOutcome, Authorities, CmpProjectRecord, CmpRowState, CmpTarget};

#[derive(Default)]
struct FakeCmp {
    rows: BTreeMap<String, Option<Uuid>>,
}

impl CmpTarget for FakeCmp {
    fn row_state(&self, project_key: &str) -> CmpRowState {
        match self.rows.get(project_key) {
            None => CmpRowState::Absent,
            Some(None) => CmpRowState::PresentWithoutUuid,
            Some(Some(uuid)) => CmpRowState::PresentWithUuid(*uuid),
        }
    }

    fn create(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), WdError> {
        self.rows.insert(project_key.to_string(), Some(project_uuid));
        Ok(())
    }

    fn backfill_uuid(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), WdError> {
        self.rows.insert(project_key.to_string(), Some(project_uuid));
        Ok(())
    }
}

#[test]
fn a_fresh_project_is_created_a_known_one_is_left_alone_and_a_conflict_is_frozen() {
    let mut authorities = Authorities::default();

    // `widgets` is already converged: the database agrees with the mint.
    let widgets_key = "github.com:acme/widgets";
    let widgets_uuid = wd_identity::mint_uuid(widgets_key);
    authorities.cmp.insert(
        widgets_key.to_string(),
        CmpProjectRecord { display_name: "widgets".into(), uuid: Some(widgets_uuid), github_url: None, classification: None },
    );

    // `gadgets` disagrees between database and legacy registry.
    let gadgets_key = "github.com:acme/gadgets";
    let db_uuid = Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"db");
    let legacy_uuid = Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"legacy");
    authorities.cmp.insert(
        gadgets_key.to_string(),
        CmpProjectRecord { display_name: "gadgets".into(), uuid: Some(db_uuid), github_url: None, classification: None },
    );
    authorities.legacy_registry.insert(gadgets_key.to_string(), legacy_uuid);

    let urls = vec![
        "https://github.com/acme/widgets.git".to_string(),
        "https://github.com/acme/gadgets.git".to_string(),
        "https://github.com/acme/sprockets.git".to_string(),
    ];

    let scan = resolve_all(&urls, &authorities);
    assert_eq!(scan.resolved.len(), 3);
    assert!(scan.unresolved.is_empty());

    let patches = derive_patches(&scan.resolved);
    assert_eq!(patches.len(), 3);

    let mut target = FakeCmp::default();
    target.rows.insert(gadgets_key.to_string(), Some(db_uuid));

    for patch in &patches {
        let outcome = apply_patch(patch, &mut target).unwrap();
        match patch.project_key.as_str() {
            key if key == widgets_key => assert_eq!(outcome, ApplyOutcome::NoOp),
            key if key == gadgets_key => {
                assert_eq!(outcome, ApplyOutcome::Skipped);
                assert!(matches!(patch.action, IdentityPatchAction::ConflictFreeze { .. }));
            }
            _ => assert_eq!(outcome, ApplyOutcome::Applied),
        }
    }

    let widgets = scan.resolved.iter().find(|p| p.project_key == widgets_key).unwrap();
    assert_eq!(widgets.identity_status, IdentityStatus::Converged);
    assert_eq!(widgets.cmp_status, CmpStatus::FoundWithUuid);

    let gadgets = scan.resolved.iter().find(|p| p.project_key == gadgets_key).unwrap();
    assert_eq!(gadgets.identity_status, IdentityStatus::Conflict);

    let sprockets_key = "github.com:acme/sprockets";
    assert_eq!(target.row_state(sprockets_key), CmpRowState::PresentWithUuid(wd_identity::mint_uuid(sprockets_key)));
}
