// SPDX-License-Identifier: GPL-3.0-or-later

//! Running a unit of work once per language, w/ the *server-side* notion
//! of "current UI language" pinned to that language for the duration.
//!
//! The form-document endpoint shapes its response by the acting user's
//! language session rather than accepting a language parameter, so the
//! only way to read or write a specific language variant is to rewrite the
//! shared user-settings resource around the work. This is a saved/restored
//! global precondition, not a lock: nothing enforces mutual exclusion, and
//! two workflows racing on the same user account will corrupt each other's
//! results. Callers are expected to run one workflow at a time.

use crate::{
    LabelError,
    api::{Transport, identity},
    data::{Lcid, is_known_lcid},
    invalid_input_error,
};
use tracing::{debug, warn};

/// Run `work` once per LCID in `lcids`, in the given order, w/ the user's
/// UI language switched to that LCID beforehand, collecting the results in
/// order.
///
/// Codes absent from the known-language table are dropped w/ a warning;
/// if nothing survives the filter the call fails w/
/// [InvalidInput][LabelError::InvalidInput] before touching the org. The
/// user's original `uilanguageid` is captured first and restored on every
/// exit path, best effort: a failed restoration is logged but never masks
/// the underlying outcome. If any invocation of `work` fails, the whole
/// call fails w/ that error after the restoration attempt -- no partial
/// results are returned.
pub async fn for_each_language<T, F, R>(
    t: &T,
    base_url: &str,
    lcids: &[Lcid],
    mut work: F,
) -> Result<Vec<R>, LabelError>
where
    T: Transport,
    F: AsyncFnMut(Lcid) -> Result<R, LabelError>,
{
    let valid: Vec<Lcid> = lcids
        .iter()
        .copied()
        .filter(|x| {
            let known = is_known_lcid(*x);
            if !known {
                warn!("Dropping unknown language code {}", x);
            }
            known
        })
        .collect();
    if valid.is_empty() {
        invalid_input_error!("no valid language codes provided");
    }

    let user_id = identity::who_am_i(t, base_url).await?;
    let original = identity::user_language_settings(t, base_url, &user_id).await?;
    debug!(
        "Iterating {} language(s); will restore UI language {}",
        valid.len(),
        original.ui_language_id
    );

    let mut results = Vec::with_capacity(valid.len());
    let mut failure = None;
    for lcid in valid {
        if let Err(x) = identity::set_ui_language(t, base_url, &user_id, lcid).await {
            failure = Some(x);
            break;
        }
        match work(lcid).await {
            Ok(r) => results.push(r),
            Err(x) => {
                failure = Some(x);
                break;
            }
        }
    }

    // best-effort cleanup of the shared precondition, on every exit path...
    if let Err(x) =
        identity::set_ui_language(t, base_url, &user_id, original.ui_language_id).await
    {
        warn!(
            "Failed restoring UI language {}: {}",
            original.ui_language_id, x
        );
    }

    match failure {
        Some(x) => Err(x),
        None => Ok(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockOrg;
    use tracing_test::traced_test;

    const BASE: &str = "https://mock.crm.dynamics.com";

    #[traced_test]
    #[tokio::test]
    async fn test_restores_on_success() {
        let org = MockOrg::new(&[1033, 1031, 1036]);
        let visited = for_each_language(&org, BASE, &[1031, 1036], async |lcid| Ok(lcid))
            .await
            .unwrap();
        assert_eq!(visited, vec![1031, 1036]);
        assert_eq!(org.ui_lcid(), 1033);
        // switch, switch, restore...
        assert_eq!(org.settings_writes(), vec![1031, 1036, 1033]);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_restores_on_midway_failure() {
        let org = MockOrg::new(&[1033, 1031, 1036]);
        let mut calls = 0u32;
        let result = for_each_language(&org, BASE, &[1033, 1031, 1036], async |_| {
            calls += 1;
            if calls == 2 {
                Err(LabelError::Runtime("boom".into()))
            } else {
                Ok(())
            }
        })
        .await;
        assert!(result.is_err());
        // the third language was never attempted...
        assert_eq!(calls, 2);
        // ...and the original language is back regardless...
        assert_eq!(org.ui_lcid(), 1033);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_unknown_lcids_filtered() {
        let org = MockOrg::new(&[1033]);
        let visited = for_each_language(&org, BASE, &[1033, 9999], async |lcid| Ok(lcid))
            .await
            .unwrap();
        assert_eq!(visited, vec![1033]);
        assert!(logs_contain("Dropping unknown language code 9999"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_all_invalid_fails_eagerly() {
        let org = MockOrg::new(&[1033]);
        let mut called = false;
        let result = for_each_language(&org, BASE, &[9999], async |_| {
            called = true;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(LabelError::InvalidInput(_))));
        assert!(!called);
        // rejected before any network call: no settings writes at all...
        assert!(org.settings_writes().is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn test_restore_failure_does_not_mask_success() {
        let org = MockOrg::new(&[1033, 1036]);
        // writes: switch (0), restore (1) -- fail the restore...
        org.fail_settings_write_at(1);
        let visited = for_each_language(&org, BASE, &[1036], async |lcid| Ok(lcid))
            .await
            .unwrap();
        assert_eq!(visited, vec![1036]);
        // restoration failed, so the org is left on 1036 -- the documented
        // best-effort hazard...
        assert_eq!(org.ui_lcid(), 1036);
    }
}
