// SPDX-License-Identifier: MIT OR Apache-2.0

//! Member-level fan-out.

use grouper_core::MemberId;
use grouper_store::Store;
use tracing::warn;

use crate::scope::Scope;
use crate::traits::{MoveHook, Roster};

/// Reconcile one member across every scope they participate in that has
/// at least one rule set. Used on scope-agnostic triggers such as
/// attribute changes.
///
/// Best-effort: a scope that fails to load or verify is logged and does
/// not block reconciliation of the member's other scopes.
pub fn verify_everywhere<S, R>(
    store: &mut S,
    roster: &R,
    mut hook: Option<&mut (dyn MoveHook + 'static)>,
    member: MemberId,
    preserve_manual: bool,
) -> bool
where
    S: Store,
    R: Roster,
{
    let mut ok = true;
    for scope_id in roster.scopes_of(member) {
        let scope = match Scope::load(store, scope_id) {
            Ok(scope) => scope,
            Err(error) => {
                warn!(%member, scope = %scope_id, %error, "failed to load scope");
                ok = false;
                continue;
            }
        };
        if !scope.has_rule_sets() {
            continue;
        }
        ok &= scope.verify_member(store, roster, hook.as_deref_mut(), member, preserve_manual);
    }
    ok
}
