// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Activity-result entry point called from the host activity.
//
// Kotlin side:
//
//   override fun onActivityResult(requestCode: Int, resultCode: Int, data: Intent?) {
//       if (!ShareBridgeNative.onActivityResult(requestCode, resultCode)) {
//           super.onActivityResult(requestCode, resultCode, data)
//       }
//   }

use jni::JNIEnv;
use jni::objects::JClass;
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::pending::PendingShares;

static ACTIVITY_RESULTS: Mutex<Option<PendingShares>> = Mutex::new(None);

/// Send activity results to `pending` from now on.
pub(crate) fn route_activity_results(pending: PendingShares) {
    let previous = ACTIVITY_RESULTS.lock().replace(pending);
    if let Some(previous) = previous {
        if !previous.is_empty() {
            warn!(
                abandoned = previous.len(),
                "share bridge replaced while share sheets were still open"
            );
        }
    }
    info!("activity results routed to share bridge");
}

/// `ShareBridgeNative.onActivityResult(int, int): boolean`.
///
/// Returns `true` when the request code belonged to a pending share.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_sharebridge_ShareBridgeNative_onActivityResult(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    request_code: jint,
    result_code: jint,
) -> jboolean {
    let handled = ACTIVITY_RESULTS
        .lock()
        .as_ref()
        .is_some_and(|pending| pending.complete(request_code, result_code));
    if handled { JNI_TRUE } else { JNI_FALSE }
}
