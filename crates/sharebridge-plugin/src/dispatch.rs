// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON action dispatch for web-view plugin hosts.
//
// Hosts pass the action name and the JSON argument array the page sent. The
// first element is the options object, or the base64 string for
// `saveToGallery`. Failures come back as an `ErrorPayload`.

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::human_errors::{ErrorPayload, humanize_error};
use sharebridge_core::types::{ScreenshotOptions, ShareRequest, ShareToAppRequest};
use tracing::{debug, warn};

use crate::bridge::ShareBridge;

/// The actions a page may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Share,
    ShareToApp,
    GetAvailableApps,
    ShareScreenshot,
    SaveToGallery,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Share => "share",
            Action::ShareToApp => "shareToApp",
            Action::GetAvailableApps => "getAvailableApps",
            Action::ShareScreenshot => "shareScreenshot",
            Action::SaveToGallery => "saveToGallery",
        }
    }
}

impl FromStr for Action {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        [
            Action::Share,
            Action::ShareToApp,
            Action::GetAvailableApps,
            Action::ShareScreenshot,
            Action::SaveToGallery,
        ]
        .into_iter()
        .find(|action| action.as_str() == s)
        .ok_or_else(|| ShareError::InvalidInput(format!("unknown action: {s}")))
    }
}

/// First element of the argument array. A bare value is taken as-is.
fn first_arg(args: Value) -> Option<Value> {
    match args {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        other => Some(other),
    }
}

/// Deserialize the options object; `null` or missing means all defaults.
fn options<T: DeserializeOwned + Default>(arg: Option<Value>) -> Result<T> {
    match arg {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ShareError::InvalidInput(format!("malformed options: {e}"))),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

impl ShareBridge {
    /// Run `action` with the page's arguments.
    pub async fn execute(
        &self,
        action: &str,
        args: Value,
    ) -> std::result::Result<Value, ErrorPayload> {
        debug!(action, "execute");
        self.run(action, args).await.map_err(|err| {
            warn!(action, kind = %err.kind(), error = %err, "action failed");
            humanize_error(&err)
        })
    }

    async fn run(&self, action: &str, args: Value) -> Result<Value> {
        let action: Action = action.parse()?;
        let arg = first_arg(args);
        match action {
            Action::Share => to_json(self.share(options::<ShareRequest>(arg)?).await?),
            Action::ShareToApp => to_json(self.share_to_app(&options::<ShareToAppRequest>(arg)?)?),
            Action::GetAvailableApps => to_json(self.available_apps()),
            Action::ShareScreenshot => {
                to_json(self.share_screenshot(options::<ScreenshotOptions>(arg)?).await?)
            }
            Action::SaveToGallery => {
                let payload = arg.and_then(|v| v.as_str().map(str::to_owned));
                to_json(self.save_to_gallery(payload).await?)
            }
        }
    }
}
