// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-app dispatch for `shareToApp`.
//
// Planning is pure: given the resolved target, the request, and an already
// staged image URI, it decides which intent (or launcher) to use. The bridge
// only executes the plan.

use sharebridge_core::types::{Delivery, ShareToAppRequest, TargetApp};
use sharebridge_native::intent::{MIME_ANY_IMAGE, MIME_TEXT, actions, extras};
use sharebridge_native::Intent;

use crate::compose::{digits_only, join_body, whatsapp_link};

/// What to hand to the OS for one `shareToApp` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppDispatch {
    /// `startActivity(intent)`.
    Start { intent: Intent, delivery: Delivery },
    /// Bring the app to the foreground through its launcher intent.
    Launch { package: &'static str },
}

/// WhatsApp phone number reduced to digits, if any remain.
fn whatsapp_digits(request: &ShareToAppRequest) -> Option<String> {
    request
        .phone_number()
        .map(digits_only)
        .filter(|digits| !digits.is_empty())
}

/// Whether the plan for `app` attaches the request's image, so the caller
/// only stages it when it will be used.
pub fn uses_image(app: TargetApp, request: &ShareToAppRequest) -> bool {
    match app {
        TargetApp::Whatsapp => whatsapp_digits(request).is_none(),
        TargetApp::Telegram | TargetApp::Instagram => true,
        TargetApp::Facebook | TargetApp::Twitter | TargetApp::Email | TargetApp::Sms => false,
    }
}

/// `ACTION_SEND` scoped to one package with a text body and optional image.
fn scoped_send(package: &str, body: &str, image_uri: Option<&str>) -> Intent {
    let mut intent = Intent::new(actions::SEND).with_package(package);
    intent = match image_uri {
        Some(uri) => intent.with_type(MIME_ANY_IMAGE).with_stream(uri),
        None => intent.with_type(MIME_TEXT),
    };
    if !body.is_empty() {
        intent = intent.with_text(extras::TEXT, body);
    }
    intent
}

fn start(intent: Intent, delivery: Delivery) -> AppDispatch {
    AppDispatch::Start { intent, delivery }
}

/// Decide how to reach `app`.
pub fn plan(app: TargetApp, request: &ShareToAppRequest, image_uri: Option<&str>) -> AppDispatch {
    let spaced = join_body(request.text(), request.url(), " ");
    match app {
        TargetApp::Whatsapp => match whatsapp_digits(request) {
            Some(digits) => start(
                Intent::new(actions::VIEW).with_data(whatsapp_link(&digits, &spaced)),
                Delivery::DirectLink,
            ),
            None => start(
                scoped_send("com.whatsapp", &spaced, image_uri),
                Delivery::ShareIntent,
            ),
        },
        TargetApp::Telegram => start(
            scoped_send("org.telegram.messenger", &spaced, image_uri),
            Delivery::ShareIntent,
        ),
        TargetApp::Instagram => match image_uri {
            Some(uri) => start(
                Intent::new(actions::INSTAGRAM_ADD_TO_STORY)
                    .with_package("com.instagram.android")
                    .with_data(uri)
                    .with_type(MIME_ANY_IMAGE)
                    .granting_read(),
                Delivery::Story,
            ),
            None => AppDispatch::Launch {
                package: "com.instagram.android",
            },
        },
        TargetApp::Facebook => {
            let payload = request.url().or(request.text()).unwrap_or_default();
            start(
                scoped_send("com.facebook.katana", payload, None),
                Delivery::ShareIntent,
            )
        }
        TargetApp::Twitter => start(
            scoped_send("com.twitter.android", &spaced, None),
            Delivery::ShareIntent,
        ),
        TargetApp::Email => {
            let mut intent = Intent::new(actions::SEND_TO).with_data("mailto:");
            let body = join_body(request.text(), request.url(), "\n");
            if !body.is_empty() {
                intent = intent.with_text(extras::TEXT, body);
            }
            start(intent, Delivery::ShareIntent)
        }
        TargetApp::Sms => {
            let recipient = request.phone_number().unwrap_or_default();
            let mut intent = Intent::new(actions::SEND_TO).with_data(format!("sms:{recipient}"));
            if !spaced.is_empty() {
                intent = intent.with_text(extras::SMS_BODY, spaced);
            }
            start(intent, Delivery::ShareIntent)
        }
    }
}

/// Intent whose resolvability decides if `app` counts as available, for the
/// targets that are not a single package.
pub fn availability_probe(app: TargetApp) -> Option<Intent> {
    match app {
        TargetApp::Email => Some(Intent::new(actions::SEND_TO).with_data("mailto:")),
        TargetApp::Sms => Some(Intent::new(actions::SEND_TO).with_data("sms:")),
        _ => None,
    }
}
