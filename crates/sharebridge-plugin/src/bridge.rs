// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ShareBridge: the operations the web layer calls.
//
// UI-affine work (intent launch, surface capture) runs on the caller's task;
// gallery saves move to tokio's blocking pool. Share sheets resolve through
// the pending table when the host forwards the activity result.

use std::sync::Arc;

use sharebridge_core::config::BridgeConfig;
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::{
    AppAvailability, Delivery, GalleryResult, ScreenshotOptions, ScreenshotResponse, ShareRequest,
    ShareResponse, ShareToAppRequest, ShareToAppResponse, TargetApp,
};
use sharebridge_media::{ImageProcessor, decode_base64};
use sharebridge_native::intent::{MIME_ANY_IMAGE, MIME_TEXT, actions, extras};
use sharebridge_native::{GalleryStore, Intent, PlatformBridge};
use tracing::{info, instrument, warn};

use crate::compose::{gallery_file_name, join_body, share_file_name};
use crate::pending::{PendingShare, PendingShares};
use crate::targets::{self, AppDispatch};

/// Result of launching `shareScreenshot`.
#[derive(Debug)]
pub enum ScreenshotLaunch {
    /// Nothing to wait for; the capture is returned directly.
    Inline(ScreenshotResponse),
    /// The capture went to a share sheet.
    Sheet(PendingShare),
}

/// Entry point for every share operation.
///
/// All fields are cheaply cloneable so the bridge can be moved into async
/// blocks and blocking tasks.
#[derive(Clone)]
pub struct ShareBridge {
    platform: Arc<dyn PlatformBridge>,
    gallery: Arc<dyn GalleryStore>,
    pending: PendingShares,
    config: BridgeConfig,
}

impl ShareBridge {
    pub fn new(
        platform: Arc<dyn PlatformBridge>,
        gallery: Arc<dyn GalleryStore>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            platform,
            gallery,
            pending: PendingShares::new(config.pending_policy),
            config,
        }
    }

    /// Build the bridge for the running platform and route activity results
    /// to it. Call once at startup.
    pub fn for_current_platform(config: BridgeConfig) -> Result<Self> {
        let platform: Arc<dyn PlatformBridge> =
            Arc::from(sharebridge_native::platform_bridge(&config));
        let gallery: Arc<dyn GalleryStore> = Arc::from(sharebridge_native::gallery_store(&config)?);
        info!(
            platform = platform.platform_name(),
            gallery = gallery.strategy(),
            "share bridge initialised"
        );
        let bridge = Self::new(platform, gallery, config);
        #[cfg(target_os = "android")]
        crate::android::route_activity_results(bridge.pending.clone());
        Ok(bridge)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingShares {
        &self.pending
    }

    /// Forward the host activity's `onActivityResult`. Returns `false` when
    /// the request code does not belong to a pending share.
    pub fn on_activity_result(&self, request_code: i32, result_code: i32) -> bool {
        self.pending.complete(request_code, result_code)
    }

    // -- Staging -------------------------------------------------------------

    /// Decode a base64 image payload and stage it for other apps to read.
    fn stage_base64(&self, payload: &str) -> Result<String> {
        let bytes = decode_base64(payload)?;
        self.platform.stage_share_file(&bytes, &share_file_name())
    }

    /// Register a pending share, then start the chooser with its request code.
    fn launch_chooser(&self, intent: &Intent, title: &str) -> Result<PendingShare> {
        let share = self.pending.register()?;
        let code = share.request_code();
        if let Err(err) = self.platform.start_chooser(intent, title, code) {
            self.pending.cancel(code);
            return Err(err);
        }
        info!(request_code = code, "share sheet opened");
        Ok(share)
    }

    // -- share ---------------------------------------------------------------

    /// Open the share sheet and return the handle that resolves once the
    /// user picks a target or dismisses it.
    #[instrument(skip_all, fields(has_image = request.image().is_some()))]
    pub fn launch_share(&self, request: &ShareRequest) -> Result<PendingShare> {
        let mut intent = Intent::new(actions::SEND);
        intent = match request.image() {
            Some(payload) => {
                let uri = self.stage_base64(payload)?;
                intent.with_type(MIME_ANY_IMAGE).with_stream(uri)
            }
            None => intent.with_type(MIME_TEXT),
        };
        let body = join_body(request.text(), request.url(), " ");
        if !body.is_empty() {
            intent = intent.with_text(extras::TEXT, body);
        }
        let title = request.title().unwrap_or(&self.config.chooser_title);
        self.launch_chooser(&intent, title)
    }

    /// Share text, a URL, and/or an image through the system share sheet.
    pub async fn share(&self, request: ShareRequest) -> Result<ShareResponse> {
        self.launch_share(&request)?.outcome().await
    }

    // -- shareToApp ----------------------------------------------------------

    /// Send content straight to one app. Fire-and-forget: success means the
    /// OS accepted the intent, not that the user shared anything.
    #[instrument(skip_all, fields(app = %request.app))]
    pub fn share_to_app(&self, request: &ShareToAppRequest) -> Result<ShareToAppResponse> {
        let app = request.target()?;
        let image_uri = match request.image() {
            Some(payload) if targets::uses_image(app, request) => Some(self.stage_base64(payload)?),
            _ => None,
        };

        let delivery = match targets::plan(app, request, image_uri.as_deref()) {
            AppDispatch::Start { intent, delivery } => {
                self.platform
                    .start_activity(&intent)
                    .map_err(|err| unavailable(app, err))?;
                delivery
            }
            AppDispatch::Launch { package } => {
                let launched = self
                    .platform
                    .launch_package(package)
                    .map_err(|err| unavailable(app, err))?;
                if !launched {
                    return Err(ShareError::AppNotAvailable {
                        app: app.to_string(),
                    });
                }
                Delivery::AppLaunched
            }
        };

        info!(%app, ?delivery, "handed off to app");
        Ok(ShareToAppResponse {
            completed: true,
            app,
            delivery,
        })
    }

    // -- getAvailableApps ----------------------------------------------------

    /// Probe every target. A failing probe counts as unavailable.
    pub fn available_apps(&self) -> AppAvailability {
        let mut apps = AppAvailability::default();
        for app in TargetApp::ALL {
            let probe = match (app.package_name(), targets::availability_probe(app)) {
                (Some(package), _) => self.platform.is_installed(package),
                (None, Some(intent)) => self.platform.can_resolve(&intent),
                (None, None) => Ok(false),
            };
            let available = probe.unwrap_or_else(|err| {
                warn!(%app, error = %err, "availability probe failed");
                false
            });
            apps.set(app, available);
        }
        apps
    }

    // -- shareScreenshot -----------------------------------------------------

    /// Capture the web view and either return it or open the share sheet.
    #[instrument(skip(self))]
    pub fn launch_screenshot(&self, options: ScreenshotOptions) -> Result<ScreenshotLaunch> {
        let surface = self.platform.capture_surface()?;
        let png = ImageProcessor::from_surface(surface)?.into_png_bytes()?;

        if options.share {
            let uri = self.platform.stage_share_file(&png, &share_file_name())?;
            let intent = Intent::new(actions::SEND)
                .with_type(MIME_ANY_IMAGE)
                .with_stream(uri);
            let title = &self.config.screenshot_chooser_title;
            return self.launch_chooser(&intent, title).map(ScreenshotLaunch::Sheet);
        }

        let base64 = options
            .return_base64
            .then(|| sharebridge_media::encode_base64(&png));
        Ok(ScreenshotLaunch::Inline(ScreenshotResponse {
            completed: true,
            base64,
        }))
    }

    pub async fn share_screenshot(&self, options: ScreenshotOptions) -> Result<ScreenshotResponse> {
        match self.launch_screenshot(options)? {
            ScreenshotLaunch::Inline(response) => Ok(response),
            ScreenshotLaunch::Sheet(share) => {
                let ShareResponse { completed } = share.outcome().await?;
                Ok(ScreenshotResponse {
                    completed,
                    base64: None,
                })
            }
        }
    }

    // -- saveToGallery -------------------------------------------------------

    /// Validate a base64 image and store it as PNG in the device gallery.
    pub async fn save_to_gallery(&self, payload: Option<String>) -> Result<GalleryResult> {
        let payload = payload
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ShareError::InvalidInput("no image provided".into()))?;

        let gallery = Arc::clone(&self.gallery);
        let file_name = gallery_file_name(&self.config.gallery_file_prefix);
        tokio::task::spawn_blocking(move || -> Result<GalleryResult> {
            let png = ImageProcessor::from_base64(&payload)?.into_png_bytes()?;
            let path = gallery.persist_png(&png, &file_name)?;
            info!(%path, strategy = gallery.strategy(), "image saved to gallery");
            Ok(GalleryResult { saved: true, path })
        })
        .await
        .map_err(|e| ShareError::Platform(format!("gallery task failed: {e}")))?
    }
}

/// `NoHandler` from the platform means the target app cannot take the intent.
fn unavailable(app: TargetApp, err: ShareError) -> ShareError {
    match err {
        ShareError::NoHandler(_) => ShareError::AppNotAvailable {
            app: app.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharebridge_core::config::PendingPolicy;
    use sharebridge_native::{DirectoryGallery, RESULT_CANCELED, RESULT_OK};

    use crate::testing::{MockPlatform, bridge_with, bridge_with_config, png_base64};

    #[tokio::test]
    async fn share_text_and_url_resolves_on_result_ok() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default());
        let request = ShareRequest {
            text: Some("Look".into()),
            url: Some("https://x.com".into()),
            ..Default::default()
        };
        let share = bridge.launch_share(&request).unwrap();

        let calls = platform.choosers();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].title, "Share");
        assert_eq!(calls[0].request_code, share.request_code());
        assert_eq!(calls[0].intent.mime_type.as_deref(), Some(MIME_TEXT));
        assert_eq!(
            calls[0].intent.text_extra(extras::TEXT),
            Some("Look https://x.com")
        );

        assert!(bridge.on_activity_result(share.request_code(), RESULT_OK));
        assert!(share.outcome().await.unwrap().completed);
    }

    #[tokio::test]
    async fn share_image_is_staged_and_granted() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default());
        let request = ShareRequest {
            image: Some(png_base64(2, 2)),
            title: Some("Send receipt".into()),
            ..Default::default()
        };
        let share = bridge.launch_share(&request).unwrap();

        let staged = platform.staged();
        assert_eq!(staged.len(), 1);
        assert!(staged[0].0.starts_with("share_"));
        let call = &platform.choosers()[0];
        assert_eq!(call.title, "Send receipt");
        assert_eq!(call.intent.mime_type.as_deref(), Some(MIME_ANY_IMAGE));
        assert!(call.intent.grant_read_uri);
        assert!(call.intent.uri_extra(extras::STREAM).is_some());
        assert_eq!(call.intent.text_extra(extras::TEXT), None);

        bridge.on_activity_result(share.request_code(), RESULT_CANCELED);
        assert!(!share.outcome().await.unwrap().completed);
    }

    #[test]
    fn share_with_bad_base64_is_a_decode_error() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default());
        let request = ShareRequest {
            image: Some("%%%".into()),
            ..Default::default()
        };
        let err = bridge.launch_share(&request).unwrap_err();
        assert!(matches!(err, ShareError::Decode(_)));
        assert!(platform.choosers().is_empty());
        assert!(bridge.pending().is_empty());
    }

    #[tokio::test]
    async fn concurrent_shares_resolve_independently() {
        let (bridge, _, _) = bridge_with(MockPlatform::default());
        let request = ShareRequest {
            text: Some("hi".into()),
            ..Default::default()
        };
        let first = bridge.launch_share(&request).unwrap();
        let second = bridge.launch_share(&request).unwrap();
        let (first_code, second_code) = (first.request_code(), second.request_code());
        assert_ne!(first_code, second_code);

        let waiting = tokio::spawn(async move { (first.outcome().await, second.outcome().await) });
        bridge.on_activity_result(second_code, RESULT_OK);
        bridge.on_activity_result(first_code, RESULT_CANCELED);

        let (first, second) = waiting.await.unwrap();
        assert!(!first.unwrap().completed);
        assert!(second.unwrap().completed);
    }

    #[tokio::test]
    async fn reject_policy_refuses_a_second_sheet() {
        let config = BridgeConfig {
            pending_policy: PendingPolicy::RejectWhileAwaiting,
            ..Default::default()
        };
        let (bridge, platform, _) = bridge_with_config(MockPlatform::default(), config);
        assert_eq!(bridge.config().pending_policy, PendingPolicy::RejectWhileAwaiting);
        let first = bridge.launch_share(&ShareRequest::default()).unwrap();
        let err = bridge.launch_share(&ShareRequest::default()).unwrap_err();
        assert!(matches!(err, ShareError::ShareInProgress(_)));
        assert_eq!(platform.choosers().len(), 1);

        bridge.on_activity_result(first.request_code(), RESULT_OK);
        assert!(first.outcome().await.unwrap().completed);
    }

    #[test]
    fn whatsapp_phone_opens_direct_link() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default());
        let request = ShareToAppRequest {
            app: "whatsapp".into(),
            text: Some("Hello".into()),
            phone_number: Some("+1 (555) 123-4567".into()),
            ..Default::default()
        };
        let response = bridge.share_to_app(&request).unwrap();
        assert!(response.completed);
        assert_eq!(response.delivery, Delivery::DirectLink);
        assert_eq!(
            platform.started()[0].data.as_deref(),
            Some("https://wa.me/15551234567?text=Hello")
        );
        assert!(bridge.pending().is_empty());
    }

    #[test]
    fn missing_app_is_not_available() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default());
        let request = ShareToAppRequest {
            app: "telegram".into(),
            text: Some("hi".into()),
            ..Default::default()
        };
        let err = bridge.share_to_app(&request).unwrap_err();
        assert!(matches!(err, ShareError::AppNotAvailable { ref app } if app == "telegram"));
        assert!(platform.started().is_empty());
    }

    #[test]
    fn unsupported_target_names_the_app() {
        let (bridge, _, _) = bridge_with(MockPlatform::default());
        let request = ShareToAppRequest {
            app: "myspace".into(),
            ..Default::default()
        };
        let err = bridge.share_to_app(&request).unwrap_err();
        assert!(matches!(err, ShareError::UnsupportedTarget(ref app) if app == "myspace"));
    }

    #[test]
    fn instagram_story_and_launcher() {
        let (bridge, platform, _) =
            bridge_with(MockPlatform::default().installed("com.instagram.android"));
        let story = ShareToAppRequest {
            app: "instagram".into(),
            image: Some(png_base64(1, 1)),
            ..Default::default()
        };
        assert_eq!(bridge.share_to_app(&story).unwrap().delivery, Delivery::Story);
        assert_eq!(platform.staged().len(), 1);

        let bare = ShareToAppRequest {
            app: "instagram".into(),
            ..Default::default()
        };
        assert_eq!(bridge.share_to_app(&bare).unwrap().delivery, Delivery::AppLaunched);
        assert_eq!(platform.launched(), vec!["com.instagram.android".to_string()]);

        let (bridge, _, _) = bridge_with(MockPlatform::default());
        let err = bridge.share_to_app(&bare).unwrap_err();
        assert!(matches!(err, ShareError::AppNotAvailable { .. }));
    }

    #[test]
    fn facebook_sends_url_over_text() {
        let (bridge, platform, _) =
            bridge_with(MockPlatform::default().installed("com.facebook.katana"));
        let request = ShareToAppRequest {
            app: "facebook".into(),
            text: Some("T".into()),
            url: Some("https://x.com".into()),
            ..Default::default()
        };
        bridge.share_to_app(&request).unwrap();
        assert_eq!(
            platform.started()[0].text_extra(extras::TEXT),
            Some("https://x.com")
        );
    }

    #[test]
    fn email_without_handler_is_not_available() {
        let (bridge, _, _) = bridge_with(MockPlatform::default());
        let request = ShareToAppRequest {
            app: "email".into(),
            text: Some("hi".into()),
            ..Default::default()
        };
        assert!(matches!(
            bridge.share_to_app(&request),
            Err(ShareError::AppNotAvailable { .. })
        ));

        let (bridge, platform, _) = bridge_with(MockPlatform::default().resolving("mailto"));
        bridge.share_to_app(&request).unwrap();
        assert_eq!(platform.started()[0].data.as_deref(), Some("mailto:"));
    }

    #[test]
    fn available_apps_reports_each_target() {
        let platform = MockPlatform::default()
            .installed("com.whatsapp")
            .installed("com.twitter.android")
            .resolving("sms");
        let (bridge, _, _) = bridge_with(platform);
        let apps = bridge.available_apps();
        assert!(apps.whatsapp && apps.twitter && apps.sms);
        assert!(!apps.telegram && !apps.instagram && !apps.facebook && !apps.email);
    }

    #[test]
    fn failing_probes_report_false() {
        let (bridge, _, _) = bridge_with(MockPlatform::default().failing_probes());
        assert_eq!(bridge.available_apps(), AppAvailability::default());
    }

    #[tokio::test]
    async fn screenshot_returns_png_of_surface_size() {
        let (bridge, _, _) = bridge_with(MockPlatform::default().with_surface(5, 3));
        let response = bridge
            .share_screenshot(ScreenshotOptions::default())
            .await
            .unwrap();
        assert!(response.completed);
        let image = ImageProcessor::from_base64(&response.base64.unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (5, 3));

        let without = bridge
            .share_screenshot(ScreenshotOptions {
                share: false,
                return_base64: false,
            })
            .await
            .unwrap();
        assert_eq!(without.base64, None);
    }

    #[tokio::test]
    async fn shared_screenshot_waits_for_the_sheet() {
        let (bridge, platform, _) = bridge_with(MockPlatform::default().with_surface(4, 4));
        let launch = bridge
            .launch_screenshot(ScreenshotOptions {
                share: true,
                return_base64: true,
            })
            .unwrap();
        let ScreenshotLaunch::Sheet(share) = launch else {
            panic!("expected a share sheet");
        };
        assert_eq!(platform.choosers()[0].title, "Share screenshot");
        assert_eq!(platform.staged().len(), 1);

        bridge.on_activity_result(share.request_code(), RESULT_OK);
        assert!(share.outcome().await.unwrap().completed);
    }

    #[tokio::test]
    async fn screenshot_without_surface_is_a_capture_error() {
        let (bridge, _, _) = bridge_with(MockPlatform::default());
        let err = bridge
            .share_screenshot(ScreenshotOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ShareError::Capture(_)));
    }

    #[tokio::test]
    async fn gallery_rejects_missing_input_before_any_work() {
        let (bridge, _, gallery) = bridge_with(MockPlatform::default());
        for payload in [None, Some(String::new())] {
            let err = bridge.save_to_gallery(payload).await.unwrap_err();
            assert!(matches!(err, ShareError::InvalidInput(_)));
        }
        assert_eq!(gallery.writes(), 0);
    }

    #[tokio::test]
    async fn gallery_rejects_non_images() {
        let (bridge, _, gallery) = bridge_with(MockPlatform::default());
        let text = sharebridge_media::encode_base64(b"just some text");
        let err = bridge.save_to_gallery(Some(text)).await.unwrap_err();
        assert!(matches!(err, ShareError::Decode(_)));
        assert_eq!(gallery.writes(), 0);
    }

    #[tokio::test]
    async fn gallery_stores_png_with_prefix() {
        let (bridge, _, gallery) = bridge_with(MockPlatform::default());
        let result = bridge.save_to_gallery(Some(png_base64(3, 3))).await.unwrap();
        assert!(result.saved);
        let saved = gallery.saved();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].0.starts_with("ShareBridge_"));
        assert_eq!(result.path, format!("memory://{}", saved[0].0));
        assert!(ImageProcessor::from_bytes(&saved[0].1).is_ok());
    }

    #[tokio::test]
    async fn gallery_writes_into_album_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = Arc::new(DirectoryGallery::new(dir.path(), "Receipts"));
        let bridge = ShareBridge::new(
            Arc::new(MockPlatform::default()),
            gallery,
            BridgeConfig::default(),
        );
        let result = bridge.save_to_gallery(Some(png_base64(2, 2))).await.unwrap();
        let path = std::path::Path::new(&result.path);
        assert!(path.starts_with(dir.path().join("Receipts")));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn simultaneous_saves_keep_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = Arc::new(DirectoryGallery::new(dir.path(), "Album"));
        let bridge = ShareBridge::new(
            Arc::new(MockPlatform::default()),
            gallery.clone(),
            BridgeConfig::default(),
        );

        let (a, b) = tokio::join!(
            bridge.save_to_gallery(Some(png_base64(2, 2))),
            bridge.save_to_gallery(Some(png_base64(3, 3))),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.path, b.path);

        let on_disk = std::fs::read_dir(gallery.album_dir()).unwrap().count();
        assert_eq!(on_disk, 2);
    }
}
