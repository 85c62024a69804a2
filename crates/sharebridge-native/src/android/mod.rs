// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Intents arrive as plain `crate::intent::Intent` values and are translated
// to `android.content.Intent` objects in `build_intent`. Every public entry
// point runs inside its own JNI local frame so that repeated calls from a
// permanently attached thread do not accumulate local references, and any
// Java exception still pending when the frame closes is cleared.
//
// Chooser launches use `startActivityForResult`; the host Activity must
// forward `onActivityResult` to `ShareBridgeNative.onActivityResult` (see
// the sharebridge-plugin crate) so the pending share resolves.
//
// Host manifest requirements:
// - a `FileProvider` with authority `<applicationId><fileProviderSuffix>`
//   whose paths XML exposes `<cache-path path="<shareCacheDir>/"/>`;
// - `<queries>` entries for the five target packages and for `SENDTO`
//   `mailto:`/`sms:` intents (Android 11 package visibility);
// - `WRITE_EXTERNAL_STORAGE` for gallery saves below Android 10.

#![cfg(target_os = "android")]

mod media_store;

pub use media_store::{MediaStoreGallery, gallery_store};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use sharebridge_core::config::BridgeConfig;
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::CapturedSurface;

use crate::intent::{Intent, IntentExtra, actions};
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Intent.FLAG_GRANT_READ_URI_PERMISSION`.
const FLAG_GRANT_READ_URI_PERMISSION: i32 = 0x0000_0001;

/// `PackageManager.GET_ACTIVITIES`.
const GET_ACTIVITIES: i32 = 0x0000_0001;

/// `android.R.id.content`: the view group hosting the web view. Captured
/// unless the config names a view.
const ANDROID_R_ID_CONTENT: i32 = 0x0102_0002;

/// Local references a single bridge call may hold at once.
const FRAME_CAPACITY: i32 = 64;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, taken from the NDK context on first use.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| ShareError::Platform(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it permanently if
/// it is not attached yet.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| ShareError::Platform(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(ShareError::Platform(
            "Android context is null; activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `ShareError::Platform`.
fn jni_err(context: &str, e: jni::errors::Error) -> ShareError {
    ShareError::Platform(format!("{context}: {e}"))
}

/// Carries a `ShareError` through `with_local_frame`, which needs an error
/// type convertible from `jni::errors::Error`.
struct FrameError(ShareError);

impl From<jni::errors::Error> for FrameError {
    fn from(e: jni::errors::Error) -> Self {
        FrameError(jni_err("local frame", e))
    }
}

/// Run `f` inside a fresh JNI local frame on the current thread.
fn in_frame<T>(f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>) -> Result<T> {
    let mut env = jni_env()?;
    let result = env
        .with_local_frame(FRAME_CAPACITY, |env| f(env).map_err(FrameError))
        .map_err(|FrameError(e)| e);

    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    result
}

/// Turn a failed JNI call into a `ShareError`, clearing the pending Java
/// exception. `ActivityNotFoundException` becomes `NoHandler`.
fn call_failed(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> ShareError {
    if !matches!(e, jni::errors::Error::JavaException) {
        return jni_err(context, e);
    }
    let throwable = match env.exception_occurred() {
        Ok(t) => t,
        Err(e) => return jni_err(context, e),
    };
    let _ = env.exception_clear();

    if env
        .is_instance_of(&throwable, "android/content/ActivityNotFoundException")
        .unwrap_or(false)
    {
        return ShareError::NoHandler(context.to_string());
    }

    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .and_then(|obj| env.get_string(&JString::from(obj)).map(String::from))
        .unwrap_or_else(|_| "Java exception".into());
    ShareError::Platform(format!("{context}: {description}"))
}

/// Read a `java.lang.String` object into a Rust `String`.
fn rust_string(env: &mut JNIEnv<'_>, obj: JObject<'_>, context: &str) -> Result<String> {
    if obj.is_null() {
        return Err(ShareError::Platform(format!("{context} returned null")));
    }
    env.get_string(&JString::from(obj))
        .map(String::from)
        .map_err(|e| jni_err(context, e))
}

/// `Uri.parse(uri)`.
fn parse_uri<'local>(env: &mut JNIEnv<'local>, uri: &str) -> Result<JObject<'local>> {
    let j_uri = env
        .new_string(uri)
        .map_err(|e| jni_err("new_string(uri)", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri)],
    )
    .map_err(|e| jni_err("Uri.parse", e))?
    .l()
    .map_err(|e| jni_err("Uri.parse->l", e))
}

/// Translate an [`Intent`] value into an `android.content.Intent`.
fn build_intent<'local>(env: &mut JNIEnv<'local>, intent: &Intent) -> Result<JObject<'local>> {
    let j_action = env
        .new_string(&intent.action)
        .map_err(|e| jni_err("new_string(action)", e))?;
    let j_intent = env
        .new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_action)],
        )
        .map_err(|e| jni_err("new Intent", e))?;

    if let Some(package) = &intent.package {
        let j_package = env
            .new_string(package)
            .map_err(|e| jni_err("new_string(package)", e))?;
        env.call_method(
            &j_intent,
            "setPackage",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_package)],
        )
        .map_err(|e| jni_err("setPackage", e))?;
    }

    match (&intent.data, &intent.mime_type) {
        (Some(data), Some(mime)) => {
            let uri = parse_uri(env, data)?;
            let j_mime = env
                .new_string(mime)
                .map_err(|e| jni_err("new_string(mime)", e))?;
            env.call_method(
                &j_intent,
                "setDataAndType",
                "(Landroid/net/Uri;Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&uri), JValue::Object(&j_mime)],
            )
            .map_err(|e| jni_err("setDataAndType", e))?;
        }
        (Some(data), None) => {
            let uri = parse_uri(env, data)?;
            env.call_method(
                &j_intent,
                "setData",
                "(Landroid/net/Uri;)Landroid/content/Intent;",
                &[JValue::Object(&uri)],
            )
            .map_err(|e| jni_err("setData", e))?;
        }
        (None, Some(mime)) => {
            let j_mime = env
                .new_string(mime)
                .map_err(|e| jni_err("new_string(mime)", e))?;
            env.call_method(
                &j_intent,
                "setType",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_mime)],
            )
            .map_err(|e| jni_err("setType", e))?;
        }
        (None, None) => {}
    }

    for extra in &intent.extras {
        match extra {
            IntentExtra::Text { key, value } => {
                let j_key = env
                    .new_string(key)
                    .map_err(|e| jni_err("new_string(extra key)", e))?;
                let j_value = env
                    .new_string(value)
                    .map_err(|e| jni_err("new_string(extra value)", e))?;
                env.call_method(
                    &j_intent,
                    "putExtra",
                    "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_key), JValue::Object(&j_value)],
                )
                .map_err(|e| jni_err("putExtra(String)", e))?;
            }
            IntentExtra::Uri { key, uri } => {
                let j_key = env
                    .new_string(key)
                    .map_err(|e| jni_err("new_string(extra key)", e))?;
                let j_uri = parse_uri(env, uri)?;
                env.call_method(
                    &j_intent,
                    "putExtra",
                    "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;",
                    &[JValue::Object(&j_key), JValue::Object(&j_uri)],
                )
                .map_err(|e| jni_err("putExtra(Parcelable)", e))?;
            }
        }
    }

    if intent.grant_read_uri {
        env.call_method(
            &j_intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_GRANT_READ_URI_PERMISSION)],
        )
        .map_err(|e| jni_err("addFlags", e))?;
    }

    Ok(j_intent)
}

/// `activity.getPackageManager()`.
fn package_manager<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> Result<JObject<'local>> {
    env.call_method(
        activity,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )
    .map_err(|e| jni_err("getPackageManager", e))?
    .l()
    .map_err(|e| jni_err("getPackageManager->l", e))
}

/// `activity.getPackageName()`.
fn package_name(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<String> {
    let j_pkg = env
        .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err("getPackageName", e))?
        .l()
        .map_err(|e| jni_err("getPackageName->l", e))?;
    rust_string(env, j_pkg, "getPackageName")
}

/// `file.getAbsolutePath()`.
fn absolute_path(env: &mut JNIEnv<'_>, file: &JObject<'_>) -> Result<PathBuf> {
    let j_path = env
        .call_method(file, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err("getAbsolutePath", e))?
        .l()
        .map_err(|e| jni_err("getAbsolutePath->l", e))?;
    rust_string(env, j_path, "getAbsolutePath").map(PathBuf::from)
}

/// `Build.VERSION.SDK_INT`.
pub fn sdk_int() -> Result<i32> {
    in_frame(|env| {
        env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?
            .i()
            .map_err(|e| jni_err("SDK_INT->i", e))
    })
}

/// `Environment.getExternalStoragePublicDirectory(DIRECTORY_PICTURES)`.
pub fn public_pictures_dir() -> Result<PathBuf> {
    in_frame(|env| {
        let j_pictures = env
            .get_static_field(
                "android/os/Environment",
                "DIRECTORY_PICTURES",
                "Ljava/lang/String;",
            )
            .map_err(|e| jni_err("Environment.DIRECTORY_PICTURES", e))?
            .l()
            .map_err(|e| jni_err("DIRECTORY_PICTURES->l", e))?;
        let dir = env
            .call_static_method(
                "android/os/Environment",
                "getExternalStoragePublicDirectory",
                "(Ljava/lang/String;)Ljava/io/File;",
                &[JValue::Object(&j_pictures)],
            )
            .map_err(|e| jni_err("getExternalStoragePublicDirectory", e))?
            .l()
            .map_err(|e| jni_err("getExternalStoragePublicDirectory->l", e))?;
        absolute_path(env, &dir)
    })
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the ShareBridge platform bridge.
///
/// All methods go through JNI to call the Android SDK. The only state is
/// the share-cache layout taken from [`BridgeConfig`].
pub struct AndroidBridge {
    config: BridgeConfig,
}

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeIntents: startActivity / startActivityForResult / sendBroadcast
// ---------------------------------------------------------------------------

impl NativeIntents for AndroidBridge {
    fn start_activity(&self, intent: &Intent) -> Result<()> {
        let activity = activity()?;
        in_frame(|env| {
            let j_intent = build_intent(env, intent)?;
            if let Err(e) = env.call_method(
                &activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&j_intent)],
            ) {
                return Err(call_failed(env, &intent.action, e));
            }
            tracing::info!(
                action = %intent.action,
                package = ?intent.package,
                "Android: intent dispatched"
            );
            Ok(())
        })
    }

    fn start_chooser(&self, intent: &Intent, title: &str, request_code: i32) -> Result<()> {
        let activity = activity()?;
        in_frame(|env| {
            let j_intent = build_intent(env, intent)?;
            let j_title = env
                .new_string(title)
                .map_err(|e| jni_err("new_string(chooser_title)", e))?;

            let chooser = env
                .call_static_method(
                    "android/content/Intent",
                    "createChooser",
                    "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
                    &[JValue::Object(&j_intent), JValue::Object(&j_title)],
                )
                .map_err(|e| jni_err("Intent.createChooser", e))?
                .l()
                .map_err(|e| jni_err("createChooser->l", e))?;

            if let Err(e) = env.call_method(
                &activity,
                "startActivityForResult",
                "(Landroid/content/Intent;I)V",
                &[JValue::Object(&chooser), JValue::Int(request_code)],
            ) {
                return Err(call_failed(env, "startActivityForResult(chooser)", e));
            }

            tracing::info!(
                request_code,
                mime = ?intent.mime_type,
                "Android: chooser dispatched, awaiting onActivityResult"
            );
            Ok(())
        })
    }

    fn launch_package(&self, package: &str) -> Result<bool> {
        let activity = activity()?;
        in_frame(|env| {
            let pm = package_manager(env, &activity)?;
            let j_package = env
                .new_string(package)
                .map_err(|e| jni_err("new_string(package)", e))?;

            let launch = env
                .call_method(
                    &pm,
                    "getLaunchIntentForPackage",
                    "(Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_package)],
                )
                .map_err(|e| jni_err("getLaunchIntentForPackage", e))?
                .l()
                .map_err(|e| jni_err("getLaunchIntentForPackage->l", e))?;

            if launch.is_null() {
                tracing::debug!(package, "Android: no launcher intent");
                return Ok(false);
            }

            if let Err(e) = env.call_method(
                &activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&launch)],
            ) {
                return Err(call_failed(env, "startActivity(launcher)", e));
            }

            tracing::info!(package, "Android: app brought to foreground");
            Ok(true)
        })
    }

    fn send_broadcast(&self, intent: &Intent) -> Result<()> {
        let activity = activity()?;
        in_frame(|env| {
            let j_intent = build_intent(env, intent)?;
            env.call_method(
                &activity,
                "sendBroadcast",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&j_intent)],
            )
            .map_err(|e| jni_err("sendBroadcast", e))?;
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// NativePackages: PackageManager
// ---------------------------------------------------------------------------

impl NativePackages for AndroidBridge {
    fn is_installed(&self, package: &str) -> Result<bool> {
        let activity = activity()?;
        in_frame(|env| {
            let pm = package_manager(env, &activity)?;
            let j_package = env
                .new_string(package)
                .map_err(|e| jni_err("new_string(package)", e))?;

            match env.call_method(
                &pm,
                "getPackageInfo",
                "(Ljava/lang/String;I)Landroid/content/pm/PackageInfo;",
                &[JValue::Object(&j_package), JValue::Int(GET_ACTIVITIES)],
            ) {
                Ok(_) => Ok(true),
                Err(jni::errors::Error::JavaException) => {
                    let throwable = env
                        .exception_occurred()
                        .map_err(|e| jni_err("exception_occurred", e))?;
                    let _ = env.exception_clear();
                    let not_found = env
                        .is_instance_of(
                            &throwable,
                            "android/content/pm/PackageManager$NameNotFoundException",
                        )
                        .map_err(|e| jni_err("is_instance_of(NameNotFoundException)", e))?;
                    if not_found {
                        Ok(false)
                    } else {
                        Err(ShareError::Platform(format!(
                            "getPackageInfo({package}) threw an unexpected exception"
                        )))
                    }
                }
                Err(e) => Err(jni_err("getPackageInfo", e)),
            }
        })
    }

    fn can_resolve(&self, intent: &Intent) -> Result<bool> {
        let activity = activity()?;
        in_frame(|env| {
            let pm = package_manager(env, &activity)?;
            let j_intent = build_intent(env, intent)?;
            let list = env
                .call_method(
                    &pm,
                    "queryIntentActivities",
                    "(Landroid/content/Intent;I)Ljava/util/List;",
                    &[JValue::Object(&j_intent), JValue::Int(0)],
                )
                .map_err(|e| jni_err("queryIntentActivities", e))?
                .l()
                .map_err(|e| jni_err("queryIntentActivities->l", e))?;
            if list.is_null() {
                return Ok(false);
            }
            let size = env
                .call_method(&list, "size", "()I", &[])
                .map_err(|e| jni_err("List.size", e))?
                .i()
                .map_err(|e| jni_err("List.size->i", e))?;
            Ok(size > 0)
        })
    }
}

// ---------------------------------------------------------------------------
// NativeSurface: View.draw into a Bitmap
// ---------------------------------------------------------------------------

impl NativeSurface for AndroidBridge {
    /// Draw the configured capture view into an ARGB_8888 bitmap and read
    /// its pixels back as RGBA.
    ///
    /// With no `capture_view_id` this is `android.R.id.content`, the
    /// container hosting the web view. Native views the host placed inside
    /// that container are captured too.
    ///
    /// The bitmap is recycled on every path once the pixels are read.
    fn capture_surface(&self) -> Result<CapturedSurface> {
        let activity = activity()?;
        let view_id = self.config.capture_view_id.unwrap_or(ANDROID_R_ID_CONTENT);
        in_frame(|env| {
            let window = env
                .call_method(&activity, "getWindow", "()Landroid/view/Window;", &[])
                .map_err(|e| jni_err("getWindow", e))?
                .l()
                .map_err(|e| jni_err("getWindow->l", e))?;
            if window.is_null() {
                return Err(ShareError::Capture("activity has no window".into()));
            }

            let decor = env
                .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
                .map_err(|e| jni_err("getDecorView", e))?
                .l()
                .map_err(|e| jni_err("getDecorView->l", e))?;
            let view = env
                .call_method(
                    &decor,
                    "findViewById",
                    "(I)Landroid/view/View;",
                    &[JValue::Int(view_id)],
                )
                .map_err(|e| jni_err("findViewById(capture view)", e))?
                .l()
                .map_err(|e| jni_err("findViewById->l", e))?;
            if view.is_null() {
                return Err(ShareError::Capture(
                    "web view surface is not attached".into(),
                ));
            }

            let width = env
                .call_method(&view, "getWidth", "()I", &[])
                .map_err(|e| jni_err("View.getWidth", e))?
                .i()
                .map_err(|e| jni_err("getWidth->i", e))?;
            let height = env
                .call_method(&view, "getHeight", "()I", &[])
                .map_err(|e| jni_err("View.getHeight", e))?
                .i()
                .map_err(|e| jni_err("getHeight->i", e))?;
            if width <= 0 || height <= 0 {
                return Err(ShareError::Capture(format!(
                    "web view has not been laid out ({width}x{height})"
                )));
            }

            let config = env
                .get_static_field(
                    "android/graphics/Bitmap$Config",
                    "ARGB_8888",
                    "Landroid/graphics/Bitmap$Config;",
                )
                .map_err(|e| jni_err("Bitmap.Config.ARGB_8888", e))?
                .l()
                .map_err(|e| jni_err("ARGB_8888->l", e))?;
            let bitmap = env
                .call_static_method(
                    "android/graphics/Bitmap",
                    "createBitmap",
                    "(IILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
                    &[
                        JValue::Int(width),
                        JValue::Int(height),
                        JValue::Object(&config),
                    ],
                )
                .map_err(|e| call_failed(env, "Bitmap.createBitmap", e))?
                .l()
                .map_err(|e| jni_err("createBitmap->l", e))?;

            let pixels = draw_and_read(env, &view, &bitmap, width, height);

            if let Err(e) = env.call_method(&bitmap, "recycle", "()V", &[]) {
                tracing::warn!(error = %e, "Android: Bitmap.recycle failed");
                let _ = env.exception_clear();
            }

            let rgba = pixels?;
            tracing::info!(width, height, "Android: web view captured");
            Ok(CapturedSurface::new(width as u32, height as u32, rgba))
        })
    }
}

/// Draw `view` into `bitmap` and return its pixels as RGBA8 bytes.
fn draw_and_read(
    env: &mut JNIEnv<'_>,
    view: &JObject<'_>,
    bitmap: &JObject<'_>,
    width: i32,
    height: i32,
) -> Result<Vec<u8>> {
    let canvas = env
        .new_object(
            "android/graphics/Canvas",
            "(Landroid/graphics/Bitmap;)V",
            &[JValue::Object(bitmap)],
        )
        .map_err(|e| jni_err("new Canvas", e))?;
    env.call_method(
        view,
        "draw",
        "(Landroid/graphics/Canvas;)V",
        &[JValue::Object(&canvas)],
    )
    .map_err(|e| call_failed(env, "View.draw", e))?;

    let len = width as usize * height as usize;
    let j_pixels = env
        .new_int_array(width * height)
        .map_err(|e| call_failed(env, "new_int_array(pixels)", e))?;

    // bitmap.getPixels(pixels, offset, stride, x, y, width, height)
    env.call_method(
        bitmap,
        "getPixels",
        "([IIIIIII)V",
        &[
            JValue::Object(&j_pixels),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(0),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(height),
        ],
    )
    .map_err(|e| jni_err("Bitmap.getPixels", e))?;

    let mut argb = vec![0i32; len];
    env.get_int_array_region(&j_pixels, 0, &mut argb)
        .map_err(|e| jni_err("get_int_array_region(pixels)", e))?;

    Ok(argb_to_rgba(&argb))
}

/// Android `Color` ints are 0xAARRGGBB.
fn argb_to_rgba(argb: &[i32]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(argb.len() * 4);
    for &pixel in argb {
        let [a, r, g, b] = (pixel as u32).to_be_bytes();
        rgba.extend_from_slice(&[r, g, b, a]);
    }
    rgba
}

// ---------------------------------------------------------------------------
// NativeShareCache: cache dir + FileProvider
// ---------------------------------------------------------------------------

impl NativeShareCache for AndroidBridge {
    /// Write the bytes under `<cacheDir>/<shareCacheDir>/` and return the
    /// `content://` URI from `FileProvider.getUriForFile`.
    fn stage_share_file(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        let activity = activity()?;
        in_frame(|env| {
            let cache_dir = env
                .call_method(&activity, "getCacheDir", "()Ljava/io/File;", &[])
                .map_err(|e| jni_err("getCacheDir", e))?
                .l()
                .map_err(|e| jni_err("getCacheDir->l", e))?;
            let share_dir = absolute_path(env, &cache_dir)?.join(&self.config.share_cache_dir);
            std::fs::create_dir_all(&share_dir)?;
            let path = share_dir.join(file_name);
            std::fs::write(&path, bytes)?;

            let j_path = env
                .new_string(path.to_string_lossy())
                .map_err(|e| jni_err("new_string(path)", e))?;
            let file_obj = env
                .new_object(
                    "java/io/File",
                    "(Ljava/lang/String;)V",
                    &[JValue::Object(&j_path)],
                )
                .map_err(|e| jni_err("new File(path)", e))?;

            let authority = self
                .config
                .file_provider_authority(&package_name(env, &activity)?);
            let j_authority = env
                .new_string(&authority)
                .map_err(|e| jni_err("new_string(authority)", e))?;

            let content_uri = env
                .call_static_method(
                    "androidx/core/content/FileProvider",
                    "getUriForFile",
                    "(Landroid/content/Context;Ljava/lang/String;Ljava/io/File;)Landroid/net/Uri;",
                    &[
                        JValue::Object(&activity),
                        JValue::Object(&j_authority),
                        JValue::Object(&file_obj),
                    ],
                )
                .map_err(|e| call_failed(env, "FileProvider.getUriForFile", e))?
                .l()
                .map_err(|e| jni_err("getUriForFile->l", e))?;

            let j_uri = env
                .call_method(&content_uri, "toString", "()Ljava/lang/String;", &[])
                .map_err(|e| jni_err("Uri.toString", e))?
                .l()
                .map_err(|e| jni_err("Uri.toString->l", e))?;
            let uri = rust_string(env, j_uri, "Uri.toString")?;

            tracing::info!(%authority, bytes = bytes.len(), "Android: share file staged");
            Ok(uri)
        })
    }
}

// ---------------------------------------------------------------------------
// MediaScanner: ACTION_MEDIA_SCANNER_SCAN_FILE broadcast
// ---------------------------------------------------------------------------

impl MediaScanner for AndroidBridge {
    fn scan_file(&self, path: &Path) -> Result<()> {
        let intent = Intent::new(actions::MEDIA_SCANNER_SCAN_FILE)
            .with_data(format!("file://{}", path.display()));
        self.send_broadcast(&intent)
    }
}
