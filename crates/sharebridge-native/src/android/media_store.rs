// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gallery persistence on Android.
//
// Android 10 (API 29) and later write through the MediaStore registry with a
// relative path. The row is inserted pending and only published once the
// bytes are written; a failed write deletes it. Older versions write into
// the public Pictures directory and broadcast a media scan. The strategy is
// chosen once in `gallery_store`.

use std::sync::Arc;

use jni::objects::{JObject, JValue};
use jni::JNIEnv;

use sharebridge_core::config::BridgeConfig;
use sharebridge_core::error::{Result, ShareError};
use tracing::{info, instrument};

use super::{
    AndroidBridge, activity, call_failed, in_frame, jni_err, public_pictures_dir, rust_string,
    sdk_int,
};
use crate::gallery::{DirectoryGallery, PendingEntry, commit_entry};
use crate::traits::GalleryStore;

/// `Build.VERSION_CODES.Q`.
const ANDROID_Q: i32 = 29;

/// `Environment.DIRECTORY_PICTURES`.
const DIRECTORY_PICTURES: &str = "Pictures";

/// Pick the gallery strategy for the running Android version.
pub fn gallery_store(config: &BridgeConfig) -> Result<Box<dyn GalleryStore>> {
    let sdk = sdk_int()?;
    if sdk >= ANDROID_Q {
        info!(sdk, "gallery: using MediaStore");
        return Ok(Box::new(MediaStoreGallery::new(&config.gallery_album)));
    }

    let root = public_pictures_dir()?;
    info!(sdk, root = %root.display(), "gallery: using public Pictures directory");
    Ok(Box::new(
        DirectoryGallery::new(root, &config.gallery_album)
            .with_scanner(Arc::new(AndroidBridge::new(config))),
    ))
}

/// Inserts images into `MediaStore.Images.Media.EXTERNAL_CONTENT_URI`.
pub struct MediaStoreGallery {
    relative_path: String,
}

impl MediaStoreGallery {
    pub fn new(album: &str) -> Self {
        Self {
            relative_path: format!("{DIRECTORY_PICTURES}/{album}"),
        }
    }
}

/// `MediaStore.MediaColumns.IS_PENDING`: hides the row from other apps
/// until it is cleared.
const IS_PENDING: &str = "is_pending";

fn content_values<'local>(env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
    env.new_object("android/content/ContentValues", "()V", &[])
        .map_err(|e| jni_err("new ContentValues", e))
}

/// `values.put(key, value)` for a string column.
fn put_string(env: &mut JNIEnv<'_>, values: &JObject<'_>, key: &str, value: &str) -> Result<()> {
    let j_key = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(column)", e))?;
    let j_value = env
        .new_string(value)
        .map_err(|e| jni_err("new_string(value)", e))?;
    env.call_method(
        values,
        "put",
        "(Ljava/lang/String;Ljava/lang/String;)V",
        &[JValue::Object(&j_key), JValue::Object(&j_value)],
    )
    .map_err(|e| jni_err("ContentValues.put(String)", e))?;
    Ok(())
}

/// `values.put(key, Integer.valueOf(value))`.
fn put_int(env: &mut JNIEnv<'_>, values: &JObject<'_>, key: &str, value: i32) -> Result<()> {
    let j_key = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(column)", e))?;
    let j_value = env
        .call_static_method(
            "java/lang/Integer",
            "valueOf",
            "(I)Ljava/lang/Integer;",
            &[JValue::Int(value)],
        )
        .map_err(|e| jni_err("Integer.valueOf", e))?
        .l()
        .map_err(|e| jni_err("Integer.valueOf->l", e))?;
    env.call_method(
        values,
        "put",
        "(Ljava/lang/String;Ljava/lang/Integer;)V",
        &[JValue::Object(&j_key), JValue::Object(&j_value)],
    )
    .map_err(|e| jni_err("ContentValues.put(Integer)", e))?;
    Ok(())
}

/// A MediaStore row inserted with `IS_PENDING = 1`.
struct MediaStoreEntry<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    resolver: &'a JObject<'local>,
    uri: &'a JObject<'local>,
}

impl PendingEntry for MediaStoreEntry<'_, '_> {
    fn write(&mut self, png: &[u8]) -> Result<()> {
        let env = &mut *self.env;
        let stream = env
            .call_method(
                self.resolver,
                "openOutputStream",
                "(Landroid/net/Uri;)Ljava/io/OutputStream;",
                &[JValue::Object(self.uri)],
            )
            .map_err(|e| call_failed(env, "ContentResolver.openOutputStream", e))?
            .l()
            .map_err(|e| jni_err("openOutputStream->l", e))?;
        if stream.is_null() {
            return Err(ShareError::Platform(
                "MediaStore returned no output stream".into(),
            ));
        }

        let j_bytes = env
            .byte_array_from_slice(png)
            .map_err(|e| jni_err("byte_array_from_slice(png)", e))?;
        // The stream is closed even when the write throws.
        let written = env
            .call_method(&stream, "write", "([B)V", &[JValue::Object(&j_bytes)])
            .map_err(|e| call_failed(env, "OutputStream.write", e));
        let closed = env
            .call_method(&stream, "close", "()V", &[])
            .map_err(|e| call_failed(env, "OutputStream.close", e));
        written?;
        closed?;
        Ok(())
    }

    fn publish(&mut self) -> Result<()> {
        let env = &mut *self.env;
        let values = content_values(env)?;
        put_int(env, &values, IS_PENDING, 0)?;
        let null = JObject::null();
        env.call_method(
            self.resolver,
            "update",
            "(Landroid/net/Uri;Landroid/content/ContentValues;Ljava/lang/String;[Ljava/lang/String;)I",
            &[
                JValue::Object(self.uri),
                JValue::Object(&values),
                JValue::Object(&null),
                JValue::Object(&null),
            ],
        )
        .map_err(|e| call_failed(env, "ContentResolver.update", e))?;
        Ok(())
    }

    fn discard(&mut self) -> Result<()> {
        let env = &mut *self.env;
        let null = JObject::null();
        env.call_method(
            self.resolver,
            "delete",
            "(Landroid/net/Uri;Ljava/lang/String;[Ljava/lang/String;)I",
            &[
                JValue::Object(self.uri),
                JValue::Object(&null),
                JValue::Object(&null),
            ],
        )
        .map_err(|e| call_failed(env, "ContentResolver.delete", e))?;
        Ok(())
    }
}

impl GalleryStore for MediaStoreGallery {
    #[instrument(skip(self, png), fields(bytes = png.len(), relative_path = %self.relative_path))]
    fn persist_png(&self, png: &[u8], file_name: &str) -> Result<String> {
        let activity = activity()?;
        in_frame(|env| {
            let resolver = env
                .call_method(
                    &activity,
                    "getContentResolver",
                    "()Landroid/content/ContentResolver;",
                    &[],
                )
                .map_err(|e| jni_err("getContentResolver", e))?
                .l()
                .map_err(|e| jni_err("getContentResolver->l", e))?;

            let values = content_values(env)?;
            put_string(env, &values, "_display_name", file_name)?;
            put_string(env, &values, "mime_type", "image/png")?;
            put_string(env, &values, "relative_path", &self.relative_path)?;
            put_int(env, &values, IS_PENDING, 1)?;

            let collection = env
                .get_static_field(
                    "android/provider/MediaStore$Images$Media",
                    "EXTERNAL_CONTENT_URI",
                    "Landroid/net/Uri;",
                )
                .map_err(|e| jni_err("MediaStore.Images.Media.EXTERNAL_CONTENT_URI", e))?
                .l()
                .map_err(|e| jni_err("EXTERNAL_CONTENT_URI->l", e))?;

            let uri = env
                .call_method(
                    &resolver,
                    "insert",
                    "(Landroid/net/Uri;Landroid/content/ContentValues;)Landroid/net/Uri;",
                    &[JValue::Object(&collection), JValue::Object(&values)],
                )
                .map_err(|e| call_failed(env, "ContentResolver.insert", e))?
                .l()
                .map_err(|e| jni_err("insert->l", e))?;
            if uri.is_null() {
                return Err(ShareError::Platform(
                    "MediaStore refused to create the image entry".into(),
                ));
            }

            commit_entry(
                &mut MediaStoreEntry {
                    env: &mut *env,
                    resolver: &resolver,
                    uri: &uri,
                },
                png,
            )?;

            let j_uri = env
                .call_method(&uri, "toString", "()Ljava/lang/String;", &[])
                .map_err(|e| jni_err("Uri.toString", e))?
                .l()
                .map_err(|e| jni_err("Uri.toString->l", e))?;
            let locator = rust_string(env, j_uri, "Uri.toString")?;

            info!(%locator, "Android: image inserted into MediaStore");
            Ok(locator)
        })
    }

    fn strategy(&self) -> &'static str {
        "media_store"
    }
}
