use js_sys::{Array, Uint8Array};
use log::debug;
use shared::dto::profile::{EndpointResponse, ResetAvatarRequest, SetAvatarUrlRequest};
use shared::{AvatarUpload, Result, SharedError};
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::api::api_url;
use crate::api::utils::{authenticated_post, fetch_with, read_json};

async fn expect_success(request: gloo_net::http::Request, endpoint: &str) -> Result<()> {
    let (status, reply) = fetch_with(request, |response| async move {
        let status = response.status();
        let reply: EndpointResponse = read_json(response, &format!("{} reply", endpoint)).await?;
        Ok((status, reply))
    })
    .await?;

    if reply.success {
        debug!("{} succeeded", endpoint);
        Ok(())
    } else {
        Err(SharedError::Server {
            status,
            message: format!("{} reported failure", endpoint),
        })
    }
}

pub async fn set_avatar_url(user_id: &str, avatar_url: &str) -> Result<()> {
    let body = SetAvatarUrlRequest {
        user_id: user_id.to_string(),
        avatar_url: avatar_url.to_string(),
    };
    let request = authenticated_post(&api_url("/api/v1/users.setAvatar"))
        .json(&body)
        .map_err(|e| SharedError::Conversion(format!("Failed to serialize setAvatar request: {}", e)))?;
    expect_success(request, "users.setAvatar").await
}

pub async fn reset_avatar(user_id: &str) -> Result<()> {
    let body = ResetAvatarRequest {
        user_id: user_id.to_string(),
    };
    let request = authenticated_post(&api_url("/api/v1/users.resetAvatar"))
        .json(&body)
        .map_err(|e| SharedError::Conversion(format!("Failed to serialize resetAvatar request: {}", e)))?;
    expect_success(request, "users.resetAvatar").await
}

/// Multipart upload of an image file, tagged with the owning user id.
pub async fn upload_avatar(user_id: &str, upload: &AvatarUpload) -> Result<()> {
    let form = avatar_form_data(user_id, upload)?;
    let request = authenticated_post(&api_url("/api/v1/users.setAvatar"))
        .body(form)
        .map_err(|e| SharedError::Internal(format!("Failed to build upload request: {}", e)))?;
    expect_success(request, "users.setAvatar").await
}

fn avatar_form_data(user_id: &str, upload: &AvatarUpload) -> Result<FormData> {
    let js_error = |e: wasm_bindgen::JsValue| SharedError::Internal(format!("{:?}", e));

    let bytes = Uint8Array::from(upload.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&upload.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("image", &blob, &upload.file_name)
        .map_err(js_error)?;
    form.append_with_str("userId", user_id).map_err(js_error)?;
    Ok(form)
}
