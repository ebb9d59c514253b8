use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, error};
use shared::{AvatarChange, AvatarSuggestionDto, AvatarUpload};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::i18n::use_translation;

pub fn default_avatar_url(username: &str) -> String {
    format!("/avatar/{}", username)
}

fn data_url(content_type: &str, payload: &str) -> String {
    if payload.starts_with("data:") {
        payload.to_string()
    } else {
        format!("data:{};base64,{}", content_type, payload)
    }
}

/// Image to show for the pending change, falling back to the persisted
/// avatar and then the server default.
pub fn preview_src(pending: Option<&AvatarChange>, current_url: Option<&str>, username: &str) -> String {
    match pending {
        Some(AvatarChange::Reset) => default_avatar_url(username),
        Some(AvatarChange::Url(url)) if !url.trim().is_empty() => url.clone(),
        Some(AvatarChange::Service { blob, content_type, .. }) => data_url(content_type, blob),
        Some(AvatarChange::Upload(upload)) => {
            data_url(&upload.content_type, &STANDARD.encode(&upload.bytes))
        }
        _ => current_url
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_avatar_url(username)),
    }
}

pub fn suggestion_change(suggestion: &AvatarSuggestionDto) -> AvatarChange {
    AvatarChange::Service {
        blob: suggestion.blob.clone(),
        content_type: suggestion.content_type.clone(),
        service: suggestion.service.clone(),
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct UserAvatarEditorProps {
    pub username: String,
    #[prop_or_default]
    pub current_url: Option<String>,
    #[prop_or_default]
    pub pending: Option<AvatarChange>,
    #[prop_or_default]
    pub suggestions: Vec<AvatarSuggestionDto>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<Option<AvatarChange>>,
}

#[function_component(UserAvatarEditor)]
pub fn user_avatar_editor(props: &UserAvatarEditorProps) -> Html {
    let t = use_translation();
    let url_input = use_state(String::new);

    let on_url_input = {
        let url_input = url_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            url_input.set(input.value());
        })
    };

    let on_set_url = {
        let url_input = url_input.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let url = url_input.trim().to_string();
            if !url.is_empty() {
                on_change.emit(Some(AvatarChange::Url(url)));
            }
        })
    };

    let on_reset = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(Some(AvatarChange::Reset)))
    };

    let on_file = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file = gloo::file::File::from(file);
            let on_change = on_change.clone();
            spawn_local(async move {
                match gloo::file::futures::read_as_bytes(&file).await {
                    Ok(bytes) => {
                        debug!("Read {} bytes from {}", bytes.len(), file.name());
                        on_change.emit(Some(AvatarChange::Upload(AvatarUpload {
                            file_name: file.name(),
                            content_type: file.raw_mime_type(),
                            bytes,
                        })));
                    }
                    Err(e) => error!("Failed to read avatar file: {}", e),
                }
            });
        })
    };

    let src = preview_src(props.pending.as_ref(), props.current_url.as_deref(), &props.username);

    html! {
        <div class="flex flex-col md:flex-row gap-4">
            <img
                src={src}
                alt={t.t("Avatar")}
                class="w-32 h-32 rounded-lg object-cover border border-gray-200"
            />
            <div class="flex-1 space-y-3">
                <div class="flex flex-wrap gap-2">
                    <label class={classes!(
                        "px-3", "py-2", "text-sm", "bg-blue-600", "text-white", "rounded", "cursor-pointer",
                        props.disabled.then_some("opacity-50 pointer-events-none")
                    )}>
                        {t.t("Upload_file")}
                        <input type="file" accept="image/*" class="hidden" disabled={props.disabled} onchange={on_file} />
                    </label>
                    <button
                        type="button"
                        onclick={on_reset}
                        disabled={props.disabled}
                        class="px-3 py-2 text-sm bg-gray-600 text-white rounded hover:bg-gray-700 disabled:opacity-50"
                    >
                        {t.t("Reset_to_default")}
                    </button>
                    {props.suggestions.iter().map(|suggestion| {
                        let change = suggestion_change(suggestion);
                        let on_change = props.on_change.clone();
                        let src = data_url(&suggestion.content_type, &suggestion.blob);
                        html! {
                            <button
                                type="button"
                                key={suggestion.service.clone()}
                                title={suggestion.service.clone()}
                                disabled={props.disabled}
                                onclick={Callback::from(move |_: MouseEvent| on_change.emit(Some(change.clone())))}
                                class="w-10 h-10 rounded overflow-hidden border border-gray-300 disabled:opacity-50"
                            >
                                <img src={src} alt={suggestion.service.clone()} class="w-full h-full object-cover" />
                            </button>
                        }
                    }).collect::<Html>()}
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-600 mb-1">{t.t("Use_url_for_avatar")}</label>
                    <div class="flex gap-2">
                        <input
                            type="url"
                            value={(*url_input).clone()}
                            oninput={on_url_input}
                            disabled={props.disabled}
                            class="flex-1 px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        />
                        <button
                            type="button"
                            onclick={on_set_url}
                            disabled={props.disabled || url_input.trim().is_empty()}
                            class="px-3 py-2 text-sm bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                        >
                            {t.t("Set")}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_without_pending_change() {
        assert_eq!(preview_src(None, Some("/avatar/ada?etag=1"), "ada"), "/avatar/ada?etag=1");
        assert_eq!(preview_src(None, None, "ada"), "/avatar/ada");
    }

    #[test]
    fn test_preview_reset_shows_default() {
        assert_eq!(
            preview_src(Some(&AvatarChange::Reset), Some("/custom.png"), "ada"),
            "/avatar/ada"
        );
    }

    #[test]
    fn test_preview_upload_is_data_url() {
        let upload = AvatarChange::Upload(AvatarUpload {
            file_name: "a.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        });
        assert_eq!(preview_src(Some(&upload), None, "ada"), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_preview_service_keeps_existing_data_url() {
        let change = AvatarChange::Service {
            blob: "data:image/jpeg;base64,xyz".to_string(),
            content_type: "image/jpeg".to_string(),
            service: "gravatar".to_string(),
        };
        assert_eq!(preview_src(Some(&change), None, "ada"), "data:image/jpeg;base64,xyz");
    }

    #[test]
    fn test_suggestion_becomes_service_change() {
        let suggestion = AvatarSuggestionDto {
            service: "gravatar".to_string(),
            blob: "data:image/png;base64,AA".to_string(),
            content_type: "image/png".to_string(),
            url: None,
        };
        assert_eq!(
            suggestion_change(&suggestion),
            AvatarChange::Service {
                blob: "data:image/png;base64,AA".to_string(),
                content_type: "image/png".to_string(),
                service: "gravatar".to_string(),
            }
        );
    }
}
