use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::common_modal::Modal;
use crate::i18n::use_translation;

#[derive(Properties, Clone, PartialEq)]
pub struct PasswordConfirmModalProps {
    /// Receives the typed current password.
    pub on_confirm: Callback<String>,
    pub on_cancel: Callback<()>,
}

/// Asks for the current password before a sensitive change is submitted.
#[function_component(PasswordConfirmModal)]
pub fn password_confirm_modal(props: &PasswordConfirmModalProps) -> Html {
    let t = use_translation();
    let typed_password = use_state(String::new);

    let on_input = {
        let typed_password = typed_password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            typed_password.set(input.value());
        })
    };

    let on_continue = {
        let typed_password = typed_password.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_confirm.emit((*typed_password).clone());
        })
    };

    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <Modal is_open={true} title={t.t("Please_enter_your_password")} on_close={props.on_cancel.clone()}>
            <form onsubmit={on_continue}>
                <p class="text-sm text-gray-600 mb-4">
                    {t.t("For_your_security_you_must_enter_your_current_password_to_continue")}
                </p>
                <input
                    type="password"
                    autocomplete="current-password"
                    value={(*typed_password).clone()}
                    oninput={on_input}
                    class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 mb-6"
                />
                <div class="flex justify-end space-x-3">
                    <button
                        type="button"
                        onclick={on_cancel_click}
                        class="px-4 py-2 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-md hover:bg-gray-50"
                    >
                        {t.t("Cancel")}
                    </button>
                    <button
                        type="submit"
                        class="px-4 py-2 text-sm font-medium text-white bg-red-600 rounded-md hover:bg-red-700"
                    >
                        {t.t("Continue")}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
