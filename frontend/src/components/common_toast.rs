use gloo_timers::callback::Timeout;
use uuid::Uuid;
use yew::prelude::*;

use crate::config::Config;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

impl ToastType {
    fn classes(&self) -> &'static str {
        match self {
            ToastType::Success => "bg-green-500 border-green-600",
            ToastType::Error => "bg-red-500 border-red-600",
            ToastType::Info => "bg-blue-500 border-blue-600",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "✓",
            ToastType::Error => "✕",
            ToastType::Info => "ℹ",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    /// Milliseconds before auto-dismiss; `None` waits for the user.
    pub duration: Option<u32>,
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(Config::success_toast_ms()),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastType::Success)
    }

    /// Errors stay up longer so they can be read.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastType::Error).with_duration(Config::error_toast_ms())
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub add_toast: Callback<Toast>,
    pub remove_toast: Callback<Uuid>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);

    let add_toast = {
        let toasts = toasts.clone();
        Callback::from(move |toast: Toast| {
            let toast_id = toast.id;
            let duration = toast.duration;
            toasts.dispatch(ToastAction::Add(toast));

            if let Some(duration_ms) = duration {
                let toasts = toasts.clone();
                Timeout::new(duration_ms, move || {
                    toasts.dispatch(ToastAction::Remove(toast_id));
                })
                .forget();
            }
        })
    };

    let remove_toast = {
        let toasts = toasts.clone();
        Callback::from(move |id: Uuid| toasts.dispatch(ToastAction::Remove(id)))
    };

    let context = ToastContext {
        toasts: toasts.items.clone(),
        add_toast,
        remove_toast,
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            <div class="toast-container">
                {props.children.clone()}
                <ToastStack />
            </div>
        </ContextProvider<ToastContext>>
    }
}

// Dispatch goes through a reducer so timers firing later see the current list
#[derive(Clone, Debug, Default, PartialEq)]
struct ToastList {
    items: Vec<Toast>,
}

enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: std::rc::Rc<Self>, action: Self::Action) -> std::rc::Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Add(toast) => items.push(toast),
            ToastAction::Remove(id) => items.retain(|t| t.id != id),
        }
        ToastList { items }.into()
    }
}

#[function_component(ToastStack)]
fn toast_stack() -> Html {
    let Some(toast_context) = use_context::<ToastContext>() else {
        return html! {};
    };

    html! {
        <div class="fixed top-4 right-4 z-50 space-y-2" aria-live="polite">
            {toast_context.toasts.iter().map(|toast| {
                html! {
                    <ToastItem key={toast.id.to_string()} toast={toast.clone()} />
                }
            }).collect::<Html>()}
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let toast_context = use_context::<ToastContext>();
    let visible = use_state(|| false);

    // Animate in
    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let timeout = Timeout::new(10, move || {
                visible.set(true);
            });
            move || drop(timeout)
        });
    }

    let on_close = {
        let toast_id = props.toast.id;
        Callback::from(move |_: MouseEvent| {
            if let Some(ctx) = &toast_context {
                ctx.remove_toast.emit(toast_id);
            }
        })
    };

    let toast_type_classes = props.toast.toast_type.classes();
    let icon = props.toast.toast_type.icon();

    html! {
        <div class={classes!(
            "transform", "transition-all", "duration-300", "ease-in-out",
            if *visible { "translate-x-0 opacity-100" } else { "translate-x-full opacity-0" }
        )}>
            <div class={classes!(
                "flex", "items-center", "p-4", "rounded-lg", "shadow-lg", "border-l-4", "text-white", "min-w-80", "max-w-md",
                toast_type_classes
            )}>
                <div class="flex-shrink-0 mr-3">
                    <span class="text-lg font-bold">{icon}</span>
                </div>
                <div class="flex-1">
                    <p class="text-sm font-medium">{&props.toast.message}</p>
                </div>
                <div class="flex-shrink-0 ml-3">
                    <button
                        onclick={on_close}
                        class="text-white hover:text-gray-200 focus:outline-none focus:text-gray-200 transition-colors duration-200"
                    >
                        <span class="text-lg">{"×"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Returns a callback that shows toasts, or drops them when no provider
/// is mounted.
#[hook]
pub fn use_toast() -> Callback<Toast> {
    match use_context::<ToastContext>() {
        Some(ctx) => ctx.add_toast,
        None => Callback::from(|toast: Toast| log::warn!("No toast provider for: {}", toast.message)),
    }
}
