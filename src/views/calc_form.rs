//! 入力フォームビュー

use leptos::*;

use crate::error::SubmitError;
use crate::form::FormController;
use crate::models::{format_field, FIELD_COUNT, FIELD_KEYS};
use crate::utils::scroll::{focus_quietly, reveal, FIELD_ALIGN};

#[component]
pub fn CalcForm() -> impl IntoView {
    let ctrl = use_context::<FormController>().expect("FormController not found");

    let input_refs = store_value(
        (0..FIELD_COUNT)
            .map(|_| create_node_ref::<html::Input>())
            .collect::<Vec<_>>(),
    );

    // 最初の未入力項目へスクロールしてフォーカス
    let go_to_field = move |field: usize| {
        let Some(input) = input_refs.with_value(|refs| refs.get(field).and_then(|r| r.get_untracked())) else {
            return;
        };
        reveal(&input, FIELD_ALIGN);
        focus_quietly(&input);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            if let Err(SubmitError::Invalid { field }) = ctrl.submit().await {
                go_to_field(field);
            }
        });
    };

    view! {
        <form class="calc-form" on:submit=on_submit>
            <div class="cache-toggle">
                <label>
                    <input type="checkbox"
                        prop:checked=move || ctrl.cache_enabled.get()
                        on:change=move |ev| ctrl.set_cache_enabled(event_target_checked(&ev))
                    />
                    " Keep values for this session"
                </label>
            </div>

            <div class="field-grid">
                {FIELD_KEYS.iter().enumerate().map(|(index, key)| {
                    let input_ref = input_refs.with_value(|refs| refs[index]);
                    let invalid = move || ctrl.submitted.get() && ctrl.field(index).is_none();
                    view! {
                        <div class="field" class:invalid=invalid>
                            <label for=*key>{format!("Input {}", index + 1)}</label>
                            <input type="number" step="any" id=*key name=*key
                                node_ref=input_ref
                                // 復元・リセット時だけ値を書き戻す（入力中のカーソルを動かさない）
                                prop:value=move || {
                                    ctrl.revision.get();
                                    format_field(ctrl.fields.with_untracked(|f| f.get(index)))
                                }
                                on:input=move |ev| ctrl.set_field(index, &event_target_value(&ev))
                            />
                            <Show when=invalid>
                                <span class="field-error">"Required"</span>
                            </Show>
                        </div>
                    }
                }).collect_view()}
            </div>

            <div class="actions">
                <button type="submit" disabled=move || ctrl.calculating.get()>
                    {move || if ctrl.calculating.get() { "Calculating..." } else { "Calculate" }}
                </button>
                <button type="button" class="secondary" on:click=move |_| ctrl.reset_form()>
                    "Reset"
                </button>
            </div>

            {move || ctrl.error_msg.get().map(|e| view! {
                <p class="status error">{e}</p>
            })}
        </form>
    }
}
