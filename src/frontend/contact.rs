use gloo::timers::callback::Timeout;
use yew::prelude::*;

use super::ui::{Button, ButtonVariant, Input, Size, Textarea};
use crate::contact::{validate_field, ContactForm, Field, FormErrors, SIMULATED_SUBMIT_MS};

fn error_text(errors: &FormErrors, field: Field) -> Option<AttrValue> {
    errors.get(field).map(|error| AttrValue::from(error.to_string()))
}

#[function_component(ContactFormView)]
pub fn contact_form_view() -> Html {
    let form = use_state(ContactForm::default);
    let errors = use_state(FormErrors::default);
    let submitting = use_state(|| false);
    let submitted = use_state(|| false);
    let pending = use_mut_ref(|| None::<Timeout>);

    {
        let pending = pending.clone();
        use_effect_with((), move |_| move || drop(pending.borrow_mut().take()));
    }

    let on_field = |field: Field| {
        let form = form.clone();
        let errors = errors.clone();
        let submitted = submitted.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            next.set(field, value);
            form.set(next);

            if errors.get(field).is_some() {
                let mut next_errors = (*errors).clone();
                next_errors.clear(field);
                errors.set(next_errors);
            }
            submitted.set(false);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let submitted = submitted.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }

            if let Err(invalid) = form.validate() {
                errors.set(invalid);
                return;
            }

            errors.set(FormErrors::default());
            submitting.set(true);

            let form = form.clone();
            let submitting = submitting.clone();
            let submitted = submitted.clone();
            let timeout = Timeout::new(SIMULATED_SUBMIT_MS, move || {
                log::info!("contact message accepted");
                form.set(ContactForm::default());
                submitting.set(false);
                submitted.set(true);
            });
            *pending.borrow_mut() = Some(timeout);
        })
    };

    let revalidate = |field: Field| {
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |_: FocusEvent| {
            if errors.get(field).is_none() {
                return;
            }
            let mut next = (*errors).clone();
            match validate_field(field, form.value(field)) {
                Ok(()) => next.clear(field),
                Err(error) => match field {
                    Field::Name => next.name = Some(error),
                    Field::Email => next.email = Some(error),
                    Field::Message => next.message = Some(error),
                },
            }
            errors.set(next);
        })
    };

    html! {
        <form class="contact-form" novalidate=true {onsubmit}>
            <div onfocusout={revalidate(Field::Name)}>
                <Input
                    id="name"
                    label="Name"
                    placeholder="Your name"
                    value={form.name.clone()}
                    error={error_text(&errors, Field::Name)}
                    oninput={on_field(Field::Name)}
                />
            </div>
            <div onfocusout={revalidate(Field::Email)}>
                <Input
                    id="email"
                    label="Email"
                    input_type="email"
                    placeholder="you@example.com"
                    value={form.email.clone()}
                    error={error_text(&errors, Field::Email)}
                    oninput={on_field(Field::Email)}
                />
            </div>
            <div onfocusout={revalidate(Field::Message)}>
                <Textarea
                    id="message"
                    label="Message"
                    placeholder="Tell me about your project..."
                    value={form.message.clone()}
                    error={error_text(&errors, Field::Message)}
                    oninput={on_field(Field::Message)}
                />
            </div>
            <Button
                button_type="submit"
                variant={ButtonVariant::Primary}
                size={Size::Lg}
                full_width=true
                loading={*submitting}
            >
                {if *submitting { "Sending..." } else { "Send Message" }}
            </Button>
            if *submitted {
                <p class="form-success" role="status">
                    {"Thanks for reaching out! I'll get back to you soon."}
                </p>
            }
        </form>
    }
}
