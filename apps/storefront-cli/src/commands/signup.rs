//! # Signup Command

use storefront_client::{FlowOutcome, Storefront};
use storefront_core::forms::SignupForm;

pub async fn run(
    storefront: &Storefront,
    username: String,
    email: String,
    password: String,
) -> FlowOutcome {
    let flow = storefront.signup();
    flow.set_form(SignupForm::new(username, email, password));

    println!("[{}]", flow.submit_label());
    let outcome = flow.submit().await;

    if outcome.is_applied() {
        if let Some(user) = storefront.store().user().user {
            println!("Signed up as {} <{}>", user.username, user.email);
        }
    }
    outcome
}
