use maud::{html, Markup};

use super::layout::{csrf_input, page};
use super::{human_date, TemplateData};
use crate::db::models::{Snippet, User};
use crate::forms::{LoginForm, PasswordUpdateForm, SignupForm, SnippetCreateForm};
use crate::validator::Validator;

fn field_error(validator: &Validator, key: &str) -> Markup {
    html! {
        @if let Some(message) = validator.field_error(key) {
            label.error { (message) }
        }
    }
}

fn non_field_errors(validator: &Validator) -> Markup {
    html! {
        @for message in &validator.non_field_errors {
            div.error { (message) }
        }
    }
}

pub fn home(data: &TemplateData, snippets: &[Snippet]) -> Markup {
    page(
        "Home",
        data,
        html! {
            h2 { "Latest Snippets" }
            @if snippets.is_empty() {
                p { "There's nothing to see here... yet!" }
            } @else {
                table {
                    tr {
                        th { "Title" }
                        th { "Created" }
                        th { "ID" }
                    }
                    @for snippet in snippets {
                        tr {
                            td { a href={ "/snippet/view/" (snippet.id) } { (snippet.title) } }
                            td { (human_date(&snippet.created)) }
                            td { "#" (snippet.id) }
                        }
                    }
                }
            }
        },
    )
}

pub fn about(data: &TemplateData) -> Markup {
    page(
        "About",
        data,
        html! {
            h2 { "About" }
            p {
                "Snippetbox is a place to paste and share short pieces of text: "
                "poems, quotes, code fragments. Snippets expire after a day, a week or a year."
            }
        },
    )
}

pub fn snippet_view(data: &TemplateData, snippet: &Snippet) -> Markup {
    page(
        &format!("Snippet #{}", snippet.id),
        data,
        html! {
            div.snippet {
                div.metadata {
                    strong { (snippet.title) }
                    span { "#" (snippet.id) }
                }
                pre { code { (snippet.content) } }
                div.metadata {
                    time { "Created: " (human_date(&snippet.created)) }
                    time { "Expires: " (human_date(&snippet.expires)) }
                }
            }
        },
    )
}

pub fn snippet_create(data: &TemplateData, form: &SnippetCreateForm) -> Markup {
    let v = &form.validator;
    page(
        "Create a New Snippet",
        data,
        html! {
            form action="/snippet/create" method="POST" novalidate {
                (csrf_input(data))
                div {
                    label { "Title:" }
                    (field_error(v, "title"))
                    input type="text" name="title" value=(form.title);
                }
                div {
                    label { "Content:" }
                    (field_error(v, "content"))
                    textarea name="content" { (form.content) }
                }
                div {
                    label { "Delete in:" }
                    (field_error(v, "expires"))
                    input type="radio" name="expires" value="365" checked[form.expires == 365]; " One Year "
                    input type="radio" name="expires" value="7" checked[form.expires == 7]; " One Week "
                    input type="radio" name="expires" value="1" checked[form.expires == 1]; " One Day"
                }
                div {
                    input type="submit" value="Publish snippet";
                }
            }
        },
    )
}

pub fn signup(data: &TemplateData, form: &SignupForm) -> Markup {
    let v = &form.validator;
    page(
        "Signup",
        data,
        html! {
            form action="/user/signup" method="POST" novalidate {
                (csrf_input(data))
                div {
                    label { "Name:" }
                    (field_error(v, "name"))
                    input type="text" name="name" value=(form.name);
                }
                div {
                    label { "Email:" }
                    (field_error(v, "email"))
                    input type="email" name="email" value=(form.email);
                }
                div {
                    label { "Password:" }
                    (field_error(v, "password"))
                    input type="password" name="password";
                }
                div {
                    input type="submit" value="Signup";
                }
            }
        },
    )
}

pub fn login(data: &TemplateData, form: &LoginForm) -> Markup {
    let v = &form.validator;
    page(
        "Login",
        data,
        html! {
            form action="/user/login" method="POST" novalidate {
                (csrf_input(data))
                (non_field_errors(v))
                div {
                    label { "Email:" }
                    (field_error(v, "email"))
                    input type="email" name="email" value=(form.email);
                }
                div {
                    label { "Password:" }
                    (field_error(v, "password"))
                    input type="password" name="password";
                }
                div {
                    input type="submit" value="Login";
                }
            }
        },
    )
}

pub fn account_view(data: &TemplateData, user: &User) -> Markup {
    page(
        "Your Account",
        data,
        html! {
            h2 { "Your Account" }
            table {
                tr {
                    th { "Name" }
                    td { (user.name) }
                }
                tr {
                    th { "Email" }
                    td { (user.email) }
                }
                tr {
                    th { "Joined" }
                    td { (human_date(&user.created)) }
                }
                tr {
                    th { "Password" }
                    td { a href="/account/password/update" { "Change password" } }
                }
            }
        },
    )
}

pub fn password_update(data: &TemplateData, form: &PasswordUpdateForm) -> Markup {
    let v = &form.validator;
    page(
        "Change Password",
        data,
        html! {
            h2 { "Change Password" }
            form action="/account/password/update" method="POST" novalidate {
                (csrf_input(data))
                div {
                    label { "Current password:" }
                    (field_error(v, "current_password"))
                    input type="password" name="current_password";
                }
                div {
                    label { "New password:" }
                    (field_error(v, "new_password"))
                    input type="password" name="new_password";
                }
                div {
                    label { "Confirm new password:" }
                    (field_error(v, "new_password_confirmation"))
                    input type="password" name="new_password_confirmation";
                }
                div {
                    input type="submit" value="Change password";
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> TemplateData {
        TemplateData {
            current_year: 2024,
            flash: Some("Saved!".to_string()),
            is_authenticated: false,
            csrf_token: "tok3n".to_string(),
        }
    }

    #[test]
    fn forms_embed_csrf_token() {
        let html = signup(&data(), &SignupForm::default()).into_string();

        assert!(html.contains(r#"<form action="/user/signup" method="POST" novalidate>"#));
        assert!(html.contains(r#"<input type="hidden" name="csrf_token" value="tok3n">"#));
        assert!(html.contains(r#"<div class="flash">Saved!</div>"#));
    }

    #[test]
    fn user_input_is_escaped() {
        let form = SignupForm {
            name: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let html = signup(&data(), &form).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn nav_depends_on_login_state() {
        let anonymous = about(&data()).into_string();
        assert!(anonymous.contains(r#"href="/user/login""#));
        assert!(!anonymous.contains(r#"action="/user/logout""#));

        let logged_in = about(&TemplateData {
            is_authenticated: true,
            ..data()
        })
        .into_string();
        assert!(logged_in.contains(r#"action="/user/logout""#));
        assert!(logged_in.contains(r#"href="/snippet/create""#));
    }

    #[test]
    fn selected_expiry_is_checked() {
        let html = snippet_create(&data(), &SnippetCreateForm::new()).into_string();

        assert!(html.contains(r#"value="365" checked"#));
        assert!(!html.contains(r#"value="7" checked"#));
    }
}
