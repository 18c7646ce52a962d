//! Thin HTML rendering. Templating proper is outside this application's
//! scope, so pages are built directly as escaped strings: a shared shell,
//! the three forms with inline field errors, the feed and profile lists.

use chirp_types::forms::{FieldError, LoginForm, PostForm, RegistrationForm};
use chirp_types::models::{Claims, Post, User};

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, viewer: Option<&Claims>, flash: Option<&str>, body: &str) -> String {
    let nav = match viewer {
        Some(claims) => format!(
            r#"<a href="/">Home</a> <a href="/posts">New Post</a> <a href="/profile/{handle}">Profile</a> <a href="/logout">Log out</a>"#,
            handle = escape(&claims.handle)
        ),
        None => r#"<a href="/">Home</a> <a href="/login">Log in</a> <a href="/registration">Register</a>"#
            .to_string(),
    };

    let flash_html = flash
        .map(|message| format!(r#"<p class="flash">{}</p>"#, escape(message)))
        .unwrap_or_default();

    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Chirp</title></head>\n<body>\n<nav>{nav}</nav>\n{flash_html}\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn inline_error(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| format!(r#"<span class="error">{}</span>"#, escape(e.message)))
        .unwrap_or_default()
}

fn text_input(errors: &[FieldError], name: &str, label: &str, value: &str, password: bool) -> String {
    let kind = if password { "password" } else { "text" };
    format!(
        r#"<label>{label} <input type="{kind}" name="{name}" value="{value}"></label>{error}<br>"#,
        label = escape(label),
        value = escape(value),
        error = inline_error(errors, name),
    )
}

fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "<p>No posts yet.</p>".to_string();
    }

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li><a href="/profile/{handle}">@{handle}</a> {content} <time>{time}</time></li>"#,
                handle = escape(&post.user_handle),
                content = escape(&post.content),
                time = post.time.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect();

    format!("<ul class=\"posts\">{}</ul>", items)
}

pub fn feed_page(posts: &[Post], viewer: Option<&Claims>, flash: Option<&str>) -> String {
    let body = format!("<h1>Feed</h1>\n{}", post_list(posts));
    layout("Feed", viewer, flash, &body)
}

pub fn registration_page(
    form: &RegistrationForm,
    errors: &[FieldError],
    flash: Option<&str>,
) -> String {
    let body = format!(
        "<h1>Registration</h1>\n<form method=\"post\" action=\"/registration\">\n{}{}{}{}{}{}<button type=\"submit\">Submit</button>\n</form>",
        text_input(errors, "first_name", "First Name", &form.first_name, false),
        text_input(errors, "last_name", "Last Name", &form.last_name, false),
        text_input(errors, "user_handle", "User Handle", &form.user_handle, false),
        text_input(errors, "email", "Email", &form.email, false),
        text_input(errors, "password", "Password", &form.password, true),
        text_input(errors, "description", "Description", &form.description, false),
    );
    layout("Registration", None, flash, &body)
}

pub fn login_page(form: &LoginForm, errors: &[FieldError], flash: Option<&str>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n<form method=\"post\" action=\"/login\">\n{}{}<button type=\"submit\">Submit</button>\n</form>",
        text_input(errors, "email", "Email", &form.email, false),
        text_input(errors, "password", "Password", &form.password, true),
    );
    layout("Log in", None, flash, &body)
}

pub fn post_form_page(form: &PostForm, errors: &[FieldError], viewer: &Claims) -> String {
    let body = format!(
        "<h1>New Post</h1>\n<form method=\"post\" action=\"/posts\">\n{}<button type=\"submit\">Submit</button>\n</form>",
        text_input(errors, "content", "Content", &form.content, false),
    );
    layout("New Post", Some(viewer), None, &body)
}

pub fn profile_page(
    handle: &str,
    user: Option<&User>,
    posts: &[Post],
    viewer: &Claims,
) -> String {
    let identity = match user {
        Some(user) => {
            let description = user
                .description
                .as_deref()
                .map(|d| format!("<p>{}</p>", escape(d)))
                .unwrap_or_default();
            format!(
                "<h1>@{handle}</h1>\n<p>{first} {last}</p>\n{description}",
                handle = escape(&user.user_handle),
                first = escape(&user.first_name),
                last = escape(&user.last_name),
            )
        }
        None => format!("<h1>@{}</h1>", escape(handle)),
    };

    let body = format!("{}\n{}", identity, post_list(posts));
    layout("Profile", Some(viewer), None, &body)
}

pub fn error_page() -> String {
    layout("Error", None, None, "<h1>Something went wrong</h1>")
}
