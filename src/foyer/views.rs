//! HTML page rendering boundary. Pages are small string templates; anything
//! richer (layout files, static assets) lives outside this core.

use axum::response::Html;

use crate::foyer::forms::FormErrors;
use crate::foyer::handlers::{LOGIN_PATH, RECOVER_PATH, SIGNUP_PATH};

pub(crate) fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n"
    ))
}

/// Error messages are pre-built HTML fragments, rendered as-is.
fn error_list(errors: &FormErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|message| format!("<li>{message}</li>"))
        .collect();

    format!("<ul class=\"form-errors\">{items}</ul>")
}

pub fn login_page(errors: &FormErrors) -> Html<String> {
    let body = format!(
        "<h1>Log In</h1>\n\
         {errors}\
         <form method=\"post\" action=\"{LOGIN_PATH}\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"{RECOVER_PATH}\">Forgot your password?</a> <a href=\"{SIGNUP_PATH}\">Sign up</a></p>",
        errors = error_list(errors),
    );

    layout("Log In", &body)
}

pub fn signup_page(errors: &FormErrors) -> Html<String> {
    let body = format!(
        "<h1>Sign Up</h1>\n\
         {errors}\
         <form method=\"post\" action=\"{SIGNUP_PATH}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <label>Confirm password <input type=\"password\" name=\"confirm_password\"></label>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <p><a href=\"{LOGIN_PATH}\">Already have an account?</a></p>",
        errors = error_list(errors),
    );

    layout("Sign Up", &body)
}

pub fn recovery_page(errors: &FormErrors, notice: Option<&str>) -> Html<String> {
    let notice = notice.map_or(String::new(), |notice| format!("<p>{notice}</p>\n"));
    let body = format!(
        "<h1>Recovery</h1>\n\
         {errors}\
         {notice}\
         <form method=\"post\" action=\"{RECOVER_PATH}\">\n\
         <label>Email or phone number <input type=\"text\" name=\"recovery_method\"></label>\n\
         <button type=\"submit\">Recover account</button>\n\
         </form>\n\
         <p><a href=\"{LOGIN_PATH}\">Back to login</a></p>",
        errors = error_list(errors),
    );

    layout("Recovery", &body)
}

pub fn home_page(user_id: &str) -> Html<String> {
    let body = format!(
        "<h1>Home</h1>\n<p>Signed in as user {}.</p>",
        escape(user_id)
    );

    layout("Home", &body)
}

pub fn internal_error_page(back_route: &str) -> Html<String> {
    let body = format!(
        "<h1>500 Internal Server Error</h1>\n<p><a href=\"{back_route}\">Go back</a></p>"
    );

    layout("500 Internal Server Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn login_page_renders_errors() {
        let mut errors = FormErrors::new();
        errors.push("The password cannot be empty.");

        let Html(page) = login_page(&errors);
        assert!(page.contains("<ul class=\"form-errors\">"));
        assert!(page.contains("<li>The password cannot be empty.</li>"));
    }

    #[test]
    fn login_page_without_errors_has_no_error_list() {
        let Html(page) = login_page(&FormErrors::new());
        assert!(!page.contains("form-errors"));
        assert!(page.contains("action=\"/login\""));
    }

    #[test]
    fn error_page_links_back() {
        let Html(page) = internal_error_page("/login");
        assert!(page.contains("<a href=\"/login\">"));
    }
}
