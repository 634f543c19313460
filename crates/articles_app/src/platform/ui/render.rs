use std::fmt::Write;

use articles_core::{AppViewModel, ArticleFormView, ArticleRowView, FormMode, LoginFormView, Route};

use super::constants::{APP_TITLE, SPINNER_TEXT};

/// Renders the whole screen as text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.spinner_on {
        let _ = writeln!(out, "{SPINNER_TEXT}");
    }
    if !view.message.is_empty() {
        let _ = writeln!(out, "*** {} ***", view.message);
    }
    let _ = writeln!(out, "== {APP_TITLE} ==  [{}]", view.route.path());

    match view.route {
        Route::Login => render_login(&mut out, &view.login),
        Route::Articles => {
            render_article_form(&mut out, &view.article_form);
            render_articles(&mut out, &view.articles);
        }
    }
    out
}

fn render_login(out: &mut String, login: &LoginFormView) {
    let _ = writeln!(out, "Login");
    let _ = writeln!(out, "  username: {}", login.username);
    let _ = writeln!(out, "  password: {}", "*".repeat(login.password_len));
    let _ = writeln!(out, "  [login] {}", enabled_label(login.submit_enabled));
}

fn render_article_form(out: &mut String, form: &ArticleFormView) {
    let heading = match form.mode {
        FormMode::Create => "Create Article".to_string(),
        FormMode::Edit { article_id } => format!("Edit Article #{article_id}  [cancel]"),
    };
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "  title: {}", form.title);
    let _ = writeln!(out, "  text:  {}", form.text);
    let topic = form.topic.map_or("-- select topic --", |topic| topic.as_str());
    let _ = writeln!(out, "  topic: {topic}");
    let _ = writeln!(out, "  [submit] {}", enabled_label(form.submit_enabled));
}

fn render_articles(out: &mut String, articles: &[ArticleRowView]) {
    let _ = writeln!(out, "Articles");
    if articles.is_empty() {
        let _ = writeln!(out, "  No articles yet");
        return;
    }
    for article in articles {
        let _ = writeln!(out, "{}", format_article_row(article));
    }
}

fn format_article_row(article: &ArticleRowView) -> String {
    let marker = if article.editing { "*" } else { " " };
    let actions = if article.actions_enabled {
        "[edit] [delete]"
    } else {
        "(locked while editing)"
    };
    format!(
        "{marker} #{id} {title} ({topic}) {actions}\n      {text}",
        id = article.article_id,
        title = article.title,
        topic = article.topic,
        text = article.text,
    )
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "ready"
    } else {
        "disabled"
    }
}
