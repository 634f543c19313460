use articles_core::{ArticleField, ArticleId, Credentials, LoginField, Msg, Route, Topic};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "login" if rest.is_empty() => Msg::LoginSubmitted,
        "login" => {
            let (username, password) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: login <user> <password>".to_string())?;
            Msg::LoginRequested(Credentials {
                username: username.to_string(),
                password: password.trim().to_string(),
            })
        }
        "user" => Msg::LoginInputChanged {
            field: LoginField::Username,
            value: rest.to_string(),
        },
        "pass" => Msg::LoginInputChanged {
            field: LoginField::Password,
            value: rest.to_string(),
        },
        "logout" => Msg::LogoutClicked,
        "goto" => {
            let route =
                Route::from_path(rest).ok_or_else(|| format!("unknown route: {rest}"))?;
            Msg::Navigate(route)
        }
        "list" => Msg::ArticlesRequested,
        "title" => Msg::ArticleInputChanged {
            field: ArticleField::Title,
            value: rest.to_string(),
        },
        "text" => Msg::ArticleInputChanged {
            field: ArticleField::Text,
            value: rest.to_string(),
        },
        "topic" if rest.is_empty() => Msg::TopicSelected(None),
        "topic" => Msg::TopicSelected(Some(rest.parse::<Topic>()?)),
        "submit" => Msg::ArticleFormSubmitted,
        "edit" => Msg::EditClicked(parse_id(rest)?),
        "cancel" => Msg::CancelEditClicked,
        "delete" => Msg::DeleteClicked(parse_id(rest)?),
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(Command::Dispatch(msg)))
}

fn parse_id(raw: &str) -> Result<ArticleId, String> {
    raw.parse()
        .map_err(|_| format!("expected an article id, got `{raw}`"))
}
