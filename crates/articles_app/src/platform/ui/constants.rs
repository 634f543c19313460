pub const APP_TITLE: &str = "Advanced Web Applications";
pub const SPINNER_TEXT: &str = "Please wait...";
pub const PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "\
Commands:
  login                     submit the login form
  login <user> <password>   log in with explicit credentials
  user <text>               set the username input
  pass <text>               set the password input
  logout                    log out and forget the token
  goto / | /articles        navigate
  list                      reload the articles
  title <text>              set the article title input
  text <text>               set the article text input
  topic JavaScript|React|Node
                            pick the article topic (no argument clears it)
  submit                    create the article, or save the one being edited
  edit <id>                 edit an article
  cancel                    stop editing
  delete <id>               delete an article
  help                      show this text
  quit                      exit";
