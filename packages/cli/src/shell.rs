//! Interactive shell: reads one command per line from stdin and re-renders the
//! view after each.

use anyhow::Result;
use api::NotesApi;
use store::KeyValueStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use ui::{AuthMode, SignInForm, SignUpForm, View, ViewRouter};

use crate::render;

const HELP: &str = "\
signed out:
  signin <user> <password>        sign in
  signup <name> <user> <password> create an account
  mode [signin|signup]            switch form
signed in:
  new                             show or hide the compose form
  text <words...>                 set the compose text
  save                            create a note from the compose text
  refresh                         reload notes
  logout                          forget the session
anywhere:
  help, quit
";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    SignIn(SignInForm),
    SignUp(SignUpForm),
    Mode(Option<AuthMode>),
    New,
    Text(String),
    Save,
    Refresh,
    Logout,
    Help,
    Quit,
}

/// Parse one input line. Missing arguments stay empty so the forms can report
/// them like any other blank field.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut args = rest.split_whitespace();
    let mut next = || args.next().unwrap_or_default().to_string();

    let command = match word {
        "signin" => Command::SignIn(SignInForm {
            user: next(),
            password: next(),
        }),
        "signup" => Command::SignUp(SignUpForm {
            name: next(),
            user: next(),
            password: next(),
        }),
        "mode" => match next().as_str() {
            "" => Command::Mode(None),
            "signin" => Command::Mode(Some(AuthMode::SignIn)),
            "signup" => Command::Mode(Some(AuthMode::SignUp)),
            other => return Err(format!("unknown mode: {other}")),
        },
        "new" => Command::New,
        "text" => Command::Text(rest.trim_start().to_string()),
        "save" => Command::Save,
        "refresh" => Command::Refresh,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

/// Run the shell until `quit` or end of input.
pub async fn run<S, A>(router: &mut ViewRouter<S, A>) -> Result<()>
where
    S: KeyValueStore + Clone,
    A: NotesApi + Clone,
{
    print!("{}", render::view(router));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        apply(router, command).await;
        print!("{}", render::view(router));
    }
    Ok(())
}

async fn apply<S, A>(router: &mut ViewRouter<S, A>, command: Command)
where
    S: KeyValueStore + Clone,
    A: NotesApi + Clone,
{
    match command {
        // Bring the submitted form to the front so its result is the one shown
        Command::SignIn(form) => {
            router.select_mode(AuthMode::SignIn);
            if let Err(e) = router.submit_sign_in(&form).await {
                println!("{e}");
            }
        }
        Command::SignUp(form) => {
            router.select_mode(AuthMode::SignUp);
            if let Err(e) = router.submit_sign_up(&form).await {
                println!("{e}");
            }
        }
        Command::Mode(mode) => {
            let next = match (mode, router.view()) {
                (Some(mode), _) => mode,
                (None, View::Unauthenticated { mode: AuthMode::SignIn }) => AuthMode::SignUp,
                (None, _) => AuthMode::SignIn,
            };
            router.select_mode(next);
        }
        Command::Logout => {
            if let Err(e) = router.logout().await {
                tracing::warn!("failed to clear saved session: {e}");
            }
        }
        Command::Help => print!("{HELP}"),
        Command::Quit => {}
        dashboard_command => {
            let Some(dashboard) = router.dashboard() else {
                println!("not signed in");
                return;
            };
            match dashboard_command {
                Command::New => {
                    dashboard.toggle_compose();
                }
                Command::Text(text) => dashboard.set_compose_text(text),
                Command::Save => {
                    dashboard.submit_compose().await;
                }
                Command::Refresh => {
                    dashboard.refresh().await;
                }
                _ => {}
            }
        }
    }
}
