#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Password;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::MovieDraft;
use crate::domain::services::validate_login;
use crate::domain::services::validate_registration;
use crate::domain::services::AuthService;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::storage::file::FileTokenStore;
use crate::infrastructure::storage::TokenStoreBox;

pub fn help_text() -> String {
    let text = r#"
LOGIN & REGISTER:
- Tab / Up / Down - Move between fields
- Left / Right / Home / End - Move the cursor inside a field
- Enter - Submit
- CTRL+R - Switch to the registration form
- CTRL+L - Switch to the login form

DASHBOARD:
- CTRL+Left / CTRL+Right - Switch between the movie form and the movie list
- Left - Back to the movie form from the list
- Enter - Save the movie form, or edit the selected movie from the list
- Esc - Cancel editing
- Up / Down - Select a movie in the list
- e - Edit the selected movie
- d - Delete the selected movie, then y to confirm or n to cancel
- r - Reload the movie list
- CTRL+X - Sign out

GLOBAL:
- CTRL+C - Exit Marquee.
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn token_store() -> TokenStoreBox {
    return Arc::new(FileTokenStore::default());
}

/// Loads config and connects to the API for the non-interactive commands.
async fn connect(matches: Vec<&ArgMatches>) -> Result<(ApiClient, AuthService)> {
    Config::load(matches).await?;
    Config::validate()?;

    let store = token_store();
    let client = ApiClient::from_config(store.clone())?;
    let auth = AuthService::new(client.clone(), store);

    return Ok((client, auth));
}

/// Reads a flag or prompts for it. The value comes back trimmed.
fn prompt_text(matches: &ArgMatches, name: &str, prompt: &str) -> Result<String> {
    if let Some(val) = matches.get_one::<String>(name) {
        return Ok(val.trim().to_string());
    }

    let val = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;

    return Ok(val.trim().to_string());
}

async fn login(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    let (_, auth) = connect(vec![matches, subcmd_matches]).await?;

    let email = prompt_text(subcmd_matches, "email", "Email")?;
    let password = match subcmd_matches.get_one::<String>("password") {
        Some(password) => password.to_string(),
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    validate_login(&email, &password)?;
    auth.login(&email, &password).await?;

    println!("{}", "Login successful!".green());
    return Ok(());
}

async fn register(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    let (_, auth) = connect(vec![matches, subcmd_matches]).await?;

    let name = prompt_text(subcmd_matches, "name", "Name")?;
    let email = prompt_text(subcmd_matches, "email", "Email")?;
    let (password, confirmation) = match subcmd_matches.get_one::<String>("password") {
        Some(password) => (password.to_string(), password.to_string()),
        None => {
            let password = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Password")
                .interact()?;
            let confirmation = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Confirm password")
                .interact()?;
            (password, confirmation)
        }
    };

    validate_registration(&name, &email, &password, &confirmation)?;
    let message = auth.register(&name, &email, &password).await?;

    println!("{}", message.green());
    println!("Run `marquee login` to sign in.");
    return Ok(());
}

async fn list_movies(client: &ApiClient) -> Result<()> {
    let movies = client.list_movies().await?;
    if movies.is_empty() {
        println!("No movies yet. Add one with `marquee movies add --title <TITLE>`.");
        return Ok(());
    }

    let res = movies
        .iter()
        .map(|movie| {
            return format!(
                "- {} {}\n  {}",
                movie.heading().bold(),
                format!("(ID: {})", movie.id).dimmed(),
                movie.byline()
            );
        })
        .collect::<Vec<String>>()
        .join("\n");

    println!("{res}");
    return Ok(());
}

fn draft_from_args(matches: &ArgMatches, id: Option<String>) -> MovieDraft {
    let get = |name: &str| {
        return matches
            .get_one::<String>(name)
            .map(|e| return e.to_string())
            .unwrap_or_default();
    };

    return MovieDraft {
        id,
        title: get("title"),
        director: get("director"),
        genre: get("genre"),
        release_year: get("year"),
    };
}

async fn save_movie(client: &ApiClient, matches: &ArgMatches, id: Option<String>) -> Result<()> {
    let draft = draft_from_args(matches, id);
    let input = draft.to_input()?;

    match &draft.id {
        Some(id) => {
            let movie = client.update_movie(id, &input).await?;
            println!("{} {}", "Movie updated!".green(), movie.heading());
        }
        None => {
            let movie = client.create_movie(&input).await?;
            println!(
                "{} {} (ID: {})",
                "Movie created!".green(),
                movie.heading(),
                movie.id
            );
        }
    }

    return Ok(());
}

async fn delete_movie(client: &ApiClient, matches: &ArgMatches) -> Result<()> {
    let id = match matches.get_one::<String>("id") {
        Some(id) => id.to_string(),
        None => bail!("A movie ID is required"),
    };

    if !matches.get_flag("yes") {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete movie {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    client.delete_movie(&id).await?;
    println!("{}", "Movie deleted!".green());
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Marquee")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Marquee with environment variable RUST_LOG=marquee")
        )
        .subcommand(
            Command::new("token-path").about("Output path to the stored session token.")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Sign in and store the session token. Omitted credentials are prompted for.")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .num_args(1)
                .help("Account email address."),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .env("MARQUEE_PASSWORD")
                .hide_env_values(true)
                .num_args(1)
                .help("Account password."),
        );
}

fn subcommand_register() -> Command {
    return Command::new("register")
        .about("Create a new account. Omitted fields are prompted for.")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .num_args(1)
                .help("Display name."),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .num_args(1)
                .help("Account email address."),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .env("MARQUEE_PASSWORD")
                .hide_env_values(true)
                .num_args(1)
                .help("Account password, at least 6 characters."),
        );
}

fn movie_fields(cmd: Command) -> Command {
    return cmd
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .num_args(1)
                .required(true)
                .help("Movie title."),
        )
        .arg(
            Arg::new("director")
                .short('d')
                .long("director")
                .num_args(1)
                .help("Director."),
        )
        .arg(
            Arg::new("genre")
                .short('g')
                .long("genre")
                .num_args(1)
                .help("Genre."),
        )
        .arg(
            Arg::new("year")
                .short('y')
                .long("year")
                .num_args(1)
                .help("Release year."),
        );
}

fn arg_movie_id() -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .num_args(1)
        .required(true)
        .help("Movie ID");
}

fn subcommand_movies() -> Command {
    return Command::new("movies")
        .about("Manage your movie collection without the TUI.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List all movies in the collection."))
        .subcommand(movie_fields(
            Command::new("add").about("Add a movie. Only the title is required."),
        ))
        .subcommand(movie_fields(
            Command::new("update")
                .about("Replace a movie's details. Fields left out are cleared.")
                .arg(arg_movie_id()),
        ))
        .subcommand(
            Command::new("delete")
                .about("Delete a movie.")
                .arg(arg_movie_id())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt."),
                ),
        );
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with(':') {
                return format!("HOTKEYS {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("marquee")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Forget the stored session token."))
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_movies())
        .subcommand(subcommand_register())
        .arg(
            Arg::new(ConfigKey::ApiBaseURL.to_string())
                .short('u')
                .long(ConfigKey::ApiBaseURL.to_string())
                .env("MARQUEE_API_BASE_URL")
                .num_args(1)
                .help("Base URL of the Marquee API, such as http://localhost:3000. Required.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MARQUEE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::NotificationTimeout.to_string())
                .long(ConfigKey::NotificationTimeout.to_string())
                .env("MARQUEE_NOTIFICATION_TIMEOUT")
                .num_args(1)
                .help(format!("Time in milliseconds a notification stays on screen. [default: {}]", Config::default(ConfigKey::NotificationTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("MARQUEE_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time in milliseconds to wait for the API before giving up on a request. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Route.to_string())
                .short('r')
                .long(ConfigKey::Route.to_string())
                .env("MARQUEE_ROUTE")
                .num_args(1)
                .help(format!("The view to open on start, one of /login, /register or /dashboard. [default: {}]", Config::default(ConfigKey::Route))),
        )
        .arg(
            Arg::new(ConfigKey::TokenFile.to_string())
                .long(ConfigKey::TokenFile.to_string())
                .env("MARQUEE_TOKEN_FILE")
                .num_args(1)
                .help(format!("Path to the file holding the session token. [default: {}]", Config::default(ConfigKey::TokenFile)))
                .global(true),
        );
}

/// Runs any non-interactive subcommand. Returns true when the TUI should
/// start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_dir = env::var("MARQUEE_LOG_DIR")
                        .map(path::PathBuf::from)
                        .unwrap_or_else(|_| {
                            return dirs::cache_dir()
                                .unwrap_or_else(env::temp_dir)
                                .join("marquee");
                        });
                    println!("{}", log_dir.join("debug.log").to_string_lossy());
                }
                Some(("token-path", _)) => {
                    Config::load(vec![&matches, debug_matches]).await?;
                    println!("{}", Config::get(ConfigKey::TokenFile));
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("login", subcmd_matches)) => {
            login(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        Some(("register", subcmd_matches)) => {
            register(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            token_store().clear()?;
            println!("You have been signed out.");
            return Ok(false);
        }
        Some(("movies", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("list", list_matches)) => {
                    let (client, _) = connect(vec![&matches, subcmd_matches, list_matches]).await?;
                    list_movies(&client).await?;
                }
                Some(("add", add_matches)) => {
                    let (client, _) = connect(vec![&matches, subcmd_matches, add_matches]).await?;
                    save_movie(&client, add_matches, None).await?;
                }
                Some(("update", update_matches)) => {
                    let (client, _) =
                        connect(vec![&matches, subcmd_matches, update_matches]).await?;
                    let id = update_matches.get_one::<String>("id").cloned();
                    save_movie(&client, update_matches, id).await?;
                }
                Some(("delete", delete_matches)) => {
                    let (client, _) =
                        connect(vec![&matches, subcmd_matches, delete_matches]).await?;
                    delete_movie(&client, delete_matches).await?;
                }
                _ => {
                    subcommand_movies().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
            Config::validate()?;
        }
    }

    return Ok(true);
}
