//!
//! techvisit console binary
//! ------------------------
//! Interactive driver for the TechVisit client core: signs in against a
//! backend, persists credentials under a root directory, and replays the
//! route-guard decisions the view router would apply on each navigation.
//! Validators can be exercised standalone with the `check` command.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use techvisit::backend::AuthClient;
use techvisit::identity::{FileCredentialStore, SessionState};
use techvisit::routing::{self, GuardOutcome, Route};
use techvisit::validators;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--root <dir>] [--connect <url>]\n\nFlags:\n  --root <dir>             Credential directory (default: .techvisit)\n  --connect <url>          Backend base URL; without it, login/passwd are unavailable\n                           but navigation and validators still work against the\n                           persisted session\n  -h, --help               Show this help\n\nInteractive commands:\n  login <user>                    sign in (password read from the next line)\n  logout                          sign out and clear stored credentials\n  goto <path>                     evaluate the route guards for a path and follow redirects\n  status                          show session, store root and backend info\n  whoami                          show the signed-in profile\n  check cpf <value>               validate and mask a CPF\n  check phone <value>             mask a phone number\n  check cep <value>               mask a postal code\n  check password <value>          report whether a password is strong\n  passwd                          change the signed-in user's password\n  help                            show this help\n  quit | exit                     leave the console\n\nExamples:\n  {program} --connect http://127.0.0.1:3000\n  {program} --root /tmp/court --connect http://127.0.0.1:3000\n    > login rainer\n    > goto /admin/organization\n    > check cpf 935.411.347-80"
    );
}

fn prompt_line(stdin: &io::Stdin, label: &str) -> Result<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    stdin.read_line(&mut buf).context("failed to read from stdin")?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

/// Follow guard decisions until a screen renders, printing each hop the way
/// the view router would perform it.
fn navigate(state: &mut SessionState, path: &str) {
    let mut current = path.to_string();
    for _ in 0..4 {
        let public = Route::parse(&current).map(|r| r.is_public()).unwrap_or(false);
        let outcome = if public {
            routing::public(state, &current)
        } else {
            routing::protected(state, &current)
        };
        match outcome {
            GuardOutcome::Render => {
                println!("render {current}");
                return;
            }
            GuardOutcome::Redirect(r) => {
                println!("redirect {current} -> {r}");
                current = r.path().to_string();
            }
        }
    }
    eprintln!("redirect loop starting at {path}");
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut root: Option<String> = None;
    let mut connect_url: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--root" => {
                if i + 1 >= args.len() { eprintln!("--root requires a value"); print_usage(&program); std::process::exit(2); }
                root = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--connect" => {
                if i + 1 >= args.len() { eprintln!("--connect requires a URL"); print_usage(&program); std::process::exit(2); }
                connect_url = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let root_path = root.unwrap_or_else(|| ".techvisit".to_string());
    if let Err(e) = fs::create_dir_all(&root_path) {
        eprintln!("Failed to ensure credential directory '{}': {}", root_path, e);
    }

    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "techvisit",
        "techvisit console starting: RUST_LOG='{}', root='{}', backend='{}'",
        rust_log,
        root_path,
        connect_url.as_deref().unwrap_or("<offline>")
    );

    let store = Arc::new(FileCredentialStore::new(&root_path));
    let mut state = SessionState::new(store);

    let mut client: Option<AuthClient> = match connect_url.as_deref() {
        Some(url) => match AuthClient::new(url) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("--connect: {}", e);
                std::process::exit(2);
            }
        },
        None => None,
    };
    if let (Some(c), Some(t)) = (client.as_mut(), state.session().token()) {
        let t = t.to_string();
        c.set_token(Some(t));
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    println!("techvisit console. Type 'help' for commands.");
    if let Some(u) = state.session().user() {
        println!("session restored: {} ({})", u.login, u.role);
    }
    let suggested = whoami::username();

    loop {
        input.clear();
        print!("> ");
        let _ = stdout.flush();
        if stdin.read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }
        let up = line.to_uppercase();
        if up == "EXIT" || up == "QUIT" { break; }
        if up == "HELP" {
            print_usage("techvisit_console");
            continue;
        }
        if up == "LOGIN" || up.starts_with("LOGIN ") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let user = if parts.len() >= 2 { parts[1].to_string() } else { suggested.clone() };
            let Some(c) = client.as_ref() else {
                eprintln!("not connected; restart with --connect <url>");
                continue;
            };
            let pass = match prompt_line(&stdin, &format!("password for {}: ", user)) {
                Ok(p) => p,
                Err(e) => { eprintln!("error: {}", e); continue; }
            };
            match rt.block_on(async { c.login(&user, &pass).await }) {
                Ok(reply) => {
                    let login = reply.user.login.clone();
                    let role = reply.user.role;
                    if let Some(c) = client.as_mut() {
                        c.set_token(Some(reply.token.clone()));
                    }
                    let dest = state.login(reply.user, reply.token);
                    println!("signed in as {} ({}) -> {}", login, role, dest);
                }
                Err(e) => eprintln!("{}", e.user_message()),
            }
            continue;
        }
        if up == "LOGOUT" {
            if !state.is_authenticated() {
                println!("not signed in");
                continue;
            }
            let dest = state.logout();
            if let Some(c) = client.as_mut() { c.set_token(None); }
            println!("signed out -> {}", dest);
            continue;
        }
        if up == "GOTO" || up.starts_with("GOTO ") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 { eprintln!("usage: goto <path>"); continue; }
            navigate(&mut state, parts[1]);
            continue;
        }
        if up == "STATUS" {
            match state.session().user() {
                Some(u) => println!("signed in: {} ({}), landing {}", u.login, u.role, state.default_landing()),
                None => println!("anonymous, landing {}", Route::Login),
            }
            println!("store root: {}", root_path);
            match &client {
                Some(c) => println!("backend: {}", c.base()),
                None => println!("backend: <offline>"),
            }
            continue;
        }
        if up == "WHOAMI" {
            match state.session().user() {
                Some(u) => {
                    println!("id: {}", u.id);
                    println!("login: {}", u.login);
                    println!("role: {}", u.role);
                    println!("organization: {} (#{})", u.organization_name, u.organization_id);
                    println!("active: {}", u.is_active);
                }
                None => println!("anonymous"),
            }
            continue;
        }
        if up == "CHECK" || up.starts_with("CHECK ") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                eprintln!("usage: check cpf|phone|cep|password <value>");
                continue;
            }
            let value = parts[2..].join(" ");
            match parts[1].to_lowercase().as_str() {
                "cpf" => {
                    let verdict = if validators::is_valid_cpf(&value) { "valid" } else { "invalid" };
                    println!("{} ({})", validators::format_cpf(&value), verdict);
                }
                "phone" => println!("{}", validators::format_phone(&value)),
                "cep" => println!("{}", validators::format_cep(&value)),
                "password" => {
                    let verdict = if validators::is_strong_password(&value) { "strong" } else { "weak" };
                    println!("{}", verdict);
                }
                other => eprintln!("unknown check kind: {}", other),
            }
            continue;
        }
        if up == "PASSWD" {
            let Some(u) = state.session().user().cloned() else {
                eprintln!("not signed in");
                continue;
            };
            let Some(c) = client.as_ref() else {
                eprintln!("not connected; restart with --connect <url>");
                continue;
            };
            let pass = match prompt_line(&stdin, "new password: ") {
                Ok(p) => p,
                Err(e) => { eprintln!("error: {}", e); continue; }
            };
            if !validators::is_strong_password(&pass) {
                eprintln!("A senha deve ter pelo menos 8 caracteres, incluindo maiúsculas, minúsculas, números e símbolos.");
                continue;
            }
            match rt.block_on(async { c.update_password(&u.login, &pass).await }) {
                Ok(()) => println!("Senha alterada com sucesso!"),
                Err(e) if e.is_credential_rejection() => {
                    eprintln!("{}", e.user_message());
                    let dest = state.logout();
                    if let Some(c) = client.as_mut() { c.set_token(None); }
                    println!("signed out -> {}", dest);
                }
                Err(_) => eprintln!("Erro ao alterar a senha"),
            }
            continue;
        }
        eprintln!("unknown command: {} (try 'help')", line);
    }
    Ok(())
}
