//! Resolve binary - shows what the locale guard does with a path
//!
//! Usage:
//!   cargo run --bin resolve -- /xx/estimate?x=1
//!   cargo run --bin resolve -- / --lang en-US --lang fr
//!   cargo run --bin resolve -- /fr/trajets?page=2 --switch en
//!
//! Options:
//!   --lang <tag>      Browser language hint, most preferred first (repeatable)
//!   --cookie <tag>    Stored cookie hint
//!   --active <code>   Locale active before the navigation
//!   --switch <code>   Switch the resolved page to this locale afterwards
//!
//! Without `--lang`, the `LANGUAGE` and `LANG` environment variables are used
//! as the browser language list.

use anyhow::{bail, Context, Result};
use tracing::info;

use fare_locale_router::i18n::{LocaleHints, SupportedLocale, Translation};
use fare_locale_router::routing::{LocaleRouter, MemoryHistory, NavigationKind, SwitchOutcome};

struct Args {
    path: String,
    hints: LocaleHints,
    active: Option<SupportedLocale>,
    switch: Option<SupportedLocale>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut path = None;
    let mut hints = LocaleHints::default();
    let mut active = None;
    let mut switch = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => hints.navigator.push(args.next().context("--lang needs a value")?),
            "--cookie" => hints.cookie = Some(args.next().context("--cookie needs a value")?),
            "--active" => {
                let code = args.next().context("--active needs a value")?;
                active = Some(code.parse::<SupportedLocale>()?);
            }
            "--switch" => {
                let code = args.next().context("--switch needs a value")?;
                switch = Some(code.parse::<SupportedLocale>()?);
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ if path.is_none() => path = Some(arg),
            _ => bail!("Unexpected argument: {}", arg),
        }
    }

    if hints.navigator.is_empty() {
        hints.navigator = system_languages();
    }

    Ok(Args {
        path: path.context("Usage: resolve <path> [--lang <tag>]... [--cookie <tag>] [--active <code>] [--switch <code>]")?,
        hints,
        active,
        switch,
    })
}

fn system_languages() -> Vec<String> {
    let language = std::env::var("LANGUAGE").unwrap_or_default();
    let lang = std::env::var("LANG").unwrap_or_default();

    language
        .split(':')
        .chain(std::iter::once(lang.as_str()))
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "C" && *tag != "POSIX")
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fare_locale_router=warn".parse()?),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let store = match args.active {
        Some(locale) => Translation::with_locale(locale),
        None => Translation::new(),
    };

    let mut router = LocaleRouter::new(MemoryHistory::new(args.path.as_str()), store, args.hints);
    let state = router.mount().clone();
    info!("Mounted {} -> {:?}", args.path, state);

    if let Some(target) = args.switch {
        if router.switch_locale(target) == SwitchOutcome::Unchanged {
            println!("switch to {}: already active", target);
        }
    }

    for (kind, path) in router.navigator().navigations() {
        let label = match kind {
            NavigationKind::Replace => "replace",
            NavigationKind::Push => "push",
            NavigationKind::Pop => "pop",
        };
        println!("{:<8} {}", label, path);
    }

    match router.render(|path, locale| format!("{} [{}, {}]", path, locale, locale.native_name())) {
        Some(page) => println!("render   {}", page),
        None => println!("blank    (unresolved: {:?})", router.state()),
    }

    Ok(())
}
