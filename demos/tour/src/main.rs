use anyhow::Context;
use clap::{Parser, ValueEnum};

mod pages {
    pub mod fetch;
    pub mod history;
    pub mod interval;
    pub mod map;
    pub mod storage;
    pub mod window_size;
}

#[derive(Parser, Debug)]
#[command(name = "grapple-tour")]
#[command(about = "Replays the documented sample of each Grapple hook")]
#[command(version)]
struct Args {
    /// Hook to walk through (all of them if omitted)
    #[arg(value_enum)]
    page: Option<PageName>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum PageName {
    UseFetch,
    UseLocalStorage,
    UseInterval,
    UseStateWithHistory,
    UseMap,
    UseWindowSize,
}

impl PageName {
    fn summary(self) -> &'static str {
        match self {
            Self::UseFetch => "JSON request keyed by URL; stale responses are dropped",
            Self::UseLocalStorage => "state mirrored into a persistent key-value store",
            Self::UseInterval => "recurring callback that always calls the latest closure",
            Self::UseStateWithHistory => "state with an append-only history and a cursor",
            Self::UseMap => "immutable map with stable set/delete/clear",
            Self::UseWindowSize => "viewport dimensions, refreshed on resize",
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::UseFetch => pages::fetch::run(),
            Self::UseLocalStorage => pages::storage::run(),
            Self::UseInterval => pages::interval::run(),
            Self::UseStateWithHistory => pages::history::run(),
            Self::UseMap => pages::map::run(),
            Self::UseWindowSize => pages::window_size::run(),
        }
    }

    fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_else(|| format!("{self:?}"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let selected = match args.page {
        Some(page) => vec![page],
        None => PageName::value_variants().to_vec(),
    };

    for page in selected {
        let name = page.name();
        log::info!("== {name}: {}", page.summary());
        page.run().with_context(|| format!("{name} walkthrough failed"))?;
    }
    Ok(())
}
