pub mod areas;
pub mod check;
pub mod layout;

use std::path::PathBuf;

use clap::Args;
use mudmap_core::{AreaData, JsonStore, MapResult, RoomStore};
use tracing::debug;

/// Where room and exit records come from.
#[derive(Args)]
pub struct SourceArgs {
    /// JSON world dump with "rooms" and "exits" tables
    #[arg(short, long, env = "MUDMAP_DATA")]
    data: Option<PathBuf>,

    /// PostgreSQL connection string (requires the `postgres` feature)
    #[arg(long, env = "MUDMAP_DATABASE_URL")]
    database_url: Option<String>,
}

/// An opened data source.
pub enum Source {
    Json(JsonStore),
    #[cfg(feature = "postgres")]
    Postgres {
        store: mudmap_core::PgStore,
        runtime: tokio::runtime::Runtime,
    },
}

impl Source {
    /// Open the source selected on the command line. A dump file wins over
    /// a database URL, so `--data` still works with `MUDMAP_DATABASE_URL` set.
    pub fn open(args: &SourceArgs) -> Result<Self, String> {
        if let Some(path) = args.data.as_deref() {
            debug!(path = %path.display(), "opening world dump");
            return JsonStore::open(path)
                .map(Source::Json)
                .map_err(|e| format!("{}: {e}", path.display()));
        }
        match args.database_url.as_deref() {
            Some(url) => open_database(url),
            None => Err("no data source: pass --data <file> or --database-url <url>".into()),
        }
    }
}

#[cfg(feature = "postgres")]
fn open_database(url: &str) -> Result<Source, String> {
    debug!("connecting to database");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;
    let store = runtime
        .block_on(mudmap_core::PgStore::connect(url))
        .map_err(|e| e.to_string())?;
    Ok(Source::Postgres { store, runtime })
}

#[cfg(not(feature = "postgres"))]
fn open_database(_url: &str) -> Result<Source, String> {
    Err("this build has no database support; rebuild with --features postgres".into())
}

impl RoomStore for Source {
    fn areas(&self) -> MapResult<Vec<String>> {
        match self {
            Source::Json(store) => store.areas(),
            #[cfg(feature = "postgres")]
            Source::Postgres { store, runtime } => runtime.block_on(store.areas()),
        }
    }

    fn load_area(&self, area: &str) -> MapResult<AreaData> {
        match self {
            Source::Json(store) => store.load_area(area),
            #[cfg(feature = "postgres")]
            Source::Postgres { store, runtime } => runtime.block_on(store.load_area(area)),
        }
    }

    fn count_area(&self, area: &str) -> MapResult<(usize, usize)> {
        match self {
            Source::Json(store) => store.count_area(area),
            #[cfg(feature = "postgres")]
            Source::Postgres { store, runtime } => runtime.block_on(store.count_area(area)),
        }
    }
}
