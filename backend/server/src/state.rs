use std::sync::Arc;

use bills::{BillSource, remote::OireachtasSource, resolver::FavouritesResolver};

use super::{config::Config, error::AppError};

pub struct State {
    pub config: Config,
    pub source: Arc<dyn BillSource>,
    pub resolver: FavouritesResolver,
    pub relay: OireachtasSource,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let upstream = |config: &Config| {
            OireachtasSource::new(&config.upstream_url, config.upstream_timeout)
                .map_err(AppError::upstream("Failed to build upstream client"))
        };

        let source: Arc<dyn BillSource> = Arc::new(upstream(&config)?);
        let relay = upstream(&config)?;

        Ok(Self::from_parts(config, source, relay))
    }

    /// Listing and lookups go through `source`; raw passthrough always goes to `relay`.
    pub fn from_parts(config: Config, source: Arc<dyn BillSource>, relay: OireachtasSource) -> Arc<Self> {
        let resolver = FavouritesResolver::new(source.clone()).with_max_in_flight(config.lookup_concurrency);

        Arc::new(Self {
            config,
            source,
            resolver,
            relay,
        })
    }
}
