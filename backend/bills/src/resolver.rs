//! # Favourites Resolver
//!
//! Turns a set of favourite keys into a page of full records.
//!
//! 1. Malformed keys are dropped.
//! 2. No valid keys means no requests at all.
//! 3. One lookup per key, run concurrently and capped at `max_in_flight`.
//! 4. A failed or empty lookup is a soft miss: logged, skipped, never fatal.
//! 5. Hits are reassembled in input order, then sliced locally.
use std::{collections::HashSet, sync::Arc};

use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, warn};

use crate::{
    models::{BillKey, BillRecord},
    pagination::{Page, PageRequest, paginate},
    source::BillSource,
};

pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

#[derive(Clone)]
pub struct FavouritesResolver {
    source: Arc<dyn BillSource>,
    max_in_flight: usize,
}

impl FavouritesResolver {
    pub fn new(source: Arc<dyn BillSource>) -> Self {
        Self {
            source,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub async fn resolve<'a, I>(&self, keys: I, request: PageRequest) -> Page<BillRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keys = valid_keys(keys);

        if keys.is_empty() {
            debug!("No favourite bills to resolve");
            return Page::empty(request);
        }

        let resolved = self.fetch_all(keys).await;

        paginate(resolved, request)
    }

    async fn fetch_all(&self, keys: Vec<BillKey>) -> Vec<BillRecord> {
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for (index, key) in keys.iter().cloned().enumerate() {
            let source = self.source.clone();
            let permits = permits.clone();

            tasks.spawn(async move {
                let record = match permits.acquire_owned().await {
                    Ok(_permit) => lookup(source.as_ref(), &key).await,
                    Err(_) => None,
                };
                (index, record)
            });
        }

        let mut slots: Vec<Option<BillRecord>> = vec![None; keys.len()];

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, record)) => slots[index] = record,
                Err(e) => warn!("Favourite lookup task failed: {e}"),
            }
        }

        let resolved: Vec<BillRecord> = slots.into_iter().flatten().collect();
        debug!("Resolved {}/{} favourite bills", resolved.len(), keys.len());

        resolved
    }
}

async fn lookup(source: &dyn BillSource, key: &BillKey) -> Option<BillRecord> {
    match source.lookup(key).await {
        Ok(Some(record)) => Some(record),
        Ok(None) => {
            warn!("Favourite bill {key} not found upstream");
            None
        }
        Err(e) => {
            warn!("Failed to fetch favourite bill {key}: {e}");
            None
        }
    }
}

fn valid_keys<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<BillKey> {
    let mut seen = HashSet::new();

    raw.into_iter()
        .filter_map(|raw| {
            let key = BillKey::parse(raw);
            if key.is_none() {
                debug!("Dropping malformed favourite key {raw:?}");
            }
            key
        })
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
