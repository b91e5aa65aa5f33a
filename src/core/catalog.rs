//! Startup-built lookup tables
//!
//! The [`Catalog`] is everything a request needs that comes from
//! configuration: which store backs a location, the parsed SQL templates per
//! store type, the unit table and the page size limits. It is built once,
//! never mutated, and shared behind an `Arc`.

use crate::config::{AdeConfig, DbClient, SecretString};
use crate::core::exchange::range_from_query;
use crate::core::pagination::{PageRequest, QueryParams};
use crate::core::query::QueryTemplate;
use crate::domain::codes::UnitTable;
use crate::domain::ids::{LocationKey, OperationId};
use crate::domain::{AdeError, Result};
use std::collections::HashMap;
use std::str::FromStr;

/// The store a location's rows are read from
#[derive(Debug, Clone)]
pub struct StoreTarget {
    pub location: LocationKey,
    pub db_type: String,
    pub db_client: DbClient,
    pub db_url: String,
    pub db_name: String,
    pub db_user: Option<String>,
    pub db_password: Option<SecretString>,
    /// Fallback `meta.source`
    pub source: String,
}

/// Parsed templates of one store type
#[derive(Debug, Clone)]
pub struct QuerySet {
    pub db_client: DbClient,
    templates: HashMap<OperationId, QueryTemplate>,
}

impl QuerySet {
    pub fn template(&self, operation: OperationId) -> Option<&QueryTemplate> {
        self.templates.get(&operation)
    }

    /// Operations this store type supports
    pub fn operations(&self) -> Vec<OperationId> {
        OperationId::ALL
            .into_iter()
            .filter(|op| self.templates.contains_key(op))
            .collect()
    }
}

/// SQL rendered for one request
#[derive(Debug, Clone)]
pub struct RenderedQuery {
    pub store: StoreTarget,
    pub page: PageRequest,
    pub sql: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    locations: HashMap<LocationKey, StoreTarget>,
    queries: HashMap<String, QuerySet>,
    units: UnitTable,
    default_page_size: u64,
    max_page_size: u64,
}

impl Catalog {
    /// Builds the catalog, parsing every template
    ///
    /// # Errors
    ///
    /// Returns `AdeError::TemplateMalformed` for a template without the
    /// expected structure and `AdeError::Configuration` for unknown operation
    /// or characteristic codes, blank location keys, or a location whose store
    /// type has no query set.
    pub fn from_config(config: &AdeConfig) -> Result<Self> {
        let mut queries = HashMap::new();
        for (db_type, set) in &config.queries {
            let mut templates = HashMap::new();
            for (name, sql) in &set.operations {
                let operation = OperationId::from_str(name).map_err(|_| {
                    AdeError::Configuration(format!(
                        "queries.{db_type}.operations: unknown operation '{name}'"
                    ))
                })?;
                let template = QueryTemplate::parse(sql).map_err(|e| match e {
                    AdeError::TemplateMalformed(msg) => {
                        AdeError::TemplateMalformed(format!("queries.{db_type}.{name}: {msg}"))
                    }
                    other => other,
                })?;
                templates.insert(operation, template);
            }
            queries.insert(
                db_type.clone(),
                QuerySet {
                    db_client: set.db_client,
                    templates,
                },
            );
        }

        let mut locations = HashMap::new();
        for (scheme, ids) in &config.locations {
            for (id, store) in ids {
                let key = LocationKey::parse(scheme, id).map_err(|e| {
                    AdeError::Configuration(format!("locations.{scheme}.{id}: {e}"))
                })?;
                let set = queries.get(&store.db_type).ok_or_else(|| {
                    AdeError::Configuration(format!(
                        "locations.{scheme}.{id}: unknown db_type '{}'",
                        store.db_type
                    ))
                })?;
                let target = StoreTarget {
                    location: key.clone(),
                    db_type: store.db_type.clone(),
                    db_client: set.db_client,
                    db_url: store.db_url.clone(),
                    db_name: store.db_name.clone(),
                    db_user: store.db_user.clone(),
                    db_password: store.db_password.clone(),
                    source: store.source.clone().unwrap_or_else(|| store.db_url.clone()),
                };
                locations.insert(key, target);
            }
        }

        Ok(Self {
            locations,
            queries,
            units: UnitTable::with_overrides(&config.units)?,
            default_page_size: config.api.default_page_size,
            max_page_size: config.api.max_page_size,
        })
    }

    /// # Errors
    ///
    /// Returns `AdeError::LocationNotFound` for a pair missing from the directory.
    pub fn store(&self, location: &LocationKey) -> Result<&StoreTarget> {
        self.locations
            .get(location)
            .ok_or_else(|| AdeError::LocationNotFound {
                scheme: location.scheme.to_string(),
                id: location.id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `AdeError::UnsupportedOperation` if the store type has no
    /// template for the operation.
    pub fn template(&self, store: &StoreTarget, operation: OperationId) -> Result<&QueryTemplate> {
        self.queries
            .get(&store.db_type)
            .and_then(|set| set.template(operation))
            .ok_or_else(|| {
                AdeError::UnsupportedOperation(format!(
                    "{operation} is not configured for db_type '{}'",
                    store.db_type
                ))
            })
    }

    pub fn query_set(&self, db_type: &str) -> Option<&QuerySet> {
        self.queries.get(db_type)
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Page request with this deployment's defaults and limits
    pub fn page_request(&self, query: &QueryParams) -> Result<PageRequest> {
        PageRequest::from_query(query, self.default_page_size, self.max_page_size)
    }

    /// Resolves the store and renders the operation's SQL for a request
    ///
    /// # Errors
    ///
    /// Returns `LocationNotFound`, `UnsupportedOperation`, `InvalidDateFormat`
    /// or `Validation` as the request dictates.
    pub fn render(
        &self,
        operation: OperationId,
        location: &LocationKey,
        query: &QueryParams,
    ) -> Result<RenderedQuery> {
        let store = self.store(location)?;
        let template = self.template(store, operation)?;
        let range = range_from_query(query)?;
        let page = self.page_request(query)?;
        let sql = template.render(&range, &page)?;

        Ok(RenderedQuery {
            store: store.clone(),
            page,
            sql,
        })
    }

    /// Stores sorted by location, for reporting
    pub fn stores(&self) -> Vec<&StoreTarget> {
        let mut stores: Vec<&StoreTarget> = self.locations.values().collect();
        stores.sort_by_key(|s| s.location.to_string());
        stores
    }
}
