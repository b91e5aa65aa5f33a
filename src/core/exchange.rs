//! Exchange service - answers ADE collection requests for one location
//!
//! Per request: resolve the location's store, render the operation's template
//! for the requested range and page, fetch rows through the
//! [`RecordSource`], assemble one resource per row and attach the pagination
//! view.

use crate::adapters::source::RecordSource;
use crate::core::assemble::{self, AssemblyContext};
use crate::core::catalog::Catalog;
use crate::core::pagination::{build_view, PaginationView, QueryParams};
use crate::core::query::RangeFilter;
use crate::domain::ids::{LocationKey, OperationId};
use crate::domain::record::FlatRecord;
use crate::domain::resource::{Animal, MilkingVisit};
use crate::domain::Result;
use serde::Serialize;
use std::sync::Arc;

pub const META_MODIFIED_FROM_PARAM: &str = "meta-modified-from";
pub const META_MODIFIED_TO_PARAM: &str = "meta-modified-to";

/// Reads the modification range parameters
pub fn range_from_query(query: &QueryParams) -> Result<RangeFilter> {
    RangeFilter::from_bounds(
        query.get(META_MODIFIED_FROM_PARAM),
        query.get(META_MODIFIED_TO_PARAM),
    )
}

/// One routed collection request
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub location: LocationKey,
    /// Request path, used as the base of pagination links
    pub path: String,
    pub query: QueryParams,
}

impl ExchangeRequest {
    /// Builds a request from router path parameters
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Validation` if the scheme or id is blank.
    pub fn new(
        location_scheme: &str,
        location_id: &str,
        path: impl Into<String>,
        query: QueryParams,
    ) -> Result<Self> {
        Ok(Self {
            location: LocationKey::parse(location_scheme, location_id)?,
            path: path.into(),
            query,
        })
    }
}

/// An ADE collection response
#[derive(Debug, Clone, Serialize)]
pub struct Collection<T> {
    pub view: PaginationView,
    pub member: Vec<T>,
}

trait ExchangeResource: Sized {
    const OPERATION: OperationId;

    fn assemble(record: &FlatRecord, ctx: &AssemblyContext<'_>) -> Self;

    fn missing_required_fields(&self) -> Vec<String>;
}

impl ExchangeResource for MilkingVisit {
    const OPERATION: OperationId = OperationId::GetMilkingVisits;

    fn assemble(record: &FlatRecord, ctx: &AssemblyContext<'_>) -> Self {
        assemble::milking_visit(record, ctx)
    }

    fn missing_required_fields(&self) -> Vec<String> {
        MilkingVisit::missing_required_fields(self)
    }
}

impl ExchangeResource for Animal {
    const OPERATION: OperationId = OperationId::GetAnimals;

    fn assemble(record: &FlatRecord, ctx: &AssemblyContext<'_>) -> Self {
        assemble::animal(record, ctx)
    }

    fn missing_required_fields(&self) -> Vec<String> {
        Animal::missing_required_fields(self)
    }
}

/// Serves ADE collections from the configured stores
pub struct ExchangeService {
    catalog: Arc<Catalog>,
    source: Arc<dyn RecordSource>,
}

impl ExchangeService {
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn RecordSource>) -> Self {
        Self { catalog, source }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `get-milking-visits`
    pub async fn milking_visits(&self, request: &ExchangeRequest) -> Result<Collection<MilkingVisit>> {
        self.collect(request).await
    }

    /// `get-animals`
    pub async fn animals(&self, request: &ExchangeRequest) -> Result<Collection<Animal>> {
        self.collect(request).await
    }

    async fn collect<T: ExchangeResource>(&self, request: &ExchangeRequest) -> Result<Collection<T>> {
        let operation = T::OPERATION;
        let rendered = self
            .catalog
            .render(operation, &request.location, &request.query)?;

        tracing::debug!(
            operation = %operation,
            location = %request.location,
            db_type = %rendered.store.db_type,
            current_page = rendered.page.current_page,
            page_size = rendered.page.page_size,
            "Fetching records"
        );

        let records = self.source.fetch(&rendered.store, &rendered.sql).await?;

        let received = records.len();
        let total_items = match records.first() {
            None => 0,
            Some(first) => first.total_items().unwrap_or_else(|| {
                tracing::warn!(
                    operation = %operation,
                    location = %request.location,
                    "Rows carry no totalitems column; counting received rows"
                );
                received as u64
            }),
        };
        crate::log_records_received!(operation, request.location, received, total_items);

        let ctx = AssemblyContext {
            location: &request.location,
            source: &rendered.store.source,
            units: self.catalog.units(),
        };
        let member: Vec<T> = records
            .iter()
            .map(|record| {
                let resource = T::assemble(record, &ctx);
                for field in resource.missing_required_fields() {
                    crate::log_missing_required_field!(operation, request.location, field);
                }
                resource
            })
            .collect();

        Ok(Collection {
            view: build_view(&request.path, &request.query, &rendered.page, total_items),
            member,
        })
    }
}
