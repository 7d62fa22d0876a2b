// Konnect
// Copyright 2024 The Konnect Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Operations on services.

use crate::db;
use crate::driver::{service_not_found, Driver};
use crate::model::{PageRequest, Paginated, SearchTerms, Service, ServiceFields, ServiceId};
use konnect_core::driver::DriverResult;

impl Driver {
    /// Gets one `page` of all services, newest first.
    pub(crate) async fn list_services(self, page: PageRequest) -> DriverResult<Paginated<Service>> {
        let mut tx = self.db.begin().await?;
        let total = db::count_services(tx.ex()).await?;
        let services = db::list_services(tx.ex(), &page).await?;
        tx.commit().await?;
        Ok(Paginated::new(services, &page, total))
    }

    /// Gets one `page` of the services that match any of the search `terms`.
    pub(crate) async fn search_services(
        self,
        terms: SearchTerms,
        page: PageRequest,
    ) -> DriverResult<Paginated<Service>> {
        if terms.is_empty() {
            return Ok(Paginated::new(vec![], &page, 0));
        }

        let mut tx = self.db.begin().await?;
        let total = db::count_search_services(tx.ex(), &terms).await?;
        let services = db::search_services(tx.ex(), &terms, &page).await?;
        tx.commit().await?;
        Ok(Paginated::new(services, &page, total))
    }

    /// Creates a new service with the given `fields`.
    pub(crate) async fn create_service(self, fields: ServiceFields) -> DriverResult<Service> {
        let now = self.clock.now_utc();
        let service = Service::new(ServiceId::generate(), fields, now);
        db::create_service(&mut self.db.ex().await?, &service).await?;
        Ok(service)
    }

    /// Gets the service identified by `id`.
    pub(crate) async fn get_service(self, id: &ServiceId) -> DriverResult<Service> {
        let mut ex = self.db.ex().await?;
        let service = db::get_service(&mut ex, id).await.map_err(service_not_found)?;
        Ok(service)
    }

    /// Replaces the properties of the service identified by `id` with `fields` and returns the
    /// updated service.
    pub(crate) async fn update_service(
        self,
        id: &ServiceId,
        fields: ServiceFields,
    ) -> DriverResult<Service> {
        let mut tx = self.db.begin().await?;
        let now = self.clock.now_utc();
        db::update_service(tx.ex(), id, &fields, now).await.map_err(service_not_found)?;
        let service = db::get_service(tx.ex(), id).await.map_err(service_not_found)?;
        tx.commit().await?;
        Ok(service)
    }

    /// Deletes the service identified by `id` and all of its versions.
    pub(crate) async fn delete_service(self, id: &ServiceId) -> DriverResult<()> {
        db::delete_service(&mut self.db.ex().await?, id).await.map_err(service_not_found)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::{VersionFields, VersionStatus};
    use konnect_core::db::DbError;
    use konnect_core::driver::DriverError;

    /// Collects the names of the services in `page` for easier comparisons.
    fn names(page: &Paginated<Service>) -> Vec<&str> {
        page.data.iter().map(|s| s.name().as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_services_empty() {
        let context = TestContext::setup().await;

        let page = context.driver().list_services(PageRequest::new(1, 10)).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(0, page.pagination.total);
        assert_eq!(0, page.pagination.total_pages);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_list_services_paginated() {
        let context = TestContext::setup().await;

        for i in 0..25 {
            context.create_service(&format!("Service {:02}", i)).await;
        }

        let page = context.driver().list_services(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(10, page.data.len());
        assert_eq!("Service 24", page.data[0].name());
        assert_eq!(25, page.pagination.total);
        assert_eq!(3, page.pagination.total_pages);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_prev);

        let page = context.driver().list_services(PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(5, page.data.len());
        assert_eq!("Service 00", page.data[4].name());
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_search_services_ranked() {
        let context = TestContext::setup().await;

        let fields = ServiceFields::new(
            "Billing".to_owned(),
            "billing".to_owned(),
            Some("Charges for payments".to_owned()),
        )
        .unwrap();
        context.driver().create_service(fields).await.unwrap();
        context.create_service("Payments").await;
        context.create_service("Notifications").await;

        let page = context
            .driver()
            .search_services(
                SearchTerms::parse(Some("payments")).unwrap(),
                PageRequest::new(1, 10),
            )
            .await
            .unwrap();
        assert_eq!(vec!["Payments", "Billing"], names(&page));
        assert_eq!(2, page.pagination.total);
    }

    #[tokio::test]
    async fn test_search_services_same_score_newest_first() {
        let context = TestContext::setup().await;

        context.create_service("Payments EU").await;
        context.create_service("Payments US").await;

        let page = context
            .driver()
            .search_services(
                SearchTerms::parse(Some("payments")).unwrap(),
                PageRequest::new(1, 10),
            )
            .await
            .unwrap();
        assert_eq!(vec!["Payments US", "Payments EU"], names(&page));
    }

    #[tokio::test]
    async fn test_search_services_no_match() {
        let context = TestContext::setup().await;

        context.create_service("Payments").await;

        let page = context
            .driver()
            .search_services(SearchTerms::parse(Some("zzz")).unwrap(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(0, page.pagination.total);
    }

    #[tokio::test]
    async fn test_search_services_no_usable_terms() {
        let context = TestContext::setup().await;

        context.create_service("Payments").await;

        let page = context
            .driver()
            .search_services(SearchTerms::parse(Some("%%%")).unwrap(), PageRequest::new(2, 5))
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(0, page.pagination.total);
        assert_eq!(2, page.pagination.page);
        assert_eq!(5, page.pagination.page_size);
    }

    #[tokio::test]
    async fn test_create_service_ok() {
        let context = TestContext::setup().await;

        let fields = ServiceFields::new(
            "Payments".to_owned(),
            "payments".to_owned(),
            Some("Money".to_owned()),
        )
        .unwrap();
        let service = context.driver().create_service(fields).await.unwrap();
        assert_eq!("Payments", service.name());
        assert_eq!("payments", service.slug());
        assert_eq!(&Some("Money".to_owned()), service.description());
        assert_eq!(&0, service.versions_count());
        assert_eq!(service.created_at(), service.updated_at());

        assert_eq!(service, context.get_service(service.id()).await);
    }

    #[tokio::test]
    async fn test_create_service_duplicate() {
        let context = TestContext::setup().await;

        context.create_service("Payments").await;

        let fields =
            ServiceFields::new("Payments".to_owned(), "payments".to_owned(), None).unwrap();
        match context.driver().create_service(fields).await.unwrap_err() {
            DriverError::AlreadyExists(msg) => assert!(msg.contains("UNIQUE")),
            e => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_get_service_ok() {
        let context = TestContext::setup().await;

        let service = context.create_service("Payments").await;
        assert_eq!(service, context.driver().get_service(service.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_service_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Service not found".to_owned()),
            context.driver().get_service(&ServiceId::new("missing".to_owned())).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_service_ok() {
        let context = TestContext::setup().await;

        let service = context.create_service("Payments").await;
        context
            .driver()
            .create_version(
                service.id(),
                VersionFields::new("1.0.0".to_owned(), VersionStatus::Draft, None).unwrap(),
            )
            .await
            .unwrap();

        let fields = ServiceFields::new(
            "Payouts".to_owned(),
            "payouts".to_owned(),
            Some("New".to_owned()),
        )
        .unwrap();
        let updated = context.driver().update_service(service.id(), fields).await.unwrap();
        assert_eq!(service.id(), updated.id());
        assert_eq!("Payouts", updated.name());
        assert_eq!("payouts", updated.slug());
        assert_eq!(&Some("New".to_owned()), updated.description());
        assert_eq!(service.created_at(), updated.created_at());
        assert!(updated.updated_at() > service.updated_at());
        assert_eq!(&1, updated.versions_count());

        assert_eq!(updated, context.get_service(service.id()).await);
    }

    #[tokio::test]
    async fn test_update_service_not_found() {
        let context = TestContext::setup().await;

        let fields = ServiceFields::new("Payouts".to_owned(), "payouts".to_owned(), None).unwrap();
        assert_eq!(
            DriverError::NotFound("Service not found".to_owned()),
            context
                .driver()
                .update_service(&ServiceId::new("missing".to_owned()), fields)
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_service_ok() {
        let context = TestContext::setup().await;

        let service = context.create_service("Payments").await;
        context.driver().delete_service(service.id()).await.unwrap();

        assert_eq!(
            DbError::NotFound,
            db::get_service(&mut context.ex().await, service.id()).await.unwrap_err()
        );
        assert_eq!(
            DriverError::NotFound("Service not found".to_owned()),
            context.driver().delete_service(service.id()).await.unwrap_err()
        );
    }
}
