// ABOUTME: Admin-scoped service management: list and register downstream services
// ABOUTME: Registration returns the service key that services later present for token checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gatekeeper_core::constants::paths;
use gatekeeper_core::models::wire::{
    decode_json, RegisterServiceRequest, RegisterServiceResponse, ServiceListResponse,
};
use gatekeeper_core::models::{NewService, RegisteredService, ServiceEntry};
use gatekeeper_core::OperationResult;
use reqwest::Method;
use tracing::info;

use super::encode_body;
use crate::admin_client::{AdminOperation, ResilientAdminClient};

const LIST_SERVICES: &str = "list_services";
const REGISTER_SERVICE: &str = "register_service";

fn decode_service_list(operation: &'static str, body: &str) -> OperationResult<Vec<ServiceEntry>> {
    decode_json::<ServiceListResponse>(operation, body)?.into_entries(operation)
}

fn decode_registered_service(
    operation: &'static str,
    body: &str,
) -> OperationResult<RegisteredService> {
    decode_json::<RegisterServiceResponse>(operation, body)?.into_registered(operation)
}

impl ResilientAdminClient {
    /// List registered services with their keys
    ///
    /// # Errors
    ///
    /// Returns an error if the admin call fails; see
    /// [`ResilientAdminClient::execute`]
    pub async fn list_services(&self) -> OperationResult<Vec<ServiceEntry>> {
        let url = self.client().endpoint().url(paths::ADMIN_SERVICE);
        let services = self
            .execute(AdminOperation::new(
                LIST_SERVICES,
                Method::GET,
                url,
                decode_service_list,
            ))
            .await?;
        info!("Got service-list with {} services", services.len());
        Ok(services)
    }

    /// Register a downstream service
    ///
    /// # Errors
    ///
    /// Returns an error if the admin call fails or the response carries no
    /// service record
    pub async fn register_service(&self, service: &NewService) -> OperationResult<RegisteredService> {
        let body = encode_body(REGISTER_SERVICE, &RegisterServiceRequest::from(service))?;
        let url = self.client().endpoint().url(paths::ADMIN_SERVICE);
        let operation = AdminOperation::new(
            REGISTER_SERVICE,
            Method::POST,
            url,
            decode_registered_service,
        )
        .with_body(body);

        let registered = self.execute(operation).await?;
        info!(
            short_name = %service.short_name,
            service_uri = %registered.service_uri,
            "Service registered"
        );
        Ok(registered)
    }
}
