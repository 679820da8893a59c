//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::user_handler;
use crate::domain::{
    AccountResponse, AccountView, ChangePassword, ConsumerProfile, ConsumerType, CreateAccount,
    PasswordUpdated, Profile, ProviderProfile, Role, UpdateAccount,
};

/// OpenAPI documentation for the account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service",
        version = "0.1.0",
        description = "Consumer, organisation and provider accounts with role-specific profiles"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::create_account,
        user_handler::list_accounts,
        user_handler::list_accounts_paginated,
        user_handler::get_account,
        user_handler::update_account,
        user_handler::delete_account,
        user_handler::change_password,
    ),
    components(
        schemas(
            Role,
            ConsumerType,
            ConsumerProfile,
            ProviderProfile,
            Profile,
            AccountResponse,
            AccountView,
            CreateAccount,
            UpdateAccount,
            ChangePassword,
            PasswordUpdated,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Account and credential operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token issued by the `token` command"))
                        .build(),
                ),
            );
        }
    }
}
