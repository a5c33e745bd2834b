// ABOUTME: Output formatting helpers for gatekeeper-cli
// ABOUTME: Tables for user and service lists plus registration summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gatekeeper_driver::models::{NewService, NewUser, RegisteredService, ServiceEntry, UserEntry, UserId};

/// Print users as an id/username table
pub fn display_users(users: &[UserEntry]) {
    println!("\nUsers ({})", users.len());
    println!("{}", "=".repeat(50));
    println!("{:<10} USERNAME", "ID");
    for user in users {
        let id = user
            .user_id
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        println!("{id:<10} {}", user.username);
    }
}

/// Print services as a name/key table
pub fn display_services(services: &[ServiceEntry]) {
    println!("\nServices ({})", services.len());
    println!("{}", "=".repeat(80));
    println!("{:<20} SERVICE KEY", "SHORT NAME");
    for service in services {
        println!("{:<20} {}", service.short_name, service.service_key);
    }
}

/// Print the outcome of a user registration
pub fn display_registered_user(user: &NewUser, user_id: UserId) {
    println!("\nUser Registered Successfully!");
    println!("{}", "=".repeat(50));
    println!("   Username: {}", user.username);
    println!("   User ID: {user_id}");
    println!("   Admin: {}", if user.is_admin { "Yes" } else { "No" });
    println!("   Access list: {}", user.access_list.trim());
}

/// Print the outcome of a service registration
pub fn display_registered_service(service: &NewService, registered: &RegisteredService) {
    println!("\nService Registered Successfully!");
    println!("{}", "=".repeat(80));
    println!("   Short name: {}", service.short_name);
    println!("   Service URI: {}", registered.service_uri);
    println!("\nSERVICE KEY (hand this to the service):");
    println!("{}", registered.service_key);
}
