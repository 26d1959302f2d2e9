//! Generates TypeScript models for a small domain.
//!
//! Run with: cargo run --example generate -- models.ts
//!
//! Set `RUST_LOG=debug` to follow the conversion.

#![allow(dead_code)]

use std::collections::HashMap;
use typescriptify::prelude::*;

#[derive(Clone, Copy, Describe, TsEnum)]
#[repr(u8)]
enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Clone, Copy, Describe, TsEnum)]
enum Role {
    #[ts(value = "admin")]
    Admin,
    #[ts(value = "member")]
    Member,
}

#[derive(Describe)]
struct Address {
    street: String,
    city: String,
    #[ts(omit_empty)]
    zip: String,
}

#[derive(Describe)]
struct Audit {
    created_by: String,
    #[ts(type = "Date", transform = "new Date(__VALUE__)")]
    created_at: String,
}

#[derive(Describe)]
struct User {
    id: u64,
    name: String,
    nickname: Option<String>,
    role: Role,
    addresses: Vec<Address>,
    work_days: Vec<Weekday>,
    contacts: HashMap<String, Address>,
    scores: Vec<Vec<f64>>,
    #[ts(flatten)]
    audit: Audit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "models.ts".to_string());

    let mut generator = Generator::new()
        .with_create_from_method(false)
        .with_backup_dir("backups");
    generator
        .add_import("// Models shared with the web client.")
        .add_enum([
            Weekday::Sunday,
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ])
        .add_enum([Role::Admin, Role::Member])
        .add::<User>();

    generator.convert_to_file(&path)?;
    println!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
