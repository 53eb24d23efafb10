//! Database seeder for Lote Para Todos development and testing.
//!
//! Seeds a demo project with lots, a client, a financed contract with
//! services, a loan and payments, plus materials and an open stock ticket.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use ltp_db::entities::{
    clients, contracted_services, contracts, loan_installments, loans, lots, materials, payments,
    projects, services, stock_lines, stock_tickets,
};

/// Demo project ID (consistent for all seeds)
const DEMO_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo client ID (consistent for all seeds)
const DEMO_CLIENT_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo contract ID (consistent for all seeds)
const DEMO_CONTRACT_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Demo stock ticket ID (consistent for all seeds)
const DEMO_TICKET_ID: &str = "00000000-0000-0000-0000-000000000004";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = ltp_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding project and lots...");
    seed_project(&db).await;

    println!("Seeding client...");
    seed_client(&db).await;

    println!("Seeding service catalog...");
    seed_services(&db).await;

    println!("Seeding contract with financing...");
    seed_contract(&db).await;

    println!("Seeding materials and stock ticket...");
    seed_stock(&db).await;

    println!("Seeding complete!");
}

fn demo_project_id() -> Uuid {
    Uuid::parse_str(DEMO_PROJECT_ID).unwrap()
}

fn demo_client_id() -> Uuid {
    Uuid::parse_str(DEMO_CLIENT_ID).unwrap()
}

fn demo_contract_id() -> Uuid {
    Uuid::parse_str(DEMO_CONTRACT_ID).unwrap()
}

fn demo_ticket_id() -> Uuid {
    Uuid::parse_str(DEMO_TICKET_ID).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seeds the demo project with two lots.
async fn seed_project(db: &DatabaseConnection) {
    if projects::Entity::find_by_id(demo_project_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo project already exists, skipping");
        return;
    }

    let now = Utc::now();
    projects::ActiveModel {
        id: Set(demo_project_id()),
        name: Set("Barrio Los Lapachos".to_string()),
        location: Set(Some("Luque".to_string())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed project");

    for (code, block, price) in [("A-01", "A", 50_000i64), ("A-02", "A", 55_000)] {
        lots::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(demo_project_id()),
            code: Set(code.to_string()),
            block: Set(Some(block.to_string())),
            area_m2: Set(Some(Decimal::new(360, 0))),
            price: Set(Decimal::new(price, 0)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed lot");
    }
}

/// Seeds the demo client.
async fn seed_client(db: &DatabaseConnection) {
    if clients::Entity::find_by_id(demo_client_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo client already exists, skipping");
        return;
    }

    let now = Utc::now();
    clients::ActiveModel {
        id: Set(demo_client_id()),
        full_name: Set("María González".to_string()),
        document_number: Set(Some("3.456.789".to_string())),
        phone: Set(Some("+595 981 123456".to_string())),
        email: Set(Some("maria.gonzalez@example.com".to_string())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed client");
}

/// Seeds the service catalog.
async fn seed_services(db: &DatabaseConnection) {
    let existing = services::Entity::find().all(db).await.unwrap_or_default();
    if !existing.is_empty() {
        println!("  Service catalog already seeded, skipping");
        return;
    }

    let now = Utc::now();
    for (name, base_price) in [("Mensura", 800i64), ("Conexión de agua", 1_200)] {
        services::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            base_price: Set(Decimal::new(base_price, 0)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed service");
    }
}

/// Seeds a financed contract with a service, a loan, and two payments.
async fn seed_contract(db: &DatabaseConnection) {
    if contracts::Entity::find_by_id(demo_contract_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo contract already exists, skipping");
        return;
    }

    let now = Utc::now();
    let lot = lots::Entity::find()
        .one(db)
        .await
        .expect("Failed to query lots")
        .expect("Seed lots before the contract");
    let service = services::Entity::find()
        .one(db)
        .await
        .expect("Failed to query services")
        .expect("Seed services before the contract");

    contracts::ActiveModel {
        id: Set(demo_contract_id()),
        client_id: Set(demo_client_id()),
        lot_id: Set(lot.id),
        base_price: Set(Decimal::new(50_000, 0)),
        down_payment: Set(Decimal::new(5_000, 0)),
        upfront_cash: Set(Decimal::new(2_000, 0)),
        installment_count: Set(36),
        monthly_amount: Set(Decimal::new(1_200, 0)),
        start_date: Set(Some(date(2024, 1, 1))),
        status: Set("ACTIVE".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed contract");

    contracted_services::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(demo_contract_id()),
        service_id: Set(service.id),
        agreed_price: Set(Some(Decimal::new(700, 0))),
        charged_on: Set(Some(date(2024, 1, 15))),
        status: Set("PENDIENTE".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed contracted service");

    let loan_id = Uuid::new_v4();
    loans::ActiveModel {
        id: Set(loan_id),
        contract_id: Set(demo_contract_id()),
        description: Set("Préstamo de materiales".to_string()),
        disbursed_on: Set(Some(date(2024, 2, 10))),
        disbursed_amount: Set(Some(Decimal::new(3_000, 0))),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed loan");

    for sequence in 1..=2 {
        loan_installments::ActiveModel {
            id: Set(Uuid::new_v4()),
            loan_id: Set(loan_id),
            sequence: Set(sequence),
            due_date: Set(date(2024, 2 + u32::try_from(sequence).unwrap(), 10)),
            amount: Set(Decimal::new(500, 0)),
            status: Set("PENDIENTE".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed loan installment");
    }

    for (kind, description, amount, paid_on) in [
        ("PAGO CUOTA", "Pago cuota 1", 1_200i64, date(2024, 2, 1)),
        ("PAGO CUOTA", "Pago cuota 2", 1_200, date(2024, 3, 1)),
    ] {
        payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_id: Set(demo_contract_id()),
            kind: Set(kind.to_string()),
            description: Set(description.to_string()),
            amount: Set(Decimal::new(amount, 0)),
            paid_on: Set(Some(paid_on)),
            status: Set("CONFIRMADO".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed payment");
    }
}

/// Seeds materials and an open delivery ticket with two pending lines.
async fn seed_stock(db: &DatabaseConnection) {
    if stock_tickets::Entity::find_by_id(demo_ticket_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo stock ticket already exists, skipping");
        return;
    }

    let now = Utc::now();
    let mut material_ids = Vec::new();
    for (name, unit) in [("Cemento Portland", "bolsa"), ("Arena lavada", "m3")] {
        let id = Uuid::new_v4();
        materials::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            unit: Set(unit.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed material");
        material_ids.push((id, name));
    }

    stock_tickets::ActiveModel {
        id: Set(demo_ticket_id()),
        project_id: Set(demo_project_id()),
        reference: Set("TK-2024-0001".to_string()),
        kind: Set("DELIVERY".to_string()),
        status: Set("OPEN".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed stock ticket");

    for (material_id, name) in material_ids {
        stock_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            ticket_id: Set(demo_ticket_id()),
            material_id: Set(material_id),
            material_name: Set(name.to_string()),
            requested_qty: Set(Decimal::new(10, 0)),
            delivered_qty: Set(Decimal::ZERO),
            status: Set("PENDING".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed stock line");
    }
}
