//! Initial database migration.
//!
//! Creates the sales tables (clients, projects, lots, contracts, services,
//! loans, payments) and the stock tables (materials, tickets, lines).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(LOTS_SQL).await?;
        db.execute_unprepared(SERVICES_SQL).await?;

        // ============================================================
        // PART 2: CONTRACTS & FINANCING
        // ============================================================
        db.execute_unprepared(CONTRACTS_SQL).await?;
        db.execute_unprepared(CONTRACTED_SERVICES_SQL).await?;
        db.execute_unprepared(LOANS_SQL).await?;
        db.execute_unprepared(LOAN_INSTALLMENTS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 3: STOCK TICKETS
        // ============================================================
        db.execute_unprepared(MATERIALS_SQL).await?;
        db.execute_unprepared(STOCK_TICKETS_SQL).await?;
        db.execute_unprepared(STOCK_LINES_SQL).await?;

        // ============================================================
        // PART 4: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    document_number TEXT,
    phone TEXT,
    email TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LOTS_SQL: &str = r"
CREATE TABLE lots (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id),
    code TEXT NOT NULL,
    block TEXT,
    area_m2 NUMERIC(12, 2),
    price NUMERIC(14, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (project_id, code)
);
";

const SERVICES_SQL: &str = r"
CREATE TABLE services (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    base_price NUMERIC(14, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONTRACTS_SQL: &str = r"
CREATE TABLE contracts (
    id UUID PRIMARY KEY,
    client_id UUID NOT NULL REFERENCES clients(id),
    lot_id UUID NOT NULL REFERENCES lots(id),
    base_price NUMERIC(14, 2) NOT NULL,
    down_payment NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (down_payment >= 0),
    upfront_cash NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (upfront_cash >= 0),
    installment_count INTEGER NOT NULL DEFAULT 0 CHECK (installment_count >= 0),
    monthly_amount NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (monthly_amount >= 0),
    start_date DATE,
    status TEXT NOT NULL DEFAULT 'ACTIVE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONTRACTED_SERVICES_SQL: &str = r"
CREATE TABLE contracted_services (
    id UUID PRIMARY KEY,
    contract_id UUID NOT NULL REFERENCES contracts(id),
    service_id UUID NOT NULL REFERENCES services(id),
    agreed_price NUMERIC(14, 2),
    charged_on DATE,
    status TEXT NOT NULL DEFAULT 'PENDIENTE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LOANS_SQL: &str = r"
CREATE TABLE loans (
    id UUID PRIMARY KEY,
    contract_id UUID NOT NULL REFERENCES contracts(id),
    description TEXT NOT NULL,
    disbursed_on DATE,
    disbursed_amount NUMERIC(14, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LOAN_INSTALLMENTS_SQL: &str = r"
CREATE TABLE loan_installments (
    id UUID PRIMARY KEY,
    loan_id UUID NOT NULL REFERENCES loans(id),
    sequence INTEGER NOT NULL CHECK (sequence >= 1),
    due_date DATE NOT NULL,
    amount NUMERIC(14, 2) NOT NULL,
    status TEXT NOT NULL DEFAULT 'PENDIENTE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (loan_id, sequence)
);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    contract_id UUID NOT NULL REFERENCES contracts(id),
    kind TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    amount NUMERIC(14, 2) NOT NULL,
    paid_on DATE,
    status TEXT NOT NULL DEFAULT 'CONFIRMADO',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const MATERIALS_SQL: &str = r"
CREATE TABLE materials (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT 'unidad',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const STOCK_TICKETS_SQL: &str = r"
CREATE TABLE stock_tickets (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id),
    reference TEXT NOT NULL,
    kind TEXT NOT NULL DEFAULT 'DELIVERY',
    status TEXT NOT NULL DEFAULT 'OPEN',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const STOCK_LINES_SQL: &str = r"
CREATE TABLE stock_lines (
    id UUID PRIMARY KEY,
    ticket_id UUID NOT NULL REFERENCES stock_tickets(id),
    material_id UUID NOT NULL REFERENCES materials(id),
    material_name TEXT NOT NULL,
    requested_qty NUMERIC(14, 2) NOT NULL CHECK (requested_qty > 0),
    delivered_qty NUMERIC(14, 2) NOT NULL DEFAULT 0
        CHECK (delivered_qty >= 0 AND delivered_qty <= requested_qty),
    status TEXT NOT NULL DEFAULT 'PENDING',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_lots_project ON lots(project_id);
CREATE INDEX idx_contracts_client ON contracts(client_id);
CREATE INDEX idx_contracts_lot ON contracts(lot_id);
CREATE INDEX idx_contracted_services_contract ON contracted_services(contract_id);
CREATE INDEX idx_loans_contract ON loans(contract_id);
CREATE INDEX idx_loan_installments_loan ON loan_installments(loan_id);
CREATE INDEX idx_payments_contract ON payments(contract_id);
CREATE INDEX idx_stock_tickets_project ON stock_tickets(project_id);
CREATE INDEX idx_stock_lines_ticket ON stock_lines(ticket_id);
CREATE INDEX idx_stock_lines_material ON stock_lines(material_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS stock_lines;
DROP TABLE IF EXISTS stock_tickets;
DROP TABLE IF EXISTS materials;
DROP TABLE IF EXISTS payments;
DROP TABLE IF EXISTS loan_installments;
DROP TABLE IF EXISTS loans;
DROP TABLE IF EXISTS contracted_services;
DROP TABLE IF EXISTS contracts;
DROP TABLE IF EXISTS services;
DROP TABLE IF EXISTS lots;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS clients;
";
