//! Integration tests for `MovementRepository` against a real MySQL.
//!
//! Starts a throwaway MySQL container, loads a tiny star schema and checks
//! the composed statements end to end. Needs Docker, so the tests are
//! ignored by default: `cargo test -p wwi-db -- --ignored`.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use testcontainers_modules::{
    mysql::Mysql,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};
use wwi_core::movements::{Granularity, MovementFilter, OptionKind, OptionValue};
use wwi_db::MovementRepository;
use wwi_shared::types::PageRequest;

const SCHEMA: &[&str] = &[
    "CREATE TABLE DIM_Fecha (FechaDWH INT PRIMARY KEY, Fecha DATE NOT NULL)",
    "CREATE TABLE DIM_Proveedor (ProveedorDWH INT PRIMARY KEY, NombreProveedor VARCHAR(100) NOT NULL)",
    "CREATE TABLE DIM_TipoTransaccion (TipoTransaccionDWH INT PRIMARY KEY, NombreTipoTransaccion VARCHAR(100) NOT NULL)",
    "CREATE TABLE FACT_Movimientos (
        MovimientoDWH INT AUTO_INCREMENT PRIMARY KEY,
        FechaDWH INT NOT NULL,
        ClienteDWH INT NULL,
        ProveedorDWH INT NOT NULL,
        TipoTransaccionDWH INT NOT NULL,
        ProductoDWH INT NOT NULL,
        FacturaID INT NULL,
        Cantidad DECIMAL(18, 3) NOT NULL
    )",
    "INSERT INTO DIM_Fecha VALUES (1, '2024-01-05'), (2, '2024-01-20'), (3, '2024-02-14')",
    "INSERT INTO DIM_Proveedor VALUES (1, 'Contoso Ltd'), (2, 'Fabrikam Inc')",
    "INSERT INTO DIM_TipoTransaccion VALUES (1, 'Venta'), (2, 'Compra')",
    "INSERT INTO FACT_Movimientos
        (FechaDWH, ClienteDWH, ProveedorDWH, TipoTransaccionDWH, ProductoDWH, FacturaID, Cantidad)
     VALUES
        (1, 10, 1, 1, 100, 5001, -20.000),
        (2, 10, 1, 1, 101, 5002, -5.500),
        (2, NULL, 2, 2, 102, NULL, 40.000),
        (3, 0, 2, 2, 103, NULL, 12.000),
        (3, 11, 1, 2, 104, 5003, 7.250)",
];

async fn start_warehouse() -> (ContainerAsync<Mysql>, DatabaseConnection) {
    let container = Mysql::default()
        .start()
        .await
        .expect("Failed to start MySQL container");
    let port = container
        .get_host_port_ipv4(3306)
        .await
        .expect("Failed to read MySQL port");
    let db = Database::connect(format!("mysql://root@127.0.0.1:{port}/test"))
        .await
        .expect("Failed to connect to database");

    for statement in SCHEMA {
        db.execute_unprepared(statement)
            .await
            .expect("Failed to load schema");
    }

    (container, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reports_against_mysql() {
    let (_container, db) = start_warehouse().await;
    let repo = MovementRepository::new(Arc::new(db));

    assert!(repo.ping().await.expect("ping"));

    // Detail: newest first, paginated
    let page = repo
        .list_movements(&MovementFilter::new(), PageRequest::new(2, 0))
        .await
        .expect("list movements");
    assert_eq!(page.pagination.total, 5);
    assert!(page.pagination.has_more);
    assert_eq!(page.data[0].date.as_deref(), Some("2024-02-14"));

    // KPIs: magnitude equals the sum of |Cantidad| over the detail rows
    let january = MovementFilter::new()
        .with_date_from(date(2024, 1, 1))
        .with_date_to(date(2024, 1, 31));
    let detail = repo
        .list_movements(&january, PageRequest::default())
        .await
        .expect("january detail");
    let magnitude: Decimal = detail.data.iter().map(|row| row.quantity.abs()).sum();
    let summary = repo.summary(&january).await.expect("january summary");
    assert_eq!(detail.pagination.total, 3);
    assert_eq!(summary.kpis.record_count, 3);
    assert_eq!(summary.kpis.total_magnitude, magnitude);

    let summary = repo
        .summary(&MovementFilter::new())
        .await
        .expect("summary");
    assert_eq!(summary.kpis.record_count, 5);
    assert_eq!(summary.kpis.total_magnitude, dec!(84.75));
    assert_eq!(summary.kpis.active_clients, 2);
    assert_eq!(summary.kpis.active_providers, 2);
    assert_eq!(summary.top_providers[0].name, "Fabrikam Inc");
    assert!(
        summary
            .top_providers
            .windows(2)
            .all(|pair| pair[0].total >= pair[1].total)
    );
    assert_eq!(summary.top_clients.len(), 2);
    assert_eq!(summary.top_clients[0].client_id, 10);

    // Provider filter is a case-insensitive substring match
    let contoso = MovementFilter::new().with_provider("contoso");
    let summary = repo.summary(&contoso).await.expect("filtered summary");
    assert_eq!(summary.kpis.record_count, 3);
    assert_eq!(summary.kpis.total_magnitude, dec!(32.75));

    // Date range is inclusive on both ends
    let bounds = MovementFilter::new()
        .with_date_from(date(2024, 1, 5))
        .with_date_to(date(2024, 1, 20));
    let page = repo
        .list_movements(&bounds, PageRequest::default())
        .await
        .expect("january");
    assert_eq!(page.pagination.total, 3);

    let timeline = repo
        .timeline(&MovementFilter::new(), Granularity::Month)
        .await
        .expect("timeline");
    assert_eq!(timeline.data.len(), 2);
    assert_eq!(timeline.data[0].bucket, "2024-01-01");
    assert_eq!(timeline.data[0].total, dec!(65.5));
    assert_eq!(timeline.data[1].month, 2);

    let clients = repo.options(OptionKind::Clients).await.expect("options");
    assert_eq!(
        clients.iter().map(|o| o.value.clone()).collect::<Vec<_>>(),
        vec![OptionValue::Id(10), OptionValue::Id(11)]
    );
}
