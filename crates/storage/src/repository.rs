//! SQLite Repository

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::records::{
    FuelGrade, NewTripRecord, NewUserCar, Page, TripRecord, TripStats, UserCar, Vehicle,
};
use crate::seed::ReferenceSeed;
use crate::{ReferenceStore, StorageError, TripStore, UserCarStore};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS vehicles (
        id INTEGER PRIMARY KEY,
        maker TEXT NOT NULL,
        model TEXT NOT NULL,
        car_name TEXT NOT NULL,
        cylinders INTEGER NOT NULL,
        engine_type INTEGER NOT NULL,
        horsepower REAL NOT NULL,
        horsepower_rpm INTEGER NOT NULL,
        transmission INTEGER NOT NULL,
        fuel_tank_capacity REAL NOT NULL,
        acceleration_0_100 REAL NOT NULL,
        top_speed_kmh INTEGER NOT NULL,
        fuel_grade INTEGER NOT NULL,
        year INTEGER NOT NULL,
        car_type INTEGER NOT NULL,
        search_key TEXT NOT NULL DEFAULT ''
    )"#,
    r#"CREATE TABLE IF NOT EXISTS fuel_grades (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        fuel_type TEXT NOT NULL,
        grade_code INTEGER NOT NULL,
        price_per_unit REAL NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS user_cars (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
        fuel_id INTEGER NOT NULL REFERENCES fuel_grades(id),
        custom_name TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_user_cars_user ON user_cars(user_id, id)",
    r#"CREATE TABLE IF NOT EXISTS trip_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
        fuel_id INTEGER NOT NULL REFERENCES fuel_grades(id),
        custom_label TEXT,
        consumption_rate REAL NOT NULL,
        fuel_needed REAL NOT NULL,
        distance REAL NOT NULL,
        origin TEXT NOT NULL,
        destination TEXT NOT NULL,
        tolls BOOLEAN NOT NULL,
        fuel_cost REAL NOT NULL,
        toll_cost REAL NOT NULL,
        created_at_ms INTEGER NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_trip_records_user ON trip_records(user_id, id)",
];

const VEHICLE_COLUMNS: &str = "id, maker, model, car_name, cylinders, engine_type, horsepower, \
    horsepower_rpm, transmission, fuel_tank_capacity, acceleration_0_100, top_speed_kmh, \
    fuel_grade, year, car_type";

const TRIP_COLUMNS: &str = "id, user_id, vehicle_id, fuel_id, custom_label, consumption_rate, \
    fuel_needed, distance, origin, destination, tolls, fuel_cost, toll_cost, created_at_ms";

const USER_CAR_SELECT: &str = "SELECT uc.id, uc.user_id, uc.vehicle_id, uc.fuel_id, \
    uc.custom_name, v.car_name, f.fuel_type \
    FROM user_cars uc \
    JOIN vehicles v ON v.id = uc.vehicle_id \
    JOIN fuel_grades f ON f.id = uc.fuel_id";

/// SQLite-backed repository implementing every store trait
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open (creating if missing) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        info!("Opening SQLite database at {}", url);
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Private in-memory database. Pinned to a single connection because
    /// every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        debug!("Creating in-memory SQLite repository");
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema ready ({} statements)", SCHEMA.len());
        Ok(())
    }

    /// Cheap liveness probe for health reporting
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Upsert reference data by id inside one transaction.
    /// Returns (vehicles, fuel grades) written.
    pub async fn seed(&self, seed: &ReferenceSeed) -> Result<(usize, usize), StorageError> {
        let mut tx = self.pool.begin().await?;

        for v in &seed.vehicles {
            sqlx::query(
                "INSERT INTO vehicles (id, maker, model, car_name, cylinders, engine_type, \
                 horsepower, horsepower_rpm, transmission, fuel_tank_capacity, \
                 acceleration_0_100, top_speed_kmh, fuel_grade, year, car_type, search_key) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET \
                 maker = excluded.maker, model = excluded.model, car_name = excluded.car_name, \
                 cylinders = excluded.cylinders, engine_type = excluded.engine_type, \
                 horsepower = excluded.horsepower, horsepower_rpm = excluded.horsepower_rpm, \
                 transmission = excluded.transmission, \
                 fuel_tank_capacity = excluded.fuel_tank_capacity, \
                 acceleration_0_100 = excluded.acceleration_0_100, \
                 top_speed_kmh = excluded.top_speed_kmh, fuel_grade = excluded.fuel_grade, \
                 year = excluded.year, car_type = excluded.car_type, \
                 search_key = excluded.search_key",
            )
            .bind(v.id)
            .bind(&v.maker)
            .bind(&v.model)
            .bind(&v.car_name)
            .bind(v.cylinders)
            .bind(v.engine_type)
            .bind(v.horsepower)
            .bind(v.horsepower_rpm)
            .bind(v.transmission)
            .bind(v.fuel_tank_capacity)
            .bind(v.acceleration_0_100)
            .bind(v.top_speed_kmh)
            .bind(v.fuel_grade)
            .bind(v.year)
            .bind(v.car_type)
            .bind(search_key(v))
            .execute(&mut *tx)
            .await?;
        }

        for f in &seed.fuel_grades {
            sqlx::query(
                "INSERT INTO fuel_grades (id, station, fuel_type, grade_code, price_per_unit) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET \
                 station = excluded.station, fuel_type = excluded.fuel_type, \
                 grade_code = excluded.grade_code, price_per_unit = excluded.price_per_unit",
            )
            .bind(f.id)
            .bind(&f.station)
            .bind(&f.fuel_type)
            .bind(f.grade_code)
            .bind(f.price_per_unit)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Seeded {} vehicles and {} fuel grades",
            seed.vehicles.len(),
            seed.fuel_grades.len()
        );
        Ok((seed.vehicles.len(), seed.fuel_grades.len()))
    }
}

#[async_trait]
impl ReferenceStore for SqliteRepository {
    async fn get_vehicle(&self, id: i64) -> Result<Vehicle, StorageError> {
        let sql = format!("SELECT {} FROM vehicles WHERE id = ?", VEHICLE_COLUMNS);
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::VehicleNotFound(id))
    }

    async fn get_fuel_grade(&self, id: i64) -> Result<FuelGrade, StorageError> {
        sqlx::query_as::<_, FuelGrade>(
            "SELECT id, station, fuel_type, grade_code, price_per_unit FROM fuel_grades WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::FuelGradeNotFound(id))
    }

    async fn search_vehicles(&self, query: &str, page: Page) -> Result<Vec<Vehicle>, StorageError> {
        let query = query.trim();
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        let sql = format!(
            "SELECT {} FROM vehicles \
             WHERE ? = '' OR search_key LIKE ? ESCAPE '\\' \
             ORDER BY car_name, id LIMIT ? OFFSET ?",
            VEHICLE_COLUMNS
        );

        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(query)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        debug!("Vehicle search {:?} matched {} rows", query, vehicles.len());
        Ok(vehicles)
    }

    async fn list_fuel_grades(&self) -> Result<Vec<FuelGrade>, StorageError> {
        let grades = sqlx::query_as::<_, FuelGrade>(
            "SELECT id, station, fuel_type, grade_code, price_per_unit FROM fuel_grades ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(grades)
    }
}

#[async_trait]
impl TripStore for SqliteRepository {
    async fn insert_trip(&self, record: NewTripRecord) -> Result<TripRecord, StorageError> {
        let created_at_ms = now_ms();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO trip_records (user_id, vehicle_id, fuel_id, custom_label, \
             consumption_rate, fuel_needed, distance, origin, destination, tolls, fuel_cost, \
             toll_cost, created_at_ms) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.user_id)
        .bind(record.vehicle_id)
        .bind(record.fuel_id)
        .bind(&record.custom_label)
        .bind(record.consumption_rate)
        .bind(record.fuel_needed)
        .bind(record.distance)
        .bind(&record.origin)
        .bind(&record.destination)
        .bind(record.tolls)
        .bind(record.fuel_cost)
        .bind(record.toll_cost)
        .bind(created_at_ms)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        debug!("Inserted trip record {} for user {}", id, record.user_id);
        Ok(record.into_persisted(id, created_at_ms))
    }

    async fn get_trip(&self, user_id: &str, id: i64) -> Result<TripRecord, StorageError> {
        let sql = format!(
            "SELECT {} FROM trip_records WHERE id = ? AND user_id = ?",
            TRIP_COLUMNS
        );
        sqlx::query_as::<_, TripRecord>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::TripNotFound(id))
    }

    async fn list_trips(&self, user_id: &str, page: Page) -> Result<Vec<TripRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM trip_records WHERE user_id = ? ORDER BY id DESC LIMIT ? OFFSET ?",
            TRIP_COLUMNS
        );
        let trips = sqlx::query_as::<_, TripRecord>(&sql)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(trips)
    }

    async fn trip_stats(&self, user_id: &str) -> Result<TripStats, StorageError> {
        let stats = sqlx::query_as::<_, TripStats>(
            "SELECT COUNT(*) AS trip_count, \
             COALESCE(SUM(distance), 0.0) AS distance_traveled, \
             COALESCE(SUM(fuel_needed), 0.0) AS fuel_consumed \
             FROM trip_records WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}

#[async_trait]
impl UserCarStore for SqliteRepository {
    async fn add_user_car(&self, car: NewUserCar) -> Result<UserCar, StorageError> {
        // Surface missing references as not-found rather than FK failures
        self.get_vehicle(car.vehicle_id).await?;
        self.get_fuel_grade(car.fuel_id).await?;

        let result = sqlx::query(
            "INSERT INTO user_cars (user_id, vehicle_id, fuel_id, custom_name) VALUES (?, ?, ?, ?)",
        )
        .bind(&car.user_id)
        .bind(car.vehicle_id)
        .bind(car.fuel_id)
        .bind(&car.custom_name)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("User {} saved car {} as {:?}", car.user_id, id, car.custom_name);
        self.get_user_car(&car.user_id, id).await
    }

    async fn get_user_car(&self, user_id: &str, id: i64) -> Result<UserCar, StorageError> {
        let sql = format!("{} WHERE uc.id = ? AND uc.user_id = ?", USER_CAR_SELECT);
        sqlx::query_as::<_, UserCar>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::UserCarNotFound(id))
    }

    async fn list_user_cars(&self, user_id: &str, page: Page) -> Result<Vec<UserCar>, StorageError> {
        let sql = format!(
            "{} WHERE uc.user_id = ? ORDER BY uc.id LIMIT ? OFFSET ?",
            USER_CAR_SELECT
        );
        let cars = sqlx::query_as::<_, UserCar>(&sql)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }
}

/// Lowercased searchable text. Folded here rather than with SQLite `lower()`,
/// which only folds ASCII. Fields are joined by a unit separator so a match
/// cannot span two of them.
fn search_key(vehicle: &Vehicle) -> String {
    [&vehicle.car_name, &vehicle.maker, &vehicle.model]
        .iter()
        .map(|field| field.to_lowercase())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supra() -> Vehicle {
        Vehicle {
            id: 1,
            maker: "Toyota".to_string(),
            model: "Supra MK4".to_string(),
            car_name: "Toyota Supra MK4".to_string(),
            cylinders: 6,
            engine_type: 2,
            horsepower: 320.0,
            horsepower_rpm: 5600,
            transmission: 1,
            fuel_tank_capacity: 50.0,
            acceleration_0_100: 4.9,
            top_speed_kmh: 250,
            fuel_grade: 2,
            year: 1998,
            car_type: 3,
        }
    }

    fn pertalite() -> FuelGrade {
        FuelGrade {
            id: 1,
            station: "Pertamina".to_string(),
            fuel_type: "Pertalite".to_string(),
            grade_code: 1,
            price_per_unit: 10_000.0,
        }
    }

    async fn seeded_repo() -> SqliteRepository {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let mut jazz = supra();
        jazz.id = 2;
        jazz.maker = "Honda".to_string();
        jazz.model = "Jazz".to_string();
        jazz.car_name = "Honda Jazz RS".to_string();
        jazz.cylinders = 4;

        repo.seed(&ReferenceSeed {
            vehicles: vec![supra(), jazz],
            fuel_grades: vec![pertalite()],
        })
        .await
        .unwrap();
        repo
    }

    fn new_trip(user_id: &str, distance: f64) -> NewTripRecord {
        NewTripRecord {
            user_id: user_id.to_string(),
            vehicle_id: 1,
            fuel_id: 1,
            custom_label: Some("Supra Bapak".to_string()),
            consumption_rate: 11.372_5,
            fuel_needed: distance / 11.372_5,
            distance,
            origin: "Jakarta".to_string(),
            destination: "Bandung".to_string(),
            tolls: true,
            fuel_cost: distance / 11.372_5 * 10_000.0,
            toll_cost: 25_500.0,
        }
    }

    #[tokio::test]
    async fn test_reference_lookup() {
        let repo = seeded_repo().await;

        assert_eq!(repo.get_vehicle(1).await.unwrap(), supra());
        assert_eq!(repo.get_fuel_grade(1).await.unwrap(), pertalite());
        assert!(matches!(
            repo.get_vehicle(99).await,
            Err(StorageError::VehicleNotFound(99))
        ));
        assert!(matches!(
            repo.get_fuel_grade(42).await,
            Err(StorageError::FuelGradeNotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_trip_round_trip() {
        let repo = seeded_repo().await;
        let input = new_trip("user-a", 172.9);

        let stored = repo.insert_trip(input.clone()).await.unwrap();
        assert!(stored.id > 0);

        let read = repo.get_trip("user-a", stored.id).await.unwrap();
        assert_eq!(read, stored);
        assert_eq!(read.user_id, input.user_id);
        assert_eq!(read.custom_label, input.custom_label);
        assert_eq!(read.distance.to_bits(), input.distance.to_bits());
        assert_eq!(read.fuel_needed.to_bits(), input.fuel_needed.to_bits());
        assert_eq!(read.fuel_cost.to_bits(), input.fuel_cost.to_bits());
        assert_eq!(read.toll_cost, input.toll_cost);
        assert!(read.tolls);
    }

    #[tokio::test]
    async fn test_trip_not_visible_to_other_users() {
        let repo = seeded_repo().await;
        let stored = repo.insert_trip(new_trip("user-a", 50.0)).await.unwrap();

        let err = repo.get_trip("user-b", stored.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.list_trips("user-b", Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_trips_newest_first_and_paged() {
        let repo = seeded_repo().await;
        for distance in [10.0, 20.0, 30.0] {
            repo.insert_trip(new_trip("user-a", distance)).await.unwrap();
        }

        let first = repo.list_trips("user-a", Page::new(0, 2)).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].distance, 30.0);
        assert_eq!(first[1].distance, 20.0);

        let second = repo.list_trips("user-a", Page::new(1, 2)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].distance, 10.0);
    }

    #[tokio::test]
    async fn test_trip_stats() {
        let repo = seeded_repo().await;
        assert_eq!(repo.trip_stats("user-a").await.unwrap(), TripStats::default());

        repo.insert_trip(new_trip("user-a", 100.0)).await.unwrap();
        repo.insert_trip(new_trip("user-a", 72.9)).await.unwrap();
        repo.insert_trip(new_trip("user-b", 500.0)).await.unwrap();

        let stats = repo.trip_stats("user-a").await.unwrap();
        assert_eq!(stats.trip_count, 2);
        assert!((stats.distance_traveled - 172.9).abs() < 1e-9);
        assert!((stats.fuel_consumed - 172.9 / 11.372_5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_insert_trip_with_unknown_vehicle_fails() {
        let repo = seeded_repo().await;
        let mut trip = new_trip("user-a", 10.0);
        trip.vehicle_id = 404;

        assert!(matches!(
            repo.insert_trip(trip).await,
            Err(StorageError::DatabaseError(_))
        ));
        assert_eq!(repo.trip_stats("user-a").await.unwrap().trip_count, 0);
    }

    #[tokio::test]
    async fn test_vehicle_search() {
        let repo = seeded_repo().await;

        let all = repo.search_vehicles("", Page::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let hits = repo.search_vehicles("supra", Page::default()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].car_name, "Toyota Supra MK4");

        let by_maker = repo.search_vehicles("HONDA", Page::default()).await.unwrap();
        assert_eq!(by_maker.len(), 1);
        assert_eq!(by_maker[0].id, 2);

        let wildcard = repo.search_vehicles("%", Page::default()).await.unwrap();
        assert!(wildcard.is_empty());
    }

    #[tokio::test]
    async fn test_vehicle_search_folds_non_ascii_case() {
        let repo = seeded_repo().await;
        let mut c3 = supra();
        c3.id = 3;
        c3.maker = "CITROËN".to_string();
        c3.model = "C3".to_string();
        c3.car_name = "Citroën C3".to_string();
        repo.seed(&ReferenceSeed {
            vehicles: vec![c3],
            fuel_grades: vec![],
        })
        .await
        .unwrap();

        for query in ["citroën", "CITROËN", "Citroën c3"] {
            let hits = repo.search_vehicles(query, Page::default()).await.unwrap();
            assert_eq!(hits.len(), 1, "query {:?}", query);
            assert_eq!(hits[0].id, 3);
        }

        // No match across the boundary between name and maker
        let spanning = repo.search_vehicles("c3citro", Page::default()).await.unwrap();
        assert!(spanning.is_empty());
    }

    #[tokio::test]
    async fn test_user_cars() {
        let repo = seeded_repo().await;

        let saved = repo
            .add_user_car(NewUserCar {
                user_id: "user-a".to_string(),
                vehicle_id: 1,
                fuel_id: 1,
                custom_name: "Supra Bapak".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(saved.car_name, "Toyota Supra MK4");
        assert_eq!(saved.fuel_type, "Pertalite");

        assert_eq!(repo.get_user_car("user-a", saved.id).await.unwrap(), saved);
        assert!(repo.get_user_car("user-b", saved.id).await.unwrap_err().is_not_found());
        assert_eq!(repo.list_user_cars("user-a", Page::default()).await.unwrap().len(), 1);

        let missing = repo
            .add_user_car(NewUserCar {
                user_id: "user-a".to_string(),
                vehicle_id: 77,
                fuel_id: 1,
                custom_name: "Ghost".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(StorageError::VehicleNotFound(77))));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent_upsert() {
        let repo = seeded_repo().await;
        let mut grade = pertalite();
        grade.price_per_unit = 10_500.0;

        repo.seed(&ReferenceSeed {
            vehicles: vec![supra()],
            fuel_grades: vec![grade],
        })
        .await
        .unwrap();

        assert_eq!(repo.get_fuel_grade(1).await.unwrap().price_per_unit, 10_500.0);
        assert_eq!(repo.list_fuel_grades().await.unwrap().len(), 1);
    }

    #[test]
    fn test_search_key() {
        let mut vehicle = supra();
        vehicle.maker = "ŠKODA".to_string();
        assert_eq!(search_key(&vehicle), "toyota supra mk4\u{1f}škoda\u{1f}supra mk4");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("jazz"), "jazz");
    }
}
