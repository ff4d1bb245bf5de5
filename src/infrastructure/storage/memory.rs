//! In-memory repositories for development and testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::notification::{Notification, NotificationQuery, NotificationRepository};
use crate::domain::rental_option::{RentalOption, RentalOptionRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{
    Reservation, ReservationQuery, ReservationRepository, ReservationStatus,
};
use crate::domain::settings::{AppSettings, SettingsRepository};
use crate::domain::user::{
    CreateUserDto, GetUserDto, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::domain::vehicle::{AvailabilityPeriod, Vehicle, VehicleQuery, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::hash_password;
use crate::shared::{PaginatedResult, PaginationParams};

/// DashMap-backed stand-in for the SeaORM repositories.
///
/// Implements every repository trait on one struct, so a single instance
/// serves as the RepositoryProvider for service-level tests.
pub struct InMemoryRepositories {
    vehicles: DashMap<String, Vehicle>,
    periods: DashMap<String, Vec<AvailabilityPeriod>>,
    rental_options: DashMap<String, RentalOption>,
    reservations: DashMap<String, Reservation>,
    notifications: DashMap<String, Notification>,
    users: DashMap<String, User>,
    settings: DashMap<i32, AppSettings>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            periods: DashMap::new(),
            rental_options: DashMap::new(),
            reservations: DashMap::new(),
            notifications: DashMap::new(),
            users: DashMap::new(),
            settings: DashMap::new(),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let params = PaginationParams::clamped(Some(page), Some(limit));
    let items = items
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.limit as usize)
        .collect();
    PaginatedResult::new(items, total, params.page, params.limit)
}

// ── VehicleRepository ───────────────────────────────────────────

#[async_trait]
impl VehicleRepository for InMemoryRepositories {
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(id).map(|v| v.clone()))
    }

    async fn search(&self, query: &VehicleQuery) -> DomainResult<PaginatedResult<Vehicle>> {
        let mut matches: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| {
                if let Some(ref search) = query.search {
                    let needle = search.to_lowercase();
                    if !v.brand.to_lowercase().contains(&needle)
                        && !v.model.to_lowercase().contains(&needle)
                    {
                        return false;
                    }
                }
                if let Some(ref brand) = query.brand {
                    if &v.brand != brand {
                        return false;
                    }
                }
                if let Some(min) = query.min_price {
                    if v.price_per_day < min {
                        return false;
                    }
                }
                if let Some(max) = query.max_price {
                    if v.price_per_day > max {
                        return false;
                    }
                }
                if let Some(available) = query.available {
                    if v.is_available != available {
                        return false;
                    }
                }
                true
            })
            .map(|v| v.clone())
            .collect();

        matches.sort_by(|a, b| a.brand.cmp(&b.brand).then(a.model.cmp(&b.model)));
        Ok(paginate(matches, query.page, query.limit))
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        if !self.vehicles.contains_key(&vehicle.id) {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle.id,
            });
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn set_availability_flag(&self, id: &str, available: bool) -> DomainResult<()> {
        let Some(mut vehicle) = self.vehicles.get_mut(id) else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        };
        vehicle.is_available = available;
        vehicle.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.vehicles.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: id.to_string(),
        })?;
        self.periods.remove(id);
        Ok(())
    }

    async fn periods_for(&self, vehicle_id: &str) -> DomainResult<Vec<AvailabilityPeriod>> {
        let mut periods = self
            .periods
            .get(vehicle_id)
            .map(|p| p.clone())
            .unwrap_or_default();
        periods.sort_by_key(|p| p.start_date_time);
        Ok(periods)
    }

    async fn replace_periods(
        &self,
        vehicle_id: &str,
        periods: Vec<AvailabilityPeriod>,
    ) -> DomainResult<()> {
        self.periods.insert(vehicle_id.to_string(), periods);
        Ok(())
    }
}

// ── RentalOptionRepository ──────────────────────────────────────

#[async_trait]
impl RentalOptionRepository for InMemoryRepositories {
    async fn save(&self, option: RentalOption) -> DomainResult<()> {
        self.rental_options.insert(option.id.clone(), option);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RentalOption>> {
        Ok(self.rental_options.get(id).map(|o| o.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<RentalOption>> {
        let mut options: Vec<RentalOption> =
            self.rental_options.iter().map(|o| o.clone()).collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(options)
    }

    async fn update(&self, option: RentalOption) -> DomainResult<()> {
        if !self.rental_options.contains_key(&option.id) {
            return Err(DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: option.id,
            });
        }
        self.rental_options.insert(option.id.clone(), option);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.rental_options
            .remove(id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "RentalOption",
                field: "id",
                value: id.to_string(),
            })?;
        Ok(())
    }
}

// ── ReservationRepository ───────────────────────────────────────

#[async_trait]
impl ReservationRepository for InMemoryRepositories {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        self.reservations
            .insert(reservation.id.clone(), reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(id).map(|r| r.clone()))
    }

    async fn search(&self, query: &ReservationQuery) -> DomainResult<PaginatedResult<Reservation>> {
        let mut matches: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| {
                if let Some(ref status) = query.status {
                    if &r.status != status {
                        return false;
                    }
                }
                if let Some(ref vehicle_id) = query.vehicle_id {
                    if &r.vehicle_id != vehicle_id {
                        return false;
                    }
                }
                if let Some(ref customer_id) = query.customer_id {
                    if &r.customer_id != customer_id {
                        return false;
                    }
                }
                true
            })
            .map(|r| r.clone())
            .collect();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matches, query.page, query.limit))
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> DomainResult<()> {
        let Some(mut reservation) = self.reservations.get_mut(id) else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(())
    }
}

// ── NotificationRepository ──────────────────────────────────────

#[async_trait]
impl NotificationRepository for InMemoryRepositories {
    async fn save(&self, notification: Notification) -> DomainResult<()> {
        self.notifications
            .insert(notification.id.clone(), notification);
        Ok(())
    }

    async fn find_for_user(
        &self,
        query: &NotificationQuery,
    ) -> DomainResult<PaginatedResult<Notification>> {
        let mut matches: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == query.user_id && (!query.unread_only || !n.read))
            .map(|n| n.clone())
            .collect();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matches, query.page, query.limit))
    }

    async fn unread_count(&self, user_id: &str) -> DomainResult<u64> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as u64)
    }

    async fn mark_read(&self, id: &str, user_id: &str) -> DomainResult<()> {
        let Some(mut notification) = self.notifications.get_mut(id) else {
            return Err(DomainError::NotFound {
                entity: "Notification",
                field: "id",
                value: id.to_string(),
            });
        };
        if notification.user_id != user_id {
            return Err(DomainError::NotFound {
                entity: "Notification",
                field: "id",
                value: id.to_string(),
            });
        }
        notification.read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> DomainResult<u64> {
        let mut flipped = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.user_id == user_id && !entry.read {
                entry.read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

// ── SettingsRepository ──────────────────────────────────────────

#[async_trait]
impl SettingsRepository for InMemoryRepositories {
    async fn get(&self) -> DomainResult<AppSettings> {
        Ok(self.settings.get(&1).map(|s| s.clone()).unwrap_or_default())
    }

    async fn update(&self, mut settings: AppSettings) -> DomainResult<AppSettings> {
        settings.updated_at = Utc::now();
        self.settings.insert(1, settings.clone());
        Ok(settings)
    }
}

// ── UserRepositoryInterface ─────────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for InMemoryRepositories {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<()> {
        let duplicate = self
            .users
            .iter()
            .any(|u| u.username == dto.username || u.email == dto.email);
        if duplicate {
            return Err(DomainError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password)?;

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: dto.username,
            email: dto.email,
            password_hash,
            role: dto.role.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        let page = dto.page.unwrap_or(1).max(1);
        let page_size = dto.page_size.unwrap_or(20).clamp(1, 100);

        let mut matches: Vec<User> = self
            .users
            .iter()
            .filter(|u| {
                if let Some(ref search) = dto.search {
                    let needle = search.to_lowercase();
                    if !u.username.to_lowercase().contains(&needle)
                        && !u.email.to_lowercase().contains(&needle)
                    {
                        return false;
                    }
                }
                if let Some(ref role) = dto.role {
                    if &u.role != role {
                        return false;
                    }
                }
                true
            })
            .map(|u| u.clone())
            .collect();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matches, page, page_size))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Ok(None);
        };

        if let Some(email) = dto.email {
            user.email = email;
        }
        if let Some(role) = dto.role {
            user.role = role;
        }
        if let Some(is_active) = dto.is_active {
            user.is_active = is_active;
        }
        if let Some(ref password) = dto.password {
            user.password_hash = hash_password(password)?;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_user_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };
        user.password_hash = new_password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let Some(mut user) = self.users.get_mut(id) else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };
        user.last_login_at = Some(Utc::now());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.users.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

// ── RepositoryProvider ──────────────────────────────────────────

impl RepositoryProvider for InMemoryRepositories {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn rental_options(&self) -> &dyn RentalOptionRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        self
    }

    fn settings(&self) -> &dyn SettingsRepository {
        self
    }
}
