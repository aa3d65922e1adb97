//! In-memory repository fakes for service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use tabling_core::{
    models::{ApproveStatus, Kiosk, Reservation, Review, Store, User},
    traits::{
        KioskRepository, Repository, ReservationRepository, ReviewRepository, StoreRepository,
        UserRepository,
    },
    AppResult,
};

fn next_id<T>(map: &HashMap<i64, T>) -> i64 {
    map.keys().max().copied().unwrap_or(0) + 1
}

// ==================== Users ====================

#[derive(Default)]
pub struct MemUserRepository {
    pub users: Mutex<HashMap<i64, User>>,
}

impl MemUserRepository {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl Repository<User, i64> for MemUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn create(&self, entity: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let mut user = entity.clone();
        user.id = next_id(&users);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, entity: &User) -> AppResult<User> {
        self.users
            .lock()
            .unwrap()
            .insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn promote_to_partner(&self, id: i64) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&id) {
            Some(u) if !u.role.is_partner() => {
                u.role = tabling_core::models::UserRole::Partner;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ==================== Stores ====================

#[derive(Default)]
pub struct MemStoreRepository {
    pub stores: Mutex<HashMap<i64, Store>>,
}

impl MemStoreRepository {
    pub fn with(stores: Vec<Store>) -> Self {
        Self {
            stores: Mutex::new(stores.into_iter().map(|s| (s.id, s)).collect()),
        }
    }
}

#[async_trait]
impl Repository<Store, i64> for MemStoreRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Store>> {
        Ok(self.stores.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Store>> {
        Ok(self.stores.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.stores.lock().unwrap().len() as i64)
    }

    async fn create(&self, entity: &Store) -> AppResult<Store> {
        let mut stores = self.stores.lock().unwrap();
        let mut store = entity.clone();
        store.id = next_id(&stores);
        stores.insert(store.id, store.clone());
        Ok(store)
    }

    async fn update(&self, entity: &Store) -> AppResult<Store> {
        self.stores
            .lock()
            .unwrap()
            .insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.stores.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl StoreRepository for MemStoreRepository {
    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Store>> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_name(&self, limit: i64, offset: i64) -> AppResult<(Vec<Store>, i64)> {
        let mut stores: Vec<Store> = self.stores.lock().unwrap().values().cloned().collect();
        let total = stores.len() as i64;
        stores.sort_by(|a, b| a.name.cmp(&b.name));
        let page = stores
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_by_star(&self, limit: i64, offset: i64) -> AppResult<(Vec<Store>, i64)> {
        let mut stores: Vec<Store> = self.stores.lock().unwrap().values().cloned().collect();
        let total = stores.len() as i64;
        stores.sort_by(|a, b| b.star.partial_cmp(&a.star).unwrap_or(std::cmp::Ordering::Equal));
        let page = stores
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn refresh_rating(&self, store_id: i64) -> AppResult<f64> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .get(&store_id)
            .map(|s| s.star)
            .unwrap_or(0.0))
    }
}

// ==================== Reservations ====================

#[derive(Default)]
pub struct MemReservationRepository {
    pub reservations: Mutex<HashMap<i64, Reservation>>,
}

impl MemReservationRepository {
    pub fn with(reservations: Vec<Reservation>) -> Self {
        Self {
            reservations: Mutex::new(reservations.into_iter().map(|r| (r.id, r)).collect()),
        }
    }
}

#[async_trait]
impl Repository<Reservation, i64> for MemReservationRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        Ok(self.reservations.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.reservations.lock().unwrap().len() as i64)
    }

    async fn create(&self, entity: &Reservation) -> AppResult<Reservation> {
        let mut reservations = self.reservations.lock().unwrap();
        let mut reservation = entity.clone();
        reservation.id = next_id(&reservations);
        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update(&self, entity: &Reservation) -> AppResult<Reservation> {
        self.reservations
            .lock()
            .unwrap()
            .insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.reservations.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationRepository for MemReservationRepository {
    async fn find_for_partner_on(
        &self,
        _partner_id: i64,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let mut matched: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.reserved_at.date_naive() == date)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.reserved_at);
        Ok(matched)
    }

    async fn decide(
        &self,
        id: i64,
        decision: ApproveStatus,
    ) -> AppResult<Option<Reservation>> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.get_mut(&id) {
            Some(r) if r.approve_status == ApproveStatus::Requested => {
                r.approve_status = decision;
                Ok(Some(r.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_visited(&self, id: i64) -> AppResult<bool> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.get_mut(&id) {
            Some(r) if !r.visited => {
                r.visited = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_reviewed(&self, id: i64) -> AppResult<bool> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.get_mut(&id) {
            Some(r) if !r.reviewed => {
                r.reviewed = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_all_by_store(&self, store_id: i64) -> AppResult<i64> {
        let mut reservations = self.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|_, r| r.store_id != store_id);
        Ok((before - reservations.len()) as i64)
    }
}

// ==================== Reviews ====================

#[derive(Default)]
pub struct MemReviewRepository {
    pub reviews: Mutex<HashMap<i64, Review>>,
}

#[async_trait]
impl Repository<Review, i64> for MemReviewRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Review>> {
        Ok(self.reviews.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Review>> {
        Ok(self.reviews.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.reviews.lock().unwrap().len() as i64)
    }

    async fn create(&self, entity: &Review) -> AppResult<Review> {
        let mut reviews = self.reviews.lock().unwrap();
        let mut review = entity.clone();
        review.id = next_id(&reviews);
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, entity: &Review) -> AppResult<Review> {
        self.reviews
            .lock()
            .unwrap()
            .insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.reviews.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for MemReviewRepository {
    async fn find_by_reservation(&self, reservation_id: i64) -> AppResult<Option<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .values()
            .find(|r| r.reservation_id == reservation_id)
            .cloned())
    }

    async fn find_by_store(
        &self,
        store_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Review>> {
        let mut matched: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.store_id == store_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_store(&self, store_id: i64) -> AppResult<i64> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.store_id == store_id)
            .count() as i64)
    }

    async fn delete_all_by_store(&self, store_id: i64) -> AppResult<i64> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|_, r| r.store_id != store_id);
        Ok((before - reviews.len()) as i64)
    }
}

// ==================== Kiosks ====================

#[derive(Default)]
pub struct MemKioskRepository {
    pub kiosks: Mutex<HashMap<i64, Kiosk>>,
}

impl MemKioskRepository {
    pub fn with(kiosks: Vec<Kiosk>) -> Self {
        Self {
            kiosks: Mutex::new(kiosks.into_iter().map(|k| (k.id, k)).collect()),
        }
    }
}

#[async_trait]
impl Repository<Kiosk, i64> for MemKioskRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Kiosk>> {
        Ok(self.kiosks.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Kiosk>> {
        Ok(self.kiosks.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.kiosks.lock().unwrap().len() as i64)
    }

    async fn create(&self, entity: &Kiosk) -> AppResult<Kiosk> {
        let mut kiosks = self.kiosks.lock().unwrap();
        let mut kiosk = entity.clone();
        kiosk.id = next_id(&kiosks);
        kiosks.insert(kiosk.id, kiosk.clone());
        Ok(kiosk)
    }

    async fn update(&self, entity: &Kiosk) -> AppResult<Kiosk> {
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.kiosks.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl KioskRepository for MemKioskRepository {
    async fn find_by_store(&self, store_id: i64) -> AppResult<Option<Kiosk>> {
        Ok(self
            .kiosks
            .lock()
            .unwrap()
            .values()
            .find(|k| k.store_id == store_id)
            .cloned())
    }
}

// ==================== Fixtures ====================

pub fn customer(id: i64, username: &str) -> User {
    use tabling_core::models::UserRole;
    let now = chrono::Utc::now();
    User {
        id,
        email: format!("{}@example.com", username),
        username: username.to_string(),
        phone: None,
        role: UserRole::Customer,
        created_at: now,
        updated_at: now,
    }
}

pub fn partner(id: i64, username: &str) -> User {
    let mut user = customer(id, username);
    user.role = tabling_core::models::UserRole::Partner;
    user
}

pub fn store(id: i64, owner_id: i64, name: &str) -> Store {
    let mut s = Store::new(owner_id, name.to_string(), String::new(), 37.5, 127.0);
    s.id = id;
    s
}

pub fn kiosk(id: i64, store_id: i64) -> Kiosk {
    let mut k = Kiosk::new(store_id);
    k.id = id;
    k
}

pub fn reservation(id: i64, store_id: i64, customer_id: i64) -> Reservation {
    let mut r = Reservation::new(
        store_id,
        customer_id,
        "010-1111-2222".to_string(),
        chrono::Utc::now(),
        "4821".to_string(),
    );
    r.id = id;
    r
}
