//! The car directory service.
//!
//! [`CarService`] owns the ordered list of cars. It is a cheap handle: clones
//! share the same list, so one instance is built at startup and handed to
//! the HTTP router as state. Tests build a fresh one per case.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::models::*;

pub struct CarService {
    cars: Arc<Mutex<Vec<Car>>>,
}

impl CarService {
    pub fn new() -> Self {
        Self::with_cars(Vec::new())
    }

    pub fn with_cars(cars: Vec<Car>) -> Self {
        Self {
            cars: Arc::new(Mutex::new(cars)),
        }
    }

    /// A directory preloaded with [`sample_cars`].
    pub fn with_sample_data() -> Self {
        Self::with_cars(sample_cars())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Car>> {
        self.cars.lock().expect("car list lock poisoned")
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn list_all(&self) -> Vec<Car> {
        self.lock().clone()
    }

    /// Cars whose color matches exactly (case-sensitive), in list order.
    pub fn list_by_color(&self, color: &str) -> Result<Vec<Car>> {
        let matches: Vec<Car> = self
            .lock()
            .iter()
            .filter(|car| car.color == color)
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(Error::ColorNotFound {
                color: color.to_string(),
            });
        }
        Ok(matches)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Car> {
        self.lock()
            .iter()
            .find(|car| car.id == id)
            .cloned()
            .ok_or(Error::CarNotFound { id })
    }

    // ============================================================
    // Mutations
    // ============================================================

    /// Append a car. Ids are not checked for duplicates.
    pub fn add(&self, car: Car) -> Car {
        tracing::debug!(id = car.id, "adding car");
        self.lock().push(car.clone());
        car
    }

    /// Overwrite every field of the car with `car.id`.
    pub fn replace(&self, car: Car) -> Result<Car> {
        let mut cars = self.lock();
        let existing = cars
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or(Error::CarNotFound { id: car.id })?;

        tracing::debug!(id = car.id, "replacing car");
        *existing = car;
        Ok(existing.clone())
    }

    /// Overwrite only the fields set on `patch`.
    pub fn patch(&self, patch: CarPatch) -> Result<Car> {
        let mut cars = self.lock();
        let existing = cars
            .iter_mut()
            .find(|c| c.id == patch.id)
            .ok_or(Error::CarNotFound { id: patch.id })?;

        tracing::debug!(id = patch.id, "patching car");
        patch.apply_to(existing);
        Ok(existing.clone())
    }

    /// Remove the car with `id`, returning it.
    pub fn remove_by_id(&self, id: i64) -> Result<Car> {
        let mut cars = self.lock();
        let index = cars
            .iter()
            .position(|car| car.id == id)
            .ok_or(Error::CarNotFound { id })?;

        tracing::debug!(id, "removing car");
        Ok(cars.remove(index))
    }
}

impl Default for CarService {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CarService {
    fn clone(&self) -> Self {
        Self {
            cars: self.cars.clone(),
        }
    }
}

/// The five cars the server starts with unless told otherwise.
pub fn sample_cars() -> Vec<Car> {
    vec![
        Car::new(1, "Audi", "A6", "Black"),
        Car::new(2, "Volkswagen", "Polo", "Red"),
        Car::new(3, "Toyota", "Avensis", "White"),
        Car::new(4, "Toyota", "Camry", "Black"),
        Car::new(5, "Ford", "Focus", "Black"),
    ]
}
