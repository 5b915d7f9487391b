use std::sync::Mutex;
use trustkeeper_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(item) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *item = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn count_by<T, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> i64 {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).count() as i64
}

/// Replaces the first item matching `compare` or inserts `val` when none does.
/// Returns the stored value.
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> T {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|item| compare(item)) {
        Some(existing) => {
            update(existing);
            existing.clone()
        }
        None => {
            collection.push(val.clone());
            val.clone()
        }
    }
}
