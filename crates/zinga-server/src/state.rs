use std::sync::Arc;

use zinga_core::repository::UserRepository;

pub struct AppState<U> {
    pub users: Arc<U>,
    pub min_password_length: usize,
}

impl<U: UserRepository> AppState<U> {
    pub fn new(users: U, min_password_length: usize) -> Self {
        Self {
            users: Arc::new(users),
            min_password_length,
        }
    }
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            min_password_length: self.min_password_length,
        }
    }
}
